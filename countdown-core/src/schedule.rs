//! Time capabilities injected into the driver.

/// Source of the current instant, in epoch milliseconds.
pub trait Clock {
    fn now_ms(&self) -> i64;
}

/// Deferred and periodic execution on the host's single event loop.
///
/// Callbacks never run concurrently with each other. There is no
/// cancellation: a repeating task lives as long as the host does.
pub trait Scheduler {
    /// Run `task` once, `delay_ms` from now.
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>);

    /// Run `task` every `period_ms`, starting one period from now.
    fn repeat(&self, period_ms: u32, task: Box<dyn FnMut()>);
}

impl<C: Clock + ?Sized> Clock for std::rc::Rc<C> {
    fn now_ms(&self) -> i64 {
        (**self).now_ms()
    }
}

impl<S: Scheduler + ?Sized> Scheduler for std::rc::Rc<S> {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        (**self).schedule(delay_ms, task);
    }

    fn repeat(&self, period_ms: u32, task: Box<dyn FnMut()>) {
        (**self).repeat(period_ms, task);
    }
}
