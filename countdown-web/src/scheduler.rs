//! Browser timers and clock behind the core capability traits.

use countdown_core::{Clock, Scheduler};

use crate::dom;

/// `Date.now()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserClock;

impl Clock for BrowserClock {
    fn now_ms(&self) -> i64 {
        dom::now_ms()
    }
}

/// `window.setTimeout` / `window.setInterval`.
///
/// Closures are leaked to JavaScript: one-shot callbacks are dropped by the
/// runtime after they fire, the interval lives as long as the page.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        if let Err(err) = dom::set_timeout(delay_ms, task) {
            dom::console_error(&format!(
                "Failed to schedule countdown callback: {}",
                dom::js_error_message(&err)
            ));
        }
    }

    fn repeat(&self, period_ms: u32, task: Box<dyn FnMut()>) {
        if let Err(err) = dom::set_interval(period_ms, task) {
            dom::console_error(&format!(
                "Failed to start countdown tick: {}",
                dom::js_error_message(&err)
            ));
        }
    }
}
