//! Applies engine frames to a sink on a fixed tick.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use crate::celebration::CelebrationPlan;
use crate::config::CountdownConfig;
use crate::engine::{CountdownEngine, Frame};
use crate::message::StatusMessage;
use crate::progress::format_width;
use crate::render::RenderEffects;
use crate::schedule::{Clock, Scheduler};
use crate::sink::{DisplaySink, SinkError, Surface};
use crate::units::format_unit;

const COMPLETE_WIDTH: &str = "100%";

/// Completion is announced once; later bursts only show up in debug output.
const fn completion_level(first_completion: bool) -> log::Level {
    if first_completion {
        log::Level::Info
    } else {
        log::Level::Debug
    }
}

/// Log and swallow a failed write so the remaining surfaces still update.
fn isolate(what: &str, result: Result<(), SinkError>) {
    if let Err(err) = result {
        log::debug!("skipping {what}: {err}");
    }
}

struct Shared<S, C, R> {
    engine: RefCell<CountdownEngine>,
    sink: Rc<RefCell<S>>,
    clock: C,
    scheduler: R,
}

/// A running countdown bound to its host capabilities.
///
/// Scheduled callbacks hold the countdown alive; once [`Countdown::start`]
/// has been called it keeps ticking for as long as the scheduler runs.
pub struct Countdown<S, C, R> {
    shared: Rc<Shared<S, C, R>>,
}

impl<S, C, R> Clone for Countdown<S, C, R> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<S, C, R> Countdown<S, C, R>
where
    S: DisplaySink + 'static,
    C: Clock + 'static,
    R: Scheduler + 'static,
{
    pub fn new(config: CountdownConfig, sink: S, clock: C, scheduler: R) -> Self {
        Self {
            shared: Rc::new(Shared {
                engine: RefCell::new(CountdownEngine::new(config)),
                sink: Rc::new(RefCell::new(sink)),
                clock,
                scheduler,
            }),
        }
    }

    /// Render immediately, then keep rendering once per tick period.
    pub fn start(&self) {
        let period = self.shared.engine.borrow().config().tick_period_ms;
        log::info!(
            "countdown started: target {} ms, tick every {period} ms",
            self.shared.engine.borrow().config().target_ms
        );
        self.update();
        let ticker = self.clone();
        self.shared
            .scheduler
            .repeat(period, Box::new(move || ticker.update()));
    }

    /// Run a single tick against the clock.
    pub fn update(&self) {
        let now = self.shared.clock.now_ms();
        let (frame, first_completion) = {
            let mut engine = self.shared.engine.borrow_mut();
            let first_completion = !engine.has_celebrated();
            (engine.tick(now), first_completion)
        };
        log::trace!("tick at {now}: {frame:?}");
        match frame {
            Frame::Running {
                updates,
                progress,
                message,
                ..
            } => {
                self.apply_units(&updates);
                self.write_progress(&format_width(progress));
                self.write_message(message);
            }
            Frame::Completed { celebration } => {
                self.apply_completed();
                if let Some(plan) = celebration {
                    log::log!(
                        completion_level(first_completion),
                        "countdown complete, launching {} particles over {} ms",
                        plan.len(),
                        plan.duration_ms()
                    );
                    self.launch(plan);
                }
            }
        }
    }

    #[must_use]
    pub fn sink(&self) -> Ref<'_, S> {
        self.shared.sink.borrow()
    }

    #[must_use]
    pub fn engine(&self) -> Ref<'_, CountdownEngine> {
        self.shared.engine.borrow()
    }

    fn apply_units(&self, updates: &RenderEffects) {
        let revert_ms = self.shared.engine.borrow().config().emphasis_revert_ms;
        for update in updates {
            isolate(
                update.surface.element_id(),
                self.shared
                    .sink
                    .borrow_mut()
                    .set_text(update.surface, &update.text),
            );
            if update.emphasize {
                self.emphasize(update.surface, revert_ms);
            }
        }
    }

    fn emphasize(&self, surface: Surface, revert_ms: u32) {
        let flagged = self.shared.sink.borrow_mut().set_emphasis(surface, true);
        if flagged.is_err() {
            isolate(surface.element_id(), flagged);
            return;
        }
        let sink = Rc::clone(&self.shared.sink);
        self.shared.scheduler.schedule(
            revert_ms,
            Box::new(move || {
                isolate(
                    surface.element_id(),
                    sink.borrow_mut().set_emphasis(surface, false),
                );
            }),
        );
    }

    fn write_progress(&self, width: &str) {
        isolate(
            Surface::Progress.element_id(),
            self.shared.sink.borrow_mut().set_progress(width),
        );
    }

    fn write_message(&self, message: StatusMessage) {
        isolate(
            Surface::Message.element_id(),
            self.shared
                .sink
                .borrow_mut()
                .set_text(Surface::Message, message.text()),
        );
    }

    fn apply_completed(&self) {
        let zero = format_unit(0);
        for surface in Surface::UNITS {
            isolate(
                surface.element_id(),
                self.shared.sink.borrow_mut().set_text(surface, &zero),
            );
        }
        self.write_message(StatusMessage::Completed);
        self.write_progress(COMPLETE_WIDTH);
    }

    fn launch(&self, plan: CelebrationPlan) {
        let lifetime_ms = plan.lifetime_ms;
        for scheduled in plan.particles {
            let countdown = self.clone();
            self.shared.scheduler.schedule(
                scheduled.spawn_delay_ms,
                Box::new(move || countdown.spawn(&scheduled.particle, lifetime_ms)),
            );
        }
    }

    fn spawn(&self, particle: &crate::celebration::Particle, lifetime_ms: u32) {
        let spawned = self.shared.sink.borrow_mut().spawn_particle(particle);
        match spawned {
            Ok(id) => {
                let sink = Rc::clone(&self.shared.sink);
                self.shared.scheduler.schedule(
                    lifetime_ms,
                    Box::new(move || {
                        isolate("particle", sink.borrow_mut().remove_particle(id));
                    }),
                );
            }
            Err(err) => log::debug!("skipping particle {}: {err}", particle.index),
        }
    }
}
