//! Host capabilities that need no UI: an in-memory sink and virtual time.
//!
//! Used by the tester's simulation mode and throughout the test suites.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::celebration::Particle;
use crate::schedule::{Clock, Scheduler};
use crate::sink::{DisplaySink, ParticleId, SinkError, Surface};

/// Serializable view of every surface at one instant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceSnapshot {
    pub days: Option<String>,
    pub hours: Option<String>,
    pub minutes: Option<String>,
    pub seconds: Option<String>,
    pub progress: Option<String>,
    pub message: Option<String>,
    pub emphasized: Vec<Surface>,
    pub live_particles: usize,
}

/// A [`DisplaySink`] that keeps surface state in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    texts: BTreeMap<Surface, String>,
    progress: Option<String>,
    emphasized: BTreeSet<Surface>,
    emphasis_counts: BTreeMap<Surface, u32>,
    particles: BTreeMap<ParticleId, Particle>,
    spawned_total: u64,
    missing: BTreeSet<Surface>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink whose page lacks the given surfaces.
    #[must_use]
    pub fn without(missing: &[Surface]) -> Self {
        Self {
            missing: missing.iter().copied().collect(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn text(&self, surface: Surface) -> Option<&str> {
        self.texts.get(&surface).map(String::as_str)
    }

    #[must_use]
    pub fn progress(&self) -> Option<&str> {
        self.progress.as_deref()
    }

    #[must_use]
    pub fn is_emphasized(&self, surface: Surface) -> bool {
        self.emphasized.contains(&surface)
    }

    /// How many times emphasis was switched on for `surface`.
    #[must_use]
    pub fn emphasis_count(&self, surface: Surface) -> u32 {
        self.emphasis_counts.get(&surface).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn live_particles(&self) -> usize {
        self.particles.len()
    }

    #[must_use]
    pub const fn spawned_total(&self) -> u64 {
        self.spawned_total
    }

    #[must_use]
    pub fn snapshot(&self) -> SurfaceSnapshot {
        let text = |s| self.text(s).map(ToString::to_string);
        SurfaceSnapshot {
            days: text(Surface::Days),
            hours: text(Surface::Hours),
            minutes: text(Surface::Minutes),
            seconds: text(Surface::Seconds),
            progress: self.progress.clone(),
            message: text(Surface::Message),
            emphasized: self.emphasized.iter().copied().collect(),
            live_particles: self.particles.len(),
        }
    }

    fn present(&self, surface: Surface) -> Result<(), SinkError> {
        if self.missing.contains(&surface) {
            Err(SinkError::MissingSurface(surface))
        } else {
            Ok(())
        }
    }
}

impl DisplaySink for MemorySink {
    fn set_text(&mut self, surface: Surface, text: &str) -> Result<(), SinkError> {
        self.present(surface)?;
        self.texts.insert(surface, text.to_string());
        Ok(())
    }

    fn set_progress(&mut self, width: &str) -> Result<(), SinkError> {
        self.present(Surface::Progress)?;
        self.progress = Some(width.to_string());
        Ok(())
    }

    fn set_emphasis(&mut self, surface: Surface, on: bool) -> Result<(), SinkError> {
        self.present(surface)?;
        if on {
            self.emphasized.insert(surface);
            *self.emphasis_counts.entry(surface).or_default() += 1;
        } else {
            self.emphasized.remove(&surface);
        }
        Ok(())
    }

    fn spawn_particle(&mut self, particle: &Particle) -> Result<ParticleId, SinkError> {
        self.present(Surface::Particles)?;
        let id = ParticleId(self.spawned_total);
        self.spawned_total += 1;
        self.particles.insert(id, particle.clone());
        Ok(id)
    }

    fn remove_particle(&mut self, id: ParticleId) -> Result<(), SinkError> {
        self.particles
            .remove(&id)
            .map(|_| ())
            .ok_or(SinkError::MissingParticle(id))
    }
}

enum Task {
    Once(Box<dyn FnOnce()>),
    Repeat {
        period_ms: u32,
        run: Box<dyn FnMut()>,
    },
}

struct Pending {
    due_ms: i64,
    seq: u64,
    task: Task,
}

/// A manually advanced clock that also acts as the scheduler.
///
/// Tasks run in due order (ties in registration order) while
/// [`VirtualTime::advance_by`] moves the clock forward.
pub struct VirtualTime {
    now_ms: Cell<i64>,
    next_seq: Cell<u64>,
    queue: RefCell<Vec<Pending>>,
}

impl VirtualTime {
    #[must_use]
    pub fn new(now_ms: i64) -> Self {
        Self {
            now_ms: Cell::new(now_ms),
            next_seq: Cell::new(0),
            queue: RefCell::new(Vec::new()),
        }
    }

    /// Tasks registered but not yet run; a repeating task counts once.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Move the clock forward, running every task that falls due on the way.
    pub fn advance_by(&self, ms: u32) {
        let until = self.now_ms.get().saturating_add(i64::from(ms));
        while let Some(pending) = self.pop_due(until) {
            self.now_ms.set(pending.due_ms);
            match pending.task {
                Task::Once(run) => run(),
                Task::Repeat { period_ms, mut run } => {
                    run();
                    self.push(
                        pending.due_ms.saturating_add(i64::from(period_ms)),
                        Task::Repeat { period_ms, run },
                    );
                }
            }
        }
        self.now_ms.set(until);
    }

    fn pop_due(&self, until: i64) -> Option<Pending> {
        let mut queue = self.queue.borrow_mut();
        let index = queue
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due_ms <= until)
            .min_by_key(|(_, p)| (p.due_ms, p.seq))
            .map(|(i, _)| i)?;
        Some(queue.swap_remove(index))
    }

    fn push(&self, due_ms: i64, task: Task) {
        let seq = self.next_seq.get();
        self.next_seq.set(seq + 1);
        self.queue.borrow_mut().push(Pending { due_ms, seq, task });
    }
}

impl Clock for VirtualTime {
    fn now_ms(&self) -> i64 {
        self.now_ms.get()
    }
}

impl Scheduler for VirtualTime {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        self.push(
            self.now_ms.get().saturating_add(i64::from(delay_ms)),
            Task::Once(task),
        );
    }

    fn repeat(&self, period_ms: u32, run: Box<dyn FnMut()>) {
        let period_ms = period_ms.max(1);
        self.push(
            self.now_ms.get().saturating_add(i64::from(period_ms)),
            Task::Repeat { period_ms, run },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn tasks_run_in_due_order() {
        let time = VirtualTime::new(0);
        let log = Rc::new(RefCell::new(Vec::new()));
        for (delay, label) in [(300, "c"), (100, "a"), (200, "b"), (100, "a2")] {
            let log = Rc::clone(&log);
            time.schedule(delay, Box::new(move || log.borrow_mut().push(label)));
        }
        time.advance_by(250);
        assert_eq!(*log.borrow(), ["a", "a2", "b"]);
        assert_eq!(time.now_ms(), 250);
        time.advance_by(50);
        assert_eq!(*log.borrow(), ["a", "a2", "b", "c"]);
        assert_eq!(time.pending(), 0);
    }

    #[test]
    fn repeating_task_fires_each_period() {
        let time = VirtualTime::new(1_000);
        let count = Rc::new(Cell::new(0));
        let counter = Rc::clone(&count);
        time.repeat(100, Box::new(move || counter.set(counter.get() + 1)));
        time.advance_by(550);
        assert_eq!(count.get(), 5);
        assert_eq!(time.pending(), 1);
    }

    #[test]
    fn tasks_may_schedule_more_tasks() {
        let time = Rc::new(VirtualTime::new(0));
        let hits = Rc::new(Cell::new(0));
        let inner_time = Rc::clone(&time);
        let inner_hits = Rc::clone(&hits);
        time.schedule(
            10,
            Box::new(move || {
                let hits = Rc::clone(&inner_hits);
                inner_time.schedule(10, Box::new(move || hits.set(hits.get() + 1)));
            }),
        );
        time.advance_by(20);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn memory_sink_reports_missing_surfaces() {
        let mut sink = MemorySink::without(&[Surface::Message]);
        assert_eq!(
            sink.set_text(Surface::Message, "hi"),
            Err(SinkError::MissingSurface(Surface::Message))
        );
        assert_eq!(sink.set_text(Surface::Days, "01"), Ok(()));
        assert_eq!(
            sink.remove_particle(ParticleId(4)),
            Err(SinkError::MissingParticle(ParticleId(4)))
        );
    }
}
