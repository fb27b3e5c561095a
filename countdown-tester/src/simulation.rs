//! Headless runs of the countdown on virtual time.

use std::rc::Rc;

use countdown_core::{
    Clock, Countdown, CountdownConfig, MemorySink, Surface, SurfaceSnapshot, VirtualTime,
};
use serde::Serialize;

use crate::util::format_instant;

/// What the display showed after one tick.
#[derive(Debug, Clone, Serialize)]
pub struct TickRecord {
    pub tick: u64,
    pub now_ms: i64,
    pub at: String,
    pub remaining_ms: i64,
    pub surfaces: SurfaceSnapshot,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub start_ms: i64,
    pub target_ms: i64,
    pub tick_period_ms: u32,
    pub records: Vec<TickRecord>,
    pub completed: bool,
    pub particles_spawned: u64,
    pub emphasis_flags: u32,
}

/// Start the countdown at `at_ms` and record the display after the initial
/// render and each of the following `ticks` ticks.
pub fn run_simulation(config: CountdownConfig, at_ms: i64, ticks: u64) -> SimulationReport {
    let time = Rc::new(VirtualTime::new(at_ms));
    let period = config.tick_period_ms;
    let (start_ms, target_ms) = (config.start_ms, config.target_ms);
    let countdown = Countdown::new(config, MemorySink::new(), Rc::clone(&time), Rc::clone(&time));

    countdown.start();
    let mut records = vec![record(&countdown, &time, 0)];
    for tick in 1..=ticks {
        time.advance_by(period);
        records.push(record(&countdown, &time, tick));
    }
    // Let emphasis reverts land without reaching the next tick.
    time.advance_by(period.saturating_sub(1));

    let sink = countdown.sink();
    let emphasis_flags = Surface::UNITS
        .iter()
        .map(|s| sink.emphasis_count(*s))
        .sum();
    let report = SimulationReport {
        start_ms,
        target_ms,
        tick_period_ms: period,
        completed: countdown.engine().remaining_ms(time.now_ms()) < 0,
        particles_spawned: sink.spawned_total(),
        emphasis_flags,
        records,
    };
    log::debug!(
        "simulated {} ticks, {} particles spawned",
        ticks,
        report.particles_spawned
    );
    report
}

fn record(
    countdown: &Countdown<MemorySink, Rc<VirtualTime>, Rc<VirtualTime>>,
    time: &VirtualTime,
    tick: u64,
) -> TickRecord {
    let now_ms = time.now_ms();
    TickRecord {
        tick,
        now_ms,
        at: format_instant(now_ms),
        remaining_ms: countdown.engine().remaining_ms(now_ms),
        surfaces: countdown.sink().snapshot(),
    }
}
