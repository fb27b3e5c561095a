//! Real-time countdown in the terminal on a tokio local runtime.

use std::time::Duration;

use anyhow::Result;
use colored::Colorize;
use countdown_core::{Clock, Countdown, CountdownConfig, MemorySink, Scheduler, SurfaceSnapshot};
use tokio::task::LocalSet;
use tokio::time::{Instant, interval_at, sleep};

use crate::util;

const UNBOUNDED: Duration = Duration::from_secs(60 * 60 * 24 * 365);

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        util::now_ms()
    }
}

/// Scheduler backed by `spawn_local`; must be used inside a [`LocalSet`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioScheduler;

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        tokio::task::spawn_local(async move {
            sleep(Duration::from_millis(u64::from(delay_ms))).await;
            task();
        });
    }

    fn repeat(&self, period_ms: u32, mut task: Box<dyn FnMut()>) {
        let period = Duration::from_millis(u64::from(period_ms.max(1)));
        tokio::task::spawn_local(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            loop {
                ticker.tick().await;
                task();
            }
        });
    }
}

/// Run the countdown against the wall clock, printing one line per tick,
/// until Ctrl-C or until `duration` elapses.
pub async fn run_live(config: CountdownConfig, duration: Option<Duration>) -> Result<()> {
    let period = Duration::from_millis(u64::from(config.tick_period_ms.max(1)));
    LocalSet::new()
        .run_until(async move {
            let countdown = Countdown::new(config, MemorySink::new(), SystemClock, TokioScheduler);
            countdown.start();
            let deadline = sleep(duration.unwrap_or(UNBOUNDED));
            let interrupted = tokio::signal::ctrl_c();
            tokio::pin!(deadline, interrupted);
            let mut printer = interval_at(Instant::now(), period);
            loop {
                tokio::select! {
                    _ = printer.tick() => println!("{}", render_line(&countdown.sink().snapshot())),
                    _ = &mut deadline => break,
                    signal = &mut interrupted => {
                        signal?;
                        break;
                    }
                }
            }
            println!("{}", "⏹  Stopped".dimmed());
            Ok::<(), anyhow::Error>(())
        })
        .await
}

/// One terminal line for a snapshot, e.g. `54d 23:59:58  [ 0.0%]  message`.
pub fn render_line(snapshot: &SurfaceSnapshot) -> String {
    let unit = |value: &Option<String>| value.clone().unwrap_or_else(|| "--".to_string());
    let clock = format!(
        "{}d {}:{}:{}",
        unit(&snapshot.days),
        unit(&snapshot.hours),
        unit(&snapshot.minutes),
        unit(&snapshot.seconds)
    );
    let progress = snapshot.progress.clone().unwrap_or_default();
    let particles = if snapshot.live_particles > 0 {
        format!("  {}", "✨".repeat(snapshot.live_particles.min(20)))
    } else {
        String::new()
    };
    format!(
        "{}  [{:>8}]  {}{}",
        clock.bright_white().bold(),
        progress.cyan(),
        snapshot.message.clone().unwrap_or_default().yellow(),
        particles
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_shows_units_progress_and_message() {
        colored::control::set_override(false);
        let snapshot = SurfaceSnapshot {
            days: Some("02".into()),
            hours: Some("03".into()),
            minutes: Some("04".into()),
            seconds: Some("05".into()),
            progress: Some("50%".into()),
            message: Some("Final week countdown! 📆".into()),
            emphasized: Vec::new(),
            live_particles: 0,
        };
        let line = render_line(&snapshot);
        assert!(line.contains("02d 03:04:05"));
        assert!(line.contains("50%"));
        assert!(line.contains("Final week"));
    }

    #[test]
    fn missing_surfaces_render_placeholders() {
        colored::control::set_override(false);
        let line = render_line(&SurfaceSnapshot::default());
        assert!(line.starts_with("--d --:--:--"));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn tokio_scheduler_runs_tasks_inside_local_set() {
        use std::cell::Cell;
        use std::rc::Rc;

        let hits = Rc::new(Cell::new(0));
        let local = LocalSet::new();
        let counter = Rc::clone(&hits);
        local
            .run_until(async move {
                TokioScheduler.schedule(5, Box::new(move || counter.set(counter.get() + 1)));
                sleep(Duration::from_millis(50)).await;
            })
            .await;
        assert_eq!(hits.get(), 1);
    }
}
