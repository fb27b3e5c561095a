//! The per-tick countdown computation.
//!
//! [`CountdownEngine::tick`] performs no I/O: it turns the current instant
//! into a [`Frame`] describing every write the display needs. The driver in
//! [`crate::driver`] applies frames to a sink.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::celebration::{CelebrationPlan, CelebrationPolicy, plan_celebration};
use crate::config::CountdownConfig;
use crate::message::{StatusMessage, select_message};
use crate::progress::progress_percent;
use crate::render::{RenderCache, RenderEffects};
use crate::units::{Decomposition, TimeUnits, decompose};

const DEFAULT_RNG_SEED: u64 = 0x00C0_FFEE_2025_1114;

/// What one tick wants shown.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    Running {
        remaining_ms: i64,
        units: TimeUnits,
        updates: RenderEffects,
        progress: f64,
        message: StatusMessage,
    },
    Completed {
        /// Burst to launch on this tick, if the policy allows one.
        celebration: Option<CelebrationPlan>,
    },
}

#[derive(Debug, Clone)]
pub struct CountdownEngine {
    config: CountdownConfig,
    cache: RenderCache,
    celebrated: bool,
    rng: ChaCha8Rng,
}

impl CountdownEngine {
    #[must_use]
    pub fn new(config: CountdownConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.rng_seed.unwrap_or(DEFAULT_RNG_SEED));
        Self {
            config,
            cache: RenderCache::new(),
            celebrated: false,
            rng,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &CountdownConfig {
        &self.config
    }

    #[must_use]
    pub const fn has_celebrated(&self) -> bool {
        self.celebrated
    }

    #[must_use]
    pub const fn remaining_ms(&self, now_ms: i64) -> i64 {
        self.config.target_ms.saturating_sub(now_ms)
    }

    /// Compute the frame for `now_ms`.
    pub fn tick(&mut self, now_ms: i64) -> Frame {
        let remaining_ms = self.remaining_ms(now_ms);
        match decompose(remaining_ms) {
            Decomposition::Remaining(units) => {
                let (cache, updates) = std::mem::take(&mut self.cache).render(&units);
                self.cache = cache;
                Frame::Running {
                    remaining_ms,
                    units,
                    updates,
                    progress: progress_percent(remaining_ms, self.config.total_span_ms()),
                    message: select_message(&units),
                }
            }
            Decomposition::Completed => Frame::Completed {
                celebration: self.next_celebration(),
            },
        }
    }

    fn next_celebration(&mut self) -> Option<CelebrationPlan> {
        if self.celebrated && self.config.celebration == CelebrationPolicy::Once {
            return None;
        }
        self.celebrated = true;
        Some(plan_celebration(self.config.burst_shape(), &mut self.rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TARGET: i64 = 10 * 86_400_000;

    fn engine(policy: CelebrationPolicy) -> CountdownEngine {
        CountdownEngine::new(CountdownConfig {
            celebration: policy,
            rng_seed: Some(3),
            ..CountdownConfig::with_instants(0, TARGET)
        })
    }

    #[test]
    fn running_frame_carries_units_progress_and_message() {
        let mut engine = engine(CelebrationPolicy::Once);
        let frame = engine.tick(TARGET / 2);
        let Frame::Running {
            units,
            progress,
            message,
            updates,
            ..
        } = frame
        else {
            panic!("expected running frame");
        };
        assert_eq!(units.days, 5);
        assert!((progress - 50.0).abs() < 1e-9);
        assert_eq!(message, StatusMessage::FinalWeek);
        assert_eq!(updates.len(), 4);
        assert!(updates.iter().all(|u| !u.emphasize));
    }

    #[test]
    fn target_instant_is_still_running_at_full_progress() {
        let mut engine = engine(CelebrationPolicy::Once);
        let Frame::Running {
            units, progress, ..
        } = engine.tick(TARGET)
        else {
            panic!("expected running frame");
        };
        assert_eq!(units, TimeUnits::ZERO);
        assert!((progress - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn celebration_is_latched_once() {
        let mut engine = engine(CelebrationPolicy::Once);
        let first = engine.tick(TARGET + 1);
        assert!(matches!(first, Frame::Completed { celebration: Some(ref p) } if p.len() == 20));
        assert!(engine.has_celebrated());
        for offset in 2..10 {
            assert_eq!(
                engine.tick(TARGET + offset * 1_000),
                Frame::Completed { celebration: None }
            );
        }
    }

    #[test]
    fn every_tick_policy_fires_bounded_bursts() {
        let mut engine = engine(CelebrationPolicy::EveryTick);
        for offset in 1..4 {
            let Frame::Completed {
                celebration: Some(plan),
            } = engine.tick(TARGET + offset)
            else {
                panic!("expected a burst");
            };
            assert_eq!(plan.len(), 20);
        }
    }

    #[test]
    fn second_tick_emphasizes_changed_seconds() {
        let mut engine = engine(CelebrationPolicy::Once);
        let _ = engine.tick(1_000);
        let Frame::Running { updates, .. } = engine.tick(2_000) else {
            panic!("expected running frame");
        };
        let changed: Vec<_> = updates.iter().filter(|u| u.emphasize).collect();
        assert_eq!(changed.len(), 1);
        assert_eq!(changed[0].text, "58");
    }
}
