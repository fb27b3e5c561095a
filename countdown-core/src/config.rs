//! Countdown configuration with validated defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::celebration::{BurstShape, CelebrationPolicy};
use crate::constants;

/// Errors raised when configuration invariants are violated.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{field} must be greater than zero")]
    ZeroPeriod { field: &'static str },
    #[error("target {target_ms} must come after start {start_ms}")]
    SpanNotPositive { start_ms: i64, target_ms: i64 },
    #[error("particle palette must contain at least one colour")]
    EmptyPalette,
    #[error("particle area must be at least one pixel wide")]
    ParticleAreaZero,
    #[error("invalid countdown config: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownConfig {
    #[serde(default = "CountdownConfig::default_start_ms")]
    pub start_ms: i64,
    #[serde(default = "CountdownConfig::default_target_ms")]
    pub target_ms: i64,
    #[serde(default = "CountdownConfig::default_tick_period_ms")]
    pub tick_period_ms: u32,
    #[serde(default = "CountdownConfig::default_emphasis_revert_ms")]
    pub emphasis_revert_ms: u32,
    #[serde(default = "CountdownConfig::default_particle_count")]
    pub particle_count: u32,
    #[serde(default = "CountdownConfig::default_particle_stagger_ms")]
    pub particle_stagger_ms: u32,
    #[serde(default = "CountdownConfig::default_particle_lifetime_ms")]
    pub particle_lifetime_ms: u32,
    #[serde(default = "CountdownConfig::default_particle_area_px")]
    pub particle_area_px: u32,
    #[serde(default = "CountdownConfig::default_palette")]
    pub palette: Vec<String>,
    #[serde(default)]
    pub celebration: CelebrationPolicy,
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

impl CountdownConfig {
    const fn default_start_ms() -> i64 {
        constants::START_DATE.utc_epoch_ms()
    }

    const fn default_target_ms() -> i64 {
        constants::TARGET_DATE.utc_epoch_ms()
    }

    const fn default_tick_period_ms() -> u32 {
        constants::TICK_PERIOD_MS
    }

    const fn default_emphasis_revert_ms() -> u32 {
        constants::EMPHASIS_REVERT_MS
    }

    const fn default_particle_count() -> u32 {
        constants::PARTICLE_COUNT
    }

    const fn default_particle_stagger_ms() -> u32 {
        constants::PARTICLE_STAGGER_MS
    }

    const fn default_particle_lifetime_ms() -> u32 {
        constants::PARTICLE_LIFETIME_MS
    }

    const fn default_particle_area_px() -> u32 {
        constants::PARTICLE_AREA_PX
    }

    fn default_palette() -> Vec<String> {
        constants::PARTICLE_PALETTE
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    /// Defaults with the start and target replaced, e.g. by instants the
    /// host resolved in local time.
    #[must_use]
    pub fn with_instants(start_ms: i64, target_ms: i64) -> Self {
        Self {
            start_ms,
            target_ms,
            ..Self::default()
        }
    }

    /// Parse a JSON document; absent fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the result fails validation.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Milliseconds between start and target.
    #[must_use]
    pub const fn total_span_ms(&self) -> i64 {
        self.target_ms.saturating_sub(self.start_ms)
    }

    #[must_use]
    pub fn burst_shape(&self) -> BurstShape<'_> {
        BurstShape {
            count: self.particle_count,
            stagger_ms: self.particle_stagger_ms,
            lifetime_ms: self.particle_lifetime_ms,
            area_px: self.particle_area_px,
            palette: &self.palette,
        }
    }

    /// Check the invariants the engine relies on.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("tick_period_ms", self.tick_period_ms),
            ("emphasis_revert_ms", self.emphasis_revert_ms),
            ("particle_lifetime_ms", self.particle_lifetime_ms),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroPeriod { field });
            }
        }
        if self.total_span_ms() <= 0 {
            return Err(ConfigError::SpanNotPositive {
                start_ms: self.start_ms,
                target_ms: self.target_ms,
            });
        }
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        if self.particle_area_px == 0 {
            return Err(ConfigError::ParticleAreaZero);
        }
        Ok(())
    }
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            start_ms: Self::default_start_ms(),
            target_ms: Self::default_target_ms(),
            tick_period_ms: Self::default_tick_period_ms(),
            emphasis_revert_ms: Self::default_emphasis_revert_ms(),
            particle_count: Self::default_particle_count(),
            particle_stagger_ms: Self::default_particle_stagger_ms(),
            particle_lifetime_ms: Self::default_particle_lifetime_ms(),
            particle_area_px: Self::default_particle_area_px(),
            palette: Self::default_palette(),
            celebration: CelebrationPolicy::default(),
            rng_seed: None,
        }
    }
}
