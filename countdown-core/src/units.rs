//! Duration decomposition and unit formatting.

use serde::{Deserialize, Serialize};

use crate::constants::{MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE, MS_PER_SECOND, UNIT_MIN_WIDTH};
use crate::numbers::{bounded_u8, non_negative_u64};
use crate::sink::Surface;

/// Whole days, hours, minutes and seconds left on the clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeUnits {
    pub days: u64,
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl TimeUnits {
    pub const ZERO: Self = Self {
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    /// Reassemble the whole seconds these units represent.
    #[must_use]
    pub fn total_seconds(&self) -> u64 {
        self.days * 86_400
            + u64::from(self.hours) * 3_600
            + u64::from(self.minutes) * 60
            + u64::from(self.seconds)
    }

    /// Unit surfaces paired with their values, largest unit first.
    #[must_use]
    pub fn by_surface(&self) -> [(Surface, u64); 4] {
        [
            (Surface::Days, self.days),
            (Surface::Hours, u64::from(self.hours)),
            (Surface::Minutes, u64::from(self.minutes)),
            (Surface::Seconds, u64::from(self.seconds)),
        ]
    }
}

/// Result of splitting a remaining duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decomposition {
    Remaining(TimeUnits),
    Completed,
}

/// Split `remaining_ms` into whole units.
///
/// Negative input means the target has passed and yields
/// [`Decomposition::Completed`]. Zero is still a running countdown.
#[must_use]
pub fn decompose(remaining_ms: i64) -> Decomposition {
    if remaining_ms < 0 {
        return Decomposition::Completed;
    }
    let days = remaining_ms.div_euclid(MS_PER_DAY);
    let hours = remaining_ms.rem_euclid(MS_PER_DAY) / MS_PER_HOUR;
    let minutes = remaining_ms.rem_euclid(MS_PER_HOUR) / MS_PER_MINUTE;
    let seconds = remaining_ms.rem_euclid(MS_PER_MINUTE) / MS_PER_SECOND;
    Decomposition::Remaining(TimeUnits {
        days: non_negative_u64(days),
        hours: bounded_u8(hours),
        minutes: bounded_u8(minutes),
        seconds: bounded_u8(seconds),
    })
}

/// Decimal text padded with leading zeros to at least two digits.
#[must_use]
pub fn format_unit(value: u64) -> String {
    format!("{value:0width$}", width = UNIT_MIN_WIDTH)
}
