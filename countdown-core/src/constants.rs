//! Centralized timing and presentation constants for the countdown.
//!
//! These values are compile-time defaults. Hosts may override them through
//! [`crate::config::CountdownConfig`], never through the environment.

// Calendar ------------------------------------------------------------------
pub(crate) const MS_PER_SECOND: i64 = 1_000;
pub(crate) const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
pub(crate) const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
pub(crate) const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// The instant the countdown ends.
pub const TARGET_DATE: CalendarDate = CalendarDate::new(2025, 11, 14);
/// The instant progress is measured from.
pub const START_DATE: CalendarDate = CalendarDate::new(2025, 9, 20);

// Timing --------------------------------------------------------------------
pub const TICK_PERIOD_MS: u32 = 1_000;
pub const EMPHASIS_REVERT_MS: u32 = 200;
pub const PULSE_RESTART_MS: u32 = 100;

// Celebration ---------------------------------------------------------------
pub const PARTICLE_COUNT: u32 = 20;
pub const PARTICLE_STAGGER_MS: u32 = 100;
pub const PARTICLE_LIFETIME_MS: u32 = 1_000;
pub const PARTICLE_AREA_PX: u32 = 100;
pub const PARTICLE_PALETTE: [&str; 6] = [
    "#ff6b6b", "#feca57", "#48dbfb", "#ff9ff3", "#54a0ff", "#5f27cd",
];

// Presentation --------------------------------------------------------------
pub(crate) const UNIT_MIN_WIDTH: usize = 2;
pub const PROGRESS_MIN: f64 = 0.0;
pub const PROGRESS_MAX: f64 = 100.0;

/// A midnight calendar date, resolved to an instant by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl CalendarDate {
    #[must_use]
    pub const fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    /// Milliseconds since the Unix epoch of this date's midnight in UTC.
    #[must_use]
    pub const fn utc_epoch_ms(self) -> i64 {
        days_from_civil(self.year, self.month, self.day) * MS_PER_DAY
    }
}

/// Days since 1970-01-01 for a proleptic Gregorian date.
const fn days_from_civil(year: i32, month: u32, day: u32) -> i64 {
    let y = if month <= 2 { year as i64 - 1 } else { year as i64 };
    let era = (if y >= 0 { y } else { y - 399 }) / 400;
    let yoe = y - era * 400;
    let m = month as i64;
    let mp = if m > 2 { m - 3 } else { m + 9 };
    let doy = (153 * mp + 2) / 5 + day as i64 - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}
