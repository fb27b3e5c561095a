//! Progress-bar percentage.

use crate::constants::{PROGRESS_MAX, PROGRESS_MIN};
use crate::numbers::{clamp_percent, i64_to_f64};

/// Share of the start→target span already elapsed, in `[0, 100]`.
///
/// A non-positive span cannot be scaled; it reads as full once the target is
/// reached and empty before that.
#[must_use]
pub fn progress_percent(remaining_ms: i64, total_span_ms: i64) -> f64 {
    if total_span_ms <= 0 {
        return if remaining_ms <= 0 {
            PROGRESS_MAX
        } else {
            PROGRESS_MIN
        };
    }
    let elapsed = total_span_ms.saturating_sub(remaining_ms);
    clamp_percent(i64_to_f64(elapsed) / i64_to_f64(total_span_ms) * PROGRESS_MAX)
}

/// CSS width value for a percentage.
#[must_use]
pub fn format_width(percent: f64) -> String {
    format!("{percent}%")
}
