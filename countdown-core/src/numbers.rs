//! Numeric conversion helpers centralizing lossy casts.

use num_traits::cast::cast;

use crate::constants::{PROGRESS_MAX, PROGRESS_MIN};

/// Convert i64 to f64 while allowing precision loss in a single location.
#[must_use]
pub fn i64_to_f64(value: i64) -> f64 {
    cast::<i64, f64>(value).unwrap_or(0.0)
}

/// Clamp a percentage into `[0, 100]`, mapping NaN to 0.
#[must_use]
pub fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        return PROGRESS_MIN;
    }
    value.clamp(PROGRESS_MIN, PROGRESS_MAX)
}

/// Narrow a value already bounded by its unit modulus.
#[must_use]
pub fn bounded_u8(value: i64) -> u8 {
    cast::<i64, u8>(value).unwrap_or(0)
}

/// Widen a non-negative i64 to u64, returning 0 for negatives.
#[must_use]
pub fn non_negative_u64(value: i64) -> u64 {
    cast::<i64, u64>(value).unwrap_or(0)
}
