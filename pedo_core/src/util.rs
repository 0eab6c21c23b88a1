//! Common time/period helpers for pedo_core.

/// Number of milliseconds in one second.
pub const MILLIS_PER_SEC: u64 = 1_000;

/// Compute the period in milliseconds for a given sampling rate in Hz.
/// - Clamps `hz` to at least 1 to avoid division by zero.
/// - Ensures result is at least 1 millisecond.
#[inline]
pub fn period_ms(hz: u32) -> u64 {
    (MILLIS_PER_SEC / u64::from(hz.max(1))).max(1)
}

/// Interval between steps in milliseconds for a cadence in steps per second.
/// Non-positive or non-finite cadences clamp to one step per second.
#[inline]
pub fn step_interval_ms(cadence_hz: f32) -> u64 {
    if !cadence_hz.is_finite() || cadence_hz <= 0.0 {
        return MILLIS_PER_SEC;
    }
    ((MILLIS_PER_SEC as f32 / cadence_hz).round() as u64).max(1)
}
