//! The quality schedule walked by the compressor.
//!
//! Attempt `k` (zero-based) encodes at `initial - k * QUALITY_STEP`. The
//! schedule ends at the first quality at or below [`QUALITY_FLOOR`], so it
//! always has at least one entry and at most
//! `ceil((initial - QUALITY_FLOOR) / QUALITY_STEP) + 1`.

/// Lowest quality the search will try before settling.
pub const QUALITY_FLOOR: f32 = 0.1;
/// Amount quality drops between attempts.
pub const QUALITY_STEP: f32 = 0.1;

// Absorbs f32 drift in `initial - k * step`, far below one JPEG quality unit.
const FLOOR_TOLERANCE: f32 = 1e-4;

/// Quality of the zero-based attempt `attempt`.
///
/// Computed from the start value rather than by repeated subtraction so
/// rounding error does not accumulate.
#[inline]
pub fn quality_at(initial: f32, attempt: u32) -> f32 {
    initial - attempt as f32 * QUALITY_STEP
}

/// Whether `quality` is at (or below) the floor, so no further attempt follows.
///
/// NaN counts as floor.
#[inline]
pub fn is_floor(quality: f32) -> bool {
    !(quality > QUALITY_FLOOR + FLOOR_TOLERANCE)
}

/// Number of encode attempts the search performs if no attempt fits.
pub fn max_attempts(initial: f32) -> u32 {
    let mut attempt = 0;
    while !is_floor(quality_at(initial, attempt)) {
        attempt += 1;
    }
    attempt + 1
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: attempts never exceed ceil((q0 - 0.1) / 0.1) + 1.
        #[test]
        fn prop_attempts_within_bound(initial in 0.0001f32..=1.0) {
            let bound = ((initial as f64 - 0.1) / 0.1).ceil().max(0.0) as u32 + 1;
            let attempts = max_attempts(initial);
            prop_assert!(attempts >= 1);
            prop_assert!(attempts <= bound, "q0={} attempts={} bound={}", initial, attempts, bound);
        }

        /// Property: every quality before the last is above the floor, the last is at it.
        #[test]
        fn prop_schedule_ends_exactly_at_floor(initial in 0.0001f32..=1.0) {
            let attempts = max_attempts(initial);
            for k in 0..attempts - 1 {
                prop_assert!(!is_floor(quality_at(initial, k)));
            }
            prop_assert!(is_floor(quality_at(initial, attempts - 1)));
        }

        /// Property: the schedule is strictly decreasing.
        #[test]
        fn prop_schedule_decreasing(initial in 0.0001f32..=1.0) {
            let attempts = max_attempts(initial);
            for k in 1..attempts {
                prop_assert!(quality_at(initial, k) < quality_at(initial, k - 1));
            }
        }
    }
}
