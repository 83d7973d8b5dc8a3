//! Frame-time normalization.
//!
//! One unit of delta is one nominal 60fps frame. Stalls (a suspended tab, a
//! debugger break) must not teleport obstacles, and garbage input must not
//! poison the simulation, so deltas are clamped and sanitized here before any
//! engine sees them.

use crate::types::{MAX_FRAME_DELTA, NOMINAL_FRAME_MS};

/// Clamp a delta already expressed in nominal-frame units.
///
/// NaN, infinities and negative values become a neutral step of 1; anything
/// larger than [`MAX_FRAME_DELTA`] is capped.
pub fn clamp_delta(raw: f64) -> f64 {
    if !raw.is_finite() || raw < 0.0 {
        return 1.0;
    }
    raw.min(MAX_FRAME_DELTA)
}

/// Convert wall-clock milliseconds between frames into a clamped delta.
pub fn normalize_frame_delta(frame_ms: f64) -> f64 {
    clamp_delta(frame_ms / NOMINAL_FRAME_MS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stall_is_clamped() {
        assert_eq!(clamp_delta(500.0), 3.0);
        assert_eq!(normalize_frame_delta(500.0), 3.0);
        assert_eq!(normalize_frame_delta(60_000.0), 3.0);
    }

    #[test]
    fn garbage_is_a_unit_step() {
        assert_eq!(clamp_delta(-2.0), 1.0);
        assert_eq!(clamp_delta(f64::NAN), 1.0);
        assert_eq!(clamp_delta(f64::INFINITY), 1.0);
        assert_eq!(normalize_frame_delta(-16.0), 1.0);
        assert_eq!(normalize_frame_delta(f64::NAN), 1.0);
    }

    #[test]
    fn nominal_frame_is_one() {
        assert!((normalize_frame_delta(NOMINAL_FRAME_MS) - 1.0).abs() < 1e-12);
        assert!((normalize_frame_delta(NOMINAL_FRAME_MS * 2.0) - 2.0).abs() < 1e-12);
        assert_eq!(normalize_frame_delta(0.0), 0.0);
    }
}
