#![forbid(unsafe_code)]

//! Easing curves and time-fraction helpers.
//!
//! Animations in glyphfield are driven by absolute timestamps supplied by the
//! host rather than accumulated deltas: a settling cell remembers when it
//! started and recomputes its progress from `now` on every frame. That keeps
//! the fade exact even when frames are dropped.
//!
//! ```
//! use std::time::Duration;
//! use glyphfield_core::animation::{Easing, progress};
//!
//! let t = progress(Duration::from_millis(300), Duration::from_millis(600));
//! assert!((t - 0.5).abs() < f32::EPSILON);
//! assert!((Easing::EaseOutCubic.apply(t) - 0.875).abs() < 1e-6);
//! ```

use std::time::Duration;

// ---------------------------------------------------------------------------
// Easing functions
// ---------------------------------------------------------------------------

/// Easing function signature: maps `t` in [0, 1] to output in [0, 1].
pub type EasingFn = fn(f32) -> f32;

/// Identity easing (constant velocity).
#[inline]
pub fn linear(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

/// Quadratic ease-out (slow end).
#[inline]
pub fn ease_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Quadratic ease-in-out (slow start and end).
#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Cubic ease-out: `1 - (1 - t)^3`.
#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Named easing curve.
///
/// Configuration carries this enum instead of a bare [`EasingFn`] so it can
/// be compared, printed, and deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Easing {
    /// [`linear`].
    Linear,
    /// [`ease_out`].
    EaseOut,
    /// [`ease_in_out`].
    EaseInOut,
    /// [`ease_out_cubic`].
    #[default]
    EaseOutCubic,
}

impl Easing {
    /// The underlying easing function.
    #[must_use]
    pub const fn function(self) -> EasingFn {
        match self {
            Self::Linear => linear,
            Self::EaseOut => ease_out,
            Self::EaseInOut => ease_in_out,
            Self::EaseOutCubic => ease_out_cubic,
        }
    }

    /// Apply the curve to `t` (clamped to [0, 1]).
    #[inline]
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        (self.function())(t)
    }
}

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

/// Fraction of `duration` covered by `elapsed`, clamped to [0.0, 1.0].
///
/// A zero `duration` counts as already complete.
#[inline]
#[must_use]
pub fn progress(elapsed: Duration, duration: Duration) -> f32 {
    if duration.is_zero() {
        return 1.0;
    }
    let t = elapsed.as_secs_f64() / duration.as_secs_f64();
    (t as f32).clamp(0.0, 1.0)
}

/// Time elapsed between `start` and `now`, or zero if `now` precedes `start`.
///
/// Host clocks are monotonic, but a host that restarts its clock (a page that
/// was backgrounded, a replayed trace) must not produce negative progress.
#[inline]
#[must_use]
pub fn elapsed_since(start: Duration, now: Duration) -> Duration {
    now.saturating_sub(start)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const MS_300: Duration = Duration::from_millis(300);
    const MS_600: Duration = Duration::from_millis(600);

    #[test]
    fn linear_clamps() {
        assert_eq!(linear(-1.0), 0.0);
        assert_eq!(linear(2.0), 1.0);
        assert!((linear(0.25) - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn ease_out_cubic_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
    }

    #[test]
    fn ease_out_cubic_midpoint() {
        // 1 - 0.5^3 = 0.875
        assert!((ease_out_cubic(0.5) - 0.875).abs() < 1e-6);
    }

    #[test]
    fn ease_out_cubic_front_loaded() {
        for i in 1..10 {
            let t = i as f32 / 10.0;
            assert!(ease_out_cubic(t) > t, "ease-out should lead linear at t={t}");
        }
    }

    #[test]
    fn ease_in_out_symmetric() {
        let a = ease_in_out(0.25);
        let b = ease_in_out(0.75);
        assert!((a + b - 1.0).abs() < 1e-6);
    }

    #[test]
    fn easing_enum_dispatch() {
        assert!((Easing::Linear.apply(0.5) - 0.5).abs() < f32::EPSILON);
        assert!((Easing::EaseOut.apply(0.5) - 0.75).abs() < 1e-6);
        assert!((Easing::EaseOutCubic.apply(0.5) - 0.875).abs() < 1e-6);
        assert_eq!(Easing::default(), Easing::EaseOutCubic);
    }

    #[test]
    fn progress_midpoint() {
        assert!((progress(MS_300, MS_600) - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn progress_clamps_overshoot() {
        assert_eq!(progress(Duration::from_secs(5), MS_600), 1.0);
    }

    #[test]
    fn progress_zero_duration_is_complete() {
        assert_eq!(progress(Duration::ZERO, Duration::ZERO), 1.0);
    }

    #[test]
    fn progress_exact_end() {
        assert_eq!(progress(MS_600, MS_600), 1.0);
    }

    #[test]
    fn elapsed_since_saturates() {
        assert_eq!(elapsed_since(MS_600, MS_300), Duration::ZERO);
        assert_eq!(elapsed_since(MS_300, MS_600), MS_300);
    }
}
