//! Timed transitions between two values
//!
//! A [`Tween`] owns its own clock: callers feed it frame deltas with
//! [`Tween::advance`] and read the eased value back with [`Tween::value`].

use tetrasphere_math::Quat;
use crate::Easing;

/// Values a tween can blend between
pub trait Interpolate: Copy {
    /// Blend from `self` (at `t = 0`) to `other` (at `t = 1`)
    fn interpolate(&self, other: &Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    #[inline]
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Interpolate for Quat {
    #[inline]
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        self.slerp(other, t)
    }
}

/// A transition from `start` to `end` over `total` seconds
///
/// Invariant: `0 <= elapsed <= total`. Once `elapsed == total` the tween is
/// complete and [`Tween::value`] returns `end` exactly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween<T: Interpolate> {
    start: T,
    end: T,
    elapsed: f32,
    total: f32,
    easing: Easing,
}

impl<T: Interpolate> Tween<T> {
    /// Create a tween lasting `total` seconds
    ///
    /// A non-positive or non-finite `total` makes an instantaneous tween that
    /// is already complete.
    pub fn new(start: T, end: T, total: f32, easing: Easing) -> Self {
        let total = if total.is_finite() && total > 0.0 { total } else { 0.0 };
        Self {
            start,
            end,
            elapsed: 0.0,
            total,
            easing,
        }
    }

    /// Advance the clock by `dt` seconds, stopping at the end
    ///
    /// Negative and non-finite deltas are ignored. Returns the time left over
    /// after the tween completed (0 while it is still running).
    pub fn advance(&mut self, dt: f32) -> f32 {
        if !dt.is_finite() || dt <= 0.0 {
            return 0.0;
        }
        let remaining = self.total - self.elapsed;
        if dt >= remaining {
            self.elapsed = self.total;
            dt - remaining
        } else {
            self.elapsed += dt;
            0.0
        }
    }

    /// Linear progress in `[0, 1]`
    pub fn progress(&self) -> f32 {
        if self.total > 0.0 {
            (self.elapsed / self.total).min(1.0)
        } else {
            1.0
        }
    }

    /// Eased value at the current time
    pub fn value(&self) -> T {
        if self.is_complete() {
            return self.end;
        }
        let eased = self.easing.apply(self.progress());
        self.start.interpolate(&self.end, eased)
    }

    /// Whether the tween has reached its end
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.total
    }

    /// Value at the start
    #[inline]
    pub fn start(&self) -> T {
        self.start
    }

    /// Value at the end
    #[inline]
    pub fn end(&self) -> T {
        self.end
    }

    /// Seconds elapsed
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Total duration in seconds
    #[inline]
    pub fn total(&self) -> f32 {
        self.total
    }

    /// Easing function in use
    #[inline]
    pub fn easing(&self) -> Easing {
        self.easing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tetrasphere_math::Vec3;

    #[test]
    fn test_scalar_tween_linear() {
        let mut tween = Tween::new(0.0f32, 10.0, 2.0, Easing::Linear);
        assert_eq!(tween.value(), 0.0);
        tween.advance(0.5);
        assert!((tween.value() - 2.5).abs() < 1e-6);
        assert!(!tween.is_complete());
    }

    #[test]
    fn test_elapsed_never_exceeds_total() {
        let mut tween = Tween::new(0.0f32, 1.0, 1.0, Easing::Linear);
        let leftover = tween.advance(1.75);
        assert_eq!(tween.elapsed(), tween.total());
        assert!((leftover - 0.75).abs() < 1e-6);
        assert!(tween.is_complete());
    }

    #[test]
    fn test_complete_value_is_exact_end() {
        let start = Quat::IDENTITY;
        let end = Quat::from_unit_vectors(Vec3::Y, Vec3::new(0.3, -0.2, 0.9).normalized());
        let mut tween = Tween::new(start, end, 0.4, Easing::spring());
        tween.advance(0.1);
        tween.advance(0.3);
        assert!(tween.is_complete());
        assert_eq!(tween.value(), end);
    }

    #[test]
    fn test_eased_progress() {
        let mut tween = Tween::new(0.4f32, 1.0, 1.0, Easing::EaseOutCubic);
        tween.advance(0.5);
        // 0.4 + 0.6 * 0.875
        assert!((tween.value() - 0.925).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_deltas_ignored() {
        let mut tween = Tween::new(0.0f32, 1.0, 1.0, Easing::Linear);
        tween.advance(-1.0);
        tween.advance(f32::NAN);
        tween.advance(f32::INFINITY);
        assert_eq!(tween.elapsed(), 0.0);
    }

    #[test]
    fn test_zero_duration_is_complete() {
        let tween = Tween::new(1.0f32, 2.0, 0.0, Easing::Linear);
        assert!(tween.is_complete());
        assert_eq!(tween.value(), 2.0);
        assert_eq!(tween.progress(), 1.0);

        let tween = Tween::new(1.0f32, 2.0, -3.0, Easing::Linear);
        assert!(tween.is_complete());
    }

    #[test]
    fn test_quat_tween_starts_at_start() {
        let start = Quat::from_unit_vectors(Vec3::Y, Vec3::X);
        let end = Quat::from_unit_vectors(Vec3::Y, Vec3::Z);
        let tween = Tween::new(start, end, 1.0, Easing::Linear);
        assert!(tween.value().angle_to(&start) < 1e-3);
    }
}
