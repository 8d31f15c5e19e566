//! Easing functions for tweens
//!
//! Every easing maps `[0, 1]` onto itself with `f(0) == 0` and `f(1) == 1`
//! exactly, so a tween always starts on its start value and lands on its end
//! value.

use serde::{Serialize, Deserialize};

/// Default spring stiffness
pub const DEFAULT_TENSION: f32 = 170.0;
/// Default spring damping
pub const DEFAULT_FRICTION: f32 = 26.0;
/// Default spring mass
pub const DEFAULT_MASS: f32 = 1.0;

/// How a tween progresses over its duration
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Easing {
    /// Constant speed
    Linear,
    /// Cubic acceleration from rest: `t³`
    EaseInCubic,
    /// Cubic deceleration to rest: `1 - (1 - t)³`
    EaseOutCubic,
    /// Accelerate over the first half, decelerate over the second
    EaseInOutCubic,
    /// Step response of a damped spring, sampled over `settle` seconds
    ///
    /// The response is rescaled so the curve reaches exactly 1 at the end of
    /// the tween; with the default (near critically damped) spring the
    /// rescaling is below 1e-4.
    Spring {
        tension: f32,
        friction: f32,
        mass: f32,
        settle: f32,
    },
}

impl Default for Easing {
    fn default() -> Self {
        Self::spring()
    }
}

impl Easing {
    /// The default spring: tension 170, friction 26, mass 1, settled after one second
    pub const fn spring() -> Self {
        Self::Spring {
            tension: DEFAULT_TENSION,
            friction: DEFAULT_FRICTION,
            mass: DEFAULT_MASS,
            settle: 1.0,
        }
    }

    /// Evaluate the easing at progress `t` (clamped to `[0, 1]`)
    pub fn apply(&self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        match *self {
            Easing::Linear => t,
            Easing::EaseInCubic => t * t * t,
            Easing::EaseOutCubic => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let k = -2.0 * t + 2.0;
                    1.0 - k * k * k / 2.0
                }
            }
            Easing::Spring { tension, friction, mass, settle } => {
                spring_progress(tension, friction, mass, settle, t)
            }
        }
    }
}

/// Normalized spring step response at progress `t`
fn spring_progress(tension: f32, friction: f32, mass: f32, settle: f32, t: f32) -> f32 {
    let k = tension as f64;
    let c = friction as f64;
    let m = mass as f64;
    let span = settle as f64;

    if k <= 0.0 || m <= 0.0 || c < 0.0 || span <= 0.0 {
        return t;
    }

    let full = spring_response(k, c, m, span);
    if !full.is_finite() || full <= 0.0 {
        return t;
    }

    (spring_response(k, c, m, t as f64 * span) / full) as f32
}

/// Displacement at time `tau` of a spring released from 0 towards 1 at rest
fn spring_response(k: f64, c: f64, m: f64, tau: f64) -> f64 {
    let omega = (k / m).sqrt();
    let zeta = c / (2.0 * (k * m).sqrt());

    if (zeta - 1.0).abs() < 1e-6 {
        // Critically damped
        1.0 - (-omega * tau).exp() * (1.0 + omega * tau)
    } else if zeta < 1.0 {
        // Underdamped
        let omega_d = omega * (1.0 - zeta * zeta).sqrt();
        let decay = (-zeta * omega * tau).exp();
        1.0 - decay * ((omega_d * tau).cos() + (zeta * omega / omega_d) * (omega_d * tau).sin())
    } else {
        // Overdamped
        let root = (zeta * zeta - 1.0).sqrt();
        let r1 = -omega * (zeta - root);
        let r2 = -omega * (zeta + root);
        1.0 - (r2 * (r1 * tau).exp() - r1 * (r2 * tau).exp()) / (r2 - r1)
    }
}
