//! Unit quaternions for 3D rotations
//!
//! Components are stored as `(x, y, z, w)` with `w` the scalar part, the same
//! layout the shaders read them in.

use bytemuck::{Pod, Zeroable};
use serde::{Serialize, Deserialize};
use crate::Vec3;

/// Quaternions closer than this (by |dot|) are blended linearly instead of slerped
const SLERP_LINEAR_THRESHOLD: f32 = 0.9995;

/// Quaternion representing a rotation in 3D space
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    /// Identity rotation
    pub const IDENTITY: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };

    /// Create a quaternion from raw components
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Rotation of `angle` radians around a unit `axis`
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let half = angle * 0.5;
        let s = half.sin();
        Self::new(axis.x * s, axis.y * s, axis.z * s, half.cos())
    }

    /// Shortest-arc rotation taking unit vector `from` onto unit vector `to`
    ///
    /// Opposite vectors have no unique shortest arc; a half turn around an
    /// axis perpendicular to `from` is returned.
    pub fn from_unit_vectors(from: Vec3, to: Vec3) -> Self {
        let r = from.dot(to) + 1.0;

        if r < f32::EPSILON {
            let axis = from.any_orthogonal();
            return Self::new(axis.x, axis.y, axis.z, 0.0);
        }

        let c = from.cross(to);
        Self::new(c.x, c.y, c.z, r).normalize()
    }

    /// Squared magnitude
    #[inline]
    pub fn magnitude_squared(&self) -> f32 {
        self.dot(self)
    }

    /// Magnitude
    #[inline]
    pub fn magnitude(&self) -> f32 {
        self.magnitude_squared().sqrt()
    }

    /// 4D dot product of the components
    #[inline]
    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Normalize to unit magnitude (identity for a zero quaternion)
    pub fn normalize(&self) -> Self {
        let mag = self.magnitude();
        if mag > 0.0 {
            let inv_mag = 1.0 / mag;
            Self::new(self.x * inv_mag, self.y * inv_mag, self.z * inv_mag, self.w * inv_mag)
        } else {
            Self::IDENTITY
        }
    }

    /// Conjugate; the inverse rotation for unit quaternions
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Compose two rotations: result = self * other
    /// The composed rotation applies `other` first, then `self`
    pub fn compose(&self, other: &Self) -> Self {
        let a = self;
        let b = other;
        Self::new(
            a.w * b.x + a.x * b.w + a.y * b.z - a.z * b.y,
            a.w * b.y - a.x * b.z + a.y * b.w + a.z * b.x,
            a.w * b.z + a.x * b.y - a.y * b.x + a.z * b.w,
            a.w * b.w - a.x * b.x - a.y * b.y - a.z * b.z,
        )
    }

    /// Rotate a vector: v' = q v q*
    pub fn rotate(&self, v: Vec3) -> Vec3 {
        let q = Vec3::new(self.x, self.y, self.z);
        let t = q.cross(v) * 2.0;
        v + t * self.w + q.cross(t)
    }

    /// Spherical linear interpolation along the shortest arc
    ///
    /// `t = 0` gives `self`; `t = 1` gives `other` (or its negation, which is
    /// the same rotation). Identical inputs are returned unchanged for every `t`.
    pub fn slerp(&self, other: &Self, t: f32) -> Self {
        if self == other {
            return *self;
        }

        let mut b = *other;
        let mut cos_theta = self.dot(&b);

        // Negate to stay on the short arc
        if cos_theta < 0.0 {
            b = Self::new(-b.x, -b.y, -b.z, -b.w);
            cos_theta = -cos_theta;
        }

        if cos_theta > SLERP_LINEAR_THRESHOLD {
            return Self::new(
                self.x + (b.x - self.x) * t,
                self.y + (b.y - self.y) * t,
                self.z + (b.z - self.z) * t,
                self.w + (b.w - self.w) * t,
            )
            .normalize();
        }

        let theta = cos_theta.clamp(-1.0, 1.0).acos();
        let sin_theta = theta.sin();
        let s0 = ((1.0 - t) * theta).sin() / sin_theta;
        let s1 = (t * theta).sin() / sin_theta;

        Self::new(
            s0 * self.x + s1 * b.x,
            s0 * self.y + s1 * b.y,
            s0 * self.z + s1 * b.z,
            s0 * self.w + s1 * b.w,
        )
        .normalize()
    }

    /// Rotation angle (radians, in `[0, π]`) between two unit quaternions
    pub fn angle_to(&self, other: &Self) -> f32 {
        2.0 * self.dot(other).abs().clamp(0.0, 1.0).acos()
    }

    /// Components as `[x, y, z, w]`
    #[inline]
    pub fn to_array(&self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }
}

impl std::ops::Mul for Quat {
    type Output = Self;
    #[inline]
    fn mul(self, other: Self) -> Self {
        self.compose(&other)
    }
}
