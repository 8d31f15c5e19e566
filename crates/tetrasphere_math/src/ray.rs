//! Rays and ray/triangle intersection for pointer picking

use crate::Vec3;

/// Determinants smaller than this mean the ray is parallel to the triangle
const PARALLEL_EPSILON: f32 = 1e-7;

/// A half-line starting at `origin` heading along unit `direction`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray; `direction` is normalized
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalized(),
        }
    }

    /// Point at distance `t` along the ray
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Distance to the intersection with triangle `(a, b, c)`, either side
    ///
    /// Möller–Trumbore. Returns `None` for misses, parallel rays, and hits
    /// behind the origin.
    pub fn intersect_triangle(&self, a: Vec3, b: Vec3, c: Vec3) -> Option<f32> {
        let edge1 = b - a;
        let edge2 = c - a;
        let p = self.direction.cross(edge2);
        let det = edge1.dot(p);

        if det.abs() < PARALLEL_EPSILON {
            return None;
        }
        let inv_det = 1.0 / det;

        let s = self.origin - a;
        let u = s.dot(p) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = self.direction.dot(q) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = edge2.dot(q) * inv_det;
        (t > PARALLEL_EPSILON).then_some(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> (Vec3, Vec3, Vec3) {
        (
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        )
    }

    #[test]
    fn test_hit_front() {
        let (a, b, c) = triangle();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), -Vec3::Z);
        let t = ray.intersect_triangle(a, b, c).expect("should hit");
        assert!((t - 5.0).abs() < 1e-5);
        assert!((ray.at(t) - Vec3::ZERO).length() < 1e-5);
    }

    #[test]
    fn test_hit_back_side() {
        let (a, b, c) = triangle();
        let ray = Ray::new(Vec3::new(0.0, 0.0, -2.0), Vec3::Z);
        assert!(ray.intersect_triangle(a, b, c).is_some());
    }

    #[test]
    fn test_miss_outside() {
        let (a, b, c) = triangle();
        let ray = Ray::new(Vec3::new(3.0, 0.0, 5.0), -Vec3::Z);
        assert_eq!(ray.intersect_triangle(a, b, c), None);
    }

    #[test]
    fn test_miss_behind_origin() {
        let (a, b, c) = triangle();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);
        assert_eq!(ray.intersect_triangle(a, b, c), None);
    }

    #[test]
    fn test_parallel_ray() {
        let (a, b, c) = triangle();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 1.0), Vec3::X);
        assert_eq!(ray.intersect_triangle(a, b, c), None);
    }

    #[test]
    fn test_direction_normalized() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -4.0));
        assert_eq!(ray.direction, -Vec3::Z);
    }
}
