//! Unit sphere sampling and surface patches

use std::f32::consts::TAU;
use rand::Rng;
use crate::Vec3;

/// Draw a direction uniformly distributed over the unit sphere
///
/// Inverse-CDF method: the height `z` is uniform in `[-1, 1]` (Archimedes'
/// hat-box theorem) and the azimuth is uniform in `[0, 2π)`. Sampling each
/// axis uniformly and normalizing would crowd points towards the cube corners.
pub fn random_on_sphere<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let u: f32 = rng.gen();
    let v: f32 = rng.gen();

    let phi = u * TAU;
    let z = v * 2.0 - 1.0;
    let r = (1.0 - z * z).max(0.0).sqrt();

    Vec3::new(r * phi.cos(), r * phi.sin(), z).normalized()
}

/// Triangle list for a square patch of the unit sphere centred on the north pole `(0, 1, 0)`
///
/// The patch spans `arc` radians along both X and Z and is divided into
/// `segments × segments` cells, two triangles each, wound counter-clockwise
/// when seen from outside the sphere.
pub fn sphere_patch(arc: f32, segments: u32) -> Vec<Vec3> {
    let segments = segments.max(1);
    let half = arc * 0.5;

    let point = |i: u32, j: u32| {
        let a = -half + arc * (i as f32 / segments as f32);
        let b = -half + arc * (j as f32 / segments as f32);
        Vec3::new(a.tan(), 1.0, b.tan()).normalized()
    };

    let mut triangles = Vec::with_capacity((segments * segments * 6) as usize);
    for i in 0..segments {
        for j in 0..segments {
            let p00 = point(i, j);
            let p10 = point(i + 1, j);
            let p01 = point(i, j + 1);
            let p11 = point(i + 1, j + 1);

            triangles.extend_from_slice(&[p00, p01, p10]);
            triangles.extend_from_slice(&[p10, p01, p11]);
        }
    }
    triangles
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_samples_are_unit_length() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let v = random_on_sphere(&mut rng);
            assert!((v.length() - 1.0).abs() < 1e-6, "length {}", v.length());
        }
    }

    #[test]
    fn test_sampling_is_deterministic() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            assert_eq!(random_on_sphere(&mut a), random_on_sphere(&mut b));
        }
    }

    #[test]
    fn test_patch_triangle_count() {
        let patch = sphere_patch(10f32.to_radians(), 10);
        assert_eq!(patch.len(), 10 * 10 * 6);
    }

    #[test]
    fn test_patch_lies_on_sphere_near_pole() {
        let arc = 10f32.to_radians();
        for p in sphere_patch(arc, 4) {
            assert!((p.length() - 1.0).abs() < 1e-5);
            // Corners are the farthest points: angle <= half-arc on each axis
            assert!(p.y > (arc).cos(), "point {:?} too far from the pole", p);
        }
    }

    #[test]
    fn test_patch_faces_outwards() {
        let patch = sphere_patch(0.5, 2);
        for tri in patch.chunks(3) {
            let normal = (tri[1] - tri[0]).cross(tri[2] - tri[0]);
            let centroid = (tri[0] + tri[1] + tri[2]) / 3.0;
            assert!(normal.dot(centroid) > 0.0, "triangle wound inwards");
        }
    }
}
