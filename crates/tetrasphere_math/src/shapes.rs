//! Small helper meshes

use crate::Vec3;

/// Triangle list for an axis-aligned cube centred on the origin
///
/// 6 faces × 2 triangles × 3 vertices = 36 positions, wound counter-clockwise
/// when seen from outside.
pub fn cube_triangles(half_extent: f32) -> Vec<Vec3> {
    let h = half_extent;
    // Each face as (normal axis, tangent u, tangent v) with u × v = normal
    let faces = [
        (Vec3::X, -Vec3::Z, Vec3::Y),
        (-Vec3::X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, -Vec3::Z),
        (-Vec3::Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (-Vec3::Z, -Vec3::X, Vec3::Y),
    ];

    let mut triangles = Vec::with_capacity(36);
    for (n, u, v) in faces {
        let c = n * h;
        let p00 = c - u * h - v * h;
        let p10 = c + u * h - v * h;
        let p11 = c + u * h + v * h;
        let p01 = c - u * h + v * h;
        triangles.extend_from_slice(&[p00, p10, p11, p00, p11, p01]);
    }
    triangles
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_vertex_count() {
        assert_eq!(cube_triangles(0.5).len(), 36);
    }

    #[test]
    fn test_cube_extent() {
        for p in cube_triangles(2.0) {
            assert!(p.x.abs() == 2.0 || p.y.abs() == 2.0 || p.z.abs() == 2.0);
            assert!(p.x.abs() <= 2.0 && p.y.abs() <= 2.0 && p.z.abs() <= 2.0);
        }
    }

    #[test]
    fn test_cube_faces_outwards() {
        for tri in cube_triangles(1.0).chunks(3) {
            let normal = (tri[1] - tri[0]).cross(tri[2] - tri[0]);
            let centroid = (tri[0] + tri[1] + tri[2]) / 3.0;
            assert!(normal.dot(centroid) > 0.0);
        }
    }
}
