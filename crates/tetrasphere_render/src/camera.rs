//! Perspective camera looking at the sphere
//!
//! Matrices are column-major `[[f32; 4]; 4]` (each inner array is a column),
//! the layout WGSL's `mat4x4<f32>` expects. Depth maps to wgpu's `[0, 1]`.

use tetrasphere_math::{Ray, Vec3};

/// Camera with a fixed target
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera3D {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera3D {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 1.8),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_y: 75.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Camera3D {
    /// Camera at `position` looking at the origin
    pub fn looking_at_origin(position: Vec3, fov_y: f32, near: f32, far: f32) -> Self {
        Self {
            position,
            fov_y,
            near,
            far,
            ..Self::default()
        }
    }

    /// Orthonormal basis (right, up, forward)
    fn basis(&self) -> (Vec3, Vec3, Vec3) {
        let forward = (self.target - self.position).normalized();
        let right = forward.cross(self.up).normalized();
        let up = right.cross(forward);
        (right, up, forward)
    }

    /// World to view transform
    pub fn view_matrix(&self) -> [[f32; 4]; 4] {
        let (s, u, f) = self.basis();
        let eye = self.position;
        [
            [s.x, u.x, -f.x, 0.0],
            [s.y, u.y, -f.y, 0.0],
            [s.z, u.z, -f.z, 0.0],
            [-s.dot(eye), -u.dot(eye), f.dot(eye), 1.0],
        ]
    }

    /// View to clip transform for the given aspect ratio
    pub fn projection_matrix(&self, aspect: f32) -> [[f32; 4]; 4] {
        perspective_matrix(self.fov_y.to_radians(), aspect, self.near, self.far)
    }

    /// Ray from the eye through a point in normalized device coordinates
    ///
    /// `ndc_x` and `ndc_y` are in `[-1, 1]` with +y up.
    pub fn screen_ray(&self, ndc_x: f32, ndc_y: f32, aspect: f32) -> Ray {
        let (right, up, forward) = self.basis();
        let half_height = (self.fov_y.to_radians() * 0.5).tan();
        let half_width = half_height * aspect;
        let direction = forward + right * (ndc_x * half_width) + up * (ndc_y * half_height);
        Ray::new(self.position, direction)
    }
}

/// Right-handed perspective projection with depth in `[0, 1]`
pub fn perspective_matrix(fov_y: f32, aspect: f32, near: f32, far: f32) -> [[f32; 4]; 4] {
    let f = 1.0 / (fov_y / 2.0).tan();
    let nf = 1.0 / (near - far);

    [
        [f / aspect, 0.0, 0.0, 0.0],
        [0.0, f, 0.0, 0.0],
        [0.0, 0.0, far * nf, -1.0],
        [0.0, 0.0, near * far * nf, 0.0],
    ]
}

/// Multiply a column-major matrix with a point
pub fn transform_point(m: &[[f32; 4]; 4], p: [f32; 4]) -> [f32; 4] {
    let mut out = [0.0f32; 4];
    for (col, value) in m.iter().zip(p) {
        for row in 0..4 {
            out[row] += col[row] * value;
        }
    }
    out
}
