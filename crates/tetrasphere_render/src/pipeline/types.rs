//! GPU-compatible data types
//!
//! These types are designed to match the shader layouts in `scene.wgsl`
//! exactly. All types derive Pod and Zeroable for safe GPU buffer operations.

use bytemuck::{Pod, Zeroable};

/// Maximum number of spot lights the shader loops over
pub const MAX_SPOT_LIGHTS: usize = 4;

const IDENTITY: [[f32; 4]; 4] = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// A mesh vertex: position only, normals come from screen-space derivatives
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
}

/// A cone light aimed at a point
/// Layout: 32 bytes (must match scene.wgsl SpotLight)
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct SpotLight {
    pub position: [f32; 3],
    /// Cosine of the cone half-angle
    pub cos_cutoff: f32,
    /// Unit direction the cone points along
    pub direction: [f32; 3],
    pub intensity: f32,
}

impl SpotLight {
    /// Spot light at `position` aimed at `target` with cone half-angle `angle` (radians)
    pub fn aimed_at(position: [f32; 3], target: [f32; 3], angle: f32, intensity: f32) -> Self {
        let d = [
            target[0] - position[0],
            target[1] - position[1],
            target[2] - position[2],
        ];
        let len = (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt();
        let direction = if len > 0.0 {
            [d[0] / len, d[1] / len, d[2] / len]
        } else {
            [0.0, 0.0, -1.0]
        };
        Self {
            position,
            cos_cutoff: angle.cos(),
            direction,
            intensity,
        }
    }
}

/// Camera and light uniforms shared by every pipeline
/// Layout: 304 bytes total (must match scene.wgsl SceneUniforms)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct SceneUniforms {
    /// View matrix (64 bytes)
    pub view_matrix: [[f32; 4]; 4],
    /// Projection matrix (64 bytes)
    pub projection_matrix: [[f32; 4]; 4],
    /// Eye position + ambient intensity (16 bytes)
    pub camera_position: [f32; 3],
    pub ambient: f32,
    /// Point light position + intensity (16 bytes)
    pub point_light: [f32; 3],
    pub point_intensity: f32,
    /// Number of active entries in `spots` + padding (16 bytes)
    pub spot_count: u32,
    pub _padding: [u32; 3],
    /// Spot lights (128 bytes)
    pub spots: [SpotLight; MAX_SPOT_LIGHTS],
}

impl Default for SceneUniforms {
    fn default() -> Self {
        Self {
            view_matrix: IDENTITY,
            projection_matrix: IDENTITY,
            camera_position: [0.0, 0.0, 1.8],
            ambient: 0.2,
            point_light: [0.0; 3],
            point_intensity: 0.4,
            spot_count: 0,
            _padding: [0; 3],
            spots: [SpotLight::default(); MAX_SPOT_LIGHTS],
        }
    }
}

/// Light parameters, before they are packed next to the camera matrices
#[derive(Clone, Debug, PartialEq)]
pub struct LightUniforms {
    pub ambient: f32,
    pub point_position: [f32; 3],
    pub point_intensity: f32,
    pub spots: Vec<SpotLight>,
}

impl LightUniforms {
    /// Copy the lights into `uniforms`; spots beyond the fourth are dropped
    pub fn write_into(&self, uniforms: &mut SceneUniforms) {
        uniforms.ambient = self.ambient;
        uniforms.point_light = self.point_position;
        uniforms.point_intensity = self.point_intensity;

        let count = self.spots.len().min(MAX_SPOT_LIGHTS);
        if self.spots.len() > MAX_SPOT_LIGHTS {
            log::warn!(
                "{} spot lights configured, only the first {} are used",
                self.spots.len(),
                MAX_SPOT_LIGHTS
            );
        }
        uniforms.spots = [SpotLight::default(); MAX_SPOT_LIGHTS];
        uniforms.spots[..count].copy_from_slice(&self.spots[..count]);
        uniforms.spot_count = count as u32;
    }
}

/// Per-tetrahedron material and scale
/// Layout: 32 bytes (must match scene.wgsl TetraUniforms)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct TetraUniforms {
    /// RGB + opacity
    pub color: [f32; 4],
    /// Sphere radius the unit mesh is scaled by
    pub scale: f32,
    pub _padding: [f32; 3],
}

impl TetraUniforms {
    pub fn new(rgb: [f32; 3], opacity: f32, scale: f32) -> Self {
        Self {
            color: [rgb[0], rgb[1], rgb[2], opacity],
            scale,
            _padding: [0.0; 3],
        }
    }
}

impl Default for TetraUniforms {
    fn default() -> Self {
        Self::new([1.0; 3], 1.0, 1.0)
    }
}

/// One instance of a marker mesh: rotate, scale, then translate
/// Layout: 48 bytes (must match the instance attributes in scene.wgsl)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct MarkerInstance {
    /// Quaternion (x, y, z, w)
    pub rotation: [f32; 4],
    pub offset: [f32; 3],
    pub scale: f32,
    /// RGBA
    pub color: [f32; 4],
}

impl Default for MarkerInstance {
    fn default() -> Self {
        Self {
            rotation: [0.0, 0.0, 0.0, 1.0],
            offset: [0.0; 3],
            scale: 1.0,
            color: [1.0; 4],
        }
    }
}
