//! Renderable geometry - bridges the tetrahedron field to GPU buffers
//!
//! Each tetrahedron gets its own vertex buffer and uniform buffer, created
//! once. Afterwards only the parts named by its dirty flags are rewritten,
//! and the flags are cleared once the writes are queued.

use slotmap::SecondaryMap;
use wgpu::util::DeviceExt;
use tetrasphere_core::{DirtyFlags, ShiftingTetrahedron, TetraField, TetraKey};
use tetrasphere_math::Quat;

use crate::pipeline::{MarkerInstance, TetraUniforms};

/// Edge length of the vertex boxes relative to the sphere radius
pub const VERTEX_BOX_SCALE: f32 = 0.025;
/// Opacity of the sphere patches
pub const PATCH_OPACITY: f32 = 0.3;

/// GPU resources of one tetrahedron
pub struct GpuTetra {
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl GpuTetra {
    /// Allocate buffers holding the tetrahedron's current state
    pub fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, tetra: &ShiftingTetrahedron) -> Self {
        let positions = tetra.geometry().positions();
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Tetra Vertex Buffer"),
            contents: bytemuck::cast_slice(positions),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Tetra Uniform Buffer"),
            contents: bytemuck::bytes_of(&tetra_uniforms(tetra)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Tetra Bind Group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        Self {
            vertex_buffer,
            vertex_count: (positions.len() / 3) as u32,
            uniform_buffer,
            bind_group,
        }
    }

    /// Queue writes for whatever `dirty` names
    pub fn sync(&self, queue: &wgpu::Queue, tetra: &ShiftingTetrahedron, dirty: DirtyFlags) {
        if dirty.contains(DirtyFlags::POSITIONS) {
            queue.write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(tetra.geometry().positions()));
        }
        if dirty.contains(DirtyFlags::COLOR) {
            queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&tetra_uniforms(tetra)));
        }
    }

    pub fn vertex_buffer(&self) -> &wgpu::Buffer {
        &self.vertex_buffer
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

/// GPU meshes for every tetrahedron of a field
#[derive(Default)]
pub struct TetraMeshes {
    meshes: SecondaryMap<TetraKey, GpuTetra>,
}

impl TetraMeshes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create meshes for new tetrahedra and upload dirty ones
    ///
    /// Returns how many tetrahedra had buffers written this frame.
    pub fn sync(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        field: &mut TetraField,
    ) -> usize {
        let mut written = 0;
        for (key, tetra) in field.iter_mut() {
            let dirty = tetra.geometry_mut().take_dirty();
            match self.meshes.get(key) {
                Some(mesh) => {
                    if !dirty.is_empty() {
                        mesh.sync(queue, tetra, dirty);
                        written += 1;
                    }
                }
                None => {
                    self.meshes.insert(key, GpuTetra::new(device, layout, tetra));
                    written += 1;
                }
            }
        }
        written
    }

    pub fn get(&self, key: TetraKey) -> Option<&GpuTetra> {
        self.meshes.get(key)
    }

    /// Meshes in the field's order
    pub fn ordered<'a>(&'a self, field: &'a TetraField) -> impl Iterator<Item = &'a GpuTetra> + 'a {
        field.iter().filter_map(move |(key, _)| self.meshes.get(key))
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}

/// Uniform values for a tetrahedron's current material
pub fn tetra_uniforms(tetra: &ShiftingTetrahedron) -> TetraUniforms {
    TetraUniforms::new(tetra.color().rgb(), tetra.opacity(), tetra.radius())
}

/// White boxes on every vertex of every tetrahedron
pub fn vertex_box_instances(field: &TetraField) -> Vec<MarkerInstance> {
    field
        .iter()
        .flat_map(|(_, tetra)| {
            let scale = VERTEX_BOX_SCALE * tetra.radius();
            tetra.world_vertices().map(|vertex| MarkerInstance {
                rotation: Quat::IDENTITY.to_array(),
                offset: vertex.to_array(),
                scale,
                color: [1.0; 4],
            })
        })
        .collect()
}

/// Sphere patches rotated onto every vertex, in the tetrahedron's colour
pub fn patch_instances(field: &TetraField) -> Vec<MarkerInstance> {
    field
        .iter()
        .flat_map(|(_, tetra)| {
            let [r, g, b] = tetra.color().rgb();
            let scale = tetra.radius();
            tetra.rotations().map(|rotation| MarkerInstance {
                rotation: rotation.to_array(),
                offset: [0.0; 3],
                scale,
                color: [r, g, b, PATCH_OPACITY],
            })
        })
        .collect()
}
