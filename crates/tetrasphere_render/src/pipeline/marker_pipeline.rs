//! Instanced markers: the boxes on each vertex and the sphere patches under them

use wgpu::util::DeviceExt;
use tetrasphere_math::Vec3;

use super::types::{MarkerInstance, MeshVertex};
use super::{build_pipeline, mesh_vertex_layout, scene_shader, PipelineParams};

/// Instances to allocate room for up front
const INITIAL_CAPACITY: usize = 16;

/// A static mesh plus a growable instance buffer
pub struct MarkerBatch {
    label: &'static str,
    mesh: wgpu::Buffer,
    vertex_count: u32,
    instances: wgpu::Buffer,
    capacity: usize,
    count: u32,
}

impl MarkerBatch {
    /// Upload `mesh` (a triangle list) once
    pub fn new(device: &wgpu::Device, label: &'static str, mesh: &[Vec3]) -> Self {
        let vertices: Vec<MeshVertex> = mesh
            .iter()
            .map(|p| MeshVertex { position: p.to_array() })
            .collect();
        let mesh = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Self {
            label,
            mesh,
            vertex_count: vertices.len() as u32,
            instances: Self::instance_buffer(device, label, INITIAL_CAPACITY),
            capacity: INITIAL_CAPACITY,
            count: 0,
        }
    }

    fn instance_buffer(device: &wgpu::Device, label: &str, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: (capacity * std::mem::size_of::<MarkerInstance>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Replace the instance data, growing the buffer when it is too small
    pub fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, instances: &[MarkerInstance]) {
        if instances.len() > self.capacity {
            self.capacity = instances.len().next_power_of_two();
            self.instances = Self::instance_buffer(device, self.label, self.capacity);
            log::debug!("Grew {} instance buffer to {}", self.label, self.capacity);
        }
        if !instances.is_empty() {
            queue.write_buffer(&self.instances, 0, bytemuck::cast_slice(instances));
        }
        self.count = instances.len() as u32;
    }

    /// Instances drawn by the next [`MarkerPipeline::draw`]
    pub fn count(&self) -> u32 {
        self.count
    }
}

/// Pipeline drawing [`MarkerBatch`]es
pub struct MarkerPipeline {
    pipeline: wgpu::RenderPipeline,
}

impl MarkerPipeline {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        scene_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Marker Pipeline Layout"),
            bind_group_layouts: &[scene_layout],
            push_constant_ranges: &[],
        });

        let shader = scene_shader(device);
        let buffers = [mesh_vertex_layout(), Self::instance_layout()];

        let pipeline = build_pipeline(
            device,
            &pipeline_layout,
            &shader,
            surface_format,
            PipelineParams {
                label: "Marker Pipeline",
                vertex_entry: "vs_marker",
                fragment_entry: "fs_lit",
                buffers: &buffers,
                topology: wgpu::PrimitiveTopology::TriangleList,
                depth_compare: wgpu::CompareFunction::Less,
            },
        );

        Self { pipeline }
    }

    /// Get the instance buffer layout for MarkerInstance
    fn instance_layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MarkerInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                // rotation: vec4<f32>
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 0,
                    shader_location: 1,
                },
                // offset: vec3<f32>
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 16,
                    shader_location: 2,
                },
                // scale: f32
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32,
                    offset: 28,
                    shader_location: 3,
                },
                // color: vec4<f32>
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 32,
                    shader_location: 4,
                },
            ],
        }
    }

    /// Draw every instance of `batch`
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>, scene: &wgpu::BindGroup, batch: &MarkerBatch) {
        if batch.count == 0 {
            return;
        }
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, scene, &[]);
        pass.set_vertex_buffer(0, batch.mesh.slice(..));
        pass.set_vertex_buffer(1, batch.instances.slice(..));
        pass.draw(0..batch.vertex_count, 0..batch.count);
    }
}
