//! Pipelines for the tetrahedra themselves
//!
//! The solid pass draws the 12-vertex mesh as 4 triangles; the wireframe
//! pass reuses the same vertex buffer with a 6-edge line-list index buffer
//! and is only issued for the highlighted tetrahedron.

use wgpu::util::DeviceExt;
use tetrasphere_math::tetra_edge_indices;

use super::{build_pipeline, mesh_vertex_layout, scene_shader, uniform_layout_entry, PipelineParams};
use crate::renderable::GpuTetra;

/// Solid and wireframe tetrahedron pipelines
pub struct TetraPipeline {
    solid: wgpu::RenderPipeline,
    wireframe: wgpu::RenderPipeline,
    /// Bind group layout for per-tetrahedron uniforms (group 1)
    tetra_layout: wgpu::BindGroupLayout,
    /// Line-list indices of the 6 edges
    edge_indices: wgpu::Buffer,
    edge_index_count: u32,
}

impl TetraPipeline {
    /// Create both pipelines against the shared scene layout
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        scene_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let tetra_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Tetra Bind Group Layout"),
            entries: &[uniform_layout_entry(0)],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Tetra Pipeline Layout"),
            bind_group_layouts: &[scene_layout, &tetra_layout],
            push_constant_ranges: &[],
        });

        let shader = scene_shader(device);
        let buffers = [mesh_vertex_layout()];

        let solid = build_pipeline(
            device,
            &pipeline_layout,
            &shader,
            surface_format,
            PipelineParams {
                label: "Tetra Solid Pipeline",
                vertex_entry: "vs_tetra",
                fragment_entry: "fs_lit",
                buffers: &buffers,
                topology: wgpu::PrimitiveTopology::TriangleList,
                depth_compare: wgpu::CompareFunction::Less,
            },
        );

        // Edges lie exactly on the faces; LessEqual keeps them visible
        let wireframe = build_pipeline(
            device,
            &pipeline_layout,
            &shader,
            surface_format,
            PipelineParams {
                label: "Tetra Wireframe Pipeline",
                vertex_entry: "vs_tetra",
                fragment_entry: "fs_wire",
                buffers: &buffers,
                topology: wgpu::PrimitiveTopology::LineList,
                depth_compare: wgpu::CompareFunction::LessEqual,
            },
        );

        let indices = tetra_edge_indices();
        let edge_indices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Tetra Edge Index Buffer"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            solid,
            wireframe,
            tetra_layout,
            edge_indices,
            edge_index_count: indices.len() as u32,
        }
    }

    /// Layout used to create each tetrahedron's uniform bind group
    pub fn tetra_layout(&self) -> &wgpu::BindGroupLayout {
        &self.tetra_layout
    }

    /// Draw the faces of every tetrahedron
    pub fn draw_solid<'a>(
        &self,
        pass: &mut wgpu::RenderPass<'_>,
        scene: &wgpu::BindGroup,
        meshes: impl Iterator<Item = &'a GpuTetra>,
    ) {
        pass.set_pipeline(&self.solid);
        pass.set_bind_group(0, scene, &[]);
        for mesh in meshes {
            pass.set_bind_group(1, mesh.bind_group(), &[]);
            pass.set_vertex_buffer(0, mesh.vertex_buffer().slice(..));
            pass.draw(0..mesh.vertex_count(), 0..1);
        }
    }

    /// Draw the edges of one tetrahedron
    pub fn draw_wireframe(&self, pass: &mut wgpu::RenderPass<'_>, scene: &wgpu::BindGroup, mesh: &GpuTetra) {
        pass.set_pipeline(&self.wireframe);
        pass.set_bind_group(0, scene, &[]);
        pass.set_bind_group(1, mesh.bind_group(), &[]);
        pass.set_vertex_buffer(0, mesh.vertex_buffer().slice(..));
        pass.set_index_buffer(self.edge_indices.slice(..), wgpu::IndexFormat::Uint16);
        pass.draw_indexed(0..self.edge_index_count, 0, 0..1);
    }
}
