//! GPU rendering system
//!
//! Manages GPU rendering including:
//! - Render context and surface
//! - Tetrahedron and marker pipelines
//! - Frame rendering

use std::sync::Arc;
use winit::window::Window;
use tetrasphere_core::TetraField;
use tetrasphere_math::{cube_triangles, sphere_patch, Ray, Vec3};
use tetrasphere_render::{
    context::{ContextError, RenderContext},
    pipeline::{
        DepthTarget, LightUniforms, MarkerBatch, MarkerPipeline, SceneBinding, SceneUniforms,
        TetraPipeline,
    },
    patch_instances, vertex_box_instances, Camera3D, TetraMeshes,
};
use crate::config::{CameraConfig, RenderingConfig};

/// Angular size of the sphere patch drawn under each vertex
const PATCH_ARC_DEGREES: f32 = 10.0;
/// Subdivisions along each side of a sphere patch
const PATCH_SEGMENTS: u32 = 10;

/// Render error types
#[derive(Debug)]
pub enum RenderError {
    /// Surface was lost (window resized, minimized, etc.)
    SurfaceLost,
    /// GPU out of memory
    OutOfMemory,
    /// Other surface error
    Other(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::SurfaceLost => write!(f, "Surface lost"),
            RenderError::OutOfMemory => write!(f, "Out of memory"),
            RenderError::Other(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<ContextError> for RenderError {
    fn from(e: ContextError) -> Self {
        RenderError::Other(e.to_string())
    }
}

/// Manages GPU rendering
pub struct RenderSystem {
    context: RenderContext,
    scene: SceneBinding,
    depth: DepthTarget,
    tetra_pipeline: TetraPipeline,
    marker_pipeline: MarkerPipeline,
    boxes: MarkerBatch,
    patches: MarkerBatch,
    meshes: TetraMeshes,
    camera: Camera3D,
    render_config: RenderingConfig,
    show_vertices: bool,
}

impl RenderSystem {
    /// Create render system from window and config
    pub fn new(
        window: Arc<Window>,
        render_config: RenderingConfig,
        camera_config: &CameraConfig,
        vsync: bool,
        show_vertices: bool,
    ) -> Result<Self, RenderError> {
        let context = pollster::block_on(RenderContext::with_vsync(window, vsync))?;
        let device = &context.device;
        let format = context.config.format;

        let scene = SceneBinding::new(device);
        let tetra_pipeline = TetraPipeline::new(device, format, scene.layout());
        let marker_pipeline = MarkerPipeline::new(device, format, scene.layout());

        let boxes = MarkerBatch::new(device, "Vertex Boxes", &cube_triangles(0.5));
        let patches = MarkerBatch::new(
            device,
            "Sphere Patches",
            &sphere_patch(PATCH_ARC_DEGREES.to_radians(), PATCH_SEGMENTS),
        );

        let mut depth = DepthTarget::default();
        depth.ensure(device, context.size.width, context.size.height);

        let p = camera_config.position;
        let camera = Camera3D::looking_at_origin(
            Vec3::new(p[0], p[1], p[2]),
            camera_config.fov,
            camera_config.near,
            camera_config.far,
        );

        Ok(Self {
            context,
            scene,
            depth,
            tetra_pipeline,
            marker_pipeline,
            boxes,
            patches,
            meshes: TetraMeshes::new(),
            camera,
            render_config,
            show_vertices,
        })
    }

    /// Handle window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context
            .resize(winit::dpi::PhysicalSize::new(width, height));
        self.depth.ensure(&self.context.device, width, height);
    }

    /// Reconfigure the surface at its current size after it was lost
    pub fn reconfigure(&mut self) {
        self.context.reconfigure();
    }

    /// Sync GPU buffers with the field and instance lists
    fn upload(&mut self, field: &mut TetraField) {
        let written = self.meshes.sync(
            &self.context.device,
            &self.context.queue,
            self.tetra_pipeline.tetra_layout(),
            field,
        );
        log::trace!("Rewrote buffers of {} tetrahedra", written);

        if self.show_vertices {
            self.boxes.upload(
                &self.context.device,
                &self.context.queue,
                &vertex_box_instances(field),
            );
            self.patches.upload(
                &self.context.device,
                &self.context.queue,
                &patch_instances(field),
            );
        }
    }

    /// Render a single frame
    pub fn render_frame(
        &mut self,
        field: &mut TetraField,
        lights: &LightUniforms,
    ) -> Result<(), RenderError> {
        self.upload(field);

        let aspect = self.context.aspect_ratio();
        let mut uniforms = SceneUniforms {
            view_matrix: self.camera.view_matrix(),
            projection_matrix: self.camera.projection_matrix(aspect),
            camera_position: self.camera.position.to_array(),
            ..SceneUniforms::default()
        };
        lights.write_into(&mut uniforms);
        self.scene.update(&self.context.queue, &uniforms);

        // Get surface texture
        let output = match self.context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost) => return Err(RenderError::SurfaceLost),
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(RenderError::OutOfMemory),
            Err(e) => return Err(RenderError::Other(format!("{:?}", e))),
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let depth_view = self
            .depth
            .view()
            .ok_or_else(|| RenderError::Other("depth target missing".to_string()))?;

        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        let bg = &self.render_config.background_color;
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: bg[0] as f64,
                            g: bg[1] as f64,
                            b: bg[2] as f64,
                            a: bg[3] as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            let scene_bg = self.scene.bind_group();

            // Opaque first, then the translucent layers
            if self.show_vertices {
                self.marker_pipeline.draw(&mut pass, scene_bg, &self.boxes);
            }
            self.tetra_pipeline
                .draw_solid(&mut pass, scene_bg, self.meshes.ordered(field));
            if self.show_vertices {
                self.marker_pipeline.draw(&mut pass, scene_bg, &self.patches);
            }

            let hovered = field
                .hovered()
                .filter(|key| field.get(*key).is_some_and(|tetra| tetra.shows_wireframe()));
            if let Some(mesh) = hovered.and_then(|key| self.meshes.get(key)) {
                self.tetra_pipeline.draw_wireframe(&mut pass, scene_bg, mesh);
            }
        }

        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Picking ray through a point in normalized device coordinates
    pub fn pick_ray(&self, ndc_x: f32, ndc_y: f32) -> Ray {
        self.camera
            .screen_ray(ndc_x, ndc_y, self.context.aspect_ratio())
    }

    /// Get current surface size
    pub fn size(&self) -> (u32, u32) {
        (self.context.size.width, self.context.size.height)
    }

    pub fn camera(&self) -> &Camera3D {
        &self.camera
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_error_display() {
        assert_eq!(format!("{}", RenderError::SurfaceLost), "Surface lost");
        assert_eq!(format!("{}", RenderError::OutOfMemory), "Out of memory");
        assert_eq!(
            format!("{}", RenderError::Other("test".to_string())),
            "Render error: test"
        );
    }

    #[test]
    fn test_context_error_maps_to_other() {
        let err: RenderError = ContextError::NoAdapter.into();
        assert!(matches!(err, RenderError::Other(_)));
        assert_eq!(format!("{}", err), "Render error: No suitable GPU adapter found");
    }
}
