//! Tetrasphere Rendering Library
//!
//! This crate provides the wgpu-based rendering of the tetrahedron field.
//!
//! ## Key Components
//!
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`camera::Camera3D`] - Perspective camera and picking rays
//! - [`pipeline::TetraPipeline`] - Flat-shaded tetrahedra and hover wireframe
//! - [`pipeline::MarkerPipeline`] - Instanced vertex boxes and sphere patches
//! - [`renderable::TetraMeshes`] - Per-tetrahedron GPU buffers synced from dirty flags

pub mod context;
pub mod camera;
pub mod pipeline;
pub mod renderable;

pub use camera::{perspective_matrix, Camera3D};
pub use renderable::{patch_instances, vertex_box_instances, GpuTetra, TetraMeshes};
