//! 3D Mathematics Library
//!
//! This crate provides the vector, rotation and sphere geometry used by Tetrasphere.
//!
//! ## Core Types
//!
//! - [`Vec3`] - 3D vector with x, y, z components
//! - [`Quat`] - Unit quaternion rotation with shortest-arc slerp
//! - [`Ray`] - Half-line used for pointer picking
//!
//! ## Geometry
//!
//! - [`random_on_sphere`] - Uniform direction sampling
//! - [`tetra`] - Face, edge and vertex-slot tables of the tetrahedron mesh
//! - [`sphere_patch`] / [`cube_triangles`] - Marker meshes

mod vec3;
mod quat;
mod ray;
pub mod sphere;
pub mod tetra;
pub mod shapes;
pub mod color;

pub use vec3::Vec3;
pub use quat::Quat;
pub use ray::Ray;
pub use sphere::{random_on_sphere, sphere_patch};
pub use tetra::{
    TETRA_EDGES, TETRA_FACES, TETRA_POSITION_COUNT, TETRA_VERTEX_COUNT,
    tetra_edge_indices, tetra_vertex_slots, unit_tetrahedron_vertices,
};
pub use shapes::cube_triangles;
pub use color::hsl_to_rgb;
