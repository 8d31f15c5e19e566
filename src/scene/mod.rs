//! Scene construction utilities
//!
//! This module builds the tetrahedron field and the light rig from configuration.

mod scene_builder;
mod lights;

pub use scene_builder::SceneBuilder;
pub use lights::SceneLights;
