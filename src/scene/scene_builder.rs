//! SceneBuilder - Declarative scene construction
//!
//! Provides a fluent API for building the tetrahedron field.

use tetrasphere_core::{DriftConfig, TetraField};
use crate::config::SceneConfig;

/// Builder for the tetrahedron field
///
/// # Example
/// ```ignore
/// let field = SceneBuilder::new()
///     .with_radius(1.0)
///     .add_tetrahedra(3)
///     .build();
/// ```
pub struct SceneBuilder {
    radius: f32,
    drift: DriftConfig,
    count: usize,
}

impl SceneBuilder {
    /// Create a new scene builder: unit sphere, default drift, no tetrahedra
    pub fn new() -> Self {
        Self {
            radius: 1.0,
            drift: DriftConfig::default(),
            count: 0,
        }
    }

    /// Builder matching a [`SceneConfig`]
    pub fn from_config(config: &SceneConfig) -> Self {
        Self::new()
            .with_radius(config.radius)
            .with_drift(validated_drift(config))
            .add_tetrahedra(config.initial_count)
    }

    /// Set the sphere radius; non-positive or non-finite values are ignored
    pub fn with_radius(mut self, radius: f32) -> Self {
        if radius.is_finite() && radius > 0.0 {
            self.radius = radius;
        } else {
            log::warn!("Ignoring invalid sphere radius {}", radius);
        }
        self
    }

    /// Set drift timing for every tetrahedron
    pub fn with_drift(mut self, drift: DriftConfig) -> Self {
        self.drift = drift;
        self
    }

    /// Add `count` tetrahedra, seeded in order of creation
    pub fn add_tetrahedra(mut self, count: usize) -> Self {
        self.count += count;
        self
    }

    /// Build the field
    pub fn build(self) -> TetraField {
        let field = TetraField::with_count(self.count, self.radius, self.drift);
        log::info!(
            "Scene built: {} tetrahedra on a sphere of radius {}",
            field.len(),
            field.radius()
        );
        field
    }
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Drift settings from config; a non-positive duration falls back to the default
fn validated_drift(config: &SceneConfig) -> DriftConfig {
    let drift = config.drift_config();
    if drift.duration.is_finite() && drift.duration > 0.0 {
        drift
    } else {
        log::warn!("Ignoring invalid drift duration {}", drift.duration);
        DriftConfig {
            duration: DriftConfig::default().duration,
            ..drift
        }
    }
}
