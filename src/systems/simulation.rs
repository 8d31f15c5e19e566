//! Scene simulation system
//!
//! Manages the per-frame update:
//! - Delta time calculation
//! - Vertex drift and light oscillation
//! - Hover picking

use std::time::Instant;
use tetrasphere_core::{TetraField, TetraKey};
use tetrasphere_math::Ray;
use crate::scene::SceneLights;

/// Longest step taken in one frame, in seconds
pub const MAX_FRAME_DT: f32 = 0.25;

/// Result of a simulation update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationResult {
    /// Seconds the scene was advanced by
    pub dt: f32,
    /// Tetrahedron under the pointer after this frame
    pub hovered: Option<TetraKey>,
}

/// Manages the frame loop simulation
pub struct SimulationSystem {
    last_frame: Instant,
}

impl SimulationSystem {
    /// Create a new simulation system
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
        }
    }

    /// Run one simulation frame using wall-clock time since the last one
    ///
    /// # Arguments
    /// * `field` - Tetrahedra to animate and pick
    /// * `lights` - Light rig whose oscillator is advanced
    /// * `pointer_ray` - Ray under the cursor, `None` when it is outside the window
    pub fn update(
        &mut self,
        field: &mut TetraField,
        lights: &mut SceneLights,
        pointer_ray: Option<&Ray>,
    ) -> SimulationResult {
        let now = Instant::now();
        let raw_dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;

        Self::step(raw_dt, field, lights, pointer_ray)
    }

    /// Advance the scene by `dt` seconds
    ///
    /// Steps are capped at [`MAX_FRAME_DT`] so a stalled window does not
    /// skip whole drift legs when it resumes.
    pub fn step(
        dt: f32,
        field: &mut TetraField,
        lights: &mut SceneLights,
        pointer_ray: Option<&Ray>,
    ) -> SimulationResult {
        let dt = if dt.is_finite() { dt.clamp(0.0, MAX_FRAME_DT) } else { 0.0 };

        field.frame(dt);
        lights.advance(dt);
        let hovered = field.hover(pointer_ray);

        SimulationResult { dt, hovered }
    }
}

impl Default for SimulationSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tetrasphere_core::{DriftConfig, Easing};
    use tetrasphere_math::Vec3;

    fn scene() -> (TetraField, SceneLights) {
        let field = TetraField::with_count(
            1,
            1.0,
            DriftConfig { duration: 1.0, easing: Easing::Linear },
        );
        (field, SceneLights::default())
    }

    #[test]
    fn test_delta_time_capped() {
        let (mut field, mut lights) = scene();
        let result = SimulationSystem::step(5.0, &mut field, &mut lights, None);
        assert_eq!(result.dt, MAX_FRAME_DT);

        let result = SimulationSystem::step(-1.0, &mut field, &mut lights, None);
        assert_eq!(result.dt, 0.0);

        let result = SimulationSystem::step(f32::NAN, &mut field, &mut lights, None);
        assert_eq!(result.dt, 0.0);
    }

    #[test]
    fn test_step_advances_lights() {
        let (mut field, mut lights) = scene();
        SimulationSystem::step(0.25, &mut field, &mut lights, None);
        assert!(lights.point_intensity() > 0.4);
    }

    #[test]
    fn test_step_moves_vertices() {
        let (mut field, mut lights) = scene();
        let (key, _) = field.iter().next().unwrap();
        let before = field.get(key).unwrap().world_vertices();
        SimulationSystem::step(0.1, &mut field, &mut lights, None);
        let after = field.get(key).unwrap().world_vertices();
        assert_ne!(before, after);
    }

    #[test]
    fn test_ray_through_centre_hovers() {
        let (mut field, mut lights) = scene();
        // Let the vertices spread out before picking
        for _ in 0..4 {
            SimulationSystem::step(0.25, &mut field, &mut lights, None);
        }

        let (key, tetra) = field.iter().next().unwrap();
        let [a, b, c, _] = tetra.world_vertices();
        let centroid = (a + b + c) * (1.0 / 3.0);
        let origin = centroid * 3.0;
        let ray = Ray::new(origin, centroid - origin);

        let result = SimulationSystem::step(0.0, &mut field, &mut lights, Some(&ray));
        assert_eq!(result.hovered, Some(key));
        assert!(field.get(key).unwrap().is_highlighted());

        let result = SimulationSystem::step(0.0, &mut field, &mut lights, None);
        assert_eq!(result.hovered, None);
    }

    #[test]
    fn test_ray_missing_everything() {
        let (mut field, mut lights) = scene();
        let ray = Ray::new(Vec3::new(5.0, 5.0, 5.0), Vec3::new(1.0, 1.0, 1.0));
        let result = SimulationSystem::step(0.1, &mut field, &mut lights, Some(&ray));
        assert_eq!(result.hovered, None);
    }

    #[test]
    fn test_default_construction() {
        let sim = SimulationSystem::default();
        assert!(sim.last_frame.elapsed().as_millis() < 100);
    }
}
