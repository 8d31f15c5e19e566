//! Scene lighting
//!
//! Ambient light, a point light at the centre whose intensity follows a
//! [`LightOscillator`], and spot lights aimed at the origin.

use tetrasphere_core::LightOscillator;
use tetrasphere_render::pipeline::{LightUniforms, SpotLight, MAX_SPOT_LIGHTS};
use crate::config::LightingConfig;

/// The lights of the scene and their animation state
pub struct SceneLights {
    ambient: f32,
    point_position: [f32; 3],
    spots: Vec<SpotLight>,
    oscillator: LightOscillator,
}

impl SceneLights {
    /// Build the light rig from config
    pub fn from_config(config: &LightingConfig) -> Self {
        if config.spots.len() > MAX_SPOT_LIGHTS {
            log::warn!(
                "{} spot lights configured, keeping the first {}",
                config.spots.len(),
                MAX_SPOT_LIGHTS
            );
        }

        let spots = config
            .spots
            .iter()
            .take(MAX_SPOT_LIGHTS)
            .map(|spot| SpotLight::aimed_at(spot.position, [0.0; 3], config.spot_angle, spot.intensity))
            .collect();

        Self {
            ambient: config.ambient,
            point_position: config.point_position,
            spots,
            oscillator: LightOscillator::new(config.oscillator),
        }
    }

    /// Advance the point light oscillation
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.oscillator.advance(dt)
    }

    /// Current point light intensity
    pub fn point_intensity(&self) -> f32 {
        self.oscillator.value()
    }

    pub fn spots(&self) -> &[SpotLight] {
        &self.spots
    }

    pub fn oscillator(&self) -> &LightOscillator {
        &self.oscillator
    }

    /// Light values for this frame
    pub fn uniforms(&self) -> LightUniforms {
        LightUniforms {
            ambient: self.ambient,
            point_position: self.point_position,
            point_intensity: self.oscillator.value(),
            spots: self.spots.clone(),
        }
    }
}

impl Default for SceneLights {
    fn default() -> Self {
        Self::from_config(&LightingConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SpotConfig;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_default_rig() {
        let lights = SceneLights::default();
        let uniforms = lights.uniforms();

        assert_eq!(uniforms.ambient, 0.2);
        assert_eq!(uniforms.point_position, [0.0; 3]);
        assert!(approx_eq(uniforms.point_intensity, 0.4));
        assert_eq!(uniforms.spots.len(), 3);
    }

    #[test]
    fn test_spots_aim_at_origin() {
        let lights = SceneLights::default();
        let cutoff = (std::f32::consts::PI / 16.0).cos();

        for spot in lights.spots() {
            let p = spot.position;
            let len = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
            for axis in 0..3 {
                assert!(approx_eq(spot.direction[axis], -p[axis] / len));
            }
            assert!(approx_eq(spot.cos_cutoff, cutoff));
        }
        assert_eq!(lights.spots()[0].position, [0.0, 0.0, -1.5]);
    }

    #[test]
    fn test_extra_spots_dropped() {
        let config = LightingConfig {
            spots: vec![SpotConfig { position: [1.0, 0.0, 0.0], intensity: 1.0 }; 6],
            ..LightingConfig::default()
        };
        let lights = SceneLights::from_config(&config);
        assert_eq!(lights.spots().len(), MAX_SPOT_LIGHTS);
    }

    #[test]
    fn test_point_intensity_follows_oscillator() {
        let mut lights = SceneLights::default();
        let peak = lights.advance(1.0);
        assert!(approx_eq(peak, 1.0));
        assert!(approx_eq(lights.uniforms().point_intensity, 1.0));

        lights.advance(0.3);
        assert!(approx_eq(lights.point_intensity(), 0.4));
        assert_eq!(lights.oscillator().cycles(), 1);
    }
}
