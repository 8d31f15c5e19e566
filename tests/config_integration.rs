//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use std::path::PathBuf;
use tetrasphere::config::AppConfig;
use tetrasphere::scene::{SceneBuilder, SceneLights};
use tetrasphere_core::Easing;
use serial_test::serial;

/// Fresh config directory under the system temp dir
fn config_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("tetrasphere-config-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("TSPH_WINDOW__TITLE", "Test From Env");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.window.title, "Test From Env");
    std::env::remove_var("TSPH_WINDOW__TITLE");
}

#[test]
#[serial]
fn test_env_override_nested_number() {
    std::env::set_var("TSPH_SCENE__INITIAL_COUNT", "5");
    let config = AppConfig::load().unwrap();
    std::env::remove_var("TSPH_SCENE__INITIAL_COUNT");

    assert_eq!(config.scene.initial_count, 5);
    let field = SceneBuilder::from_config(&config.scene).build();
    assert_eq!(field.len(), 5);
}

#[test]
#[serial]
fn test_shipped_defaults_match_code_defaults() {
    let config = AppConfig::load_from("config").unwrap();
    let defaults = AppConfig::default();

    assert_eq!(config.window.title, defaults.window.title);
    assert_eq!(config.camera.position, defaults.camera.position);
    assert_eq!(config.scene.drift_config(), defaults.scene.drift_config());
    assert_eq!(config.lighting.oscillator, defaults.lighting.oscillator);
    assert_eq!(config.lighting.spots, defaults.lighting.spots);
    assert!((config.lighting.spot_angle - defaults.lighting.spot_angle).abs() < 1e-6);
}

#[test]
#[serial]
fn test_user_config_overrides_default() {
    let dir = config_dir("user");
    std::fs::write(
        dir.join("default.toml"),
        "[scene]\ninitial_count = 2\nradius = 1.0\n",
    )
    .unwrap();
    std::fs::write(
        dir.join("user.toml"),
        "[scene]\nradius = 3.0\n\n[scene.drift_easing]\ntype = \"linear\"\n",
    )
    .unwrap();

    let config = AppConfig::load_from(&dir).unwrap();
    assert_eq!(config.scene.initial_count, 2);
    assert_eq!(config.scene.radius, 3.0);
    assert_eq!(config.scene.drift_easing, Easing::Linear);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
#[serial]
fn test_custom_lights() {
    let dir = config_dir("lights");
    std::fs::write(
        dir.join("default.toml"),
        "[lighting]\nambient = 0.5\n\n[[lighting.spots]]\nposition = [0.0, 2.0, 0.0]\nintensity = 0.5\n",
    )
    .unwrap();

    let config = AppConfig::load_from(&dir).unwrap();
    let lights = SceneLights::from_config(&config.lighting);
    let uniforms = lights.uniforms();

    assert_eq!(uniforms.ambient, 0.5);
    assert_eq!(uniforms.spots.len(), 1);
    assert_eq!(uniforms.spots[0].intensity, 0.5);
    assert!((uniforms.spots[0].direction[1] + 1.0).abs() < 1e-6);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
#[serial]
fn test_malformed_file_is_an_error() {
    let dir = config_dir("malformed");
    std::fs::write(dir.join("default.toml"), "[scene]\nradius = \"big\"\n").unwrap();

    let err = AppConfig::load_from(&dir).unwrap_err();
    assert!(err.to_string().starts_with("Configuration error:"));

    let _ = std::fs::remove_dir_all(&dir);
}
