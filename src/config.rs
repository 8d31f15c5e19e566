//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`TSPH_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;
use tetrasphere_core::{DriftConfig, Easing, OscillatorConfig};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Camera configuration
    #[serde(default)]
    pub camera: CameraConfig,
    /// Tetrahedra configuration
    #[serde(default)]
    pub scene: SceneConfig,
    /// Lights
    #[serde(default)]
    pub lighting: LightingConfig,
    /// Rendering configuration
    #[serde(default)]
    pub rendering: RenderingConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`TSPH_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Optional
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // TSPH_WINDOW__TITLE=Test -> window.title = "Test"
        figment = figment.merge(Env::prefixed("TSPH_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Start in fullscreen mode
    pub fullscreen: bool,
    /// Enable VSync
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Tetrasphere".to_string(),
            width: 1280,
            height: 720,
            fullscreen: false,
            vsync: true,
        }
    }
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Eye position [x, y, z]; the camera always looks at the origin
    pub position: [f32; 3],
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 1.8],
            fov: 75.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// Tetrahedra configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Tetrahedra present at start-up
    pub initial_count: usize,
    /// Radius of the sphere the vertices drift on
    pub radius: f32,
    /// Seconds per vertex drift leg
    pub drift_duration: f32,
    /// Easing of each drift leg
    pub drift_easing: Easing,
    /// Draw the vertex boxes and sphere patches
    pub show_vertices: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        let drift = DriftConfig::default();
        Self {
            initial_count: 1,
            radius: 1.0,
            drift_duration: drift.duration,
            drift_easing: drift.easing,
            show_vertices: true,
        }
    }
}

impl SceneConfig {
    /// Drift timing for new tetrahedra
    pub fn drift_config(&self) -> DriftConfig {
        DriftConfig {
            duration: self.drift_duration,
            easing: self.drift_easing,
        }
    }
}

/// A spot light aimed at the origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpotConfig {
    /// Position [x, y, z]
    pub position: [f32; 3],
    /// Intensity
    #[serde(default = "default_spot_intensity")]
    pub intensity: f32,
}

fn default_spot_intensity() -> f32 {
    1.0
}

/// Light configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    /// Ambient light intensity
    pub ambient: f32,
    /// Point light position [x, y, z]
    pub point_position: [f32; 3],
    /// Point light intensity oscillation
    pub oscillator: OscillatorConfig,
    /// Cone half-angle of every spot light in radians
    pub spot_angle: f32,
    /// Spot lights (at most 4 are used)
    pub spots: Vec<SpotConfig>,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            ambient: 0.2,
            point_position: [0.0, 0.0, 0.0],
            oscillator: OscillatorConfig::default(),
            spot_angle: std::f32::consts::PI / 16.0,
            spots: vec![
                SpotConfig { position: [0.0, 0.0, -1.5], intensity: 1.0 },
                SpotConfig { position: [-1.5, 0.0, 1.5], intensity: 1.0 },
                SpotConfig { position: [1.5, 0.0, 1.5], intensity: 1.0 },
            ],
        }
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderingConfig {
    /// Background color [r, g, b, a]
    pub background_color: [f32; 4],
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            background_color: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Show frame statistics in the window title
    pub show_stats: bool,
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            show_stats: true,
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
