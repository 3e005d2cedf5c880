//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`FILEORBIT_SECTION__KEY`)
//!
//! Command-line flags are applied on top by [`crate::cli::Cli::apply`].

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::{Path, PathBuf};
use fileorbit_core::{AxisPolicy, DisplayFlags, FsLister, Scene, SceneSettings, Vec3, ViewFilter};
use fileorbit_render::{FrameBuilder, Palette};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Scene configuration
    #[serde(default)]
    pub scene: SceneConfig,
    /// Simulation configuration
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Camera configuration
    #[serde(default)]
    pub camera: CameraConfig,
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
    /// 3. Environment variables (`FILEORBIT_*`)
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

        // Load user config (optional)
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // FILEORBIT_SCENE__RADIUS=2.5 -> scene.radius = 2.5
        figment = figment.merge(Env::prefixed("FILEORBIT_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }

    /// Projection, lighting and colors for the frame builder
    pub fn frame_builder(&self) -> FrameBuilder {
        FrameBuilder::new()
            .with_projection(self.camera.fov, self.camera.near, self.camera.far)
            .with_lighting(self.rendering.light_dir, self.rendering.ambient)
            .with_palette(self.rendering.palette())
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
            title: "fileorbit".to_string(),
            width: 500,
            height: 500,
            fullscreen: false,
            vsync: true,
        }
    }
}

/// Scene configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Directory shown at startup (working directory when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_dir: Option<PathBuf>,
    /// Sphere radius
    pub radius: f32,
    /// Marker size
    pub marker_size: f32,
    /// Orbit speed in turns per tick
    pub speed: f32,
    /// Camera translation [x, y, z]
    pub translation: [f32; 3],
    /// Start with orbits running
    pub orbit: bool,
    /// Start with labels shown
    pub labels: bool,
    /// Start with the wire sphere shown
    pub wire_sphere: bool,
    /// Start with the centre cube shown
    pub centre_cube: bool,
    /// How orbit axes are drawn
    pub axis_policy: AxisPolicy,
    /// Which entries are listed
    pub view_filter: ViewFilter,
    /// List a `..` entry for climbing to the parent directory
    pub parent_entry: bool,
    /// Fixed RNG seed for reproducible orbits
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        let settings = SceneSettings::default();
        Self {
            start_dir: None,
            radius: settings.radius,
            marker_size: settings.marker_size,
            speed: settings.speed,
            translation: settings.translation.to_array(),
            orbit: false,
            labels: false,
            wire_sphere: false,
            centre_cube: false,
            axis_policy: AxisPolicy::default(),
            view_filter: ViewFilter::default(),
            parent_entry: true,
            seed: None,
        }
    }
}

impl SceneConfig {
    /// Numeric settings, clamped at zero like the interactive adjustments
    pub fn settings(&self) -> SceneSettings {
        SceneSettings {
            radius: self.radius.max(0.0),
            marker_size: self.marker_size.max(0.0),
            speed: self.speed.max(0.0),
            translation: Vec3::from(self.translation),
        }
    }

    /// Overlays enabled at startup
    pub fn display_flags(&self) -> DisplayFlags {
        let mut flags = DisplayFlags::empty();
        flags.set(DisplayFlags::LABELS, self.labels);
        flags.set(DisplayFlags::SPHERE, self.wire_sphere);
        flags.set(DisplayFlags::CUBE, self.centre_cube);
        flags
    }

    /// Directory to open: the configured one if it resolves, else the working directory
    pub fn start_directory(&self) -> PathBuf {
        let requested = self.start_dir.clone().unwrap_or_else(|| PathBuf::from("."));
        match requested.canonicalize() {
            Ok(dir) => dir,
            Err(e) => {
                log::warn!("Cannot open {}: {}. Using working directory.", requested.display(), e);
                std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
            }
        }
    }

    /// Lister honouring `parent_entry`
    pub fn lister(&self) -> FsLister {
        FsLister::new().with_parent_entry(self.parent_entry)
    }

    /// Empty scene carrying every startup setting; call `reload` to populate it
    pub fn build_scene(&self) -> Scene {
        let mut scene = Scene::new(self.settings())
            .with_axis_policy(self.axis_policy)
            .with_view_filter(self.view_filter)
            .with_display(self.display_flags())
            .with_orbit(self.orbit)
            .with_directory(self.start_directory());
        if let Some(seed) = self.seed {
            scene = scene.with_seed(seed);
        }
        scene
    }
}

/// Simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Orbit ticks per second
    pub tick_rate: f32,
    /// Upper bound on ticks run for one frame, so a stall cannot snowball
    pub max_ticks_per_frame: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60.0,
            max_ticks_per_frame: 8,
        }
    }
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Field of view in degrees
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: 60.0,
            near: 0.1,
            far: 2000.0,
        }
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderingConfig {
    /// Background color [r, g, b, a]
    pub background_color: [f32; 4],
    /// Light direction in view space [x, y, z]
    pub light_dir: [f32; 3],
    /// Ambient light strength
    pub ambient: f32,
    /// File marker color
    pub file_color: [f32; 4],
    /// Directory marker color
    pub directory_color: [f32; 4],
    /// Selection highlight color (translucent)
    pub highlight_color: [f32; 4],
    /// Wire sphere color
    pub wire_color: [f32; 4],
    /// Centre cube color
    pub cube_color: [f32; 4],
}

impl Default for RenderingConfig {
    fn default() -> Self {
        let palette = Palette::default();
        let builder = FrameBuilder::default();
        Self {
            background_color: [0.0, 0.0, 0.0, 1.0],
            light_dir: builder.light_dir,
            ambient: builder.ambient,
            file_color: palette.file,
            directory_color: palette.directory,
            highlight_color: palette.highlight,
            wire_color: palette.wire,
            cube_color: palette.cube,
        }
    }
}

impl RenderingConfig {
    pub fn palette(&self) -> Palette {
        Palette {
            file: self.file_color,
            directory: self.directory_color,
            highlight: self.highlight_color,
            wire: self.wire_color,
            cube: self.cube_color,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
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
