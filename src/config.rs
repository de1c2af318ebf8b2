//! Render settings, stored as RON

use std::f32::consts::FRAC_PI_4;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use serde::{Serialize, Deserialize};
use thiserror::Error;
use crate::rasterizer::{Color, Mat4, Vec3, Viewport, HEIGHT, WIDTH};
use crate::scene::SceneKind;

/// Error type for config loading and saving
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: std::io::Error },
    #[error("parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("serialize error: {0}")]
    Serialize(#[from] ron::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Everything the renderer needs to produce a run of frames.
///
/// Missing fields take their defaults, so a config file only has to name
/// what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: usize,
    pub height: usize,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub clear_color: Color,
    pub scene: SceneKind,
    pub frames: usize,
    /// Seconds of animation between frames
    pub frame_time: f32,
    /// Spin rate in radians per second
    pub angular_speed: f32,
    /// Starting rotation about x, y and z in radians
    pub initial_angles: Vec3,
    /// Image for the textured scene; a checkerboard when unset
    pub texture: Option<PathBuf>,
    pub output_dir: PathBuf,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            fov_degrees: 90.0,
            near: 1.0,
            far: 10.0,
            clear_color: Color::BLACK,
            scene: SceneKind::SolidCube,
            frames: 1,
            frame_time: 1.0 / 60.0,
            angular_speed: 1.0,
            initial_angles: Vec3::new(0.0, FRAC_PI_4, 0.0),
            texture: None,
            output_dir: PathBuf::from("frames"),
        }
    }
}

impl FromStr for RenderConfig {
    type Err = ConfigError;

    /// Parse and validate a RON config
    fn from_str(s: &str) -> Result<Self, ConfigError> {
        let config: RenderConfig = ron::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}

impl RenderConfig {
    /// Load a config from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: RenderConfig = contents.parse()?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save the config to a RON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .indentor("  ".to_string());

        let contents = ron::ser::to_string_pretty(self, pretty)?;
        fs::write(path, contents).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "frame size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if !(self.near > 0.0 && self.near < self.far && self.far.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "clip planes need 0 < near < far, got near {} far {}",
                self.near, self.far
            )));
        }
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(ConfigError::Invalid(format!(
                "fov must be between 0 and 180 degrees, got {}",
                self.fov_degrees
            )));
        }
        if !(self.frame_time.is_finite() && self.frame_time >= 0.0) {
            return Err(ConfigError::Invalid(format!("frame_time must be >= 0, got {}", self.frame_time)));
        }
        Ok(())
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::projection(self.fov_degrees, self.viewport().aspect_ratio(), self.near, self.far)
    }

    /// Output path of frame `index`, e.g. `frames/frame_0007.png`
    pub fn frame_path(&self, index: usize) -> PathBuf {
        self.output_dir.join(format!("frame_{:04}.png", index))
    }
}
