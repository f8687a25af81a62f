//! Application settings loaded from a RON file.
//!
//! Every section and field has a default, so a settings file only needs to
//! name what it changes:
//!
//! ```ron
//! (
//!     window: (width: 1280, height: 720),
//!     render: (depth_mode: ZBuffer, show_grid: true),
//! )
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::camera::{Camera, CameraController, CameraError};
use crate::color::Color;
use crate::render::{DepthMode, RenderOptions};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub window: WindowSettings,
    pub game: GameSettings,
    pub render: RenderSettings,
    pub camera: CameraController,
}

impl Settings {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let settings = Self::from_ron_str(&contents)?;
        log::debug!("loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn from_ron_str(s: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(s)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub width: u32,
    pub height: u32,
    /// Framebuffer size relative to the window; the result is stretched.
    pub framebuffer_scale: f64,
    pub vsync: bool,
    pub hide_mouse: bool,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            framebuffer_scale: 0.5,
            vsync: false,
            hide_mouse: true,
        }
    }
}

impl WindowSettings {
    /// Framebuffer dimensions, at least one pixel each way.
    pub fn framebuffer_size(&self) -> (usize, usize) {
        let scale = |n: u32| ((f64::from(n) * self.framebuffer_scale) as usize).max(1);
        (scale(self.width), scale(self.height))
    }
}

/// Which scene the demo starts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Scene {
    SimpleCube,
    #[default]
    LoadedLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub level_file: String,
    /// Fixed update ticks per second.
    pub update_frequency: f64,
    pub scene: Scene,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            level_file: "data/level.tga".to_string(),
            update_frequency: 60.0,
            scene: Scene::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Degrees.
    pub vertical_fov: f64,
    pub near_z: f64,
    pub far_z: f64,
    pub depth_mode: DepthMode,
    pub backface_culling: bool,
    pub frustum_culling: bool,
    pub wireframe: bool,
    pub show_grid: bool,
    /// RGB clear color.
    pub background: [u8; 3],
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            vertical_fov: 90.0,
            near_z: 0.1,
            far_z: 100.0,
            depth_mode: DepthMode::default(),
            backface_culling: true,
            frustum_culling: true,
            wireframe: false,
            show_grid: false,
            background: [0, 0, 0],
        }
    }
}

impl RenderSettings {
    pub fn options(&self) -> RenderOptions {
        RenderOptions {
            depth_mode: self.depth_mode,
            backface_culling: self.backface_culling,
            frustum_culling: self.frustum_culling,
        }
    }

    pub fn background_color(&self) -> Color {
        let [r, g, b] = self.background;
        Color::from_int(r, g, b, 255)
    }

    /// A camera with these projection settings at the origin.
    pub fn camera(&self, aspect_ratio: f64) -> Result<Camera, CameraError> {
        Camera::new(self.vertical_fov, aspect_ratio, self.near_z, self.far_z)
    }
}
