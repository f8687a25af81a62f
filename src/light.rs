//! Lighting types for the renderer.

use crate::color::{Color, LightColor};
use crate::euler_angle::EulerAngle;
use crate::math::vec3::Vec3;

/// Where light comes from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LightSource {
    /// A point light; the light direction varies per surface.
    Positional { position: Vec3 },
    /// A distant light shining along `angle.direction_vector()`, where all
    /// rays are effectively parallel.
    Directional { angle: EulerAngle },
}

impl LightSource {
    /// Normalized direction from `surface` toward the light.
    pub fn direction_to_light(&self, surface: Vec3) -> Vec3 {
        match self {
            LightSource::Positional { position } => (*position - surface).normalize(),
            LightSource::Directional { angle } => -angle.direction_vector(),
        }
    }
}

/// A diffuse or specular light. Which list of the world it lives in decides
/// how it is applied; `shininess` is only read by specular lights.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    pub source: LightSource,
    pub color: Color,
    pub intensity: f64,
    pub shininess: f64,
}

impl Light {
    pub fn positional(position: Vec3, color: Color, intensity: f64) -> Self {
        Self {
            source: LightSource::Positional { position },
            color,
            intensity,
            shininess: 1.0,
        }
    }

    pub fn directional(angle: EulerAngle, color: Color, intensity: f64) -> Self {
        Self {
            source: LightSource::Directional { angle },
            color,
            intensity,
            shininess: 1.0,
        }
    }

    pub fn with_shininess(mut self, shininess: f64) -> Self {
        self.shininess = shininess;
        self
    }

    /// Light color scaled by intensity.
    pub fn radiance(&self) -> LightColor {
        LightColor::from_color(self.color, self.intensity)
    }
}

/// Constant light added to every face.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbientLight {
    pub color: Color,
    pub intensity: f64,
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            intensity: 0.3,
        }
    }
}

impl AmbientLight {
    pub fn new(color: Color, intensity: f64) -> Self {
        Self { color, intensity }
    }

    pub fn radiance(&self) -> LightColor {
        LightColor::from_color(self.color, self.intensity)
    }
}
