//! Everything that gets rendered: meshes and the lights shining on them.

use crate::light::{AmbientLight, Light};
use crate::mesh::Mesh;

#[derive(Clone, Debug)]
pub struct World {
    pub meshes: Vec<Mesh>,
    pub ambient_light: AmbientLight,
    pub diffuse_lights: Vec<Light>,
    pub specular_lights: Vec<Light>,

    pub ambient_light_enabled: bool,
    pub diffuse_lights_enabled: bool,
    pub specular_lights_enabled: bool,
}

impl Default for World {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl World {
    /// A world with the default white ambient light and no other lights.
    pub fn new(meshes: Vec<Mesh>) -> Self {
        Self {
            meshes,
            ambient_light: AmbientLight::default(),
            diffuse_lights: Vec::new(),
            specular_lights: Vec::new(),
            ambient_light_enabled: true,
            diffuse_lights_enabled: true,
            specular_lights_enabled: true,
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(|m| m.triangles().len()).sum()
    }
}
