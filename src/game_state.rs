//! Demo scenes: a lit spinning cube and a level built from a TGA map.

use std::path::Path;

use thiserror::Error;

use crate::camera::{Camera, CameraController, CameraError, CameraInput};
use crate::color::Color;
use crate::config::Settings;
use crate::euler_angle::EulerAngle;
use crate::level::{self, BlockGrid, LevelError};
use crate::light::{AmbientLight, Light};
use crate::math::vec3::Vec3;
use crate::mesh::Mesh;
use crate::render::{CoordinateGrid, FrameBuffer, Renderer};
use crate::world::World;

#[derive(Debug, Error)]
pub enum GameStateError {
    #[error(transparent)]
    Level(#[from] LevelError),

    #[error(transparent)]
    Camera(#[from] CameraError),
}

/// A scene the engine can tick and draw.
pub trait GameState {
    fn update(&mut self, delta_time: f64, input: &CameraInput);

    fn render(&mut self, renderer: &mut Renderer, buffer: &mut FrameBuffer);

    fn world(&self) -> &World;

    fn camera(&self) -> &Camera;

    fn camera_mut(&mut self) -> &mut Camera;

    fn toggle_wireframe(&mut self);

    /// Scenes without a grid ignore this.
    fn toggle_grid(&mut self) {}
}

// =============================================================================
// Simple cube
// =============================================================================

const CUBE_SPIN_SPEED: f64 = 0.5; // radians per second

/// A gold cube spinning in front of the camera.
pub struct SimpleCubeState {
    world: World,
    camera: Camera,
    controller: CameraController,
    render_wireframe: bool,
}

impl SimpleCubeState {
    pub fn new(settings: &Settings, aspect_ratio: f64) -> Result<Self, CameraError> {
        let mut world = World::new(vec![Mesh::cube(Color::from_int(255, 215, 0, 255))]);
        world.ambient_light = AmbientLight::new(Color::WHITE, 0.2);

        let light_angle = EulerAngle::new(-20.0, 30.0, 0.0);
        world
            .diffuse_lights
            .push(Light::directional(light_angle, Color::WHITE, 0.6));
        world
            .specular_lights
            .push(Light::directional(light_angle, Color::WHITE, 0.6).with_shininess(4.0));

        let mut camera = settings.render.camera(aspect_ratio)?;
        camera.set_position(Vec3::new(3.0, 3.0, 3.0));
        camera.set_orientation(EulerAngle::new(-40.0, 45.0, 0.0));

        Ok(Self {
            world,
            camera,
            controller: settings.camera.clone(),
            render_wireframe: settings.render.wireframe,
        })
    }
}

impl GameState for SimpleCubeState {
    fn update(&mut self, delta_time: f64, input: &CameraInput) {
        self.camera.update(delta_time, input, &self.controller);
        for mesh in &mut self.world.meshes {
            mesh.transform.rotate_y(CUBE_SPIN_SPEED * delta_time);
        }
    }

    fn render(&mut self, renderer: &mut Renderer, buffer: &mut FrameBuffer) {
        if self.render_wireframe {
            renderer.render_wireframe(&self.world, &self.camera, buffer);
        } else {
            renderer.render_solid(&self.world, &self.camera, buffer);
        }
    }

    fn world(&self) -> &World {
        &self.world
    }

    fn camera(&self) -> &Camera {
        &self.camera
    }

    fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    fn toggle_wireframe(&mut self) {
        self.render_wireframe = !self.render_wireframe;
    }
}

// =============================================================================
// Loaded level
// =============================================================================

/// Block meshes generated from a level map, lit by one positional light.
pub struct LoadedLevelState {
    world: World,
    camera: Camera,
    controller: CameraController,
    grid: CoordinateGrid,
    render_grid: bool,
    render_wireframe: bool,
}

impl LoadedLevelState {
    /// Loads the map named by `settings.game.level_file`.
    pub fn new(settings: &Settings, aspect_ratio: f64) -> Result<Self, GameStateError> {
        let grid = level::load_blocks(Path::new(&settings.game.level_file))?;
        Self::from_blocks(&grid, settings, aspect_ratio)
    }

    pub fn from_blocks(
        blocks: &BlockGrid,
        settings: &Settings,
        aspect_ratio: f64,
    ) -> Result<Self, GameStateError> {
        let mut world = World::new(level::generate_partial_meshes(blocks));
        world.ambient_light = AmbientLight::new(Color::WHITE, 0.3);

        let light_position = Vec3::new(80.0, 100.0, -120.0);
        world
            .diffuse_lights
            .push(Light::positional(light_position, Color::WHITE, 0.6));
        world
            .specular_lights
            .push(Light::positional(light_position, Color::WHITE, 0.4).with_shininess(8.0));

        let mut camera = settings.render.camera(aspect_ratio)?;
        camera.set_position(Vec3::new(3.0, 3.0, 6.0));

        log::info!(
            "level ready: {} meshes, {} triangles",
            world.meshes.len(),
            world.triangle_count()
        );

        Ok(Self {
            world,
            camera,
            controller: settings.camera.clone(),
            grid: CoordinateGrid::new(),
            render_grid: settings.render.show_grid,
            render_wireframe: settings.render.wireframe,
        })
    }
}

impl GameState for LoadedLevelState {
    fn update(&mut self, delta_time: f64, input: &CameraInput) {
        self.camera.update(delta_time, input, &self.controller);
    }

    fn render(&mut self, renderer: &mut Renderer, buffer: &mut FrameBuffer) {
        if self.render_grid {
            renderer.render_grid(&self.grid, &self.camera, buffer);
        }

        if self.render_wireframe {
            renderer.render_wireframe(&self.world, &self.camera, buffer);
        } else {
            renderer.render_solid(&self.world, &self.camera, buffer);
        }
    }

    fn world(&self) -> &World {
        &self.world
    }

    fn camera(&self) -> &Camera {
        &self.camera
    }

    fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    fn toggle_wireframe(&mut self) {
        self.render_wireframe = !self.render_wireframe;
    }

    fn toggle_grid(&mut self) {
        self.render_grid = !self.render_grid;
    }
}
