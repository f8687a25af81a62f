//! A CPU software 3D renderer for block-built maze levels.
//!
//! Meshes, a camera and lights go through model, view and projection space,
//! get clipped against the near/far planes and the screen edges, are shaded
//! per triangle and finally rasterized into a [`FrameBuffer`] owned by the
//! caller. SDL2 is only used by the optional `window` feature to show the
//! result.
//!
//! # Quick Start
//!
//! ```ignore
//! use mazing::prelude::*;
//!
//! let mut world = World::new(vec![Mesh::cube(Color::RED)]);
//! let mut camera = Camera::new(90.0, 4.0 / 3.0, 0.1, 100.0)?;
//! camera.set_position(Vec3::new(0.0, 0.0, 5.0));
//!
//! let mut framebuffer = FrameBuffer::new(320, 240);
//! let mut renderer = Renderer::default();
//! renderer.render_solid(&world, &camera, &mut framebuffer);
//! ```

pub mod camera;
pub mod clipper;
pub mod color;
pub mod config;
pub mod engine;
pub mod euler_angle;
pub mod fps_counter;
pub mod frustum;
pub mod game_state;
pub mod level;
pub mod light;
pub mod lighting;
pub mod math;
pub mod mesh;
pub mod plane;
pub mod render;
pub mod transform;
#[cfg(feature = "window")]
pub mod window;
pub mod world;

pub use camera::{Camera, CameraError};
pub use color::Color;
pub use engine::Engine;
pub use mesh::{Mesh, MeshError};
pub use render::{FrameBuffer, Renderer};
pub use world::World;

/// Prelude module for convenient imports.
pub mod prelude {
    // Scene
    pub use crate::camera::{Camera, CameraController, CameraInput};
    pub use crate::euler_angle::EulerAngle;
    pub use crate::light::{AmbientLight, Light, LightSource};
    pub use crate::mesh::{CubeFaces, Mesh};
    pub use crate::transform::Transform;
    pub use crate::world::World;

    // Color
    pub use crate::color::Color;

    // Math
    pub use crate::math::{Mat4, Vec3, Vec4};

    // Rendering
    pub use crate::render::{CoordinateGrid, DepthMode, FrameBuffer, RenderOptions, Renderer};

    // Engine
    pub use crate::config::Settings;
    pub use crate::engine::Engine;
    pub use crate::game_state::GameState;
}
