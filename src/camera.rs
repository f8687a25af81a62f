//! First-person camera
//!
//! # Coordinate System
//!
//! Uses a **right-handed** coordinate system:
//! - X: positive right
//! - Y: positive up
//! - Z: positive toward the viewer, so the camera looks down -Z
//!
//! # Orientation
//!
//! Orientation is stored as an [`EulerAngle`] in degrees. Direction vectors,
//! the view and projection matrices and the frustum are derived from it and
//! recomputed together whenever position, orientation or aspect ratio change.
//!
//! - **Yaw**: rotation around Y (positive = turn left)
//! - **Pitch**: rotation around X (positive = look up), clamped to ±89°

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::euler_angle::EulerAngle;
use crate::frustum::{Frustum, FrustumShape};
use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;

/// Pitch is kept short of straight up/down so `right` stays well defined.
pub const PITCH_LIMIT: f64 = 89.0;

#[derive(Debug, Error, PartialEq)]
pub enum CameraError {
    #[error("near plane must be positive, got {0}")]
    InvalidNear(f64),

    #[error("far plane ({far}) must lie beyond the near plane ({near})")]
    InvalidFar { near: f64, far: f64 },
}

/// First-person camera with position, orientation and projection.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    orientation: EulerAngle,

    vertical_fov: f64, // degrees
    aspect_ratio: f64,
    near_z: f64,
    far_z: f64,

    forward: Vec3,
    right: Vec3,
    up: Vec3,
    view_matrix: Mat4,
    projection_matrix: Mat4,
    frustum: Frustum,
}

impl Camera {
    /// Creates a camera at the origin looking down -Z.
    ///
    /// `near_z` must be positive and `far_z` must be greater than `near_z`.
    pub fn new(
        vertical_fov: f64,
        aspect_ratio: f64,
        near_z: f64,
        far_z: f64,
    ) -> Result<Self, CameraError> {
        if near_z <= 0.0 || near_z.is_nan() {
            return Err(CameraError::InvalidNear(near_z));
        }
        if far_z <= near_z || far_z.is_nan() {
            return Err(CameraError::InvalidFar {
                near: near_z,
                far: far_z,
            });
        }

        let mut camera = Self {
            position: Vec3::ZERO,
            orientation: EulerAngle::default(),
            vertical_fov,
            aspect_ratio,
            near_z,
            far_z,
            forward: Vec3::FORWARD,
            right: Vec3::RIGHT,
            up: Vec3::UP,
            view_matrix: Mat4::identity(),
            projection_matrix: Mat4::identity(),
            frustum: Frustum::default(),
        };
        camera.recompute();
        Ok(camera)
    }

    // =========================================================================
    // Derived state
    // =========================================================================

    /// Rebuilds every derived quantity from position, orientation and the
    /// projection parameters.
    fn recompute(&mut self) {
        self.orientation.normalize(PITCH_LIMIT);

        self.forward = self.orientation.direction_vector();
        self.right = self.forward.cross(Vec3::UP).normalize();
        self.up = self.right.cross(self.forward);

        self.view_matrix = Mat4::rotation_x(-self.orientation.pitch.to_radians())
            * Mat4::rotation_y(-self.orientation.yaw.to_radians())
            * Mat4::translation(-self.position.x, -self.position.y, -self.position.z);

        self.projection_matrix = Mat4::perspective(
            self.vertical_fov,
            self.aspect_ratio,
            self.near_z,
            self.far_z,
        );

        self.frustum = Frustum::new(&FrustumShape {
            position: self.position,
            forward: self.forward,
            right: self.right,
            up: self.up,
            vertical_fov: self.vertical_fov,
            aspect_ratio: self.aspect_ratio,
            near_z: self.near_z,
            far_z: self.far_z,
        });
    }

    // =========================================================================
    // Setters
    // =========================================================================

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.recompute();
    }

    pub fn set_orientation(&mut self, orientation: EulerAngle) {
        self.orientation = orientation;
        self.recompute();
    }

    pub fn set_aspect_ratio(&mut self, aspect_ratio: f64) {
        self.aspect_ratio = aspect_ratio;
        self.recompute();
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Applies one tick of mouse look and WASD movement.
    ///
    /// Mouse deltas turn the camera first so movement follows the new heading.
    pub fn update(&mut self, delta_time: f64, input: &CameraInput, controller: &CameraController) {
        let (dx, dy) = input.mouse_delta;
        self.orientation.pitch -= f64::from(dy) * controller.mouse_sensitivity;
        self.orientation.yaw -= f64::from(dx) * controller.mouse_sensitivity;
        self.orientation.normalize(PITCH_LIMIT);

        let forward = self.orientation.direction_vector();
        let right = forward.cross(Vec3::UP).normalize();

        let speed = if input.fast {
            controller.fast_speed
        } else {
            controller.normal_speed
        };
        let step = speed * delta_time;

        if input.forward {
            self.position = self.position + forward * step;
        }
        if input.back {
            self.position = self.position - forward * step;
        }
        if input.right {
            self.position = self.position + right * step;
        }
        if input.left {
            self.position = self.position - right * step;
        }

        self.recompute();
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn orientation(&self) -> EulerAngle {
        self.orientation
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn vertical_fov(&self) -> f64 {
        self.vertical_fov
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    pub fn near_z(&self) -> f64 {
        self.near_z
    }

    pub fn far_z(&self) -> f64 {
        self.far_z
    }

    pub fn view_matrix(&self) -> &Mat4 {
        &self.view_matrix
    }

    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }
}

// =============================================================================
// Camera Controller
// =============================================================================

/// Movement and look state for one update tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CameraInput {
    /// Relative mouse motion in pixels (x right, y down).
    pub mouse_delta: (i32, i32),
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    /// Use the fast movement speed.
    pub fast: bool,
}

/// Speeds and sensitivity for first-person camera movement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraController {
    /// Movement speed in units per second.
    pub normal_speed: f64,
    /// Movement speed while `fast` is held.
    pub fast_speed: f64,
    /// Degrees turned per pixel of mouse motion, independent of tick rate.
    pub mouse_sensitivity: f64,
}

impl Default for CameraController {
    fn default() -> Self {
        Self {
            normal_speed: 1.5,
            fast_speed: 3.0,
            mouse_sensitivity: 0.1,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
