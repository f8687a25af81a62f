//! Pitch/yaw/roll orientation in degrees.

use crate::math::vec3::Vec3;

/// Orientation as Euler angles, stored in **degrees**.
///
/// - **Pitch**: rotation around X (positive = look up)
/// - **Yaw**: rotation around Y (positive = turn left, counter-clockwise seen from above)
/// - **Roll**: rotation around the viewing axis
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EulerAngle {
    pub pitch: f64,
    pub yaw: f64,
    pub roll: f64,
}

impl EulerAngle {
    pub const fn new(pitch: f64, yaw: f64, roll: f64) -> Self {
        Self { pitch, yaw, roll }
    }

    /// Unit vector the angle points along. Zero angles look down -Z.
    pub fn direction_vector(&self) -> Vec3 {
        let pitch = self.pitch.to_radians();
        let yaw = self.yaw.to_radians();

        Vec3::new(
            -yaw.sin() * pitch.cos(),
            pitch.sin(),
            -yaw.cos() * pitch.cos(),
        )
    }

    /// Clamps pitch to `[-limit, limit]` and wraps yaw into `[-180, 180]`.
    pub fn normalize(&mut self, pitch_limit: f64) {
        self.pitch = self.pitch.clamp(-pitch_limit, pitch_limit);
        if self.yaw > 180.0 || self.yaw < -180.0 {
            self.yaw = (self.yaw + 180.0).rem_euclid(360.0) - 180.0;
        }
    }
}
