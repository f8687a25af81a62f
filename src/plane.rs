//! Infinite plane in Hessian normal form.

use crate::math::vec3::Vec3;

/// A plane stored as a unit normal and signed distance from the origin.
///
/// `point_distance` is positive on the side the normal points to.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub distance: f64,
}

impl Plane {
    /// Builds the plane through three points.
    ///
    /// The normal is `cross(p1 - p0, p2 - p0)`, so the points wind
    /// counter-clockwise when seen from the positive side. Collinear points
    /// yield a zero normal, for which every distance is zero.
    pub fn from_points(p0: Vec3, p1: Vec3, p2: Vec3) -> Self {
        let normal = (p1 - p0).cross(p2 - p0);
        let length = normal.magnitude();
        if length <= f64::EPSILON {
            return Self::default();
        }

        Self {
            normal: normal / length,
            distance: -normal.dot(p0) / length,
        }
    }

    /// Signed distance from the plane to `p`.
    pub fn point_distance(&self, p: Vec3) -> f64 {
        p.dot(self.normal) + self.distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn distance_sign_follows_normal() {
        let plane = Plane::from_points(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, -1.0),
        );

        assert!(plane.point_distance(Vec3::new(0.0, 1.0, 0.0)) > 0.0);
        assert!(plane.point_distance(Vec3::new(0.0, -1.0, 0.0)) < 0.0);
    }

    #[test]
    fn offset_plane_measures_true_distance() {
        let plane = Plane::from_points(
            Vec3::new(0.0, 2.0, 0.0),
            Vec3::new(3.0, 2.0, 0.0),
            Vec3::new(0.0, 2.0, -3.0),
        );

        assert_relative_eq!(plane.point_distance(Vec3::new(5.0, 7.0, 1.0)), 5.0);
        assert_relative_eq!(plane.point_distance(Vec3::ZERO), -2.0);
    }
}
