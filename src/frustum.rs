//! View frustum used for whole-mesh visibility culling.

use crate::math::vec3::Vec3;
use crate::plane::Plane;

/// Index of each plane inside [`Frustum::planes`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrustumPlane {
    Top = 0,
    Bottom = 1,
    Left = 2,
    Right = 3,
    Near = 4,
    Far = 5,
}

/// Camera parameters a frustum is built from.
#[derive(Clone, Copy, Debug)]
pub struct FrustumShape {
    pub position: Vec3,
    pub forward: Vec3,
    pub right: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees.
    pub vertical_fov: f64,
    pub aspect_ratio: f64,
    pub near_z: f64,
    pub far_z: f64,
}

/// Six inward-facing planes in world space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Frustum {
    planes: [Plane; 6],
}

impl Frustum {
    /// Builds the planes from the 8 corner points of the near and far rectangles.
    pub fn new(shape: &FrustumShape) -> Self {
        let tangent = (shape.vertical_fov.to_radians() / 2.0).tan();
        let near_half_height = tangent * shape.near_z;
        let near_half_width = near_half_height * shape.aspect_ratio;
        let far_half_height = tangent * shape.far_z;
        let far_half_width = far_half_height * shape.aspect_ratio;

        let origin = shape.position;
        let near_forward = shape.forward * shape.near_z;
        let near_up = shape.up * near_half_height;
        let near_right = shape.right * near_half_width;
        let far_forward = shape.forward * shape.far_z;
        let far_up = shape.up * far_half_height;
        let far_right = shape.right * far_half_width;

        let ntl = origin + near_forward + near_up - near_right;
        let ntr = origin + near_forward + near_up + near_right;
        let nbr = origin + near_forward - near_up + near_right;
        let nbl = origin + near_forward - near_up - near_right;

        let ftl = origin + far_forward + far_up - far_right;
        let ftr = origin + far_forward + far_up + far_right;
        let fbr = origin + far_forward - far_up + far_right;
        let fbl = origin + far_forward - far_up - far_right;

        let mut planes = [Plane::default(); 6];
        planes[FrustumPlane::Top as usize] = Plane::from_points(ntl, ftl, ftr);
        planes[FrustumPlane::Bottom as usize] = Plane::from_points(nbl, fbr, fbl);
        planes[FrustumPlane::Left as usize] = Plane::from_points(ntl, fbl, ftl);
        planes[FrustumPlane::Right as usize] = Plane::from_points(ntr, ftr, fbr);
        planes[FrustumPlane::Near as usize] = Plane::from_points(ntl, ntr, nbr);
        planes[FrustumPlane::Far as usize] = Plane::from_points(ftr, ftl, fbl);

        Self { planes }
    }

    pub fn plane(&self, which: FrustumPlane) -> &Plane {
        &self.planes[which as usize]
    }

    pub fn point_is_inside(&self, p: Vec3) -> bool {
        self.planes.iter().all(|plane| plane.point_distance(p) >= 0.0)
    }

    /// Returns false only when the sphere lies completely outside one plane.
    pub fn sphere_is_inside(&self, center: Vec3, radius: f64) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.point_distance(center) + radius >= 0.0)
    }
}
