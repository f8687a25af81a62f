//! 4x4 transformation matrix using column-vector convention.
//!
//! # Convention
//! - Vectors are **column vectors** on the right: `Mat4 * Vec`
//! - Translation is stored in the **last column**
//! - Transforms chain **right-to-left**: `A * B * v` applies B first, then A
//! - Rotations are right-handed: a positive angle turns counter-clockwise
//!   when looking down the rotation axis toward the origin
//!
//! # Example
//! ```ignore
//! let transform = rotation * scale;  // scale applied first, then rotation
//! let result = transform * vertex;   // transform the vertex
//! ```

use std::ops::Mul;

use super::vec3::Vec3;
use super::vec4::Vec4;

/// 4x4 matrix stored as `data[row][col]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    data: [[f64; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mat4 {
    pub fn new(data: [[f64; 4]; 4]) -> Self {
        Mat4 { data }
    }

    pub fn identity() -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a translation matrix.
    pub fn translation(x: f64, y: f64, z: f64) -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, x],
            [0.0, 1.0, 0.0, y],
            [0.0, 0.0, 1.0, z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a scale matrix.
    pub fn scaling(x: f64, y: f64, z: f64) -> Self {
        Mat4::new([
            [x, 0.0, 0.0, 0.0],
            [0.0, y, 0.0, 0.0],
            [0.0, 0.0, z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation matrix around the X axis (radians).
    pub fn rotation_x(angle: f64) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, -s, 0.0],
            [0.0, s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation matrix around the Y axis (radians).
    pub fn rotation_y(angle: f64) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Mat4::new([
            [c, 0.0, s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [-s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation matrix around the Z axis (radians).
    pub fn rotation_z(angle: f64) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Mat4::new([
            [c, -s, 0.0, 0.0],
            [s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates an OpenGL-style perspective projection.
    ///
    /// The camera looks down -Z. View-space depths in `[-far, -near]` map to
    /// clip-space `z` in `[-w, w]`, i.e. NDC depth in `[-1, 1]`.
    ///
    /// # Arguments
    ///
    /// * `vertical_fov` - Vertical field of view in **degrees**
    /// * `aspect_ratio` - Width divided by height
    /// * `near` - Distance to the near plane (must be > 0)
    /// * `far` - Distance to the far plane (must be > near)
    pub fn perspective(vertical_fov: f64, aspect_ratio: f64, near: f64, far: f64) -> Self {
        let f = 1.0 / (vertical_fov.to_radians() / 2.0).tan();
        Mat4::new([
            [f / aspect_ratio, 0.0, 0.0, 0.0],
            [0.0, f, 0.0, 0.0],
            [
                0.0,
                0.0,
                (near + far) / (near - far),
                (2.0 * near * far) / (near - far),
            ],
            [0.0, 0.0, -1.0, 0.0],
        ])
    }

    /// Transforms a point (w=1) and drops the resulting w.
    ///
    /// Only meaningful for affine matrices (world and view transforms).
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        (*self * Vec4::from(p)).to_vec3()
    }

    /// Access element at [row][col].
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row][col]
    }
}

/// Matrix multiplication: Mat4 * Mat4.
///
/// For column-vector convention, `A * B * v` applies B first, then A.
impl Mul<Mat4> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut result = [[0.0f64; 4]; 4];

        for (row, out_row) in result.iter_mut().enumerate() {
            for (col, out) in out_row.iter_mut().enumerate() {
                *out = self.data[row][0] * rhs.data[0][col]
                    + self.data[row][1] * rhs.data[1][col]
                    + self.data[row][2] * rhs.data[2][col]
                    + self.data[row][3] * rhs.data[3][col];
            }
        }

        Mat4::new(result)
    }
}

/// Transform a Vec4 by a matrix: Mat4 * Vec4 (column vector).
impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    fn mul(self, v: Vec4) -> Self::Output {
        Vec4::new(
            self.data[0][0] * v.x
                + self.data[0][1] * v.y
                + self.data[0][2] * v.z
                + self.data[0][3] * v.w,
            self.data[1][0] * v.x
                + self.data[1][1] * v.y
                + self.data[1][2] * v.z
                + self.data[1][3] * v.w,
            self.data[2][0] * v.x
                + self.data[2][1] * v.y
                + self.data[2][2] * v.z
                + self.data[2][3] * v.w,
            self.data[3][0] * v.x
                + self.data[3][1] * v.y
                + self.data[3][2] * v.z
                + self.data[3][3] * v.w,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn translation_moves_points_but_not_directions() {
        let m = Mat4::translation(1.0, 2.0, 3.0);
        assert_eq!(m * Vec4::point(0.0, 0.0, 0.0), Vec4::point(1.0, 2.0, 3.0));
        assert_eq!(
            m * Vec4::new(1.0, 0.0, 0.0, 0.0),
            Vec4::new(1.0, 0.0, 0.0, 0.0)
        );
    }

    #[test]
    fn rotations_are_counter_clockwise() {
        let y = Mat4::rotation_z(FRAC_PI_2).transform_point(Vec3::RIGHT);
        assert_relative_eq!(y.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(y.y, 1.0, epsilon = 1e-12);

        let z = Mat4::rotation_x(FRAC_PI_2).transform_point(Vec3::UP);
        assert_relative_eq!(z.z, 1.0, epsilon = 1e-12);

        let x = Mat4::rotation_y(FRAC_PI_2).transform_point(Vec3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(x.x, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn multiplication_applies_right_operand_first() {
        let m = Mat4::translation(5.0, 0.0, 0.0) * Mat4::scaling(2.0, 2.0, 2.0);
        let p = m.transform_point(Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(p, Vec3::new(7.0, 2.0, 2.0));
    }

    #[test]
    fn perspective_maps_near_and_far_to_ndc_bounds() {
        let p = Mat4::perspective(90.0, 1.0, 1.0, 10.0);

        let near = (p * Vec4::point(0.0, 0.0, -1.0))
            .perspective_divide()
            .unwrap();
        let far = (p * Vec4::point(0.0, 0.0, -10.0))
            .perspective_divide()
            .unwrap();

        assert_relative_eq!(near.z, -1.0, epsilon = 1e-12);
        assert_relative_eq!(far.z, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn perspective_w_is_view_distance() {
        let p = Mat4::perspective(60.0, 16.0 / 9.0, 0.1, 100.0);
        let clip = p * Vec4::point(1.0, 2.0, -7.0);
        assert_relative_eq!(clip.w, 7.0, epsilon = 1e-12);
    }
}
