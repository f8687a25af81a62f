//! View-space clipping against the near and far planes.
//!
//! The camera looks down -Z, so a point is between the planes when
//! `-far <= z <= -near`. Clipping here, before projection, keeps every vertex
//! that reaches the perspective divide strictly in front of the camera.
//!
//! Triangles use Sutherland-Hodgman followed by fan triangulation; lines use
//! an outcode loop with an explicit pass limit. New vertices have their `z`
//! snapped exactly onto the plane they were cut against.

use crate::color::Color;
use crate::math::vec4::Vec4;

/// Slack for plane membership, so snapped vertices never re-trigger a cut.
pub const TOLERANCE: f64 = f64::EPSILON * 100.0;

/// Upper bound on outcode iterations for one line.
pub const MAX_CLIP_PASSES: usize = 6;

const INSIDE: u8 = 0;
const NEAR: u8 = 1;
const FAR: u8 = 2;

/// A shaded triangle in view space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTriangle {
    pub vertices: [Vec4; 3],
    pub color: Color,
}

/// A colored line segment in view space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewLine {
    pub vertices: [Vec4; 2],
    pub color: Color,
}

/// Near/far distances (both positive) and whether the far plane clips.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DepthRange {
    pub near_z: f64,
    pub far_z: f64,
    pub clip_far: bool,
}

impl DepthRange {
    pub fn new(near_z: f64, far_z: f64) -> Self {
        Self {
            near_z,
            far_z,
            clip_far: true,
        }
    }

    /// Same range with far clipping turned off.
    pub fn near_only(self) -> Self {
        Self {
            clip_far: false,
            ..self
        }
    }

    fn outcode(&self, v: &Vec4) -> u8 {
        let mut code = INSIDE;
        if v.z - TOLERANCE > -self.near_z {
            code |= NEAR;
        } else if self.clip_far && v.z + TOLERANCE < -self.far_z {
            code |= FAR;
        }
        code
    }
}

/// One of the two clipping planes, holding its view-space z.
#[derive(Clone, Copy, Debug)]
enum ZPlane {
    /// Keeps `z <= plane_z`.
    Near(f64),
    /// Keeps `z >= plane_z`.
    Far(f64),
}

impl ZPlane {
    fn z(self) -> f64 {
        match self {
            Self::Near(z) | Self::Far(z) => z,
        }
    }

    /// Positive = inside.
    fn signed_distance(self, v: &Vec4) -> f64 {
        match self {
            Self::Near(z) => z - v.z,
            Self::Far(z) => v.z - z,
        }
    }
}

/// Point where segment `a -> b` meets the plane `z = plane_z`.
fn intersect(a: &Vec4, b: &Vec4, plane_z: f64) -> Vec4 {
    let k = (plane_z - a.z) / (b.z - a.z);
    let mut v = a.lerp(*b, k);
    v.z = plane_z;
    v
}

/// A convex polygon produced while clipping one triangle.
struct ViewPolygon {
    vertices: Vec<Vec4>,
}

impl ViewPolygon {
    fn is_empty(&self) -> bool {
        self.vertices.len() < 3
    }

    fn clip_against_plane(&self, plane: ZPlane) -> Self {
        if self.is_empty() {
            return Self { vertices: vec![] };
        }

        let mut output = Vec::with_capacity(self.vertices.len() + 1);

        for i in 0..self.vertices.len() {
            let current = &self.vertices[i];
            let next = &self.vertices[(i + 1) % self.vertices.len()];

            let current_inside = plane.signed_distance(current) >= -TOLERANCE;
            let next_inside = plane.signed_distance(next) >= -TOLERANCE;

            if current_inside {
                output.push(*current);
                if !next_inside {
                    output.push(intersect(current, next, plane.z()));
                }
            } else if next_inside {
                output.push(intersect(current, next, plane.z()));
            }
        }

        Self { vertices: output }
    }

    /// Fan from vertex 0.
    fn triangulate(&self) -> impl Iterator<Item = [Vec4; 3]> + '_ {
        (1..self.vertices.len().saturating_sub(1))
            .map(move |i| [self.vertices[0], self.vertices[i], self.vertices[i + 1]])
    }
}

/// Clips a triangle to the depth range.
///
/// Returns nothing when it lies fully outside, the triangle itself when fully
/// inside, and up to one extra triangle per plane it straddles.
pub fn clip_triangle(triangle: &ViewTriangle, range: &DepthRange) -> Vec<ViewTriangle> {
    let codes = triangle.vertices.map(|v| range.outcode(&v));
    if codes.iter().all(|&c| c == INSIDE) {
        return vec![*triangle];
    }
    if codes[0] & codes[1] & codes[2] != 0 {
        return Vec::new();
    }

    let mut polygon = ViewPolygon {
        vertices: triangle.vertices.to_vec(),
    }
    .clip_against_plane(ZPlane::Near(-range.near_z));

    if range.clip_far && !polygon.is_empty() {
        polygon = polygon.clip_against_plane(ZPlane::Far(-range.far_z));
    }

    polygon
        .triangulate()
        .map(|vertices| ViewTriangle {
            vertices,
            color: triangle.color,
        })
        .collect()
}

/// Clips a line to the depth range, or returns `None` when nothing of it
/// remains.
pub fn clip_line(line: &ViewLine, range: &DepthRange) -> Option<ViewLine> {
    let [mut a, mut b] = line.vertices;
    let mut code_a = range.outcode(&a);
    let mut code_b = range.outcode(&b);

    for _ in 0..MAX_CLIP_PASSES {
        if code_a & code_b != 0 {
            return None;
        }
        if code_a | code_b == INSIDE {
            return Some(ViewLine {
                vertices: [a, b],
                color: line.color,
            });
        }

        let selected = if code_a != INSIDE { code_a } else { code_b };
        let plane_z = if selected & NEAR != 0 {
            -range.near_z
        } else {
            -range.far_z
        };

        if code_a != INSIDE {
            a = intersect(&a, &b, plane_z);
            code_a = range.outcode(&a);
        } else {
            b = intersect(&b, &a, plane_z);
            code_b = range.outcode(&b);
        }
    }

    log::warn!(
        "view-space line clip did not settle after {MAX_CLIP_PASSES} passes: {:?} -> {:?}",
        line.vertices[0],
        line.vertices[1]
    );
    None
}

pub fn clip_triangles(triangles: &[ViewTriangle], range: &DepthRange) -> Vec<ViewTriangle> {
    triangles
        .iter()
        .flat_map(|t| clip_triangle(t, range))
        .collect()
}

pub fn clip_lines(lines: &[ViewLine], range: &DepthRange) -> Vec<ViewLine> {
    lines.iter().filter_map(|l| clip_line(l, range)).collect()
}
