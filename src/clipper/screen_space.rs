//! Screen-space clipping against the viewport edges.
//!
//! Coordinates are in pixels with row 0 at the top. Each vertex also carries
//! its NDC depth, which is interpolated through every cut so the z-buffer
//! sees correct values on clipped edges. The primitive's color and sort depth
//! pass through unchanged.

use crate::color::Color;
use crate::math::vec4::Vec4;

use super::view_space::MAX_CLIP_PASSES;

/// A projected vertex: pixel position plus NDC depth in `[-1, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScreenVertex {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl ScreenVertex {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    fn lerp(&self, other: &Self, t: f64) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
            z: self.z + (other.z - self.z) * t,
        }
    }
}

/// A projected triangle ready for rasterization.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenTriangle {
    pub vertices: [ScreenVertex; 3],
    pub color: Color,
    /// Sort key: the smallest view-space z of the source primitive.
    pub depth: f64,
}

/// A projected line ready for rasterization.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenLine {
    pub vertices: [ScreenVertex; 2],
    pub color: Color,
    /// Sort key: the smallest view-space z of the source primitive.
    pub depth: f64,
}

/// Pixel extents of the render target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: usize,
    pub height: usize,
}

impl Viewport {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Right-most pixel column.
    pub fn max_x(&self) -> f64 {
        self.width.saturating_sub(1) as f64
    }

    /// Bottom-most pixel row.
    pub fn max_y(&self) -> f64 {
        self.height.saturating_sub(1) as f64
    }

    pub fn half_width(&self) -> f64 {
        self.max_x() / 2.0
    }

    pub fn half_height(&self) -> f64 {
        self.max_y() / 2.0
    }

    /// Perspective-divides a clip-space vertex and maps it to pixels.
    ///
    /// `None` when `w <= 0`, which cannot happen for near-clipped input.
    pub fn project(&self, clip: Vec4) -> Option<ScreenVertex> {
        let ndc = clip.perspective_divide()?;
        let (hw, hh) = (self.half_width(), self.half_height());
        Some(ScreenVertex {
            x: ndc.x * hw + hw,
            y: hh - ndc.y * hh,
            z: ndc.z,
        })
    }
}

#[derive(Clone, Copy, Debug)]
enum Edge {
    Left,
    Right(f64),
    Top,
    Bottom(f64),
}

impl Edge {
    /// Positive = inside.
    fn signed_distance(self, v: &ScreenVertex) -> f64 {
        match self {
            Self::Left => v.x,
            Self::Right(max_x) => max_x - v.x,
            Self::Top => v.y,
            Self::Bottom(max_y) => max_y - v.y,
        }
    }

    /// Cut point on the edge, with the clipped coordinate set exactly.
    fn intersect(self, a: &ScreenVertex, b: &ScreenVertex) -> ScreenVertex {
        let d1 = self.signed_distance(a);
        let d2 = self.signed_distance(b);
        let mut v = a.lerp(b, d1 / (d1 - d2));
        match self {
            Self::Left => v.x = 0.0,
            Self::Right(max_x) => v.x = max_x,
            Self::Top => v.y = 0.0,
            Self::Bottom(max_y) => v.y = max_y,
        }
        v
    }
}

fn edges(viewport: &Viewport) -> [Edge; 4] {
    [
        Edge::Left,
        Edge::Right(viewport.max_x()),
        Edge::Top,
        Edge::Bottom(viewport.max_y()),
    ]
}

fn clip_polygon_against_edge(vertices: &[ScreenVertex], edge: Edge) -> Vec<ScreenVertex> {
    let mut output = Vec::with_capacity(vertices.len() + 1);

    for i in 0..vertices.len() {
        let current = &vertices[i];
        let next = &vertices[(i + 1) % vertices.len()];

        let current_inside = edge.signed_distance(current) >= 0.0;
        let next_inside = edge.signed_distance(next) >= 0.0;

        if current_inside {
            output.push(*current);
            if !next_inside {
                output.push(edge.intersect(current, next));
            }
        } else if next_inside {
            output.push(edge.intersect(current, next));
        }
    }

    output
}

/// Clips a triangle to the viewport and fan-triangulates the result.
pub fn clip_triangle(triangle: &ScreenTriangle, viewport: &Viewport) -> Vec<ScreenTriangle> {
    let mut polygon = triangle.vertices.to_vec();

    for edge in edges(viewport) {
        polygon = clip_polygon_against_edge(&polygon, edge);
        if polygon.len() < 3 {
            return Vec::new();
        }
    }

    (1..polygon.len() - 1)
        .map(|i| ScreenTriangle {
            vertices: [polygon[0], polygon[i], polygon[i + 1]],
            color: triangle.color,
            depth: triangle.depth,
        })
        .collect()
}

const INSIDE: u8 = 0;
const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const TOP: u8 = 4;
const BOTTOM: u8 = 8;

fn outcode(v: &ScreenVertex, viewport: &Viewport) -> u8 {
    let mut code = INSIDE;
    if v.x < 0.0 {
        code |= LEFT;
    } else if v.x > viewport.max_x() {
        code |= RIGHT;
    }
    if v.y < 0.0 {
        code |= TOP;
    } else if v.y > viewport.max_y() {
        code |= BOTTOM;
    }
    code
}

/// Clips a line to the viewport, or returns `None` when it misses entirely.
pub fn clip_line(line: &ScreenLine, viewport: &Viewport) -> Option<ScreenLine> {
    let [mut a, mut b] = line.vertices;
    let mut code_a = outcode(&a, viewport);
    let mut code_b = outcode(&b, viewport);

    for _ in 0..MAX_CLIP_PASSES {
        if code_a & code_b != 0 {
            return None;
        }
        if code_a | code_b == INSIDE {
            return Some(ScreenLine {
                vertices: [a, b],
                ..*line
            });
        }

        let selected = if code_a != INSIDE { code_a } else { code_b };
        let edge = if selected & LEFT != 0 {
            Edge::Left
        } else if selected & RIGHT != 0 {
            Edge::Right(viewport.max_x())
        } else if selected & TOP != 0 {
            Edge::Top
        } else {
            Edge::Bottom(viewport.max_y())
        };

        if code_a != INSIDE {
            a = edge.intersect(&a, &b);
            code_a = outcode(&a, viewport);
        } else {
            b = edge.intersect(&b, &a);
            code_b = outcode(&b, viewport);
        }
    }

    log::warn!(
        "screen-space line clip did not settle after {MAX_CLIP_PASSES} passes: {:?} -> {:?}",
        line.vertices[0],
        line.vertices[1]
    );
    None
}
