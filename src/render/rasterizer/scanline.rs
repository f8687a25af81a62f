//! Scanline triangle fill.
//!
//! # Algorithm Overview
//!
//! 1. **Sort vertices** by Y (top to bottom in screen space)
//! 2. **Top half**: walk rows `y0..=y1` from the top vertex, stepping both
//!    edge x positions by their inverse slopes
//! 3. **Bottom half**: walk rows `y2` up to `y1` from the bottom vertex,
//!    skipping the middle row if the top half already drew it
//!
//! ```text
//!        v0
//!        /\
//!       /  \          walked downward from v0
//!      /----\ v1      <- middle row, drawn once
//!      \    |
//!       \   |         walked upward from v2
//!        \  |
//!         \ |
//!          v2
//! ```
//!
//! In each half the edge with the smaller inverse slope is the left one.
//! Spans cover `round(left)..=round(right)` and are clamped to the buffer.
//!
//! The depth variant carries z along both edges and interpolates it across
//! each span, writing only pixels nearer than the stored depth.

use super::{PixelVertex, Rasterizer};
use crate::clipper::ScreenTriangle;
use crate::render::framebuffer::FrameBuffer;

#[inline]
fn round(x: f64) -> i32 {
    (x + 0.5).floor() as i32
}

/// Sorts by ascending y: `v0.y <= v1.y <= v2.y`.
fn sort_vertices(vertices: [PixelVertex; 3]) -> [PixelVertex; 3] {
    let [mut v0, mut v1, mut v2] = vertices;
    if v0.y > v1.y {
        std::mem::swap(&mut v0, &mut v1);
    }
    if v0.y > v2.y {
        std::mem::swap(&mut v0, &mut v2);
    }
    if v1.y > v2.y {
        std::mem::swap(&mut v1, &mut v2);
    }
    [v0, v1, v2]
}

/// One edge walked row by row: x and z plus their per-row steps.
#[derive(Clone, Copy)]
struct EdgeWalk {
    x: f64,
    z: f64,
    dx: f64,
    dz: f64,
}

impl EdgeWalk {
    /// Edge leaving `from` toward `to`, stepping one row per call to
    /// [`EdgeWalk::step`] in the direction of `to`.
    fn new(from: PixelVertex, to: PixelVertex) -> Self {
        let rows = f64::from((to.y - from.y).abs());
        Self {
            x: f64::from(from.x),
            z: from.z,
            dx: f64::from(to.x - from.x) / rows,
            dz: (to.z - from.z) / rows,
        }
    }

    fn step(&mut self) {
        self.x += self.dx;
        self.z += self.dz;
    }
}

/// Orders two edges sharing a start vertex so the smaller x step is first.
fn left_right(a: EdgeWalk, b: EdgeWalk) -> (EdgeWalk, EdgeWalk) {
    if a.dx > b.dx {
        (b, a)
    } else {
        (a, b)
    }
}

/// Walks both halves, calling `span(y, left, right)` once per row.
fn walk_triangle(vertices: [PixelVertex; 3], mut span: impl FnMut(i32, &EdgeWalk, &EdgeWalk)) {
    let [v0, v1, v2] = sort_vertices(vertices);
    let mut middle_line_drawn = false;

    if v0.y != v1.y {
        let (mut left, mut right) = left_right(EdgeWalk::new(v0, v1), EdgeWalk::new(v0, v2));
        middle_line_drawn = true;

        for y in v0.y..=v1.y {
            span(y, &left, &right);
            left.step();
            right.step();
        }
    }

    if v1.y != v2.y {
        let (mut left, mut right) = left_right(EdgeWalk::new(v2, v1), EdgeWalk::new(v2, v0));
        let stop = if middle_line_drawn { v1.y + 1 } else { v1.y };

        for y in (stop..=v2.y).rev() {
            span(y, &left, &right);
            left.step();
            right.step();
        }
    }
}

/// Fills a triangle with a flat color, without depth testing.
pub fn draw_triangle(buffer: &mut FrameBuffer, vertices: [PixelVertex; 3], color: u32) {
    walk_triangle(vertices, |y, left, right| {
        buffer.fill_span(y, round(left.x), round(right.x), color);
    });
}

/// Fills a triangle with a flat color, writing only pixels that pass the
/// depth test.
pub fn draw_triangle_with_depth(buffer: &mut FrameBuffer, vertices: [PixelVertex; 3], color: u32) {
    let max_x = buffer.width() as i32 - 1;

    walk_triangle(vertices, |y, left, right| {
        let (x_start, x_end) = (round(left.x), round(right.x));
        let width = x_end - x_start;

        for x in x_start.max(0)..=x_end.min(max_x) {
            let t = if width > 0 {
                f64::from(x - x_start) / f64::from(width)
            } else {
                0.0
            };
            let z = left.z + (right.z - left.z) * t;
            buffer.set_pixel_with_depth(x, y, z, color);
        }
    });
}

/// Flat-color scanline fill with no depth test; relies on draw order.
pub struct ScanlineRasterizer;

impl ScanlineRasterizer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ScanlineRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer for ScanlineRasterizer {
    fn fill_triangle(&self, triangle: &ScreenTriangle, buffer: &mut FrameBuffer) {
        let vertices = triangle.vertices.map(PixelVertex::from);
        draw_triangle(buffer, vertices, triangle.color.packed());
    }
}

/// Scanline fill with a per-pixel z-buffer test.
pub struct DepthScanlineRasterizer;

impl DepthScanlineRasterizer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DepthScanlineRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer for DepthScanlineRasterizer {
    fn fill_triangle(&self, triangle: &ScreenTriangle, buffer: &mut FrameBuffer) {
        let vertices = triangle.vertices.map(PixelVertex::from);
        draw_triangle_with_depth(buffer, vertices, triangle.color.packed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const INK: u32 = 0xffffffff;
    const RED: u32 = 0xff0000ff;
    const GREEN: u32 = 0xff00ff00;

    fn v(x: i32, y: i32, z: f64) -> PixelVertex {
        PixelVertex { x, y, z }
    }

    fn count(buffer: &FrameBuffer, color: u32) -> usize {
        buffer.pixels().iter().filter(|&&p| p == color).count()
    }

    #[test]
    fn right_triangle_coverage() {
        let mut fb = FrameBuffer::new(8, 8);
        draw_triangle(&mut fb, [v(0, 0, 0.0), v(4, 0, 0.0), v(0, 4, 0.0)], INK);

        // Staircase of rows 5, 4, 3, 2, 1 pixels wide.
        assert_eq!(count(&fb, INK), 15);
        assert_eq!(fb.get_pixel(4, 0), Some(INK));
        assert_eq!(fb.get_pixel(2, 2), Some(INK));
        assert_eq!(fb.get_pixel(0, 4), Some(INK));
        assert_ne!(fb.get_pixel(1, 4), Some(INK));
        assert_ne!(fb.get_pixel(5, 0), Some(INK));
    }

    #[test]
    fn vertex_order_does_not_matter() {
        let a = [v(1, 1, 0.0), v(6, 3, 0.0), v(2, 7, 0.0)];
        let orders = [[0, 1, 2], [2, 1, 0], [1, 0, 2], [2, 0, 1]];

        let mut expected = FrameBuffer::new(8, 8);
        draw_triangle(&mut expected, a, INK);

        for order in orders {
            let mut fb = FrameBuffer::new(8, 8);
            draw_triangle(&mut fb, order.map(|i| a[i]), INK);
            assert_eq!(fb.pixels(), expected.pixels(), "order {order:?}");
        }
    }

    #[test]
    fn general_triangle_covers_every_row() {
        let mut fb = FrameBuffer::new(10, 10);
        draw_triangle(&mut fb, [v(4, 0, 0.0), v(0, 4, 0.0), v(8, 8, 0.0)], INK);

        for y in 0..=8 {
            assert!(
                (0..10).any(|x| fb.get_pixel(x, y) == Some(INK)),
                "row {y} is empty"
            );
        }
        assert_eq!(fb.get_pixel(0, 4), Some(INK));
    }

    #[test]
    fn zero_height_triangle_draws_nothing() {
        let mut fb = FrameBuffer::new(8, 8);
        draw_triangle(&mut fb, [v(1, 3, 0.0), v(5, 3, 0.0), v(3, 3, 0.0)], INK);
        // All three share a row: nothing is walked.
        assert_eq!(count(&fb, INK), 0);

        draw_triangle(&mut fb, [v(1, 3, 0.0), v(5, 3, 0.0), v(3, 4, 0.0)], INK);
        assert!(count(&fb, INK) > 0);
    }

    #[test]
    fn off_screen_parts_are_clamped() {
        let mut fb = FrameBuffer::new(4, 4);
        draw_triangle(&mut fb, [v(-5, -5, 0.0), v(10, -5, 0.0), v(-5, 10, 0.0)], INK);
        // Hypotenuse is x + y = 5.
        assert_eq!(fb.get_pixel(0, 0), Some(INK));
        assert_eq!(fb.get_pixel(3, 0), Some(INK));
        assert_eq!(fb.get_pixel(1, 3), Some(INK));
        assert_ne!(fb.get_pixel(3, 3), Some(INK));
    }

    #[test]
    fn nearer_triangle_wins_regardless_of_order() {
        let near = [v(0, 0, 0.1), v(7, 0, 0.1), v(0, 7, 0.1)];
        let far = [v(0, 0, 0.9), v(7, 0, 0.9), v(0, 7, 0.9)];

        let mut fb = FrameBuffer::new(8, 8);
        draw_triangle_with_depth(&mut fb, near, GREEN);
        draw_triangle_with_depth(&mut fb, far, RED);
        assert_eq!(count(&fb, RED), 0);

        let mut fb = FrameBuffer::new(8, 8);
        draw_triangle_with_depth(&mut fb, far, RED);
        draw_triangle_with_depth(&mut fb, near, GREEN);
        assert_eq!(count(&fb, RED), 0);
        assert!(count(&fb, GREEN) > 0);
    }

    #[test]
    fn depth_is_interpolated_across_spans() {
        let mut fb = FrameBuffer::new(10, 10);
        draw_triangle_with_depth(&mut fb, [v(0, 0, 0.0), v(8, 0, 0.8), v(0, 8, 0.0)], INK);

        assert_relative_eq!(fb.get_depth(4, 2).unwrap(), 0.4, epsilon = 1e-9);
        assert_relative_eq!(fb.get_depth(0, 5).unwrap(), 0.0, epsilon = 1e-9);
    }
}
