//! Point, line and triangle rasterization.
//!
//! Triangles go through the [`Rasterizer`] trait so the renderer can switch
//! between the two fill strategies at runtime:
//! - [`ScanlineRasterizer`]: no depth test, correct only in back-to-front order
//! - [`DepthScanlineRasterizer`]: per-pixel z-buffer test

mod line;
mod scanline;

pub use line::{draw_line, draw_point};
pub use scanline::{
    draw_triangle, draw_triangle_with_depth, DepthScanlineRasterizer, ScanlineRasterizer,
};

use serde::{Deserialize, Serialize};

use super::framebuffer::FrameBuffer;
use crate::clipper::{ScreenTriangle, ScreenVertex};

/// A vertex snapped to the pixel grid, keeping its depth.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelVertex {
    pub x: i32,
    pub y: i32,
    pub z: f64,
}

impl From<ScreenVertex> for PixelVertex {
    /// Rounds to the nearest pixel centre.
    fn from(v: ScreenVertex) -> Self {
        Self {
            x: (v.x + 0.5).floor() as i32,
            y: (v.y + 0.5).floor() as i32,
            z: v.z,
        }
    }
}

/// Trait for triangle fill strategies.
pub trait Rasterizer {
    /// Fill a screen-space triangle with its flat color.
    fn fill_triangle(&self, triangle: &ScreenTriangle, buffer: &mut FrameBuffer);
}

/// How solid geometry resolves visibility.
///
/// Primitives are always sorted back to front; `ZBuffer` additionally tests
/// every pixel against the depth buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DepthMode {
    #[default]
    PainterSort,
    ZBuffer,
}

impl std::fmt::Display for DepthMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DepthMode::PainterSort => write!(f, "PainterSort"),
            DepthMode::ZBuffer => write!(f, "ZBuffer"),
        }
    }
}

/// Holds both fill strategies and forwards to the active one.
pub struct RasterizerDispatcher {
    scanline: ScanlineRasterizer,
    depth_scanline: DepthScanlineRasterizer,
    active: DepthMode,
}

impl RasterizerDispatcher {
    pub fn new(depth_mode: DepthMode) -> Self {
        Self {
            scanline: ScanlineRasterizer::new(),
            depth_scanline: DepthScanlineRasterizer::new(),
            active: depth_mode,
        }
    }

    pub fn set_mode(&mut self, depth_mode: DepthMode) {
        self.active = depth_mode;
    }

    pub fn mode(&self) -> DepthMode {
        self.active
    }
}

impl Rasterizer for RasterizerDispatcher {
    #[inline]
    fn fill_triangle(&self, triangle: &ScreenTriangle, buffer: &mut FrameBuffer) {
        match self.active {
            DepthMode::PainterSort => self.scanline.fill_triangle(triangle, buffer),
            DepthMode::ZBuffer => self.depth_scanline.fill_triangle(triangle, buffer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn triangle(z: f64, color: Color) -> ScreenTriangle {
        ScreenTriangle {
            vertices: [
                ScreenVertex::new(0.0, 0.0, z),
                ScreenVertex::new(6.0, 0.0, z),
                ScreenVertex::new(0.0, 6.0, z),
            ],
            color,
            depth: -1.0,
        }
    }

    #[test]
    fn pixel_vertex_rounds_to_nearest() {
        let p = PixelVertex::from(ScreenVertex::new(2.49, 2.5, 0.3));
        assert_eq!((p.x, p.y, p.z), (2, 3, 0.3));
    }

    #[test]
    fn dispatcher_follows_depth_mode() {
        let near = triangle(0.1, Color::GREEN);
        let far = triangle(0.5, Color::RED);

        let mut dispatcher = RasterizerDispatcher::new(DepthMode::PainterSort);
        let mut fb = FrameBuffer::new(8, 8);
        dispatcher.fill_triangle(&near, &mut fb);
        dispatcher.fill_triangle(&far, &mut fb);
        assert_eq!(fb.get_pixel(1, 1), Some(Color::RED.packed()));

        dispatcher.set_mode(DepthMode::ZBuffer);
        assert_eq!(dispatcher.mode(), DepthMode::ZBuffer);
        let mut fb = FrameBuffer::new(8, 8);
        dispatcher.fill_triangle(&near, &mut fb);
        dispatcher.fill_triangle(&far, &mut fb);
        assert_eq!(fb.get_pixel(1, 1), Some(Color::GREEN.packed()));
    }
}
