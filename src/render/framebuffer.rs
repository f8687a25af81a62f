//! Owned color and depth buffers with bounds-checked pixel access.
//!
//! Pixels are packed `0xAABBGGRR` (see [`Color::packed`]), so the byte view
//! returned by [`FrameBuffer::as_bytes`] is RGBA order on little-endian
//! targets. The depth buffer holds NDC z, cleared to `+inf`; smaller is
//! closer.

use crate::clipper::Viewport;
use crate::color::Color;

pub struct FrameBuffer {
    color_buffer: Vec<u32>,
    depth_buffer: Vec<f64>,
    width: usize,
    height: usize,
}

impl FrameBuffer {
    /// Creates a buffer cleared to black with an empty depth buffer.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            color_buffer: vec![Color::BLACK.packed(); width * height],
            depth_buffer: vec![f64::INFINITY; width * height],
            width,
            height,
        }
    }

    /// Reallocates both buffers. Contents are cleared.
    pub fn resize(&mut self, width: usize, height: usize) {
        log::debug!("framebuffer resize {}x{} -> {width}x{height}", self.width, self.height);
        *self = Self::new(width, height);
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width - 1) / 2`, the pixel distance from the centre to the edge.
    pub fn half_width(&self) -> f64 {
        self.viewport().half_width()
    }

    /// `(height - 1) / 2`.
    pub fn half_height(&self) -> f64 {
        self.viewport().half_height()
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height.max(1) as f64
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    pub fn clear(&mut self, color: Color) {
        self.color_buffer.fill(color.packed());
    }

    pub fn clear_depth(&mut self) {
        self.depth_buffer.fill(f64::INFINITY);
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && (x as usize) < self.width && y >= 0 && (y as usize) < self.height {
            Some(y as usize * self.width + x as usize)
        } else {
            None
        }
    }

    /// Writes a pixel. Out-of-bounds coordinates are ignored.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if let Some(i) = self.index(x, y) {
            self.color_buffer[i] = color;
        }
    }

    /// Writes a pixel only if `depth` is nearer than what is stored.
    /// Returns whether the pixel was written.
    #[inline]
    pub fn set_pixel_with_depth(&mut self, x: i32, y: i32, depth: f64, color: u32) -> bool {
        match self.index(x, y) {
            Some(i) if depth < self.depth_buffer[i] => {
                self.depth_buffer[i] = depth;
                self.color_buffer[i] = color;
                true
            }
            _ => false,
        }
    }

    /// Fills `x0..=x1` on row `y`, clamped to the buffer.
    pub fn fill_span(&mut self, y: i32, x0: i32, x1: i32, color: u32) {
        if y < 0 || y as usize >= self.height || self.width == 0 {
            return;
        }
        let max_x = self.width as i32 - 1;
        let (start, end) = (x0.max(0), x1.min(max_x));
        if start > end {
            return;
        }
        let row = y as usize * self.width;
        self.color_buffer[row + start as usize..=row + end as usize].fill(color);
    }

    pub fn get_pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|i| self.color_buffer[i])
    }

    pub fn get_depth(&self, x: i32, y: i32) -> Option<f64> {
        self.index(x, y).map(|i| self.depth_buffer[i])
    }

    pub fn pixels(&self) -> &[u32] {
        &self.color_buffer
    }

    /// Raw pixel bytes for presentation, `width * 4` bytes per row.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.color_buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_writes_are_ignored() {
        let mut fb = FrameBuffer::new(4, 3);
        fb.set_pixel(-1, 0, 1);
        fb.set_pixel(4, 0, 1);
        fb.set_pixel(0, 3, 1);
        assert!(fb.pixels().iter().all(|&p| p == Color::BLACK.packed()));
        assert_eq!(fb.get_pixel(4, 0), None);
    }

    #[test]
    fn depth_test_keeps_nearest() {
        let mut fb = FrameBuffer::new(2, 2);
        assert!(fb.set_pixel_with_depth(1, 1, 0.5, 7));
        assert!(!fb.set_pixel_with_depth(1, 1, 0.9, 8));
        assert!(fb.set_pixel_with_depth(1, 1, -0.2, 9));
        assert_eq!(fb.get_pixel(1, 1), Some(9));
        assert_eq!(fb.get_depth(1, 1), Some(-0.2));

        fb.clear_depth();
        assert_eq!(fb.get_depth(1, 1), Some(f64::INFINITY));
    }

    #[test]
    fn span_is_clamped() {
        let mut fb = FrameBuffer::new(5, 2);
        fb.fill_span(1, -3, 2, 5);
        fb.fill_span(0, 3, 10, 6);
        fb.fill_span(4, 0, 4, 7);
        assert_eq!(fb.pixels()[5..10], [5, 5, 5, 0xff000000, 0xff000000]);
        assert_eq!(fb.pixels()[0..5], [0xff000000, 0xff000000, 0xff000000, 6, 6]);
    }

    #[test]
    fn bytes_are_rgba() {
        let mut fb = FrameBuffer::new(1, 1);
        fb.clear(Color::from_int(1, 2, 3, 4));
        assert_eq!(fb.as_bytes(), &[1, 2, 3, 4]);
    }

    #[test]
    fn half_extents_and_resize() {
        let mut fb = FrameBuffer::new(101, 51);
        assert_eq!(fb.half_width(), 50.0);
        assert_eq!(fb.half_height(), 25.0);

        fb.resize(8, 4);
        assert_eq!((fb.width(), fb.height()), (8, 4));
        assert_eq!(fb.pixels().len(), 32);
    }
}
