//! Points and Bresenham lines.

use crate::render::framebuffer::FrameBuffer;

pub fn draw_point(buffer: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    buffer.set_pixel(x, y, color);
}

/// Integer Bresenham line, both endpoints inclusive.
///
/// Steep lines are walked with x and y swapped, and every line is walked from
/// its lower to its higher major coordinate, so `a -> b` and `b -> a` touch the
/// same pixels.
pub fn draw_line(buffer: &mut FrameBuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
    let (mut x0, mut y0, mut x1, mut y1) = (x0, y0, x1, y1);

    let steep = (y1 - y0).abs() > (x1 - x0).abs();
    if steep {
        std::mem::swap(&mut x0, &mut y0);
        std::mem::swap(&mut x1, &mut y1);
    }
    if x0 > x1 {
        std::mem::swap(&mut x0, &mut x1);
        std::mem::swap(&mut y0, &mut y1);
    }

    let delta_x = x1 - x0;
    let delta_y = (y1 - y0).abs();
    let step_y = if y0 < y1 { 1 } else { -1 };
    let mut error = delta_x / 2;
    let mut y = y0;

    for x in x0..=x1 {
        if steep {
            buffer.set_pixel(y, x, color);
        } else {
            buffer.set_pixel(x, y, color);
        }

        error -= delta_y;
        if error < 0 {
            y += step_y;
            error += delta_x;
        }
    }
}
