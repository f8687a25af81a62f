//! Coordinate axes and a horizontal reference grid.

use crate::color::Color;
use crate::math::vec3::Vec3;

/// A colored segment in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldLine {
    pub start: Vec3,
    pub end: Vec3,
    pub color: Color,
}

impl WorldLine {
    pub fn new(start: Vec3, end: Vec3, color: Color) -> Self {
        Self { start, end, color }
    }
}

/// X, Y and Z axes plus grid lines on the `y = 0` plane.
#[derive(Clone, Debug)]
pub struct CoordinateGrid {
    pub axis_length: f64,
    pub axis_colors: [Color; 3],
    pub line_length: f64,
    pub line_step: f64,
    /// Lines on each side of an axis.
    pub line_count: u32,
    pub line_color: Color,
}

impl Default for CoordinateGrid {
    fn default() -> Self {
        Self {
            axis_length: 10.0,
            axis_colors: [Color::RED, Color::GREEN, Color::WHITE],
            line_length: 10.0,
            line_step: 0.5,
            line_count: 20,
            line_color: Color::GRAY,
        }
    }
}

impl CoordinateGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grid lines followed by the three axes. Drawing order is decided by
    /// depth; this order only breaks ties.
    pub fn lines(&self) -> Vec<WorldLine> {
        let count = self.line_count as i32;
        let mut lines = Vec::with_capacity((2 * count as usize + 1) * 2 + 3);

        for i in -count..=count {
            let offset = f64::from(i) * self.line_step;
            lines.push(WorldLine::new(
                Vec3::new(offset, 0.0, self.line_length),
                Vec3::new(offset, 0.0, -self.line_length),
                self.line_color,
            ));
            lines.push(WorldLine::new(
                Vec3::new(self.line_length, 0.0, offset),
                Vec3::new(-self.line_length, 0.0, offset),
                self.line_color,
            ));
        }

        let l = self.axis_length;
        let axes = [
            (Vec3::new(l, 0.0, 0.0), Vec3::new(-l, 0.0, 0.0)),
            (Vec3::new(0.0, l, 0.0), Vec3::new(0.0, -l, 0.0)),
            (Vec3::new(0.0, 0.0, l), Vec3::new(0.0, 0.0, -l)),
        ];
        for ((start, end), color) in axes.into_iter().zip(self.axis_colors) {
            lines.push(WorldLine::new(start, end, color));
        }

        lines
    }
}
