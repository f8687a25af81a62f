//! Normalized RGBA color and its packed pixel form.
//!
//! Pixels are stored as `u32` values laid out `0xAABBGGRR`, so a
//! little-endian write produces the byte sequence `R, G, B, A`.

use std::ops::{Add, Mul};

/// An RGBA color with every channel in `[0, 1]`.
///
/// Construction asserts the range; use [`Color::clamped`] when the inputs come
/// from arithmetic that may overshoot (lighting sums).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    r: f64,
    g: f64,
    b: f64,
    a: f64,
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Color {
    pub const BLACK: Color = Color::opaque(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::opaque(1.0, 1.0, 1.0);
    pub const RED: Color = Color::opaque(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::opaque(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::opaque(0.0, 0.0, 1.0);
    pub const GRAY: Color = Color::opaque(128.0 / 255.0, 128.0 / 255.0, 128.0 / 255.0);

    const fn opaque(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Creates a color from float channels.
    ///
    /// # Panics
    /// Panics if any channel lies outside `[0, 1]` or is NaN.
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        for (name, value) in [("r", r), ("g", g), ("b", b), ("a", a)] {
            assert!(
                (0.0..=1.0).contains(&value),
                "color channel {name} out of range: {value}"
            );
        }
        Self { r, g, b, a }
    }

    /// Creates a fully opaque color from float channels.
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Creates a color from 8-bit channels.
    pub fn from_int(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: f64::from(r) / 255.0,
            g: f64::from(g) / 255.0,
            b: f64::from(b) / 255.0,
            a: f64::from(a) / 255.0,
        }
    }

    /// Creates a color from float channels, clamping each one into `[0, 1]`.
    /// NaN channels become 0.
    pub fn clamped(r: f64, g: f64, b: f64, a: f64) -> Self {
        let clamp = |v: f64| if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };
        Self {
            r: clamp(r),
            g: clamp(g),
            b: clamp(b),
            a: clamp(a),
        }
    }

    /// Unpacks a `0xAABBGGRR` pixel value.
    pub fn from_packed(value: u32) -> Self {
        let [r, g, b, a] = value.to_le_bytes();
        Self::from_int(r, g, b, a)
    }

    pub fn r(&self) -> f64 {
        self.r
    }

    pub fn g(&self) -> f64 {
        self.g
    }

    pub fn b(&self) -> f64 {
        self.b
    }

    pub fn a(&self) -> f64 {
        self.a
    }

    /// Returns the channels as 8-bit values, rounding to nearest.
    pub fn to_int(&self) -> (u8, u8, u8, u8) {
        let channel = |v: f64| (v * 255.0 + 0.5) as u8;
        (channel(self.r), channel(self.g), channel(self.b), channel(self.a))
    }

    /// Packs the color as `0xAABBGGRR`.
    pub fn packed(&self) -> u32 {
        let (r, g, b, a) = self.to_int();
        u32::from_le_bytes([r, g, b, a])
    }
}

/// Light accumulation in RGB, unclamped until converted back with
/// [`LightColor::modulate`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LightColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl LightColor {
    pub const NONE: LightColor = LightColor {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    /// Scales the RGB channels of a color by `intensity`.
    pub fn from_color(color: Color, intensity: f64) -> Self {
        Self {
            r: color.r * intensity,
            g: color.g * intensity,
            b: color.b * intensity,
        }
    }

    /// Multiplies a surface color by this light, keeping the surface alpha.
    pub fn modulate(self, surface: Color) -> Color {
        Color::clamped(
            surface.r * self.r,
            surface.g * self.g,
            surface.b * self.b,
            surface.a,
        )
    }
}

impl Add for LightColor {
    type Output = LightColor;

    fn add(self, rhs: LightColor) -> Self::Output {
        LightColor {
            r: self.r + rhs.r,
            g: self.g + rhs.g,
            b: self.b + rhs.b,
        }
    }
}

impl Mul<f64> for LightColor {
    type Output = LightColor;

    fn mul(self, rhs: f64) -> Self::Output {
        LightColor {
            r: self.r * rhs,
            g: self.g * rhs,
            b: self.b * rhs,
        }
    }
}
