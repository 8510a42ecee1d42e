//! Floating point colors and packed ARGB helpers.
//!
//! [`Color`] stores four `f32` channels nominally in `[0, 1]`. Packed
//! 32-bit colors use the `0xAARRGGBB` layout of [`crate::PixelFormat::Argb8888`].
//!
//! # Usage
//!
//! ```rust
//! use vx_core::{argb, Color};
//!
//! let c = Color::new(1.0, 0.5, 0.0, 1.0);
//! assert_eq!(c.to_argb(), argb(255, 255, 128, 0));
//! assert_eq!(Color::from_argb(0xFF00FF00).g, 1.0);
//! ```

use std::ops::{Add, Mul, Sub};

/// Packs 8-bit channels into `0xAARRGGBB`.
#[inline]
pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> u32 {
    ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// Alpha byte of a packed ARGB color.
#[inline]
pub const fn argb_alpha(c: u32) -> u8 {
    (c >> 24) as u8
}

/// Red byte of a packed ARGB color.
#[inline]
pub const fn argb_red(c: u32) -> u8 {
    (c >> 16) as u8
}

/// Green byte of a packed ARGB color.
#[inline]
pub const fn argb_green(c: u32) -> u8 {
    (c >> 8) as u8
}

/// Blue byte of a packed ARGB color.
#[inline]
pub const fn argb_blue(c: u32) -> u8 {
    c as u8
}

/// RGBA color with `f32` channels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[repr(C)]
pub struct Color {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
    /// Alpha channel
    pub a: f32,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Creates a color from four channels.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color.
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Unpacks a `0xAARRGGBB` color.
    pub fn from_argb(c: u32) -> Self {
        const INV: f32 = 1.0 / 255.0;
        Self::new(
            argb_red(c) as f32 * INV,
            argb_green(c) as f32 * INV,
            argb_blue(c) as f32 * INV,
            argb_alpha(c) as f32 * INV,
        )
    }

    /// Packs into `0xAARRGGBB`, clamping each channel to `[0, 1]`.
    pub fn to_argb(&self) -> u32 {
        #[inline]
        fn byte(v: f32) -> u8 {
            (v.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        argb(byte(self.a), byte(self.r), byte(self.g), byte(self.b))
    }

    /// Clamps every channel to `[0, 1]`.
    #[inline]
    pub fn clamp(self) -> Self {
        Self::new(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
            self.a.clamp(0.0, 1.0),
        )
    }

    /// Linear interpolation of all four channels.
    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }

    /// Rec.709 luminance of the RGB channels.
    #[inline]
    pub fn luminance(&self) -> f32 {
        0.2126 * self.r + 0.7152 * self.g + 0.0722 * self.b
    }
}

impl Add for Color {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b, self.a + rhs.a)
    }
}

impl Sub for Color {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.r - rhs.r, self.g - rhs.g, self.b - rhs.b, self.a - rhs.a)
    }
}

// modulate
impl Mul for Color {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::new(self.r * rhs.r, self.g * rhs.g, self.b * rhs.b, self.a * rhs.a)
    }
}

impl Mul<f32> for Color {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.r * rhs, self.g * rhs, self.b * rhs, self.a * rhs)
    }
}

impl From<u32> for Color {
    #[inline]
    fn from(c: u32) -> Self {
        Self::from_argb(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_pack_unpack() {
        let packed = argb(0x80, 0x12, 0x34, 0x56);
        assert_eq!(packed, 0x8012_3456);
        assert_eq!(argb_alpha(packed), 0x80);
        assert_eq!(argb_red(packed), 0x12);
        assert_eq!(argb_green(packed), 0x34);
        assert_eq!(argb_blue(packed), 0x56);
        assert_eq!(Color::from_argb(packed).to_argb(), packed);
    }

    #[test]
    fn test_to_argb_clamps() {
        let c = Color::new(2.0, -1.0, 0.5, 1.0);
        assert_eq!(c.to_argb(), argb(255, 255, 0, 128));
    }

    #[test]
    fn test_lerp() {
        let c = Color::BLACK.lerp(Color::WHITE, 0.25);
        assert_relative_eq!(c.r, 0.25);
        assert_relative_eq!(c.a, 1.0);
    }

    #[test]
    fn test_luminance_of_white() {
        assert_relative_eq!(Color::WHITE.luminance(), 1.0, epsilon = 1e-6);
    }
}
