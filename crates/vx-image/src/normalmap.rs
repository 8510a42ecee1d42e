//! Normal and bump maps from height images.
//!
//! The height of a pixel is the Rec. 709 luminance of its color. Slopes
//! are central differences with wrap-around at the borders, so tiling
//! textures produce tiling maps.

use crate::ImageResult;
use tracing::debug;
use vx_core::Color;
use vx_math::Vec3;

/// Height field of an ARGB image, luminance in `[0, 1]`.
struct Heights {
    values: Vec<f32>,
    width: usize,
    height: usize,
}

impl Heights {
    fn new(argb: &[u32], width: u32, height: u32) -> ImageResult<Self> {
        let n = crate::error::check_pixels(argb.len(), width, height)?;
        Ok(Self {
            values: argb[..n].iter().map(|&p| Color::from_argb(p).luminance()).collect(),
            width: width as usize,
            height: height as usize,
        })
    }

    #[inline]
    fn at(&self, x: usize, y: usize) -> f32 {
        self.values[y * self.width + x]
    }

    /// Half central differences `(dh/dx, dh/dy)` at a pixel.
    fn slope(&self, x: usize, y: usize) -> (f32, f32) {
        let (w, h) = (self.width, self.height);
        let dx = self.at((x + 1) % w, y) - self.at((x + w - 1) % w, y);
        let dy = self.at(x, (y + 1) % h) - self.at(x, (y + h - 1) % h);
        (dx * 0.5, dy * 0.5)
    }
}

#[inline]
fn encode_unit(v: f32) -> u32 {
    ((v * 0.5 + 0.5) * 255.0).round().clamp(0.0, 255.0) as u32
}

/// Tangent-space normal map of a height image.
///
/// `strength` scales the slopes. The normal `(x, y, z)` is encoded as
/// `r, g, b = (n * 0.5 + 0.5) * 255`; alpha is copied from the source.
///
/// # Example
///
/// ```rust
/// use vx_image::normalmap::convert_to_normal_map;
///
/// let flat = vec![0xFF80_8080u32; 4];
/// let normals = convert_to_normal_map(&flat, 2, 2, 1.0).unwrap();
/// assert!(normals.iter().all(|&n| n == 0xFF80_80FF));
/// ```
pub fn convert_to_normal_map(argb: &[u32], width: u32, height: u32, strength: f32) -> ImageResult<Vec<u32>> {
    let heights = Heights::new(argb, width, height)?;
    debug!(width, height, strength, "Building normal map");

    let mut out = Vec::with_capacity(heights.values.len());
    for y in 0..heights.height {
        for x in 0..heights.width {
            let (dx, dy) = heights.slope(x, y);
            let n = Vec3::new(-dx * strength, -dy * strength, 1.0).normalize();
            let alpha = argb[y * heights.width + x] & 0xFF00_0000;
            out.push(alpha | encode_unit(n.x) << 16 | encode_unit(n.y) << 8 | encode_unit(n.z));
        }
    }
    Ok(out)
}

/// Signed `du, dv` offsets of a height image in the `V8U8` layout.
///
/// Two bytes per pixel: U (`-dh/dx`) then V (`-dh/dy`), each scaled to
/// `[-127, 127]` and stored as two's complement.
pub fn convert_to_bump_map(argb: &[u32], width: u32, height: u32) -> ImageResult<Vec<u8>> {
    let heights = Heights::new(argb, width, height)?;
    debug!(width, height, "Building V8U8 bump map");

    let to_i8 = |v: f32| (-v * 127.0).round().clamp(-127.0, 127.0) as i8;
    let mut out = Vec::with_capacity(heights.values.len() * 2);
    for y in 0..heights.height {
        for x in 0..heights.width {
            let (dx, dy) = heights.slope(x, y);
            out.push(to_i8(dx) as u8);
            out.push(to_i8(dy) as u8);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray(v: u8) -> u32 {
        vx_core::argb(0xFF, v, v, v)
    }

    #[test]
    fn test_ramp_normals_lean_back() {
        let ramp = [gray(0), gray(64), gray(128), gray(192)];
        let normals = convert_to_normal_map(&ramp, 4, 1, 1.0).unwrap();
        let n = normals[1];
        assert!((n >> 16) & 0xFF < 128, "{n:08X}");
        assert_eq!((n >> 8) & 0xFF, 128);
        assert!(n & 0xFF > 200);
        assert_eq!(n >> 24, 0xFF);
        // wrap: x = 0 sees 192 on its left, so it leans the other way
        assert!((normals[0] >> 16) & 0xFF > 128);
    }

    #[test]
    fn test_strength_steepens() {
        let ramp = [gray(0), gray(64), gray(128), gray(192)];
        let soft = convert_to_normal_map(&ramp, 4, 1, 1.0).unwrap()[1];
        let hard = convert_to_normal_map(&ramp, 4, 1, 4.0).unwrap()[1];
        assert!((hard >> 16) & 0xFF < (soft >> 16) & 0xFF);
    }

    #[test]
    fn test_bump_map() {
        let ramp = [gray(0), gray(64), gray(128), gray(192)];
        let bump = convert_to_bump_map(&ramp, 4, 1).unwrap();
        assert_eq!(bump.len(), 8);
        // (128 - 0) / 255 / 2 * 127 ~ 31.9
        assert_eq!(bump[2] as i8, -32);
        assert_eq!(bump[3] as i8, 0);
    }

    #[test]
    fn test_rejects_bad_size() {
        assert!(convert_to_normal_map(&[0; 3], 2, 2, 1.0).is_err());
        assert!(convert_to_bump_map(&[], 0, 0).is_err());
    }
}
