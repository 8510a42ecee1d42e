//! Image resize and resampling.
//!
//! Separable two-pass scaling: rows are resampled horizontally into an
//! intermediate buffer, which is then resampled vertically. The filter
//! weights of each destination column (and row) are computed once per
//! pass and normalized, so constant images stay constant under every
//! filter. When downscaling, the filter is stretched by the scale factor.
//!
//! # Filters
//!
//! - [`Filter::Nearest`] - Fastest, no interpolation (blocky)
//! - [`Filter::Bilinear`] - Linear interpolation (smooth but blurry)
//! - [`Filter::Bicubic`] - Mitchell-Netravali cubic (sharper than bilinear)
//! - [`Filter::Lanczos3`] - High-quality sinc-based (best for downscaling)
//!
//! # Example
//!
//! ```rust
//! use vx_image::resize::{resize_f32, Filter};
//!
//! let src = vec![0.5f32; 16 * 16 * 4];
//! let dst = resize_f32(&src, 16, 16, 4, 32, 32, Filter::Bilinear).unwrap();
//! assert_eq!(dst.len(), 32 * 32 * 4);
//! ```

use crate::convert::for_each_row;
use crate::{ImageError, ImageResult};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace};

/// Resampling filter for resize operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    /// Nearest-neighbor (fastest, no interpolation).
    Nearest,
    /// Bilinear interpolation (smooth, fast).
    Bilinear,
    /// Bicubic interpolation (sharper than bilinear).
    #[default]
    Bicubic,
    /// Lanczos-3 (high quality, best for downscaling).
    Lanczos3,
}

impl Filter {
    /// Returns the support radius for this filter.
    #[inline]
    pub fn support(&self) -> f32 {
        match self {
            Filter::Nearest => 0.5,
            Filter::Bilinear => 1.0,
            Filter::Bicubic => 2.0,
            Filter::Lanczos3 => 3.0,
        }
    }

    /// Evaluates the filter kernel at position x.
    #[inline]
    pub fn weight(&self, x: f32) -> f32 {
        match self {
            Filter::Nearest => nearest_weight(x),
            Filter::Bilinear => bilinear_weight(x),
            Filter::Bicubic => bicubic_weight(x),
            Filter::Lanczos3 => lanczos_weight(x, 3.0),
        }
    }

    /// Lowercase name, as accepted by [`Filter::from_str`].
    pub fn name(&self) -> &'static str {
        match self {
            Filter::Nearest => "nearest",
            Filter::Bilinear => "bilinear",
            Filter::Bicubic => "bicubic",
            Filter::Lanczos3 => "lanczos3",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Filter {
    type Err = ImageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nearest" | "point" => Ok(Filter::Nearest),
            "bilinear" | "linear" | "triangle" => Ok(Filter::Bilinear),
            "bicubic" | "cubic" | "mitchell" => Ok(Filter::Bicubic),
            "lanczos3" | "lanczos" => Ok(Filter::Lanczos3),
            other => Err(ImageError::invalid_parameter(format!("unknown filter '{other}'"))),
        }
    }
}

/// Nearest-neighbor weight function.
#[inline]
fn nearest_weight(x: f32) -> f32 {
    if x.abs() < 0.5 { 1.0 } else { 0.0 }
}

/// Bilinear (triangle) weight function.
#[inline]
fn bilinear_weight(x: f32) -> f32 {
    let ax = x.abs();
    if ax < 1.0 { 1.0 - ax } else { 0.0 }
}

/// Bicubic (Mitchell-Netravali) weight function.
#[inline]
fn bicubic_weight(x: f32) -> f32 {
    // Mitchell-Netravali with B=1/3, C=1/3
    const B: f32 = 1.0 / 3.0;
    const C: f32 = 1.0 / 3.0;

    let ax = x.abs();
    if ax < 1.0 {
        ((12.0 - 9.0 * B - 6.0 * C) * ax * ax * ax
            + (-18.0 + 12.0 * B + 6.0 * C) * ax * ax
            + (6.0 - 2.0 * B))
            / 6.0
    } else if ax < 2.0 {
        ((-B - 6.0 * C) * ax * ax * ax
            + (6.0 * B + 30.0 * C) * ax * ax
            + (-12.0 * B - 48.0 * C) * ax
            + (8.0 * B + 24.0 * C))
            / 6.0
    } else {
        0.0
    }
}

/// Lanczos weight function.
#[inline]
fn lanczos_weight(x: f32, a: f32) -> f32 {
    let ax = x.abs();
    if ax < 1e-8 {
        1.0
    } else if ax < a {
        let pi_x = std::f32::consts::PI * ax;
        let pi_x_a = pi_x / a;
        (pi_x.sin() / pi_x) * (pi_x_a.sin() / pi_x_a)
    } else {
        0.0
    }
}

/// Normalized filter taps of one destination sample.
#[derive(Debug, Clone)]
struct Taps {
    start: usize,
    weights: Vec<f32>,
}

/// Taps of every destination sample along one axis.
fn taps(src_len: usize, dst_len: usize, filter: Filter) -> Vec<Taps> {
    let scale = src_len as f32 / dst_len as f32;
    let blur = scale.max(1.0);
    let support = filter.support() * blur;
    let last = src_len as isize - 1;

    (0..dst_len)
        .map(|i| {
            let center = (i as f32 + 0.5) * scale - 0.5;
            let left = ((center - support).floor() as isize).clamp(0, last);
            let right = ((center + support).ceil() as isize).clamp(left, last);
            let mut weights: Vec<f32> = (left..=right)
                .map(|s| filter.weight((s as f32 - center) / blur))
                .collect();
            let sum: f32 = weights.iter().sum();
            if sum.abs() < 1e-8 {
                // every tap fell on a kernel zero; take the closest sample
                let nearest = (center.round() as isize).clamp(0, last);
                return Taps {
                    start: nearest as usize,
                    weights: vec![1.0],
                };
            }
            weights.iter_mut().for_each(|w| *w /= sum);
            Taps {
                start: left as usize,
                weights,
            }
        })
        .collect()
}

/// Resizes f32 image data.
///
/// # Arguments
///
/// * `src` - Source pixel data, interleaved channels
/// * `src_w` - Source width
/// * `src_h` - Source height
/// * `channels` - Number of channels per pixel
/// * `dst_w` - Destination width
/// * `dst_h` - Destination height
/// * `filter` - Resampling filter
///
/// # Returns
///
/// Resized pixel data as `Vec<f32>`.
pub fn resize_f32(
    src: &[f32],
    src_w: usize,
    src_h: usize,
    channels: usize,
    dst_w: usize,
    dst_h: usize,
    filter: Filter,
) -> ImageResult<Vec<f32>> {
    if src_w == 0 || src_h == 0 || channels == 0 {
        return Err(ImageError::invalid_dimensions(
            "width, height, and channels must be > 0",
        ));
    }
    let expected = src_w
        .checked_mul(src_h)
        .and_then(|v| v.checked_mul(channels))
        .ok_or_else(|| ImageError::invalid_dimensions("image dimensions overflow"))?;
    if src.len() != expected {
        return Err(ImageError::invalid_dimensions(format!(
            "expected {} samples, got {}",
            expected,
            src.len()
        )));
    }
    if dst_w == 0 || dst_h == 0 {
        return Err(ImageError::invalid_dimensions("destination size must be > 0"));
    }
    trace!(src_w, src_h, dst_w, dst_h, channels, %filter, "resize_f32");

    let temp = resize_horizontal(src, src_w, src_h, channels, dst_w, filter);
    Ok(resize_vertical(&temp, dst_w, src_h, channels, dst_h, filter))
}

/// Horizontal pass: `src_w x src_h` to `dst_w x src_h`.
fn resize_horizontal(
    src: &[f32],
    src_w: usize,
    src_h: usize,
    channels: usize,
    dst_w: usize,
    filter: Filter,
) -> Vec<f32> {
    let taps = taps(src_w, dst_w, filter);
    let mut dst = vec![0.0f32; dst_w * src_h * channels];

    for_each_row(&mut dst, dst_w * channels, src_h, |y, row| {
        let line = &src[y * src_w * channels..(y + 1) * src_w * channels];
        for (x, t) in taps.iter().enumerate() {
            let out = &mut row[x * channels..(x + 1) * channels];
            for (k, &w) in t.weights.iter().enumerate() {
                let px = &line[(t.start + k) * channels..(t.start + k + 1) * channels];
                for (o, &v) in out.iter_mut().zip(px) {
                    *o += v * w;
                }
            }
        }
    });
    dst
}

/// Vertical pass: `width x src_h` to `width x dst_h`.
fn resize_vertical(
    src: &[f32],
    width: usize,
    src_h: usize,
    channels: usize,
    dst_h: usize,
    filter: Filter,
) -> Vec<f32> {
    let taps = taps(src_h, dst_h, filter);
    let row_len = width * channels;
    let mut dst = vec![0.0f32; row_len * dst_h];

    for_each_row(&mut dst, row_len, dst_h, |y, row| {
        let t = &taps[y];
        for (k, &w) in t.weights.iter().enumerate() {
            let sy = t.start + k;
            let line = &src[sy * row_len..(sy + 1) * row_len];
            for (o, &v) in row.iter_mut().zip(line) {
                *o += v * w;
            }
        }
    });
    dst
}

/// Resizes 32-bit ARGB pixels.
///
/// Channels are filtered independently and the results rounded and
/// clamped to 8 bits.
pub fn resize_argb32(
    src: &[u32],
    src_w: u32,
    src_h: u32,
    dst_w: u32,
    dst_h: u32,
    filter: Filter,
) -> ImageResult<Vec<u32>> {
    let n = crate::error::check_pixels(src.len(), src_w, src_h)?;
    debug!(src_w, src_h, dst_w, dst_h, %filter, "Resizing ARGB image");

    let samples: Vec<f32> = src[..n]
        .iter()
        .flat_map(|p| p.to_le_bytes().map(f32::from))
        .collect();
    let out = resize_f32(
        &samples,
        src_w as usize,
        src_h as usize,
        4,
        dst_w as usize,
        dst_h as usize,
        filter,
    )?;
    Ok(out
        .chunks_exact(4)
        .map(|px| u32::from_le_bytes([to_u8(px[0]), to_u8(px[1]), to_u8(px[2]), to_u8(px[3])]))
        .collect())
}

#[inline]
fn to_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Calculates the aspect-preserving dimensions for a target size.
///
/// # Example
///
/// ```rust
/// use vx_image::resize::fit_dimensions;
///
/// // Fit 1920x1080 into 640x480 box
/// let (w, h) = fit_dimensions(1920, 1080, 640, 480);
/// assert_eq!((w, h), (640, 360)); // Letterboxed
/// ```
pub fn fit_dimensions(src_w: usize, src_h: usize, max_w: usize, max_h: usize) -> (usize, usize) {
    let scale_w = max_w as f32 / src_w as f32;
    let scale_h = max_h as f32 / src_h as f32;
    let scale = scale_w.min(scale_h);

    let new_w = ((src_w as f32 * scale).round() as usize).max(1);
    let new_h = ((src_h as f32 * scale).round() as usize).max(1);

    (new_w, new_h)
}

/// Calculates dimensions that fill the target (may crop).
///
/// # Example
///
/// ```rust
/// use vx_image::resize::fill_dimensions;
///
/// // Fill 640x480 with 1920x1080 (crop sides)
/// let (w, h) = fill_dimensions(1920, 1080, 640, 480);
/// assert_eq!((w, h), (853, 480));
/// ```
pub fn fill_dimensions(src_w: usize, src_h: usize, min_w: usize, min_h: usize) -> (usize, usize) {
    let scale_w = min_w as f32 / src_w as f32;
    let scale_h = min_h as f32 / src_h as f32;
    let scale = scale_w.max(scale_h);

    let new_w = ((src_w as f32 * scale).round() as usize).max(1);
    let new_h = ((src_h as f32 * scale).round() as usize).max(1);

    (new_w, new_h)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Filter; 4] = [Filter::Nearest, Filter::Bilinear, Filter::Bicubic, Filter::Lanczos3];

    #[test]
    fn test_filter_weights() {
        assert!((Filter::Nearest.weight(0.0) - 1.0).abs() < 0.01);
        assert!((Filter::Nearest.weight(0.6) - 0.0).abs() < 0.01);
        assert!((Filter::Bilinear.weight(0.5) - 0.5).abs() < 0.01);
        assert!((Filter::Lanczos3.weight(0.0) - 1.0).abs() < 0.01);
        assert_eq!(Filter::Bicubic.weight(2.5), 0.0);
    }

    #[test]
    fn test_filter_names() {
        for f in ALL {
            assert_eq!(f.name().parse::<Filter>().unwrap(), f);
        }
        assert_eq!("Linear".parse::<Filter>().unwrap(), Filter::Bilinear);
        assert!("gaussian".parse::<Filter>().is_err());
    }

    #[test]
    fn test_constant_stays_constant() {
        let src = vec![0.5f32; 7 * 5 * 3];
        for f in ALL {
            for (w, h) in [(14, 10), (3, 2), (7, 5), (1, 1)] {
                let dst = resize_f32(&src, 7, 5, 3, w, h, f).unwrap();
                assert_eq!(dst.len(), w * h * 3);
                assert!(dst.iter().all(|v| (v - 0.5).abs() < 1e-5), "{f} {w}x{h}");
            }
        }
    }

    #[test]
    fn test_same_size_bilinear_is_identity() {
        let src: Vec<f32> = (0..4 * 3).map(|i| i as f32).collect();
        let dst = resize_f32(&src, 4, 3, 1, 4, 3, Filter::Bilinear).unwrap();
        for (a, b) in src.iter().zip(&dst) {
            assert!((a - b).abs() < 1e-5);
        }
    }

    #[test]
    fn test_nearest_upscale_duplicates() {
        let src = [0.0f32, 1.0];
        let dst = resize_f32(&src, 2, 1, 1, 4, 1, Filter::Nearest).unwrap();
        assert_eq!(dst, vec![0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_argb_downscale() {
        let src = [0xFF00_0000u32, 0xFF00_0000, 0xFFFF_FFFF, 0xFFFF_FFFF];
        let dst = resize_argb32(&src, 4, 1, 2, 1, Filter::Bilinear).unwrap();
        assert_eq!(dst.len(), 2);
        assert_eq!(dst[0] >> 24, 0xFF);
        let (left, right) = (dst[0] & 0xFF, dst[1] & 0xFF);
        assert!(left < 128 && right > 128);
        assert_eq!(left + right, 255);
    }

    #[test]
    fn test_invalid_input() {
        assert!(resize_f32(&[0.0; 3], 2, 2, 1, 4, 4, Filter::Nearest).is_err());
        assert!(resize_f32(&[0.0; 4], 2, 2, 1, 0, 4, Filter::Nearest).is_err());
        assert!(resize_argb32(&[0; 3], 2, 2, 1, 1, Filter::Nearest).unwrap_err().is_size_error());
    }

    #[test]
    fn test_fit_dimensions() {
        assert_eq!(fit_dimensions(1920, 1080, 640, 640), (640, 360));
        assert_eq!(fit_dimensions(1080, 1920, 640, 640), (360, 640));
        assert_eq!(fit_dimensions(320, 240, 640, 480), (640, 480));
    }

    #[test]
    fn test_fill_dimensions() {
        assert_eq!(fill_dimensions(1920, 1080, 640, 640), (1138, 640));
    }
}
