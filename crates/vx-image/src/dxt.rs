//! S3TC (DXT1, DXT3, DXT5) block compression.
//!
//! Images are cut into 4x4 blocks; blocks hanging over the right or
//! bottom edge repeat the last column or row.
//!
//! # Block layouts
//!
//! ```text
//! DXT1   [color: 8]                       8 bytes
//! DXT3   [alpha: 8 (4 bits/px)] [color]   16 bytes
//! DXT5   [a0 a1 idx:6 (3 bits/px)] [color] 16 bytes
//!
//! color  c0:u16 c1:u16 (RGB565)  idx:u32 (2 bits/px, pixel 0 in the low bits)
//! ```
//!
//! When `c0 > c1` (or always, for DXT3/5) the palette is `c0, c1,
//! (2c0+c1)/3, (c0+2c1)/3`. A DXT1 block with `c0 <= c1` uses `c0, c1,
//! (c0+c1)/2` and index 3 for a transparent pixel.
//!
//! # Encoder
//!
//! Endpoints come from the principal axis of the block colors (power
//! iteration on their covariance): the colors are projected on the axis
//! and the extreme projections become the two endpoints. With
//! [`Quality::High`] the endpoints are then refit by least squares
//! against the index assignment, keeping whichever candidate gives the
//! lowest error after RGB565 quantization.
//!
//! DXT2 and DXT4 carry premultiplied colors but share the DXT3 and DXT5
//! bitstreams; [`DxtFormat::from_pixel_format`] maps them accordingly.
//!
//! # Example
//!
//! ```rust
//! use vx_image::dxt::{compress, decompress, DxtFormat, Quality};
//!
//! let argb = vec![0xFF20_4080u32; 8 * 8];
//! let blocks = compress(&argb, 8, 8, DxtFormat::Dxt1, Quality::High).unwrap();
//! assert_eq!(blocks.len(), 4 * 8);
//!
//! let back = decompress(&blocks, 8, 8, DxtFormat::Dxt1).unwrap();
//! assert_eq!(back.len(), 64);
//! ```

use crate::convert::for_each_row;
use crate::error::check_pixels;
use crate::{ImageError, ImageResult};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace};
use vx_core::PixelFormat;
use vx_math::{centroid, covariance, Vec3};

/// Power iterations used to find the principal color axis.
const POWER_ITERATIONS: usize = 8;

/// Least-squares endpoint refits tried with [`Quality::High`].
const REFINE_PASSES: usize = 2;

/// Block compressed formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DxtFormat {
    /// Opaque or 1-bit alpha color, 8 bytes per block.
    #[default]
    Dxt1,
    /// Explicit 4-bit alpha, 16 bytes per block.
    Dxt3,
    /// Interpolated 8-bit alpha, 16 bytes per block.
    Dxt5,
}

impl DxtFormat {
    /// Bytes per 4x4 block.
    #[inline]
    pub const fn block_bytes(self) -> usize {
        match self {
            Self::Dxt1 => 8,
            Self::Dxt3 | Self::Dxt5 => 16,
        }
    }

    /// Matching pixel format.
    pub const fn pixel_format(self) -> PixelFormat {
        match self {
            Self::Dxt1 => PixelFormat::Dxt1,
            Self::Dxt3 => PixelFormat::Dxt3,
            Self::Dxt5 => PixelFormat::Dxt5,
        }
    }

    /// Codec for a compressed pixel format. DXT2 and DXT4 decode as DXT3 and DXT5.
    pub const fn from_pixel_format(format: PixelFormat) -> Option<Self> {
        match format {
            PixelFormat::Dxt1 => Some(Self::Dxt1),
            PixelFormat::Dxt2 | PixelFormat::Dxt3 => Some(Self::Dxt3),
            PixelFormat::Dxt4 | PixelFormat::Dxt5 => Some(Self::Dxt5),
            _ => None,
        }
    }

    /// Lowercase name, as accepted by [`DxtFormat::from_str`].
    pub const fn name(self) -> &'static str {
        match self {
            Self::Dxt1 => "dxt1",
            Self::Dxt3 => "dxt3",
            Self::Dxt5 => "dxt5",
        }
    }
}

impl fmt::Display for DxtFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DxtFormat {
    type Err = ImageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dxt1" | "bc1" => Ok(Self::Dxt1),
            "dxt2" | "dxt3" | "bc2" => Ok(Self::Dxt3),
            "dxt4" | "dxt5" | "bc3" => Ok(Self::Dxt5),
            other => Err(ImageError::unsupported_format(format!("'{other}' is not a DXT format"))),
        }
    }
}

/// Encoder effort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Quality {
    /// Principal-axis endpoints only.
    Fast,
    /// Principal-axis endpoints refined by least squares.
    #[default]
    High,
}

/// Byte size of a `width` x `height` image in `format`.
#[inline]
pub fn compressed_size(width: u32, height: u32, format: DxtFormat) -> usize {
    format.pixel_format().compressed_size(width, height)
}

// ============================================================================
// Color endpoints
// ============================================================================

#[inline]
fn unpack565(c: u16) -> [u8; 3] {
    let r = ((c >> 11) & 0x1F) as u8;
    let g = ((c >> 5) & 0x3F) as u8;
    let b = (c & 0x1F) as u8;
    [(r << 3) | (r >> 2), (g << 2) | (g >> 4), (b << 3) | (b >> 2)]
}

#[inline]
fn pack565(c: Vec3) -> u16 {
    let q = |v: f32, max: f32| (v.clamp(0.0, 255.0) * max / 255.0).round() as u16;
    (q(c.x, 31.0) << 11) | (q(c.y, 63.0) << 5) | q(c.z, 31.0)
}

#[inline]
fn rgb_of(p: u32) -> [u8; 3] {
    let [b, g, r, _] = p.to_le_bytes();
    [r, g, b]
}

#[inline]
fn to_vec3(rgb: [u8; 3]) -> Vec3 {
    Vec3::new(f32::from(rgb[0]), f32::from(rgb[1]), f32::from(rgb[2]))
}

#[inline]
fn clamp_rgb(v: Vec3) -> Vec3 {
    v.max(Vec3::ZERO).min(Vec3::splat(255.0))
}

#[inline]
fn dist_sq(a: [u8; 3], b: [u8; 3]) -> u32 {
    a.iter()
        .zip(b)
        .map(|(&x, y)| {
            let d = i32::from(x) - i32::from(y);
            (d * d) as u32
        })
        .sum()
}

/// Decoded palette: RGB plus whether the entry is opaque.
fn color_palette(c0: u16, c1: u16, four: bool) -> [([u8; 3], bool); 4] {
    let (a, b) = (unpack565(c0), unpack565(c1));
    let mix = |wa: u32, wb: u32, div: u32| -> [u8; 3] {
        [0, 1, 2].map(|i| ((wa * u32::from(a[i]) + wb * u32::from(b[i])) / div) as u8)
    };
    if four {
        [(a, true), (b, true), (mix(2, 1, 3), true), (mix(1, 2, 3), true)]
    } else {
        [(a, true), (b, true), (mix(1, 1, 2), true), ([0; 3], false)]
    }
}

/// Extreme points of the colors along their principal axis.
fn principal_endpoints(points: &[Vec3]) -> (Vec3, Vec3) {
    let mean = centroid(points);
    let cov = covariance(points);
    let mut axis = cov
        .m
        .iter()
        .map(|r| Vec3::new(r[0], r[1], r[2]))
        .max_by(|a, b| a.length_squared().total_cmp(&b.length_squared()))
        .unwrap_or(Vec3::ZERO);
    if axis.length_squared() < 1e-12 {
        return (mean, mean);
    }
    for _ in 0..POWER_ITERATIONS {
        let next = cov * axis;
        let len = next.length();
        if len < 1e-12 {
            break;
        }
        axis = next / len;
    }
    let axis = axis.normalize();

    let (mut lo, mut hi) = (f32::INFINITY, f32::NEG_INFINITY);
    for &p in points {
        let t = (p - mean).dot(axis);
        lo = lo.min(t);
        hi = hi.max(t);
    }
    (clamp_rgb(mean + axis * hi), clamp_rgb(mean + axis * lo))
}

/// Endpoints minimizing the squared error of the current index assignment.
fn least_squares(points: &[Vec3], e0: Vec3, e1: Vec3, three: bool) -> Option<(Vec3, Vec3)> {
    let weights: &[f32] = if three {
        &[0.0, 1.0, 0.5]
    } else {
        &[0.0, 1.0, 1.0 / 3.0, 2.0 / 3.0]
    };
    let (mut aa, mut ab, mut bb) = (0.0f32, 0.0f32, 0.0f32);
    let (mut xa, mut xb) = (Vec3::ZERO, Vec3::ZERO);
    for &p in points {
        let t = weights
            .iter()
            .copied()
            .min_by(|&s, &u| {
                let ds = (e0.lerp(e1, s) - p).length_squared();
                let du = (e0.lerp(e1, u) - p).length_squared();
                ds.total_cmp(&du)
            })
            .unwrap_or(0.0);
        let s = 1.0 - t;
        aa += s * s;
        ab += s * t;
        bb += t * t;
        xa += p * s;
        xb += p * t;
    }
    let det = aa * bb - ab * ab;
    if det.abs() < 1e-6 {
        return None;
    }
    let a = (xa * bb - xb * ab) / det;
    let b = (xb * aa - xa * ab) / det;
    Some((clamp_rgb(a), clamp_rgb(b)))
}

/// A quantized color block and its squared error.
#[derive(Debug, Clone, Copy)]
struct ColorFit {
    c0: u16,
    c1: u16,
    indices: u32,
    error: u32,
}

fn fit_colors(px: &[u32; 16], transparent: &[bool; 16], e0: Vec3, e1: Vec3, dxt1: bool, three: bool) -> ColorFit {
    let (mut c0, mut c1) = (pack565(e0), pack565(e1));
    if three == (c0 > c1) {
        std::mem::swap(&mut c0, &mut c1);
    }
    let four = !dxt1 || c0 > c1;
    let palette = color_palette(c0, c1, four);
    let usable = if four { 4 } else { 3 };

    let mut indices = 0u32;
    let mut error = 0u32;
    for (i, &p) in px.iter().enumerate() {
        let idx = if transparent[i] {
            3
        } else {
            let rgb = rgb_of(p);
            let (k, d) = (0..usable)
                .map(|k| (k, dist_sq(palette[k].0, rgb)))
                .min_by_key(|&(_, d)| d)
                .unwrap_or((0, 0));
            error += d;
            k as u32
        };
        indices |= idx << (2 * i);
    }
    ColorFit {
        c0,
        c1,
        indices,
        error,
    }
}

fn encode_color(px: &[u32; 16], dxt1: bool, quality: Quality, out: &mut [u8]) {
    let mut points = [Vec3::ZERO; 16];
    let mut transparent = [false; 16];
    let mut n = 0;
    for (i, &p) in px.iter().enumerate() {
        if dxt1 && (p >> 24) < 128 {
            transparent[i] = true;
        } else {
            points[n] = to_vec3(rgb_of(p));
            n += 1;
        }
    }
    let points = &points[..n];
    let three = n < 16;

    if points.is_empty() {
        write_color(out, 0, 0, u32::MAX);
        return;
    }

    let (e0, e1) = principal_endpoints(points);
    let mut best = fit_colors(px, &transparent, e0, e1, dxt1, three);
    if quality == Quality::High {
        let (mut a, mut b) = (e0, e1);
        for _ in 0..REFINE_PASSES {
            if best.error == 0 {
                break;
            }
            let Some((na, nb)) = least_squares(points, a, b, three) else {
                break;
            };
            (a, b) = (na, nb);
            let candidate = fit_colors(px, &transparent, a, b, dxt1, three);
            if candidate.error < best.error {
                best = candidate;
            }
        }
    }
    write_color(out, best.c0, best.c1, best.indices);
}

#[inline]
fn write_color(out: &mut [u8], c0: u16, c1: u16, indices: u32) {
    out[0..2].copy_from_slice(&c0.to_le_bytes());
    out[2..4].copy_from_slice(&c1.to_le_bytes());
    out[4..8].copy_from_slice(&indices.to_le_bytes());
}

fn decode_color(block: &[u8], dxt1: bool) -> [u32; 16] {
    let c0 = u16::from_le_bytes([block[0], block[1]]);
    let c1 = u16::from_le_bytes([block[2], block[3]]);
    let indices = u32::from_le_bytes([block[4], block[5], block[6], block[7]]);
    let palette = color_palette(c0, c1, !dxt1 || c0 > c1);
    std::array::from_fn(|i| {
        let ([r, g, b], opaque) = palette[((indices >> (2 * i)) & 3) as usize];
        let a = if opaque { 0xFF } else { 0 };
        u32::from_le_bytes([b, g, r, a])
    })
}

// ============================================================================
// Alpha
// ============================================================================

#[inline]
fn alphas_of(px: &[u32; 16]) -> [u8; 16] {
    px.map(|p| (p >> 24) as u8)
}

fn encode_alpha_explicit(px: &[u32; 16], out: &mut [u8]) {
    let mut bytes = [0u8; 8];
    for (i, a) in alphas_of(px).into_iter().enumerate() {
        let a4 = ((u32::from(a) * 15 + 127) / 255) as u8;
        bytes[i / 2] |= a4 << (4 * (i % 2));
    }
    out[..8].copy_from_slice(&bytes);
}

fn decode_alpha_explicit(block: &[u8]) -> [u8; 16] {
    std::array::from_fn(|i| ((block[i / 2] >> (4 * (i % 2))) & 0xF) * 17)
}

/// Eight-entry alpha palette; six interpolated levels plus 0 and 255 when `a0 <= a1`.
fn alpha_palette(a0: u8, a1: u8) -> [u8; 8] {
    let (x, y) = (u32::from(a0), u32::from(a1));
    if a0 > a1 {
        std::array::from_fn(|i| match i {
            0 => a0,
            1 => a1,
            _ => (((8 - i as u32) * x + (i as u32 - 1) * y) / 7) as u8,
        })
    } else {
        std::array::from_fn(|i| match i {
            0 => a0,
            1 => a1,
            6 => 0,
            7 => 255,
            _ => (((6 - i as u32) * x + (i as u32 - 1) * y) / 5) as u8,
        })
    }
}

#[derive(Debug, Clone, Copy)]
struct AlphaFit {
    a0: u8,
    a1: u8,
    bits: u64,
    error: u32,
}

fn fit_alpha(alphas: &[u8; 16], a0: u8, a1: u8) -> AlphaFit {
    let palette = alpha_palette(a0, a1);
    let mut bits = 0u64;
    let mut error = 0u32;
    for (i, &a) in alphas.iter().enumerate() {
        let (k, d) = palette
            .iter()
            .enumerate()
            .map(|(k, &v)| (k, u32::from(v.abs_diff(a))))
            .min_by_key(|&(_, d)| d)
            .unwrap_or((0, 0));
        error += d * d;
        bits |= (k as u64) << (3 * i);
    }
    AlphaFit { a0, a1, bits, error }
}

fn encode_alpha_interpolated(px: &[u32; 16], out: &mut [u8]) {
    let alphas = alphas_of(px);
    let lo = alphas.iter().copied().min().unwrap_or(0);
    let hi = alphas.iter().copied().max().unwrap_or(0);
    let mut best = fit_alpha(&alphas, hi, lo);

    // six-level mode represents 0 and 255 exactly
    let inner = || alphas.iter().copied().filter(|&a| a != 0 && a != 255);
    let lo6 = inner().min().unwrap_or(0);
    let hi6 = inner().max().unwrap_or(0);
    let six = fit_alpha(&alphas, lo6, hi6);
    if six.error < best.error {
        best = six;
    }

    out[0] = best.a0;
    out[1] = best.a1;
    out[2..8].copy_from_slice(&best.bits.to_le_bytes()[..6]);
}

fn decode_alpha_interpolated(block: &[u8]) -> [u8; 16] {
    let palette = alpha_palette(block[0], block[1]);
    let mut raw = [0u8; 8];
    raw[..6].copy_from_slice(&block[2..8]);
    let bits = u64::from_le_bytes(raw);
    std::array::from_fn(|i| palette[((bits >> (3 * i)) & 7) as usize])
}

// ============================================================================
// Blocks
// ============================================================================

fn encode_block_into(block: &[u32; 16], format: DxtFormat, quality: Quality, out: &mut [u8]) {
    match format {
        DxtFormat::Dxt1 => encode_color(block, true, quality, &mut out[..8]),
        DxtFormat::Dxt3 => {
            encode_alpha_explicit(block, &mut out[..8]);
            encode_color(block, false, quality, &mut out[8..16]);
        }
        DxtFormat::Dxt5 => {
            encode_alpha_interpolated(block, &mut out[..8]);
            encode_color(block, false, quality, &mut out[8..16]);
        }
    }
}

fn decode_block_from(data: &[u8], format: DxtFormat) -> [u32; 16] {
    let with_alpha = |colors: [u32; 16], alphas: [u8; 16]| -> [u32; 16] {
        std::array::from_fn(|i| (colors[i] & 0x00FF_FFFF) | u32::from(alphas[i]) << 24)
    };
    match format {
        DxtFormat::Dxt1 => decode_color(&data[..8], true),
        DxtFormat::Dxt3 => with_alpha(decode_color(&data[8..16], false), decode_alpha_explicit(&data[..8])),
        DxtFormat::Dxt5 => with_alpha(
            decode_color(&data[8..16], false),
            decode_alpha_interpolated(&data[..8]),
        ),
    }
}

/// Compresses one 4x4 block of ARGB pixels (row order).
pub fn encode_block(block: &[u32; 16], format: DxtFormat, quality: Quality) -> Vec<u8> {
    let mut out = vec![0u8; format.block_bytes()];
    encode_block_into(block, format, quality, &mut out);
    out
}

/// Decodes one block to 16 ARGB pixels (row order).
pub fn decode_block(data: &[u8], format: DxtFormat) -> ImageResult<[u32; 16]> {
    if data.len() < format.block_bytes() {
        return Err(ImageError::buffer_too_small(format.block_bytes(), data.len()));
    }
    Ok(decode_block_from(data, format))
}

// ============================================================================
// Images
// ============================================================================

/// Compresses an ARGB image.
pub fn compress(argb: &[u32], width: u32, height: u32, format: DxtFormat, quality: Quality) -> ImageResult<Vec<u8>> {
    check_pixels(argb.len(), width, height)?;
    let (w, h) = (width as usize, height as usize);
    let (bx, by) = (w.div_ceil(4), h.div_ceil(4));
    let bytes = format.block_bytes();
    debug!(width, height, %format, ?quality, blocks = bx * by, "Compressing");

    let mut out = vec![0u8; compressed_size(width, height, format)];
    for_each_row(&mut out, bx * bytes, by, |row_index, row| {
        let mut block = [0u32; 16];
        for col in 0..bx {
            for (i, px) in block.iter_mut().enumerate() {
                let x = (col * 4 + i % 4).min(w - 1);
                let y = (row_index * 4 + i / 4).min(h - 1);
                *px = argb[y * w + x];
            }
            encode_block_into(&block, format, quality, &mut row[col * bytes..(col + 1) * bytes]);
        }
    });
    Ok(out)
}

/// Decompresses blocks to an ARGB image.
pub fn decompress(data: &[u8], width: u32, height: u32, format: DxtFormat) -> ImageResult<Vec<u32>> {
    if width == 0 || height == 0 {
        return Err(ImageError::invalid_dimensions(format!(
            "{width}x{height}: width and height must be > 0"
        )));
    }
    let needed = compressed_size(width, height, format);
    if data.len() < needed {
        return Err(ImageError::buffer_too_small(needed, data.len()));
    }
    let (w, h) = (width as usize, height as usize);
    let (bx, by) = (w.div_ceil(4), h.div_ceil(4));
    let bytes = format.block_bytes();
    trace!(width, height, %format, "decompress");

    let mut out = vec![0u32; w * h];
    for_each_row(&mut out, w * 4, by, |row_index, pixels| {
        let rows = pixels.len() / w;
        for col in 0..bx {
            let start = (row_index * bx + col) * bytes;
            let block = decode_block_from(&data[start..start + bytes], format);
            for (i, &p) in block.iter().enumerate() {
                let (x, y) = (col * 4 + i % 4, i / 4);
                if x < w && y < rows {
                    pixels[y * w + x] = p;
                }
            }
        }
    });
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::rmse;

    fn block_of(colors: impl Fn(usize) -> u32) -> [u32; 16] {
        std::array::from_fn(colors)
    }

    fn channel_error(a: u32, b: u32) -> u8 {
        a.to_le_bytes()
            .iter()
            .zip(b.to_le_bytes())
            .map(|(&x, y)| x.abs_diff(y))
            .max()
            .unwrap_or(0)
    }

    #[test]
    fn test_565() {
        assert_eq!(pack565(Vec3::splat(255.0)), 0xFFFF);
        assert_eq!(unpack565(0xF800), [255, 0, 0]);
        assert_eq!(unpack565(0x07E0), [0, 255, 0]);
        assert_eq!(unpack565(pack565(Vec3::new(255.0, 0.0, 255.0))), [255, 0, 255]);
    }

    #[test]
    fn test_solid_block() {
        let px = block_of(|_| 0xFF33_6699);
        for format in [DxtFormat::Dxt1, DxtFormat::Dxt3, DxtFormat::Dxt5] {
            let enc = encode_block(&px, format, Quality::High);
            assert_eq!(enc.len(), format.block_bytes());
            let dec = decode_block(&enc, format).unwrap();
            for p in dec {
                assert!(channel_error(p, 0xFF33_6699) <= 4, "{format}: {p:08X}");
                assert_eq!(p >> 24, 0xFF);
            }
        }
    }

    #[test]
    fn test_black_and_white_is_exact() {
        let px = block_of(|i| if i % 3 == 0 { 0xFFFF_FFFF } else { 0xFF00_0000 });
        let enc = encode_block(&px, DxtFormat::Dxt1, Quality::Fast);
        let c0 = u16::from_le_bytes([enc[0], enc[1]]);
        let c1 = u16::from_le_bytes([enc[2], enc[3]]);
        assert!(c0 > c1, "opaque blocks use four-color mode");
        assert_eq!(decode_block(&enc, DxtFormat::Dxt1).unwrap(), px);
    }

    #[test]
    fn test_dxt1_transparency() {
        let px = block_of(|i| if i < 8 { 0x0000_0000 } else { 0xFFFF_0000 });
        let enc = encode_block(&px, DxtFormat::Dxt1, Quality::High);
        let c0 = u16::from_le_bytes([enc[0], enc[1]]);
        let c1 = u16::from_le_bytes([enc[2], enc[3]]);
        assert!(c0 <= c1, "transparent blocks use three-color mode");
        let dec = decode_block(&enc, DxtFormat::Dxt1).unwrap();
        for (i, p) in dec.into_iter().enumerate() {
            if i < 8 {
                assert_eq!(p >> 24, 0);
            } else {
                assert_eq!(p, 0xFFFF_0000);
            }
        }

        let clear = encode_block(&[0x10_FF_FF_FF; 16], DxtFormat::Dxt1, Quality::High);
        assert!(decode_block(&clear, DxtFormat::Dxt1).unwrap().iter().all(|p| p >> 24 == 0));
    }

    #[test]
    fn test_dxt3_alpha_steps_are_exact() {
        let px = block_of(|i| ((i as u32 * 17) << 24) | 0x0080_8080);
        let enc = encode_block(&px, DxtFormat::Dxt3, Quality::Fast);
        let dec = decode_block(&enc, DxtFormat::Dxt3).unwrap();
        for (i, p) in dec.into_iter().enumerate() {
            assert_eq!(p >> 24, i as u32 * 17);
        }
    }

    #[test]
    fn test_dxt5_alpha_modes() {
        // two levels: eight-level mode hits both exactly
        let px = block_of(|i| if i % 2 == 0 { 0x0A00_0000 } else { 0xC800_0000 });
        let dec = decode_block(&encode_block(&px, DxtFormat::Dxt5, Quality::Fast), DxtFormat::Dxt5).unwrap();
        for (p, q) in dec.iter().zip(&px) {
            assert_eq!(p >> 24, q >> 24);
        }

        // 0, 255 and one level in between: six-level mode is exact
        let levels = [0x00u32, 0xFF, 0x64];
        let px = block_of(|i| levels[i % 3] << 24);
        let enc = encode_block(&px, DxtFormat::Dxt5, Quality::Fast);
        assert!(enc[0] <= enc[1]);
        let dec = decode_block(&enc, DxtFormat::Dxt5).unwrap();
        for (p, q) in dec.iter().zip(&px) {
            assert_eq!(p >> 24, q >> 24);
        }
    }

    #[test]
    fn test_alpha_palette() {
        assert_eq!(alpha_palette(255, 0), [255, 0, 218, 182, 145, 109, 72, 36]);
        assert_eq!(alpha_palette(0, 255), [0, 255, 51, 102, 153, 204, 0, 255]);
    }

    #[test]
    fn test_refinement_never_hurts() {
        let px = block_of(|i| {
            let v = (i * 37 % 251) as u8;
            vx_core::argb(0xFF, v, v.wrapping_mul(3), 255 - v)
        });
        let fast = decode_block(&encode_block(&px, DxtFormat::Dxt1, Quality::Fast), DxtFormat::Dxt1).unwrap();
        let high = decode_block(&encode_block(&px, DxtFormat::Dxt1, Quality::High), DxtFormat::Dxt1).unwrap();
        assert!(rmse(&high, &px) <= rmse(&fast, &px) + 1e-9);
    }

    #[test]
    fn test_partial_blocks() {
        let argb = vec![0xFF10_2030u32; 5 * 3];
        let data = compress(&argb, 5, 3, DxtFormat::Dxt1, Quality::Fast).unwrap();
        assert_eq!(data.len(), 2 * 8);
        let back = decompress(&data, 5, 3, DxtFormat::Dxt1).unwrap();
        assert_eq!(back.len(), 15);
        assert!(back.iter().all(|&p| p == back[0]));
        assert!(channel_error(back[0], 0xFF10_2030) <= 4);
    }

    #[test]
    fn test_format_mapping() {
        assert_eq!(DxtFormat::from_pixel_format(PixelFormat::Dxt2), Some(DxtFormat::Dxt3));
        assert_eq!(DxtFormat::from_pixel_format(PixelFormat::Dxt4), Some(DxtFormat::Dxt5));
        assert_eq!(DxtFormat::from_pixel_format(PixelFormat::Rgb565), None);
        assert_eq!("BC3".parse::<DxtFormat>().unwrap(), DxtFormat::Dxt5);
        assert!("dxt9".parse::<DxtFormat>().is_err());
        assert_eq!(compressed_size(1, 1, DxtFormat::Dxt5), 16);
    }

    #[test]
    fn test_rejects_short_input() {
        assert!(decode_block(&[0; 7], DxtFormat::Dxt1).is_err());
        assert!(decompress(&[0; 8], 8, 8, DxtFormat::Dxt1).unwrap_err().is_size_error());
        assert!(compress(&[0; 3], 2, 2, DxtFormat::Dxt1, Quality::Fast).is_err());
    }
}
