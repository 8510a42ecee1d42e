//! Mipmap generation for ARGB images.
//!
//! Each level halves both dimensions (never below 1) with a 2x2 box
//! filter. On an odd edge the last source row or column is clamped, so a
//! 1-pixel wide image still averages pairs of rows.

use crate::ImageResult;
use tracing::debug;

/// One level of a mip chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MipLevel {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// ARGB pixels in row order
    pub pixels: Vec<u32>,
}

/// Number of levels down to 1x1, the full-size image included.
///
/// # Example
///
/// ```rust
/// use vx_image::mipmap::mip_level_count;
///
/// assert_eq!(mip_level_count(256, 64), 9);
/// assert_eq!(mip_level_count(1, 1), 1);
/// ```
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    let largest = width.max(height);
    if largest == 0 {
        return 0;
    }
    32 - largest.leading_zeros()
}

/// Downsamples an ARGB image by two. Returns the pixels and the new size.
pub fn generate_mipmap(argb: &[u32], width: u32, height: u32) -> ImageResult<(Vec<u32>, u32, u32)> {
    crate::error::check_pixels(argb.len(), width, height)?;
    let (w, h) = (width as usize, height as usize);
    let (dw, dh) = ((w / 2).max(1), (h / 2).max(1));

    let mut out = Vec::with_capacity(dw * dh);
    for y in 0..dh {
        let y0 = (2 * y).min(h - 1);
        let y1 = (2 * y + 1).min(h - 1);
        for x in 0..dw {
            let x0 = (2 * x).min(w - 1);
            let x1 = (2 * x + 1).min(w - 1);
            out.push(average4([
                argb[y0 * w + x0],
                argb[y0 * w + x1],
                argb[y1 * w + x0],
                argb[y1 * w + x1],
            ]));
        }
    }
    Ok((out, dw as u32, dh as u32))
}

/// Per-channel rounded mean of four ARGB pixels.
#[inline]
fn average4(px: [u32; 4]) -> u32 {
    let mut out = 0u32;
    for shift in [0, 8, 16, 24] {
        let sum: u32 = px.iter().map(|p| (p >> shift) & 0xFF).sum();
        out |= ((sum + 2) / 4) << shift;
    }
    out
}

/// Every level from the full-size image down to 1x1.
pub fn generate_mip_chain(argb: &[u32], width: u32, height: u32) -> ImageResult<Vec<MipLevel>> {
    let n = crate::error::check_pixels(argb.len(), width, height)?;
    let count = mip_level_count(width, height);
    debug!(width, height, levels = count, "Generating mip chain");

    let mut levels = Vec::with_capacity(count as usize);
    levels.push(MipLevel {
        width,
        height,
        pixels: argb[..n].to_vec(),
    });
    while let Some(last) = levels.last() {
        if last.width == 1 && last.height == 1 {
            break;
        }
        let (pixels, w, h) = generate_mipmap(&last.pixels, last.width, last.height)?;
        levels.push(MipLevel {
            width: w,
            height: h,
            pixels,
        });
    }
    Ok(levels)
}
