//! Pixel format conversion and blitting.
//!
//! Every uncompressed layout is handled through its channel masks: a
//! pixel is loaded as a little-endian integer of `bits_per_pixel / 8`
//! bytes, each channel is extracted with its mask and shift, and widened
//! to 8 bits by replicating its high bits. Writing narrows by dropping low
//! bits (or widens again for channels wider than 8 bits).
//!
//! Conversion always goes through 32-bit ARGB (`0xAARRGGBB`), so any two
//! layouts can be blitted into each other. Channels missing in the source
//! read as 0, except alpha which reads as opaque.
//!
//! # Example
//!
//! ```rust
//! use vx_core::{ImageDesc, PixelFormat};
//! use vx_image::convert::{blit, read_pixel};
//!
//! let src_desc = ImageDesc::for_format(PixelFormat::Argb8888, 2, 1).unwrap();
//! let src: Vec<u8> = [0xFF00_FF00u32, 0x8000_00FF].iter().flat_map(|p| p.to_le_bytes()).collect();
//!
//! let dst_desc = ImageDesc::for_format(PixelFormat::Rgb565, 2, 1).unwrap();
//! let mut dst = vec![0u8; dst_desc.min_buffer_len()];
//! blit(&src_desc, &src, &dst_desc, &mut dst).unwrap();
//!
//! assert_eq!(read_pixel(&dst_desc, &dst, 0, 0).unwrap(), 0xFF00_FF00);
//! ```

use crate::{ImageError, ImageResult};
use tracing::{debug, trace};
use vx_core::{bit_count, bit_shift, Encoding, ImageDesc};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Position and width of one channel inside a packed pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Channel {
    mask: u32,
    shift: u32,
    bits: u32,
}

impl Channel {
    fn new(mask: u32) -> Self {
        Self {
            mask,
            shift: bit_shift(mask),
            bits: bit_count(mask),
        }
    }

    /// Channel value widened to 8 bits, `missing` when the channel is absent.
    #[inline]
    fn read(&self, raw: u32, missing: u8) -> u8 {
        if self.bits == 0 {
            return missing;
        }
        widen((raw & self.mask) >> self.shift, self.bits)
    }

    #[inline]
    fn write(&self, value: u8) -> u32 {
        if self.bits == 0 {
            return 0;
        }
        (narrow(value, self.bits) << self.shift) & self.mask
    }
}

/// Replicates the `bits` low bits of `v` until 8 bits are filled.
#[inline]
fn widen(v: u32, bits: u32) -> u8 {
    if bits >= 8 {
        return (v >> (bits - 8)) as u8;
    }
    let mut out = 0u32;
    let mut filled = 0;
    while filled < 8 {
        out = (out << bits) | v;
        filled += bits;
    }
    (out >> (filled - 8)) as u8
}

/// Converts an 8-bit value to a `bits` wide channel.
#[inline]
fn narrow(v: u8, bits: u32) -> u32 {
    if bits <= 8 {
        return u32::from(v) >> (8 - bits);
    }
    let mut out = 0u64;
    let mut filled = 0;
    while filled < bits {
        out = (out << 8) | u64::from(v);
        filled += 8;
    }
    (out >> (filled - bits)) as u32
}

/// Channel layout of an uncompressed descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Layout {
    alpha: Channel,
    red: Channel,
    green: Channel,
    blue: Channel,
    bytes: usize,
}

impl Layout {
    /// Layout of `desc`, rejecting compressed and odd-sized pixels.
    pub(crate) fn of(desc: &ImageDesc) -> ImageResult<Self> {
        if let Encoding::Dxt(n) = desc.encoding {
            return Err(ImageError::unsupported_format(format!(
                "DXT{n} data cannot be addressed per pixel"
            )));
        }
        if !matches!(desc.bits_per_pixel, 8 | 16 | 24 | 32) {
            return Err(ImageError::unsupported_format(format!(
                "{} bits per pixel",
                desc.bits_per_pixel
            )));
        }
        let m = desc.masks;
        Ok(Self {
            alpha: Channel::new(m.alpha),
            red: Channel::new(m.red),
            green: Channel::new(m.green),
            blue: Channel::new(m.blue),
            bytes: desc.bytes_per_pixel(),
        })
    }

    #[inline]
    pub(crate) fn has_alpha(&self) -> bool {
        self.alpha.bits != 0
    }

    /// Packed pixel to ARGB.
    #[inline]
    pub(crate) fn unpack(&self, raw: u32) -> u32 {
        u32::from(self.alpha.read(raw, 0xFF)) << 24
            | u32::from(self.red.read(raw, 0)) << 16
            | u32::from(self.green.read(raw, 0)) << 8
            | u32::from(self.blue.read(raw, 0))
    }

    /// ARGB to packed pixel.
    #[inline]
    pub(crate) fn pack(&self, argb: u32) -> u32 {
        let [b, g, r, a] = argb.to_le_bytes();
        self.alpha.write(a) | self.red.write(r) | self.green.write(g) | self.blue.write(b)
    }

    #[inline]
    fn load(&self, row: &[u8], x: usize) -> u32 {
        let px = &row[x * self.bytes..(x + 1) * self.bytes];
        px.iter().rev().fold(0u32, |acc, &b| (acc << 8) | u32::from(b))
    }

    #[inline]
    fn store(&self, row: &mut [u8], x: usize, raw: u32) {
        let px = &mut row[x * self.bytes..(x + 1) * self.bytes];
        px.copy_from_slice(&raw.to_le_bytes()[..self.bytes]);
    }
}

/// Validates a descriptor against its buffer.
fn check(desc: &ImageDesc, len: usize) -> ImageResult<Layout> {
    if desc.width == 0 || desc.height == 0 {
        return Err(ImageError::invalid_dimensions(format!(
            "{}x{}: width and height must be > 0",
            desc.width, desc.height
        )));
    }
    let layout = Layout::of(desc)?;
    if desc.bytes_per_line < desc.row_bytes() {
        return Err(ImageError::invalid_parameter(format!(
            "pitch {} is less than row size {}",
            desc.bytes_per_line,
            desc.row_bytes()
        )));
    }
    desc.check_buffer(len)?;
    Ok(layout)
}

fn check_same_size(src: &ImageDesc, dst: &ImageDesc) -> ImageResult<()> {
    if !src.same_size(dst) {
        return Err(ImageError::invalid_dimensions(format!(
            "source {}x{} does not match destination {}x{}",
            src.width, src.height, dst.width, dst.height
        )));
    }
    Ok(())
}

/// Runs `f(y, row)` over the first `rows` rows of a pitched buffer.
#[cfg(feature = "parallel")]
pub(crate) fn for_each_row<T, F>(data: &mut [T], pitch: usize, rows: usize, f: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Send + Sync,
{
    data.par_chunks_mut(pitch)
        .take(rows)
        .enumerate()
        .for_each(|(y, row)| f(y, row));
}

/// Runs `f(y, row)` over the first `rows` rows of a pitched buffer.
#[cfg(not(feature = "parallel"))]
pub(crate) fn for_each_row<T, F>(data: &mut [T], pitch: usize, rows: usize, f: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Send + Sync,
{
    data.chunks_mut(pitch)
        .take(rows)
        .enumerate()
        .for_each(|(y, row)| f(y, row));
}

fn row<'a>(desc: &ImageDesc, data: &'a [u8], y: usize) -> &'a [u8] {
    let start = y * desc.bytes_per_line;
    &data[start..start + desc.row_bytes()]
}

fn check_coords(desc: &ImageDesc, x: u32, y: u32) -> ImageResult<()> {
    if x >= desc.width || y >= desc.height {
        return Err(ImageError::invalid_parameter(format!(
            "pixel ({x}, {y}) outside {}x{}",
            desc.width, desc.height
        )));
    }
    Ok(())
}

/// Reads one pixel as ARGB.
pub fn read_pixel(desc: &ImageDesc, data: &[u8], x: u32, y: u32) -> ImageResult<u32> {
    let layout = check(desc, data.len())?;
    check_coords(desc, x, y)?;
    Ok(layout.unpack(layout.load(row(desc, data, y as usize), x as usize)))
}

/// Writes one ARGB pixel.
pub fn write_pixel(desc: &ImageDesc, data: &mut [u8], x: u32, y: u32, argb: u32) -> ImageResult<()> {
    let layout = check(desc, data.len())?;
    check_coords(desc, x, y)?;
    let start = y as usize * desc.bytes_per_line;
    layout.store(&mut data[start..], x as usize, layout.pack(argb));
    Ok(())
}

fn blit_rows(
    src_desc: &ImageDesc,
    src: &[u8],
    dst_desc: &ImageDesc,
    dst: &mut [u8],
    flip: bool,
) -> ImageResult<()> {
    let src_layout = check(src_desc, src.len())?;
    let dst_layout = check(dst_desc, dst.len())?;
    check_same_size(src_desc, dst_desc)?;

    let (width, height) = (src_desc.width as usize, src_desc.height as usize);
    let same = src_layout == dst_layout;
    trace!(width, height, same, flip, "blit");

    for_each_row(dst, dst_desc.bytes_per_line, height, |y, out| {
        let sy = if flip { height - 1 - y } else { y };
        let input = row(src_desc, src, sy);
        if same {
            out[..input.len()].copy_from_slice(input);
            return;
        }
        for x in 0..width {
            let argb = src_layout.unpack(src_layout.load(input, x));
            dst_layout.store(out, x, dst_layout.pack(argb));
        }
    });
    Ok(())
}

/// Copies `src` into `dst`, converting between their pixel layouts.
///
/// Both descriptors must have the same dimensions; pitches may differ.
pub fn blit(src_desc: &ImageDesc, src: &[u8], dst_desc: &ImageDesc, dst: &mut [u8]) -> ImageResult<()> {
    blit_rows(src_desc, src, dst_desc, dst, false)
}

/// Like [`blit`], with the rows of the result in reverse order.
pub fn blit_upside_down(
    src_desc: &ImageDesc,
    src: &[u8],
    dst_desc: &ImageDesc,
    dst: &mut [u8],
) -> ImageResult<()> {
    blit_rows(src_desc, src, dst_desc, dst, true)
}

/// Sets the alpha channel of every pixel to `alpha`.
///
/// Layouts without alpha are left untouched.
pub fn set_alpha(desc: &ImageDesc, data: &mut [u8], alpha: u8) -> ImageResult<()> {
    let layout = check(desc, data.len())?;
    if !layout.has_alpha() {
        debug!(format = %desc.format(), "set_alpha on a layout without alpha");
        return Ok(());
    }
    let width = desc.width as usize;
    let bits = layout.alpha.write(alpha);
    for_each_row(data, desc.bytes_per_line, desc.height as usize, |_, out| {
        for x in 0..width {
            let raw = layout.load(out, x) & !layout.alpha.mask;
            layout.store(out, x, raw | bits);
        }
    });
    Ok(())
}

/// Sets the alpha channel from one value per pixel, in row order.
pub fn set_alpha_from(desc: &ImageDesc, data: &mut [u8], alphas: &[u8]) -> ImageResult<()> {
    let layout = check(desc, data.len())?;
    let width = desc.width as usize;
    let needed = width * desc.height as usize;
    if alphas.len() < needed {
        return Err(ImageError::buffer_too_small(needed, alphas.len()));
    }
    if !layout.has_alpha() {
        debug!(format = %desc.format(), "set_alpha_from on a layout without alpha");
        return Ok(());
    }
    for_each_row(data, desc.bytes_per_line, desc.height as usize, |y, out| {
        for (x, &a) in alphas[y * width..(y + 1) * width].iter().enumerate() {
            let raw = layout.load(out, x) & !layout.alpha.mask;
            layout.store(out, x, raw | layout.alpha.write(a));
        }
    });
    Ok(())
}

/// Fills the image with one ARGB color.
pub fn fill(desc: &ImageDesc, data: &mut [u8], argb: u32) -> ImageResult<()> {
    let layout = check(desc, data.len())?;
    let width = desc.width as usize;
    let raw = layout.pack(argb);
    for_each_row(data, desc.bytes_per_line, desc.height as usize, |_, out| {
        for x in 0..width {
            layout.store(out, x, raw);
        }
    });
    Ok(())
}

/// Unpacks an image to tightly packed ARGB pixels.
pub fn convert_to_argb32(desc: &ImageDesc, data: &[u8]) -> ImageResult<Vec<u32>> {
    let layout = check(desc, data.len())?;
    let (width, height) = (desc.width as usize, desc.height as usize);
    let mut out = Vec::with_capacity(width * height);
    for y in 0..height {
        let input = row(desc, data, y);
        out.extend((0..width).map(|x| layout.unpack(layout.load(input, x))));
    }
    Ok(out)
}

/// Packs ARGB pixels (row order, `width * height` of them) into `dst`.
pub fn convert_from_argb32(argb: &[u32], desc: &ImageDesc, dst: &mut [u8]) -> ImageResult<()> {
    let layout = check(desc, dst.len())?;
    let width = desc.width as usize;
    let needed = width * desc.height as usize;
    if argb.len() < needed {
        return Err(ImageError::buffer_too_small(needed, argb.len()));
    }
    for_each_row(dst, desc.bytes_per_line, desc.height as usize, |y, out| {
        for (x, &p) in argb[y * width..(y + 1) * width].iter().enumerate() {
            layout.store(out, x, layout.pack(p));
        }
    });
    Ok(())
}

/// ARGB pixels as bytes in `R, G, B, A` order.
pub fn argb_to_rgba_bytes(argb: &[u32]) -> Vec<u8> {
    argb.iter()
        .flat_map(|&p| {
            let [b, g, r, a] = p.to_le_bytes();
            [r, g, b, a]
        })
        .collect()
}

/// Bytes in `R, G, B, A` order (or `R, G, B` when `channels == 3`) as ARGB pixels.
pub fn rgba_bytes_to_argb(bytes: &[u8], channels: usize) -> ImageResult<Vec<u32>> {
    if !matches!(channels, 3 | 4) {
        return Err(ImageError::invalid_parameter(format!("{channels} channels, expected 3 or 4")));
    }
    Ok(bytes
        .chunks_exact(channels)
        .map(|px| {
            let a = if channels == 4 { px[3] } else { 0xFF };
            u32::from_le_bytes([px[2], px[1], px[0], a])
        })
        .collect())
}

/// Root mean square difference over the four channels of two ARGB images.
///
/// Compares the common prefix of both slices; 0 when it is empty.
pub fn rmse(a: &[u32], b: &[u32]) -> f64 {
    let n = a.len().min(b.len());
    if n == 0 {
        return 0.0;
    }
    let sum: f64 = a
        .iter()
        .zip(b)
        .map(|(&p, &q)| {
            p.to_le_bytes()
                .iter()
                .zip(q.to_le_bytes())
                .map(|(&x, y)| {
                    let d = f64::from(x) - f64::from(y);
                    d * d
                })
                .sum::<f64>()
        })
        .sum();
    (sum / (n * 4) as f64).sqrt()
}
