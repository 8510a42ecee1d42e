//! CLI command implementations

pub mod dxt;
pub mod fitbox;
pub mod info;
pub mod mipmap;
pub mod normalmap;
pub mod resize;

use anyhow::{bail, Context, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::debug;
use vx_core::{ImageDesc, Masks, PixelFormat};
use vx_image::convert::{argb_to_rgba_bytes, rgba_bytes_to_argb};

/// A decoded image as ARGB pixels.
pub struct Picture {
    pub width: u32,
    pub height: u32,
    /// Channels stored in the file (3 or 4)
    pub channels: usize,
    pub argb: Vec<u32>,
}

impl Picture {
    /// Layout of the pixels as they were stored in the file.
    pub fn file_format(&self) -> PixelFormat {
        let (bpp, alpha) = if self.channels == 4 { (32, 0xFF00_0000) } else { (24, 0) };
        let masks = Masks::new(alpha, 0x0000_00FF, 0x0000_FF00, 0x00FF_0000);
        ImageDesc::from_masks(self.width, self.height, bpp, masks)
            .map(|d| d.format())
            .unwrap_or_default()
    }
}

/// Load an 8-bit PNG, expanding gray and palette images to RGB(A).
pub fn load_png(path: &Path) -> Result<Picture> {
    let file = File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;
    let mut decoder = png::Decoder::new(BufReader::new(file));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .with_context(|| format!("Failed to load: {}", path.display()))?;

    let buf_size = reader
        .output_buffer_size()
        .context("cannot determine output buffer size")?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .with_context(|| format!("Failed to decode: {}", path.display()))?;
    let bytes = &buf[..info.buffer_size()];

    let (channels, rgba): (usize, Vec<u8>) = match info.color_type {
        png::ColorType::Rgb => (3, bytes.to_vec()),
        png::ColorType::Rgba => (4, bytes.to_vec()),
        png::ColorType::Grayscale => (3, bytes.iter().flat_map(|&g| [g, g, g]).collect()),
        png::ColorType::GrayscaleAlpha => (4, bytes.chunks_exact(2).flat_map(|ga| [ga[0], ga[0], ga[0], ga[1]]).collect()),
        other => bail!("{}: unsupported color type {other:?}", path.display()),
    };
    let argb = rgba_bytes_to_argb(&rgba, channels)?;
    debug!(path = %path.display(), width = info.width, height = info.height, channels, "Loaded PNG");

    Ok(Picture {
        width: info.width,
        height: info.height,
        channels,
        argb,
    })
}

/// Save ARGB pixels as an 8-bit RGBA PNG.
pub fn save_png(path: &Path, width: u32, height: u32, argb: &[u32]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create: {}", path.display()))?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .with_context(|| format!("Failed to save: {}", path.display()))?;
    writer
        .write_image_data(&argb_to_rgba_bytes(argb))
        .with_context(|| format!("Failed to save: {}", path.display()))?;
    debug!(path = %path.display(), width, height, "Saved PNG");
    Ok(())
}

/// Format file size for display
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_png_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rt.png");
        let argb = vec![0xFF10_2030, 0x8040_5060, 0x0000_0000, 0xFFFF_FFFF];
        save_png(&path, 2, 2, &argb).unwrap();

        let pic = load_png(&path).unwrap();
        assert_eq!((pic.width, pic.height, pic.channels), (2, 2, 4));
        assert_eq!(pic.argb, argb);
        assert_eq!(pic.file_format(), PixelFormat::Abgr8888);
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.00 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.00 MB");
    }
}
