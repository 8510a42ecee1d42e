//! Whole-image DXT round trips.

use vx_core::{argb, PixelFormat};
use vx_image::convert::rmse;
use vx_image::dxt::{self, compressed_size, DxtFormat, Quality};
use vx_image::mipmap::generate_mip_chain;

/// Diagonal ramp whose colors lie on one line in RGB space.
fn ramp(width: u32, height: u32, alpha: impl Fn(u32, u32) -> u8) -> Vec<u32> {
    let mut out = Vec::with_capacity((width * height) as usize);
    for y in 0..height {
        for x in 0..width {
            let v = (x * 12 + y * 3).min(255) as u8;
            out.push(argb(alpha(x, y), v, v, 255 - v));
        }
    }
    out
}

#[test]
fn sizes_match_pixel_format() {
    for format in [DxtFormat::Dxt1, DxtFormat::Dxt3, DxtFormat::Dxt5] {
        for (w, h) in [(1, 1), (4, 4), (5, 3), (16, 9), (64, 32)] {
            assert_eq!(compressed_size(w, h, format), format.pixel_format().compressed_size(w, h));
        }
    }
    assert_eq!(compressed_size(16, 16, DxtFormat::Dxt1), 128);
    assert_eq!(compressed_size(16, 16, DxtFormat::Dxt5), 256);
    assert_eq!(DxtFormat::from_pixel_format(PixelFormat::Dxt5), Some(DxtFormat::Dxt5));
}

#[test]
fn opaque_ramp_round_trips() {
    let src = ramp(16, 16, |_, _| 0xFF);
    for format in [DxtFormat::Dxt1, DxtFormat::Dxt3, DxtFormat::Dxt5] {
        let blocks = dxt::compress(&src, 16, 16, format, Quality::High).unwrap();
        assert_eq!(blocks.len(), compressed_size(16, 16, format));

        let back = dxt::decompress(&blocks, 16, 16, format).unwrap();
        assert!(back.iter().all(|p| p >> 24 == 0xFF));
        let err = rmse(&src, &back);
        assert!(err < 8.0, "{format}: rmse {err}");
    }
}

#[test]
fn alpha_ramp_round_trips() {
    let src = ramp(16, 16, |x, y| (x * 16 + y) as u8);
    for format in [DxtFormat::Dxt3, DxtFormat::Dxt5] {
        let blocks = dxt::compress(&src, 16, 16, format, Quality::High).unwrap();
        let back = dxt::decompress(&blocks, 16, 16, format).unwrap();
        let err = rmse(&src, &back);
        assert!(err < 8.0, "{format}: rmse {err}");
    }
}

#[test]
fn dxt1_keeps_cutout_mask() {
    let src = ramp(8, 8, |x, _| if x < 4 { 0 } else { 0xFF });
    let blocks = dxt::compress(&src, 8, 8, DxtFormat::Dxt1, Quality::High).unwrap();
    let back = dxt::decompress(&blocks, 8, 8, DxtFormat::Dxt1).unwrap();
    for (i, p) in back.iter().enumerate() {
        let opaque = i % 8 >= 4;
        assert_eq!(p >> 24 == 0xFF, opaque, "pixel {i}: {p:08X}");
    }
}

#[test]
fn mip_chain_compresses_down_to_one_pixel() {
    let src = ramp(16, 8, |_, _| 0xFF);
    let chain = generate_mip_chain(&src, 16, 8).unwrap();
    assert_eq!(chain.len(), 5);
    for level in &chain {
        let blocks = dxt::compress(&level.pixels, level.width, level.height, DxtFormat::Dxt5, Quality::Fast).unwrap();
        let back = dxt::decompress(&blocks, level.width, level.height, DxtFormat::Dxt5).unwrap();
        assert_eq!(back.len(), level.pixels.len());
    }
}
