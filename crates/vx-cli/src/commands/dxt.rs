//! DXT command
//!
//! Compresses an image, decompresses it again and reports the error.

use crate::DxtArgs;
use anyhow::Result;
use tracing::{info, trace};
use vx_image::convert::rmse;
use vx_image::dxt::{self, DxtFormat, Quality};
use vx_system::TimeProfiler;

pub fn run(args: DxtArgs, verbose: bool) -> Result<()> {
    trace!(input = %args.input.display(), format = %args.format, "dxt::run");
    let picture = super::load_png(&args.input)?;
    let format: DxtFormat = args.format.parse()?;
    let quality = if args.fast { Quality::Fast } else { Quality::High };
    let (w, h) = (picture.width, picture.height);

    let mut timer = TimeProfiler::new();
    let blocks = dxt::compress(&picture.argb, w, h, format, quality)?;
    let encode_ms = timer.split_ms();
    let decoded = dxt::decompress(&blocks, w, h, format)?;
    let decode_ms = timer.split_ms();

    let error = rmse(&picture.argb, &decoded);
    let raw = picture.argb.len() * 4;
    info!(%format, ?quality, bytes = blocks.len(), rmse = error, "DXT round trip");

    println!("{}: {}x{} -> {}", args.input.display(), w, h, format.name().to_uppercase());
    println!("  Size:  {} ({:.1}:1)", super::format_size(blocks.len() as u64), raw as f64 / blocks.len() as f64);
    println!("  RMSE:  {:.3}", error);
    if verbose {
        println!("  Encode: {:.2} ms, decode: {:.2} ms", encode_ms, decode_ms);
    }

    if let Some(output) = &args.output {
        super::save_png(output, w, h, &decoded)?;
        if verbose {
            println!("Preview written to {}", output.display());
        }
    }

    Ok(())
}
