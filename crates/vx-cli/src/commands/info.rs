//! Image info command.
//!
//! Displays dimensions, the stored pixel format and what the texture
//! would cost as a mip chain and as DXT blocks.

use crate::InfoArgs;
use anyhow::Result;
use std::fs;
use vx_image::dxt::{compressed_size, DxtFormat};
use vx_image::mipmap::mip_level_count;

/// Runs the info command.
pub fn run(args: InfoArgs, verbose: bool) -> Result<()> {
    for path in &args.input {
        let file_size = fs::metadata(path)?.len();
        let picture = super::load_png(path)?;
        let (w, h) = (picture.width, picture.height);

        println!("{}", path.display());
        println!("  Resolution: {}x{}", w, h);
        println!("  Channels:   {}", picture.channels);
        println!("  Format:     {}", picture.file_format());
        println!("  File size:  {}", super::format_size(file_size));
        println!("  Mip levels: {}", mip_level_count(w, h));

        if verbose {
            let (mut lw, mut lh) = (w, h);
            for level in 0..mip_level_count(w, h) {
                println!("    {level:2}: {lw}x{lh}");
                (lw, lh) = ((lw / 2).max(1), (lh / 2).max(1));
            }
        }

        for format in [DxtFormat::Dxt1, DxtFormat::Dxt3, DxtFormat::Dxt5] {
            let size = compressed_size(w, h, format) as u64;
            println!("  {}:       {}", format.name().to_uppercase(), super::format_size(size));
        }

        if args.input.len() > 1 {
            println!();
        }
    }

    Ok(())
}
