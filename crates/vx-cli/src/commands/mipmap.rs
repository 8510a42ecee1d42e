//! Mipmap command
//!
//! Writes each level of the chain as `<stem>_mip<N>.png`.

use crate::MipmapArgs;
use anyhow::{Context, Result};
use std::fs;
use tracing::trace;
use vx_image::mipmap::generate_mip_chain;

pub fn run(args: MipmapArgs, verbose: bool) -> Result<()> {
    trace!(input = %args.input.display(), output = %args.output.display(), "mipmap::run");
    let picture = super::load_png(&args.input)?;
    let chain = generate_mip_chain(&picture.argb, picture.width, picture.height)?;

    fs::create_dir_all(&args.output)
        .with_context(|| format!("Failed to create directory: {}", args.output.display()))?;
    let stem = args
        .input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());

    for (index, level) in chain.iter().enumerate() {
        let path = args.output.join(format!("{stem}_mip{index}.png"));
        super::save_png(&path, level.width, level.height, &level.pixels)?;
        if verbose {
            println!("  {:2}: {}x{} -> {}", index, level.width, level.height, path.display());
        }
    }
    println!("Wrote {} levels to {}", chain.len(), args.output.display());
    Ok(())
}
