//! Normal map command

use crate::NormalmapArgs;
use anyhow::Result;
use tracing::trace;
use vx_image::normalmap::convert_to_normal_map;

pub fn run(args: NormalmapArgs, verbose: bool) -> Result<()> {
    trace!(input = %args.input.display(), strength = args.strength, "normalmap::run");
    let picture = super::load_png(&args.input)?;
    let normals = convert_to_normal_map(&picture.argb, picture.width, picture.height, args.strength)?;
    super::save_png(&args.output, picture.width, picture.height, &normals)?;

    if verbose {
        println!(
            "Normal map {}x{} (strength {}) written to {}",
            picture.width,
            picture.height,
            args.strength,
            args.output.display()
        );
    }
    Ok(())
}
