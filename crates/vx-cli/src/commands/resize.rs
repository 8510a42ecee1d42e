//! Resize command
//!
//! Scales images using various resampling filters.

use crate::ResizeArgs;
use anyhow::{bail, Result};
use tracing::{debug, trace};
use vx_image::resize::{fill_dimensions, fit_dimensions, resize_argb32, Filter};

pub fn run(args: ResizeArgs, verbose: bool) -> Result<()> {
    trace!(input = %args.input.display(), "resize::run");
    let picture = super::load_png(&args.input)?;
    let src_w = picture.width as usize;
    let src_h = picture.height as usize;

    // Determine target dimensions
    let (dst_w, dst_h) = match (args.width, args.height, args.scale) {
        (Some(w), Some(h), _) => match args.fit.to_lowercase().as_str() {
            "exact" => (w, h),
            "fit" => fit_dimensions(src_w, src_h, w, h),
            "fill" => fill_dimensions(src_w, src_h, w, h),
            other => bail!("Unknown fit mode '{other}' (expected exact, fit or fill)"),
        },
        (Some(w), None, _) => {
            let h = (src_h as f32 * w as f32 / src_w as f32).round() as usize;
            (w, h)
        }
        (None, Some(h), _) => {
            let w = (src_w as f32 * h as f32 / src_h as f32).round() as usize;
            (w, h)
        }
        (None, None, Some(s)) => {
            let w = (src_w as f32 * s).round() as usize;
            let h = (src_h as f32 * s).round() as usize;
            (w, h)
        }
        _ => bail!("Specify --width, --height, or --scale"),
    };
    let (dst_w, dst_h) = (dst_w.max(1), dst_h.max(1));

    let filter: Filter = args.filter.parse()?;
    debug!(src_w, src_h, dst_w, dst_h, %filter, "Resizing");
    if verbose {
        println!("Resizing {}x{} -> {}x{} ({})", src_w, src_h, dst_w, dst_h, filter);
    }

    let resized = resize_argb32(
        &picture.argb,
        picture.width,
        picture.height,
        dst_w as u32,
        dst_h as u32,
        filter,
    )?;
    super::save_png(&args.output, dst_w as u32, dst_h as u32, &resized)?;

    if verbose {
        println!("Done.");
    }

    Ok(())
}
