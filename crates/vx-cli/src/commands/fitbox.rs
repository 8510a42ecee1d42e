//! Best-fit box command
//!
//! Reads a point cloud (`x y z` per line, `#` comments) and prints the
//! oriented box fitted to it alongside the axis-aligned one.

use crate::FitboxArgs;
use anyhow::{bail, Context, Result};
use std::fs;
use tracing::debug;
use vx_math::{best_fit_obb, BBox, Vec3};
use vx_system::TimeProfiler;

/// Parses whitespace separated `x y z` lines.
pub fn parse_points(text: &str) -> Result<Vec<Vec3>> {
    let mut points = Vec::new();
    for (number, line) in text.lines().enumerate() {
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let values = line
            .split_whitespace()
            .map(str::parse::<f32>)
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("line {}: bad number", number + 1))?;
        let [x, y, z] = values[..] else {
            bail!("line {}: expected 3 values, got {}", number + 1, values.len());
        };
        points.push(Vec3::new(x, y, z));
    }
    Ok(points)
}

/// Volume of the axis-aligned box around `points`.
fn aabb_volume(points: &[Vec3]) -> f32 {
    let size = BBox::from_points(points).size();
    size.x * size.y * size.z
}

fn fmt_vec(v: Vec3) -> String {
    format!("({:.4}, {:.4}, {:.4})", v.x, v.y, v.z)
}

pub fn run(args: FitboxArgs, verbose: bool) -> Result<()> {
    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read: {}", args.input.display()))?;
    let points = parse_points(&text)?;
    debug!(points = points.len(), border = args.border, "Fitting box");

    let mut timer = TimeProfiler::new();
    let Some(obb) = best_fit_obb(&points, args.border) else {
        bail!("{}: no points", args.input.display());
    };
    let fit_ms = timer.split_ms();

    let axis_volume = aabb_volume(&points);
    let obb_volume = 8.0 * obb.extents.x * obb.extents.y * obb.extents.z;

    println!("{} points", points.len());
    println!("  Center:  {}", fmt_vec(obb.center));
    for (i, axis) in obb.axes.iter().enumerate() {
        println!("  Axis {}:  {}  half extent {:.4}", i, fmt_vec(*axis), obb.extents[i]);
    }
    println!("  Volume:  {:.4} (axis-aligned {:.4})", obb_volume, axis_volume);
    if verbose {
        println!("  Fitted in {:.3} ms", fit_ms);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_points() {
        let pts = parse_points("# cloud\n1 2 3\n\n  -1.5\t0 4 # tail\n").unwrap();
        assert_eq!(pts, vec![Vec3::new(1.0, 2.0, 3.0), Vec3::new(-1.5, 0.0, 4.0)]);
        assert!(parse_points("1 2\n").is_err());
        assert!(parse_points("1 2 x\n").is_err());
        assert!(parse_points("").unwrap().is_empty());
    }

    #[test]
    fn test_aabb_volume() {
        let pts = [Vec3::new(0.0, 0.0, 0.0), Vec3::new(4.0, 2.0, 1.0), Vec3::new(1.0, 1.0, 0.5)];
        assert_eq!(aabb_volume(&pts), 8.0);
        assert_eq!(aabb_volume(&pts[..1]), 0.0);
    }
}
