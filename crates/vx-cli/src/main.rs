//! vx - inspection tool for the vx image and geometry utilities

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "vx")]
#[command(author, version, about = "Texture and geometry utilities")]
#[command(long_about = "
Runs the vx pixel and geometry kernels on files.

Examples:
  vx info texture.png                       # Size, pixel format, mips, DXT sizes
  vx dxt texture.png -f dxt5 -o preview.png # Compress, decompress, report error
  vx resize texture.png -w 256 -H 256 -f lanczos -o small.png
  vx normalmap height.png -s 4 -o normals.png
  vx mipmap texture.png -o mips/
  vx fitbox points.txt                      # Best-fit oriented box
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Display image information
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Round-trip an image through DXT compression
    Dxt(DxtArgs),

    /// Resize/scale image
    #[command(visible_alias = "r")]
    Resize(ResizeArgs),

    /// Build a normal map from a height image
    #[command(visible_alias = "nm")]
    Normalmap(NormalmapArgs),

    /// Write every mip level of an image
    Mipmap(MipmapArgs),

    /// Fit an oriented bounding box to a point cloud
    Fitbox(FitboxArgs),
}

#[derive(Args)]
struct InfoArgs {
    /// Input image(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,
}

#[derive(Args)]
struct DxtArgs {
    /// Input image
    input: PathBuf,

    /// Format: dxt1, dxt3, dxt5
    #[arg(short, long, default_value = "dxt1")]
    format: String,

    /// Skip least-squares endpoint refinement
    #[arg(long)]
    fast: bool,

    /// Write the decompressed preview here
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct ResizeArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Target width
    #[arg(short, long)]
    width: Option<usize>,

    /// Target height
    #[arg(short = 'H', long)]
    height: Option<usize>,

    /// Scale factor (e.g., 0.5, 2.0)
    #[arg(short, long)]
    scale: Option<f32>,

    /// Filter: nearest, bilinear, bicubic, lanczos
    #[arg(short, long, default_value = "lanczos")]
    filter: String,

    /// Fit mode: exact, fit, fill
    #[arg(long, default_value = "exact")]
    fit: String,
}

#[derive(Args)]
struct NormalmapArgs {
    /// Height image (luminance)
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Slope multiplier
    #[arg(short, long, default_value = "1.0")]
    strength: f32,
}

#[derive(Args)]
struct MipmapArgs {
    /// Input image
    input: PathBuf,

    /// Output directory
    #[arg(short, long)]
    output: PathBuf,
}

#[derive(Args)]
struct FitboxArgs {
    /// Text file with one `x y z` point per line
    input: PathBuf,

    /// Extra margin added to every half extent
    #[arg(short, long, default_value = "0.0")]
    border: f32,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Info(args) => commands::info::run(args, cli.verbose),
        Commands::Dxt(args) => commands::dxt::run(args, cli.verbose),
        Commands::Resize(args) => commands::resize::run(args, cli.verbose),
        Commands::Normalmap(args) => commands::normalmap::run(args, cli.verbose),
        Commands::Mipmap(args) => commands::mipmap::run(args, cli.verbose),
        Commands::Fitbox(args) => commands::fitbox::run(args, cli.verbose),
    }
}
