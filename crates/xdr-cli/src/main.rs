//! xdrcal - display calibration patterns from the command line
//!
//! Renders the calibration pages to PNG and exposes the EOTF and blend math
//! for inspection.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use xdr_transfer::Eotf;

mod commands;

#[derive(Parser)]
#[command(name = "xdrcal")]
#[command(author, version, about = "HDR/SDR display calibration patterns")]
#[command(long_about = "
Renders display calibration test patterns and inspects the math behind them.

Examples:
  xdrcal pattern -o board.png                          # SDR chessboard, A=00 B=FF
  xdrcal pattern --page ramp --hdr --eotf pq -o ramp.png --peak-nits 1000 --desktop-hdr
  xdrcal pattern --page image --hdr --image still.png --source pq -o blend.png
  xdrcal eotf pq 0 497 1023                            # codes to nits
  xdrcal eotf gamma22 --to-code 80 400                 # nits to codes
  xdrcal eotf pq 520 --convert srgb                    # same luminance, other curve
  xdrcal blend --hdr --peak 8 --target 4 --white-level 1.5
  xdrcal labels --hdr --eotf pq -a 0 -b 1023
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,

    /// Session config (YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a calibration page to PNG
    #[command(visible_alias = "p")]
    Pattern(PatternArgs),

    /// Convert between codes and nits
    #[command(visible_alias = "e")]
    Eotf(EotfArgs),

    /// Print blend parameters for a reference image
    #[command(visible_alias = "b")]
    Blend(BlendArgs),

    /// Print slider strings, captions and ramp labels
    #[command(visible_alias = "l")]
    Labels(LabelsArgs),
}

/// Desktop capability overrides, applied over the config file.
#[derive(Args, Clone, Default)]
struct DisplayArgs {
    /// Desktop reports HDR enabled
    #[arg(long, conflicts_with = "desktop_sdr")]
    desktop_hdr: bool,

    /// Desktop reports HDR disabled
    #[arg(long)]
    desktop_sdr: bool,

    /// Display peak luminance in nits
    #[arg(long)]
    peak_nits: Option<f32>,

    /// SDR white level multiplier (1.0 = 80 nits)
    #[arg(long)]
    white_level: Option<f32>,
}

/// Mode and code selection shared by several commands.
#[derive(Args, Clone, Default)]
struct ModeArgs {
    /// Render in HDR (scRGB)
    #[arg(long)]
    hdr: bool,

    /// EOTF: pq, srgb, gamma22, gamma24
    #[arg(short, long)]
    eotf: Option<Eotf>,

    /// Code A
    #[arg(short = 'a', long = "code-a")]
    code_a: Option<f32>,

    /// Code B (default: 255 in SDR, display peak in HDR)
    #[arg(short = 'b', long = "code-b")]
    code_b: Option<f32>,
}

/// Arguments for the `pattern` command.
#[derive(Args)]
struct PatternArgs {
    /// Output PNG
    #[arg(short, long)]
    output: PathBuf,

    /// Page: chessboard, ramp, banding, image or 0-3
    #[arg(short, long)]
    page: Option<String>,

    #[command(flatten)]
    mode: ModeArgs,

    #[command(flatten)]
    display: DisplayArgs,

    /// Surface width in DIPs
    #[arg(long, default_value = "1280")]
    width: f32,

    /// Surface height in DIPs
    #[arg(long, default_value = "720")]
    height: f32,

    /// Size the surface as a calibration area covering this percentage of
    /// the width x height window
    #[arg(long, value_name = "PERCENT")]
    area: Option<f32>,

    /// DIP to device pixel scale
    #[arg(short, long, default_value = "1.0")]
    scale: f32,

    /// Reference image (PNG) for the image page
    #[arg(short, long)]
    image: Option<PathBuf>,

    /// Transfer of the reference image: srgb or pq
    #[arg(long, default_value = "srgb")]
    source: String,

    /// Gamut of the reference image: bt709, p3, bt2100 (default by source)
    #[arg(long)]
    gamut: Option<String>,
}

/// Arguments for the `eotf` command.
#[derive(Args)]
struct EotfArgs {
    /// EOTF: pq, srgb, gamma22, gamma24
    eotf: Eotf,

    /// Codes (or nits with --to-code); none prints a table
    values: Vec<f32>,

    /// Treat values as nits and print codes
    #[arg(long)]
    to_code: bool,

    /// Re-express codes under another EOTF, keeping luminance
    #[arg(long, conflicts_with = "to_code")]
    convert: Option<Eotf>,

    /// Code step for the table
    #[arg(long, default_value = "64")]
    step: u32,
}

/// Arguments for the `blend` command.
#[derive(Args)]
struct BlendArgs {
    /// HDR output
    #[arg(long)]
    hdr: bool,

    /// Peak of the full-range decode, scRGB
    #[arg(long)]
    peak: f32,

    /// Target peak in scRGB
    #[arg(long, conflicts_with = "code_b")]
    target: Option<f32>,

    /// Target peak as code B through --eotf
    #[arg(short = 'b', long = "code-b")]
    code_b: Option<f32>,

    /// EOTF for --code-b
    #[arg(short, long, default_value = "pq")]
    eotf: Eotf,

    /// SDR white level multiplier
    #[arg(long)]
    white_level: Option<f32>,
}

/// Arguments for the `labels` command.
#[derive(Args)]
struct LabelsArgs {
    #[command(flatten)]
    mode: ModeArgs,

    #[command(flatten)]
    display: DisplayArgs,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| level.into()))
        .with(tracing_subscriber::fmt::layer().without_time().with_writer(std::io::stderr))
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

    let config = commands::load_config(cli.config.as_deref())?;
    let verbose = cli.verbose > 0;

    match cli.command {
        Commands::Pattern(args) => commands::pattern::run(args, &config, verbose),
        Commands::Eotf(args) => commands::eotf::run(args, verbose),
        Commands::Blend(args) => commands::blend::run(args, verbose),
        Commands::Labels(args) => commands::labels::run(args, &config, verbose),
    }
}
