//! chroma - multi-representation color conversion CLI
//!
//! Front end of `chroma-engine`: parses one color from arguments, runs the
//! engine over the selected observers, illuminants, transforms and working
//! spaces, and prints every representation.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use chroma_engine::BitDepth;
use chroma_spectral::{SpectrumType, Tm30Format};

mod commands;

#[derive(Parser)]
#[command(name = "chroma")]
#[command(author, version, about = "Multi-representation color conversion engine")]
#[command(long_about = "
Converts one color, given in exactly one input model, into every supported
representation for each selected observer, illuminant, chromatic adaptation
transform and RGB working space.

Examples:
  chroma convert --rgb 132 205 12                       # sRGB, D65, Bradford
  chroma convert --lab 50 10 -20 --illuminant-list CIE --cat All
  chroma convert --xyz 0.2 0.3 0.4 --observer All --rgb-space All --json
  chroma convert --wavelength 550
  chroma convert --spectrum-file sample.json --interpolate 1 --tm30 simple
  chroma convert --rgb 132 205 12 --recover --json --pretty -o out.json
  chroma list illuminants --list ISO_7589
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a color into every representation
    #[command(visible_alias = "c")]
    Convert(ConvertArgs),

    /// List reference data (observers, illuminants, transforms, spaces)
    #[command(visible_alias = "l")]
    List(ListArgs),
}

#[derive(Args)]
struct ConvertArgs {
    /// RGB components in the input working space
    #[arg(long, num_args = 1..=3, value_names = ["R", "G", "B"], allow_negative_numbers = true)]
    rgb: Option<Vec<f64>>,

    /// CIE XYZ components (Y of the white is 1)
    #[arg(long, num_args = 1..=3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true)]
    xyz: Option<Vec<f64>>,

    /// CIELAB components
    #[arg(long, num_args = 1..=3, value_names = ["L", "A", "B"], allow_negative_numbers = true)]
    lab: Option<Vec<f64>>,

    /// CIELCHab components, hue in degrees
    #[arg(long, num_args = 1..=3, value_names = ["L", "C", "H"], allow_negative_numbers = true)]
    lchab: Option<Vec<f64>>,

    /// CIELUV components
    #[arg(long, num_args = 1..=3, value_names = ["L", "U", "V"], allow_negative_numbers = true)]
    luv: Option<Vec<f64>>,

    /// CIELCHuv components, hue in degrees
    #[arg(long, num_args = 1..=3, value_names = ["L", "C", "H"], allow_negative_numbers = true)]
    lchuv: Option<Vec<f64>>,

    /// Monochromatic wavelength in nm (360-830)
    #[arg(short = 'w', long)]
    wavelength: Option<f64>,

    /// First wavelength of the spectral data (nm)
    #[arg(long)]
    spectrum_start: Option<f64>,

    /// Last wavelength of the spectral data (nm)
    #[arg(long)]
    spectrum_stop: Option<f64>,

    /// Spectral sample interval (nm)
    #[arg(long)]
    spectrum_interval: Option<f64>,

    /// Spectral measurement type: Emissive, Reflective, Transmissive
    #[arg(long)]
    spectrum_type: Option<SpectrumType>,

    /// Spectral samples, comma separated
    #[arg(long, value_delimiter = ',', num_args = 1.., allow_negative_numbers = true)]
    spectrum_data: Option<Vec<f64>>,

    /// JSON file holding the spectral group (start, stop, interval, type, data)
    #[arg(long)]
    spectrum_file: Option<PathBuf>,

    /// Bit depth of the input triplet: 8, 15+1, 16, 32
    #[arg(short = 'd', long, default_value = "8")]
    bit_depth: BitDepth,

    /// Observer name, or All
    #[arg(long)]
    observer: Option<String>,

    /// Input illuminant
    #[arg(short = 'i', long)]
    illuminant: Option<String>,

    /// Illuminant list replacing the single illuminant: CIE, ISO_7589, All
    #[arg(long)]
    illuminant_list: Option<String>,

    /// Chromatic adaptation transform, or All
    #[arg(long)]
    cat: Option<String>,

    /// Output RGB working space, or All
    #[arg(short = 's', long)]
    rgb_space: Option<String>,

    /// Working space the --rgb input is encoded in
    #[arg(long)]
    input_rgb_space: Option<String>,

    /// Resample spectral data to this interval (nm)
    #[arg(long, value_name = "NM")]
    interpolate: Option<f64>,

    /// Recover a reflectance for tristimulus input
    #[arg(long)]
    recover: bool,

    /// TM-30 report format: full, intermediate, simple
    #[arg(long, value_name = "FORMAT")]
    tm30: Option<Tm30Format>,

    /// JSON file of previously computed records to reuse
    #[arg(long)]
    precalculated: Option<PathBuf>,

    /// JSON engine configuration (recovery, recovery_cat, viewing)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write JSON results to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Machine-readable output (JSON)
    #[arg(long)]
    json: bool,

    /// Pretty-print JSON
    #[arg(long)]
    pretty: bool,
}

/// Reference tables.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum ListKind {
    Observers,
    Illuminants,
    Cats,
    Spaces,
    Lists,
}

#[derive(Args)]
struct ListArgs {
    /// What to list
    kind: ListKind,

    /// Restrict illuminants to a selection list
    #[arg(long)]
    list: Option<String>,

    /// Machine-readable output (JSON)
    #[arg(long)]
    json: bool,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
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

    let verbose = cli.verbose > 0;
    match cli.command {
        Commands::Convert(args) => commands::convert::run(args, verbose),
        Commands::List(args) => commands::list::run(args, verbose),
    }
}
