use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::{error, info};

use spectrumview_rs::logger;
use spectrumview_rs::map_pipeline::{IntensityMode, MapConfig, OutputFormat, SpectrumMapPipeline};

/// Build 2-D spatial intensity maps from a directory of spectrum files.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Directory of per-position measurement files
    input_dir: PathBuf,

    /// Output files to produce
    #[arg(value_enum)]
    format: FormatArg,

    /// Intensity extraction mode
    #[arg(value_enum)]
    mode: ModeArg,

    /// Output file name stem; the output kind is appended per file
    output: String,

    /// Energy of interest
    energy: f64,

    /// Channels to integrate per side (integrated mode only)
    #[arg(long)]
    channels: Option<usize>,

    /// Scale the formatted grid by its maximum before writing the bitmap
    #[arg(long, default_value_t = false)]
    normalize: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Raw,
    Grid,
    Bmp,
    All,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Raw => OutputFormat::Raw,
            FormatArg::Grid => OutputFormat::Grid,
            FormatArg::Bmp => OutputFormat::Bmp,
            FormatArg::All => OutputFormat::All,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ModeArg {
    Interpolated,
    Integrated,
}

fn intensity_mode(cli: &Cli) -> anyhow::Result<IntensityMode> {
    match cli.mode {
        ModeArg::Interpolated => {
            if cli.channels.is_some() {
                anyhow::bail!("--channels only applies to integrated mode");
            }
            Ok(IntensityMode::Interpolated { energy: cli.energy })
        }
        ModeArg::Integrated => {
            let channels = cli
                .channels
                .context("--channels is required in integrated mode")?;
            Ok(IntensityMode::Integrated {
                energy: cli.energy,
                channels,
            })
        }
    }
}

fn main() -> ExitCode {
    logger::init();
    let cli = Cli::parse();

    let mode = match intensity_mode(&cli) {
        Ok(mode) => mode,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let config = MapConfig::new(mode)
        .format(cli.format.into())
        .normalize(cli.normalize);
    let pipeline = SpectrumMapPipeline::new(config);

    info!("Spectrum map pipeline initialized");
    info!("Mode: {:?}", pipeline.config().mode);
    info!("Format: {:?}", pipeline.config().format);

    match pipeline.run(&cli.input_dir, &cli.output) {
        Ok(()) => {
            info!("Map build successful");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Map build failed: {e}");
            ExitCode::FAILURE
        }
    }
}
