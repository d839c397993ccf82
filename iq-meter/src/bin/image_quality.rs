//! Image quality analysis tool.
//!
//! Loads an image, runs every quality estimator over its luminance channel,
//! prints a report and saves the results as JSON next to the image.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use iq_meter::persist::{default_output_path, save_results, to_json_string};
use iq_meter::report::{render_fallbacks, render_text};
use iq_meter::{AnalysisConfig, ImageQualityAnalyzer, PhysicalSize};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Measure MTF, sharpness, resolution, discretization artifacts, noise and contrast of an image"
)]
struct Args {
    #[arg(help = "Image file to analyze")]
    image: PathBuf,

    #[arg(
        long,
        requires = "physical_height_mm",
        help = "Physical width of the imaged field in millimetres"
    )]
    physical_width_mm: Option<f64>,

    #[arg(
        long,
        requires = "physical_width_mm",
        help = "Physical height of the imaged field in millimetres"
    )]
    physical_height_mm: Option<f64>,

    #[arg(long, help = "JSON file with analysis parameters")]
    config: Option<PathBuf>,

    #[arg(
        short,
        long,
        help = "Where to save the JSON results (default: <image stem>_analysis.json)"
    )]
    output: Option<PathBuf>,

    #[arg(long, conflicts_with = "output", help = "Do not save results to disk")]
    no_save: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text, help = "Format printed to stdout")]
    format: OutputFormat,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => AnalysisConfig::load_from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => AnalysisConfig::default(),
    };

    let physical = match (args.physical_width_mm, args.physical_height_mm) {
        (Some(width), Some(height)) => {
            Some(PhysicalSize::new(width, height).context("Invalid physical size")?)
        }
        _ => None,
    };

    let mut analyzer =
        ImageQualityAnalyzer::new(config).context("Invalid analysis configuration")?;
    analyzer
        .load_image(&args.image)
        .with_context(|| format!("Failed to load image {}", args.image.display()))?;

    let outcome = analyzer
        .perform_full_analysis(physical)
        .context("Analysis failed")?;

    match args.format {
        OutputFormat::Text => {
            print!("{}", render_text(&outcome.results));
            print!("{}", render_fallbacks(&outcome.fallbacks));
        }
        OutputFormat::Json => println!("{}", to_json_string(&outcome.results)?),
    }

    if !args.no_save {
        let output = args
            .output
            .clone()
            .unwrap_or_else(|| default_output_path(&args.image));
        save_results(&outcome.results, &output)
            .with_context(|| format!("Failed to save results to {}", output.display()))?;
    } else {
        info!("Skipping results file");
    }

    Ok(())
}
