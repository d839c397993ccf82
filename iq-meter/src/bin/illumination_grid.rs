//! Discrete illumination simulator.
//!
//! Prints the photodiode-matrix response to a sharp or linearly blurred
//! light/dark boundary and optionally saves it as an 8-bit image that can be
//! fed back into `image_quality` as a vertical-edge target.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ndarray::Array2;
use shared::image_proc::illumination::SensorGrid;
use shared::image_proc::{f64_to_u8_scaled, save_u8_image};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Subcommand, Debug)]
enum Boundary {
    /// Sharp boundary at a single position
    Sharp {
        #[arg(long, help = "Boundary position in micrometres")]
        position_um: f64,
    },
    /// Boundary blurred linearly between two positions
    Blurred {
        #[arg(long, help = "Start of the blur zone in micrometres")]
        start_um: f64,
        #[arg(long, help = "End of the blur zone in micrometres")]
        end_um: f64,
    },
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Simulate discrete illumination of a photodiode matrix across a boundary"
)]
struct Args {
    #[command(subcommand)]
    boundary: Boundary,

    #[arg(long, default_value = "8.0", help = "Photodiode aperture width (um)")]
    aperture_um: f64,

    #[arg(long, default_value = "10.0", help = "Photodiode pitch (um)")]
    pitch_um: f64,

    #[arg(long, default_value = "20.0", help = "Illumination before the boundary (%)")]
    e1: f64,

    #[arg(long, default_value = "80.0", help = "Illumination after the boundary (%)")]
    e2: f64,

    #[arg(short = 'n', long, default_value = "20", help = "Photodiodes per side")]
    num_pixels: usize,

    #[arg(short, long, help = "Save the matrix as an 8-bit image (0-100% mapped to 0-255)")]
    output: Option<PathBuf>,
}

fn print_table(grid: &Array2<f64>) {
    let header: Vec<String> = (0..grid.ncols()).map(|c| format!("{c:>6}")).collect();
    println!("   n |{}", header.join(""));
    // Every row is identical; one is enough to show the profile.
    if let Some(row) = grid.rows().into_iter().next() {
        let values: Vec<String> = row.iter().map(|v| format!("{v:>6.1}")).collect();
        println!("   E |{}", values.join(""));
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let sensor = SensorGrid {
        aperture_um: args.aperture_um,
        pitch_um: args.pitch_um,
        e1: args.e1,
        e2: args.e2,
        num_pixels: args.num_pixels,
    };

    let grid = match args.boundary {
        Boundary::Sharp { position_um } => {
            info!("Sharp boundary at {} um", position_um);
            sensor
                .sharp_edge(position_um)
                .context("Invalid sharp boundary parameters")?
        }
        Boundary::Blurred { start_um, end_um } => {
            info!("Blurred boundary from {} to {} um", start_um, end_um);
            sensor
                .blurred_edge(start_um, end_um)
                .context("Invalid blurred boundary parameters")?
        }
    };

    print_table(&grid);

    if let Some(path) = args.output {
        save_u8_image(&f64_to_u8_scaled(&grid, 0.0, 100.0), &path)
            .with_context(|| format!("Failed to save {}", path.display()))?;
        info!("Saved illumination matrix to {}", path.display());
    }

    Ok(())
}
