//! Global and local contrast measures.

use crate::config::AnalysisConfig;
use crate::luminance::LuminanceImage;
use crate::outcome::{finite, FallbackCause, StepOutcome};
use serde::{Deserialize, Serialize};
use shared::algo::{mean, population_std};
use shared::image_proc::mean_local_std;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContrastRecord {
    /// (max - min) / (max + min), or 0 for an all-black frame
    pub michelson_contrast: f64,
    /// Population standard deviation of intensity
    pub rms_contrast: f64,
    /// Mean of the local standard deviation grid
    pub local_contrast_mean: f64,
    /// (min, max) intensity
    pub intensity_range: (u8, u8),
    pub mean_intensity: f64,
}

pub fn estimate_contrast(
    image: &LuminanceImage,
    config: &AnalysisConfig,
) -> StepOutcome<ContrastRecord> {
    let pixels = image.pixels();
    let min = pixels.iter().copied().min().unwrap_or(0);
    let max = pixels.iter().copied().max().unwrap_or(0);
    let intensities: Vec<f64> = pixels.iter().map(|&v| f64::from(v)).collect();

    let fallback = ContrastRecord {
        michelson_contrast: 0.0,
        rms_contrast: population_std(&intensities).unwrap_or(0.0),
        local_contrast_mean: 0.0,
        intensity_range: (min, max),
        mean_intensity: mean(intensities.iter().copied()).unwrap_or(0.0),
    };

    let measured = mean_local_std(&image.to_f64().view(), config.contrast_window)
        .map_err(FallbackCause::from)
        .and_then(|local| {
            Ok(ContrastRecord {
                michelson_contrast: michelson(min, max),
                local_contrast_mean: finite("local_contrast_mean", local)?,
                ..fallback.clone()
            })
        });
    StepOutcome::from_result(measured, || fallback)
}

/// Michelson contrast of an intensity range.
pub fn michelson(min: u8, max: u8) -> f64 {
    let (min, max) = (f64::from(min), f64::from(max));
    if max + min == 0.0 {
        0.0
    } else {
        (max - min) / (max + min)
    }
}
