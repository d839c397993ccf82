//! Noise estimated as the residual against a median-filtered reference.

use crate::config::AnalysisConfig;
use crate::luminance::LuminanceImage;
use crate::outcome::{finite, FallbackCause, StepOutcome};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use shared::algo::{mean, mean_square, population_std};
use shared::image_proc::{gray_image_to_array2, WindowError};

/// SNR reported when the residual carries no power.
pub const SNR_SENTINEL_DB: f64 = 999.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoiseRecord {
    /// Population standard deviation of the residual
    pub noise_std: f64,
    /// Mean of the residual
    pub noise_mean: f64,
    /// Signal-to-noise ratio in dB, or [`SNR_SENTINEL_DB`]
    pub snr_db: f64,
    /// Per-pixel residual; kept in memory only
    #[serde(skip)]
    pub noise_image: Array2<f64>,
}

impl NoiseRecord {
    fn fallback(height: usize, width: usize) -> Self {
        Self {
            noise_std: 0.0,
            noise_mean: 0.0,
            snr_db: SNR_SENTINEL_DB,
            noise_image: Array2::zeros((height, width)),
        }
    }
}

pub fn estimate_noise(image: &LuminanceImage, config: &AnalysisConfig) -> StepOutcome<NoiseRecord> {
    StepOutcome::from_result(measure(image, config), || {
        NoiseRecord::fallback(image.height(), image.width())
    })
}

fn measure(image: &LuminanceImage, config: &AnalysisConfig) -> Result<NoiseRecord, FallbackCause> {
    let kernel = config.median_kernel;
    if kernel == 0 || kernel % 2 == 0 {
        return Err(WindowError::InvalidSize(kernel).into());
    }
    let radius = (config.median_kernel / 2) as u32;
    let reference = gray_image_to_array2(&imageproc::filter::median_filter(
        &image.to_gray_image(),
        radius,
        radius,
    ));

    let signal = image.to_f64();
    let residual = &signal - &reference.mapv(f64::from);
    let samples: Vec<f64> = residual.iter().copied().collect();

    let noise_mean = mean(samples.iter().copied()).unwrap_or(0.0);
    let noise_std = population_std(&samples).unwrap_or(0.0);
    let signal_power = mean_square(signal.iter().copied()).unwrap_or(0.0);
    let noise_power = mean_square(samples.iter().copied()).unwrap_or(0.0);

    Ok(NoiseRecord {
        noise_std: finite("noise_std", noise_std)?,
        noise_mean: finite("noise_mean", noise_mean)?,
        snr_db: snr_db(signal_power, noise_power),
        noise_image: residual,
    })
}

/// `10 log10(signal / noise)`, or [`SNR_SENTINEL_DB`] when the noise power is
/// zero or the ratio is not finite.
pub fn snr_db(signal_power: f64, noise_power: f64) -> f64 {
    if noise_power <= 0.0 {
        return SNR_SENTINEL_DB;
    }
    let db = 10.0 * (signal_power / noise_power).log10();
    if db.is_finite() {
        db
    } else {
        SNR_SENTINEL_DB
    }
}
