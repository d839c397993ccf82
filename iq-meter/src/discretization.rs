//! Sampling and quantization artifacts.
//!
//! The aliasing measure is the mean log-magnitude in the four corners of the
//! centred spectrum, where energy near the sampling limit accumulates. Gray
//! level usage is summarized by a 256-level histogram: its entropy and the
//! fraction of levels that actually occur.

use crate::luminance::LuminanceImage;
use crate::outcome::{finite, FallbackCause, StepOutcome};
use ndarray::{s, Array2};
use serde::{Deserialize, Serialize};
use shared::algo::{mean, shannon_entropy_bits};
use shared::image_proc::log_magnitude_spectrum;

/// Number of representable 8-bit gray levels.
pub const HISTOGRAM_LEVELS: usize = 256;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscretizationRecord {
    pub aliasing_measure: f64,
    /// Shannon entropy of the gray-level histogram in bits, within [0, 8]
    pub entropy: f64,
    /// Fraction of gray levels in use, within [1/256, 1] for a measured image
    pub quantization_quality: f64,
    /// Gray levels with zero count
    pub empty_levels: usize,
    /// Centred log-magnitude spectrum; kept in memory only
    #[serde(skip)]
    pub magnitude_spectrum: Array2<f64>,
}

impl DiscretizationRecord {
    pub fn fallback() -> Self {
        Self {
            aliasing_measure: 0.0,
            entropy: 0.0,
            quantization_quality: 1.0,
            empty_levels: 0,
            magnitude_spectrum: Array2::zeros((0, 0)),
        }
    }
}

pub fn estimate_discretization(image: &LuminanceImage) -> StepOutcome<DiscretizationRecord> {
    StepOutcome::from_result(measure(image), DiscretizationRecord::fallback)
}

fn measure(image: &LuminanceImage) -> Result<DiscretizationRecord, FallbackCause> {
    let spectrum = log_magnitude_spectrum(&image.to_f64().view());
    let aliasing = finite("aliasing_measure", aliasing_measure(&spectrum))?;

    let histogram = intensity_histogram(image.pixels());
    let empty_levels = histogram.iter().filter(|&&c| c == 0).count();

    Ok(DiscretizationRecord {
        aliasing_measure: aliasing,
        entropy: shannon_entropy_bits(&histogram),
        quantization_quality: 1.0 - empty_levels as f64 / HISTOGRAM_LEVELS as f64,
        empty_levels,
        magnitude_spectrum: spectrum,
    })
}

/// Mean of the four corner-block means of a centred spectrum.
///
/// Each block is a quarter of the height by a quarter of the width. Returns 0
/// when either quarter rounds down to zero.
pub fn aliasing_measure(spectrum: &Array2<f64>) -> f64 {
    let (h, w) = spectrum.dim();
    let (qh, qw) = (h / 4, w / 4);
    if qh == 0 || qw == 0 {
        return 0.0;
    }

    let corners = [
        spectrum.slice(s![..qh, ..qw]),
        spectrum.slice(s![..qh, w - qw..]),
        spectrum.slice(s![h - qh.., ..qw]),
        spectrum.slice(s![h - qh.., w - qw..]),
    ];
    mean(corners.iter().filter_map(|c| c.mean())).unwrap_or(0.0)
}

/// Counts of each 8-bit gray level.
pub fn intensity_histogram(pixels: &Array2<u8>) -> [u64; HISTOGRAM_LEVELS] {
    let mut histogram = [0u64; HISTOGRAM_LEVELS];
    for &v in pixels {
        histogram[v as usize] += 1;
    }
    histogram
}
