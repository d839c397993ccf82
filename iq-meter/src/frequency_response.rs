//! Modulation transfer function from a single edge-crossing row.
//!
//! Edges are located with a Canny detector. The row containing the most edge
//! pixels is taken as the edge-spread profile; its first difference is the
//! line-spread function, whose normalized Fourier magnitude over non-negative
//! frequencies is the MTF curve. No sub-pixel oversampling or edge-angle
//! correction is applied, so the curve is coarse and aliased.

use crate::config::AnalysisConfig;
use crate::luminance::LuminanceImage;
use crate::outcome::{FallbackCause, StepOutcome};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use shared::image_proc::{fft_magnitude, fftfreq, gray_image_to_array2};
use tracing::debug;

/// Response level defining the MTF50 cutoff.
pub const MTF50_LEVEL: f64 = 0.5;
/// Response level defining the MTF10 cutoff.
pub const MTF10_LEVEL: f64 = 0.1;

/// Sampled MTF curve and its cutoff frequencies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyResponseRecord {
    /// Non-negative frequencies in cycles per pixel, ascending
    pub frequencies: Vec<f64>,
    /// Normalized response at each frequency, within [0, 1]
    pub mtf_values: Vec<f64>,
    /// First frequency where the response drops to 0.5 or below
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mtf_50: Option<f64>,
    /// First frequency where the response drops to 0.1 or below
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mtf_10: Option<f64>,
}

impl FrequencyResponseRecord {
    /// The single-point curve reported when no response can be measured.
    pub fn degenerate() -> Self {
        Self {
            frequencies: vec![0.0],
            mtf_values: vec![1.0],
            mtf_50: None,
            mtf_10: None,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.frequencies.len() <= 1
    }
}

/// Estimate the MTF of `image` from its strongest edge row.
pub fn estimate_frequency_response(
    image: &LuminanceImage,
    config: &AnalysisConfig,
) -> StepOutcome<FrequencyResponseRecord> {
    let measured = detect_edges(image, config)
        .and_then(|edges| select_edge_row(&edges).ok_or(FallbackCause::NoEdgesFound))
        .and_then(|row| {
            debug!("Using row {} as edge profile", row);
            let profile: Vec<f64> = image.pixels().row(row).iter().map(|&v| f64::from(v)).collect();
            mtf_from_profile(&profile)
        });
    StepOutcome::from_result(measured, FrequencyResponseRecord::degenerate)
}

fn detect_edges(
    image: &LuminanceImage,
    config: &AnalysisConfig,
) -> Result<Array2<u8>, FallbackCause> {
    // canny asserts high >= low
    if !config.edge_thresholds_valid() {
        return Err(FallbackCause::InvalidEdgeThresholds {
            low: config.canny_low_threshold,
            high: config.canny_high_threshold,
        });
    }
    // The detector's internal neighbourhood needs at least 3x3 pixels.
    if image.width() < 3 || image.height() < 3 {
        return Err(FallbackCause::NoEdgesFound);
    }
    let edges = imageproc::edges::canny(
        &image.to_gray_image(),
        config.canny_low_threshold,
        config.canny_high_threshold,
    );
    Ok(gray_image_to_array2(&edges))
}

/// Index of the first row holding the largest number of edge pixels.
///
/// Returns `None` when the edge map is empty.
pub fn select_edge_row(edges: &Array2<u8>) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;
    for (index, row) in edges.rows().into_iter().enumerate() {
        let count = row.iter().filter(|&&v| v > 0).count();
        if count > 0 && best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((index, count));
        }
    }
    best.map(|(index, _)| index)
}

/// MTF curve of an edge-spread profile.
///
/// The curve has `ceil((n - 1) / 2)` samples for a profile of `n` pixels.
pub fn mtf_from_profile(profile: &[f64]) -> Result<FrequencyResponseRecord, FallbackCause> {
    let lsf: Vec<f64> = profile.windows(2).map(|w| w[1] - w[0]).collect();
    if lsf.len() < 2 {
        return Err(FallbackCause::DegenerateLineSpread {
            samples: lsf.len(),
        });
    }

    let magnitude = fft_magnitude(&lsf);
    let peak = magnitude.iter().copied().fold(0.0_f64, f64::max);
    if !peak.is_finite() || peak <= 0.0 {
        return Err(FallbackCause::ZeroSpectrumPeak);
    }

    let positive = lsf.len().div_ceil(2);
    let frequencies: Vec<f64> = fftfreq(lsf.len()).into_iter().take(positive).collect();
    let mtf_values: Vec<f64> = magnitude
        .iter()
        .take(positive)
        .map(|m| m / peak)
        .collect();

    Ok(FrequencyResponseRecord {
        mtf_50: first_crossing(&frequencies, &mtf_values, MTF50_LEVEL),
        mtf_10: first_crossing(&frequencies, &mtf_values, MTF10_LEVEL),
        frequencies,
        mtf_values,
    })
}

/// First frequency at which the response is at or below `level`.
pub fn first_crossing(frequencies: &[f64], response: &[f64], level: f64) -> Option<f64> {
    frequencies
        .iter()
        .zip(response)
        .find(|(_, &r)| r <= level)
        .map(|(&f, _)| f)
}
