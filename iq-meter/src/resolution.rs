//! Pixel-count resolution, sampling limits and a local-texture detail proxy.

use crate::config::AnalysisConfig;
use crate::luminance::LuminanceImage;
use crate::outcome::{finite, FallbackCause, StepOutcome};
use crate::scale::ScaleInfo;
use serde::{Deserialize, Serialize};
use shared::image_proc::mean_local_std;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionRecord {
    pub width_pixels: usize,
    pub height_pixels: usize,
    pub total_pixels: usize,
    /// Half the pixel count along (x, y)
    pub nyquist_frequency: (f64, f64),
    /// Mean local standard deviation of intensity; a texture proxy, not a spatial resolution
    pub effective_resolution: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dpi_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dpi_y: Option<f64>,
}

pub fn estimate_resolution(
    image: &LuminanceImage,
    scale: Option<&ScaleInfo>,
    config: &AnalysisConfig,
) -> StepOutcome<ResolutionRecord> {
    let shape = image.shape();
    let base = ResolutionRecord {
        width_pixels: shape.width,
        height_pixels: shape.height,
        total_pixels: shape.pixel_count(),
        nyquist_frequency: (shape.width as f64 / 2.0, shape.height as f64 / 2.0),
        effective_resolution: 0.0,
        dpi_x: None,
        dpi_y: None,
    };

    let measured = texture_proxy(image, config).map(|effective_resolution| {
        let dpi = scale.map(ScaleInfo::dpi);
        ResolutionRecord {
            effective_resolution,
            dpi_x: dpi.map(|(x, _)| x),
            dpi_y: dpi.map(|(_, y)| y),
            ..base.clone()
        }
    });
    StepOutcome::from_result(measured, || base)
}

fn texture_proxy(image: &LuminanceImage, config: &AnalysisConfig) -> Result<f64, FallbackCause> {
    let value = mean_local_std(&image.to_f64().view(), config.resolution_window)?;
    finite("effective_resolution", value)
}
