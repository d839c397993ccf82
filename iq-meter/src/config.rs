//! Tunable parameters for an analysis run.
//!
//! Defaults reproduce the reference measurement setup. A configuration can be
//! stored as JSON and passed to the command-line tool with `--config`; missing
//! fields take their default values.

use crate::error::QualityError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Parameters shared by the estimators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Lower hysteresis threshold of the edge detector (gradient magnitude, 8-bit scale)
    pub canny_low_threshold: f32,
    /// Upper hysteresis threshold of the edge detector
    pub canny_high_threshold: f32,
    /// Side of the square window for the local-texture resolution proxy (pixels)
    pub resolution_window: usize,
    /// Side of the square window for local contrast (pixels)
    pub contrast_window: usize,
    /// Side of the median filter used as the denoised reference (pixels)
    pub median_kernel: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            canny_low_threshold: 25.0,
            canny_high_threshold: 50.0,
            resolution_window: 5,
            contrast_window: 9,
            median_kernel: 5,
        }
    }
}

impl AnalysisConfig {
    /// Check window sizes and edge thresholds.
    pub fn validate(&self) -> Result<(), QualityError> {
        for (name, size) in [
            ("resolution_window", self.resolution_window),
            ("contrast_window", self.contrast_window),
            ("median_kernel", self.median_kernel),
        ] {
            if size == 0 || size % 2 == 0 {
                return Err(QualityError::InvalidConfig(format!(
                    "{name} must be odd and positive, got {size}"
                )));
            }
        }

        if !self.edge_thresholds_valid() {
            return Err(QualityError::InvalidConfig(format!(
                "edge thresholds must satisfy 0 <= low <= high, got low={} high={}",
                self.canny_low_threshold, self.canny_high_threshold
            )));
        }

        Ok(())
    }

    /// True when `0 <= low <= high` and both are finite.
    pub fn edge_thresholds_valid(&self) -> bool {
        let (low, high) = (self.canny_low_threshold, self.canny_high_threshold);
        low.is_finite() && high.is_finite() && low >= 0.0 && low <= high
    }

    /// Load and validate a configuration from a JSON file.
    pub fn load_from_file(path: &Path) -> Result<Self, QualityError> {
        let json = std::fs::read_to_string(path).map_err(|e| QualityError::io(path, e))?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    /// Save to a pretty-printed JSON file.
    pub fn save_to_file(&self, path: &Path) -> Result<(), QualityError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|e| QualityError::io(path, e))
    }
}

/// Physical extent of the imaged field in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalSize {
    pub width_mm: f64,
    pub height_mm: f64,
}

impl PhysicalSize {
    /// Create a physical size, rejecting zero, negative or non-finite dimensions.
    pub fn new(width_mm: f64, height_mm: f64) -> Result<Self, QualityError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !(valid(width_mm) && valid(height_mm)) {
            return Err(QualityError::InvalidPhysicalSize {
                width_mm,
                height_mm,
            });
        }
        Ok(Self {
            width_mm,
            height_mm,
        })
    }
}
