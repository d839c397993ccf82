//! Pipeline orchestration.
//!
//! Steps run in a fixed order: scale (only with a physical size), MTF,
//! sharpness, resolution, discretization artifacts, noise, contrast. Every step
//! reads the same immutable image; none observes another's output except
//! resolution, which takes the scale for DPI.

use crate::config::{AnalysisConfig, PhysicalSize};
use crate::contrast::estimate_contrast;
use crate::discretization::estimate_discretization;
use crate::error::QualityError;
use crate::frequency_response::estimate_frequency_response;
use crate::luminance::LuminanceImage;
use crate::noise::estimate_noise;
use crate::outcome::{Disposition, StepFallback, StepOutcome};
use crate::resolution::estimate_resolution;
use crate::results::{AnalysisResults, Category, MetricRecord};
use crate::scale::ScaleInfo;
use crate::sharpness::estimate_sharpness;
use std::path::Path;
use tracing::{info, warn};

/// Results of a completed run plus every step that did not measure normally.
#[derive(Debug, Clone, Default)]
pub struct AnalysisOutcome {
    pub results: AnalysisResults,
    pub fallbacks: Vec<StepFallback>,
}

#[derive(Default)]
struct PipelineState {
    records: Vec<MetricRecord>,
    fallbacks: Vec<StepFallback>,
}

impl PipelineState {
    fn record<T>(
        &mut self,
        category: Category,
        outcome: StepOutcome<T>,
        wrap: impl FnOnce(T) -> MetricRecord,
    ) {
        let (record, cause) = outcome.into_parts();
        if let Some(cause) = cause {
            warn!("{} step fell back: {}", category, cause);
            self.fallbacks.push(StepFallback {
                category,
                cause,
                disposition: Disposition::FallbackRecorded,
            });
        }
        self.records.push(wrap(record));
    }
}

/// Run every estimator over `image`.
///
/// An invalid `config` never aborts the run: the steps that depend on the
/// offending parameter fall back and report why.
pub fn analyze_image(
    image: &LuminanceImage,
    physical: Option<PhysicalSize>,
    config: &AnalysisConfig,
) -> AnalysisOutcome {
    info!("Analyzing {} image", image.shape());
    if let Err(e) = config.validate() {
        warn!("Analyzing with {}", e);
    }
    let mut state = PipelineState::default();

    let scale = physical.map(|size| ScaleInfo::from_physical(size, image.shape()));
    if let Some(scale) = scale {
        info!(
            "Scale: {:.6} x {:.6} mm/pixel",
            scale.scale_x, scale.scale_y
        );
        state.records.push(MetricRecord::Scale(scale));
    }

    info!("Estimating MTF");
    state.record(
        Category::Mtf,
        estimate_frequency_response(image, config),
        MetricRecord::Mtf,
    );

    info!("Estimating sharpness");
    match estimate_sharpness(image) {
        Ok(record) => state.records.push(MetricRecord::Sharpness(record)),
        Err(cause) => {
            warn!("sharpness step skipped: {}", cause);
            state.fallbacks.push(StepFallback {
                category: Category::Sharpness,
                cause,
                disposition: Disposition::Omitted,
            });
        }
    }

    info!("Estimating resolution");
    state.record(
        Category::Resolution,
        estimate_resolution(image, scale.as_ref(), config),
        MetricRecord::Resolution,
    );

    info!("Estimating discretization artifacts");
    state.record(
        Category::DiscretizationArtifacts,
        estimate_discretization(image),
        MetricRecord::DiscretizationArtifacts,
    );

    info!("Estimating noise");
    state.record(Category::Noise, estimate_noise(image, config), MetricRecord::Noise);

    info!("Estimating contrast");
    state.record(
        Category::Contrast,
        estimate_contrast(image, config),
        MetricRecord::Contrast,
    );

    let results: AnalysisResults = state.records.into_iter().collect();
    info!(
        "Analysis complete: {} categories, {} degraded steps",
        results.categories().len(),
        state.fallbacks.len()
    );
    AnalysisOutcome {
        results,
        fallbacks: state.fallbacks,
    }
}

/// Holds the currently loaded image and runs analyses on it.
#[derive(Debug, Clone, Default)]
pub struct ImageQualityAnalyzer {
    image: Option<LuminanceImage>,
    config: AnalysisConfig,
}

impl ImageQualityAnalyzer {
    /// Create an analyzer with no image loaded, rejecting an invalid `config`.
    pub fn new(config: AnalysisConfig) -> Result<Self, QualityError> {
        config.validate()?;
        Ok(Self {
            image: None,
            config,
        })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn image(&self) -> Option<&LuminanceImage> {
        self.image.as_ref()
    }

    /// Decode `path` and make it the current image.
    ///
    /// On failure the previously loaded image, if any, is kept.
    pub fn load_image<P: AsRef<Path>>(&mut self, path: P) -> Result<(), QualityError> {
        let image = LuminanceImage::from_file(path.as_ref())?;
        info!(
            "Loaded {} ({})",
            path.as_ref().display(),
            image.shape()
        );
        self.image = Some(image);
        Ok(())
    }

    pub fn set_image(&mut self, image: LuminanceImage) {
        self.image = Some(image);
    }

    /// Analyze the current image.
    pub fn perform_full_analysis(
        &self,
        physical: Option<PhysicalSize>,
    ) -> Result<AnalysisOutcome, QualityError> {
        let image = self.image.as_ref().ok_or(QualityError::NoImageLoaded)?;
        Ok(analyze_image(image, physical, &self.config))
    }
}
