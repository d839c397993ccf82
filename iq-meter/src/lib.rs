//! Objective image quality measurement.
//!
//! Given an 8-bit luminance image (and optionally the physical size of the
//! imaged field), the pipeline in [`analyzer`] computes a fixed set of
//! metric categories:
//!
//! - **scale**: millimetres per pixel ([`scale`])
//! - **mtf**: modulation transfer function from an edge row ([`frequency_response`])
//! - **sharpness**: Tenengrad, Laplacian variance, normalized variance ([`sharpness`])
//! - **resolution**: pixel counts, Nyquist limits, local-texture proxy, DPI ([`resolution`])
//! - **discretization_artifacts**: spectral aliasing, gray-level usage ([`discretization`])
//! - **noise**: median-filter residual and SNR ([`noise`])
//! - **contrast**: Michelson, RMS and local contrast ([`contrast`])
//!
//! Steps that cannot measure substitute a neutral record and report why via
//! [`StepOutcome`]; the run as a whole fails only when no image is loaded.
//! Results render as a text report ([`report`]) or persist as JSON ([`persist`]).

pub mod analyzer;
pub mod config;
pub mod contrast;
pub mod discretization;
pub mod error;
pub mod frequency_response;
pub mod luminance;
pub mod noise;
pub mod outcome;
pub mod persist;
pub mod report;
pub mod resolution;
pub mod results;
pub mod scale;
pub mod sharpness;

pub use analyzer::{analyze_image, AnalysisOutcome, ImageQualityAnalyzer};
pub use config::{AnalysisConfig, PhysicalSize};
pub use error::QualityError;
pub use luminance::LuminanceImage;
pub use outcome::{Disposition, FallbackCause, StepFallback, StepOutcome};
pub use results::{AnalysisResults, Category, MetricRecord};
pub use scale::ScaleInfo;
