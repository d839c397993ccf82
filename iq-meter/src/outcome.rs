//! Explicit success-or-fallback results for individual pipeline steps.
//!
//! Every estimator either measures its record or substitutes a documented
//! neutral record. The substitute always travels with the reason it was needed,
//! so a degraded result is never mistaken for a measured one.

use crate::results::Category;
use serde::{Deserialize, Serialize};
use shared::image_proc::WindowError;
use std::fmt;
use thiserror::Error;

/// Why a step could not produce a measured record.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FallbackCause {
    /// Edge detector thresholds are inverted, negative or not finite.
    #[error("invalid edge thresholds: low {low}, high {high}")]
    InvalidEdgeThresholds { low: f32, high: f32 },

    /// The edge detector found no edge pixels.
    #[error("no edges found")]
    NoEdgesFound,

    /// The line-spread function had too few samples for a frequency response.
    #[error("line-spread function has only {samples} sample(s)")]
    DegenerateLineSpread { samples: usize },

    /// The line-spread spectrum was identically zero.
    #[error("line-spread spectrum peak is zero")]
    ZeroSpectrumPeak,

    /// A computed metric came out NaN or infinite.
    #[error("{metric} is not finite")]
    NonFinite { metric: &'static str },

    /// Windowed statistics rejected the configured window.
    #[error(transparent)]
    Window(#[from] WindowError),

    /// Intensity mean is zero (all-black frame); ratios against it are undefined.
    #[error("mean intensity is zero")]
    ZeroMeanIntensity,
}

/// Check a metric for NaN or infinity.
pub(crate) fn finite(metric: &'static str, value: f64) -> Result<f64, FallbackCause> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(FallbackCause::NonFinite { metric })
    }
}

/// The result of one pipeline step.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome<T> {
    /// The step ran normally.
    Measured(T),
    /// The step failed and `record` is its documented neutral substitute.
    Fallback { record: T, cause: FallbackCause },
}

impl<T> StepOutcome<T> {
    /// Build an outcome from a measurement attempt and the step's fallback record.
    pub fn from_result(result: Result<T, FallbackCause>, fallback: impl FnOnce() -> T) -> Self {
        match result {
            Ok(record) => Self::Measured(record),
            Err(cause) => Self::Fallback {
                record: fallback(),
                cause,
            },
        }
    }

    pub fn record(&self) -> &T {
        match self {
            Self::Measured(record) | Self::Fallback { record, .. } => record,
        }
    }

    pub fn cause(&self) -> Option<&FallbackCause> {
        match self {
            Self::Measured(_) => None,
            Self::Fallback { cause, .. } => Some(cause),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    pub fn into_parts(self) -> (T, Option<FallbackCause>) {
        match self {
            Self::Measured(record) => (record, None),
            Self::Fallback { record, cause } => (record, Some(cause)),
        }
    }
}

/// What the orchestrator did with a failed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
    /// The step's neutral record was stored in its category.
    FallbackRecorded,
    /// The category was left absent.
    Omitted,
}

/// A degraded step in a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct StepFallback {
    pub category: Category,
    pub cause: FallbackCause,
    pub disposition: Disposition,
}

impl fmt::Display for StepFallback {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let action = match self.disposition {
            Disposition::FallbackRecorded => "fallback values recorded",
            Disposition::Omitted => "category omitted",
        };
        write!(f, "{}: {} ({action})", self.category, self.cause)
    }
}
