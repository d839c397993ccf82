//! The aggregated results of one analysis run.
//!
//! Each category is written at most once. The pipeline folds the step records
//! into an empty [`AnalysisResults`] with [`AnalysisResults::with_record`];
//! consumers read whichever categories are present.

use crate::contrast::ContrastRecord;
use crate::discretization::DiscretizationRecord;
use crate::frequency_response::FrequencyResponseRecord;
use crate::noise::NoiseRecord;
use crate::resolution::ResolutionRecord;
use crate::scale::ScaleInfo;
use crate::sharpness::SharpnessRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Result categories, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Scale,
    Mtf,
    Sharpness,
    Resolution,
    DiscretizationArtifacts,
    Noise,
    Contrast,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Scale,
        Category::Mtf,
        Category::Sharpness,
        Category::Resolution,
        Category::DiscretizationArtifacts,
        Category::Noise,
        Category::Contrast,
    ];

    /// Key used for the category in persisted results.
    pub fn key(&self) -> &'static str {
        match self {
            Category::Scale => "scale",
            Category::Mtf => "mtf",
            Category::Sharpness => "sharpness",
            Category::Resolution => "resolution",
            Category::DiscretizationArtifacts => "discretization_artifacts",
            Category::Noise => "noise",
            Category::Contrast => "contrast",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A single step's record, tagged with its category.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricRecord {
    Scale(ScaleInfo),
    Mtf(FrequencyResponseRecord),
    Sharpness(SharpnessRecord),
    Resolution(ResolutionRecord),
    DiscretizationArtifacts(DiscretizationRecord),
    Noise(NoiseRecord),
    Contrast(ContrastRecord),
}

impl MetricRecord {
    pub fn category(&self) -> Category {
        match self {
            MetricRecord::Scale(_) => Category::Scale,
            MetricRecord::Mtf(_) => Category::Mtf,
            MetricRecord::Sharpness(_) => Category::Sharpness,
            MetricRecord::Resolution(_) => Category::Resolution,
            MetricRecord::DiscretizationArtifacts(_) => Category::DiscretizationArtifacts,
            MetricRecord::Noise(_) => Category::Noise,
            MetricRecord::Contrast(_) => Category::Contrast,
        }
    }
}

/// Category-keyed results of a run. Absent categories were not computed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<ScaleInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mtf: Option<FrequencyResponseRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sharpness: Option<SharpnessRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<ResolutionRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discretization_artifacts: Option<DiscretizationRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub noise: Option<NoiseRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contrast: Option<ContrastRecord>,
}

fn fill<T>(slot: &mut Option<T>, value: T, category: Category) {
    if slot.is_some() {
        warn!("Ignoring second record for category {}", category);
        return;
    }
    *slot = Some(value);
}

impl AnalysisResults {
    /// Add a record to its category.
    ///
    /// A category that is already present keeps its first record.
    pub fn with_record(mut self, record: MetricRecord) -> Self {
        let category = record.category();
        match record {
            MetricRecord::Scale(r) => fill(&mut self.scale, r, category),
            MetricRecord::Mtf(r) => fill(&mut self.mtf, r, category),
            MetricRecord::Sharpness(r) => fill(&mut self.sharpness, r, category),
            MetricRecord::Resolution(r) => fill(&mut self.resolution, r, category),
            MetricRecord::DiscretizationArtifacts(r) => {
                fill(&mut self.discretization_artifacts, r, category)
            }
            MetricRecord::Noise(r) => fill(&mut self.noise, r, category),
            MetricRecord::Contrast(r) => fill(&mut self.contrast, r, category),
        }
        self
    }

    pub fn contains(&self, category: Category) -> bool {
        match category {
            Category::Scale => self.scale.is_some(),
            Category::Mtf => self.mtf.is_some(),
            Category::Sharpness => self.sharpness.is_some(),
            Category::Resolution => self.resolution.is_some(),
            Category::DiscretizationArtifacts => self.discretization_artifacts.is_some(),
            Category::Noise => self.noise.is_some(),
            Category::Contrast => self.contrast.is_some(),
        }
    }

    /// Categories present, in pipeline order.
    pub fn categories(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|&c| self.contains(c))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.categories().is_empty()
    }
}

impl FromIterator<MetricRecord> for AnalysisResults {
    fn from_iter<I: IntoIterator<Item = MetricRecord>>(iter: I) -> Self {
        iter.into_iter()
            .fold(AnalysisResults::default(), AnalysisResults::with_record)
    }
}
