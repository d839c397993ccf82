//! JSON persistence of analysis results.
//!
//! The full-resolution grids (`magnitude_spectrum`, `noise_image`) are never
//! written and load back as empty arrays.

use crate::error::QualityError;
use crate::results::AnalysisResults;
use std::path::{Path, PathBuf};
use tracing::info;

pub fn to_json_string(results: &AnalysisResults) -> Result<String, QualityError> {
    Ok(serde_json::to_string_pretty(results)?)
}

pub fn save_results(results: &AnalysisResults, path: &Path) -> Result<(), QualityError> {
    let json = to_json_string(results)?;
    std::fs::write(path, json).map_err(|e| QualityError::io(path, e))?;
    info!("Results saved to {}", path.display());
    Ok(())
}

pub fn load_results(path: &Path) -> Result<AnalysisResults, QualityError> {
    let json = std::fs::read_to_string(path).map_err(|e| QualityError::io(path, e))?;
    Ok(serde_json::from_str(&json)?)
}

/// `<stem>_analysis.json` beside the analyzed image.
pub fn default_output_path(image_path: &Path) -> PathBuf {
    let stem = image_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    image_path.with_file_name(format!("{stem}_analysis.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("/data/shots/target.tiff")),
            PathBuf::from("/data/shots/target_analysis.json")
        );
        assert_eq!(
            default_output_path(Path::new("edge.png")),
            PathBuf::from("edge_analysis.json")
        );
    }

    #[test]
    fn test_load_malformed_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_results(&path), Err(QualityError::Json(_))));
    }

    #[test]
    fn test_empty_results_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.json");
        save_results(&AnalysisResults::default(), &path).unwrap();
        assert!(load_results(&path).unwrap().is_empty());
    }
}
