//! Saving and reloading analysis results.

mod common;

use common::{noisy_step_image, step_image};
use iq_meter::persist::{load_results, save_results, to_json_string};
use iq_meter::{analyze_image, AnalysisConfig, PhysicalSize};

#[test]
fn test_results_roundtrip() {
    let outcome = analyze_image(
        &noisy_step_image(5.0, 3),
        Some(PhysicalSize::new(36.0, 24.0).unwrap()),
        &AnalysisConfig::default(),
    );
    let original = outcome.results;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("results.json");
    save_results(&original, &path).unwrap();
    let reloaded = load_results(&path).unwrap();

    assert_eq!(reloaded.categories(), original.categories());
    assert_eq!(reloaded.scale, original.scale);
    assert_eq!(reloaded.mtf, original.mtf);
    assert_eq!(reloaded.sharpness, original.sharpness);
    assert_eq!(reloaded.resolution, original.resolution);
    assert_eq!(reloaded.contrast, original.contrast);

    let (disc, original_disc) = (
        reloaded.discretization_artifacts.unwrap(),
        original.discretization_artifacts.unwrap(),
    );
    assert_eq!(disc.aliasing_measure, original_disc.aliasing_measure);
    assert_eq!(disc.entropy, original_disc.entropy);
    assert_eq!(disc.quantization_quality, original_disc.quantization_quality);
    assert_eq!(disc.empty_levels, original_disc.empty_levels);
    assert_eq!(disc.magnitude_spectrum.len(), 0);

    let (noise, original_noise) = (reloaded.noise.unwrap(), original.noise.unwrap());
    assert_eq!(noise.noise_std, original_noise.noise_std);
    assert_eq!(noise.noise_mean, original_noise.noise_mean);
    assert_eq!(noise.snr_db, original_noise.snr_db);
    assert_eq!(noise.noise_image.len(), 0);
}

#[test]
fn test_json_excludes_grids_and_absent_fields() {
    let outcome = analyze_image(&step_image(), None, &AnalysisConfig::default());
    let json = to_json_string(&outcome.results).unwrap();

    assert!(!json.contains("magnitude_spectrum"));
    assert!(!json.contains("noise_image"));
    assert!(!json.contains("\"scale\""));
    assert!(!json.contains("dpi_x"));
    // An ideal step never drops below 0.5.
    assert!(!json.contains("mtf_50"));
    assert!(json.contains("\"discretization_artifacts\""));
}
