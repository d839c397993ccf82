//! Human-readable text report.

use crate::noise::SNR_SENTINEL_DB;
use crate::outcome::StepFallback;
use crate::results::AnalysisResults;

const RULE: &str = "============================================================\n";

fn opt(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.precision$}"))
}

fn section(report: &mut String, title: &str) {
    report.push_str(&format!("\n{title}:\n"));
}

/// Render every present category; absent categories are skipped.
pub fn render_text(results: &AnalysisResults) -> String {
    let mut report = String::new();
    report.push_str(RULE);
    report.push_str("IMAGE QUALITY ANALYSIS REPORT\n");
    report.push_str(RULE);

    if results.is_empty() {
        report.push_str("No analysis performed\n");
        return report;
    }

    if let Some(scale) = &results.scale {
        section(&mut report, "SCALE");
        report.push_str(&format!(
            "  Pixel size: {:.6} x {:.6} mm\n",
            scale.pixel_size_mm.0, scale.pixel_size_mm.1
        ));
        report.push_str(&format!("  Scale factor: {:.6} mm/pixel\n", scale.scale_factor));
    }

    if let Some(res) = &results.resolution {
        section(&mut report, "RESOLUTION");
        report.push_str(&format!(
            "  Dimensions: {}x{} pixels\n",
            res.width_pixels, res.height_pixels
        ));
        report.push_str(&format!("  Total pixels: {}\n", res.total_pixels));
        report.push_str(&format!(
            "  Nyquist frequency: {:.1} x {:.1}\n",
            res.nyquist_frequency.0, res.nyquist_frequency.1
        ));
        report.push_str(&format!(
            "  Effective resolution (local std): {:.2}\n",
            res.effective_resolution
        ));
        report.push_str(&format!(
            "  DPI: {} x {}\n",
            opt(res.dpi_x, 1),
            opt(res.dpi_y, 1)
        ));
    }

    if let Some(sharp) = &results.sharpness {
        section(&mut report, "SHARPNESS");
        report.push_str(&format!("  Tenengrad: {:.2}\n", sharp.tenengrad));
        report.push_str(&format!(
            "  Laplacian variance: {:.2}\n",
            sharp.laplacian_variance
        ));
        report.push_str(&format!(
            "  Normalized variance: {:.2}\n",
            sharp.normalized_variance
        ));
    }

    if let Some(contrast) = &results.contrast {
        section(&mut report, "CONTRAST");
        report.push_str(&format!(
            "  Michelson contrast: {:.4}\n",
            contrast.michelson_contrast
        ));
        report.push_str(&format!("  RMS contrast: {:.2}\n", contrast.rms_contrast));
        report.push_str(&format!(
            "  Local contrast (mean): {:.2}\n",
            contrast.local_contrast_mean
        ));
        report.push_str(&format!(
            "  Intensity range: {} - {}\n",
            contrast.intensity_range.0, contrast.intensity_range.1
        ));
        report.push_str(&format!("  Mean intensity: {:.2}\n", contrast.mean_intensity));
    }

    if let Some(noise) = &results.noise {
        section(&mut report, "NOISE");
        report.push_str(&format!("  Noise std: {:.3}\n", noise.noise_std));
        report.push_str(&format!("  Noise mean: {:.3}\n", noise.noise_mean));
        if noise.snr_db == SNR_SENTINEL_DB {
            report.push_str(&format!("  SNR: {SNR_SENTINEL_DB:.0} dB (no measurable noise)\n"));
        } else {
            report.push_str(&format!("  SNR: {:.2} dB\n", noise.snr_db));
        }
    }

    if let Some(disc) = &results.discretization_artifacts {
        section(&mut report, "DISCRETIZATION ARTIFACTS");
        report.push_str(&format!("  Aliasing measure: {:.3}\n", disc.aliasing_measure));
        report.push_str(&format!("  Entropy: {:.3} bits\n", disc.entropy));
        report.push_str(&format!(
            "  Quantization quality: {:.3}\n",
            disc.quantization_quality
        ));
        report.push_str(&format!("  Empty levels: {}\n", disc.empty_levels));
    }

    if let Some(mtf) = &results.mtf {
        section(&mut report, "MTF");
        report.push_str(&format!("  Samples: {}\n", mtf.frequencies.len()));
        report.push_str(&format!("  MTF50: {} cycles/pixel\n", opt(mtf.mtf_50, 4)));
        report.push_str(&format!("  MTF10: {} cycles/pixel\n", opt(mtf.mtf_10, 4)));
    }

    report
}

/// List steps that did not measure normally. Empty when there are none.
pub fn render_fallbacks(fallbacks: &[StepFallback]) -> String {
    if fallbacks.is_empty() {
        return String::new();
    }
    let mut report = String::from("\nDEGRADED STEPS:\n");
    for fallback in fallbacks {
        report.push_str(&format!("  - {fallback}\n"));
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency_response::FrequencyResponseRecord;
    use crate::outcome::{Disposition, FallbackCause};
    use crate::results::{Category, MetricRecord};
    use crate::sharpness::SharpnessRecord;

    #[test]
    fn test_empty_report() {
        let report = render_text(&AnalysisResults::default());
        assert!(report.contains("No analysis performed"));
        assert!(!report.contains("SHARPNESS"));
    }

    #[test]
    fn test_partial_report() {
        let results = AnalysisResults::default()
            .with_record(MetricRecord::Sharpness(SharpnessRecord {
                tenengrad: 12.5,
                laplacian_variance: 3.25,
                normalized_variance: 0.5,
            }))
            .with_record(MetricRecord::Mtf(FrequencyResponseRecord::degenerate()));
        let report = render_text(&results);

        assert!(report.contains("SHARPNESS:"));
        assert!(report.contains("Tenengrad: 12.50"));
        assert!(report.contains("MTF50: n/a cycles/pixel"));
        assert!(!report.contains("RESOLUTION"));
        assert!(!report.contains("No analysis performed"));
    }

    #[test]
    fn test_fallback_section() {
        assert_eq!(render_fallbacks(&[]), "");
        let text = render_fallbacks(&[StepFallback {
            category: Category::Sharpness,
            cause: FallbackCause::ZeroMeanIntensity,
            disposition: Disposition::Omitted,
        }]);
        assert!(text.contains("DEGRADED STEPS"));
        assert!(text.contains("sharpness: mean intensity is zero (category omitted)"));
    }
}
