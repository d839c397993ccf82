//! Focus measures from image derivatives.

use crate::luminance::LuminanceImage;
use crate::outcome::{finite, FallbackCause};
use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};
use shared::algo::{mean, population_variance};
use shared::image_proc::{
    convolve2d, laplacian_kernel, sobel_x_kernel, sobel_y_kernel, ConvolveMode, ConvolveOptions,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SharpnessRecord {
    /// Mean squared Sobel gradient magnitude
    pub tenengrad: f64,
    /// Variance of the 4-neighbour Laplacian response
    pub laplacian_variance: f64,
    /// Intensity variance divided by mean intensity
    pub normalized_variance: f64,
}

fn filter(image: &ArrayView2<f64>, kernel: Array2<f64>) -> Array2<f64> {
    convolve2d(
        image,
        &kernel.view(),
        Some(ConvolveOptions::with_mode(ConvolveMode::Reflect101)),
    )
}

/// Compute all three sharpness measures.
///
/// Fails with [`FallbackCause::ZeroMeanIntensity`] on an all-black frame,
/// where the normalized variance is undefined.
pub fn estimate_sharpness(image: &LuminanceImage) -> Result<SharpnessRecord, FallbackCause> {
    let pixels = image.to_f64();
    let view = pixels.view();

    let gx = filter(&view, sobel_x_kernel());
    let gy = filter(&view, sobel_y_kernel());
    let tenengrad = mean(gx.iter().zip(gy.iter()).map(|(x, y)| x * x + y * y)).unwrap_or(0.0);

    let laplacian: Vec<f64> = filter(&view, laplacian_kernel()).into_iter().collect();
    let laplacian_variance = population_variance(&laplacian).unwrap_or(0.0);

    let intensities: Vec<f64> = pixels.iter().copied().collect();
    let intensity_mean = mean(intensities.iter().copied()).unwrap_or(0.0);
    if intensity_mean == 0.0 {
        return Err(FallbackCause::ZeroMeanIntensity);
    }
    let intensity_variance = population_variance(&intensities).unwrap_or(0.0);

    Ok(SharpnessRecord {
        tenengrad: finite("tenengrad", tenengrad)?,
        laplacian_variance: finite("laplacian_variance", laplacian_variance)?,
        normalized_variance: finite("normalized_variance", intensity_variance / intensity_mean)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use shared::image_proc::test_patterns::{generate_uniform, generate_vertical_step};

    #[test]
    fn test_uniform_image_is_not_sharp() {
        let image = LuminanceImage::new(generate_uniform(50, 50, 128u8)).unwrap();
        let record = estimate_sharpness(&image).unwrap();
        assert_eq!(record.tenengrad, 0.0);
        assert_eq!(record.laplacian_variance, 0.0);
        assert_eq!(record.normalized_variance, 0.0);
    }

    #[test]
    fn test_black_frame_is_rejected() {
        let image = LuminanceImage::new(generate_uniform(8, 8, 0u8)).unwrap();
        assert_eq!(
            estimate_sharpness(&image),
            Err(FallbackCause::ZeroMeanIntensity)
        );
    }

    #[test]
    fn test_step_edge_tenengrad() {
        // Each row sees Sobel-x responses of 4*180 at the two columns flanking the edge.
        let image = LuminanceImage::new(generate_vertical_step(10, 6, 5, 0u8, 180u8)).unwrap();
        let record = estimate_sharpness(&image).unwrap();

        let expected = 2.0 * (4.0_f64 * 180.0).powi(2) / 10.0;
        assert_relative_eq!(record.tenengrad, expected, epsilon = 1e-9);
        assert!(record.laplacian_variance > 0.0);

        // Half the pixels at 0, half at 180: variance 8100, mean 90.
        assert_relative_eq!(record.normalized_variance, 90.0, epsilon = 1e-9);
    }

    #[test]
    fn test_blur_reduces_sharpness() {
        let sharp = generate_vertical_step(32, 16, 16, 40u8, 220u8);
        let soft = Array2::from_shape_fn((16, 32), |(_, x)| {
            let t = ((x as f64 - 12.0) / 8.0).clamp(0.0, 1.0);
            (40.0 + 180.0 * t).round() as u8
        });

        let sharp = estimate_sharpness(&LuminanceImage::new(sharp).unwrap()).unwrap();
        let soft = estimate_sharpness(&LuminanceImage::new(soft).unwrap()).unwrap();
        assert!(sharp.tenengrad > soft.tenengrad);
        assert!(sharp.laplacian_variance > soft.laplacian_variance);
    }
}
