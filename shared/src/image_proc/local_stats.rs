//! Windowed statistics over square neighbourhoods.
//!
//! Local standard deviation grids are built from window sums with
//! mirrored borders, so every output pixel sees a full window. Sums are kept
//! unnormalized until the end; for integer-valued images they are exact, and a
//! flat window yields exactly zero deviation.

use super::convolve2d::{convolve2d, ConvolveMode, ConvolveOptions};
use ndarray::{Array2, ArrayView2};
use thiserror::Error;

/// Errors from windowed statistics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WindowError {
    #[error("window size must be odd and positive, got {0}")]
    InvalidSize(usize),
}

fn check_window(size: usize) -> Result<(), WindowError> {
    if size == 0 || size % 2 == 0 {
        return Err(WindowError::InvalidSize(size));
    }
    Ok(())
}

fn window_sum(image: &ArrayView2<f64>, size: usize) -> Array2<f64> {
    convolve2d(
        image,
        &Array2::ones((size, size)).view(),
        Some(ConvolveOptions::with_mode(ConvolveMode::Reflect)),
    )
}

/// Standard deviation of intensities within each `size`x`size` neighbourhood.
///
/// Computed as `sqrt(n*S2 - S1^2) / n` from the window sum `S1` and the sum of
/// squares `S2`; negative values from cancellation are clamped to zero.
pub fn local_std(image: &ArrayView2<f64>, size: usize) -> Result<Array2<f64>, WindowError> {
    check_window(size)?;
    let n = (size * size) as f64;
    let sums = window_sum(image, size);
    let squared = image.mapv(|v| v * v);
    let square_sums = window_sum(&squared.view(), size);

    Ok(ndarray::Zip::from(&square_sums)
        .and(&sums)
        .map_collect(|&s2, &s1| (n * s2 - s1 * s1).max(0.0).sqrt() / n))
}

/// Mean over the whole image of the local standard deviation grid.
pub fn mean_local_std(image: &ArrayView2<f64>, size: usize) -> Result<f64, WindowError> {
    let std_map = local_std(image, size)?;
    Ok(std_map.mean().unwrap_or(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::Array2;

    #[test]
    fn test_rejects_even_window() {
        let image = Array2::<f64>::zeros((4, 4));
        assert_eq!(
            local_std(&image.view(), 4).unwrap_err(),
            WindowError::InvalidSize(4)
        );
        assert!(mean_local_std(&image.view(), 0).is_err());
    }

    #[test]
    fn test_constant_image_has_zero_local_std() {
        let image = Array2::from_elem((20, 20), 128.0);
        let std_map = local_std(&image.view(), 5).unwrap();
        assert!(std_map.iter().all(|&v| v == 0.0));
        assert_eq!(mean_local_std(&image.view(), 9).unwrap(), 0.0);
    }

    #[test]
    fn test_local_std_of_checker_interior() {
        // Alternating 0/2 columns: any 3x3 window holds six of one value and
        // three of the other.
        let image = Array2::from_shape_fn((9, 9), |(_, x)| if x % 2 == 0 { 0.0 } else { 2.0 });
        let std_map = local_std(&image.view(), 3).unwrap();

        let expected = (8.0f64 / 9.0).sqrt();
        assert_relative_eq!(std_map[[4, 4]], expected, epsilon = 1e-9);
    }

    #[test]
    fn test_local_std_peaks_at_step_edge() {
        let image = Array2::from_shape_fn((10, 20), |(_, x)| if x < 10 { 20.0 } else { 200.0 });
        let std_map = local_std(&image.view(), 5).unwrap();

        assert_eq!(std_map[[5, 0]], 0.0);
        assert_eq!(std_map[[5, 19]], 0.0);
        assert!(std_map[[5, 9]] > 80.0);
    }
}
