//! Seeded noise fields for building reproducible test images.

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal, NormalError};

/// Generate a 2D array of normally distributed values for testing purposes.
///
/// The same `seed` always yields the same array.
///
/// # Arguments
/// * `size` - Tuple of (height, width) for the output array dimensions
/// * `mean` - Mean value of the normal distribution
/// * `std_dev` - Standard deviation of the normal distribution
/// * `seed` - Random seed for deterministic output
///
/// # Errors
/// Returns [`NormalError::BadVariance`] if `std_dev` is negative or not finite.
pub fn simple_normal_array(
    size: (usize, usize),
    mean: f64,
    std_dev: f64,
    seed: u64,
) -> Result<Array2<f64>, NormalError> {
    // Normal::new alone accepts a negative std_dev.
    if std_dev.is_nan() || std_dev < 0.0 {
        return Err(NormalError::BadVariance);
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let normal_dist = Normal::new(mean, std_dev)?;
    Ok(Array2::from_shape_fn(size, |_| normal_dist.sample(&mut rng)))
}

/// Add seeded Gaussian noise to an 8-bit image, rounding and saturating to 0-255.
pub fn add_gaussian_noise_u8(
    image: &Array2<u8>,
    std_dev: f64,
    seed: u64,
) -> Result<Array2<u8>, NormalError> {
    let noise = simple_normal_array(image.dim(), 0.0, std_dev, seed)?;
    Ok(ndarray::Zip::from(image)
        .and(&noise)
        .map_collect(|&p, &n| (p as f64 + n).round().clamp(0.0, 255.0) as u8))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_normal_array_is_deterministic() {
        let a = simple_normal_array((16, 16), 0.0, 3.0, 7).unwrap();
        let b = simple_normal_array((16, 16), 0.0, 3.0, 7).unwrap();
        assert_eq!(a, b);

        let c = simple_normal_array((16, 16), 0.0, 3.0, 8).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_simple_normal_array_statistics() {
        let a = simple_normal_array((200, 200), 10.0, 2.0, 42).unwrap();
        let mean = a.mean().unwrap();
        let std = a.std(0.0);
        assert!((mean - 10.0).abs() < 0.1, "mean {mean}");
        assert!((std - 2.0).abs() < 0.1, "std {std}");
    }

    #[test]
    fn test_invalid_std_dev() {
        assert_eq!(
            simple_normal_array((2, 2), 0.0, -1.0, 1),
            Err(NormalError::BadVariance)
        );
        assert!(simple_normal_array((2, 2), 0.0, f64::NAN, 1).is_err());
        assert!(add_gaussian_noise_u8(&Array2::zeros((2, 2)), -0.5, 1).is_err());

        let flat = simple_normal_array((3, 3), 4.0, 0.0, 1).unwrap();
        assert!(flat.iter().all(|&v| v == 4.0));
    }

    #[test]
    fn test_add_noise_saturates() {
        let image = Array2::from_elem((32, 32), 250u8);
        let noisy = add_gaussian_noise_u8(&image, 20.0, 3).unwrap();
        assert!(noisy.iter().any(|&v| v == 255));
        assert!(noisy.iter().any(|&v| v < 250));
    }
}
