//! Image processing building blocks for quality measurement.
//!
//! # Module Organization
//!
//! ## Core Algorithms
//! - **convolve2d**: 2D correlation with mirrored borders, derivative kernels
//! - **local_stats**: Windowed standard deviation grids
//! - **spectrum**: 1-D and 2-D Fourier transforms, frequency layout helpers
//!
//! ## Data I/O
//! - **io**: Decode image files into luminance grids, save 8-bit grids
//! - **image**: Format conversions between ndarray and image crate types
//!
//! ## Synthetic Data
//! - **test_patterns**: Flat fields, step edges, gradients, checkerboards
//! - **illumination**: Photodiode-matrix response to sharp and blurred boundaries
//! - **noise**: Seeded Gaussian noise

pub mod convolve2d;
pub mod illumination;
pub mod image;
pub mod io;
pub mod local_stats;
pub mod noise;
pub mod spectrum;
pub mod test_patterns;

pub use convolve2d::{
    convolve2d, laplacian_kernel, sobel_x_kernel, sobel_y_kernel, ConvolveMode, ConvolveOptions,
};
pub use self::image::{array2_to_gray_image, f64_to_u8_scaled, gray_image_to_array2};
pub use io::{load_luminance, save_u8_image, ImageLoadError};
pub use local_stats::{local_std, mean_local_std, WindowError};
pub use spectrum::{fft2, fft_magnitude, fftfreq, fftshift, log_magnitude_spectrum};
