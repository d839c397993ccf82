//! 2D convolution implementation for image processing
//!
//! Kernels are applied as correlation (not flipped), which is identical for
//! the symmetric and antisymmetric kernels built here up to sign. Borders are
//! always mirrored, so the output keeps the input shape and a flat image has
//! exactly zero derivative everywhere.

use ndarray::{array, Array2, ArrayView2};

/// Options for controlling the convolution operation
#[derive(Debug, Clone, Copy, Default)]
pub struct ConvolveOptions {
    /// How to handle edges
    pub mode: ConvolveMode,
}

/// How samples beyond the image edge are synthesized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConvolveMode {
    /// Mirror about the edge, repeating the border sample (`dcba|abcd`)
    #[default]
    Reflect,
    /// Mirror about the border sample without repeating it (`dcb|abcd`)
    Reflect101,
}

impl ConvolveOptions {
    pub fn with_mode(mode: ConvolveMode) -> Self {
        Self { mode }
    }
}

/// Map a possibly out-of-range index back into `0..len` (`len > 0`).
fn border_index(idx: isize, len: usize, mode: ConvolveMode) -> usize {
    let n = len as isize;
    if (0..n).contains(&idx) {
        return idx as usize;
    }
    match mode {
        ConvolveMode::Reflect => {
            let period = 2 * n;
            let i = idx.rem_euclid(period);
            (if i >= n { period - 1 - i } else { i }) as usize
        }
        ConvolveMode::Reflect101 => {
            if n == 1 {
                return 0;
            }
            let period = 2 * (n - 1);
            let i = idx.rem_euclid(period);
            (if i >= n { period - i } else { i }) as usize
        }
    }
}

/// Correlate an image with a kernel, mirroring samples beyond the border
///
/// # Arguments
/// * `image` - Input image as a 2D array
/// * `kernel` - Kernel with odd dimensions, centred on the output pixel
/// * `options` - Border handling; `None` uses [`ConvolveMode::Reflect`]
///
/// # Returns
/// * Array of the same shape as `image`
pub fn convolve2d(
    image: &ArrayView2<f64>,
    kernel: &ArrayView2<f64>,
    options: Option<ConvolveOptions>,
) -> Array2<f64> {
    let mode = options.unwrap_or_default().mode;

    let (img_rows, img_cols) = image.dim();
    let (ker_rows, ker_cols) = kernel.dim();
    if img_rows == 0 || img_cols == 0 {
        return Array2::zeros((img_rows, img_cols));
    }

    let pad_rows = (ker_rows / 2) as isize;
    let pad_cols = (ker_cols / 2) as isize;

    Array2::from_shape_fn((img_rows, img_cols), |(i, j)| {
        let mut sum = 0.0;
        for ki in 0..ker_rows {
            let row = border_index(i as isize + ki as isize - pad_rows, img_rows, mode);
            for kj in 0..ker_cols {
                let col = border_index(j as isize + kj as isize - pad_cols, img_cols, mode);
                sum += image[[row, col]] * kernel[[ki, kj]];
            }
        }
        sum
    })
}

/// 3x3 Sobel kernel for the horizontal derivative (d/dx).
pub fn sobel_x_kernel() -> Array2<f64> {
    array![[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]]
}

/// 3x3 Sobel kernel for the vertical derivative (d/dy).
pub fn sobel_y_kernel() -> Array2<f64> {
    array![[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]]
}

/// 3x3 four-neighbour Laplacian kernel.
pub fn laplacian_kernel() -> Array2<f64> {
    array![[0.0, 1.0, 0.0], [1.0, -4.0, 1.0], [0.0, 1.0, 0.0]]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_sum_at_corner() {
        // Reflect mirrors (0,0) into the missing row and column: 1+1+2+1+1+2+4+4+5
        let image = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]];
        let ones = Array2::from_elem((3, 3), 1.0);
        let result = convolve2d(&image.view(), &ones.view(), None);

        assert_eq!(result.dim(), (3, 3));
        assert_eq!(result[[1, 1]], 45.0);
        assert_eq!(result[[0, 0]], 21.0);
    }

    #[test]
    fn test_border_index_reflect() {
        // dcba|abcd
        assert_eq!(border_index(-1, 4, ConvolveMode::Reflect), 0);
        assert_eq!(border_index(-2, 4, ConvolveMode::Reflect), 1);
        assert_eq!(border_index(4, 4, ConvolveMode::Reflect), 3);
        assert_eq!(border_index(5, 4, ConvolveMode::Reflect), 2);
    }

    #[test]
    fn test_border_index_reflect101() {
        // dcb|abcd
        assert_eq!(border_index(-1, 4, ConvolveMode::Reflect101), 1);
        assert_eq!(border_index(-2, 4, ConvolveMode::Reflect101), 2);
        assert_eq!(border_index(4, 4, ConvolveMode::Reflect101), 2);
        assert_eq!(border_index(0, 1, ConvolveMode::Reflect101), 0);
        assert_eq!(border_index(-1, 1, ConvolveMode::Reflect101), 0);
    }

    #[test]
    fn test_mirrored_modes_keep_constant_images_flat() {
        let image = Array2::from_elem((6, 5), 42.0);
        for mode in [ConvolveMode::Reflect, ConvolveMode::Reflect101] {
            let opts = Some(ConvolveOptions::with_mode(mode));
            let lap = convolve2d(&image.view(), &laplacian_kernel().view(), opts);
            assert!(lap.iter().all(|&v| v == 0.0));

            let gx = convolve2d(&image.view(), &sobel_x_kernel().view(), opts);
            assert!(gx.iter().all(|&v| v == 0.0));

            let window = convolve2d(&image.view(), &Array2::from_elem((5, 5), 1.0).view(), opts);
            assert!(window.iter().all(|&v| v == 42.0 * 25.0));
        }
    }

    #[test]
    fn test_sobel_x_responds_to_vertical_edge() {
        let image = Array2::from_shape_fn((5, 6), |(_, x)| if x < 3 { 0.0 } else { 10.0 });
        let gx = convolve2d(
            &image.view(),
            &sobel_x_kernel().view(),
            Some(ConvolveOptions::with_mode(ConvolveMode::Reflect101)),
        );
        let gy = convolve2d(
            &image.view(),
            &sobel_y_kernel().view(),
            Some(ConvolveOptions::with_mode(ConvolveMode::Reflect101)),
        );

        assert_eq!(gx[[2, 2]], 40.0);
        assert_eq!(gx[[2, 3]], 40.0);
        assert_eq!(gx[[2, 0]], 0.0);
        assert!(gy.iter().all(|&v| v == 0.0));
    }
}
