//! The luminance grid every estimator reads.

use crate::error::QualityError;
use image::GrayImage;
use ndarray::Array2;
use shared::image_proc::{array2_to_gray_image, load_luminance};
use shared::PixelShape;
use std::path::Path;

/// Immutable, non-empty 8-bit luminance grid indexed [row, col].
#[derive(Debug, Clone, PartialEq)]
pub struct LuminanceImage {
    pixels: Array2<u8>,
}

impl LuminanceImage {
    /// Wrap a grid, rejecting zero width or height.
    pub fn new(pixels: Array2<u8>) -> Result<Self, QualityError> {
        let shape = PixelShape::of_grid(&pixels);
        if shape.is_empty() {
            return Err(QualityError::EmptyImage {
                width: shape.width,
                height: shape.height,
            });
        }
        Ok(Self { pixels })
    }

    /// Decode an image file into its luminance channel.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, QualityError> {
        Self::new(load_luminance(path)?)
    }

    pub fn pixels(&self) -> &Array2<u8> {
        &self.pixels
    }

    pub fn shape(&self) -> PixelShape {
        PixelShape::of_grid(&self.pixels)
    }

    pub fn width(&self) -> usize {
        self.pixels.ncols()
    }

    pub fn height(&self) -> usize {
        self.pixels.nrows()
    }

    /// Intensities as f64 for numerical work.
    pub fn to_f64(&self) -> Array2<f64> {
        self.pixels.mapv(f64::from)
    }

    /// Copy into an image crate buffer for imageproc filters.
    pub fn to_gray_image(&self) -> GrayImage {
        array2_to_gray_image(&self.pixels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_grid() {
        let err = LuminanceImage::new(Array2::zeros((0, 10))).unwrap_err();
        assert!(matches!(
            err,
            QualityError::EmptyImage {
                width: 10,
                height: 0
            }
        ));
    }

    #[test]
    fn test_dimensions() {
        let image = LuminanceImage::new(Array2::from_elem((3, 5), 7u8)).unwrap();
        assert_eq!(image.width(), 5);
        assert_eq!(image.height(), 3);
        assert_eq!(image.shape(), PixelShape::new(5, 3));
        assert_eq!(image.to_f64()[[2, 4]], 7.0);
        assert_eq!(image.to_gray_image().dimensions(), (5, 3));
    }

    #[test]
    fn test_from_missing_file() {
        assert!(matches!(
            LuminanceImage::from_file("/nonexistent/image.png"),
            Err(QualityError::Load(_))
        ));
    }
}
