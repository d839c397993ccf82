//! Image file I/O for luminance grids.
//!
//! Decoding goes through the image crate, so any format it recognizes (PNG,
//! JPEG, BMP, TIFF, ...) can be analyzed. Color inputs are collapsed to a single
//! luma channel; the quality pipeline never looks at color.

use super::image::{array2_to_gray_image, gray_image_to_array2};
use ndarray::Array2;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while reading or writing image files.
#[derive(Error, Debug)]
pub enum ImageLoadError {
    /// The file could not be decoded as an image.
    #[error("failed to decode image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The file decoded to an image without pixels.
    #[error("image {path} has no pixels ({width}x{height})")]
    Empty {
        path: PathBuf,
        width: u32,
        height: u32,
    },

    /// Writing the image failed.
    #[error("failed to write image {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Load an image file as an 8-bit luminance grid indexed [row, col].
///
/// # Errors
/// [`ImageLoadError::Decode`] when the file is missing or not a readable image,
/// [`ImageLoadError::Empty`] when it decodes to zero width or height.
pub fn load_luminance<P: AsRef<Path>>(path: P) -> Result<Array2<u8>, ImageLoadError> {
    let path = path.as_ref();
    let decoded = image::open(path).map_err(|source| ImageLoadError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let gray = decoded.to_luma8();
    let (width, height) = gray.dimensions();
    if width == 0 || height == 0 {
        return Err(ImageLoadError::Empty {
            path: path.to_path_buf(),
            width,
            height,
        });
    }

    tracing::debug!("Loaded {} as {}x{} luminance", path.display(), width, height);
    Ok(gray_image_to_array2(&gray))
}

/// Save 8-bit grayscale grid to a standard image format (PNG, JPEG, etc.).
///
/// File format is determined from the file extension.
pub fn save_u8_image<P: AsRef<Path>>(image: &Array2<u8>, path: P) -> Result<(), ImageLoadError> {
    let path = path.as_ref();
    array2_to_gray_image(image)
        .save(path)
        .map_err(|source| ImageLoadError::Write {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_then_load_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ramp.png");

        let grid = Array2::from_shape_fn((8, 16), |(y, x)| (x * 16 + y) as u8);
        save_u8_image(&grid, &path).unwrap();

        let loaded = load_luminance(&path).unwrap();
        assert_eq!(loaded, grid);
    }

    #[test]
    fn test_load_missing_file_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_luminance(dir.path().join("nope.png")).unwrap_err();
        assert!(matches!(err, ImageLoadError::Decode { .. }));
    }

    #[test]
    fn test_load_garbage_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        assert!(matches!(
            load_luminance(&path),
            Err(ImageLoadError::Decode { .. })
        ));
    }
}
