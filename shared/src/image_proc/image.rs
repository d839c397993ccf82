//! Conversions between ndarray grids and image crate buffers.
//!
//! # Coordinate System Conversions
//!
//! - **ndarray**: Uses matrix indexing [row, col] = [y, x] with (height, width) dimensions
//! - **image crate**: Uses graphics indexing (x, y) with (width, height) dimensions
//!
//! Every conversion here keeps pixel (x, y) at array index [y, x].

use image::{GrayImage, Luma};
use ndarray::Array2;

/// Convert an image crate GrayImage into an `Array2<u8>` indexed [row, col].
///
/// # Examples
/// ```
/// use image::{GrayImage, Luma};
/// use shared::image_proc::image::gray_image_to_array2;
///
/// let mut img = GrayImage::new(3, 2);
/// img.put_pixel(2, 1, Luma([77]));
/// let arr = gray_image_to_array2(&img);
/// assert_eq!(arr.dim(), (2, 3));
/// assert_eq!(arr[[1, 2]], 77);
/// ```
pub fn gray_image_to_array2(img: &GrayImage) -> Array2<u8> {
    let (width, height) = img.dimensions();
    Array2::from_shape_fn((height as usize, width as usize), |(y, x)| {
        img.get_pixel(x as u32, y as u32)[0]
    })
}

/// Convert an `Array2<u8>` into a GrayImage for image crate filters and I/O.
///
/// Array dimensions (height, width) become image dimensions (width, height).
pub fn array2_to_gray_image(arr: &Array2<u8>) -> GrayImage {
    let (height, width) = arr.dim();
    let mut img = GrayImage::new(width as u32, height as u32);

    for ((y, x), &value) in arr.indexed_iter() {
        img.put_pixel(x as u32, y as u32, Luma([value]));
    }

    img
}

/// Map a floating point grid onto 0-255 using a fixed input range.
///
/// Values outside `[low, high]` saturate. A degenerate range maps everything to 0.
///
/// # Examples
/// ```
/// use ndarray::array;
/// use shared::image_proc::image::f64_to_u8_scaled;
///
/// let percent = array![[0.0, 50.0, 100.0]];
/// let grid = f64_to_u8_scaled(&percent, 0.0, 100.0);
/// assert_eq!(grid, array![[0u8, 128, 255]]);
/// ```
pub fn f64_to_u8_scaled(arr: &Array2<f64>, low: f64, high: f64) -> Array2<u8> {
    let span = high - low;
    if span.is_nan() || span <= 0.0 {
        return Array2::zeros(arr.dim());
    }
    arr.mapv(|v| (((v - low) / span) * 255.0).round().clamp(0.0, 255.0) as u8)
}
