//! Physical scale of the image: millimetres per pixel along each axis.

use crate::config::PhysicalSize;
use serde::{Deserialize, Serialize};
use shared::PixelShape;

/// Per-pixel physical size derived from the field dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleInfo {
    /// Millimetres per pixel horizontally
    pub scale_x: f64,
    /// Millimetres per pixel vertically
    pub scale_y: f64,
    /// The finer of the two axes
    pub scale_factor: f64,
    /// (x, y) pixel pitch in millimetres
    pub pixel_size_mm: (f64, f64),
}

impl ScaleInfo {
    /// Derive the scale of an image covering `physical` with `pixels` samples.
    ///
    /// `pixels` must be non-empty; [`crate::LuminanceImage`] guarantees this.
    pub fn from_physical(physical: PhysicalSize, pixels: PixelShape) -> Self {
        debug_assert!(!pixels.is_empty(), "scale requires a non-empty image");
        let scale_x = physical.width_mm / pixels.width as f64;
        let scale_y = physical.height_mm / pixels.height as f64;
        Self {
            scale_x,
            scale_y,
            scale_factor: scale_x.min(scale_y),
            pixel_size_mm: (scale_x, scale_y),
        }
    }

    /// Dots per inch along (x, y).
    pub fn dpi(&self) -> (f64, f64) {
        (25.4 / self.scale_x, 25.4 / self.scale_y)
    }
}
