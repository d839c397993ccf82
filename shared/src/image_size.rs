//! Pixel dimensions of a frame.

use std::fmt;

/// Width and height in pixels, in ndarray-compatible `usize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PixelShape {
    /// Image width in pixels
    pub width: usize,
    /// Image height in pixels
    pub height: usize,
}

impl PixelShape {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Shape of an ndarray grid indexed [row, col]
    pub fn of_grid<T>(grid: &ndarray::Array2<T>) -> Self {
        let (height, width) = grid.dim();
        Self { width, height }
    }

    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// True when either dimension is zero
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl fmt::Display for PixelShape {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    #[test]
    fn test_of_grid_swaps_axes() {
        let grid = Array2::<u8>::zeros((480, 640));
        let shape = PixelShape::of_grid(&grid);
        assert_eq!(shape, PixelShape::new(640, 480));
        assert_eq!(shape.pixel_count(), 307_200);
        assert_eq!(shape.to_string(), "640x480");
    }

    #[test]
    fn test_is_empty() {
        assert!(PixelShape::new(0, 10).is_empty());
        assert!(PixelShape::default().is_empty());
        assert!(!PixelShape::new(1, 1).is_empty());
    }
}
