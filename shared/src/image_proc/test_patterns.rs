//! Synthetic targets with known answers.
//!
//! Flat fields, hard step edges, ramps and checkerboards, all indexed
//! [row, col].

use ndarray::Array2;
use num_traits::{NumCast, Zero};

/// Uniform field of a single value.
pub fn generate_uniform<T: Clone>(width: usize, height: usize, value: T) -> Array2<T> {
    Array2::from_elem((height, width), value)
}

/// Hard vertical step edge.
///
/// Columns `0..edge_col` take `left_value`; the rest take `right_value`.
///
/// # Examples
/// ```
/// use shared::image_proc::test_patterns::generate_vertical_step;
///
/// let step = generate_vertical_step(100, 100, 50, 20u8, 200u8);
/// assert_eq!(step[[10, 49]], 20);
/// assert_eq!(step[[10, 50]], 200);
/// ```
pub fn generate_vertical_step<T: Clone>(
    width: usize,
    height: usize,
    edge_col: usize,
    left_value: T,
    right_value: T,
) -> Array2<T> {
    Array2::from_shape_fn((height, width), |(_, x)| {
        if x < edge_col {
            left_value.clone()
        } else {
            right_value.clone()
        }
    })
}

/// Checkerboard of square `cell`-pixel cells, `dark` in the top-left cell.
///
/// A cell size of 1 alternates every pixel, putting all non-DC energy at the
/// sampling limit. Partial cells are kept when the size is not a multiple of
/// `cell`.
pub fn generate_checkerboard<T: Clone>(
    width: usize,
    height: usize,
    cell: usize,
    dark: T,
    light: T,
) -> Array2<T> {
    let cell = cell.max(1);
    Array2::from_shape_fn((height, width), |(y, x)| {
        if (x / cell + y / cell) % 2 == 0 {
            dark.clone()
        } else {
            light.clone()
        }
    })
}

/// Linear ramp along x.
///
/// Values run linearly from `min_value` at the left edge to `max_value` at the
/// right edge; a single-column pattern holds `min_value`. Values that do not
/// fit `T` after interpolation fall back to zero.
pub fn generate_horizontal_gradient<T>(
    width: usize,
    height: usize,
    min_value: T,
    max_value: T,
) -> Array2<T>
where
    T: Copy + NumCast + Zero,
{
    let min_f: f64 = num_traits::cast(min_value).unwrap_or(0.0);
    let max_f: f64 = num_traits::cast(max_value).unwrap_or(0.0);
    let denom = width.saturating_sub(1).max(1) as f64;

    Array2::from_shape_fn((height, width), |(_, x)| {
        let t = x as f64 / denom;
        num_traits::cast((min_f + t * (max_f - min_f)).round()).unwrap_or_else(T::zero)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkerboard_cells() {
        let board = generate_checkerboard(5, 4, 2, 10u8, 90u8);
        assert_eq!(board.dim(), (4, 5));
        assert_eq!(board.row(0).to_vec(), vec![10, 10, 90, 90, 10]);
        assert_eq!(board.row(2).to_vec(), vec![90, 90, 10, 10, 90]);

        let pixel_board = generate_checkerboard(3, 2, 1, 0u8, 1u8);
        assert_eq!(pixel_board, ndarray::array![[0, 1, 0], [1, 0, 1]]);
    }

    #[test]
    fn test_gradient_generation() {
        let h_grad = generate_horizontal_gradient::<u8>(256, 4, 0, 255);
        assert_eq!(h_grad.dim(), (4, 256));
        assert_eq!(h_grad[[0, 0]], 0);
        assert_eq!(h_grad[[3, 255]], 255);
        assert_eq!(h_grad[[2, 100]], 100);
    }

    #[test]
    fn test_step_and_uniform() {
        let step = generate_vertical_step(10, 3, 4, 1u8, 9u8);
        assert_eq!(step.row(0).to_vec(), vec![1, 1, 1, 1, 9, 9, 9, 9, 9, 9]);

        let flat = generate_uniform(5, 7, 128u8);
        assert_eq!(flat.dim(), (7, 5));
        assert!(flat.iter().all(|&v| v == 128));
    }
}
