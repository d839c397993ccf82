//! Discrete Fourier transform helpers built on rustfft.
//!
//! Layout conventions follow the usual FFT library ones: bin `k` of an
//! `n`-point transform holds frequency `k/n` cycles per sample for
//! `k < ceil(n/2)` and `(k - n)/n` above that.

use ndarray::{Array2, ArrayView2, Axis};
use rustfft::{num_complex::Complex, FftPlanner};

/// Sample frequencies (cycles per sample) for an `n`-point transform.
///
/// # Examples
/// ```
/// use shared::image_proc::spectrum::fftfreq;
///
/// assert_eq!(fftfreq(4), vec![0.0, 0.25, -0.5, -0.25]);
/// ```
pub fn fftfreq(n: usize) -> Vec<f64> {
    let positive = n.div_ceil(2);
    (0..n)
        .map(|k| {
            if k < positive {
                k as f64 / n as f64
            } else {
                (k as f64 - n as f64) / n as f64
            }
        })
        .collect()
}

/// Magnitude of the forward DFT of a real signal.
pub fn fft_magnitude(signal: &[f64]) -> Vec<f64> {
    if signal.is_empty() {
        return Vec::new();
    }

    let mut buffer: Vec<Complex<f64>> = signal.iter().map(|&x| Complex::new(x, 0.0)).collect();

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(buffer.len());
    fft.process(&mut buffer);

    buffer.iter().map(|c| c.norm()).collect()
}

/// Forward 2-D DFT of a real image: rows first, then columns.
pub fn fft2(image: &ArrayView2<f64>) -> Array2<Complex<f64>> {
    let (rows, cols) = image.dim();
    let mut spectrum = image.mapv(|v| Complex::new(v, 0.0));
    if rows == 0 || cols == 0 {
        return spectrum;
    }

    let mut planner = FftPlanner::new();

    let row_fft = planner.plan_fft_forward(cols);
    let mut line = vec![Complex::new(0.0, 0.0); cols];
    for mut row in spectrum.axis_iter_mut(Axis(0)) {
        line.iter_mut().zip(row.iter()).for_each(|(dst, src)| *dst = *src);
        row_fft.process(&mut line);
        row.iter_mut().zip(line.iter()).for_each(|(dst, src)| *dst = *src);
    }

    let col_fft = planner.plan_fft_forward(rows);
    let mut line = vec![Complex::new(0.0, 0.0); rows];
    for mut col in spectrum.axis_iter_mut(Axis(1)) {
        line.iter_mut().zip(col.iter()).for_each(|(dst, src)| *dst = *src);
        col_fft.process(&mut line);
        col.iter_mut().zip(line.iter()).for_each(|(dst, src)| *dst = *src);
    }

    spectrum
}

/// Move the zero-frequency bin to the centre of the grid.
///
/// Index `k` along an axis of length `n` moves to `(k + n/2) mod n`, so the DC
/// term lands at `[rows/2, cols/2]`.
pub fn fftshift<T: Clone>(grid: &Array2<T>) -> Array2<T> {
    let (rows, cols) = grid.dim();
    let shift_r = rows / 2;
    let shift_c = cols / 2;
    Array2::from_shape_fn((rows, cols), |(i, j)| {
        let src_r = (i + rows - shift_r) % rows;
        let src_c = (j + cols - shift_c) % cols;
        grid[[src_r, src_c]].clone()
    })
}

/// Natural-log magnitude spectrum `ln(|F| + 1)` with DC centred.
pub fn log_magnitude_spectrum(image: &ArrayView2<f64>) -> Array2<f64> {
    let shifted = fftshift(&fft2(image));
    shifted.mapv(|c| (c.norm() + 1.0).ln())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_fftfreq_odd() {
        let f = fftfreq(5);
        assert_eq!(f.len(), 5);
        assert_eq!(f[0], 0.0);
        assert_relative_eq!(f[2], 0.4);
        assert_relative_eq!(f[3], -0.4);
    }

    #[test]
    fn test_fft_magnitude_impulse_is_flat() {
        let mut signal = vec![0.0; 16];
        signal[5] = 3.0;
        let mag = fft_magnitude(&signal);
        for m in mag {
            assert_relative_eq!(m, 3.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_fft_magnitude_dc() {
        let mag = fft_magnitude(&[2.0; 8]);
        assert_relative_eq!(mag[0], 16.0, epsilon = 1e-12);
        for &m in &mag[1..] {
            assert!(m < 1e-12);
        }
        assert!(fft_magnitude(&[]).is_empty());
    }

    #[test]
    fn test_fft2_constant_image_only_dc() {
        let image = Array2::from_elem((6, 4), 1.5);
        let spectrum = fft2(&image.view());
        assert_relative_eq!(spectrum[[0, 0]].re, 36.0, epsilon = 1e-9);
        for ((i, j), c) in spectrum.indexed_iter() {
            if (i, j) != (0, 0) {
                assert!(c.norm() < 1e-9);
            }
        }
    }

    #[test]
    fn test_fftshift_moves_origin_to_center() {
        let grid = array![[0, 1, 2], [3, 4, 5], [6, 7, 8], [9, 10, 11]];
        let shifted = fftshift(&grid);
        assert_eq!(shifted[[2, 1]], 0);
        assert_eq!(shifted, array![[8, 6, 7], [11, 9, 10], [2, 0, 1], [5, 3, 4]]);
    }

    #[test]
    fn test_log_magnitude_of_zero_image_is_zero() {
        let image = Array2::<f64>::zeros((8, 8));
        let spectrum = log_magnitude_spectrum(&image.view());
        assert!(spectrum.iter().all(|&v| v == 0.0));
    }
}
