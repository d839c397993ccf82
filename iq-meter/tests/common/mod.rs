//! Fixtures shared by the integration tests.

#![allow(dead_code)]

use iq_meter::LuminanceImage;
use ndarray::Array2;
use shared::image_proc::noise::add_gaussian_noise_u8;
use shared::image_proc::save_u8_image;
use shared::image_proc::test_patterns::{generate_uniform, generate_vertical_step};
use std::path::{Path, PathBuf};

/// 100x100 vertical step: columns 0-49 at 20, columns 50-99 at 200.
pub fn step_pixels() -> Array2<u8> {
    generate_vertical_step(100, 100, 50, 20u8, 200u8)
}

pub fn step_image() -> LuminanceImage {
    LuminanceImage::new(step_pixels()).expect("step image is non-empty")
}

/// 50x50 flat field at mid gray.
pub fn flat_image() -> LuminanceImage {
    LuminanceImage::new(generate_uniform(50, 50, 128u8)).expect("flat image is non-empty")
}

/// The step image with seeded Gaussian noise added.
pub fn noisy_step_image(std_dev: f64, seed: u64) -> LuminanceImage {
    let noisy = add_gaussian_noise_u8(&step_pixels(), std_dev, seed).expect("valid std dev");
    LuminanceImage::new(noisy).expect("noisy image is non-empty")
}

/// Write `pixels` as a PNG in `dir` and return its path.
pub fn write_png(dir: &Path, name: &str, pixels: &Array2<u8>) -> PathBuf {
    let path = dir.join(name);
    save_u8_image(pixels, &path).expect("failed to write test image");
    path
}
