//! Noise generation for synthetic test images.

pub mod generate;

pub use generate::{add_gaussian_noise_u8, simple_normal_array};
