//! Shared components and utilities for the image quality tools.
//!
//! Holds the format-agnostic pieces: image decoding, convolution, Fourier
//! transforms, windowed statistics and synthetic targets. Nothing here knows
//! about quality metrics; the `iq-meter` crate builds those on top.

pub mod algo;
pub mod image_proc;
pub mod image_size;

pub use image_size::PixelShape;
