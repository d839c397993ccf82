//! Numerical helpers shared by the image processing routines.

pub mod stats;

pub use stats::{mean, mean_square, population_std, population_variance, shannon_entropy_bits};
