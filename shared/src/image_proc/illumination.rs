//! Discrete illumination of a photodiode matrix across a light/dark boundary.
//!
//! Models what an ideal sampled sensor records when an illumination step (or a
//! linear ramp between two levels) crosses its pixel grid. Each photodiode has
//! an aperture of width `l_ap` placed on a pitch of `l_sh`; both in micrometres.
//! Levels are percentages of full illumination.
//!
//! The boundary runs vertically: every row of the output is identical and
//! the value changes with the column index, giving a ready-made vertical-edge
//! target for edge-based MTF estimation.

use ndarray::Array2;
use thiserror::Error;

/// Smallest and largest supported aperture and pitch in micrometres.
pub const GEOMETRY_RANGE_UM: (f64, f64) = (1.0, 10.0);

/// Errors raised when the sensor geometry or boundary placement is invalid.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IlluminationError {
    #[error("aperture {aperture_um} um and pitch {pitch_um} um must both lie in 1-10 um")]
    GeometryOutOfRange { aperture_um: f64, pitch_um: f64 },

    #[error("aperture {aperture_um} um must not exceed pitch {pitch_um} um")]
    ApertureExceedsPitch { aperture_um: f64, pitch_um: f64 },

    #[error("boundary position {position_um} um must lie strictly within {min_um}..{max_um} um")]
    BoundaryOutOfRange {
        position_um: f64,
        min_um: f64,
        max_um: f64,
    },

    #[error("blur start {start_um} um must be less than blur end {end_um} um")]
    EmptyBlurZone { start_um: f64, end_um: f64 },

    #[error("matrix must contain at least 2 photodiodes per side, got {0}")]
    MatrixTooSmall(usize),
}

/// Photodiode matrix geometry and the two illumination levels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorGrid {
    /// Photodiode aperture width (um)
    pub aperture_um: f64,
    /// Sampling pitch (um)
    pub pitch_um: f64,
    /// Illumination on the low-coordinate side of the boundary (%)
    pub e1: f64,
    /// Illumination on the high-coordinate side of the boundary (%)
    pub e2: f64,
    /// Photodiodes per side
    pub num_pixels: usize,
}

impl Default for SensorGrid {
    fn default() -> Self {
        Self {
            aperture_um: 8.0,
            pitch_um: 10.0,
            e1: 20.0,
            e2: 80.0,
            num_pixels: 20,
        }
    }
}

impl SensorGrid {
    fn validate_geometry(&self) -> Result<(), IlluminationError> {
        let (lo, hi) = GEOMETRY_RANGE_UM;
        let in_range = |v: f64| (lo..=hi).contains(&v);
        if !(in_range(self.aperture_um) && in_range(self.pitch_um)) {
            return Err(IlluminationError::GeometryOutOfRange {
                aperture_um: self.aperture_um,
                pitch_um: self.pitch_um,
            });
        }
        if self.aperture_um > self.pitch_um {
            return Err(IlluminationError::ApertureExceedsPitch {
                aperture_um: self.aperture_um,
                pitch_um: self.pitch_um,
            });
        }
        if self.num_pixels < 2 {
            return Err(IlluminationError::MatrixTooSmall(self.num_pixels));
        }
        Ok(())
    }

    fn fill_columns(&self, column_value: impl Fn(usize) -> f64) -> Array2<f64> {
        let n = self.num_pixels;
        Array2::from_shape_fn((n, n), |(_, col)| column_value(col))
    }

    /// Illumination for a sharp boundary at `boundary_um`.
    ///
    /// Only the photodiode the boundary falls on sees a mixture of the two
    /// levels, weighted by how much of its aperture lies on each side.
    /// Valid boundaries lie strictly between one pitch and `(N - 1)` pitches.
    pub fn sharp_edge(&self, boundary_um: f64) -> Result<Array2<f64>, IlluminationError> {
        self.validate_geometry()?;

        let min_um = self.pitch_um;
        let max_um = (self.num_pixels - 1) as f64 * self.pitch_um;
        if !(boundary_um > min_um && boundary_um < max_um) {
            return Err(IlluminationError::BoundaryOutOfRange {
                position_um: boundary_um,
                min_um,
                max_um,
            });
        }

        // 1-based number of the photodiode the boundary crosses
        let n_a = ((boundary_um + self.pitch_um / 2.0) / self.pitch_um).floor() as usize;
        let half_ap = self.aperture_um / 2.0;
        let delta = self.pitch_um * n_a as f64 - boundary_um;

        let mixed = if delta >= half_ap {
            self.e2
        } else if delta <= -half_ap {
            self.e1
        } else {
            ((half_ap - delta) * self.e1 + (half_ap + delta) * self.e2) / self.aperture_um
        };

        Ok(self.fill_columns(|col| match (col + 1).cmp(&n_a) {
            std::cmp::Ordering::Less => self.e1,
            std::cmp::Ordering::Greater => self.e2,
            std::cmp::Ordering::Equal => mixed,
        }))
    }

    /// Illumination for a boundary blurred linearly between `start_um` and `end_um`.
    ///
    /// Each photodiode is sampled at its centre `(n + 0.5) * pitch`.
    pub fn blurred_edge(
        &self,
        start_um: f64,
        end_um: f64,
    ) -> Result<Array2<f64>, IlluminationError> {
        self.validate_geometry()?;

        if start_um >= end_um {
            return Err(IlluminationError::EmptyBlurZone { start_um, end_um });
        }
        let max_um = self.num_pixels as f64 * self.pitch_um;
        for position_um in [start_um, end_um] {
            if !(position_um > 0.0 && position_um < max_um) {
                return Err(IlluminationError::BoundaryOutOfRange {
                    position_um,
                    min_um: 0.0,
                    max_um,
                });
            }
        }

        Ok(self.fill_columns(|col| {
            let center = (col as f64 + 0.5) * self.pitch_um;
            if center <= start_um {
                self.e1
            } else if center >= end_um {
                self.e2
            } else {
                self.e1 + (self.e2 - self.e1) * (center - start_um) / (end_um - start_um)
            }
        }))
    }
}
