//! Errors raised by the grid model.
//!
//! The simulation loop itself never fails; everything here comes from
//! coordinate access, construction, rate configuration or restore.

use thiserror::Error;

#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    /// Coordinate outside `[0, rows) x [0, cols)`.
    #[error("cell ({row}, {col}) is outside of a {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// Target rate must be a positive finite number of updates per second.
    #[error("invalid target rate {0}: expected a positive number of updates per second")]
    InvalidRate(f64),

    /// A grid needs at least one row and one column.
    #[error("grid dimensions must be positive, got {rows}x{cols}")]
    EmptyGrid { rows: usize, cols: usize },

    /// `rows * cols` does not fit in memory addressing.
    #[error("grid of {rows}x{cols} cells is too large")]
    TooLarge { rows: usize, cols: usize },

    /// Snapshot size differs from the grid size.
    #[error("snapshot is {found:?} but the grid is {expected:?}")]
    DimensionMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
}

impl GridError {
    /// Returns a short stable label (snake_case) for use in log fields.
    pub fn as_label(&self) -> &'static str {
        match self {
            GridError::OutOfBounds { .. } => "grid_out_of_bounds",
            GridError::InvalidRate(_) => "grid_invalid_rate",
            GridError::EmptyGrid { .. } => "grid_empty",
            GridError::TooLarge { .. } => "grid_too_large",
            GridError::DimensionMismatch { .. } => "grid_dimension_mismatch",
        }
    }
}
