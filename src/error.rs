//! Error types for the relay planner.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RelayError {
    #[error("cell ({x}, {y}) is outside the {rows}x{cols} grid")]
    OutOfBounds {
        x: usize,
        y: usize,
        rows: usize,
        cols: usize,
    },

    #[error("invalid grid: {0}")]
    InvalidGrid(String),

    #[error("tower {index} at ({x}, {y}) is not on a buildable cell")]
    UnbuildableTower { index: usize, x: usize, y: usize },
}

pub type Result<T> = std::result::Result<T, RelayError>;
