use std::error::Error;
use std::fmt;

use super::CellPos;

/// Error produced by an operation on the grid.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum GridError {
    /// Coordinates lie outside the grid.
    OutOfBounds {
        /// Requested position.
        pos: CellPos,
        /// Number of rows in the grid.
        rows: usize,
        /// Number of columns in the grid.
        cols: usize,
    },
    /// Hint value outside `0..=8`.
    InvalidHint(u8),
    /// Grid with zero rows or zero columns.
    EmptyGrid,
    /// Bomb probability that is not a number in `0.0..=1.0`.
    InvalidProbability(f64),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::OutOfBounds { pos, rows, cols } => write!(
                f,
                "cell {} is outside of the {}x{} grid",
                pos, rows, cols,
            ),
            GridError::InvalidHint(n) => write!(f, "hint must be in range 0-8, not {}", n),
            GridError::EmptyGrid => write!(f, "grid must have at least one row and one column"),
            GridError::InvalidProbability(p) => {
                write!(f, "bomb probability must be in range 0-1, not {}", p)
            }
        }
    }
}

impl Error for GridError {}
