//! Grid coordinates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A (row, col) cell address on the 17x25 grid.
///
/// Coordinates are signed so that offset arithmetic near the edges produces
/// an out-of-bounds position instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Returns this position shifted by `(dr, dc)`.
    pub const fn offset(self, (dr, dc): (i32, i32)) -> Self {
        Self {
            row: self.row + dr,
            col: self.col + dc,
        }
    }

    /// Displacement from `self` to `other`.
    pub const fn delta_to(self, other: Position) -> (i32, i32) {
        (other.row - self.row, other.col - self.col)
    }

    /// Cell halfway between `self` and `other`. Only meaningful for jumps,
    /// where both components of the displacement are even.
    pub const fn midpoint(self, other: Position) -> Self {
        Self {
            row: (self.row + other.row) / 2,
            col: (self.col + other.col) / 2,
        }
    }
}

impl From<(i32, i32)> for Position {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
