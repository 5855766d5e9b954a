//! Board Coordinates
//!
//! The single place where `(row, col)` and flat `index` are converted.
//! Renderers address jewels by index (`row * size + col`); the engine
//! addresses them by [`Cell`].

use serde::{Serialize, Deserialize};

/// A `(row, col)` position on the board.
///
/// Ordering is row-major, which is also the scan order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    /// Row, 0 at the top
    pub row: usize,
    /// Column, 0 at the left
    pub col: usize,
}

impl Cell {
    /// Create a cell.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Cell for a flat row-major index on a `size`×`size` board.
    #[inline]
    pub fn from_index(index: usize, size: usize) -> Self {
        Self {
            row: index / size,
            col: index % size,
        }
    }

    /// Flat row-major index on a `size`×`size` board.
    #[inline]
    pub fn to_index(self, size: usize) -> usize {
        self.row * size + self.col
    }

    /// Is this cell inside a `size`×`size` board?
    #[inline]
    pub fn in_bounds(self, size: usize) -> bool {
        self.row < size && self.col < size
    }

    /// Manhattan distance between two cells.
    pub fn manhattan(self, other: Cell) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Do the two cells share an edge?
    #[inline]
    pub fn is_adjacent(self, other: Cell) -> bool {
        self.manhattan(other) == 1
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
