//! Jewel Board
//!
//! An N×N grid of colors stored as a flat row-major vector. Boards are
//! plain values: every operation that changes the layout returns or mutates
//! an owned copy, and cloning is a straight copy of the cell vector.

use std::ops::{Index, IndexMut};

use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::core::color::Color;
use crate::core::coord::Cell;
use crate::core::hash::{StateHash, StateHasher};

/// Board construction and addressing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    /// Cell is outside the board.
    #[error("cell {cell} is outside a {size}x{size} board")]
    OutOfBounds {
        /// Offending cell.
        cell: Cell,
        /// Board size.
        size: usize,
    },

    /// Flat index is outside the board.
    #[error("index {index} is outside a {size}x{size} board")]
    IndexOutOfBounds {
        /// Offending index.
        index: usize,
        /// Board size.
        size: usize,
    },

    /// Rows have different lengths, or row count differs from row length.
    #[error("board is not square: row {row} has {len} cells, expected {expected}")]
    NotSquare {
        /// Row that broke the shape.
        row: usize,
        /// Its length.
        len: usize,
        /// Expected length.
        expected: usize,
    },

    /// A fixture used a symbol that is not a color.
    #[error("unknown color symbol {0:?}")]
    UnknownSymbol(char),

    /// Zero rows.
    #[error("board has no cells")]
    Empty,
}

/// Square grid of jewel colors.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    /// Row-major (row * size + col)
    cells: Vec<Color>,
}

impl Board {
    /// Board of `size`×`size` cells all holding `fill`.
    pub fn filled(size: usize, fill: Color) -> Self {
        Self {
            size,
            cells: vec![fill; size * size],
        }
    }

    /// Build from rows of colors.
    pub fn from_rows(rows: Vec<Vec<Color>>) -> Result<Self, BoardError> {
        let size = rows.len();
        if size == 0 {
            return Err(BoardError::Empty);
        }

        let mut cells = Vec::with_capacity(size * size);
        for (row, colors) in rows.into_iter().enumerate() {
            if colors.len() != size {
                return Err(BoardError::NotSquare {
                    row,
                    len: colors.len(),
                    expected: size,
                });
            }
            cells.extend(colors);
        }

        Ok(Self { size, cells })
    }

    /// Parse a text fixture: one line per row, one color symbol per cell.
    /// Whitespace inside a line is ignored and blank lines are skipped.
    ///
    /// ```
    /// use jewel_cascade::game::board::Board;
    ///
    /// let board = Board::parse("
    ///     RGB
    ///     GBR
    ///     BRG
    /// ").unwrap();
    /// assert_eq!(board.size(), 3);
    /// ```
    pub fn parse(text: &str) -> Result<Self, BoardError> {
        let mut rows = Vec::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let row = line
                .chars()
                .filter(|c| !c.is_whitespace())
                .map(|c| Color::from_symbol(c).ok_or(BoardError::UnknownSymbol(c)))
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(row);
        }
        Self::from_rows(rows)
    }

    /// Side length.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Is the cell on the board?
    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.in_bounds(self.size)
    }

    /// Bounds-checked read.
    pub fn get(&self, cell: Cell) -> Option<Color> {
        if self.contains(cell) {
            Some(self.cells[cell.to_index(self.size)])
        } else {
            None
        }
    }

    /// Bounds-checked read that reports why it failed.
    pub fn try_get(&self, cell: Cell) -> Result<Color, BoardError> {
        self.get(cell).ok_or(BoardError::OutOfBounds {
            cell,
            size: self.size,
        })
    }

    /// Color at a flat index (`row * size + col`), as renderers address it.
    pub fn color_at_index(&self, index: usize) -> Result<Color, BoardError> {
        self.cells
            .get(index)
            .copied()
            .ok_or(BoardError::IndexOutOfBounds {
                index,
                size: self.size,
            })
    }

    /// Cell for a renderer's flat index.
    pub fn cell_at_index(&self, index: usize) -> Result<Cell, BoardError> {
        if index < self.cells.len() {
            Ok(Cell::from_index(index, self.size))
        } else {
            Err(BoardError::IndexOutOfBounds {
                index,
                size: self.size,
            })
        }
    }

    /// Write a color. Panics on out-of-bounds cells.
    #[inline]
    pub fn set(&mut self, cell: Cell, color: Color) {
        self[cell] = color;
    }

    /// Exchange two cells in place. Panics on out-of-bounds cells.
    pub fn swap_cells(&mut self, a: Cell, b: Cell) {
        let ia = self.checked_index(a);
        let ib = self.checked_index(b);
        self.cells.swap(ia, ib);
    }

    /// Colors in row-major order.
    pub fn cells(&self) -> &[Color] {
        &self.cells
    }

    /// One row as a slice.
    pub fn row(&self, row: usize) -> &[Color] {
        let start = row * self.size;
        &self.cells[start..start + self.size]
    }

    /// Iterate `(cell, color)` in row-major (scan) order.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, Color)> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, color)| (Cell::from_index(i, size), *color))
    }

    /// Hash of size and every cell, in row-major order.
    pub fn compute_hash(&self) -> StateHash {
        let mut hasher = StateHasher::for_board();
        self.hash_into(&mut hasher);
        hasher.finalize()
    }

    /// Feed this board into an outer hasher.
    pub fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_usize(self.size);
        for color in &self.cells {
            hasher.update_color(*color);
        }
    }

    #[inline]
    fn checked_index(&self, cell: Cell) -> usize {
        assert!(
            self.contains(cell),
            "cell {} outside {}x{} board",
            cell,
            self.size,
            self.size
        );
        cell.to_index(self.size)
    }
}

impl Index<Cell> for Board {
    type Output = Color;

    fn index(&self, cell: Cell) -> &Color {
        let idx = self.checked_index(cell);
        &self.cells[idx]
    }
}

impl IndexMut<Cell> for Board {
    fn index_mut(&mut self, cell: Cell) -> &mut Color {
        let idx = self.checked_index(cell);
        &mut self.cells[idx]
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..self.size {
            for color in self.row(row) {
                write!(f, "{}", color.symbol())?;
            }
            if row + 1 < self.size {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> Board {
        Board::parse(
            "
            GBC
            BCM
            RRY
            ",
        )
        .unwrap()
    }

    #[test]
    fn test_parse_and_display() {
        let board = fixture();
        assert_eq!(board.size(), 3);
        assert_eq!(board[Cell::new(2, 1)], Color::Red);
        assert_eq!(board.to_string(), "GBC\nBCM\nRRY");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(Board::parse(""), Err(BoardError::Empty));
        assert_eq!(
            Board::parse("RG\nG"),
            Err(BoardError::NotSquare { row: 1, len: 1, expected: 2 })
        );
        assert_eq!(Board::parse("RX\nGB"), Err(BoardError::UnknownSymbol('X')));
    }

    #[test]
    fn test_not_square() {
        let result = Board::parse("RGB\nGBR");
        assert_eq!(
            result,
            Err(BoardError::NotSquare { row: 0, len: 3, expected: 2 })
        );
    }

    #[test]
    fn test_bounds_checked_access() {
        let board = fixture();
        assert_eq!(board.get(Cell::new(0, 0)), Some(Color::Green));
        assert_eq!(board.get(Cell::new(3, 0)), None);
        assert_eq!(
            board.try_get(Cell::new(0, 3)),
            Err(BoardError::OutOfBounds { cell: Cell::new(0, 3), size: 3 })
        );
    }

    #[test]
    fn test_index_addressing() {
        let board = fixture();
        assert_eq!(board.color_at_index(5), Ok(Color::Magenta));
        assert_eq!(board.cell_at_index(5), Ok(Cell::new(1, 2)));
        assert_eq!(
            board.color_at_index(9),
            Err(BoardError::IndexOutOfBounds { index: 9, size: 3 })
        );
        assert!(board.cell_at_index(9).is_err());
    }

    #[test]
    #[should_panic(expected = "outside 3x3 board")]
    fn test_index_panics_out_of_bounds() {
        let board = fixture();
        let _ = board[Cell::new(0, 3)];
    }

    #[test]
    fn test_swap_cells() {
        let mut board = fixture();
        board.swap_cells(Cell::new(0, 0), Cell::new(0, 1));
        assert_eq!(board.row(0), &[Color::Blue, Color::Green, Color::Cyan]);
    }

    #[test]
    fn test_clone_is_independent() {
        let board = fixture();
        let mut copy = board.clone();
        copy.set(Cell::new(0, 0), Color::Yellow);
        assert_eq!(board[Cell::new(0, 0)], Color::Green);
        assert_ne!(board, copy);
    }

    #[test]
    fn test_hash_tracks_contents() {
        let board = fixture();
        let mut other = board.clone();
        assert_eq!(board.compute_hash(), other.compute_hash());

        other.set(Cell::new(2, 2), Color::Blue);
        assert_ne!(board.compute_hash(), other.compute_hash());
    }

    #[test]
    fn test_iter_is_row_major() {
        let board = fixture();
        let cells: Vec<Cell> = board.iter().map(|(cell, _)| cell).collect();
        let mut sorted = cells.clone();
        sorted.sort();
        assert_eq!(cells, sorted);
        assert_eq!(cells.len(), 9);
    }
}
