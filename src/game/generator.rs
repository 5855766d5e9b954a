//! Board Generation
//!
//! Fills a board in row-major order, checking each candidate color against
//! the two already-placed cells to its left and the two above it, and
//! redrawing whenever the candidate would complete a run of three.

use thiserror::Error;

use crate::core::color::{Color, Palette};
use crate::core::coord::Cell;
use crate::core::rng::ColorSource;
use crate::game::board::Board;

/// Board generation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// A zero-sized board was requested.
    #[error("cannot generate a board with no cells")]
    EmptyBoard,
}

/// Generate a `size`×`size` board with no run of three in either axis.
///
/// The palette type guarantees at least three colors, so a legal color
/// always exists and the redraw loop terminates for any source that
/// eventually yields every palette color.
pub fn generate<S: ColorSource + ?Sized>(
    size: usize,
    palette: &Palette,
    source: &mut S,
) -> Result<Board, GenerateError> {
    if size == 0 {
        return Err(GenerateError::EmptyBoard);
    }

    // Placeholder fill; every cell is overwritten before it is read.
    let mut board = Board::filled(size, palette.colors()[0]);

    for row in 0..size {
        for col in 0..size {
            let cell = Cell::new(row, col);
            let color = next_color(&board, cell, palette, source);
            board.set(cell, color);
        }
    }

    Ok(board)
}

/// Pick the color for `cell`, given that every earlier cell in row-major
/// order is already placed.
fn next_color<S: ColorSource + ?Sized>(
    board: &Board,
    cell: Cell,
    palette: &Palette,
    source: &mut S,
) -> Color {
    let mut color = source.next_color(palette);

    loop {
        let dup = Duplicates::check(board, cell, color);
        if dup.up {
            // Differ from the cell directly above
            let above = board[Cell::new(cell.row - 1, cell.col)];
            while color == above {
                color = source.next_color(palette);
            }
        } else if dup.left {
            // Differ from the cell directly to the left
            let left = board[Cell::new(cell.row, cell.col - 1)];
            while color == left {
                color = source.next_color(palette);
            }
        } else {
            return color;
        }
        // A redraw that fixed one axis may have completed the other; recheck.
    }
}

/// Which already-placed pairs the candidate would extend into a run of three.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Duplicates {
    left: bool,
    up: bool,
}

impl Duplicates {
    fn check(board: &Board, cell: Cell, color: Color) -> Self {
        let left = cell.col >= 2
            && board[Cell::new(cell.row, cell.col - 1)] == color
            && board[Cell::new(cell.row, cell.col - 2)] == color;
        let up = cell.row >= 2
            && board[Cell::new(cell.row - 1, cell.col)] == color
            && board[Cell::new(cell.row - 2, cell.col)] == color;
        Self { left, up }
    }
}
