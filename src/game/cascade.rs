//! Cascade Resolution
//!
//! The core state machine that turns a swapped board into a stable one:
//!
//! ```text
//! Scanning ──match──▶ Clearing ──▶ Falling ──▶ Refilling ──┐
//!    ▲                                                      │
//!    └──────────────────────────────────────────────────────┘
//!    │
//!    └──no match──▶ Stable
//! ```
//!
//! Exactly one run is cleared per pass. Later runs elsewhere on the board
//! are found by the next scan, which always restarts from the top-left.
//!
//! # Determinism
//!
//! Resolution is a pure function of the input board and the sequence of
//! colors the source yields. Fresh colors for a pass are drawn in order
//! before any of them is placed.

use serde::{Serialize, Deserialize};
use tracing::trace;

use crate::core::color::{Color, Palette};
use crate::core::coord::Cell;
use crate::core::rng::ColorSource;
use crate::game::board::Board;
use crate::game::matcher::{find_match, Axis, Run};

/// One cleared run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchEvent {
    /// Pass number, starting at 1
    pub pass: u32,
    /// Axis chosen for this pass
    pub axis: Axis,
    /// Color of the cleared jewels
    pub color: Color,
    /// Cleared cells, sorted along the axis
    pub cells: Vec<Cell>,
}

impl MatchEvent {
    fn from_run(pass: u32, run: Run) -> Self {
        Self {
            pass,
            axis: run.axis,
            color: run.color,
            cells: run.cells,
        }
    }

    /// Number of jewels cleared.
    pub fn size(&self) -> usize {
        self.cells.len()
    }
}

/// Outcome of resolving a board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CascadeResult {
    /// Board after the last pass
    pub board: Board,
    /// Sum of matched-set sizes over all passes
    pub total_cleared: u32,
    /// One entry per pass, in order
    pub matches: Vec<MatchEvent>,
    /// False only when a cancellable resolution was stopped early
    pub completed: bool,
}

impl CascadeResult {
    /// Number of passes that cleared something.
    pub fn passes(&self) -> u32 {
        self.matches.len() as u32
    }

    /// Did the swap clear anything at all?
    pub fn cleared_any(&self) -> bool {
        self.total_cleared > 0
    }
}

/// Resolve every match on `board` until it is stable.
pub fn resolve<S: ColorSource + ?Sized>(
    board: Board,
    palette: &Palette,
    source: &mut S,
) -> CascadeResult {
    resolve_until(board, palette, source, |_| true)
}

/// Like [`resolve`], but asks `keep_going(passes_done)` before every pass
/// after the first. Returning false stops with `completed == false`; the
/// board is always left fully refilled.
pub fn resolve_until<S, F>(
    mut board: Board,
    palette: &Palette,
    source: &mut S,
    mut keep_going: F,
) -> CascadeResult
where
    S: ColorSource + ?Sized,
    F: FnMut(u32) -> bool,
{
    let mut matches = Vec::new();
    let mut total_cleared = 0u32;
    let mut fresh = Vec::with_capacity(board.size());

    loop {
        let passes_done = matches.len() as u32;
        if passes_done > 0 && !keep_going(passes_done) {
            trace!(passes = passes_done, "cascade cancelled between passes");
            return CascadeResult {
                board,
                total_cleared,
                matches,
                completed: false,
            };
        }

        // Scanning
        let Some(run) = find_match(&board) else {
            break;
        };

        let pass = passes_done + 1;
        trace!(
            pass,
            axis = ?run.axis,
            color = %run.color,
            len = run.len(),
            "clearing run"
        );

        // Clearing: fresh colors are drawn up front, in order
        fresh.clear();
        fresh.extend((0..run.len()).map(|_| source.next_color(palette)));

        // Falling + Refilling
        match run.axis {
            Axis::Vertical => collapse_column(&mut board, &run, &fresh),
            Axis::Horizontal => collapse_row_span(&mut board, &run, &fresh),
        }

        #[cfg(feature = "debug-tracing")]
        trace!(pass, "board after pass:\n{}", board);

        total_cleared += run.len() as u32;
        matches.push(MatchEvent::from_run(pass, run));
    }

    CascadeResult {
        board,
        total_cleared,
        matches,
        completed: true,
    }
}

/// Vertical run in one column: everything above the run drops by the run's
/// length, keeping its order, and the fresh colors fill rows `0..len`.
fn collapse_column(board: &mut Board, run: &Run, fresh: &[Color]) {
    let Some(top) = run.first() else {
        return;
    };
    let col = top.col;
    let len = run.len();

    for row in (0..top.row).rev() {
        let color = board[Cell::new(row, col)];
        board.set(Cell::new(row + len, col), color);
    }

    for (row, color) in fresh.iter().enumerate() {
        board.set(Cell::new(row, col), *color);
    }
}

/// Horizontal run in one row: each spanned column drops its cells above the
/// row by one and receives one fresh color on top, left to right.
fn collapse_row_span(board: &mut Board, run: &Run, fresh: &[Color]) {
    for (cell, color) in run.cells.iter().zip(fresh) {
        for row in (1..=cell.row).rev() {
            let above = board[Cell::new(row - 1, cell.col)];
            board.set(Cell::new(row, cell.col), above);
        }
        board.set(Cell::new(0, cell.col), *color);
    }
}

// =============================================================================
// TESTS
// =============================================================================
