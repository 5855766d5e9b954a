//! Match Detection
//!
//! Finds same-color runs through a cell and scans a board for the first
//! clearable match. Bounds are strict (`< size`) on both axes.

use serde::{Serialize, Deserialize};

use crate::core::color::Color;
use crate::core::coord::Cell;
use crate::game::board::Board;
use crate::MIN_RUN;

/// Direction a run extends in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Along a row (left/right)
    Horizontal,
    /// Along a column (up/down)
    Vertical,
}

/// Contiguous same-color cells along one axis.
///
/// Cells are sorted: increasing column for horizontal runs, increasing row
/// for vertical ones. A run always contains at least its seed cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    /// Axis of the run
    pub axis: Axis,
    /// Shared color
    pub color: Color,
    /// Member cells, sorted along the axis
    pub cells: Vec<Cell>,
}

impl Run {
    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Never true for runs built by [`count_run`].
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Long enough to clear?
    #[inline]
    pub fn is_match(&self) -> bool {
        self.len() >= MIN_RUN
    }

    /// First cell along the axis (leftmost or topmost).
    pub fn first(&self) -> Option<Cell> {
        self.cells.first().copied()
    }

    /// Last cell along the axis (rightmost or bottommost).
    pub fn last(&self) -> Option<Cell> {
        self.cells.last().copied()
    }
}

/// Both runs through one seed cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunPair {
    /// Left/right run
    pub horizontal: Run,
    /// Up/down run
    pub vertical: Run,
}

impl RunPair {
    /// Does either axis reach the minimum match length?
    pub fn has_match(&self) -> bool {
        self.horizontal.is_match() || self.vertical.is_match()
    }

    /// The run to clear when this cell matches.
    ///
    /// The strictly longer run wins; on equal length the horizontal run is
    /// taken because it comes first in scan order.
    pub fn into_preferred(self) -> Option<Run> {
        if !self.has_match() {
            return None;
        }
        if self.vertical.len() > self.horizontal.len() {
            Some(self.vertical)
        } else {
            Some(self.horizontal)
        }
    }
}

/// Count the same-color runs through `seed` in both axes.
///
/// Panics if `seed` is outside the board.
pub fn count_run(board: &Board, seed: Cell) -> RunPair {
    RunPair {
        horizontal: run_along(board, seed, Axis::Horizontal),
        vertical: run_along(board, seed, Axis::Vertical),
    }
}

fn run_along(board: &Board, seed: Cell, axis: Axis) -> Run {
    let color = board[seed];
    let size = board.size();

    let (fixed, pos) = match axis {
        Axis::Horizontal => (seed.row, seed.col),
        Axis::Vertical => (seed.col, seed.row),
    };
    let at = |p: usize| match axis {
        Axis::Horizontal => Cell::new(fixed, p),
        Axis::Vertical => Cell::new(p, fixed),
    };

    let mut start = pos;
    while start > 0 && board[at(start - 1)] == color {
        start -= 1;
    }

    let mut end = pos;
    while end + 1 < size && board[at(end + 1)] == color {
        end += 1;
    }

    Run {
        axis,
        color,
        cells: (start..=end).map(at).collect(),
    }
}

/// Scan in row-major order and return the first clearable run.
pub fn find_match(board: &Board) -> Option<Run> {
    board
        .iter()
        .map(|(cell, _)| count_run(board, cell))
        .find(RunPair::has_match)
        .and_then(RunPair::into_preferred)
}

/// True when no cell on the board sits in a run of [`MIN_RUN`] or more.
pub fn is_stable(board: &Board) -> bool {
    find_match(board).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_cell_runs() {
        let board = Board::parse(
            "
            RGB
            GBR
            BRG
            ",
        )
        .unwrap();

        let pair = count_run(&board, Cell::new(1, 1));
        assert_eq!(pair.horizontal.len(), 1);
        assert_eq!(pair.vertical.len(), 1);
        assert!(!pair.has_match());
        assert_eq!(pair.horizontal.cells, vec![Cell::new(1, 1)]);
    }

    #[test]
    fn test_run_extends_both_directions() {
        let board = Board::parse(
            "
            GRRRRG
            BCMYBC
            MYBCMY
            CBYMCB
            YMCBYM
            BCMYBC
            ",
        )
        .unwrap();

        // Seeded in the middle, the run reaches both ends and is sorted
        let pair = count_run(&board, Cell::new(0, 3));
        assert_eq!(pair.horizontal.axis, Axis::Horizontal);
        assert_eq!(pair.horizontal.color, Color::Red);
        assert_eq!(
            pair.horizontal.cells,
            vec![Cell::new(0, 1), Cell::new(0, 2), Cell::new(0, 3), Cell::new(0, 4)]
        );
        assert_eq!(pair.vertical.len(), 1);
    }

    #[test]
    fn test_run_stops_at_boundaries() {
        let board = Board::parse(
            "
            RGB
            RBG
            RGB
            ",
        )
        .unwrap();

        for row in 0..3 {
            let pair = count_run(&board, Cell::new(row, 0));
            assert_eq!(pair.vertical.len(), 3);
            assert_eq!(pair.vertical.first(), Some(Cell::new(0, 0)));
            assert_eq!(pair.vertical.last(), Some(Cell::new(2, 0)));
        }

        // Last column, last row: no read past the edge
        let corner = count_run(&board, Cell::new(2, 2));
        assert_eq!(corner.horizontal.len(), 1);
        assert_eq!(corner.vertical.len(), 1);
    }

    #[test]
    fn test_tie_prefers_horizontal() {
        // Red cross centred on (1,1): three across, three down
        let board = Board::parse(
            "
            GRB
            RRR
            BRG
            ",
        )
        .unwrap();

        let pair = count_run(&board, Cell::new(1, 1));
        assert_eq!(pair.horizontal.len(), 3);
        assert_eq!(pair.vertical.len(), 3);
        let run = pair.into_preferred().unwrap();
        assert_eq!(run.axis, Axis::Horizontal);
    }

    #[test]
    fn test_longer_vertical_wins() {
        let board = Board::parse(
            "
            GRBC
            RRRC
            BRGM
            YRCB
            ",
        )
        .unwrap();

        let run = count_run(&board, Cell::new(1, 1)).into_preferred().unwrap();
        assert_eq!(run.axis, Axis::Vertical);
        assert_eq!(run.len(), 4);
    }

    #[test]
    fn test_find_match_scans_row_major() {
        let board = Board::parse(
            "
            GBCM
            BCMG
            RRRY
            CMGB
            ",
        )
        .unwrap();

        let run = find_match(&board).unwrap();
        assert_eq!(run.axis, Axis::Horizontal);
        assert_eq!(run.color, Color::Red);
        assert_eq!(run.cells, vec![Cell::new(2, 0), Cell::new(2, 1), Cell::new(2, 2)]);
    }

    #[test]
    fn test_find_match_takes_first_of_several() {
        // Vertical yellow run in column 3 starts on row 0, ahead of the red row
        let board = Board::parse(
            "
            GBCY
            BCMY
            RRRY
            CMGB
            ",
        )
        .unwrap();

        let run = find_match(&board).unwrap();
        assert_eq!(run.axis, Axis::Vertical);
        assert_eq!(run.color, Color::Yellow);
        assert_eq!(run.first(), Some(Cell::new(0, 3)));
    }

    #[test]
    fn test_stable_board() {
        let board = Board::parse(
            "
            RRGG
            GGRR
            RRGG
            GGRR
            ",
        )
        .unwrap();
        assert!(is_stable(&board));
        assert!(find_match(&board).is_none());
    }
}
