//! Swap Validation
//!
//! A swap is legal when the two cells share an edge. A legal swap is always
//! locked in, whether or not it produces a match.

use thiserror::Error;

use crate::core::coord::Cell;
use crate::game::board::Board;
use crate::game::matcher::count_run;

/// Swap rejection reasons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SwapError {
    /// The cells do not share an edge.
    #[error("cells {a} and {b} are not adjacent")]
    NotAdjacent {
        /// First cell.
        a: Cell,
        /// Second cell.
        b: Cell,
    },

    /// A cell lies outside the board.
    #[error("cell {cell} is outside a {size}x{size} board")]
    OutOfBounds {
        /// Offending cell.
        cell: Cell,
        /// Board size.
        size: usize,
    },
}

/// Manhattan distance exactly one.
#[inline]
pub fn is_adjacent(a: Cell, b: Cell) -> bool {
    a.is_adjacent(b)
}

/// Return a copy of `board` with `a` and `b` exchanged.
///
/// Bounds are checked before adjacency, and the input board is never
/// modified.
pub fn try_swap(board: &Board, a: Cell, b: Cell) -> Result<Board, SwapError> {
    for cell in [a, b] {
        if !board.contains(cell) {
            return Err(SwapError::OutOfBounds {
                cell,
                size: board.size(),
            });
        }
    }

    if !is_adjacent(a, b) {
        return Err(SwapError::NotAdjacent { a, b });
    }

    let mut swapped = board.clone();
    swapped.swap_cells(a, b);
    Ok(swapped)
}

/// First swap that would line up a run through one of the swapped cells.
///
/// Candidates are visited in row-major order of their first cell, trying
/// the right neighbour before the one below.
pub fn find_productive_swap(board: &Board) -> Option<(Cell, Cell)> {
    board
        .iter()
        .flat_map(|(cell, _)| {
            [Cell::new(cell.row, cell.col + 1), Cell::new(cell.row + 1, cell.col)]
                .into_iter()
                .map(move |other| (cell, other))
        })
        .filter(|(_, other)| board.contains(*other))
        .find(|&(a, b)| {
            let mut swapped = board.clone();
            swapped.swap_cells(a, b);
            count_run(&swapped, a).has_match() || count_run(&swapped, b).has_match()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::color::Palette;
    use crate::core::rng::DeterministicRng;
    use crate::game::generator::generate;
    use proptest::prelude::*;

    fn fixture() -> Board {
        Board::parse(
            "
            RGB
            RYB
            GGB
            ",
        )
        .unwrap()
    }

    #[test]
    fn test_adjacent_swap() {
        let board = fixture();
        let swapped = try_swap(&board, Cell::new(0, 1), Cell::new(1, 1)).unwrap();

        assert_eq!(swapped.to_string(), "RYB\nRGB\nGGB");
        // Input board untouched
        assert_eq!(board.to_string(), "RGB\nRYB\nGGB");
    }

    #[test]
    fn test_swap_is_symmetric() {
        let board = fixture();
        let ab = try_swap(&board, Cell::new(2, 0), Cell::new(2, 1)).unwrap();
        let ba = try_swap(&board, Cell::new(2, 1), Cell::new(2, 0)).unwrap();
        assert_eq!(ab, ba);
        // Equal colors: a legal swap that changes nothing
        assert_eq!(ab, board);
    }

    #[test]
    fn test_non_adjacent_rejected() {
        let board = fixture();

        let diagonal = try_swap(&board, Cell::new(0, 0), Cell::new(1, 1));
        assert_eq!(
            diagonal,
            Err(SwapError::NotAdjacent { a: Cell::new(0, 0), b: Cell::new(1, 1) })
        );

        let same = try_swap(&board, Cell::new(1, 1), Cell::new(1, 1));
        assert!(matches!(same, Err(SwapError::NotAdjacent { .. })));

        let far = try_swap(&board, Cell::new(0, 0), Cell::new(0, 2));
        assert!(matches!(far, Err(SwapError::NotAdjacent { .. })));
    }

    #[test]
    fn test_out_of_bounds_rejected_first() {
        let board = fixture();
        let result = try_swap(&board, Cell::new(2, 2), Cell::new(2, 3));
        assert_eq!(
            result,
            Err(SwapError::OutOfBounds { cell: Cell::new(2, 3), size: 3 })
        );

        // Out of bounds wins over non-adjacency
        let result = try_swap(&board, Cell::new(9, 9), Cell::new(0, 0));
        assert!(matches!(result, Err(SwapError::OutOfBounds { .. })));
    }

    #[test]
    fn test_find_productive_swap() {
        let board = Board::parse(
            "
            GBCM
            BCMG
            RRYR
            CMGB
            ",
        )
        .unwrap();
        assert_eq!(
            find_productive_swap(&board),
            Some((Cell::new(2, 2), Cell::new(2, 3)))
        );

        // No color appears three times, so nothing can line up
        let stuck = Board::parse(
            "
            RGB
            CMY
            GBR
            ",
        )
        .unwrap();
        assert_eq!(find_productive_swap(&stuck), None);
    }

    proptest! {
        #[test]
        fn prop_adjacent_swap_exchanges_exactly_two(
            seed in any::<u64>(),
            index in 0usize..81,
            dir in 0usize..4,
        ) {
            let board = generate(9, &Palette::standard(), &mut DeterministicRng::new(seed)).unwrap();
            let a = Cell::from_index(index, 9);
            let b = match dir {
                0 if a.row > 0 => Cell::new(a.row - 1, a.col),
                1 if a.row < 8 => Cell::new(a.row + 1, a.col),
                2 if a.col > 0 => Cell::new(a.row, a.col - 1),
                _ if a.col < 8 => Cell::new(a.row, a.col + 1),
                _ => Cell::new(a.row, a.col - 1),
            };

            let swapped = try_swap(&board, a, b).unwrap();
            prop_assert_eq!(swapped[a], board[b]);
            prop_assert_eq!(swapped[b], board[a]);
            for (cell, color) in board.iter() {
                if cell != a && cell != b {
                    prop_assert_eq!(swapped[cell], color);
                }
            }
        }

        #[test]
        fn prop_non_adjacent_swap_rejected(
            seed in any::<u64>(),
            i in 0usize..81,
            j in 0usize..81,
        ) {
            let board = generate(9, &Palette::standard(), &mut DeterministicRng::new(seed)).unwrap();
            let before = board.clone();
            let a = Cell::from_index(i, 9);
            let b = Cell::from_index(j, 9);
            prop_assume!(!is_adjacent(a, b));

            let result = try_swap(&board, a, b);
            prop_assert_eq!(result, Err(SwapError::NotAdjacent { a, b }));
            prop_assert_eq!(board, before);
        }
    }
}
