//! Scoring
//!
//! The resolver reports how many tiles a swap cleared; whoever keeps score
//! listens for that count. [`Scoreboard`] is the standard listener and the
//! one a session keeps. Other scorers hear the same counts through
//! [`notify_clears`] over the session's event log.

use serde::{Serialize, Deserialize};
use tracing::debug;

use crate::game::events::{GameEvent, GameEventData};
use crate::POINTS_PER_TILE;

/// Receives the cleared-tile count after every productive swap.
///
/// Called once per cascade with the cumulative count over all passes, and
/// never with zero.
pub trait ScoreListener {
    /// Tiles cleared by one swap.
    fn on_tiles_cleared(&mut self, count: u32);
}

/// Running score for one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    points_per_tile: u32,
    score: u32,
    tiles: u32,
}

impl Scoreboard {
    /// Empty scoreboard paying `points_per_tile` per cleared tile.
    pub fn new(points_per_tile: u32) -> Self {
        Self {
            points_per_tile,
            score: 0,
            tiles: 0,
        }
    }

    /// Points a clear of `count` tiles is worth.
    #[inline]
    pub fn points_for(&self, count: u32) -> u32 {
        count.saturating_mul(self.points_per_tile)
    }

    /// Current score.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Tiles cleared this game.
    pub fn tiles(&self) -> u32 {
        self.tiles
    }

    /// Back to zero for a new game.
    pub fn reset(&mut self) {
        self.score = 0;
        self.tiles = 0;
    }
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self::new(POINTS_PER_TILE)
    }
}

impl ScoreListener for Scoreboard {
    fn on_tiles_cleared(&mut self, count: u32) {
        let points = self.points_for(count);
        self.score = self.score.saturating_add(points);
        self.tiles = self.tiles.saturating_add(count);
        debug!(count, points, score = self.score, "score updated");
    }
}

/// Pass the count of every `TilesCleared` event to `listener`, in order.
/// Returns how many counts were delivered.
pub fn notify_clears<'a, I>(events: I, listener: &mut dyn ScoreListener) -> usize
where
    I: IntoIterator<Item = &'a GameEvent>,
{
    let mut delivered = 0;
    for event in events {
        if let GameEventData::TilesCleared { count, .. } = event.data {
            listener.on_tiles_cleared(count);
            delivered += 1;
        }
    }
    delivered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_of_three() {
        let mut board = Scoreboard::default();
        board.on_tiles_cleared(3);
        assert_eq!(board.score(), 60);
        assert_eq!(board.tiles(), 3);
    }

    #[test]
    fn test_cascade_of_three_then_four() {
        let mut board = Scoreboard::default();
        // One invocation with the cumulative count
        board.on_tiles_cleared(3 + 4);
        assert_eq!(board.score(), 140);
    }

    #[test]
    fn test_accumulates_and_resets() {
        let mut board = Scoreboard::new(10);
        board.on_tiles_cleared(3);
        board.on_tiles_cleared(5);
        assert_eq!(board.score(), 80);

        board.reset();
        assert_eq!(board.score(), 0);
        assert_eq!(board.tiles(), 0);
    }

    #[test]
    fn test_listener_object() {
        struct Tally(Vec<u32>);
        impl ScoreListener for Tally {
            fn on_tiles_cleared(&mut self, count: u32) {
                self.0.push(count);
            }
        }

        fn report(listener: &mut dyn ScoreListener, counts: &[u32]) {
            for count in counts {
                listener.on_tiles_cleared(*count);
            }
        }

        let mut tally = Tally(Vec::new());
        report(&mut tally, &[3, 7]);
        assert_eq!(tally.0, vec![3, 7]);

        let mut board = Scoreboard::default();
        report(&mut board, &[3, 7]);
        assert_eq!(board.score(), 200);
    }

    #[test]
    fn test_score_saturates() {
        let mut board = Scoreboard::new(u32::MAX);
        board.on_tiles_cleared(3);
        board.on_tiles_cleared(3);
        assert_eq!(board.score(), u32::MAX);
    }
}
