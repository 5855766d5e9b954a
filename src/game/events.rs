//! Game Events
//!
//! Events generated while a game is played. A presentation layer drains
//! them after every call into the session and animates from them; the
//! engine itself never waits on the presentation.

use serde::{Serialize, Deserialize};

use crate::core::color::Color;
use crate::core::coord::Cell;
use crate::game::cascade::MatchEvent;
use crate::game::matcher::Axis;

/// Priority for event processing order within one turn.
///
/// Lower value = processed first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum EventPriority {
    /// Game start and end
    Lifecycle = 0,
    /// Selection changes
    Selection = 1,
    /// The swap itself
    Swap = 2,
    /// Each cleared run, in pass order
    Clear = 3,
    /// Score update after the cascade
    Score = 4,
}

/// Game event data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEventData {
    /// A game began
    GameStarted {
        /// 1-based game counter within the session
        game_number: u32,
        /// Seed the color source was started from
        seed: u64,
    },

    /// A cell became the pending selection
    CellSelected {
        /// Selected cell
        cell: Cell,
    },

    /// The pending selection was dropped
    SelectionCleared {
        /// Cell that was selected
        cell: Cell,
    },

    /// Second click was not adjacent to the first
    SwapRejected {
        /// Pending selection
        from: Cell,
        /// Clicked cell
        to: Cell,
    },

    /// Two adjacent cells were exchanged
    Swapped {
        /// First selected cell
        a: Cell,
        /// Second selected cell
        b: Cell,
    },

    /// One cascade pass cleared a run
    MatchCleared {
        /// Pass number, starting at 1
        pass: u32,
        /// Run axis
        axis: Axis,
        /// Run color
        color: Color,
        /// Cleared cells
        cells: Vec<Cell>,
    },

    /// Score was awarded for a whole cascade
    TilesCleared {
        /// Tiles cleared over all passes
        count: u32,
        /// Points awarded
        points: u32,
        /// Score after the award
        new_score: u32,
    },

    /// The game ended
    GameOver {
        /// Game that ended
        game_number: u32,
        /// Final score
        final_score: u32,
    },
}

/// A game event with its turn and priority.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Number of swaps made before this event in the current game
    pub turn: u32,

    /// Processing priority
    pub priority: EventPriority,

    /// Event data
    pub data: GameEventData,
}

impl GameEvent {
    /// Create a new event.
    pub fn new(turn: u32, priority: EventPriority, data: GameEventData) -> Self {
        Self { turn, priority, data }
    }

    /// Create game started event.
    pub fn game_started(game_number: u32, seed: u64) -> Self {
        Self::new(
            0,
            EventPriority::Lifecycle,
            GameEventData::GameStarted { game_number, seed },
        )
    }

    /// Create cell selected event.
    pub fn cell_selected(turn: u32, cell: Cell) -> Self {
        Self::new(turn, EventPriority::Selection, GameEventData::CellSelected { cell })
    }

    /// Create selection cleared event.
    pub fn selection_cleared(turn: u32, cell: Cell) -> Self {
        Self::new(turn, EventPriority::Selection, GameEventData::SelectionCleared { cell })
    }

    /// Create swap rejected event.
    pub fn swap_rejected(turn: u32, from: Cell, to: Cell) -> Self {
        Self::new(turn, EventPriority::Selection, GameEventData::SwapRejected { from, to })
    }

    /// Create swapped event.
    pub fn swapped(turn: u32, a: Cell, b: Cell) -> Self {
        Self::new(turn, EventPriority::Swap, GameEventData::Swapped { a, b })
    }

    /// Create match cleared event from a cascade pass.
    pub fn match_cleared(turn: u32, event: MatchEvent) -> Self {
        Self::new(
            turn,
            EventPriority::Clear,
            GameEventData::MatchCleared {
                pass: event.pass,
                axis: event.axis,
                color: event.color,
                cells: event.cells,
            },
        )
    }

    /// Create tiles cleared event.
    pub fn tiles_cleared(turn: u32, count: u32, points: u32, new_score: u32) -> Self {
        Self::new(
            turn,
            EventPriority::Score,
            GameEventData::TilesCleared { count, points, new_score },
        )
    }

    /// Create game over event.
    pub fn game_over(turn: u32, game_number: u32, final_score: u32) -> Self {
        Self::new(
            turn,
            EventPriority::Lifecycle,
            GameEventData::GameOver { game_number, final_score },
        )
    }

    /// Is this the end-of-game event?
    pub fn is_game_over(&self) -> bool {
        matches!(self.data, GameEventData::GameOver { .. })
    }
}

/// Sort events by turn, then priority, keeping emission order for ties.
pub fn sort_events(events: &mut [GameEvent]) {
    events.sort_by_key(|event| (event.turn, event.priority));
}
