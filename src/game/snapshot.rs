//! Renderer Snapshot
//!
//! Everything a renderer needs to draw one frame, as a plain serializable
//! value. Cells are a flat row-major list, matching how a grid of tiles is
//! usually laid out on screen.

use serde::{Serialize, Deserialize};

use crate::core::color::Color;
use crate::core::coord::Cell;
use crate::game::session::Phase;

/// Serializable view of a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    /// Side length
    pub size: usize,
    /// Colors in row-major order
    pub cells: Vec<Color>,
    /// Pending selection, if any
    pub selected: Option<Cell>,
    /// Current score
    pub score: u32,
    /// Session phase
    pub phase: Phase,
    /// Seconds left in the round
    pub remaining_secs: u32,
    /// 1-based game counter
    pub game_number: u32,
}

impl BoardSnapshot {
    /// Color at a flat index.
    pub fn color_at(&self, index: usize) -> Option<Color> {
        self.cells.get(index).copied()
    }

    /// Flat index of the pending selection.
    pub fn selected_index(&self) -> Option<usize> {
        self.selected.map(|cell| cell.to_index(self.size))
    }

    /// Encode as JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Decode from JSON.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
