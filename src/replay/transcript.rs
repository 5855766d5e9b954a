//! Game Transcript Recording
//!
//! Records everything needed to replay one game and check its outcome:
//! the session id and game number (which fix the color seed), the rules,
//! and every selection the session accepted, in order.

use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::core::coord::Cell;
use crate::core::hash::StateHash;
use crate::game::config::GameConfig;

/// Current transcript version.
pub const TRANSCRIPT_VERSION: u8 = 1;

/// Complete record of one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTranscript {
    /// Version for forward compatibility.
    pub version: u8,

    /// Session identifier (UUID bytes).
    pub session_id: [u8; 16],

    /// Game within the session.
    pub game_number: u32,

    /// Seed derived from session id and game number.
    pub seed: u64,

    /// Rules the game was played under.
    pub config: GameConfig,

    /// Fingerprint of `config` at record time.
    pub config_hash: StateHash,

    /// Wall-clock time the game started. Not part of verification.
    pub recorded_at: DateTime<Utc>,

    /// Hash of the board as dealt.
    pub initial_board_hash: StateHash,

    /// Accepted selections, in order.
    pub selections: Vec<Cell>,

    /// Outcome, once the game has ended.
    pub result: Option<GameResult>,
}

/// Final outcome of a recorded game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    /// Hash of the final board.
    pub final_board_hash: StateHash,

    /// Final score.
    pub final_score: u32,

    /// Swaps made.
    pub swaps: u32,

    /// Seconds of the round used.
    pub seconds_elapsed: u32,
}

impl SessionTranscript {
    /// Start recording a game.
    pub fn begin(
        session_id: [u8; 16],
        game_number: u32,
        seed: u64,
        config: &GameConfig,
        initial_board_hash: StateHash,
    ) -> Self {
        Self {
            version: TRANSCRIPT_VERSION,
            session_id,
            game_number,
            seed,
            config: config.clone(),
            config_hash: config.compute_hash(),
            recorded_at: Utc::now(),
            initial_board_hash,
            selections: Vec::new(),
            result: None,
        }
    }

    /// Record an accepted selection.
    pub fn record_selection(&mut self, cell: Cell) {
        self.selections.push(cell);
    }

    /// Finalize with the game's outcome.
    pub fn finalize(&mut self, result: GameResult) {
        self.result = Some(result);
    }

    /// Check if transcript is complete.
    pub fn is_complete(&self) -> bool {
        self.result.is_some()
    }

    /// Serialize to bytes using bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, TranscriptError> {
        bincode::serialize(self).map_err(|e| TranscriptError::SerializationFailed(e.to_string()))
    }

    /// Deserialize from bytes, rejecting other versions.
    pub fn from_bytes(data: &[u8]) -> Result<Self, TranscriptError> {
        let transcript: Self = bincode::deserialize(data)
            .map_err(|e| TranscriptError::DeserializationFailed(e.to_string()))?;

        if transcript.version != TRANSCRIPT_VERSION {
            return Err(TranscriptError::VersionMismatch {
                expected: TRANSCRIPT_VERSION,
                got: transcript.version,
            });
        }
        Ok(transcript)
    }
}

/// Errors that can occur with transcripts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranscriptError {
    /// Serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization failed.
    #[error("deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Version mismatch.
    #[error("version mismatch: expected {expected}, got {got}")]
    VersionMismatch {
        /// Supported version.
        expected: u8,
        /// Version found.
        got: u8,
    },

    /// Game has not ended.
    #[error("transcript is incomplete")]
    Incomplete,
}
