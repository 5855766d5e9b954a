//! Verification API
//!
//! Verify a recorded game by deterministic replay: rebuild the game from
//! its session id and game number, feed it the recorded selections and
//! compare the outcome.

use thiserror::Error;
use tracing::debug;

use crate::core::hash::{short_hex, StateHash};
use crate::core::rng::derive_game_seed;
use crate::game::config::GameConfig;
use crate::game::session::{GameSession, SessionError};
use crate::replay::transcript::{SessionTranscript, TRANSCRIPT_VERSION};

/// Verification result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationResult {
    /// Did verification pass?
    pub valid: bool,

    /// Final board hash (from replay).
    pub computed_final_hash: StateHash,

    /// Expected final board hash (from transcript).
    pub expected_final_hash: StateHash,

    /// Final score (from replay).
    pub computed_score: u32,

    /// Detailed error if verification failed.
    pub error: Option<VerificationError>,
}

impl VerificationResult {
    fn failed(error: VerificationError) -> Self {
        Self {
            valid: false,
            computed_final_hash: [0; 32],
            expected_final_hash: [0; 32],
            computed_score: 0,
            error: Some(error),
        }
    }
}

/// Errors that can occur during verification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    /// Transcript version mismatch.
    #[error("version mismatch: expected {expected}, got {got}")]
    VersionMismatch {
        /// Expected version.
        expected: u8,
        /// Actual version.
        got: u8,
    },

    /// Transcript has no result.
    #[error("transcript is incomplete")]
    IncompleteTranscript,

    /// Recorded rules do not match their fingerprint.
    #[error("config hash mismatch")]
    ConfigMismatch {
        /// Recorded fingerprint.
        expected: StateHash,
        /// Fingerprint of the recorded rules.
        computed: StateHash,
    },

    /// RNG seed derivation mismatch.
    #[error("seed mismatch: expected {expected}, got {got}")]
    SeedMismatch {
        /// Seed derived from session id and game number.
        expected: u64,
        /// Seed in the transcript.
        got: u64,
    },

    /// Dealt board differs.
    #[error("initial board hash mismatch")]
    InitialStateMismatch {
        /// Expected hash.
        expected: StateHash,
        /// Computed hash.
        computed: StateHash,
    },

    /// Final board differs.
    #[error("final board hash mismatch")]
    FinalStateMismatch {
        /// Expected hash.
        expected: StateHash,
        /// Computed hash.
        computed: StateHash,
    },

    /// Final score differs.
    #[error("score mismatch: expected {expected}, got {got}")]
    ScoreMismatch {
        /// Recorded score.
        expected: u32,
        /// Replayed score.
        got: u32,
    },

    /// Replay could not be run.
    #[error("replay failed: {0}")]
    Replay(#[from] SessionError),
}

/// Verify a transcript by full replay.
pub fn verify_transcript(transcript: &SessionTranscript) -> VerificationResult {
    match replay(transcript) {
        Ok(result) => result,
        Err(error) => VerificationResult::failed(error),
    }
}

fn replay(transcript: &SessionTranscript) -> Result<VerificationResult, VerificationError> {
    if transcript.version != TRANSCRIPT_VERSION {
        return Err(VerificationError::VersionMismatch {
            expected: TRANSCRIPT_VERSION,
            got: transcript.version,
        });
    }

    let result = transcript
        .result
        .as_ref()
        .ok_or(VerificationError::IncompleteTranscript)?;

    // 1. Rules and seed
    let config_hash = transcript.config.compute_hash();
    if config_hash != transcript.config_hash {
        return Err(VerificationError::ConfigMismatch {
            expected: transcript.config_hash,
            computed: config_hash,
        });
    }

    let seed = derive_game_seed(&transcript.session_id, transcript.game_number);
    if seed != transcript.seed {
        return Err(VerificationError::SeedMismatch {
            expected: seed,
            got: transcript.seed,
        });
    }

    // 2. Deal and check the starting board
    let config = GameConfig {
        record_transcript: false,
        ..transcript.config.clone()
    };
    let mut session = GameSession::for_game(transcript.session_id, config, transcript.game_number)?;

    let initial_hash = session.board().compute_hash();
    if initial_hash != transcript.initial_board_hash {
        return Err(VerificationError::InitialStateMismatch {
            expected: transcript.initial_board_hash,
            computed: initial_hash,
        });
    }

    // 3. Replay selections
    session.start()?;
    for cell in &transcript.selections {
        session.select(*cell)?;
    }
    session.end();

    // 4. Compare outcome
    let computed_final_hash = session.board().compute_hash();
    let computed_score = session.score();

    let error = if computed_final_hash != result.final_board_hash {
        Some(VerificationError::FinalStateMismatch {
            expected: result.final_board_hash,
            computed: computed_final_hash,
        })
    } else if computed_score != result.final_score {
        Some(VerificationError::ScoreMismatch {
            expected: result.final_score,
            got: computed_score,
        })
    } else {
        None
    };

    debug!(
        game = transcript.game_number,
        selections = transcript.selections.len(),
        hash = %short_hex(&computed_final_hash),
        valid = error.is_none(),
        "transcript replayed"
    );

    Ok(VerificationResult {
        valid: error.is_none(),
        computed_final_hash,
        expected_final_hash: result.final_board_hash,
        computed_score,
        error,
    })
}

// =============================================================================
// TESTS
// =============================================================================
