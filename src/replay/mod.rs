//! Replay and Verification
//!
//! Records finished games and checks them by replay.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    REPLAY                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  transcript.rs   - Per-game transcript (bincode encoded)    │
//! │  verify.rs       - Verification by deterministic replay     │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod transcript;
pub mod verify;

// Re-export key types
pub use transcript::{SessionTranscript, GameResult, TranscriptError, TRANSCRIPT_VERSION};
pub use verify::{verify_transcript, VerificationResult, VerificationError};
