//! Jewel Cascade Demo
//!
//! Plays one recorded game against the engine's own move finder, then
//! verifies it by replay. Set `JEWEL_SEED` for a repeatable session.

use anyhow::{bail, Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use jewel_cascade::{
    VERSION, BOARD_SIZE, ROUND_SECS,
    core::hash::short_hex,
    game::{
        config::GameConfig,
        events::GameEventData,
        session::{GameSession, SelectOutcome, SessionId},
        swap::find_productive_swap,
    },
    replay::{transcript::SessionTranscript, verify::verify_transcript},
};

/// Swaps the demo attempts before running out the clock.
const DEMO_SWAPS: usize = 12;

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    info!("Jewel Cascade v{}", VERSION);
    info!("Board: {0}x{0}, round: {1} seconds", BOARD_SIZE, ROUND_SECS);

    let session_id = session_id_from_env()?;
    info!("Session ID: {}", hex::encode(session_id));

    demo_game(session_id)
}

/// `JEWEL_SEED` (a u64) fixes the session id; otherwise a random v4 UUID.
fn session_id_from_env() -> Result<SessionId> {
    match std::env::var("JEWEL_SEED") {
        Ok(raw) => {
            let seed: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("JEWEL_SEED must be a u64, got {raw:?}"))?;
            let mut id = [0u8; 16];
            id[..8].copy_from_slice(&seed.to_le_bytes());
            Ok(id)
        }
        Err(_) => Ok(*uuid::Uuid::new_v4().as_bytes()),
    }
}

fn demo_game(session_id: SessionId) -> Result<()> {
    info!("=== Starting Demo Game ===");

    let config = GameConfig {
        record_transcript: true,
        ..GameConfig::default()
    };
    let mut session = GameSession::new(session_id, config)?;
    session.start()?;

    info!("Seed: {}", session.seed());
    info!("Initial board:\n{}", session.board());

    for _ in 0..DEMO_SWAPS {
        let Some((a, b)) = find_productive_swap(session.board()) else {
            warn!("No productive swap left");
            break;
        };

        session.select(a)?;
        if let SelectOutcome::Swapped { cleared, points, passes, .. } = session.select(b)? {
            info!(
                "Swap {} <-> {}: {} tiles in {} passes, +{} (score {})",
                a,
                b,
                cleared,
                passes,
                points,
                session.score()
            );
        }

        // One second per move keeps the countdown honest
        session.tick_second();

        for event in session.take_events() {
            if let GameEventData::MatchCleared { pass, axis, color, cells } = event.data {
                info!("  pass {}: {:?} {} x{}", pass, axis, color, cells.len());
            }
        }
    }

    while session.is_playing() {
        session.tick_second();
    }

    info!("=== Game Results ===");
    info!("Final board:\n{}", session.board());
    info!("Score: {}", session.score());
    info!("Session hash: {}", hex::encode(session.compute_hash()));

    let snapshot = session.snapshot().to_json()?;
    info!("Snapshot: {}", snapshot);

    // Verify determinism by replaying
    info!("=== Verifying Transcript ===");
    let transcript = session
        .take_transcript()
        .context("recording was enabled but no transcript was kept")?;

    let bytes = transcript.to_bytes()?;
    info!(
        "Transcript: {} selections, {} bytes, recorded {}",
        transcript.selections.len(),
        bytes.len(),
        transcript.recorded_at.to_rfc3339()
    );

    let decoded = SessionTranscript::from_bytes(&bytes)?;
    let result = verify_transcript(&decoded);

    info!("Replay board hash:   {}", short_hex(&result.computed_final_hash));
    info!("Recorded board hash: {}", short_hex(&result.expected_final_hash));

    if result.valid {
        info!("DETERMINISM VERIFIED: Hashes match!");
        Ok(())
    } else {
        match result.error {
            Some(error) => bail!("DETERMINISM FAILURE: {error}"),
            None => bail!("DETERMINISM FAILURE"),
        }
    }
}
