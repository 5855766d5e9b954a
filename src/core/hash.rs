//! State Hashing for Verification
//!
//! Provides deterministic hashing of game state for:
//! - Replay validation
//! - Determinism checks between runs
//! - Compact fingerprints in logs

use sha2::{Sha256, Digest};

use super::color::Color;
use super::coord::Cell;

/// Hash output type (256 bits / 32 bytes)
pub type StateHash = [u8; 32];

/// Deterministic hasher for game state.
///
/// Wraps SHA-256 with helpers for board types.
/// Order of updates is critical for determinism.
pub struct StateHasher {
    hasher: Sha256,
}

impl StateHasher {
    /// Create a new hasher with domain separator.
    pub fn new(domain: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(domain);
        Self { hasher }
    }

    /// Create hasher for a board.
    pub fn for_board() -> Self {
        Self::new(b"JEWEL_CASCADE_BOARD_V1")
    }

    /// Create hasher for a full session.
    pub fn for_session() -> Self {
        Self::new(b"JEWEL_CASCADE_SESSION_V1")
    }

    /// Create hasher for a game configuration.
    pub fn for_config() -> Self {
        Self::new(b"JEWEL_CASCADE_CONFIG_V1")
    }

    /// Update with raw bytes.
    #[inline]
    pub fn update_bytes(&mut self, bytes: &[u8]) {
        self.hasher.update(bytes);
    }

    /// Update with a u8 value.
    #[inline]
    pub fn update_u8(&mut self, value: u8) {
        self.hasher.update([value]);
    }

    /// Update with a u32 value (little-endian).
    #[inline]
    pub fn update_u32(&mut self, value: u32) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with a u64 value (little-endian).
    #[inline]
    pub fn update_u64(&mut self, value: u64) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with a usize value, widened to u64 so the digest is
    /// identical on 32- and 64-bit targets.
    #[inline]
    pub fn update_usize(&mut self, value: usize) {
        self.update_u64(value as u64);
    }

    /// Update with a boolean.
    #[inline]
    pub fn update_bool(&mut self, value: bool) {
        self.update_u8(value as u8);
    }

    /// Update with a color.
    #[inline]
    pub fn update_color(&mut self, color: Color) {
        self.update_u8(color as u8);
    }

    /// Update with a cell.
    #[inline]
    pub fn update_cell(&mut self, cell: Cell) {
        self.update_usize(cell.row);
        self.update_usize(cell.col);
    }

    /// Update with an optional cell (presence flag first).
    pub fn update_opt_cell(&mut self, cell: Option<Cell>) {
        match cell {
            Some(cell) => {
                self.update_bool(true);
                self.update_cell(cell);
            }
            None => self.update_bool(false),
        }
    }

    /// Update with a nested hash.
    #[inline]
    pub fn update_hash(&mut self, hash: &StateHash) {
        self.hasher.update(hash);
    }

    /// Finalize and return the hash.
    pub fn finalize(self) -> StateHash {
        self.hasher.finalize().into()
    }
}

/// Compute a simple hash of arbitrary data.
pub fn hash_bytes(data: &[u8]) -> StateHash {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Short hex prefix of a hash, for log lines.
pub fn short_hex(hash: &StateHash) -> String {
    hex::encode(&hash[..6])
}

// =============================================================================
// TESTS
// =============================================================================
