//! # Jewel Cascade
//!
//! Deterministic match-3 engine: swap two adjacent jewels, clear runs of
//! three or more, let the column above fall and refill, and repeat until
//! the board settles.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    JEWEL CASCADE                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                 │
//! │  ├── color.rs    - Jewel colors and palettes                │
//! │  ├── coord.rs    - Cell coordinates, flat index mapping     │
//! │  ├── rng.rs      - Xorshift128+ PRNG, color sources         │
//! │  └── hash.rs     - State hashing for verification           │
//! │                                                             │
//! │  game/           - Game logic (deterministic)               │
//! │  ├── board.rs    - N×N color grid                           │
//! │  ├── generator.rs- Boards with no initial runs              │
//! │  ├── matcher.rs  - Run detection                            │
//! │  ├── swap.rs     - Swap validation                          │
//! │  ├── cascade.rs  - Clear / fall / refill loop               │
//! │  ├── session.rs  - Clicks, scoring, countdown, lifecycle    │
//! │  └── snapshot.rs - Renderer view                            │
//! │                                                             │
//! │  replay/         - Transcripts and verification             │
//! │  ├── transcript.rs - Recorded games                         │
//! │  └── verify.rs   - Verification by replay                   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! The `core/` and `game/` modules are **100% deterministic**:
//! - No floating-point arithmetic
//! - No system time dependencies
//! - All randomness from a seeded [`ColorSource`]
//!
//! Given the same board and the same color sequence, cascade resolution
//! produces **identical boards** on any platform.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;
pub mod replay;

// Re-export commonly used types
pub use crate::core::color::{Color, Palette};
pub use crate::core::coord::Cell;
pub use crate::core::rng::{ColorSource, DeterministicRng};
pub use crate::game::board::Board;
pub use crate::game::cascade::{resolve, CascadeResult};
pub use crate::game::config::GameConfig;
pub use crate::game::session::{GameSession, SelectOutcome, SessionError};
pub use crate::replay::verify::verify_transcript;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default board side length
pub const BOARD_SIZE: usize = 9;

/// Smallest board that can hold a run
pub const MIN_BOARD_SIZE: usize = 3;

/// Colors in the standard palette
pub const PALETTE_SIZE: usize = 6;

/// Fewest colors a palette may have
pub const MIN_PALETTE_SIZE: usize = 3;

/// Shortest clearable run
pub const MIN_RUN: usize = 3;

/// Points per cleared tile
pub const POINTS_PER_TILE: u32 = 20;

/// Round length in seconds
pub const ROUND_SECS: u32 = 60;
