//! Core deterministic primitives.
//!
//! Colors, coordinates, randomness and hashing. Everything above this layer
//! is built from these types.

pub mod color;
pub mod coord;
pub mod rng;
pub mod hash;

// Re-export core types
pub use color::{Color, Palette, PaletteError};
pub use coord::Cell;
pub use rng::{ColorSource, DeterministicRng, ScriptedColors, derive_game_seed};
pub use hash::{StateHash, StateHasher};
