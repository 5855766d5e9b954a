//! Game Logic Module
//!
//! Board rules and the session that drives them. 100% deterministic given
//! the color source.
//!
//! ## Module Structure
//!
//! - `board`: N×N grid of colors
//! - `generator`: Boards with no initial run of three
//! - `matcher`: Run counting and board scans
//! - `swap`: Adjacency checks and swapped copies
//! - `cascade`: Clear, fall and refill until stable
//! - `events`: Game events for presentation and replay
//! - `clock`: Round countdown
//! - `score`: Score listener and scoreboard
//! - `config`: Game rules
//! - `session`: Click handling and game lifecycle
//! - `snapshot`: Serializable renderer view

pub mod board;
pub mod generator;
pub mod matcher;
pub mod swap;
pub mod cascade;
pub mod events;
pub mod clock;
pub mod score;
pub mod config;
pub mod session;
pub mod snapshot;

// Re-export key types
pub use board::{Board, BoardError};
pub use generator::{generate, GenerateError};
pub use matcher::{count_run, find_match, is_stable, Axis, Run, RunPair};
pub use swap::{find_productive_swap, is_adjacent, try_swap, SwapError};
pub use cascade::{resolve, resolve_until, CascadeResult, MatchEvent};
pub use events::{GameEvent, GameEventData, EventPriority};
pub use clock::Countdown;
pub use score::{notify_clears, ScoreListener, Scoreboard};
pub use config::{GameConfig, ConfigError};
pub use session::{GameSession, SessionError, SessionId, SelectOutcome, Phase};
pub use snapshot::BoardSnapshot;
