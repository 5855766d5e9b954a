//! Game Session
//!
//! Owns one player's board and drives it from clicks. The first click on a
//! cell selects it; a second click on an adjacent cell swaps the two and
//! resolves the resulting cascade.
//!
//! ```text
//!   new() ──▶ Ready ──start()──▶ Playing ──countdown / end()──▶ Ended
//!                                   ▲                            │
//!                                   └─────────start()────────────┘
//!                                       (next game, fresh board)
//! ```
//!
//! Every game of a session draws its colors from a seed derived from the
//! session id and the game number, so any game can be rebuilt and replayed
//! on its own.

use serde::{Serialize, Deserialize};
use thiserror::Error;
use tracing::{debug, info, trace};

use crate::core::coord::Cell;
use crate::core::hash::{short_hex, StateHash, StateHasher};
use crate::core::rng::{derive_game_seed, ColorSource, DeterministicRng};
use crate::game::board::Board;
use crate::game::cascade::{resolve, CascadeResult};
use crate::game::clock::Countdown;
use crate::game::config::{ConfigError, GameConfig};
use crate::game::events::GameEvent;
use crate::game::generator::{generate, GenerateError};
use crate::game::score::{ScoreListener, Scoreboard};
use crate::game::snapshot::BoardSnapshot;
use crate::game::swap::{try_swap, SwapError};
use crate::replay::transcript::{GameResult, SessionTranscript};

/// Unique session identifier (UUID bytes).
pub type SessionId = [u8; 16];

/// Where a session is in its game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Phase {
    /// Board dealt, waiting for start
    Ready = 0,
    /// Accepting selections
    Playing = 1,
    /// Countdown ran out or the game was ended
    Ended = 2,
}

/// What a selection did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Cell is now the pending selection
    Selected(Cell),

    /// Same cell clicked twice; nothing is selected
    Deselected(Cell),

    /// Not adjacent to the pending cell, which was replaced
    Reselected {
        /// Dropped selection
        previous: Cell,
        /// New pending selection
        cell: Cell,
    },

    /// Adjacent cells were swapped and the board resolved
    Swapped {
        /// First selected cell
        a: Cell,
        /// Second selected cell
        b: Cell,
        /// Tiles cleared over all passes
        cleared: u32,
        /// Points awarded
        points: u32,
        /// Cascade passes
        passes: u32,
    },
}

/// Session errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Selections are only accepted while playing.
    #[error("game is not in progress")]
    NotPlaying,

    /// `start` called during a game.
    #[error("game already in progress")]
    AlreadyPlaying,

    /// Cell outside the board.
    #[error("cell {cell} is outside a {size}x{size} board")]
    OutOfBounds {
        /// Offending cell.
        cell: Cell,
        /// Board size.
        size: usize,
    },

    /// Renderer index outside the board.
    #[error("index {index} is outside a {size}x{size} board")]
    IndexOutOfBounds {
        /// Offending index.
        index: usize,
        /// Board size.
        size: usize,
    },

    /// Board could not be generated.
    #[error(transparent)]
    Generate(#[from] GenerateError),

    /// Rules are invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// One player's game state.
///
/// Score is kept by a built-in [`Scoreboard`]. An outside [`ScoreListener`]
/// follows along by passing [`GameSession::take_events`] to
/// [`notify_clears`](crate::game::score::notify_clears).
#[derive(Clone, Debug)]
pub struct GameSession<S: ColorSource = DeterministicRng> {
    id: SessionId,
    config: GameConfig,
    source: S,
    board: Board,
    selected: Option<Cell>,
    scoreboard: Scoreboard,
    countdown: Countdown,
    phase: Phase,
    game_number: u32,
    seed: u64,
    /// Swaps made this game
    turn: u32,
    events: Vec<GameEvent>,
    transcript: Option<SessionTranscript>,
}

impl GameSession {
    /// Session dealt for its first game.
    pub fn new(id: SessionId, config: GameConfig) -> Result<Self, SessionError> {
        Self::for_game(id, config, 1)
    }

    /// Session dealt for a specific game number, as a replay needs.
    pub fn for_game(
        id: SessionId,
        config: GameConfig,
        game_number: u32,
    ) -> Result<Self, SessionError> {
        Self::with_source(id, config, DeterministicRng::default(), game_number)
    }
}

impl<S: ColorSource> GameSession<S> {
    /// Session drawing colors from `source`, reseeded for `game_number`.
    pub fn with_source(
        id: SessionId,
        config: GameConfig,
        mut source: S,
        game_number: u32,
    ) -> Result<Self, SessionError> {
        config.validate()?;

        let seed = derive_game_seed(&id, game_number);
        source.reseed(seed);
        let board = generate(config.board_size, &config.palette, &mut source)?;

        debug!(
            game = game_number,
            seed,
            board = %short_hex(&board.compute_hash()),
            "session dealt"
        );

        Ok(Self::assemble(id, config, source, board, game_number, seed))
    }

    /// Session over a prepared board. The source is used as is.
    ///
    /// `config.board_size` is replaced by the board's size.
    pub fn with_board(
        id: SessionId,
        mut config: GameConfig,
        board: Board,
        source: S,
    ) -> Result<Self, SessionError> {
        config.board_size = board.size();
        config.validate()?;
        let seed = derive_game_seed(&id, 1);
        Ok(Self::assemble(id, config, source, board, 1, seed))
    }

    fn assemble(
        id: SessionId,
        config: GameConfig,
        source: S,
        board: Board,
        game_number: u32,
        seed: u64,
    ) -> Self {
        Self {
            id,
            scoreboard: Scoreboard::new(config.points_per_tile),
            countdown: Countdown::new(config.round_secs),
            config,
            source,
            board,
            selected: None,
            phase: Phase::Ready,
            game_number,
            seed,
            turn: 0,
            events: Vec::new(),
            transcript: None,
        }
    }

    // =========================================================================
    // LIFECYCLE
    // =========================================================================

    /// Begin a game.
    ///
    /// From `Ready` the dealt board is played. From `Ended` the next game
    /// number is dealt a fresh board first.
    pub fn start(&mut self) -> Result<(), SessionError> {
        match self.phase {
            Phase::Playing => return Err(SessionError::AlreadyPlaying),
            Phase::Ended => self.deal(self.game_number + 1)?,
            Phase::Ready => {}
        }

        self.scoreboard.reset();
        self.countdown.reset();
        self.selected = None;
        self.turn = 0;
        self.phase = Phase::Playing;
        self.events
            .push(GameEvent::game_started(self.game_number, self.seed));

        if self.config.record_transcript {
            self.transcript = Some(SessionTranscript::begin(
                self.id,
                self.game_number,
                self.seed,
                &self.config,
                self.board.compute_hash(),
            ));
        }

        info!(game = self.game_number, secs = self.config.round_secs, "game started");
        Ok(())
    }

    fn deal(&mut self, game_number: u32) -> Result<(), SessionError> {
        let seed = derive_game_seed(&self.id, game_number);
        self.source.reseed(seed);
        self.board = generate(self.config.board_size, &self.config.palette, &mut self.source)?;
        self.game_number = game_number;
        self.seed = seed;
        debug!(game = game_number, seed, "next game dealt");
        Ok(())
    }

    /// Advance the round clock by one second. Returns true when this tick
    /// ended the game.
    pub fn tick_second(&mut self) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        if self.countdown.tick() {
            self.finish();
            return true;
        }
        false
    }

    /// End the game now. Does nothing unless playing.
    pub fn end(&mut self) {
        if self.phase == Phase::Playing {
            self.finish();
        }
    }

    fn finish(&mut self) {
        self.phase = Phase::Ended;
        self.selected = None;
        let score = self.scoreboard.score();
        self.events
            .push(GameEvent::game_over(self.turn, self.game_number, score));

        if let Some(transcript) = self.transcript.as_mut() {
            transcript.finalize(GameResult {
                final_board_hash: self.board.compute_hash(),
                final_score: score,
                swaps: self.turn,
                seconds_elapsed: self.countdown.elapsed(),
            });
        }

        info!(
            game = self.game_number,
            score,
            swaps = self.turn,
            "game over"
        );
    }

    // =========================================================================
    // SELECTION
    // =========================================================================

    /// Handle a click on `cell`.
    pub fn select(&mut self, cell: Cell) -> Result<SelectOutcome, SessionError> {
        self.ensure_playing()?;
        if !self.board.contains(cell) {
            return Err(SessionError::OutOfBounds {
                cell,
                size: self.board.size(),
            });
        }

        if let Some(transcript) = self.transcript.as_mut() {
            transcript.record_selection(cell);
        }

        let outcome = match self.selected.take() {
            None => {
                self.selected = Some(cell);
                self.events.push(GameEvent::cell_selected(self.turn, cell));
                SelectOutcome::Selected(cell)
            }
            Some(previous) if previous == cell => {
                self.events
                    .push(GameEvent::selection_cleared(self.turn, cell));
                SelectOutcome::Deselected(cell)
            }
            Some(previous) => match try_swap(&self.board, previous, cell) {
                Ok(swapped) => self.apply_swap(previous, cell, swapped),
                Err(SwapError::NotAdjacent { .. }) => {
                    self.selected = Some(cell);
                    self.events
                        .push(GameEvent::swap_rejected(self.turn, previous, cell));
                    self.events.push(GameEvent::cell_selected(self.turn, cell));
                    SelectOutcome::Reselected { previous, cell }
                }
                Err(SwapError::OutOfBounds { cell, size }) => {
                    self.selected = Some(previous);
                    return Err(SessionError::OutOfBounds { cell, size });
                }
            },
        };

        trace!(?outcome, "selection handled");
        Ok(outcome)
    }

    /// Handle a click addressed by flat renderer index (`row * size + col`).
    pub fn select_index(&mut self, index: usize) -> Result<SelectOutcome, SessionError> {
        self.ensure_playing()?;
        let cell = self
            .board
            .cell_at_index(index)
            .map_err(|_| SessionError::IndexOutOfBounds {
                index,
                size: self.board.size(),
            })?;
        self.select(cell)
    }

    fn ensure_playing(&self) -> Result<(), SessionError> {
        if self.phase == Phase::Playing {
            Ok(())
        } else {
            Err(SessionError::NotPlaying)
        }
    }

    fn apply_swap(&mut self, a: Cell, b: Cell, swapped: Board) -> SelectOutcome {
        self.turn += 1;
        let turn = self.turn;
        self.events.push(GameEvent::swapped(turn, a, b));

        let CascadeResult {
            board,
            total_cleared,
            matches,
            ..
        } = resolve(swapped, &self.config.palette, &mut self.source);

        let passes = matches.len() as u32;
        self.events
            .extend(matches.into_iter().map(|m| GameEvent::match_cleared(turn, m)));
        self.board = board;

        let mut points = 0;
        if total_cleared > 0 {
            points = self.scoreboard.points_for(total_cleared);
            self.scoreboard.on_tiles_cleared(total_cleared);
            self.events.push(GameEvent::tiles_cleared(
                turn,
                total_cleared,
                points,
                self.scoreboard.score(),
            ));
        }

        debug!(
            turn,
            %a,
            %b,
            cleared = total_cleared,
            passes,
            score = self.scoreboard.score(),
            "swap resolved"
        );

        SelectOutcome::Swapped {
            a,
            b,
            cleared: total_cleared,
            points,
            passes,
        }
    }

    // =========================================================================
    // VIEWS
    // =========================================================================

    /// Renderer view of the session.
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            size: self.board.size(),
            cells: self.board.cells().to_vec(),
            selected: self.selected,
            score: self.scoreboard.score(),
            phase: self.phase,
            remaining_secs: self.countdown.remaining(),
            game_number: self.game_number,
        }
    }

    /// Digest of board, score, pending selection, phase and game number.
    pub fn compute_hash(&self) -> StateHash {
        let mut hasher = StateHasher::for_session();
        self.board.hash_into(&mut hasher);
        hasher.update_u32(self.scoreboard.score());
        hasher.update_opt_cell(self.selected);
        hasher.update_u8(self.phase as u8);
        hasher.update_u32(self.game_number);
        hasher.finalize()
    }

    /// Drain events emitted since the last call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Events not yet drained.
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Transcript of the current or last game, when recording.
    pub fn transcript(&self) -> Option<&SessionTranscript> {
        self.transcript.as_ref()
    }

    /// Take ownership of the transcript.
    pub fn take_transcript(&mut self) -> Option<SessionTranscript> {
        self.transcript.take()
    }

    /// Session id.
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Rules in force.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Pending selection.
    pub fn selected(&self) -> Option<Cell> {
        self.selected
    }

    /// Current score.
    pub fn score(&self) -> u32 {
        self.scoreboard.score()
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Is a game in progress?
    pub fn is_playing(&self) -> bool {
        self.phase == Phase::Playing
    }

    /// 1-based game counter.
    pub fn game_number(&self) -> u32 {
        self.game_number
    }

    /// Seed of the current game.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Swaps made this game.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Seconds left in the round.
    pub fn remaining_secs(&self) -> u32 {
        self.countdown.remaining()
    }
}

// =============================================================================
// TESTS
// =============================================================================
