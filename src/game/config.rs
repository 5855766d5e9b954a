//! Game Configuration
//!
//! Rules for one session. The defaults reproduce the classic game: a 9×9
//! board, six colors, 20 points per tile and a 60-second round.

use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::core::color::{Palette, PaletteError};
use crate::core::hash::{StateHash, StateHasher};
use crate::{BOARD_SIZE, MIN_BOARD_SIZE, POINTS_PER_TILE, ROUND_SECS};

/// Game rules.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Side length of the square board
    pub board_size: usize,
    /// Colors jewels are drawn from
    pub palette: Palette,
    /// Points per cleared tile
    pub points_per_tile: u32,
    /// Round length in seconds
    pub round_secs: u32,
    /// Record a replay transcript for every game
    pub record_transcript: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: BOARD_SIZE,
            palette: Palette::standard(),
            points_per_tile: POINTS_PER_TILE,
            round_secs: ROUND_SECS,
            record_transcript: false,
        }
    }
}

impl GameConfig {
    /// Check the rules describe a playable game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size < MIN_BOARD_SIZE {
            return Err(ConfigError::BoardTooSmall {
                size: self.board_size,
                min: MIN_BOARD_SIZE,
            });
        }
        if self.round_secs == 0 {
            return Err(ConfigError::ZeroRound);
        }
        Palette::new(self.palette.colors().to_vec())?;
        Ok(())
    }

    /// Fingerprint of the rules that affect play.
    ///
    /// `record_transcript` is left out: recording never changes a game.
    pub fn compute_hash(&self) -> StateHash {
        let mut hasher = StateHasher::for_config();
        hasher.update_usize(self.board_size);
        hasher.update_usize(self.palette.len());
        for color in self.palette.colors() {
            hasher.update_color(*color);
        }
        hasher.update_u32(self.points_per_tile);
        hasher.update_u32(self.round_secs);
        hasher.finalize()
    }
}

/// Invalid game rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Board cannot hold a run.
    #[error("board size {size} is below the minimum of {min}")]
    BoardTooSmall {
        /// Requested size.
        size: usize,
        /// Smallest allowed size.
        min: usize,
    },

    /// Round has no time in it.
    #[error("round length must be at least one second")]
    ZeroRound,

    /// Palette cannot fill a board without runs.
    #[error(transparent)]
    Palette(#[from] PaletteError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::color::Color;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.board_size, 9);
        assert_eq!(config.palette.len(), 6);
        assert_eq!(config.points_per_tile, 20);
        assert_eq!(config.round_secs, 60);
        assert!(!config.record_transcript);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_tiny_board() {
        let config = GameConfig {
            board_size: 2,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::BoardTooSmall { size: 2, min: 3 })
        );
    }

    #[test]
    fn test_validate_rejects_zero_round() {
        let config = GameConfig {
            round_secs: 0,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroRound));
    }

    #[test]
    fn test_validate_rechecks_palette() {
        let config = GameConfig {
            palette: Palette::unchecked(vec![Color::Red, Color::Red, Color::Red]),
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::Palette(PaletteError::DuplicateColor(Color::Red)))
        );

        let config = GameConfig {
            palette: Palette::unchecked(Vec::new()),
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::Palette(PaletteError::TooFewColors { min: 3, got: 0 }))
        );
    }

    #[test]
    fn test_decoded_config_keeps_palette_checks() {
        let json = serde_json::to_string(&GameConfig::default()).unwrap();
        let decoded: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, GameConfig::default());

        let bad = json.replace(
            r#"["Blue","Green","Red","Cyan","Magenta","Yellow"]"#,
            r#"["Red","Red","Red"]"#,
        );
        assert_ne!(bad, json);
        assert!(serde_json::from_str::<GameConfig>(&bad).is_err());
    }

    #[test]
    fn test_hash_ignores_recording_flag() {
        let plain = GameConfig::default();
        let recorded = GameConfig {
            record_transcript: true,
            ..GameConfig::default()
        };
        assert_eq!(plain.compute_hash(), recorded.compute_hash());

        let small_palette = GameConfig {
            palette: Palette::new(vec![Color::Red, Color::Green, Color::Blue]).unwrap(),
            ..GameConfig::default()
        };
        assert_ne!(plain.compute_hash(), small_palette.compute_hash());
    }
}
