//! Jewel Colors and Palettes
//!
//! A board cell always holds exactly one [`Color`]. Colors are drawn from a
//! [`Palette`], which is validated on construction so that generation can
//! always avoid creating a 3-in-a-row.

use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::{MIN_PALETTE_SIZE, PALETTE_SIZE};

/// Jewel color.
///
/// The discriminants are stable and are what gets hashed and recorded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Color {
    /// rgb(0,0,225)
    Blue = 0,
    /// rgb(0,255,0)
    Green = 1,
    /// rgb(255,0,0)
    Red = 2,
    /// rgb(0,255,225)
    Cyan = 3,
    /// rgb(255,0,225)
    Magenta = 4,
    /// rgb(255,255,0)
    Yellow = 5,
}

impl Color {
    /// Every color, in discriminant order.
    pub const ALL: [Color; PALETTE_SIZE] = [
        Color::Blue,
        Color::Green,
        Color::Red,
        Color::Cyan,
        Color::Magenta,
        Color::Yellow,
    ];

    /// Single-letter symbol used by text fixtures and `Display`.
    pub fn symbol(self) -> char {
        match self {
            Color::Blue => 'B',
            Color::Green => 'G',
            Color::Red => 'R',
            Color::Cyan => 'C',
            Color::Magenta => 'M',
            Color::Yellow => 'Y',
        }
    }

    /// Parse a symbol (case-insensitive).
    pub fn from_symbol(c: char) -> Option<Color> {
        match c.to_ascii_uppercase() {
            'B' => Some(Color::Blue),
            'G' => Some(Color::Green),
            'R' => Some(Color::Red),
            'C' => Some(Color::Cyan),
            'M' => Some(Color::Magenta),
            'Y' => Some(Color::Yellow),
            _ => None,
        }
    }

    /// RGB triple for renderers.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Color::Blue => (0, 0, 225),
            Color::Green => (0, 255, 0),
            Color::Red => (255, 0, 0),
            Color::Cyan => (0, 255, 225),
            Color::Magenta => (255, 0, 225),
            Color::Yellow => (255, 255, 0),
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Palette construction errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    /// Fewer colors than needed to avoid runs of three.
    #[error("palette needs at least {min} colors, got {got}")]
    TooFewColors {
        /// Minimum accepted size.
        min: usize,
        /// Size supplied.
        got: usize,
    },

    /// The same color was listed twice.
    #[error("color {0:?} appears more than once in the palette")]
    DuplicateColor(Color),
}

/// Ordered, duplicate-free set of colors tiles are drawn from.
///
/// Decoding goes through [`Palette::new`], so a deserialized palette holds
/// the same guarantees as a constructed one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PaletteRepr")]
pub struct Palette {
    colors: Vec<Color>,
}

/// Wire shape of a palette before validation.
#[derive(Deserialize)]
struct PaletteRepr {
    colors: Vec<Color>,
}

impl TryFrom<PaletteRepr> for Palette {
    type Error = PaletteError;

    fn try_from(repr: PaletteRepr) -> Result<Self, Self::Error> {
        Palette::new(repr.colors)
    }
}

impl Palette {
    /// Build a palette, rejecting anything with fewer than
    /// [`MIN_PALETTE_SIZE`] distinct colors.
    pub fn new(colors: Vec<Color>) -> Result<Self, PaletteError> {
        if colors.len() < MIN_PALETTE_SIZE {
            return Err(PaletteError::TooFewColors {
                min: MIN_PALETTE_SIZE,
                got: colors.len(),
            });
        }
        for (i, color) in colors.iter().enumerate() {
            if colors[..i].contains(color) {
                return Err(PaletteError::DuplicateColor(*color));
            }
        }
        Ok(Self { colors })
    }

    /// Palette that skips validation, for exercising the checks downstream.
    #[cfg(test)]
    pub(crate) fn unchecked(colors: Vec<Color>) -> Self {
        Self { colors }
    }

    /// The six-color palette of the classic game.
    pub fn standard() -> Self {
        Self {
            colors: Color::ALL.to_vec(),
        }
    }

    /// Number of colors (never zero).
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false; kept for clippy's `len_without_is_empty`.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color at a palette position.
    pub fn get(&self, index: usize) -> Option<Color> {
        self.colors.get(index).copied()
    }

    /// Does the palette contain this color?
    pub fn contains(&self, color: Color) -> bool {
        self.colors.contains(&color)
    }

    /// Colors in palette order.
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::standard()
    }
}
