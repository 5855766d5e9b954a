//! Deterministic Random Number Generator
//!
//! Uses Xorshift128+ algorithm for fast, high-quality, deterministic randomness.
//! Given the same seed, produces identical sequence on all platforms.
//!
//! Jewel colors are drawn through the [`ColorSource`] trait so tests can
//! substitute a fixed sequence ([`ScriptedColors`]) for the RNG.

use serde::{Serialize, Deserialize};
use sha2::{Sha256, Digest};

use super::color::{Color, Palette};

/// Supplies new jewel colors.
///
/// This is the engine's only source of nondeterminism.
pub trait ColorSource {
    /// Pick one color from a (non-empty) palette.
    fn next_color(&mut self, palette: &Palette) -> Color;

    /// Restart the sequence from a seed. Sources that are not seedable
    /// ignore this.
    fn reseed(&mut self, _seed: u64) {}
}

/// Deterministic PRNG using Xorshift128+ algorithm.
///
/// # Determinism Guarantee
///
/// Given the same seed, this RNG will produce the exact same sequence
/// of random numbers on any platform.
///
/// # Example
///
/// ```
/// use jewel_cascade::core::rng::DeterministicRng;
///
/// let mut rng = DeterministicRng::new(12345);
/// let value = rng.next_u64();
/// assert_eq!(value, 6233086606872742541); // Always the same!
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeterministicRng {
    state: [u64; 2],
}

impl Default for DeterministicRng {
    fn default() -> Self {
        Self::new(0)
    }
}

impl DeterministicRng {
    /// Create a new RNG from a 64-bit seed.
    ///
    /// Uses SplitMix64 to initialize the internal state, ensuring
    /// good distribution even from weak seeds.
    pub fn new(seed: u64) -> Self {
        let mut s = seed;
        let state0 = splitmix64(&mut s);
        let state1 = splitmix64(&mut s);

        // Ensure state is never all zeros
        let state = if state0 == 0 && state1 == 0 {
            [1, 1]
        } else {
            [state0, state1]
        };

        Self { state }
    }

    /// Generate the next 64-bit random value.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        let s0 = self.state[0];
        let mut s1 = self.state[1];
        let result = s0.wrapping_add(s1);

        s1 ^= s0;
        self.state[0] = s0.rotate_left(24) ^ s1 ^ (s1 << 16);
        self.state[1] = s1.rotate_left(37);

        result
    }

    /// Generate a random integer in range [0, max).
    #[inline]
    pub fn next_int(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        // Simple modulo - slight bias for very large max, but acceptable
        (self.next_u64() % max as u64) as u32
    }
}

impl ColorSource for DeterministicRng {
    #[inline]
    fn next_color(&mut self, palette: &Palette) -> Color {
        let idx = self.next_int(palette.len() as u32) as usize;
        palette.colors()[idx]
    }

    fn reseed(&mut self, seed: u64) {
        *self = Self::new(seed);
    }
}

/// Replays a fixed sequence of colors, wrapping around at the end.
///
/// Colors are returned as scripted even if the palette does not contain
/// them, which lets fixtures force any refill they need.
#[derive(Clone, Debug)]
pub struct ScriptedColors {
    colors: Vec<Color>,
    cursor: usize,
}

impl ScriptedColors {
    /// Create a script. An empty script falls back to the palette's first color.
    pub fn new(colors: Vec<Color>) -> Self {
        Self { colors, cursor: 0 }
    }

    /// Build a script from symbols, e.g. `"RRGB"`. Unknown symbols are skipped.
    pub fn from_symbols(symbols: &str) -> Self {
        Self::new(symbols.chars().filter_map(Color::from_symbol).collect())
    }

    /// How many colors have been handed out so far.
    pub fn drawn(&self) -> usize {
        self.cursor
    }
}

impl ColorSource for ScriptedColors {
    fn next_color(&mut self, palette: &Palette) -> Color {
        if self.colors.is_empty() {
            return palette.colors()[0];
        }
        let color = self.colors[self.cursor % self.colors.len()];
        self.cursor += 1;
        color
    }
}

/// SplitMix64 for seed initialization.
/// Produces well-distributed values from sequential seeds.
#[inline]
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

/// Derive the RNG seed for one game of a session.
///
/// Every game in a session gets its own seed, and the same
/// `(session_id, game_number)` always yields the same seed, so a recorded
/// game can be replayed from its transcript alone.
pub fn derive_game_seed(session_id: &[u8; 16], game_number: u32) -> u64 {
    let mut hasher = Sha256::new();

    // Domain separator
    hasher.update(b"JEWEL_CASCADE_SEED_V1");
    hasher.update(session_id);
    hasher.update(game_number.to_le_bytes());

    let hash = hasher.finalize();

    let mut seed = [0u8; 8];
    seed.copy_from_slice(&hash[0..8]);
    u64::from_le_bytes(seed)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_determinism() {
        // Same seed must produce same sequence
        let mut rng1 = DeterministicRng::new(12345);
        let mut rng2 = DeterministicRng::new(12345);

        for _ in 0..1000 {
            assert_eq!(rng1.next_u64(), rng2.next_u64());
        }
    }

    #[test]
    fn test_rng_known_values() {
        // These values must never change!
        // If they do, recorded transcripts stop verifying.
        let mut rng = DeterministicRng::new(42);
        assert_eq!(rng.next_u64(), 16629283624882167704);
        assert_eq!(rng.next_u64(), 1420492921613871959);
        assert_eq!(rng.next_u64(), 9768315062676884790);
    }

    #[test]
    fn test_next_int() {
        let mut rng = DeterministicRng::new(1234);

        for _ in 0..1000 {
            assert!(rng.next_int(6) < 6);
        }

        // Edge cases
        assert_eq!(rng.next_int(0), 0);
        assert_eq!(rng.next_int(1), 0);
    }

    #[test]
    fn test_next_color_in_palette() {
        let palette = Palette::new(vec![Color::Red, Color::Green, Color::Blue]).unwrap();
        let mut rng = DeterministicRng::new(7);

        let mut seen = [false; 6];
        for _ in 0..300 {
            let color = rng.next_color(&palette);
            assert!(palette.contains(color));
            seen[color as usize] = true;
        }

        // All three colors show up over 300 draws
        assert!(seen[Color::Red as usize]);
        assert!(seen[Color::Green as usize]);
        assert!(seen[Color::Blue as usize]);
    }

    #[test]
    fn test_reseed_restarts_sequence() {
        let palette = Palette::standard();
        let mut rng = DeterministicRng::new(99);
        let first: Vec<Color> = (0..20).map(|_| rng.next_color(&palette)).collect();

        rng.reseed(99);
        let again: Vec<Color> = (0..20).map(|_| rng.next_color(&palette)).collect();

        assert_eq!(first, again);
    }

    #[test]
    fn test_scripted_colors_cycle() {
        let palette = Palette::standard();
        let mut script = ScriptedColors::from_symbols("RGB");

        let drawn: Vec<Color> = (0..5).map(|_| script.next_color(&palette)).collect();
        assert_eq!(
            drawn,
            vec![Color::Red, Color::Green, Color::Blue, Color::Red, Color::Green]
        );
        assert_eq!(script.drawn(), 5);

        // Reseeding a script is a no-op
        script.reseed(1);
        assert_eq!(script.next_color(&palette), Color::Blue);
    }

    #[test]
    fn test_empty_script_uses_palette() {
        let palette = Palette::standard();
        let mut script = ScriptedColors::new(Vec::new());
        assert_eq!(script.next_color(&palette), Color::Blue);
    }

    #[test]
    fn test_derive_game_seed() {
        let session = [1u8; 16];

        let seed1 = derive_game_seed(&session, 1);
        let seed2 = derive_game_seed(&session, 1);
        assert_eq!(seed1, seed2);

        // Next game, different seed
        assert_ne!(seed1, derive_game_seed(&session, 2));

        // Different session, different seed
        assert_ne!(seed1, derive_game_seed(&[2u8; 16], 1));
    }
}
