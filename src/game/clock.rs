//! Round Countdown
//!
//! A logical clock counted in whole seconds. Something outside the engine
//! owns the wall clock and calls [`Countdown::tick`] once per second.

use serde::{Serialize, Deserialize};

/// Seconds left in a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    total: u32,
    remaining: u32,
}

impl Countdown {
    /// Full countdown of `total` seconds.
    pub fn new(total: u32) -> Self {
        Self {
            total,
            remaining: total,
        }
    }

    /// Advance one second. Returns true only on the tick that reaches zero.
    pub fn tick(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        self.remaining == 0
    }

    /// Back to the full length.
    pub fn reset(&mut self) {
        self.remaining = self.total;
    }

    /// Seconds left.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Seconds already run.
    pub fn elapsed(&self) -> u32 {
        self.total - self.remaining
    }

    /// Round length.
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Has the countdown run out?
    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }
}
