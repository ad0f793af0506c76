//! Rotor position within the phase cycle.

use super::pattern::PhasePattern;

/// Position within one electrical cycle.
///
/// Stored as an index in `0..steps`. The equivalent position value, a single
/// set bit in `[1, 2^steps)`, is exposed through [`CyclePosition::bit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CyclePosition {
    index: u8,
    steps: u8,
}

impl CyclePosition {
    /// Start of the cycle of `pattern`.
    ///
    /// Built-in patterns have three or six positions, so the bit view always
    /// fits a `u8`.
    #[inline]
    pub const fn start_of(pattern: &PhasePattern) -> Self {
        Self {
            index: 0,
            steps: pattern.steps(),
        }
    }

    /// Index in `0..steps`.
    #[inline]
    pub const fn index(&self) -> u8 {
        self.index
    }

    /// Position as a single set bit.
    #[inline]
    pub const fn bit(&self) -> u8 {
        1 << self.index
    }

    /// Whether the position is the first one of the cycle.
    #[inline]
    pub const fn is_cycle_start(&self) -> bool {
        self.index == 0
    }

    /// Advance by one, wrapping from the last position to the first.
    #[inline]
    pub fn advance(&mut self) {
        self.index = if self.index + 1 == self.steps {
            0
        } else {
            self.index + 1
        };
    }

    /// Go back by one, wrapping from the first position to the last.
    #[inline]
    pub fn retreat(&mut self) {
        self.index = match self.index {
            0 => self.steps - 1,
            i => i - 1,
        };
    }
}
