//! Phase patterns.
//!
//! A pattern lists, for each of the three phases, the cycle positions at which
//! that phase is energised. Position `i` of the cycle corresponds to bit `i`
//! of each phase mask.

use core::fmt;

use serde::de::{self, Deserialize, Deserializer, Visitor};

use crate::hal::Level;

/// Built-in pattern selector.
///
/// Deserializes from `"simple"` / `"overlap"` or from the raw selectors `0` /
/// `1`. Anything else falls back to [`PatternType::Simple`] with a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PatternType {
    /// Three positions, one phase energised at a time.
    #[default]
    Simple,
    /// Six positions with adjacent phases overlapping.
    Overlap,
}

impl PatternType {
    /// Map a raw selector (`0` simple, `1` overlap) to a pattern type.
    ///
    /// Any other value falls back to [`PatternType::Simple`].
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            0 => PatternType::Simple,
            1 => PatternType::Overlap,
            other => {
                warn!("unknown pattern selector {=u8}, using simple", other);
                PatternType::Simple
            }
        }
    }

    /// Map a pattern name to a pattern type.
    ///
    /// Any unknown name falls back to [`PatternType::Simple`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "simple" => PatternType::Simple,
            "overlap" => PatternType::Overlap,
            _ => {
                warn!("unknown pattern name, using simple");
                PatternType::Simple
            }
        }
    }

    /// The phase pattern this selector names.
    #[inline]
    pub const fn pattern(self) -> PhasePattern {
        match self {
            PatternType::Simple => PhasePattern::SIMPLE,
            PatternType::Overlap => PhasePattern::OVERLAP,
        }
    }
}

/// Immutable three-phase energising pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhasePattern {
    phases: [u8; 3],
    steps: u8,
}

impl PhasePattern {
    /// One phase per position, three positions per cycle.
    pub const SIMPLE: Self = Self {
        phases: [0b0000_0100, 0b0000_0010, 0b0000_0001],
        steps: 3,
    };

    /// Overlapping phases, six positions per cycle.
    pub const OVERLAP: Self = Self {
        phases: [0b0011_0001, 0b0001_1100, 0b0000_0111],
        steps: 6,
    };

    /// Number of positions in one electrical cycle.
    #[inline]
    pub const fn steps(&self) -> u8 {
        self.steps
    }

    /// `2^steps`, the first position value past the end of the cycle.
    #[inline]
    pub const fn limit(&self) -> u16 {
        1 << self.steps
    }

    /// Bit masks of phase 1, 2 and 3.
    #[inline]
    pub const fn phase_masks(&self) -> [u8; 3] {
        self.phases
    }

    /// Pin levels for a position value (a single set bit below `limit`).
    pub fn levels(&self, position: u8) -> [Level; 3] {
        self.phases.map(|mask| Level::from(mask & position != 0))
    }
}

struct PatternTypeVisitor;

impl<'de> Visitor<'de> for PatternTypeVisitor {
    type Value = PatternType;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a pattern name or selector")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<PatternType, E> {
        Ok(PatternType::from_name(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<PatternType, E> {
        Ok(PatternType::from_raw(u8::try_from(v).unwrap_or(u8::MAX)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<PatternType, E> {
        Ok(PatternType::from_raw(u8::try_from(v).unwrap_or(u8::MAX)))
    }
}

impl<'de> Deserialize<'de> for PatternType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(PatternTypeVisitor)
    }
}
