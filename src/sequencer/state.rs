//! Observable sequencer state.
//!
//! The sequencer has two orthogonal sub-states: whether it energises the pins
//! and whether stepping is time-gated.

/// Whether voltage is applied to the pins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Drive {
    /// Pins follow the phase pattern on every step.
    Energized,
    /// Pins are held low; position keeps being tracked.
    Released,
}

/// Whether stepping is paced to a target speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pacing {
    /// Every step call advances.
    Unpaced,
    /// Step calls advance only once the scheduled tick has passed.
    Paced,
}

/// Combined sequencer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SequencerState {
    /// Drive sub-state.
    pub drive: Drive,
    /// Pacing sub-state.
    pub pacing: Pacing,
}

impl SequencerState {
    pub(crate) fn new(running: bool, paced: bool) -> Self {
        Self {
            drive: if running { Drive::Energized } else { Drive::Released },
            pacing: if paced { Pacing::Paced } else { Pacing::Unpaced },
        }
    }

    /// State name for display/debugging.
    pub fn name(&self) -> &'static str {
        match (self.drive, self.pacing) {
            (Drive::Energized, Pacing::Unpaced) => "Energized",
            (Drive::Energized, Pacing::Paced) => "Energized (paced)",
            (Drive::Released, Pacing::Unpaced) => "Released",
            (Drive::Released, Pacing::Paced) => "Released (paced)",
        }
    }
}
