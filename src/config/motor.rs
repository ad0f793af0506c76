//! Motor configuration from TOML.

use heapless::String;
use serde::Deserialize;

use crate::error::MotorError;
use crate::hal::PinId;
use crate::sequencer::pacing::{SpeedGate, DEFAULT_RPM};
use crate::sequencer::{PatternType, PhasePattern};

/// Complete motor configuration from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct MotorConfig {
    /// Human-readable name (max 32 chars).
    pub name: String<32>,

    /// Pins driving phase 1, 2 and 3.
    pub pins: [PinId; 3],

    /// Phase pattern (`"simple"`/`"overlap"` or `0`/`1`; anything else means simple).
    #[serde(default)]
    pub pattern: PatternType,

    /// Target speed in revolutions per minute.
    #[serde(default = "default_rpm")]
    pub rpm: u32,

    /// Start with speed control enabled.
    #[serde(default)]
    pub speed_control: bool,
}

fn default_rpm() -> u32 {
    DEFAULT_RPM
}

impl MotorConfig {
    /// Phase pattern selected by this configuration.
    pub fn phase_pattern(&self) -> PhasePattern {
        self.pattern.pattern()
    }

    /// Interval between position changes at the configured speed, in
    /// microseconds.
    pub fn time_step_us(&self) -> Result<u64, MotorError> {
        SpeedGate::interval_us(self.rpm, self.phase_pattern().steps())
    }
}
