//! Motor system facade for multi-motor configuration.

use crate::config::{MotorConfig, SystemConfig};
use crate::error::Result;
use crate::hal::{Clock, DigitalOutput};

use super::builder::SequencerBuilder;
use super::driver::MotorSequencer;

/// A facade for building sequencers from a single configuration.
///
/// The sequencers themselves are owned by the caller, since their types
/// depend on the platform's pins and clock.
///
/// # Example
///
/// ```rust,ignore
/// use srm_control::MotorSystem;
///
/// let system = MotorSystem::from_config(srm_control::load_config("motors.toml")?);
/// let mut spindle = system.build_sequencer("spindle", output, &clock)?;
///
/// loop {
///     spindle.step_forward()?;
/// }
/// ```
pub struct MotorSystem {
    config: SystemConfig,
}

impl MotorSystem {
    /// Create a new motor system from configuration.
    pub fn from_config(config: SystemConfig) -> Self {
        Self { config }
    }

    /// Get the system configuration.
    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    /// Get a motor configuration by name.
    pub fn motor_config(&self, name: &str) -> Option<&MotorConfig> {
        self.config.motor(name)
    }

    /// Check if a motor name exists in the configuration.
    pub fn has_motor(&self, name: &str) -> bool {
        self.config.motor(name).is_some()
    }

    /// List all configured motor names.
    pub fn motor_names(&self) -> impl Iterator<Item = &str> {
        self.config.motor_names()
    }

    /// Build the sequencer for a named motor.
    ///
    /// # Errors
    ///
    /// Returns an error if the motor name doesn't exist or building fails.
    pub fn build_sequencer<OUT, CLK>(
        &self,
        name: &str,
        output: OUT,
        clock: CLK,
    ) -> Result<MotorSequencer<OUT, CLK>>
    where
        OUT: DigitalOutput,
        CLK: Clock,
    {
        SequencerBuilder::new()
            .output(output)
            .clock(clock)
            .from_config(&self.config, name)?
            .build()
    }
}
