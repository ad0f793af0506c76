//! Configuration validation.

use crate::error::{ConfigError, Error, Result};
use crate::hal::PinId;

use super::{MotorConfig, SystemConfig};

/// Validate a system configuration.
///
/// Checks:
/// - Every motor has a non-zero speed
/// - No motor assigns the same pin to two phases
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    for (_name, motor) in config.motors.iter() {
        validate_motor(motor)?;
    }

    Ok(())
}

fn validate_motor(config: &MotorConfig) -> Result<()> {
    if config.rpm == 0 {
        return Err(Error::Config(ConfigError::InvalidSpeed(config.rpm)));
    }

    validate_pins(config.pins)
}

/// Reject pin assignments that drive two phases from one pin.
pub(crate) fn validate_pins(pins: [PinId; 3]) -> Result<()> {
    let [a, b, c] = pins;
    if a == b || a == c {
        return Err(Error::Config(ConfigError::DuplicatePin(a)));
    }
    if b == c {
        return Err(Error::Config(ConfigError::DuplicatePin(b)));
    }

    Ok(())
}
