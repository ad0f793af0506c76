//! Builder pattern for MotorSequencer.

use embedded_hal::digital::OutputPin;

use crate::config::{validate_pins, MotorConfig, SystemConfig};
use crate::error::{ConfigError, Error, Result};
use crate::hal::{Clock, DigitalOutput, PinBank, PinId};

use super::driver::MotorSequencer;
use super::pacing::DEFAULT_RPM;
use super::pattern::PatternType;

/// Builder for creating MotorSequencer instances.
pub struct SequencerBuilder<OUT, CLK>
where
    OUT: DigitalOutput,
    CLK: Clock,
{
    output: Option<OUT>,
    clock: Option<CLK>,
    pins: Option<[PinId; 3]>,
    pattern: PatternType,
    rpm: u32,
    speed_control: bool,
}

impl<OUT, CLK> Default for SequencerBuilder<OUT, CLK>
where
    OUT: DigitalOutput,
    CLK: Clock,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<OUT, CLK> SequencerBuilder<OUT, CLK>
where
    OUT: DigitalOutput,
    CLK: Clock,
{
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            output: None,
            clock: None,
            pins: None,
            pattern: PatternType::Simple,
            rpm: DEFAULT_RPM,
            speed_control: false,
        }
    }

    /// Set the pin-output sink.
    pub fn output(mut self, output: OUT) -> Self {
        self.output = Some(output);
        self
    }

    /// Set the clock.
    pub fn clock(mut self, clock: CLK) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Set the pins for phase 1, 2 and 3.
    pub fn pins(mut self, pin1: PinId, pin2: PinId, pin3: PinId) -> Self {
        self.pins = Some([pin1, pin2, pin3]);
        self
    }

    /// Set the phase pattern.
    pub fn pattern(mut self, pattern: PatternType) -> Self {
        self.pattern = pattern;
        self
    }

    /// Set the target speed in revolutions per minute.
    pub fn rpm(mut self, rpm: u32) -> Self {
        self.rpm = rpm;
        self
    }

    /// Enable or disable speed control from the start.
    pub fn speed_control(mut self, enabled: bool) -> Self {
        self.speed_control = enabled;
        self
    }

    /// Configure from a MotorConfig.
    pub fn from_motor_config(mut self, config: &MotorConfig) -> Self {
        self.pins = Some(config.pins);
        self.pattern = config.pattern;
        self.rpm = config.rpm;
        self.speed_control = config.speed_control;
        self
    }

    /// Configure from SystemConfig by motor name.
    pub fn from_config(self, config: &SystemConfig, motor_name: &str) -> Result<Self> {
        let motor_config = config.motor(motor_name).ok_or_else(|| {
            Error::Config(ConfigError::MotorNotFound(
                heapless::String::try_from(motor_name).unwrap_or_default(),
            ))
        })?;

        Ok(self.from_motor_config(motor_config))
    }

    /// Build the MotorSequencer.
    ///
    /// # Errors
    ///
    /// Returns an error if a required field is missing, the pins overlap,
    /// the speed is zero or a pin cannot be configured.
    pub fn build(self) -> Result<MotorSequencer<OUT, CLK>> {
        let output = self.output.ok_or(ConfigError::Missing("output"))?;
        let clock = self.clock.ok_or(ConfigError::Missing("clock"))?;
        let pins = self.pins.ok_or(ConfigError::Missing("pins"))?;

        validate_pins(pins)?;
        if self.rpm == 0 {
            return Err(Error::Config(ConfigError::InvalidSpeed(self.rpm)));
        }

        let mut sequencer = MotorSequencer::new(output, clock, pins, self.pattern)?;
        sequencer.set_speed(self.rpm)?;
        sequencer.set_speed_control(self.speed_control);

        Ok(sequencer)
    }
}

impl<P, CLK> SequencerBuilder<PinBank<P>, CLK>
where
    P: OutputPin,
    CLK: Clock,
{
    /// Drive three embedded-hal output pins directly.
    ///
    /// Sets both the output and the pin identifiers.
    pub fn pin_bank(mut self, pin1: P, pin2: P, pin3: P) -> Self {
        self.output = Some(PinBank::new(pin1, pin2, pin3));
        self.pins = Some(PinBank::<P>::IDS);
        self
    }
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;
    use core::convert::Infallible;

    use super::*;
    use crate::hal::Level;

    struct FixedClock(Cell<u64>);

    impl Clock for FixedClock {
        fn now_micros(&self) -> u64 {
            self.0.get()
        }
    }

    struct NullOutput;

    impl DigitalOutput for NullOutput {
        type Error = Infallible;

        fn configure_as_output(&mut self, _pin: PinId) -> core::result::Result<(), Infallible> {
            Ok(())
        }

        fn write(&mut self, _pin: PinId, _level: Level) -> core::result::Result<(), Infallible> {
            Ok(())
        }
    }

    #[test]
    fn test_build_applies_settings() {
        let seq = SequencerBuilder::new()
            .output(NullOutput)
            .clock(FixedClock(Cell::new(0)))
            .pins(1, 2, 3)
            .pattern(PatternType::Overlap)
            .rpm(1_000)
            .speed_control(true)
            .build()
            .unwrap();

        assert_eq!(seq.pattern().steps(), 6);
        assert_eq!(seq.time_step_us(), 10_000);
        assert!(seq.speed_control());
        assert_eq!(seq.pins(), [1, 2, 3]);
    }

    #[test]
    fn test_missing_fields() {
        let result = SequencerBuilder::<NullOutput, FixedClock>::new()
            .output(NullOutput)
            .pins(1, 2, 3)
            .build();
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::Missing("clock")))
        ));

        let result = SequencerBuilder::new()
            .output(NullOutput)
            .clock(FixedClock(Cell::new(0)))
            .build();
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::Missing("pins")))
        ));
    }

    #[test]
    fn test_rejects_zero_rpm_and_shared_pins() {
        let result = SequencerBuilder::new()
            .output(NullOutput)
            .clock(FixedClock(Cell::new(0)))
            .pins(1, 2, 3)
            .rpm(0)
            .build();
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidSpeed(0)))
        ));

        let result = SequencerBuilder::new()
            .output(NullOutput)
            .clock(FixedClock(Cell::new(0)))
            .pins(1, 2, 2)
            .build();
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::DuplicatePin(2)))
        ));
    }
}
