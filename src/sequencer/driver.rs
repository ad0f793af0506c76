//! Switched reluctance motor sequencer.
//!
//! Generic over the platform's [`DigitalOutput`] and [`Clock`].

use crate::error::{MotorError, Result};
use crate::hal::{Clock, DigitalOutput, Level, PinId};

use super::pacing::{SpeedGate, DEFAULT_RPM};
use super::pattern::{PatternType, PhasePattern};
use super::position::CyclePosition;
use super::state::SequencerState;

/// Three-phase motor sequencer with optional non-blocking speed pacing.
///
/// Call [`step_forward`](Self::step_forward) or
/// [`step_backward`](Self::step_backward) from the control loop as often as
/// possible. With speed control enabled the sequencer declines to advance
/// (returning `false`) until the next scheduled tick.
///
/// There is no internal locking. A sequencer has a single mutable owner;
/// sharing one across threads needs external synchronisation.
///
/// Generic over:
/// - `OUT`: pin-output sink (must implement [`DigitalOutput`])
/// - `CLK`: monotonic microsecond clock (must implement [`Clock`])
pub struct MotorSequencer<OUT, CLK>
where
    OUT: DigitalOutput,
    CLK: Clock,
{
    /// Pin-output sink.
    output: OUT,

    /// Time source for pacing.
    clock: CLK,

    /// Pins for phase 1, 2 and 3.
    pins: [PinId; 3],

    /// Energising pattern, fixed at construction.
    pattern: PhasePattern,

    /// Current position in the phase cycle.
    position: CyclePosition,

    /// Whether voltage is applied to the pins.
    running: bool,

    /// Speed pacing schedule.
    gate: SpeedGate,
}

impl<OUT, CLK> MotorSequencer<OUT, CLK>
where
    OUT: DigitalOutput,
    CLK: Clock,
{
    /// Create a sequencer at the start of the cycle, energised, unpaced, with
    /// the default speed of 500 rpm scheduled.
    ///
    /// The three pins are configured as outputs. Nothing is written to them
    /// until the first step.
    ///
    /// # Errors
    ///
    /// Returns [`MotorError::PinError`] if a pin cannot be configured.
    pub fn new(output: OUT, clock: CLK, pins: [PinId; 3], pattern: PatternType) -> Result<Self> {
        let pattern = pattern.pattern();
        let mut sequencer = Self {
            output,
            clock,
            pins,
            pattern,
            position: CyclePosition::start_of(&pattern),
            running: true,
            gate: SpeedGate::new(),
        };

        sequencer.set_speed(DEFAULT_RPM)?;

        for pin in pins {
            sequencer.output.configure_as_output(pin).map_err(|_| {
                warn!("failed to configure pin {=u8} as output", pin);
                MotorError::PinError
            })?;
        }

        debug!(
            "sequencer ready: pins {=u8} {=u8} {=u8}, {=u8} steps per cycle",
            pins[0],
            pins[1],
            pins[2],
            pattern.steps()
        );

        Ok(sequencer)
    }

    /// Enable or disable speed control.
    ///
    /// Timing state is left as is: enabling after a long pause lets the
    /// sequencer catch up on the ticks it missed.
    pub fn set_speed_control(&mut self, enabled: bool) {
        debug!("speed control {=bool}", enabled);
        self.gate.set_enabled(enabled);
    }

    /// Set the target speed in revolutions per minute.
    ///
    /// The interval between position changes becomes
    /// `(60_000_000 / rpm) / steps` microseconds and the next tick is
    /// scheduled one interval from now.
    ///
    /// # Errors
    ///
    /// Returns [`MotorError::InvalidSpeed`] for `rpm == 0`. The current speed
    /// and schedule are kept.
    pub fn set_speed(&mut self, rpm: u32) -> Result<()> {
        let now = self.clock.now_micros();
        self.gate
            .set_rpm(rpm, self.pattern.steps(), now)
            .map_err(|e| {
                warn!("rejected speed of {=u32} rpm", rpm);
                e
            })?;

        debug!(
            "speed {=u32} rpm, {=u64} us per step",
            rpm,
            self.gate.time_step_us()
        );
        Ok(())
    }

    /// Check whether the sequence may advance now.
    ///
    /// Always true without speed control. With speed control, true once the
    /// scheduled tick has passed; the schedule then moves forward by one
    /// interval.
    pub fn should_update(&mut self) -> bool {
        if !self.gate.is_enabled() {
            return true;
        }
        let now = self.clock.now_micros();
        self.gate.poll(now)
    }

    /// Make a single forward step.
    ///
    /// Returns `Ok(false)` without doing anything if speed control says it is
    /// too early; the caller should try again later.
    ///
    /// # Errors
    ///
    /// Returns [`MotorError::PinError`] if a pin write fails. The step is then
    /// not taken: position and pacing schedule are left as they were, though
    /// some pins may already show the new levels. Retrying repeats the step.
    pub fn step_forward(&mut self) -> Result<bool> {
        let mut next = self.position;
        next.advance();
        self.step_to(next)
    }

    /// Make a single backward step.
    ///
    /// Mirror of [`step_forward`](Self::step_forward).
    pub fn step_backward(&mut self) -> Result<bool> {
        let mut next = self.position;
        next.retreat();
        self.step_to(next)
    }

    /// Drive the pins to match the current position.
    ///
    /// Does nothing while released.
    pub fn apply_pins(&mut self) -> Result<()> {
        self.drive(self.position)
    }

    /// Stop applying voltage. All three pins are driven low immediately.
    ///
    /// The motor coasts while step calls keep cycling the position, so it can
    /// be picked up again in phase by [`resume`](Self::resume).
    pub fn release(&mut self) -> Result<()> {
        self.running = false;
        debug!("released at position {=u8}", self.position.bit());

        for pin in self.pins {
            self.write(pin, Level::Low)?;
        }

        Ok(())
    }

    /// Resume applying voltage.
    ///
    /// Pins are not touched until the next step.
    pub fn resume(&mut self) {
        self.running = true;
        debug!("resumed at position {=u8}", self.position.bit());
    }

    /// Current position as a single set bit in `[1, 2^steps)`.
    #[inline]
    pub fn position(&self) -> u8 {
        self.position.bit()
    }

    /// Current position as an index in `0..steps`.
    #[inline]
    pub fn cycle_index(&self) -> u8 {
        self.position.index()
    }

    /// Whether the sequencer sits on the first position of the cycle.
    ///
    /// This is the point at which to hand over to another sequencer sharing
    /// the same pins without stalling the motor.
    #[inline]
    pub fn is_at_cycle_start(&self) -> bool {
        self.position.is_cycle_start()
    }

    /// Phase pattern in use.
    #[inline]
    pub fn pattern(&self) -> &PhasePattern {
        &self.pattern
    }

    /// Pins for phase 1, 2 and 3.
    #[inline]
    pub fn pins(&self) -> [PinId; 3] {
        self.pins
    }

    /// Whether voltage is applied to the pins.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether speed control is enabled.
    #[inline]
    pub fn speed_control(&self) -> bool {
        self.gate.is_enabled()
    }

    /// Target speed in revolutions per minute.
    #[inline]
    pub fn rpm(&self) -> u32 {
        self.gate.rpm()
    }

    /// Interval between position changes, in microseconds.
    #[inline]
    pub fn time_step_us(&self) -> u64 {
        self.gate.time_step_us()
    }

    /// Timestamp at which speed control next allows a step, in microseconds.
    #[inline]
    pub fn next_update_us(&self) -> u64 {
        self.gate.next_update_us()
    }

    /// Current drive and pacing state.
    #[inline]
    pub fn state(&self) -> SequencerState {
        SequencerState::new(self.running, self.gate.is_enabled())
    }

    /// Pin-output sink.
    #[inline]
    pub fn output(&self) -> &OUT {
        &self.output
    }

    /// Give back the pin-output sink and the clock.
    pub fn free(self) -> (OUT, CLK) {
        (self.output, self.clock)
    }

    fn step_to(&mut self, next: CyclePosition) -> Result<bool> {
        let gate = self.gate;
        if !self.should_update() {
            return Ok(false);
        }

        if let Err(e) = self.drive(next) {
            self.gate = gate;
            return Err(e);
        }

        self.position = next;
        trace!("stepped to {=u8}", next.bit());
        Ok(true)
    }

    fn drive(&mut self, position: CyclePosition) -> Result<()> {
        if !self.running {
            return Ok(());
        }

        let levels = self.pattern.levels(position.bit());
        for (pin, level) in self.pins.into_iter().zip(levels) {
            self.write(pin, level)?;
        }

        Ok(())
    }

    fn write(&mut self, pin: PinId, level: Level) -> Result<()> {
        self.output.write(pin, level).map_err(|_| {
            warn!("failed to drive pin {=u8}", pin);
            MotorError::PinError
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;
    use core::convert::Infallible;

    use super::*;
    use crate::error::Error;
    use crate::hal::Level::{High, Low};

    /// Clock whose time only moves when told to.
    #[derive(Default)]
    struct ManualClock(Cell<u64>);

    impl ManualClock {
        fn advance(&self, us: u64) {
            self.0.set(self.0.get() + us);
        }
    }

    impl Clock for ManualClock {
        fn now_micros(&self) -> u64 {
            self.0.get()
        }
    }

    /// Output that keeps the last level written to each of pins 0..8.
    #[derive(Default)]
    struct LevelRecorder {
        levels: [Option<Level>; 8],
        configured: [bool; 8],
        writes: usize,
    }

    impl LevelRecorder {
        fn read(&self, pins: [PinId; 3]) -> [Option<Level>; 3] {
            pins.map(|p| self.levels[usize::from(p)])
        }
    }

    impl DigitalOutput for LevelRecorder {
        type Error = Infallible;

        fn configure_as_output(&mut self, pin: PinId) -> core::result::Result<(), Infallible> {
            self.configured[usize::from(pin)] = true;
            Ok(())
        }

        fn write(&mut self, pin: PinId, level: Level) -> core::result::Result<(), Infallible> {
            self.levels[usize::from(pin)] = Some(level);
            self.writes += 1;
            Ok(())
        }
    }

    const PINS: [PinId; 3] = [5, 6, 7];

    #[test]
    fn test_new_defaults() {
        let clock = ManualClock::default();
        clock.advance(1_000);
        let seq = MotorSequencer::new(LevelRecorder::default(), &clock, PINS, PatternType::Simple)
            .unwrap();

        assert_eq!(seq.position(), 1);
        assert!(seq.is_running());
        assert!(!seq.speed_control());
        assert_eq!(seq.rpm(), 500);
        assert_eq!(seq.time_step_us(), 40_000);
        assert_eq!(seq.next_update_us(), 41_000);
        assert_eq!(seq.state().name(), "Energized");

        let (out, _) = seq.free();
        assert!(out.configured[5] && out.configured[6] && out.configured[7]);
        assert_eq!(out.writes, 0);
    }

    #[test]
    fn test_simple_first_steps() {
        let clock = ManualClock::default();
        let mut seq =
            MotorSequencer::new(LevelRecorder::default(), &clock, PINS, PatternType::Simple)
                .unwrap();

        seq.apply_pins().unwrap();
        assert_eq!(seq.output.read(PINS), [Some(Low), Some(Low), Some(High)]);

        assert!(seq.step_forward().unwrap());
        assert_eq!(seq.position(), 2);
        assert_eq!(seq.output.read(PINS), [Some(Low), Some(High), Some(Low)]);
    }

    #[test]
    fn test_set_speed_zero_is_rejected() {
        let clock = ManualClock::default();
        let mut seq =
            MotorSequencer::new(LevelRecorder::default(), &clock, PINS, PatternType::Overlap)
                .unwrap();

        assert_eq!(seq.time_step_us(), 20_000);
        let err = seq.set_speed(0).unwrap_err();
        assert_eq!(err, Error::Motor(MotorError::InvalidSpeed(0)));
        assert_eq!(seq.rpm(), 500);
        assert_eq!(seq.time_step_us(), 20_000);
    }

    #[test]
    fn test_release_drives_low_and_resume_waits_for_step() {
        let clock = ManualClock::default();
        let mut seq =
            MotorSequencer::new(LevelRecorder::default(), &clock, PINS, PatternType::Simple)
                .unwrap();

        seq.step_forward().unwrap();
        seq.release().unwrap();
        assert_eq!(seq.output.read(PINS), [Some(Low); 3]);
        assert_eq!(seq.state().name(), "Released");

        // position keeps cycling while released, pins stay low
        seq.step_forward().unwrap();
        assert_eq!(seq.position(), 4);
        assert_eq!(seq.output.read(PINS), [Some(Low); 3]);

        let writes = seq.output.writes;
        seq.resume();
        assert!(seq.is_running());
        assert_eq!(seq.output.writes, writes);

        seq.step_forward().unwrap();
        assert_eq!(seq.position(), 1);
        assert_eq!(seq.output.read(PINS), [Some(Low), Some(Low), Some(High)]);
    }

    #[test]
    fn test_paced_stepping() {
        let clock = ManualClock::default();
        let mut seq =
            MotorSequencer::new(LevelRecorder::default(), &clock, PINS, PatternType::Simple)
                .unwrap();
        seq.set_speed_control(true);
        assert_eq!(seq.state().name(), "Energized (paced)");

        assert!(!seq.step_forward().unwrap());
        assert_eq!(seq.position(), 1);

        clock.advance(40_000);
        assert!(seq.step_forward().unwrap());
        assert!(!seq.step_forward().unwrap());
        assert_eq!(seq.position(), 2);

        clock.advance(40_000);
        assert!(seq.step_backward().unwrap());
        assert_eq!(seq.position(), 1);
    }

    /// Output whose writes fail until told otherwise.
    #[derive(Default)]
    struct FlakyOutput {
        failing: bool,
        inner: LevelRecorder,
    }

    impl DigitalOutput for FlakyOutput {
        type Error = ();

        fn configure_as_output(&mut self, pin: PinId) -> core::result::Result<(), ()> {
            self.inner.configure_as_output(pin).map_err(|_| ())
        }

        fn write(&mut self, pin: PinId, level: Level) -> core::result::Result<(), ()> {
            if self.failing {
                return Err(());
            }
            self.inner.write(pin, level).map_err(|_| ())
        }
    }

    #[test]
    fn test_failed_step_is_not_taken() {
        let clock = ManualClock::default();
        let mut seq =
            MotorSequencer::new(FlakyOutput::default(), &clock, PINS, PatternType::Simple)
                .unwrap();
        seq.set_speed_control(true);
        clock.advance(40_000);

        seq.output.failing = true;
        assert_eq!(seq.step_forward(), Err(Error::Motor(MotorError::PinError)));
        assert_eq!(seq.position(), 1);
        assert_eq!(seq.next_update_us(), 40_000);

        seq.output.failing = false;
        assert!(seq.step_forward().unwrap());
        assert_eq!(seq.position(), 2);
        assert_eq!(seq.next_update_us(), 80_000);
        assert_eq!(seq.output.inner.read(PINS), [Some(Low), Some(High), Some(Low)]);
    }

    #[test]
    fn test_set_speed_reschedules_from_now() {
        let clock = ManualClock::default();
        let mut seq =
            MotorSequencer::new(LevelRecorder::default(), &clock, PINS, PatternType::Simple)
                .unwrap();

        clock.advance(10_000);
        seq.set_speed(1_000).unwrap();
        assert_eq!(seq.time_step_us(), 20_000);
        assert_eq!(seq.next_update_us(), 30_000);
    }
}
