//! Collaborator traits for the platform the sequencer runs on.
//!
//! The sequencer never touches hardware directly. It reads time from a
//! [`Clock`] and writes pin levels through a [`DigitalOutput`], so tests can
//! inject a fake clock and a pin recorder.

use embedded_hal::digital::OutputPin;

/// Identifier of a digital output pin, as understood by a [`DigitalOutput`].
pub type PinId = u8;

/// Logic level of a digital output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Pin driven low (phase de-energised).
    Low,
    /// Pin driven high (phase energised).
    High,
}

impl From<bool> for Level {
    #[inline]
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// Monotonic microsecond time source.
///
/// Implementations must never go backward. The sequencer compares raw `u64`
/// timestamps, so a clock that wraps is only handled as well as 64 bits of
/// microseconds allow (roughly 584,000 years).
pub trait Clock {
    /// Current time in microseconds since an arbitrary fixed epoch.
    fn now_micros(&self) -> u64;
}

impl<C: Clock + ?Sized> Clock for &C {
    #[inline]
    fn now_micros(&self) -> u64 {
        (**self).now_micros()
    }
}

/// Binary pin-output sink.
pub trait DigitalOutput {
    /// Error reported by the underlying pins.
    type Error: core::fmt::Debug;

    /// Prepare `pin` for use as an output.
    fn configure_as_output(&mut self, pin: PinId) -> Result<(), Self::Error>;

    /// Drive `pin` to `level`.
    fn write(&mut self, pin: PinId, level: Level) -> Result<(), Self::Error>;
}

impl<D: DigitalOutput + ?Sized> DigitalOutput for &mut D {
    type Error = D::Error;

    #[inline]
    fn configure_as_output(&mut self, pin: PinId) -> Result<(), Self::Error> {
        (**self).configure_as_output(pin)
    }

    #[inline]
    fn write(&mut self, pin: PinId, level: Level) -> Result<(), Self::Error> {
        (**self).write(pin, level)
    }
}

/// Error from a [`PinBank`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinBankError<E> {
    /// Pin identifier outside `0..3`.
    UnknownPin(PinId),
    /// The underlying pin reported an error.
    Pin(E),
}

/// [`DigitalOutput`] over three embedded-hal 1.0 output pins.
///
/// The pins are addressed as `0`, `1` and `2` in the order given to
/// [`PinBank::new`]. embedded-hal pins are already outputs by type, so
/// configuring only checks the identifier.
pub struct PinBank<P: OutputPin> {
    pins: [P; 3],
}

impl<P: OutputPin> PinBank<P> {
    /// Identifiers of the three pins, in phase order.
    pub const IDS: [PinId; 3] = [0, 1, 2];

    /// Wrap three output pins.
    pub fn new(pin1: P, pin2: P, pin3: P) -> Self {
        Self {
            pins: [pin1, pin2, pin3],
        }
    }

    /// Release the wrapped pins.
    pub fn free(self) -> [P; 3] {
        self.pins
    }

    fn pin_mut(&mut self, pin: PinId) -> Result<&mut P, PinBankError<P::Error>> {
        self.pins
            .get_mut(usize::from(pin))
            .ok_or(PinBankError::UnknownPin(pin))
    }
}

impl<P: OutputPin> DigitalOutput for PinBank<P> {
    type Error = PinBankError<P::Error>;

    fn configure_as_output(&mut self, pin: PinId) -> Result<(), Self::Error> {
        self.pin_mut(pin).map(|_| ())
    }

    fn write(&mut self, pin: PinId, level: Level) -> Result<(), Self::Error> {
        let pin = self.pin_mut(pin)?;
        let result = match level {
            Level::High => pin.set_high(),
            Level::Low => pin.set_low(),
        };
        result.map_err(PinBankError::Pin)
    }
}
