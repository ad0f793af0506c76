//! Test doubles shared by the integration tests.

#![allow(dead_code)]

use std::cell::Cell;
use std::convert::Infallible;

use srm_control::{Clock, DigitalOutput, Level, PinId};

/// Clock that only moves when the test says so.
#[derive(Debug, Default)]
pub struct FakeClock {
    now: Cell<u64>,
}

impl FakeClock {
    pub fn at(us: u64) -> Self {
        Self { now: Cell::new(us) }
    }

    pub fn advance(&self, us: u64) {
        self.now.set(self.now.get() + us);
    }
}

impl Clock for FakeClock {
    fn now_micros(&self) -> u64 {
        self.now.get()
    }
}

/// Output that records every configure and write call.
#[derive(Debug, Default)]
pub struct PinRecorder {
    pub configured: Vec<PinId>,
    pub writes: Vec<(PinId, Level)>,
}

impl PinRecorder {
    /// Last level written to `pin`, if any.
    pub fn level(&self, pin: PinId) -> Option<Level> {
        self.writes
            .iter()
            .rev()
            .find(|(p, _)| *p == pin)
            .map(|(_, level)| *level)
    }

    /// Last levels written to `pins`.
    pub fn levels(&self, pins: [PinId; 3]) -> [Option<Level>; 3] {
        pins.map(|p| self.level(p))
    }
}

impl DigitalOutput for PinRecorder {
    type Error = Infallible;

    fn configure_as_output(&mut self, pin: PinId) -> Result<(), Infallible> {
        self.configured.push(pin);
        Ok(())
    }

    fn write(&mut self, pin: PinId, level: Level) -> Result<(), Infallible> {
        self.writes.push((pin, level));
        Ok(())
    }
}

/// Output whose writes always fail.
#[derive(Debug, Default)]
pub struct BrokenOutput;

impl DigitalOutput for BrokenOutput {
    type Error = ();

    fn configure_as_output(&mut self, _pin: PinId) -> Result<(), ()> {
        Ok(())
    }

    fn write(&mut self, _pin: PinId, _level: Level) -> Result<(), ()> {
        Err(())
    }
}
