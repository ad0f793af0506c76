//! Time gate that paces stepping to a target speed.
//!
//! Pacing is poll-and-skip: the caller keeps asking, and the gate only opens
//! once the scheduled tick has passed. Each opening moves the schedule forward
//! by exactly one interval, so call jitter does not accumulate as drift.

use crate::error::MotorError;

/// Microseconds in one minute.
const MICROS_PER_MINUTE: u32 = 60_000_000;

/// Speed applied at construction, in revolutions per minute.
pub const DEFAULT_RPM: u32 = 500;

/// Fixed-rate pacing schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpeedGate {
    enabled: bool,
    rpm: u32,
    time_step_us: u64,
    next_update_us: u64,
}

impl SpeedGate {
    /// Disabled gate with no speed applied yet.
    pub const fn new() -> Self {
        Self {
            enabled: false,
            rpm: 0,
            time_step_us: 0,
            next_update_us: 0,
        }
    }

    /// Interval between position changes for `rpm` with `steps` positions per
    /// cycle, in microseconds.
    pub fn interval_us(rpm: u32, steps: u8) -> Result<u64, MotorError> {
        if rpm == 0 {
            return Err(MotorError::InvalidSpeed(rpm));
        }
        Ok(u64::from(MICROS_PER_MINUTE / rpm) / u64::from(steps))
    }

    /// Set the target speed and schedule the next tick one interval after
    /// `now_us`.
    ///
    /// # Errors
    ///
    /// Returns [`MotorError::InvalidSpeed`] for `rpm == 0`, leaving the
    /// schedule untouched.
    pub fn set_rpm(&mut self, rpm: u32, steps: u8, now_us: u64) -> Result<(), MotorError> {
        let time_step_us = Self::interval_us(rpm, steps)?;
        self.rpm = rpm;
        self.time_step_us = time_step_us;
        self.next_update_us = now_us.wrapping_add(time_step_us);
        Ok(())
    }

    /// Enable or disable gating. The schedule is kept as is.
    #[inline]
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether gating is enabled.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Last speed applied, in revolutions per minute.
    #[inline]
    pub fn rpm(&self) -> u32 {
        self.rpm
    }

    /// Interval between position changes, in microseconds.
    #[inline]
    pub fn time_step_us(&self) -> u64 {
        self.time_step_us
    }

    /// Timestamp at which the gate next opens, in microseconds.
    #[inline]
    pub fn next_update_us(&self) -> u64 {
        self.next_update_us
    }

    /// Whether a position change is permitted at `now_us`.
    ///
    /// Always true while disabled. While enabled, an opening advances the
    /// schedule by one interval from the previous scheduled tick, not from
    /// `now_us`.
    pub fn poll(&mut self, now_us: u64) -> bool {
        if !self.enabled {
            return true;
        }

        if now_us >= self.next_update_us {
            self.next_update_us = self.next_update_us.wrapping_add(self.time_step_us);
            true
        } else {
            false
        }
    }
}

impl Default for SpeedGate {
    fn default() -> Self {
        Self::new()
    }
}
