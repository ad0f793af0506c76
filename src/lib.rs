//! # srm-control
//!
//! Phase sequencing for three-phase switched reluctance motors, such as the
//! spindle motors found in hard disks, with non-blocking speed pacing.
//!
//! ## Features
//!
//! - **Phase patterns**: simple (3 positions) or overlapping (6 positions)
//! - **Non-blocking pacing**: set a speed in rpm and poll; steps are skipped
//!   until they are due, no delays involved
//! - **Release/resume**: let the motor coast while the phase keeps cycling
//! - **Injected collaborators**: pins and time come from [`DigitalOutput`]
//!   and [`Clock`] implementations, with a [`PinBank`] for embedded-hal 1.0
//! - **Configuration-driven**: define motors in TOML files
//! - **no_std compatible**: core library works without standard library
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use srm_control::{PatternType, SequencerBuilder};
//!
//! let mut motor = SequencerBuilder::new()
//!     .pin_bank(pin_a, pin_b, pin_c)
//!     .clock(&timer)
//!     .pattern(PatternType::Overlap)
//!     .rpm(1200)
//!     .speed_control(true)
//!     .build()?;
//!
//! loop {
//!     motor.step_forward()?;
//!     // other control-loop work
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `alloc`: Enables heap allocation for no_std with allocator
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Must come first so the logging macros are visible to the other modules
#[macro_use]
mod fmt;

// Core modules
pub mod config;
pub mod error;
pub mod hal;
pub mod sequencer;

// Re-exports for ergonomic API
pub use config::{validate_config, MotorConfig, SystemConfig};
pub use error::{ConfigError, Error, MotorError, Result};
pub use hal::{Clock, DigitalOutput, Level, PinBank, PinBankError, PinId};
pub use sequencer::{
    state, MotorSequencer, MotorSystem, PatternType, PhasePattern, SequencerBuilder,
    SequencerState,
};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};
