//! Motor sequencing for three-phase switched reluctance motors.
//!
//! Provides the phase patterns, the speed gate and the sequencer driver.

mod builder;
mod driver;
pub mod pacing;
mod pattern;
mod position;
pub mod state;
mod system;

pub use builder::SequencerBuilder;
pub use driver::MotorSequencer;
pub use pacing::{SpeedGate, DEFAULT_RPM};
pub use pattern::{PatternType, PhasePattern};
pub use position::CyclePosition;
pub use state::{Drive, Pacing, SequencerState};
pub use system::MotorSystem;
