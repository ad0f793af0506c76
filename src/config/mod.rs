//! Configuration module for srm-control.
//!
//! Provides types for loading and validating motor configurations from TOML
//! files (with `std` feature) or pre-parsed data.

#[cfg(feature = "std")]
mod loader;
mod motor;
mod system;
mod validation;

pub use motor::MotorConfig;
pub use system::SystemConfig;
pub use validation::validate_config;
pub(crate) use validation::validate_pins;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};
