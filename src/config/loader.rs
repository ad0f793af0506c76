//! Configuration loading from files (std only).

use std::fs;
use std::path::Path;

use crate::error::{ConfigError, Error, Result};

use super::SystemConfig;

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed or validated.
///
/// # Example
///
/// ```rust,ignore
/// use srm_control::load_config;
///
/// let config = load_config("motors.toml")?;
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SystemConfig> {
    let content = fs::read_to_string(path.as_ref()).map_err(|e| {
        let msg = truncated(&e.to_string());
        Error::Config(ConfigError::IoError(msg))
    })?;

    parse_config(&content)
}

/// Parse configuration from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is invalid or fails validation.
pub fn parse_config(content: &str) -> Result<SystemConfig> {
    let config: SystemConfig = toml::from_str(content).map_err(|e| {
        let msg = truncated(e.message());
        Error::Config(ConfigError::ParseError(msg))
    })?;

    super::validation::validate_config(&config)?;

    Ok(config)
}

/// Keep as much of `msg` as fits, cutting on a char boundary.
fn truncated(msg: &str) -> heapless::String<128> {
    let mut out = heapless::String::new();
    for ch in msg.chars() {
        if out.push(ch).is_err() {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequencer::PatternType;

    #[test]
    fn test_parse_minimal_config() {
        let toml = r#"
[motors.spindle]
name = "Spindle"
pins = [2, 3, 4]
"#;

        let config = parse_config(toml).unwrap();
        let motor = config.motor("spindle").unwrap();
        assert_eq!(motor.pattern, PatternType::Simple);
        assert_eq!(motor.rpm, 500);
        assert!(!motor.speed_control);
    }

    #[test]
    fn test_parse_rejects_zero_rpm() {
        let toml = r#"
[motors.spindle]
name = "Spindle"
pins = [2, 3, 4]
rpm = 0
"#;

        assert_eq!(
            parse_config(toml).unwrap_err(),
            Error::Config(ConfigError::InvalidSpeed(0))
        );
    }

    #[test]
    fn test_parse_error_is_reported() {
        let result = parse_config("[motors.spindle]\nname = 3\n");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::ParseError(_)))
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = load_config("/nonexistent/motors.toml");
        assert!(matches!(result, Err(Error::Config(ConfigError::IoError(_)))));
    }

    #[test]
    fn test_truncated_keeps_prefix() {
        let long = "x".repeat(300);
        assert_eq!(truncated(&long).len(), 128);
        assert_eq!(truncated("short").as_str(), "short");
    }
}
