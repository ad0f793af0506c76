//! Example: Configuration-driven sequencers.
//!
//! This example demonstrates how to:
//! - Parse motor configuration from TOML
//! - Build sequencers by name through `MotorSystem`
//! - Drive them against a simulated clock
//!
//! Run with: `cargo run --example config_driven --features std`

use std::cell::Cell;

use srm_control::{parse_config, Clock, DigitalOutput, Level, MotorSystem, PinId, Result};

/// Simulated microsecond clock advanced by the demo loop.
struct SimClock(Cell<u64>);

impl Clock for SimClock {
    fn now_micros(&self) -> u64 {
        self.0.get()
    }
}

/// Output that prints every pin write.
struct PrintOutput(&'static str);

impl DigitalOutput for PrintOutput {
    type Error = core::convert::Infallible;

    fn configure_as_output(&mut self, pin: PinId) -> core::result::Result<(), Self::Error> {
        println!("[{}] pin {} configured as output", self.0, pin);
        Ok(())
    }

    fn write(&mut self, pin: PinId, level: Level) -> core::result::Result<(), Self::Error> {
        if level == Level::High {
            println!("[{}] pin {} HIGH", self.0, pin);
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    println!("=== Configuration-Driven Sequencer Example ===\n");

    let toml_content = r#"
[motors.spindle]
name = "Disk spindle"
pins = [2, 3, 4]
pattern = "overlap"
rpm = 3000
speed_control = true

[motors.fan]
name = "Cooling fan"
pins = [5, 6, 7]
rpm = 1500
speed_control = true
"#;

    let system = MotorSystem::from_config(parse_config(toml_content)?);
    for name in system.motor_names() {
        if let Some(config) = system.motor_config(name) {
            println!(
                "{}: {} ({:?}, {} rpm, {:?} us/step)",
                name,
                config.name,
                config.pattern,
                config.rpm,
                config.time_step_us()
            );
        }
    }
    println!();

    let clock = SimClock(Cell::new(0));
    let mut spindle = system.build_sequencer("spindle", PrintOutput("spindle"), &clock)?;
    let mut fan = system.build_sequencer("fan", PrintOutput("fan"), &clock)?;

    // 20 ms of simulated time in 1 ms ticks
    for _ in 0..20 {
        clock.0.set(clock.0.get() + 1_000);
        if spindle.step_forward()? {
            println!("t={:>6}us spindle at {:#08b}", clock.now_micros(), spindle.position());
        }
        if fan.step_forward()? {
            println!("t={:>6}us fan at {:#05b}", clock.now_micros(), fan.position());
        }
    }

    Ok(())
}
