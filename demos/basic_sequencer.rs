//! Basic sequencer example.
//!
//! Spins a simulated motor at 600 rpm with speed control, lets it coast for a
//! while, then picks it up again.
//!
//! Run with: `cargo run --example basic_sequencer`

use std::time::Instant;

use srm_control::{Clock, PatternType, SequencerBuilder};

/// Mock output pin that prints its transitions.
struct MockPin {
    label: char,
    state: bool,
}

impl MockPin {
    fn new(label: char) -> Self {
        Self {
            label,
            state: false,
        }
    }
}

impl embedded_hal::digital::ErrorType for MockPin {
    type Error = core::convert::Infallible;
}

impl embedded_hal::digital::OutputPin for MockPin {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        if !self.state {
            println!("  {} -> HIGH", self.label);
        }
        self.state = true;
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        if self.state {
            println!("  {} -> LOW", self.label);
        }
        self.state = false;
        Ok(())
    }
}

/// Wall clock standing in for a hardware timer.
struct StdClock(Instant);

impl Clock for StdClock {
    fn now_micros(&self) -> u64 {
        self.0.elapsed().as_micros() as u64
    }
}

fn main() -> srm_control::Result<()> {
    println!("=== Basic Sequencer Example ===\n");

    let clock = StdClock(Instant::now());
    let mut motor = SequencerBuilder::new()
        .pin_bank(MockPin::new('A'), MockPin::new('B'), MockPin::new('C'))
        .clock(&clock)
        .pattern(PatternType::Overlap)
        .rpm(600)
        .speed_control(true)
        .build()?;

    println!(
        "{} steps per cycle, {} us per step, state: {}\n",
        motor.pattern().steps(),
        motor.time_step_us(),
        motor.state().name()
    );

    // Poll as fast as the loop runs; the sequencer decides when to advance.
    let mut steps = 0;
    let mut polls = 0u64;
    while steps < 12 {
        polls += 1;
        if motor.step_forward()? {
            steps += 1;
            println!("step {:2}: position {:#08b}", steps, motor.position());
        }
    }
    println!("\n{} steps out of {} polls\n", steps, polls);

    motor.release()?;
    println!("released: {}", motor.state().name());
    for _ in 0..3 {
        while !motor.step_forward()? {}
    }
    println!("phase kept cycling while coasting: position {:#08b}", motor.position());

    motor.resume();
    while !motor.step_forward()? {}
    println!("resumed: {}", motor.state().name());

    Ok(())
}
