//! PWM + direction-pin motor output.
//!
//! Each motor is one PWM slice output for duty magnitude plus two GPIO
//! lines into an H-bridge for direction. A [`DriveCommand`] is applied
//! whole, both motors every call.

use drive_core::{Direction, DriveCommand, DriveOutput, MotorCommand, OutputError};
use embassy_rp::gpio::Output;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};

/// One physical motor: a PWM output and an H-bridge direction pair.
pub struct Motor<'d> {
    pwm: Pwm<'d>,
    /// PWM slice configuration; `top` fixes the duty resolution and
    /// `compare_a` tracks the commanded speed.
    config: PwmConfig,
    forward: Output<'d>,
    backward: Output<'d>,
}

impl<'d> Motor<'d> {
    /// Wrap an already-configured PWM slice and direction pins.
    ///
    /// `config` must be the configuration the slice was created with;
    /// its `top` value is the duty ceiling.
    #[must_use]
    pub fn new(
        pwm: Pwm<'d>,
        config: PwmConfig,
        forward: Output<'d>,
        backward: Output<'d>,
    ) -> Self {
        Self {
            pwm,
            config,
            forward,
            backward,
        }
    }

    /// Apply one motor command: duty magnitude and direction pins.
    pub fn set(&mut self, command: &MotorCommand) {
        // The mixer already bounds speed to duty_max; clamp anyway so a
        // misconfigured caller cannot exceed the wrap value.
        self.config.compare_a = command.speed.min(self.config.top);
        self.pwm.set_config(&self.config);
        match command.direction {
            Direction::Forward => {
                self.forward.set_high();
                self.backward.set_low();
            }
            Direction::Backward => {
                self.forward.set_low();
                self.backward.set_high();
            }
        }
    }
}

/// Drive output driving two [`Motor`]s from one [`DriveCommand`].
pub struct PwmDriveOutput<'d> {
    left: Motor<'d>,
    right: Motor<'d>,
}

impl<'d> PwmDriveOutput<'d> {
    #[must_use]
    pub fn new(left: Motor<'d>, right: Motor<'d>) -> Self {
        Self { left, right }
    }
}

impl DriveOutput for PwmDriveOutput<'_> {
    async fn apply(&mut self, command: &DriveCommand) -> Result<(), OutputError> {
        self.left.set(&command.left);
        self.right.set(&command.right);
        Ok(())
    }

    fn is_ready(&self) -> bool {
        true
    }
}
