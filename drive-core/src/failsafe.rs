//! Receiver-loss policy.
//!
//! The iBUS stream itself carries no link-status flag, so a silent
//! receiver is only detectable as an absence of frames. What to drive
//! while the link is down is a deliberate, configurable choice rather
//! than an accident of whatever the shared state last held.

use crate::types::DriveCommand;

/// What to command while no valid frames are arriving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FailsafePolicy {
    /// Keep driving at the last mixed command indefinitely.
    HoldLastCommand,
    /// Stop both motors until frames resume.
    StopOnTimeout,
}

impl FailsafePolicy {
    /// Resolve the command to drive while the receiver is silent.
    #[inline]
    #[must_use]
    pub const fn apply(self, last: DriveCommand) -> DriveCommand {
        match self {
            FailsafePolicy::HoldLastCommand => last,
            FailsafePolicy::StopOnTimeout => DriveCommand::STOP,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Direction, MotorCommand};

    fn moving() -> DriveCommand {
        DriveCommand {
            left: MotorCommand {
                speed: 375,
                direction: Direction::Forward,
            },
            right: MotorCommand {
                speed: 250,
                direction: Direction::Forward,
            },
        }
    }

    #[test]
    fn test_hold_last_keeps_command() {
        assert_eq!(FailsafePolicy::HoldLastCommand.apply(moving()), moving());
    }

    #[test]
    fn test_stop_on_timeout_stops() {
        assert_eq!(
            FailsafePolicy::StopOnTimeout.apply(moving()),
            DriveCommand::STOP
        );
    }
}
