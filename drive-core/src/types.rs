//! Core drive types: Channels, Direction, MotorCommand, DriveCommand.

/// Number of receiver channels carried through the system.
pub const CHANNEL_COUNT: usize = 6;

/// Nominal minimum channel value (stick fully low/left).
pub const CHANNEL_MIN: u16 = 1000;

/// Nominal center/neutral channel value.
pub const CHANNEL_NEUTRAL: u16 = 1500;

/// Nominal maximum channel value (stick fully high/right).
pub const CHANNEL_MAX: u16 = 2000;

/// One snapshot of decoded receiver channels.
///
/// Values are nominally in `[1000, 2000]` with 1500 as neutral, but the
/// decoder does not range-check them. The default value is all-zero,
/// matching the state before the first valid frame has arrived.
///
/// A `Channels` value is always produced and consumed as a whole; there
/// is no per-index update path, so a reader can never observe a torn
/// six-channel set.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Channels(pub [u16; CHANNEL_COUNT]);

impl Channels {
    /// All channels at the neutral position.
    pub const NEUTRAL: Self = Self([CHANNEL_NEUTRAL; CHANNEL_COUNT]);

    /// Create a channel snapshot from raw values.
    #[must_use]
    pub const fn new(values: [u16; CHANNEL_COUNT]) -> Self {
        Self(values)
    }

    /// Get the raw value of one channel.
    #[inline]
    #[must_use]
    pub const fn get(&self, index: usize) -> u16 {
        self.0[index]
    }

    /// Channel value as a 0-100 percentage of the nominal stick range.
    ///
    /// Values below 1000 map to 0; this is the display scaling used for
    /// telemetry output, not a control-path conversion.
    #[inline]
    #[must_use]
    pub const fn percent(&self, index: usize) -> u16 {
        self.0[index].saturating_sub(CHANNEL_MIN) / 10
    }
}

/// Motor rotation direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

/// Commanded duty cycle and direction for a single motor.
///
/// `speed` is an open-loop PWM duty magnitude in `[0, duty_max]`; which
/// physical pins it drives is the motor output collaborator's concern.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotorCommand {
    pub speed: u16,
    pub direction: Direction,
}

impl MotorCommand {
    /// Zero duty, forward. The safe "do nothing" command.
    pub const STOP: Self = Self {
        speed: 0,
        direction: Direction::Forward,
    };
}

/// Commands for both motors of a differential-drive chassis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriveCommand {
    /// Left track/wheel (motor A).
    pub left: MotorCommand,
    /// Right track/wheel (motor B).
    pub right: MotorCommand,
}

impl DriveCommand {
    /// Both motors stopped.
    pub const STOP: Self = Self {
        left: MotorCommand::STOP,
        right: MotorCommand::STOP,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channels_default_is_zeroed() {
        let channels = Channels::default();
        for i in 0..CHANNEL_COUNT {
            assert_eq!(channels.get(i), 0);
        }
    }

    #[test]
    fn test_channels_percent() {
        let channels = Channels::new([1000, 1500, 2000, 1499, 0, 1750]);
        assert_eq!(channels.percent(0), 0);
        assert_eq!(channels.percent(1), 50);
        assert_eq!(channels.percent(2), 100);
        assert_eq!(channels.percent(3), 49);
        // Below nominal minimum saturates to 0 instead of wrapping.
        assert_eq!(channels.percent(4), 0);
        assert_eq!(channels.percent(5), 75);
    }

    #[test]
    fn test_stop_command() {
        assert_eq!(DriveCommand::STOP.left.speed, 0);
        assert_eq!(DriveCommand::STOP.right.speed, 0);
        assert_eq!(DriveCommand::STOP.left.direction, Direction::Forward);
    }
}
