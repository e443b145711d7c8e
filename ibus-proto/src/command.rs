//! Frame payload interpretation.
//!
//! A validated frame payload is one command byte followed by
//! command-specific data. Dispatch is a match over recognized command
//! codes so new frame types can be added without touching the framing
//! state machine.

use drive_core::{Channels, CHANNEL_COUNT};

/// Command code for "set servo/channel data".
pub const COMMAND_SERVO: u8 = 0x40;

/// A recognized, checksum-validated iBUS command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[must_use]
pub enum Command {
    /// Servo/channel data (command 0x40): one snapshot of the first
    /// six channels. Receivers transmit up to 14 channels per frame;
    /// the remainder are not carried.
    ServoChannels(Channels),
}

impl Command {
    /// Interpret a validated frame payload.
    ///
    /// Returns `None` for unrecognized command codes and for servo
    /// payloads too short to hold six channel words; checksum validity
    /// does not imply the payload is acted upon.
    pub fn parse(payload: &[u8]) -> Option<Command> {
        let (&code, data) = payload.split_first()?;
        match code {
            COMMAND_SERVO => {
                if data.len() < 2 * CHANNEL_COUNT {
                    return None;
                }
                let mut values = [0u16; CHANNEL_COUNT];
                for (i, value) in values.iter_mut().enumerate() {
                    *value = u16::from_le_bytes([data[2 * i], data[2 * i + 1]]);
                }
                Some(Command::ServoChannels(Channels::new(values)))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_servo_payload() {
        let payload = [
            COMMAND_SERVO,
            0xDB, 0x05, // 1499
            0xDC, 0x05, // 1500
            0x54, 0x05, // 1364
            0xDC, 0x05, // 1500
            0xE8, 0x03, // 1000
            0xD0, 0x07, // 2000
        ];
        let Some(Command::ServoChannels(channels)) = Command::parse(&payload) else {
            panic!("servo payload not recognized");
        };
        assert_eq!(channels, Channels::new([1499, 1500, 1364, 1500, 1000, 2000]));
    }

    #[test]
    fn test_parse_ignores_extra_channels() {
        // A full 14-channel payload: only the first six are carried.
        let mut payload = [0u8; 29];
        payload[0] = COMMAND_SERVO;
        for i in 0..14 {
            let value = 1000 + i as u16;
            payload[1 + 2 * i..3 + 2 * i].copy_from_slice(&value.to_le_bytes());
        }
        let Some(Command::ServoChannels(channels)) = Command::parse(&payload) else {
            panic!("servo payload not recognized");
        };
        assert_eq!(channels, Channels::new([1000, 1001, 1002, 1003, 1004, 1005]));
    }

    #[test]
    fn test_parse_unknown_command() {
        let payload = [0x41, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        assert_eq!(Command::parse(&payload), None);
    }

    #[test]
    fn test_parse_short_servo_payload() {
        // Five channels is not enough; discard rather than read garbage.
        let payload = [COMMAND_SERVO, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        assert_eq!(Command::parse(&payload), None);
    }

    #[test]
    fn test_parse_empty_payload() {
        assert_eq!(Command::parse(&[]), None);
    }
}
