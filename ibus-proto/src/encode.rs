//! Servo-frame encoding.
//!
//! The decoder's counterpart, used by host-side tests and mock
//! transmitters. Real receivers are the only frame source on hardware.

use heapless::Vec;

use crate::command::COMMAND_SERVO;
use crate::decoder::{MAX_FRAME_LENGTH, PROTOCOL_OVERHEAD};

/// Maximum number of channels a single frame can carry.
pub const MAX_FRAME_CHANNELS: usize = (MAX_FRAME_LENGTH as usize - PROTOCOL_OVERHEAD as usize - 1) / 2;

/// Build a well-formed command-0x40 frame from channel values.
///
/// The frame is `length, 0x40, <LE channel words>, <LE complement
/// checksum>`, with the length byte counting every byte including
/// itself and the checksum.
///
/// # Panics
///
/// Panics if more than [`MAX_FRAME_CHANNELS`] values are given.
#[must_use]
pub fn encode_servo_frame(channels: &[u16]) -> Vec<u8, { MAX_FRAME_LENGTH as usize }> {
    assert!(channels.len() <= MAX_FRAME_CHANNELS);

    let length = PROTOCOL_OVERHEAD + 1 + 2 * channels.len() as u8;
    let mut frame = Vec::new();
    // Capacity equals MAX_FRAME_LENGTH, which the length byte cannot
    // exceed, so every push below fits.
    let _ = frame.push(length);
    let _ = frame.push(COMMAND_SERVO);
    for &value in channels {
        let _ = frame.extend_from_slice(&value.to_le_bytes());
    }

    let sum = frame
        .iter()
        .fold(0u16, |acc, &byte| acc.wrapping_add(byte as u16));
    let checksum = 0xFFFFu16.wrapping_sub(sum);
    let _ = frame.extend_from_slice(&checksum.to_le_bytes());
    frame
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn test_encode_layout() {
        let frame = encode_servo_frame(&[1499, 1500, 1364, 1500, 1000, 2000]);
        assert_eq!(frame.len(), 16);
        assert_eq!(frame[0], 0x10);
        assert_eq!(frame[1], COMMAND_SERVO);
        assert_eq!(&frame[2..4], &[0xDB, 0x05]);
        assert_eq!(&frame[12..14], &[0xD0, 0x07]);
    }

    #[test]
    fn test_encode_checksum_complements_sum() {
        let frame = encode_servo_frame(&[1500; 6]);
        let sum: u16 = frame
            .iter()
            .fold(0u16, |acc, &byte| acc.wrapping_add(byte as u16));
        assert_eq!(sum, 0xFFFF);
    }

    #[test]
    fn test_encode_full_channel_count() {
        let frame = encode_servo_frame(&[1500; MAX_FRAME_CHANNELS]);
        assert_eq!(frame.len(), MAX_FRAME_LENGTH as usize);
        assert_eq!(frame[0], MAX_FRAME_LENGTH);
    }
}
