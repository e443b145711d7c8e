//! Byte-level iBUS frame decoder.
//!
//! Driven one byte per call from whatever context receives the UART
//! data. Each call does a fixed, bounded amount of work: no allocation,
//! no blocking, no loops. Malformed input carries no error signal;
//! the decoder falls back to waiting for the next plausible length byte,
//! which is sufficient for a self-framing stream that the transmitter
//! repeats every few milliseconds.

use heapless::Vec;

use crate::command::Command;

/// Bytes of a frame that are not payload: the length byte itself plus
/// the two trailing checksum bytes.
pub const PROTOCOL_OVERHEAD: u8 = 3;

/// Largest frame the protocol allows, total bytes including overhead.
pub const MAX_FRAME_LENGTH: u8 = 0x20;

/// Payload capacity implied by [`MAX_FRAME_LENGTH`].
pub const MAX_PAYLOAD: usize = (MAX_FRAME_LENGTH - PROTOCOL_OVERHEAD) as usize;

/// Frame assembly state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Waiting for a plausible length byte.
    Idle,
    /// Collecting payload bytes.
    Payload,
    /// Waiting for the checksum low byte.
    ChecksumLow,
    /// Waiting for the checksum high byte.
    ChecksumHigh,
}

/// Streaming iBUS frame decoder.
///
/// Feed received bytes with [`push_byte`](IbusDecoder::push_byte); a
/// checksum-valid frame carrying a recognized command is returned as a
/// whole, so a caller can never observe a partially decoded frame.
///
/// # Example
///
/// ```
/// use ibus_proto::{Command, IbusDecoder};
///
/// let mut decoder = IbusDecoder::new();
/// let frame = ibus_proto::encode_servo_frame(&[1500; 6]);
/// let mut decoded = None;
/// for &byte in &frame {
///     if let Some(command) = decoder.push_byte(byte) {
///         decoded = Some(command);
///     }
/// }
/// assert!(matches!(decoded, Some(Command::ServoChannels(_))));
/// ```
pub struct IbusDecoder {
    state: State,
    /// Payload length promised by the validated length byte.
    payload_len: usize,
    payload: Vec<u8, MAX_PAYLOAD>,
    /// Running checksum: `0xFFFF - length byte - payload bytes`.
    checksum: u16,
    checksum_low: u8,
}

impl IbusDecoder {
    /// Create a decoder waiting for the start of a frame.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: State::Idle,
            payload_len: 0,
            payload: Vec::new(),
            checksum: 0,
            checksum_low: 0,
        }
    }

    /// Feed one received byte.
    ///
    /// Returns a command exactly when this byte completes a frame whose
    /// checksum matches and whose command code is recognized. All other
    /// bytes return `None`: mid-frame bytes, implausible length bytes in
    /// idle, checksum mismatches, and unrecognized commands.
    pub fn push_byte(&mut self, byte: u8) -> Option<Command> {
        match self.state {
            State::Idle => {
                if byte > PROTOCOL_OVERHEAD && byte <= MAX_FRAME_LENGTH {
                    // payload_len <= MAX_PAYLOAD follows from the length
                    // check, so the buffer can never overflow.
                    self.payload_len = (byte - PROTOCOL_OVERHEAD) as usize;
                    self.checksum = 0xFFFF - byte as u16;
                    self.payload.clear();
                    self.state = State::Payload;
                }
                None
            }
            State::Payload => {
                let _ = self.payload.push(byte);
                self.checksum = self.checksum.wrapping_sub(byte as u16);
                if self.payload.len() == self.payload_len {
                    self.state = State::ChecksumLow;
                }
                None
            }
            State::ChecksumLow => {
                self.checksum_low = byte;
                self.state = State::ChecksumHigh;
                None
            }
            State::ChecksumHigh => {
                self.state = State::Idle;
                let expected = u16::from_le_bytes([self.checksum_low, byte]);
                if expected == self.checksum {
                    Command::parse(&self.payload)
                } else {
                    None
                }
            }
        }
    }

    /// Discard any partially assembled frame and wait for a new one.
    pub fn reset(&mut self) {
        self.state = State::Idle;
        self.payload.clear();
    }

    /// True while a frame is being assembled.
    #[must_use]
    pub fn in_frame(&self) -> bool {
        self.state != State::Idle
    }
}

impl Default for IbusDecoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;
    use std::vec::Vec;

    use super::*;
    use crate::encode::encode_servo_frame;
    use drive_core::Channels;

    /// The documented receiver frame: 14 channels, checksum 0xF3DA.
    const EXAMPLE_FRAME: [u8; 32] = [
        0x20, 0x40, 0xDB, 0x05, 0xDC, 0x05, 0x54, 0x05, 0xDC, 0x05, 0xE8, 0x03, 0xD0, 0x07, 0xD2,
        0x05, 0xE8, 0x03, 0xDC, 0x05, 0xDC, 0x05, 0xDC, 0x05, 0xDC, 0x05, 0xDC, 0x05, 0xDC, 0x05,
        0xDA, 0xF3,
    ];

    fn feed(decoder: &mut IbusDecoder, bytes: &[u8]) -> Vec<Command> {
        bytes
            .iter()
            .filter_map(|&byte| decoder.push_byte(byte))
            .collect()
    }

    #[test]
    fn test_decode_example_frame() {
        let mut decoder = IbusDecoder::new();
        let commands = feed(&mut decoder, &EXAMPLE_FRAME);
        assert_eq!(commands.len(), 1);
        let Command::ServoChannels(channels) = commands[0];
        assert_eq!(channels.get(0), 1499); // 0x05DB
        assert_eq!(channels, Channels::new([1499, 1500, 1364, 1500, 1000, 2000]));
    }

    #[test]
    fn test_round_trip() {
        let values = [1000, 2000, 1500, 1234, 1876, 1001];
        let frame = encode_servo_frame(&values);
        let mut decoder = IbusDecoder::new();
        let commands = feed(&mut decoder, &frame);
        assert_eq!(commands, [Command::ServoChannels(Channels::new(values))]);
    }

    #[test]
    fn test_idempotent_across_repeated_frames() {
        let mut decoder = IbusDecoder::new();
        let first = feed(&mut decoder, &EXAMPLE_FRAME);
        let second = feed(&mut decoder, &EXAMPLE_FRAME);
        assert_eq!(first, second);
        assert_eq!(first.len(), 1);
    }

    #[test]
    fn test_single_bit_corruption_never_decodes() {
        // Any single-bit flip anywhere in the frame must yield no
        // command at all, including via accidental resynchronization
        // onto a byte that looks like a length byte.
        for index in 0..EXAMPLE_FRAME.len() {
            for bit in 0..8 {
                let mut corrupted = EXAMPLE_FRAME;
                corrupted[index] ^= 1 << bit;
                let mut decoder = IbusDecoder::new();
                let commands = feed(&mut decoder, &corrupted);
                assert!(
                    commands.is_empty(),
                    "accepted frame corrupted at byte {index} bit {bit}"
                );
            }
        }
    }

    #[test]
    fn test_implausible_bytes_dropped_in_idle() {
        let mut decoder = IbusDecoder::new();
        // 0x00..=0x03 fail the overhead bound, the rest exceed the
        // maximum frame length.
        for byte in [0x00, 0x01, 0x02, 0x03, 0x21, 0x40, 0xFF] {
            assert_eq!(decoder.push_byte(byte), None);
            assert!(!decoder.in_frame());
        }
    }

    #[test]
    fn test_resync_after_garbage() {
        let mut decoder = IbusDecoder::new();
        assert!(feed(&mut decoder, &[0x00, 0xFF, 0x21, 0x03]).is_empty());
        let commands = feed(&mut decoder, &EXAMPLE_FRAME);
        assert_eq!(commands.len(), 1);
    }

    #[test]
    fn test_truncated_frame_commits_nothing() {
        // A truncated frame bleeds into the next one; neither may
        // produce a (torn) command.
        let mut decoder = IbusDecoder::new();
        let mut stream = Vec::new();
        stream.extend_from_slice(&EXAMPLE_FRAME[..10]);
        stream.extend_from_slice(&EXAMPLE_FRAME);
        assert!(feed(&mut decoder, &stream).is_empty());
    }

    #[test]
    fn test_reset_discards_partial_frame() {
        let mut decoder = IbusDecoder::new();
        assert!(feed(&mut decoder, &EXAMPLE_FRAME[..10]).is_empty());
        assert!(decoder.in_frame());
        decoder.reset();
        assert!(!decoder.in_frame());
        let commands = feed(&mut decoder, &EXAMPLE_FRAME);
        assert_eq!(commands.len(), 1);
    }

    #[test]
    fn test_wrong_command_code_discarded() {
        let mut frame = encode_servo_frame(&[1500; 6]);
        // Patch the command byte and fix up the checksum to match, so
        // only the dispatch step can reject it.
        frame[1] = 0x41;
        let sum: u16 = frame[..frame.len() - 2]
            .iter()
            .fold(0u16, |acc, &b| acc.wrapping_add(b as u16));
        let checksum = 0xFFFFu16.wrapping_sub(sum);
        let len = frame.len();
        frame[len - 2..].copy_from_slice(&checksum.to_le_bytes());

        let mut decoder = IbusDecoder::new();
        assert!(feed(&mut decoder, &frame).is_empty());
        // The decoder is back in idle and accepts the next frame.
        assert_eq!(feed(&mut decoder, &EXAMPLE_FRAME).len(), 1);
    }

    #[test]
    fn test_minimal_frame_length_accepted() {
        // Length byte 0x04 is the smallest plausible frame: one payload
        // byte plus checksum. Not a servo frame, but it must be framed
        // and dropped cleanly.
        let payload = 0x40;
        let checksum = 0xFFFFu16 - 0x04 - payload as u16;
        let [low, high] = checksum.to_le_bytes();
        let mut decoder = IbusDecoder::new();
        assert!(feed(&mut decoder, &[0x04, payload, low, high]).is_empty());
        assert!(!decoder.in_frame());
    }
}
