//! iBUS servo-frame decoding for RC receivers.
//!
//! This crate provides chip-agnostic decoding of the iBUS serial
//! protocol spoken by FlySky-style RC receivers: a continuous 115200
//! baud byte stream of self-framing, checksummed frames, each carrying
//! a command byte and up to 14 little-endian channel words.
//!
//! # Features
//!
//! - Streaming byte-at-a-time frame decoder, safe to drive from a
//!   receive interrupt: bounded work per byte, no allocation
//! - Running-complement checksum validation; corrupt frames are
//!   discarded whole
//! - Tagged [`Command`] dispatch over recognized command codes
//! - Frame encoding for host-side tests and mocks
//! - No chip-specific dependencies - fully testable on host
//!
//! # Example
//!
//! ```ignore
//! use ibus_proto::{Command, IbusDecoder};
//!
//! let mut decoder = IbusDecoder::new();
//!
//! // Feed bytes from UART
//! for byte in uart_bytes {
//!     if let Some(Command::ServoChannels(channels)) = decoder.push_byte(byte) {
//!         // Publish the snapshot...
//!     }
//! }
//! ```
//!
//! # Wire Format
//!
//! ```text
//! +--------+---------+----------------------+-------------------+
//! | length | command | channel data (2N LE) | checksum (u16 LE) |
//! +--------+---------+----------------------+-------------------+
//! ```
//!
//! `length` counts the whole frame including itself and the checksum
//! and must lie in `(3, 32]`. A frame is valid iff
//! `0xFFFF - sum(bytes[..length-2]) == checksum`.
//!
//! # UART Configuration
//!
//! iBUS uses 115200 baud, 8N1, receiver-to-host only.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod command;
pub mod decoder;
pub mod encode;

// Re-export main types at crate root
pub use command::{Command, COMMAND_SERVO};
pub use decoder::{IbusDecoder, MAX_FRAME_LENGTH, MAX_PAYLOAD, PROTOCOL_OVERHEAD};
pub use encode::{encode_servo_frame, MAX_FRAME_CHANNELS};

/// iBUS serial baud rate.
pub const IBUS_BAUDRATE: u32 = 115_200;
