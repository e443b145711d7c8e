//! Platform-agnostic channel types and differential-drive mixing.
//!
//! This crate provides the core abstractions for turning RC receiver
//! channel values into motor commands for a two-motor differential-drive
//! chassis, without any platform-specific dependencies. It can be used
//! both in embedded `no_std` environments and on host for testing.
//!
//! # Overview
//!
//! - [`types`]: Core data structures ([`Channels`], [`MotorCommand`],
//!   [`DriveCommand`], [`Direction`])
//! - [`mixer`]: The differential-drive mixer ([`mix`], [`normalize`],
//!   [`MixerConfig`])
//! - [`failsafe`]: Receiver-loss policy ([`FailsafePolicy`])
//! - [`input`]: Channel source trait ([`ChannelSource`])
//! - [`output`]: Motor output trait ([`DriveOutput`])
//!
//! # Mixing
//!
//! Channel values are nominally 1000-2000 with 1500 as neutral. The
//! mixer reads a steer and a throttle channel and attenuates the inside
//! motor proportionally to the steer deflection:
//!
//! ```
//! use drive_core::{mix, Channels, Direction, DEFAULT_CONFIG};
//!
//! // Steer centered, throttle at 3/4: both motors at 375 of 500.
//! let channels = Channels::new([1500, 1500, 1750, 1500, 1500, 1500]);
//! let cmd = mix(&channels, &DEFAULT_CONFIG);
//! assert_eq!(cmd.left.speed, 375);
//! assert_eq!(cmd.right.speed, 375);
//! assert_eq!(cmd.left.direction, Direction::Forward);
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations,
//! making it suitable for embedded systems with limited resources.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod failsafe;
pub mod input;
pub mod mixer;
pub mod output;
pub mod types;

// Re-export main types at crate root
pub use failsafe::FailsafePolicy;
pub use input::{ChannelSource, InputError};
pub use mixer::{
    mix, normalize, ChannelLayout, DirectionMode, MixerConfig, NormalizeError, DEFAULT_CONFIG,
    DEFAULT_LAYOUT,
};
pub use output::{DriveOutput, OutputError};
pub use types::{
    Channels, Direction, DriveCommand, MotorCommand, CHANNEL_COUNT, CHANNEL_MAX, CHANNEL_MIN,
    CHANNEL_NEUTRAL,
};
