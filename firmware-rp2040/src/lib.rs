//! iBUS receiver to differential-drive motor controller for RP2040.
//!
//! This crate provides the embedded implementation of a two-motor
//! rover drive: it reads iBUS servo frames from an RC receiver over
//! UART and drives two H-bridged DC motors with PWM duty and direction
//! pins.
//!
//! # Overview
//!
//! The firmware runs on a Raspberry Pi Pico (RP2040) and:
//! 1. Receives iBUS frames over UART (115200 baud, 8N1)
//! 2. Decodes and checksum-validates each frame, publishing the six
//!    channel values as one atomic snapshot
//! 3. Mixes steer/throttle into per-motor duty + direction commands
//!
//! # Hardware Configuration
//!
//! | Function       | GPIO | Description                       |
//! |----------------|------|-----------------------------------|
//! | UART1 TX       | 4    | Serial transmit (unused)          |
//! | UART1 RX       | 5    | iBUS data from receiver           |
//! | Left PWM       | 2    | Left motor duty (PWM slice 1 A)   |
//! | Left DIR fwd   | 6    | Left H-bridge forward input       |
//! | Left DIR back  | 7    | Left H-bridge backward input      |
//! | Right PWM      | 10   | Right motor duty (PWM slice 5 A)  |
//! | Right DIR fwd  | 11   | Right H-bridge forward input      |
//! | Right DIR back | 12   | Right H-bridge backward input     |
//! | Status LED     | 18   | Heartbeat blink                   |
//!
//! # Architecture
//!
//! The firmware uses the Embassy async runtime with three concurrent
//! tasks:
//!
//! - **Input Task**: reads UART bytes, feeds the frame decoder, signals
//!   each decoded channel snapshot
//! - **Drive Task**: waits for snapshots (with a receiver-loss timeout),
//!   runs the mixer, applies motor commands, logs telemetry
//! - **Blink Task**: toggles the status LED
//!
//! Communication between tasks uses Embassy's
//! [`Signal`](embassy_sync::signal::Signal) with "latest value wins"
//! semantics: the decoder task is the sole writer and always publishes a
//! whole six-channel snapshot, so the drive task can never observe a
//! torn update.
//!
//! # Features
//!
//! - **`dev-panic`** (default): Use `panic-probe` for development
//!   (prints panic info via RTT)
//! - **`prod-panic`**: Use `panic-reset` for production (silent
//!   watchdog reset)
//!
//! # Re-exports
//!
//! This crate re-exports the public items from [`drive_core`] and
//! [`ibus_proto`] for convenience, so the binary only needs to depend
//! on this crate.

#![no_std]

// Ensure mutually exclusive panic handler features
#[cfg(all(feature = "dev-panic", feature = "prod-panic"))]
compile_error!("Cannot enable both `dev-panic` and `prod-panic` features - they define conflicting panic handlers");

// Re-export core types for convenience
pub use drive_core::{
    mix, Channels, ChannelSource, Direction, DirectionMode, DriveCommand, DriveOutput,
    FailsafePolicy, InputError, MixerConfig, MotorCommand, OutputError, DEFAULT_CONFIG,
    DEFAULT_LAYOUT,
};
pub use ibus_proto::{Command, IbusDecoder, IBUS_BAUDRATE};

pub mod input;
pub mod motor;

pub use input::IbusInputSource;
pub use motor::{Motor, PwmDriveOutput};
