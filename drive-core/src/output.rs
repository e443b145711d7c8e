//! Drive output trait and error types.

use core::future::Future;

use crate::types::DriveCommand;

/// Error type for drive output operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputError {
    /// Hardware-level failure applying the command.
    Hardware,
    /// Output not ready (e.g. driver not enabled yet).
    NotReady,
}

/// Async trait for motor output collaborators.
///
/// An implementation owns the direction pins and duty-cycle outputs for
/// both motors and applies a whole [`DriveCommand`] per call. It is
/// called once per control-loop tick, unconditionally.
///
/// # `no_std` Compatibility
///
/// All implementations must be `#![no_std]` compatible with no heap
/// allocation.
pub trait DriveOutput {
    /// Apply a drive command to the hardware.
    fn apply(&mut self, command: &DriveCommand) -> impl Future<Output = Result<(), OutputError>>;

    /// Check if the output is ready to accept commands.
    fn is_ready(&self) -> bool;
}
