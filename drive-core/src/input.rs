//! Channel source trait and error types.

use core::future::Future;

use crate::types::Channels;

/// Error type for channel input operations.
///
/// Framing and checksum failures are not represented here: the frame
/// decoder recovers from those by resynchronizing and simply keeps
/// waiting for the next valid frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputError {
    /// UART/communication I/O error.
    Io,
    /// Connection lost / source shut down.
    Disconnected,
}

/// Async trait for receiver channel sources.
///
/// Abstracts where channel snapshots come from, so the serial iBUS
/// receiver can be swapped for another protocol or a mock in tests.
///
/// # `no_std` Compatibility
///
/// All implementations must be `#![no_std]` compatible with no heap
/// allocation.
pub trait ChannelSource {
    /// Wait for and return the next complete channel snapshot.
    fn receive(&mut self) -> impl Future<Output = Result<Channels, InputError>>;

    /// Check if the source has produced at least one valid frame.
    fn is_connected(&self) -> bool;
}
