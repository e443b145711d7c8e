//! iBUS input source implementation.
//!
//! Receives iBUS frames from UART and produces channel snapshots.

use drive_core::{ChannelSource, Channels, InputError};
use embassy_rp::uart::{Async, UartRx};
use ibus_proto::{Command, IbusDecoder};

/// iBUS input source for receiving RC channel data.
///
/// Feeds UART bytes to the frame decoder one at a time and returns each
/// checksum-valid servo frame as a whole channel snapshot. Corrupt or
/// unrecognized frames never surface here; the decoder resynchronizes
/// silently and the read loop keeps going.
pub struct IbusInputSource<'d> {
    /// UART receiver (RX only; iBUS is unidirectional).
    rx: UartRx<'d, Async>,
    /// iBUS frame decoder.
    decoder: IbusDecoder,
    /// Connection status (true once a valid frame has been decoded).
    connected: bool,
}

impl<'d> IbusInputSource<'d> {
    /// Create a new iBUS input source.
    ///
    /// # Arguments
    /// * `rx` - UART receiver configured for 115200 baud, 8N1
    #[must_use]
    pub fn new(rx: UartRx<'d, Async>) -> Self {
        Self {
            rx,
            decoder: IbusDecoder::new(),
            connected: false,
        }
    }

    /// Process incoming bytes until a servo frame decodes.
    async fn read_next_frame(&mut self) -> Result<Channels, InputError> {
        let mut byte_buf = [0u8; 1];

        loop {
            // Read one byte at a time; the decoder does bounded work
            // per byte and buffers at most one frame.
            self.rx
                .read(&mut byte_buf)
                .await
                .map_err(|_| InputError::Io)?;

            if let Some(Command::ServoChannels(channels)) = self.decoder.push_byte(byte_buf[0]) {
                self.connected = true;
                return Ok(channels);
            }
        }
    }
}

impl ChannelSource for IbusInputSource<'_> {
    async fn receive(&mut self) -> Result<Channels, InputError> {
        self.read_next_frame().await
    }

    fn is_connected(&self) -> bool {
        self.connected
    }
}
