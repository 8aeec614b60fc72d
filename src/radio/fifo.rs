//! Staging Buffers
//!
//! Application-side copies of the radio FIFO: one for the last received
//! packet, one holding the frame handed to the radio for transmission.

use crate::config::{DEFAULT_TX_PAYLOAD, FIFO_SIZE, TX_PAYLOAD_LENGTH};
use crate::radio::phy::RadioPhy;
use crate::types::RxPacketInfo;

/// Receive staging buffer
pub struct RxFifo {
    buffer: [u8; FIFO_SIZE],
    len: usize,
}

impl RxFifo {
    /// Create an empty buffer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buffer: [0; FIFO_SIZE],
            len: 0,
        }
    }

    /// Copy the packet described by `info` out of the radio.
    /// Packets larger than the FIFO are truncated. Returns bytes copied.
    pub fn fill<R: RadioPhy>(&mut self, radio: &mut R, info: &RxPacketInfo) -> usize {
        let len = info.len().min(FIFO_SIZE);
        radio.copy_rx_packet(&mut self.buffer[..len], info);
        self.len = len;
        len
    }

    /// Bytes of the last packet
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.buffer[..self.len]
    }

    /// The fixed-length payload region of the last packet, shorter if the
    /// packet was
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.buffer[..self.len.min(TX_PAYLOAD_LENGTH)]
    }

    /// Forget the last packet
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Length of the last packet
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Check if no packet has been copied yet
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for RxFifo {
    fn default() -> Self {
        Self::new()
    }
}

/// Transmit staging buffer
///
/// The radio reads from it between `set_tx_fifo` and the transmit
/// completion, so it offers no mutable access once built.
pub struct TxFifo {
    buffer: [u8; FIFO_SIZE],
}

impl TxFifo {
    /// Buffer loaded with [`DEFAULT_TX_PAYLOAD`]
    #[must_use]
    pub const fn new() -> Self {
        Self::with_payload(DEFAULT_TX_PAYLOAD)
    }

    /// Buffer loaded with a custom payload
    #[must_use]
    pub const fn with_payload(payload: [u8; TX_PAYLOAD_LENGTH]) -> Self {
        let mut buffer = [0; FIFO_SIZE];
        let mut i = 0;
        while i < TX_PAYLOAD_LENGTH {
            buffer[i] = payload[i];
            i += 1;
        }
        Self { buffer }
    }

    /// Whole FIFO, as handed to the radio
    #[must_use]
    pub const fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    /// The frame bytes
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.buffer[..TX_PAYLOAD_LENGTH]
    }
}

impl Default for TxFifo {
    fn default() -> Self {
        Self::new()
    }
}
