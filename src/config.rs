//! System configuration and radio constants
//!
//! This module defines compile-time constants for the transceiver core.
//! FIFO sizing, the payload layout and input timing are centralized here.

use crate::types::{Channel, TxOptions};

/// Size of the radio RX/TX FIFO in bytes
pub const FIFO_SIZE: usize = 256;

/// Transmit payload length in bytes
pub const TX_PAYLOAD_LENGTH: usize = 16;

/// Radio channel used for both transmit and receive
pub const CHANNEL: Channel = Channel::new(0);

/// Options passed when starting a transmission
pub const TX_OPTIONS: TxOptions = TxOptions::DEFAULT;

/// Payload loaded into the transmit FIFO at startup
pub const DEFAULT_TX_PAYLOAD: [u8; TX_PAYLOAD_LENGTH] = [
    0x0F, 0x16, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, //
    0x77, 0x88, 0x99, 0xAA, 0xBB, 0xCC, 0xDD, 0xEE,
];

/// Transmit request flag at startup
pub const DEFAULT_TX_REQUESTED: bool = false;

/// Received packets are forwarded to the console at startup
pub const DEFAULT_RX_FORWARD: bool = true;

/// Button poll interval in milliseconds
pub const BUTTON_POLL_MS: u64 = 10;

/// Consecutive identical button reads required before a change is accepted
pub const BUTTON_DEBOUNCE_READS: u8 = 3;

/// CLI command line buffer size
pub const CLI_BUFFER_SIZE: usize = 64;

/// CLI response buffer size
pub const CLI_RESPONSE_SIZE: usize = 64;

/// FIFO size as passed to the radio (the radio API takes `u16`)
#[must_use]
pub const fn fifo_size_u16() -> u16 {
    FIFO_SIZE as u16
}
