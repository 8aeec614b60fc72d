//! Configuration Tests
//!
//! Compile-time constants and startup defaults.
//! Run with: cargo test --no-default-features --features std --test config_tests

use simple_trx::config::*;
use simple_trx::radio::events::RadioEvents;
use simple_trx::radio::fifo::TxFifo;
use simple_trx::radio::state::{SharedState, TrxState};

#[test]
fn fifo_holds_payload() {
    assert_eq!(FIFO_SIZE, 256);
    assert_eq!(TX_PAYLOAD_LENGTH, 16);
    assert!(TX_PAYLOAD_LENGTH <= FIFO_SIZE);
    assert_eq!(usize::from(fifo_size_u16()), FIFO_SIZE);
}

#[test]
fn default_payload_layout() {
    assert_eq!(DEFAULT_TX_PAYLOAD[0], 0x0F);
    assert_eq!(DEFAULT_TX_PAYLOAD[1], 0x16);
    assert_eq!(DEFAULT_TX_PAYLOAD[2], 0x11);
    assert_eq!(DEFAULT_TX_PAYLOAD[TX_PAYLOAD_LENGTH - 1], 0xEE);
}

#[test]
fn tx_fifo_starts_with_default_payload() {
    let fifo = TxFifo::new();

    assert_eq!(fifo.payload(), &DEFAULT_TX_PAYLOAD[..]);
    assert_eq!(fifo.as_slice().len(), FIFO_SIZE);
    assert!(fifo.as_slice()[TX_PAYLOAD_LENGTH..].iter().all(|&b| b == 0));
}

#[test]
fn startup_state_matches_defaults() {
    let shared = SharedState::new();

    assert_eq!(shared.state(), Some(TrxState::Idle));
    assert_eq!(shared.tx_requested(), DEFAULT_TX_REQUESTED);
    assert_eq!(shared.rx_forward_enabled(), DEFAULT_RX_FORWARD);
    assert_eq!(shared.pending_error(), RadioEvents::NONE);
    assert_eq!(shared.calibration_result(), Ok(()));
}

#[test]
fn default_channel_and_options() {
    assert_eq!(CHANNEL.index(), 0);
    assert_eq!(TX_OPTIONS.bits(), 0);
}

#[test]
fn input_timing_is_sane() {
    assert!(BUTTON_POLL_MS > 0);
    assert!(BUTTON_DEBOUNCE_READS > 0);
    assert!(CLI_BUFFER_SIZE >= "receive 1".len());
    assert!(CLI_RESPONSE_SIZE >= "state=CALIBRATION_ERROR tx_requested=0 rx_forward=0".len());
}
