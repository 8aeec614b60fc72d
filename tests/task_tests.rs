//! Task Loop Tests
//!
//! The processing loop sleeps while quiescent and wakes on new work.
//! Run with: cargo test --no-default-features --features std --test task_tests

mod common;

use core::cell::RefCell;

use common::{Blinks, Console, Rig};
use critical_section::Mutex;
use embassy_futures::block_on;
use embassy_futures::join::join;
use embassy_futures::select::{select, Either};
use embassy_futures::yield_now;
use simple_trx::hal::gpio::ButtonState;
use simple_trx::radio::notifier::EventNotifier;
use simple_trx::radio::phy::{HeldRxPacket, RadioPhy};
use simple_trx::radio::processor::ActionProcessor;
use simple_trx::radio::sim::SimRadio;
use simple_trx::radio::state::{SharedState, TrxState};
use simple_trx::task::process_or_wait;
use simple_trx::types::{Channel, RadioStatus, RxPacketHandle, RxPacketInfo, TxOptions};

/// Poll one step of the loop once; `true` if it completed without waiting
fn step_ready(rig: &mut Rig<'_>) -> bool {
    let step = process_or_wait(&mut rig.processor, &mut rig.radio);
    matches!(block_on(select(step, yield_now())), Either::First(()))
}

#[test]
fn quiescent_loop_waits() {
    let shared = SharedState::new();
    let mut rig = Rig::new(&shared);

    assert!(shared.is_quiescent());
    assert!(!step_ready(&mut rig));
    assert!(rig.console().lines.is_empty());
}

#[test]
fn pending_state_is_processed_without_waiting() {
    let shared = SharedState::new();
    let mut rig = Rig::new(&shared);
    rig.receive(&[0x5A; 16]);

    assert!(step_ready(&mut rig));
    assert_eq!(shared.state(), Some(TrxState::Idle));
    assert_eq!(rig.blinks().receive, 1);
}

#[test]
fn button_press_wakes_loop_and_transmits() {
    let shared = SharedState::new();
    let mut rig = Rig::new(&shared);

    rig.notifier.on_button(ButtonState::Pressed);
    assert!(step_ready(&mut rig));
    assert_eq!(rig.radio.counters().start_tx, 1);
    assert!(shared.is_quiescent());

    // The request left the signal set; one empty pass consumes it
    assert!(step_ready(&mut rig));
    assert_eq!(rig.radio.counters().start_tx, 1);
    assert!(!step_ready(&mut rig));
}

#[test]
fn waiting_loop_wakes_on_button_press() {
    let shared = SharedState::new();
    let mut rig = Rig::new(&shared);
    let notifier = rig.notifier;

    let step = process_or_wait(&mut rig.processor, &mut rig.radio);
    let press = async {
        // Let the loop park first
        yield_now().await;
        notifier.on_button(ButtonState::Pressed);
    };
    block_on(join(step, press));

    assert_eq!(rig.radio.counters().start_tx, 1);
    assert!(!shared.tx_requested());
}

#[test]
fn full_exchange_through_the_loop() {
    let shared = SharedState::new();
    let mut rig = Rig::new(&shared);

    shared.request_tx();
    block_on(process_or_wait(&mut rig.processor, &mut rig.radio));
    rig.finish_tx();
    block_on(process_or_wait(&mut rig.processor, &mut rig.radio));
    rig.receive(&[0x01; 16]);
    block_on(process_or_wait(&mut rig.processor, &mut rig.radio));

    assert_eq!(rig.blinks().transmit, 1);
    assert_eq!(rig.blinks().receive, 1);
    assert_eq!(shared.state(), Some(TrxState::Idle));
    assert_eq!(
        &rig.console().infos()[..2],
        &["Send a message", "Packet has been sent"]
    );
}

// ============================================================================
// Radio Shared With the Event Callback
// ============================================================================

/// Copyable handle to one radio, as a board hands to both contexts
#[derive(Clone, Copy)]
struct BoardRadio<'a>(&'a Mutex<RefCell<SimRadio>>);

impl RadioPhy for BoardRadio<'_> {
    fn start_rx(&mut self, channel: Channel) -> RadioStatus {
        critical_section::with(|cs| self.0.borrow_ref_mut(cs).start_rx(channel))
    }

    fn hold_rx_packet(&mut self) -> RxPacketHandle {
        critical_section::with(|cs| self.0.borrow_ref_mut(cs).hold_rx_packet())
    }

    fn rx_packet_info(&mut self, handle: RxPacketHandle) -> Option<RxPacketInfo> {
        critical_section::with(|cs| self.0.borrow_ref_mut(cs).rx_packet_info(handle))
    }

    fn copy_rx_packet(&mut self, dest: &mut [u8], info: &RxPacketInfo) {
        critical_section::with(|cs| self.0.borrow_ref_mut(cs).copy_rx_packet(dest, info));
    }

    fn release_rx_packet(&mut self, packet: HeldRxPacket) -> RadioStatus {
        critical_section::with(|cs| self.0.borrow_ref_mut(cs).release_rx_packet(packet))
    }

    fn set_tx_fifo(&mut self, fifo: &[u8], payload_len: u16, fifo_size: u16) -> u16 {
        critical_section::with(|cs| {
            self.0
                .borrow_ref_mut(cs)
                .set_tx_fifo(fifo, payload_len, fifo_size)
        })
    }

    fn start_tx(&mut self, channel: Channel, options: TxOptions) -> RadioStatus {
        critical_section::with(|cs| self.0.borrow_ref_mut(cs).start_tx(channel, options))
    }

    fn calibrate(&mut self) -> RadioStatus {
        critical_section::with(|cs| self.0.borrow_ref_mut(cs).calibrate())
    }
}

#[test]
fn callback_and_loop_share_one_radio_handle() {
    let shared = SharedState::new();
    let radio = Mutex::new(RefCell::new(SimRadio::new()));
    let mut callback_radio = BoardRadio(&radio);
    let mut task_radio = callback_radio;
    let notifier = EventNotifier::new(&shared);
    let mut processor = ActionProcessor::new(&shared, Blinks::default(), Console::default());

    let events = critical_section::with(|cs| radio.borrow_ref_mut(cs).receive(&[0x3C; 16]));
    notifier.on_event(&mut callback_radio, events);
    block_on(process_or_wait(&mut processor, &mut task_radio));

    assert_eq!(shared.state(), Some(TrxState::Idle));
    assert_eq!(processor.rx_fifo().as_slice(), &[0x3C; 16]);
    critical_section::with(|cs| {
        let radio = radio.borrow_ref(cs);
        assert_eq!(radio.buffered_packets(), 0);
        assert_eq!(radio.held(), None);
        assert_eq!(radio.counters().start_rx, 1);
    });
}
