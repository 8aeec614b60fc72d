//! Action Processor
//!
//! Runs in the processing task. Each call to [`ActionProcessor::process`]
//! executes at most one state transition and returns; it never waits.
//!
//! | State              | Work                                             | Next    |
//! |--------------------|--------------------------------------------------|---------|
//! | `PacketReceived`   | per held packet: copy, release, report, blink;   | `Idle`  |
//! |                    | then restart RX                                  |         |
//! | `PacketSent`       | report, blink                                    | `Idle`  |
//! | `RxError`/`TxError`| report pending events                            | `Idle`  |
//! | `CalibrationError` | report events and calibration result             | `Idle`  |
//! | `Idle`             | start a requested transmission                   | `Idle`  |

use crate::config::{fifo_size_u16, CHANNEL, FIFO_SIZE, TX_OPTIONS, TX_PAYLOAD_LENGTH};
use crate::hal::gpio::{Indicators, Led};
use crate::radio::fifo::{RxFifo, TxFifo};
use crate::radio::phy::{HeldRxPacket, RadioPhy};
use crate::radio::state::{SharedState, TrxState};
use crate::report::{Level, Report, Reporter};
use crate::types::{Channel, RxPacketHandle};

#[allow(clippy::cast_possible_truncation)]
const PAYLOAD_LEN: u16 = TX_PAYLOAD_LENGTH as u16;

/// Processing task half of the transceiver core
pub struct ActionProcessor<'a, I, P> {
    shared: &'a SharedState,
    indicators: I,
    reporter: P,
    rx_fifo: RxFifo,
    tx_fifo: TxFifo,
    channel: Channel,
}

impl<'a, I: Indicators, P: Reporter> ActionProcessor<'a, I, P> {
    /// Create a processor on the configured channel with the default payload
    pub fn new(shared: &'a SharedState, indicators: I, reporter: P) -> Self {
        Self {
            shared,
            indicators,
            reporter,
            rx_fifo: RxFifo::new(),
            tx_fifo: TxFifo::new(),
            channel: CHANNEL,
        }
    }

    /// Use a different radio channel
    #[must_use]
    pub fn with_channel(self, channel: Channel) -> Self {
        Self { channel, ..self }
    }

    /// Transmit a different fixed payload
    #[must_use]
    pub fn with_tx_payload(self, payload: [u8; TX_PAYLOAD_LENGTH]) -> Self {
        Self {
            tx_fifo: TxFifo::with_payload(payload),
            ..self
        }
    }

    /// Shared state this processor drains
    #[must_use]
    pub const fn shared(&self) -> &'a SharedState {
        self.shared
    }

    /// Configured channel
    #[must_use]
    pub const fn channel(&self) -> Channel {
        self.channel
    }

    /// Last received packet
    #[must_use]
    pub const fn rx_fifo(&self) -> &RxFifo {
        &self.rx_fifo
    }

    /// Transmit buffer
    #[must_use]
    pub const fn tx_fifo(&self) -> &TxFifo {
        &self.tx_fifo
    }

    /// Indicator driver
    #[must_use]
    pub const fn indicators(&self) -> &I {
        &self.indicators
    }

    /// Report sink
    #[must_use]
    pub const fn reporter(&self) -> &P {
        &self.reporter
    }

    /// Report sink, mutable
    pub fn reporter_mut(&mut self) -> &mut P {
        &mut self.reporter
    }

    /// Execute the work for the current state.
    ///
    /// # Panics
    ///
    /// If a packet was signalled but the radio gave no valid hold handle, or
    /// if the radio reserves a transmit FIFO of the wrong size. Both mean
    /// the radio driver broke its contract.
    pub fn process<R: RadioPhy>(&mut self, radio: &mut R) {
        let seen = self.shared.observe();
        let raw = seen.raw();
        let Some(state) = TrxState::from_raw(raw) else {
            self.reporter
                .report(Level::Info, &Report::UnexpectedState(raw));
            return;
        };

        match state {
            TrxState::Idle => {
                self.start_requested_tx(radio);
                return;
            }
            TrxState::PacketReceived => self.drain_rx_packets(radio),
            TrxState::PacketSent => {
                self.reporter.report(Level::Info, &Report::PacketSent);
                self.indicators.toggle(Led::Transmit);
            }
            TrxState::RxError => {
                let events = self.shared.pending_error();
                self.reporter.report(Level::Info, &Report::RxError(events));
            }
            TrxState::TxError => {
                let events = self.shared.pending_error();
                self.reporter.report(Level::Info, &Report::TxError(events));
            }
            TrxState::CalibrationError => {
                let report = Report::CalibrationError {
                    events: self.shared.pending_error(),
                    status: self.shared.calibration_result(),
                };
                self.reporter.report(Level::Warn, &report);
            }
        }

        if !self.shared.complete(seen) {
            #[cfg(feature = "embedded")]
            defmt::debug!("{} superseded while processing {}", self.shared.state(), state);
        }
    }

    /// Copy every held packet out of the radio, oldest first, then go back
    /// to receiving
    fn drain_rx_packets<R: RadioPhy>(&mut self, radio: &mut R) {
        let held = self.shared.take_held();
        if held.count == 0 {
            // Drained by the previous pass, which raced the repeated post
            return;
        }
        assert!(
            held.newest.is_valid(),
            "hold_rx_packet() returned an invalid handle: no packet exists or the radio is not active"
        );

        let mut newest = Some(HeldRxPacket::new(held.newest));
        for _ in 0..held.count {
            let (packet, copied) = match radio.rx_packet_info(RxPacketHandle::OLDEST_COMPLETE) {
                Some(info) if info.handle.is_valid() => {
                    self.rx_fifo.fill(radio, &info);
                    if newest.as_ref().is_some_and(|n| n.handle() == info.handle) {
                        newest = None;
                    }
                    (HeldRxPacket::new(info.handle), true)
                }
                _ => {
                    self.reporter.report(Level::Warn, &Report::RxInfoUnavailable);
                    self.rx_fifo.clear();
                    // Nothing to copy; give back the one record known to be held
                    match newest.take() {
                        Some(packet) => (packet, false),
                        None => break,
                    }
                }
            };

            if let Err(err) = radio.release_rx_packet(packet) {
                self.reporter.report(Level::Warn, &Report::ReleaseFailed(err));
            }
            if copied && self.shared.rx_forward_enabled() {
                self.reporter
                    .report(Level::Info, &Report::PacketReceived(self.rx_fifo.payload()));
            }
            self.indicators.toggle(Led::Receive);
        }

        // The newest hold was not among the drained records
        if let Some(packet) = newest {
            if let Err(err) = radio.release_rx_packet(packet) {
                self.reporter.report(Level::Warn, &Report::ReleaseFailed(err));
            }
        }

        if let Err(err) = radio.start_rx(self.channel) {
            self.reporter.report(Level::Warn, &Report::StartRxFailed(err));
        }
    }

    /// Hand the transmit FIFO to the radio if a transmission was requested
    fn start_requested_tx<R: RadioPhy>(&mut self, radio: &mut R) {
        if !self.shared.take_tx_request() {
            return;
        }

        let allocated = radio.set_tx_fifo(self.tx_fifo.as_slice(), PAYLOAD_LEN, fifo_size_u16());
        assert!(
            allocated == fifo_size_u16(),
            "set_tx_fifo() failed to allocate a large enough fifo ({allocated} bytes instead of {FIFO_SIZE} bytes)"
        );

        if let Err(err) = radio.start_tx(self.channel, TX_OPTIONS) {
            self.reporter.report(Level::Warn, &Report::StartTxFailed(err));
        }
        self.reporter.report(Level::Info, &Report::TxStarted);
    }
}
