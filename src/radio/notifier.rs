//! Event Notifier
//!
//! Runs in the radio's event callback. Classifies the event bitmask and
//! records one pending state for the processor; never blocks, never
//! allocates.

use crate::hal::gpio::ButtonState;
use crate::radio::events::RadioEvents;
use crate::radio::phy::RadioPhy;
use crate::radio::state::{SharedState, TrxState};

/// Radio event callback half of the transceiver core
#[derive(Clone, Copy)]
pub struct EventNotifier<'a> {
    shared: &'a SharedState,
}

impl<'a> EventNotifier<'a> {
    /// Create a notifier writing into `shared`
    #[must_use]
    pub const fn new(shared: &'a SharedState) -> Self {
        Self { shared }
    }

    /// Handle one radio callback.
    ///
    /// Receive, transmit and calibration conditions are checked
    /// independently; if more than one group fires, the last state written
    /// wins.
    pub fn on_event<R: RadioPhy>(&self, radio: &mut R, events: RadioEvents) {
        #[cfg(feature = "embedded")]
        defmt::trace!("radio events {}", events);

        let mut posted = false;

        if events.intersects(RadioEvents::RX_COMPLETION) {
            if events.contains(RadioEvents::RX_PACKET_RECEIVED) {
                // Keep the packet in the radio buffer; the processor copies it out
                let handle = radio.hold_rx_packet();
                if self.shared.push_held(handle) {
                    #[cfg(feature = "embedded")]
                    defmt::debug!("{} queued behind undrained holds", handle);
                }
                self.shared.post(TrxState::PacketReceived);
            } else {
                self.shared
                    .set_pending_error(events & RadioEvents::RX_COMPLETION);
                self.shared.post(TrxState::RxError);
            }
            posted = true;
        }

        if events.intersects(RadioEvents::TX_COMPLETION) {
            if events.contains(RadioEvents::TX_PACKET_SENT) {
                self.shared.post(TrxState::PacketSent);
            } else {
                let failed = events & RadioEvents::TX_COMPLETION;
                #[cfg(feature = "embedded")]
                {
                    if failed.intersects(RadioEvents::TX_UNDERFLOW) {
                        defmt::warn!("transfer underflow {}", failed);
                    }
                }
                self.shared.set_pending_error(failed);
                self.shared.post(TrxState::TxError);
            }
            posted = true;
        }

        if events.intersects(RadioEvents::CAL_NEEDED) {
            let status = radio.calibrate();
            self.shared.set_calibration_result(status);
            if status.is_err() {
                // Report-only: the state is left alone
                self.shared
                    .set_pending_error(events & RadioEvents::CAL_NEEDED);
            }
        }

        if posted {
            self.shared.wake();
        }
    }

    /// Handle a transmit button transition; a press requests one transmission
    pub fn on_button(&self, state: ButtonState) {
        if state == ButtonState::Pressed {
            self.shared.request_tx();
        }
    }
}
