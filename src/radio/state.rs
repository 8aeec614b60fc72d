//! Transceiver State Machine State
//!
//! The single pending state shared by the event callback and the
//! processing task, plus the values that travel with it.
//!
//! Writers are split by direction: the notifier moves the machine out of
//! [`TrxState::Idle`], the processor moves it back. Each flag has exactly
//! one external producer.

use core::cell::Cell;
use core::sync::atomic::{AtomicBool, AtomicU32, AtomicU8, Ordering};

use critical_section::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use crate::config::{DEFAULT_RX_FORWARD, DEFAULT_TX_REQUESTED};
use crate::radio::events::RadioEvents;
use crate::types::{status_code, status_from_code, RadioStatus, RxPacketHandle};

/// Pending state of the transceiver
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum TrxState {
    /// Nothing pending, radio is listening
    #[default]
    Idle = 0,
    /// A packet is held in the radio waiting to be copied out
    PacketReceived = 1,
    /// A transmission completed
    PacketSent = 2,
    /// A reception ended with an error
    RxError = 3,
    /// A transmission ended with an error
    TxError = 4,
    /// Calibration failed
    CalibrationError = 5,
}

impl TrxState {
    /// Decode a stored state byte
    #[must_use]
    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::Idle),
            1 => Some(Self::PacketReceived),
            2 => Some(Self::PacketSent),
            3 => Some(Self::RxError),
            4 => Some(Self::TxError),
            5 => Some(Self::CalibrationError),
            _ => None,
        }
    }

    /// Encode for storage
    #[must_use]
    pub const fn as_raw(self) -> u8 {
        self as u8
    }

    /// Short name for diagnostics
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::PacketReceived => "PACKET_RECEIVED",
            Self::PacketSent => "PACKET_SENT",
            Self::RxError => "RX_ERROR",
            Self::TxError => "TX_ERROR",
            Self::CalibrationError => "CALIBRATION_ERROR",
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for TrxState {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=str}", self.name());
    }
}

/// Held receive records not yet drained by the processor
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeldRecords {
    /// Handle returned by the most recent hold
    pub newest: RxPacketHandle,
    /// Holds taken since the last drain
    pub count: u8,
}

impl HeldRecords {
    /// Nothing held
    pub const NONE: Self = Self {
        newest: RxPacketHandle::INVALID,
        count: 0,
    };
}

/// State word as seen by the processor at the start of a pass
///
/// Low byte is the state, the upper bits count posts, so a state that is
/// posted again while being processed is still told apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Posted(u32);

impl Posted {
    pub(crate) const fn raw(self) -> u8 {
        self.0.to_le_bytes()[0]
    }

    const fn idle(self) -> u32 {
        self.0 & !STATE_MASK
    }
}

const STATE_MASK: u32 = 0xFF;
const POST_INCREMENT: u32 = 1 << 8;

/// Process-wide coordination state
///
/// Meant to live in a `static`; every method takes `&self`.
pub struct SharedState {
    /// State byte plus post counter
    state: AtomicU32,
    /// 64-bit, so guarded by a critical section rather than an atomic
    pending_error: Mutex<Cell<RadioEvents>>,
    calibration: AtomicU8,
    held_rx: Mutex<Cell<HeldRecords>>,
    tx_requested: AtomicBool,
    rx_forward: AtomicBool,
    wake: Signal<CriticalSectionRawMutex, ()>,
}

impl SharedState {
    /// Startup state: idle, no error, flags at their configured defaults
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: AtomicU32::new(TrxState::Idle.as_raw() as u32),
            pending_error: Mutex::new(Cell::new(RadioEvents::NONE)),
            calibration: AtomicU8::new(0),
            held_rx: Mutex::new(Cell::new(HeldRecords::NONE)),
            tx_requested: AtomicBool::new(DEFAULT_TX_REQUESTED),
            rx_forward: AtomicBool::new(DEFAULT_RX_FORWARD),
            wake: Signal::new(),
        }
    }

    /// Current state, `None` if the stored byte names no state
    #[must_use]
    pub fn state(&self) -> Option<TrxState> {
        TrxState::from_raw(self.raw_state())
    }

    /// Stored state byte
    #[must_use]
    pub fn raw_state(&self) -> u8 {
        self.observe().raw()
    }

    pub(crate) fn observe(&self) -> Posted {
        Posted(self.state.load(Ordering::Acquire))
    }

    /// Enter a non-idle state (notifier side)
    pub(crate) fn post(&self, state: TrxState) {
        debug_assert!(state != TrxState::Idle);
        let next = |word: u32| {
            Some((word & !STATE_MASK).wrapping_add(POST_INCREMENT) | u32::from(state.as_raw()))
        };
        // The closure never declines, so this cannot fail
        let _ = self
            .state
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, next);
    }

    /// Return to idle from `seen` (processor side)
    ///
    /// Returns `false` if the notifier posted anything since `seen` was
    /// observed, including the same state again; that post is kept for the
    /// next pass.
    pub(crate) fn complete(&self, seen: Posted) -> bool {
        self.state
            .compare_exchange(seen.0, seen.idle(), Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Event flags behind the most recent error
    #[must_use]
    pub fn pending_error(&self) -> RadioEvents {
        critical_section::with(|cs| self.pending_error.borrow(cs).get())
    }

    pub(crate) fn set_pending_error(&self, events: RadioEvents) {
        critical_section::with(|cs| self.pending_error.borrow(cs).set(events));
    }

    /// Status of the most recent calibration request
    #[must_use]
    pub fn calibration_result(&self) -> RadioStatus {
        status_from_code(self.calibration.load(Ordering::Acquire))
    }

    pub(crate) fn set_calibration_result(&self, status: RadioStatus) {
        self.calibration.store(status_code(status), Ordering::Release);
    }

    /// Record a hold taken by the notifier.
    ///
    /// Returns `true` if earlier holds were still waiting to be drained;
    /// they stay queued and are released by the next drain.
    pub(crate) fn push_held(&self, handle: RxPacketHandle) -> bool {
        critical_section::with(|cs| {
            let cell = self.held_rx.borrow(cs);
            let held = cell.get();
            cell.set(HeldRecords {
                newest: handle,
                count: held.count.saturating_add(1),
            });
            held.count > 0
        })
    }

    /// Holds waiting to be drained
    #[must_use]
    pub fn held_records(&self) -> HeldRecords {
        critical_section::with(|cs| self.held_rx.borrow(cs).get())
    }

    /// Take every hold recorded so far, leaving none behind
    pub(crate) fn take_held(&self) -> HeldRecords {
        critical_section::with(|cs| self.held_rx.borrow(cs).replace(HeldRecords::NONE))
    }

    /// Ask the processor to transmit the next time it is idle
    pub fn request_tx(&self) {
        self.tx_requested.store(true, Ordering::Release);
        self.wake();
    }

    /// Check if a transmission has been requested
    #[must_use]
    pub fn tx_requested(&self) -> bool {
        self.tx_requested.load(Ordering::Acquire)
    }

    /// Consume the transmit request
    pub(crate) fn take_tx_request(&self) -> bool {
        self.tx_requested.load(Ordering::Acquire) && self.tx_requested.swap(false, Ordering::AcqRel)
    }

    /// Enable or disable forwarding of received packets to the console
    pub fn set_rx_forward(&self, enabled: bool) {
        self.rx_forward.store(enabled, Ordering::Release);
    }

    /// Check if received packets are forwarded
    #[must_use]
    pub fn rx_forward_enabled(&self) -> bool {
        self.rx_forward.load(Ordering::Acquire)
    }

    /// Check the processor has nothing to do
    #[must_use]
    pub fn is_quiescent(&self) -> bool {
        self.raw_state() == TrxState::Idle.as_raw() && !self.tx_requested()
    }

    /// Wake the processing task
    pub(crate) fn wake(&self) {
        self.wake.signal(());
    }

    /// Wait until the notifier or an input trigger signals new work
    pub async fn wait_for_work(&self) {
        self.wake.wait().await;
    }

    #[cfg(test)]
    pub(crate) fn force_raw_state(&self, raw: u8) {
        let word = self.state.load(Ordering::Acquire);
        self.state
            .store((word & !STATE_MASK) | u32::from(raw), Ordering::Release);
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}
