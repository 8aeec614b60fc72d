//! Radio Capability
//!
//! The operations the core needs from the radio driver. Implemented by the
//! board's radio layer; [`crate::radio::sim::SimRadio`] implements it in
//! memory for host builds.

use crate::types::{Channel, RadioStatus, RxPacketHandle, RxPacketInfo, TxOptions};

/// Receive record held in the radio on behalf of the core
///
/// Created from the handle stored by the notifier and consumed by
/// [`RadioPhy::release_rx_packet`], so a record is released at most once.
#[must_use = "a held receive record must be released"]
#[derive(Debug, PartialEq, Eq)]
pub struct HeldRxPacket {
    handle: RxPacketHandle,
}

impl HeldRxPacket {
    /// Wrap a valid held handle
    pub(crate) const fn new(handle: RxPacketHandle) -> Self {
        Self { handle }
    }

    /// Handle of the held record
    #[must_use]
    pub const fn handle(&self) -> RxPacketHandle {
        self.handle
    }
}

/// Radio operations used by the transceiver core
///
/// The event callback and the processing task both drive the radio, so
/// the board implements this trait on a handle both contexts can own a
/// copy of: a `Copy` driver handle (the vendor radio handle is a plain
/// pointer-sized value), or a reference to the driver behind a
/// `critical_section::Mutex<RefCell<_>>`. One copy goes to
/// [`crate::task::run`], the other stays with the interrupt that calls
/// [`crate::radio::notifier::EventNotifier::on_event`].
///
/// ```ignore
/// #[derive(Clone, Copy)]
/// struct BoardRadio(&'static Mutex<RefCell<Driver>>);
///
/// impl RadioPhy for BoardRadio {
///     fn start_rx(&mut self, channel: Channel) -> RadioStatus {
///         critical_section::with(|cs| self.0.borrow_ref_mut(cs).start_rx(channel))
///     }
///     // ...
/// }
/// ```
pub trait RadioPhy {
    /// Enter receive on `channel`
    fn start_rx(&mut self, channel: Channel) -> RadioStatus;

    /// Keep the most recently completed reception in the radio buffer.
    /// Returns [`RxPacketHandle::INVALID`] if there is none.
    ///
    /// Called from the event callback; must not block.
    fn hold_rx_packet(&mut self) -> RxPacketHandle;

    /// Metadata for the record selected by `handle`
    /// (typically [`RxPacketHandle::OLDEST_COMPLETE`])
    fn rx_packet_info(&mut self, handle: RxPacketHandle) -> Option<RxPacketInfo>;

    /// Copy the record described by `info` into `dest`, which is at most
    /// `info.len()` bytes long
    fn copy_rx_packet(&mut self, dest: &mut [u8], info: &RxPacketInfo);

    /// Give a held record back to the radio
    fn release_rx_packet(&mut self, packet: HeldRxPacket) -> RadioStatus;

    /// Point the transmit path at `fifo`, of which the first `payload_len`
    /// bytes are the frame. Returns the FIFO size the radio reserved.
    fn set_tx_fifo(&mut self, fifo: &[u8], payload_len: u16, fifo_size: u16) -> u16;

    /// Transmit the loaded frame on `channel`
    fn start_tx(&mut self, channel: Channel, options: TxOptions) -> RadioStatus;

    /// Run all pending calibrations.
    ///
    /// Called from the event callback; must not block.
    fn calibrate(&mut self) -> RadioStatus;
}
