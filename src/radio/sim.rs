//! Simulated Radio
//!
//! An in-memory [`RadioPhy`] for host builds. Packets are injected by the
//! caller, which then feeds the returned events to the notifier exactly as
//! the radio interrupt would. Every call is counted and every failure path
//! can be forced.

use heapless::{Deque, Vec};

use crate::config::{fifo_size_u16, FIFO_SIZE};
use crate::radio::events::RadioEvents;
use crate::radio::phy::{HeldRxPacket, RadioPhy};
use crate::types::{Channel, RadioError, RadioStatus, RxPacketHandle, RxPacketInfo, TxOptions};

/// Completed receptions the simulated radio can buffer
pub const SIM_RX_DEPTH: usize = 4;

/// Failures to inject into the next calls
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimFaults {
    /// `hold_rx_packet` returns `INVALID`
    pub hold_invalid: bool,
    /// `rx_packet_info` finds nothing
    pub info_unavailable: bool,
    /// `release_rx_packet` fails with this error
    pub release: Option<RadioError>,
    /// `start_rx` fails with this error
    pub start_rx: Option<RadioError>,
    /// `start_tx` fails with this error
    pub start_tx: Option<RadioError>,
    /// `calibrate` fails with this error
    pub calibrate: Option<RadioError>,
    /// Largest transmit FIFO `set_tx_fifo` will reserve
    pub tx_fifo_limit: u16,
}

impl Default for SimFaults {
    fn default() -> Self {
        Self {
            hold_invalid: false,
            info_unavailable: false,
            release: None,
            start_rx: None,
            start_tx: None,
            calibrate: None,
            tx_fifo_limit: fifo_size_u16(),
        }
    }
}

/// Number of times each radio operation was called
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SimCounters {
    /// `start_rx` calls
    pub start_rx: u32,
    /// `hold_rx_packet` calls
    pub hold: u32,
    /// `release_rx_packet` calls
    pub release: u32,
    /// `copy_rx_packet` calls
    pub copy: u32,
    /// `set_tx_fifo` calls
    pub set_tx_fifo: u32,
    /// `start_tx` calls
    pub start_tx: u32,
    /// `calibrate` calls
    pub calibrate: u32,
}

/// Radio simulated in memory
pub struct SimRadio {
    rx_queue: Deque<(RxPacketHandle, Vec<u8, FIFO_SIZE>), SIM_RX_DEPTH>,
    held: Option<RxPacketHandle>,
    next_handle: u32,
    tx_frame: Vec<u8, FIFO_SIZE>,
    tx_pending: bool,
    rx_channel: Option<Channel>,
    tx_channel: Option<Channel>,
    counters: SimCounters,
    /// Failures to inject
    pub faults: SimFaults,
}

impl SimRadio {
    /// Create an idle radio with no packets
    #[must_use]
    pub fn new() -> Self {
        Self {
            rx_queue: Deque::new(),
            held: None,
            next_handle: RxPacketHandle::OLDEST_COMPLETE.raw() + 1,
            tx_frame: Vec::new(),
            tx_pending: false,
            rx_channel: None,
            tx_channel: None,
            counters: SimCounters::default(),
            faults: SimFaults::default(),
        }
    }

    /// Complete a reception of `bytes`; returns the events the radio raises
    pub fn receive(&mut self, bytes: &[u8]) -> RadioEvents {
        let Ok(packet) = Vec::from_slice(bytes) else {
            return RadioEvents::RX_FIFO_OVERFLOW;
        };
        let handle = RxPacketHandle::from_raw(self.next_handle);
        if self.rx_queue.push_back((handle, packet)).is_err() {
            return RadioEvents::RX_FIFO_OVERFLOW;
        }
        self.next_handle = self
            .next_handle
            .wrapping_add(1)
            .max(RxPacketHandle::OLDEST_COMPLETE.raw() + 1);
        RadioEvents::RX_PACKET_RECEIVED
    }

    /// Finish the pending transmission; returns the events the radio raises
    pub fn finish_tx(&mut self) -> RadioEvents {
        if core::mem::take(&mut self.tx_pending) {
            RadioEvents::TX_PACKET_SENT
        } else {
            RadioEvents::NONE
        }
    }

    /// Completed receptions still buffered in the radio
    #[must_use]
    pub fn buffered_packets(&self) -> usize {
        self.rx_queue.len()
    }

    /// Record currently held for the core
    #[must_use]
    pub const fn held(&self) -> Option<RxPacketHandle> {
        self.held
    }

    /// Frame loaded by the last `set_tx_fifo`
    #[must_use]
    pub fn tx_frame(&self) -> &[u8] {
        &self.tx_frame
    }

    /// Check a transmission is in flight
    #[must_use]
    pub const fn tx_pending(&self) -> bool {
        self.tx_pending
    }

    /// Channel of the last `start_rx`
    #[must_use]
    pub const fn rx_channel(&self) -> Option<Channel> {
        self.rx_channel
    }

    /// Channel of the last `start_tx`
    #[must_use]
    pub const fn tx_channel(&self) -> Option<Channel> {
        self.tx_channel
    }

    /// Call counters
    #[must_use]
    pub const fn counters(&self) -> SimCounters {
        self.counters
    }

    fn packet(&self, handle: RxPacketHandle) -> Option<&(RxPacketHandle, Vec<u8, FIFO_SIZE>)> {
        if handle == RxPacketHandle::OLDEST_COMPLETE {
            self.rx_queue.front()
        } else {
            self.rx_queue.iter().find(|(h, _)| *h == handle)
        }
    }
}

impl Default for SimRadio {
    fn default() -> Self {
        Self::new()
    }
}

impl RadioPhy for SimRadio {
    fn start_rx(&mut self, channel: Channel) -> RadioStatus {
        self.counters.start_rx += 1;
        if let Some(err) = self.faults.start_rx {
            return Err(err);
        }
        self.rx_channel = Some(channel);
        Ok(())
    }

    fn hold_rx_packet(&mut self) -> RxPacketHandle {
        self.counters.hold += 1;
        if self.faults.hold_invalid {
            return RxPacketHandle::INVALID;
        }
        self.held = self.rx_queue.back().map(|(handle, _)| *handle);
        self.held.unwrap_or(RxPacketHandle::INVALID)
    }

    fn rx_packet_info(&mut self, handle: RxPacketHandle) -> Option<RxPacketInfo> {
        if self.faults.info_unavailable {
            return None;
        }
        let (handle, bytes) = self.packet(handle)?;
        let len = u16::try_from(bytes.len()).ok()?;
        Some(RxPacketInfo::new(*handle, len))
    }

    fn copy_rx_packet(&mut self, dest: &mut [u8], info: &RxPacketInfo) {
        self.counters.copy += 1;
        if let Some((_, bytes)) = self.packet(info.handle) {
            let len = dest.len().min(bytes.len());
            dest[..len].copy_from_slice(&bytes[..len]);
        }
    }

    fn release_rx_packet(&mut self, packet: HeldRxPacket) -> RadioStatus {
        self.counters.release += 1;
        if let Some(err) = self.faults.release {
            return Err(err);
        }
        let handle = packet.handle();
        let before = self.rx_queue.len();
        for _ in 0..before {
            if let Some(entry) = self.rx_queue.pop_front() {
                if entry.0 != handle {
                    // Capacity is unchanged, so this cannot fail
                    let _ = self.rx_queue.push_back(entry);
                }
            }
        }
        if self.held == Some(handle) {
            self.held = None;
        }
        if self.rx_queue.len() < before {
            Ok(())
        } else {
            Err(RadioError::InvalidParameter)
        }
    }

    fn set_tx_fifo(&mut self, fifo: &[u8], payload_len: u16, fifo_size: u16) -> u16 {
        self.counters.set_tx_fifo += 1;
        let allocated = fifo_size.min(self.faults.tx_fifo_limit);
        let len = usize::from(payload_len).min(fifo.len()).min(usize::from(allocated));
        self.tx_frame.clear();
        // `len` is bounded by the FIFO size
        let _ = self.tx_frame.extend_from_slice(&fifo[..len]);
        allocated
    }

    fn start_tx(&mut self, channel: Channel, _options: TxOptions) -> RadioStatus {
        self.counters.start_tx += 1;
        if let Some(err) = self.faults.start_tx {
            return Err(err);
        }
        self.tx_channel = Some(channel);
        self.tx_pending = true;
        Ok(())
    }

    fn calibrate(&mut self) -> RadioStatus {
        self.counters.calibrate += 1;
        match self.faults.calibrate {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
