//! Radio Event Flags
//!
//! Bitmask of conditions signalled together by the radio in one callback.

use core::fmt;
use core::ops::{BitAnd, BitOr, BitOrAssign};

/// Set of radio event flags
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RadioEvents(u64);

impl RadioEvents {
    /// No events
    pub const NONE: Self = Self(0);

    /// Averaged RSSI measurement finished
    pub const RSSI_AVERAGE_DONE: Self = Self(1 << 0);
    /// Receive FIFO passed its almost-full threshold
    pub const RX_FIFO_ALMOST_FULL: Self = Self(1 << 2);
    /// A packet was received with a valid CRC
    pub const RX_PACKET_RECEIVED: Self = Self(1 << 3);
    /// Preamble detected
    pub const RX_PREAMBLE_DETECT: Self = Self(1 << 5);
    /// Frame error (bad CRC or framing)
    pub const RX_FRAME_ERROR: Self = Self(1 << 8);
    /// Receive FIFO overflowed
    pub const RX_FIFO_OVERFLOW: Self = Self(1 << 10);
    /// Packet dropped by the address filter
    pub const RX_ADDRESS_FILTERED: Self = Self(1 << 11);
    /// Scheduled receive window was missed
    pub const RX_SCHEDULED_RX_MISSED: Self = Self(1 << 13);
    /// Reception aborted before completion
    pub const RX_PACKET_ABORTED: Self = Self(1 << 14);
    /// Transmit FIFO passed its almost-empty threshold
    pub const TX_FIFO_ALMOST_EMPTY: Self = Self(1 << 22);
    /// A packet was transmitted
    pub const TX_PACKET_SENT: Self = Self(1 << 23);
    /// Transmission aborted
    pub const TX_ABORTED: Self = Self(1 << 25);
    /// Transmission blocked (e.g. by a disabled transmitter)
    pub const TX_BLOCKED: Self = Self(1 << 27);
    /// Transmit FIFO ran dry during transmission
    pub const TX_UNDERFLOW: Self = Self(1 << 29);
    /// Channel was busy, transmission not started
    pub const TX_CHANNEL_BUSY: Self = Self(1 << 32);
    /// Scheduled transmit window was missed
    pub const TX_SCHEDULED_TX_MISSED: Self = Self(1 << 36);
    /// The radio needs calibration
    pub const CAL_NEEDED: Self = Self(1 << 44);

    /// Every event that ends a reception
    pub const RX_COMPLETION: Self = Self(
        Self::RX_PACKET_RECEIVED.0
            | Self::RX_PACKET_ABORTED.0
            | Self::RX_FRAME_ERROR.0
            | Self::RX_FIFO_OVERFLOW.0
            | Self::RX_ADDRESS_FILTERED.0
            | Self::RX_SCHEDULED_RX_MISSED.0,
    );

    /// Every event that ends a transmission
    pub const TX_COMPLETION: Self = Self(
        Self::TX_PACKET_SENT.0
            | Self::TX_ABORTED.0
            | Self::TX_BLOCKED.0
            | Self::TX_UNDERFLOW.0
            | Self::TX_CHANNEL_BUSY.0
            | Self::TX_SCHEDULED_TX_MISSED.0,
    );

    /// Create from raw bits
    #[must_use]
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// Raw bits
    #[must_use]
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Check if no flag is set
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Check if any flag of `other` is set
    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Check if every flag of `other` is set
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Flags set in both
    #[must_use]
    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }
}

impl BitOr for RadioEvents {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for RadioEvents {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for RadioEvents {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        self.intersection(rhs)
    }
}

impl fmt::Debug for RadioEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RadioEvents({:#x})", self.0)
    }
}

impl fmt::Display for RadioEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for RadioEvents {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=u64:#x}", self.0);
    }
}
