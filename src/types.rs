//! Shared types used across the transceiver core
//!
//! This module defines the small domain types exchanged with the radio
//! layer: channels, receive handles, transmit options and status codes.

use core::fmt;

/// Radio channel index
///
/// Selects one entry of the radio's configured channel plan. The core never
/// interprets it, it only passes it back to the radio.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Channel(u16);

impl Channel {
    /// Create a channel from its index
    #[must_use]
    pub const fn new(index: u16) -> Self {
        Self(index)
    }

    /// Get the channel index
    #[must_use]
    pub const fn index(self) -> u16 {
        self.0
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ch{}", self.0)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Channel {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "ch{}", self.0);
    }
}

/// Opaque reference to a completed reception held by the radio
///
/// Handles are plain values; ownership of a *held* record is expressed by
/// [`crate::radio::phy::HeldRxPacket`], not by this type.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct RxPacketHandle(u32);

impl RxPacketHandle {
    /// No such packet exists
    pub const INVALID: Self = Self(0);

    /// Selector for the oldest completely received packet
    pub const OLDEST_COMPLETE: Self = Self(1);

    /// Create a handle from a raw radio value
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw radio value
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Check the handle refers to a packet
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != Self::INVALID.0
    }
}

impl fmt::Debug for RxPacketHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "RxPacketHandle({:#x})", self.0)
        } else {
            f.write_str("RxPacketHandle(INVALID)")
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for RxPacketHandle {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "rx#{=u32:#x}", self.0);
    }
}

/// Metadata of a completed reception
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RxPacketInfo {
    /// Handle of the record the metadata describes
    pub handle: RxPacketHandle,
    /// Number of bytes received
    pub packet_bytes: u16,
}

impl RxPacketInfo {
    /// Create packet metadata
    #[must_use]
    pub const fn new(handle: RxPacketHandle, packet_bytes: u16) -> Self {
        Self {
            handle,
            packet_bytes,
        }
    }

    /// Packet length as a buffer length
    #[must_use]
    pub const fn len(&self) -> usize {
        self.packet_bytes as usize
    }

    /// Check if the packet carries no bytes
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.packet_bytes == 0
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for RxPacketInfo {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "RxInfo({}, {} bytes)", self.handle, self.packet_bytes);
    }
}

/// Transmit option bits
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct TxOptions(u32);

impl TxOptions {
    /// Radio default transmit behaviour
    pub const DEFAULT: Self = Self(0);

    /// Create options from raw bits
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Get the raw option bits
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }
}

/// Failure status reported by a radio call
///
/// Success is `Ok(())`; the numeric codes follow the radio's status
/// enumeration where `0` means no error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RadioError {
    /// A parameter was out of range
    InvalidParameter,
    /// The radio is not in a state that allows the call
    InvalidState,
    /// The call is not valid in this configuration
    InvalidCall,
    /// The radio is suspended (e.g. another protocol owns it)
    Suspended,
    /// The radio scheduler rejected the operation
    SchedulerError,
    /// A status code this core does not name
    Other(u8),
}

impl RadioError {
    /// Status code of this error
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::InvalidParameter => 1,
            Self::InvalidState => 2,
            Self::InvalidCall => 3,
            Self::Suspended => 4,
            Self::SchedulerError => 5,
            Self::Other(code) => code,
        }
    }

    /// Map a status code to an error, `None` for the success code
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => None,
            1 => Some(Self::InvalidParameter),
            2 => Some(Self::InvalidState),
            3 => Some(Self::InvalidCall),
            4 => Some(Self::Suspended),
            5 => Some(Self::SchedulerError),
            other => Some(Self::Other(other)),
        }
    }
}

impl fmt::Display for RadioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InvalidParameter => "invalid parameter",
            Self::InvalidState => "invalid state",
            Self::InvalidCall => "invalid call",
            Self::Suspended => "suspended",
            Self::SchedulerError => "scheduler error",
            Self::Other(_) => "error",
        };
        write!(f, "{name} ({})", self.code())
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for RadioError {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "RadioError({=u8})", self.code());
    }
}

/// Result of a radio call that returns only a status
pub type RadioStatus = Result<(), RadioError>;

/// Status code of a radio call result (`0` on success)
#[must_use]
pub const fn status_code(status: RadioStatus) -> u8 {
    match status {
        Ok(()) => 0,
        Err(err) => err.code(),
    }
}

/// Radio call result from a status code
#[must_use]
pub const fn status_from_code(code: u8) -> RadioStatus {
    match RadioError::from_code(code) {
        None => Ok(()),
        Some(err) => Err(err),
    }
}
