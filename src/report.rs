//! Diagnostic Reporting
//!
//! Everything the core prints goes through [`Reporter`] as a [`Report`].
//! Fatal conditions are not reports; they panic.

use core::fmt;

use crate::radio::events::RadioEvents;
use crate::types::{status_code, RadioError, RadioStatus};

/// Report severity
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    /// Normal operation
    Info,
    /// Something failed but processing continues
    Warn,
}

#[cfg(feature = "embedded")]
impl defmt::Format for Level {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Info => defmt::write!(f, "INFO"),
            Self::Warn => defmt::write!(f, "WARN"),
        }
    }
}

/// Message emitted by the action processor
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Report<'a> {
    /// Received payload, forwarded to the console
    PacketReceived(&'a [u8]),
    /// Transmission completed
    PacketSent,
    /// Transmission started
    TxStarted,
    /// Reception failed with these events
    RxError(RadioEvents),
    /// Transmission failed with these events
    TxError(RadioEvents),
    /// Calibration failed
    CalibrationError {
        /// Pending error events
        events: RadioEvents,
        /// Last calibration status
        status: RadioStatus,
    },
    /// The state byte named no known state
    UnexpectedState(u8),
    /// No completed receive record was available to copy
    RxInfoUnavailable,
    /// Releasing a held receive record failed
    ReleaseFailed(RadioError),
    /// Re-entering receive failed
    StartRxFailed(RadioError),
    /// Starting a transmission failed
    StartTxFailed(RadioError),
}

/// Formats bytes as `0x0F, 0x16, ...`
struct HexBytes<'a>(&'a [u8]);

impl fmt::Display for HexBytes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "0x{byte:02X}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PacketReceived(bytes) => {
                write!(f, "Packet has been received: {}", HexBytes(bytes))
            }
            Self::PacketSent => f.write_str("Packet has been sent"),
            Self::TxStarted => f.write_str("Send a message"),
            Self::RxError(events) => write!(f, "Radio RX Error occurred, events: {events}"),
            Self::TxError(events) => write!(f, "Radio TX Error occurred, events: {events}"),
            Self::CalibrationError { events, status } => write!(
                f,
                "Radio Calibration Error occurred, events: {events}, calibrate() result: {}",
                status_code(*status)
            ),
            Self::UnexpectedState(raw) => write!(f, "Unexpected TRX state: {raw}"),
            Self::RxInfoUnavailable => {
                f.write_str("rx_packet_info() error: no completed packet")
            }
            Self::ReleaseFailed(err) => write!(f, "release_rx_packet() result: {err}"),
            Self::StartRxFailed(err) => write!(f, "start_rx() result: {err}"),
            Self::StartTxFailed(err) => write!(f, "start_tx() result: {err}"),
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Report<'_> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::PacketReceived(bytes) => {
                defmt::write!(f, "Packet has been received: {=[u8]:#x}", bytes);
            }
            Self::PacketSent => defmt::write!(f, "Packet has been sent"),
            Self::TxStarted => defmt::write!(f, "Send a message"),
            Self::RxError(events) => defmt::write!(f, "Radio RX Error occurred, events: {}", events),
            Self::TxError(events) => defmt::write!(f, "Radio TX Error occurred, events: {}", events),
            Self::CalibrationError { events, status } => defmt::write!(
                f,
                "Radio Calibration Error occurred, events: {}, calibrate() result: {=u8}",
                events,
                status_code(*status)
            ),
            Self::UnexpectedState(raw) => defmt::write!(f, "Unexpected TRX state: {=u8}", raw),
            Self::RxInfoUnavailable => defmt::write!(f, "rx_packet_info() error: no completed packet"),
            Self::ReleaseFailed(err) => defmt::write!(f, "release_rx_packet() result: {}", err),
            Self::StartRxFailed(err) => defmt::write!(f, "start_rx() result: {}", err),
            Self::StartTxFailed(err) => defmt::write!(f, "start_tx() result: {}", err),
        }
    }
}

/// Sink for diagnostic reports
pub trait Reporter {
    /// Emit one report
    fn report(&mut self, level: Level, report: &Report<'_>);
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn report(&mut self, level: Level, report: &Report<'_>) {
        (**self).report(level, report);
    }
}

/// Reporter printing one line per report to a text sink (UART console)
pub struct WriteReporter<W> {
    sink: W,
}

impl<W: fmt::Write> WriteReporter<W> {
    /// Wrap a text sink
    pub const fn new(sink: W) -> Self {
        Self { sink }
    }

    /// Get the sink back
    pub fn into_inner(self) -> W {
        self.sink
    }

    /// Borrow the sink
    pub const fn sink(&self) -> &W {
        &self.sink
    }
}

impl<W: fmt::Write> Reporter for WriteReporter<W> {
    fn report(&mut self, level: Level, report: &Report<'_>) {
        let prefix = match level {
            Level::Info => "",
            Level::Warn => "WARNING: ",
        };
        // Console output is best effort
        let _ = writeln!(self.sink, "{prefix}{report}");
    }
}

/// Reporter logging through defmt
#[cfg(feature = "embedded")]
#[derive(Clone, Copy, Debug, Default)]
pub struct DefmtReporter;

#[cfg(feature = "embedded")]
impl Reporter for DefmtReporter {
    fn report(&mut self, level: Level, report: &Report<'_>) {
        match level {
            Level::Info => defmt::info!("{}", report),
            Level::Warn => defmt::warn!("{}", report),
        }
    }
}
