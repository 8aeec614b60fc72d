//! Command Line Protocol
//!
//! Line-oriented console commands that drive the two external flags:
//!
//! | Command       | Effect                                   |
//! |---------------|------------------------------------------|
//! | `send`        | request one transmission                 |
//! | `receive 1/0` | enable/disable forwarding of RX packets  |
//! | `receive`     | read the forwarding setting              |
//! | `status`      | print machine state and flags            |

use core::fmt::Write;

use heapless::{String, Vec};

use crate::config::{CLI_BUFFER_SIZE, CLI_RESPONSE_SIZE};
use crate::radio::state::SharedState;

/// Maximum length of a reported unknown command name
pub const MAX_NAME_LEN: usize = 16;

/// CLI line parser
pub struct CliParser {
    /// Line buffer
    buffer: Vec<u8, CLI_BUFFER_SIZE>,
}

impl CliParser {
    /// Create a new CLI parser
    #[must_use]
    pub const fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Feed a byte to the parser
    /// Returns a command if a line is complete
    pub fn feed(&mut self, byte: u8) -> Option<CliCommand> {
        if byte == b'\r' || byte == b'\n' {
            let cmd = self.parse_buffer();
            self.buffer.clear();
            cmd
        } else {
            let _ = self.buffer.push(byte);

            // Prevent overflow
            if self.buffer.len() >= CLI_BUFFER_SIZE {
                self.buffer.clear();
            }

            None
        }
    }

    /// Parse the current buffer as a command
    fn parse_buffer(&self) -> Option<CliCommand> {
        let line = core::str::from_utf8(&self.buffer).ok()?;
        let mut words = line.split_ascii_whitespace();
        let name = words.next()?;
        let arg = words.next();

        let cmd = match name {
            "send" => CliCommand::Send,
            "receive" => match arg {
                None => CliCommand::ReadReceive,
                Some("1") => CliCommand::SetReceive(true),
                Some("0") => CliCommand::SetReceive(false),
                Some(_) => CliCommand::InvalidArgument,
            },
            "status" => CliCommand::Status,
            other => CliCommand::Unknown(
                other
                    .chars()
                    .filter(char::is_ascii)
                    .take(MAX_NAME_LEN)
                    .collect(),
            ),
        };
        Some(cmd)
    }

    /// Clear the buffer
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

impl Default for CliParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Command parsed from a console line
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CliCommand {
    /// Request one transmission
    Send,
    /// Read whether received packets are forwarded
    ReadReceive,
    /// Enable or disable forwarding of received packets
    SetReceive(bool),
    /// Print state and flags
    Status,
    /// Known command with an argument it does not accept
    InvalidArgument,
    /// Unknown command
    Unknown(String<MAX_NAME_LEN>),
}

#[cfg(feature = "embedded")]
impl defmt::Format for CliCommand {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Send => defmt::write!(f, "Send"),
            Self::ReadReceive => defmt::write!(f, "ReadReceive"),
            Self::SetReceive(on) => defmt::write!(f, "SetReceive({})", on),
            Self::Status => defmt::write!(f, "Status"),
            Self::InvalidArgument => defmt::write!(f, "InvalidArgument"),
            Self::Unknown(name) => defmt::write!(f, "Unknown({=str})", name.as_str()),
        }
    }
}

impl CliCommand {
    /// Apply the command to the shared flags and format the reply
    pub fn apply(&self, shared: &SharedState, response: &mut CliResponse) {
        match self {
            Self::Send => {
                shared.request_tx();
                response.text("Send packet request");
            }
            Self::ReadReceive => response.receive(shared.rx_forward_enabled()),
            Self::SetReceive(on) => {
                shared.set_rx_forward(*on);
                response.receive(*on);
            }
            Self::Status => response.status(shared),
            Self::InvalidArgument => response.text("Invalid argument, use 0 or 1"),
            Self::Unknown(name) => response.unknown(name),
        }
    }
}

/// CLI response formatter
pub struct CliResponse {
    buffer: String<CLI_RESPONSE_SIZE>,
}

impl CliResponse {
    /// Create a new response formatter
    #[must_use]
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
        }
    }

    fn text(&mut self, text: &str) {
        self.buffer.clear();
        let _ = self.buffer.push_str(text);
    }

    /// Format the forwarding setting
    pub fn receive(&mut self, on: bool) {
        self.buffer.clear();
        let setting = if on { "ON" } else { "OFF" };
        let _ = write!(self.buffer, "Received packets: {setting}");
    }

    /// Format machine state and flags
    pub fn status(&mut self, shared: &SharedState) {
        self.buffer.clear();
        let raw = shared.raw_state();
        let _ = match shared.state() {
            Some(state) => write!(self.buffer, "state={}", state.name()),
            None => write!(self.buffer, "state={raw}"),
        };
        let _ = write!(
            self.buffer,
            " tx_requested={} rx_forward={}",
            u8::from(shared.tx_requested()),
            u8::from(shared.rx_forward_enabled())
        );
    }

    /// Format an unknown command reply
    pub fn unknown(&mut self, name: &str) {
        self.buffer.clear();
        let _ = write!(self.buffer, "Unknown command: {name}");
    }

    /// Get the response string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Get the response bytes
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.buffer.as_bytes()
    }

    /// Clear the buffer
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

impl Default for CliResponse {
    fn default() -> Self {
        Self::new()
    }
}
