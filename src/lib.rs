//! Simple TRX Radio Core
//!
//! This library provides the receive/transmit coordination core for an
//! interrupt-driven packet radio. A hardware event callback and a
//! cooperative processing task share a single pending state; the callback
//! records what happened, the task does the work and returns the machine to
//! idle.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    APPLICATION LAYER                         │
//! │  Processing task  │  Button task  │  CLI commands            │
//! ├─────────────────────────────────────────────────────────────┤
//! │                      CORE LAYER                              │
//! │  Action Processor  ◄── SharedState ──  Event Notifier        │
//! ├─────────────────────────────────────────────────────────────┤
//! │                   CAPABILITY TRAITS                          │
//! │  RadioPhy  │  Indicators  │  Reporter  │  embedded-hal pins  │
//! ├─────────────────────────────────────────────────────────────┤
//! │                    RTOS / SCHEDULER                          │
//! │           embassy-rs (async/await executor)                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Design Principles
//!
//! - **Single writer per direction**: only the notifier leaves `Idle`,
//!   only the processor returns to it
//! - **No locks on the hot path**: the state is a single atomic byte
//! - **Explicit ownership**: a held receive record is a token that must be
//!   released exactly once
//! - **No unsafe in application code**

#![cfg_attr(feature = "embedded", no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Hardware Abstraction Layer
///
/// Indicator LEDs and the transmit button over `embedded-hal` pins.
pub mod hal;

/// Radio Control Logic
///
/// Event notifier, action processor and the state they share.
pub mod radio;

/// Diagnostic reporting
///
/// Messages emitted by the core and the sinks that print them.
pub mod report;

/// Communication Protocols
///
/// Line-oriented command interface for the transmit and forward flags.
pub mod protocol;

/// Task loops
///
/// Async drivers for the processing loop and the button.
pub mod task;

/// Shared types used across modules
pub mod types;

/// System configuration and constants
pub mod config;

/// Prelude module for common imports
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::config::*;
    pub use crate::types::*;

    pub use crate::hal::gpio::{ButtonState, Indicators, Led, StatusLeds, TxButton};
    pub use crate::radio::events::RadioEvents;
    pub use crate::radio::notifier::EventNotifier;
    pub use crate::radio::phy::{HeldRxPacket, RadioPhy};
    pub use crate::radio::processor::ActionProcessor;
    pub use crate::radio::state::{SharedState, TrxState};
    pub use crate::report::{Level, Report, Reporter};

    // Logging
    #[cfg(feature = "embedded")]
    pub use defmt::{debug, error, info, trace, warn};
}
