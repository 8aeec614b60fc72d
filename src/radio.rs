//! Radio Control Logic
//!
//! The two halves of the transceiver core and the state they share.
//! [`notifier`] runs in the radio's event callback, [`processor`] runs in
//! the processing task; [`state`] is the only thing they both touch.

pub mod events;
pub mod fifo;
pub mod notifier;
pub mod phy;
pub mod processor;
pub mod sim;
pub mod state;
