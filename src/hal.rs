//! Hardware Abstraction Layer
//!
//! Board peripherals the core drives directly: status LEDs and the
//! transmit button. Written against `embedded-hal` so any HAL's pins fit.

pub mod gpio;
