//! GPIO Abstractions
//!
//! Type-safe wrappers for the transceiver's indicator LEDs and transmit
//! button. Provides semantic meaning to pins through the type system.

use embedded_hal::digital::{InputPin, StatefulOutputPin};

use crate::config::BUTTON_DEBOUNCE_READS;

/// Indicator LED
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Led {
    /// Blinks on every received packet (LED0)
    Receive,
    /// Blinks on every sent packet (LED1, or LED0 when only one is fitted)
    Transmit,
}

#[cfg(feature = "embedded")]
impl defmt::Format for Led {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Receive => defmt::write!(f, "LED-RX"),
            Self::Transmit => defmt::write!(f, "LED-TX"),
        }
    }
}

/// Visual indicator capability
pub trait Indicators {
    /// Toggle one indicator
    fn toggle(&mut self, led: Led);
}

impl<T: Indicators + ?Sized> Indicators for &mut T {
    fn toggle(&mut self, led: Led) {
        (**self).toggle(led);
    }
}

/// LED state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LedState {
    /// LED is off
    #[default]
    Off,
    /// LED is on
    On,
}

impl LedState {
    /// Toggle the LED state
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Off => Self::On,
            Self::On => Self::Off,
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for LedState {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Off => defmt::write!(f, "OFF"),
            Self::On => defmt::write!(f, "ON"),
        }
    }
}

/// Receive and transmit status LEDs
///
/// The transmit LED is optional; boards with a single LED blink it for both.
pub struct StatusLeds<P0, P1 = P0> {
    led0: P0,
    led1: Option<P1>,
    state: [LedState; 2],
}

impl<P0: StatefulOutputPin> StatusLeds<P0, P0> {
    /// Board with a single LED
    pub fn single(led0: P0) -> Self {
        Self {
            led0,
            led1: None,
            state: [LedState::Off; 2],
        }
    }
}

impl<P0: StatefulOutputPin, P1: StatefulOutputPin> StatusLeds<P0, P1> {
    /// Board with separate receive and transmit LEDs
    pub fn new(led0: P0, led1: P1) -> Self {
        Self {
            led0,
            led1: Some(led1),
            state: [LedState::Off; 2],
        }
    }

    /// Tracked state of an indicator
    #[must_use]
    pub const fn state(&self, led: Led) -> LedState {
        self.state[self.slot(led)]
    }

    /// Release the pins
    pub fn release(self) -> (P0, Option<P1>) {
        (self.led0, self.led1)
    }

    const fn slot(&self, led: Led) -> usize {
        match (led, self.led1.is_some()) {
            (Led::Transmit, true) => 1,
            _ => 0,
        }
    }
}

impl<P0: StatefulOutputPin, P1: StatefulOutputPin> Indicators for StatusLeds<P0, P1> {
    fn toggle(&mut self, led: Led) {
        let slot = self.slot(led);
        // Pin errors leave the tracked state unchanged
        let toggled = match (slot, self.led1.as_mut()) {
            (1, Some(led1)) => led1.toggle().is_ok(),
            _ => self.led0.toggle().is_ok(),
        };
        if toggled {
            self.state[slot] = self.state[slot].toggle();
        }
    }
}

/// Transmit button state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonState {
    /// Button is released
    Released,
    /// Button is pressed
    Pressed,
}

#[cfg(feature = "embedded")]
impl defmt::Format for ButtonState {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Released => defmt::write!(f, "Released"),
            Self::Pressed => defmt::write!(f, "Pressed"),
        }
    }
}

/// Transmit push button with debouncing (active low)
pub struct TxButton<B> {
    pin: B,
    state: ButtonState,
    last_raw: bool,
    debounce_count: u8,
}

impl<B: InputPin> TxButton<B> {
    /// Create a button on an input with pull-up
    pub fn new(pin: B) -> Self {
        Self {
            pin,
            state: ButtonState::Released,
            last_raw: false,
            debounce_count: 0,
        }
    }

    /// Sample the pin (call periodically).
    /// Returns the new state when a debounced change happens.
    pub fn update(&mut self) -> Option<ButtonState> {
        // A pin read error counts as released
        let pressed = self.pin.is_low().unwrap_or(false);

        if pressed == self.last_raw {
            if self.debounce_count < BUTTON_DEBOUNCE_READS {
                self.debounce_count += 1;
            }
        } else {
            self.debounce_count = 0;
            self.last_raw = pressed;
        }

        if self.debounce_count >= BUTTON_DEBOUNCE_READS {
            let new_state = if pressed {
                ButtonState::Pressed
            } else {
                ButtonState::Released
            };

            if new_state != self.state {
                self.state = new_state;
                return Some(new_state);
            }
        }

        None
    }

    /// Get current state
    #[must_use]
    pub const fn state(&self) -> ButtonState {
        self.state
    }

    /// Check if pressed
    #[must_use]
    pub const fn is_pressed(&self) -> bool {
        matches!(self.state, ButtonState::Pressed)
    }
}
