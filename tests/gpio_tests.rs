//! GPIO Tests
//!
//! Indicator LEDs and the debounced transmit button against mock pins.
//! Run with: cargo test --no-default-features --features std --test gpio_tests

use core::convert::Infallible;

use embedded_hal::digital::{ErrorKind, ErrorType, InputPin, OutputPin, StatefulOutputPin};
use simple_trx::hal::gpio::{ButtonState, Indicators, Led, LedState, StatusLeds, TxButton};

/// Output pin remembering its level
#[derive(Debug, Default)]
struct MockLed {
    high: bool,
}

impl ErrorType for MockLed {
    type Error = Infallible;
}

impl OutputPin for MockLed {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.high = true;
        Ok(())
    }
}

impl StatefulOutputPin for MockLed {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.high)
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.high)
    }
}

/// Output pin whose every access fails
struct BrokenLed;

impl ErrorType for BrokenLed {
    type Error = ErrorKind;
}

impl OutputPin for BrokenLed {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Err(ErrorKind::Other)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Err(ErrorKind::Other)
    }
}

impl StatefulOutputPin for BrokenLed {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Err(ErrorKind::Other)
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Err(ErrorKind::Other)
    }
}

/// Input pin replaying a scripted level, held at the last one
struct MockButton {
    levels: Vec<bool>,
    pos: usize,
}

impl MockButton {
    /// `true` = pressed (pin low)
    fn pressed(levels: &[bool]) -> Self {
        Self {
            levels: levels.to_vec(),
            pos: 0,
        }
    }

    fn next_pressed(&mut self) -> bool {
        let level = self.levels[self.pos.min(self.levels.len() - 1)];
        self.pos += 1;
        level
    }
}

impl ErrorType for MockButton {
    type Error = Infallible;
}

impl InputPin for MockButton {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.next_pressed())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.next_pressed())
    }
}

fn sample<B: InputPin>(button: &mut TxButton<B>, n: usize) -> Vec<Option<ButtonState>> {
    (0..n).map(|_| button.update()).collect()
}

// ============================================================================
// LEDs
// ============================================================================

#[test]
fn two_leds_toggle_independently() {
    let mut leds = StatusLeds::new(MockLed::default(), MockLed::default());

    leds.toggle(Led::Receive);
    assert_eq!(leds.state(Led::Receive), LedState::On);
    assert_eq!(leds.state(Led::Transmit), LedState::Off);

    leds.toggle(Led::Transmit);
    leds.toggle(Led::Receive);
    assert_eq!(leds.state(Led::Receive), LedState::Off);
    assert_eq!(leds.state(Led::Transmit), LedState::On);

    let (led0, led1) = leds.release();
    assert!(!led0.high);
    assert!(led1.expect("second LED").high);
}

#[test]
fn single_led_serves_both_indicators() {
    let mut leds = StatusLeds::single(MockLed::default());

    leds.toggle(Led::Transmit);
    assert_eq!(leds.state(Led::Receive), LedState::On);

    leds.toggle(Led::Receive);
    assert_eq!(leds.state(Led::Transmit), LedState::Off);

    let (led0, led1) = leds.release();
    assert!(!led0.high);
    assert!(led1.is_none());
}

#[test]
fn failed_toggle_keeps_tracked_state() {
    let mut leds = StatusLeds::new(MockLed::default(), BrokenLed);

    leds.toggle(Led::Transmit);
    leds.toggle(Led::Receive);

    assert_eq!(leds.state(Led::Transmit), LedState::Off);
    assert_eq!(leds.state(Led::Receive), LedState::On);
}

#[test]
fn led_state_toggle() {
    assert_eq!(LedState::Off.toggle(), LedState::On);
    assert_eq!(LedState::On.toggle(), LedState::Off);
    assert_eq!(LedState::default(), LedState::Off);
}

// ============================================================================
// Button
// ============================================================================

#[test]
fn idle_button_reports_nothing() {
    let mut button = TxButton::new(MockButton::pressed(&[false]));

    assert!(sample(&mut button, 10).iter().all(Option::is_none));
    assert_eq!(button.state(), ButtonState::Released);
}

#[test]
fn press_is_reported_once_after_debounce() {
    let mut button = TxButton::new(MockButton::pressed(&[true]));

    let events = sample(&mut button, 8);

    assert_eq!(events[..3], [None, None, None]);
    assert_eq!(events[3], Some(ButtonState::Pressed));
    assert!(events[4..].iter().all(Option::is_none));
    assert!(button.is_pressed());
}

#[test]
fn release_is_reported_after_press() {
    let mut levels = vec![true; 5];
    levels.extend([false; 5]);
    let mut button = TxButton::new(MockButton::pressed(&levels));

    let events: Vec<ButtonState> = sample(&mut button, 10).into_iter().flatten().collect();

    assert_eq!(events, vec![ButtonState::Pressed, ButtonState::Released]);
    assert!(!button.is_pressed());
}

#[test]
fn bounce_is_filtered() {
    let mut button = TxButton::new(MockButton::pressed(&[
        true, false, true, false, true, false, false, false,
    ]));

    assert!(sample(&mut button, 8).iter().all(Option::is_none));
    assert_eq!(button.state(), ButtonState::Released);
}
