//! Shared fixtures for the host test-suite.

#![allow(dead_code)]

use simple_trx::hal::gpio::{Indicators, Led};
use simple_trx::radio::events::RadioEvents;
use simple_trx::radio::notifier::EventNotifier;
use simple_trx::radio::processor::ActionProcessor;
use simple_trx::radio::sim::SimRadio;
use simple_trx::radio::state::SharedState;
use simple_trx::report::{Level, Report, Reporter};

/// Counts LED toggles
#[derive(Debug, Default)]
pub struct Blinks {
    pub receive: u32,
    pub transmit: u32,
}

impl Indicators for Blinks {
    fn toggle(&mut self, led: Led) {
        match led {
            Led::Receive => self.receive += 1,
            Led::Transmit => self.transmit += 1,
        }
    }
}

/// Collects formatted reports
#[derive(Debug, Default)]
pub struct Console {
    pub lines: Vec<(Level, String)>,
}

impl Console {
    pub fn at(&self, level: Level) -> Vec<&str> {
        self.lines
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, line)| line.as_str())
            .collect()
    }

    pub fn infos(&self) -> Vec<&str> {
        self.at(Level::Info)
    }

    pub fn warnings(&self) -> Vec<&str> {
        self.at(Level::Warn)
    }
}

impl Reporter for Console {
    fn report(&mut self, level: Level, report: &Report<'_>) {
        self.lines.push((level, report.to_string()));
    }
}

/// Simulated radio wired to both halves of the core
pub struct Rig<'a> {
    pub radio: SimRadio,
    pub notifier: EventNotifier<'a>,
    pub processor: ActionProcessor<'a, Blinks, Console>,
}

impl<'a> Rig<'a> {
    pub fn new(shared: &'a SharedState) -> Self {
        Self {
            radio: SimRadio::new(),
            notifier: EventNotifier::new(shared),
            processor: ActionProcessor::new(shared, Blinks::default(), Console::default()),
        }
    }

    /// Raise radio events as the interrupt would
    pub fn deliver(&mut self, events: RadioEvents) {
        self.notifier.on_event(&mut self.radio, events);
    }

    /// Receive `bytes` and raise the resulting events
    pub fn receive(&mut self, bytes: &[u8]) {
        let events = self.radio.receive(bytes);
        self.deliver(events);
    }

    /// Finish the in-flight transmission and raise the resulting events
    pub fn finish_tx(&mut self) {
        let events = self.radio.finish_tx();
        self.deliver(events);
    }

    /// One processing pass
    pub fn step(&mut self) {
        self.processor.process(&mut self.radio);
    }

    pub fn console(&self) -> &Console {
        self.processor.reporter()
    }

    pub fn blinks(&self) -> &Blinks {
        self.processor.indicators()
    }
}
