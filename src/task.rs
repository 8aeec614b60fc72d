//! Task Loops
//!
//! Async drivers for the transceiver core. The processing loop sleeps on
//! the shared wake signal instead of spinning; the notifier and the input
//! triggers signal it whenever they leave work behind.
//!
//! Spawn them from the board's executor, e.g.
//!
//! ```ignore
//! #[embassy_executor::task]
//! async fn trx_task(radio: BoardRadio, leds: BoardLeds) -> ! {
//!     let processor = ActionProcessor::new(&TRX, leds, DefmtReporter);
//!     simple_trx::task::run(processor, radio).await
//! }
//! ```

use crate::hal::gpio::Indicators;
use crate::radio::phy::RadioPhy;
use crate::radio::processor::ActionProcessor;
use crate::report::Reporter;

#[cfg(feature = "embedded")]
use crate::config::{BUTTON_POLL_MS, CLI_BUFFER_SIZE};
#[cfg(feature = "embedded")]
use crate::hal::gpio::TxButton;
#[cfg(feature = "embedded")]
use crate::protocol::{CliParser, CliResponse};
#[cfg(feature = "embedded")]
use crate::radio::notifier::EventNotifier;
#[cfg(feature = "embedded")]
use crate::radio::state::SharedState;

/// Wait for work if there is none, then run one processing step
pub async fn process_or_wait<R, I, P>(processor: &mut ActionProcessor<'_, I, P>, radio: &mut R)
where
    R: RadioPhy,
    I: Indicators,
    P: Reporter,
{
    let shared = processor.shared();
    if shared.is_quiescent() {
        shared.wait_for_work().await;
    }
    processor.process(radio);
}

/// Perpetual processing loop
pub async fn run<R, I, P>(mut processor: ActionProcessor<'_, I, P>, mut radio: R) -> !
where
    R: RadioPhy,
    I: Indicators,
    P: Reporter,
{
    loop {
        process_or_wait(&mut processor, &mut radio).await;
    }
}

/// Poll the transmit button and forward debounced transitions
#[cfg(feature = "embedded")]
pub async fn button_task<B>(mut button: TxButton<B>, notifier: EventNotifier<'_>) -> !
where
    B: embedded_hal::digital::InputPin,
{
    use embassy_time::{Duration, Timer};

    loop {
        if let Some(state) = button.update() {
            defmt::debug!("button {}", state);
            notifier.on_button(state);
        }
        Timer::after(Duration::from_millis(BUTTON_POLL_MS)).await;
    }
}

/// Serve console commands on a serial port
#[cfg(feature = "embedded")]
pub async fn cli_task<S>(mut serial: S, shared: &SharedState) -> !
where
    S: embedded_io_async::Read + embedded_io_async::Write,
{
    let mut parser = CliParser::new();
    let mut response = CliResponse::new();
    let mut buf = [0u8; CLI_BUFFER_SIZE];

    loop {
        let n = match serial.read(&mut buf).await {
            Ok(n) => n,
            Err(_) => {
                defmt::warn!("console read failed");
                continue;
            }
        };

        for &byte in &buf[..n] {
            let Some(cmd) = parser.feed(byte) else {
                continue;
            };
            defmt::info!("cli {}", cmd);
            cmd.apply(shared, &mut response);
            if serial.write_all(response.as_bytes()).await.is_err()
                || serial.write_all(b"\r\n").await.is_err()
            {
                defmt::warn!("console write failed");
            }
        }
    }
}
