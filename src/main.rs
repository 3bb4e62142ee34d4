//! PanicGuard Firmware: main entry point
//!
//! Hexagonal architecture with a single-threaded busy-poll loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter        SerialCommandChannel   MonotonicTimer  │
//! │  (Output+Button)        (CommandChannel)       (TimerPort)     │
//! │  LogEventSink (EventSink)                                      │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              Controller (pure logic)                   │    │
//! │  │  commands · button latch · panic lock · FSM            │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  Watchdog (fed every iteration)                                │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::{AnyIOPin, AnyOutputPin, Output, PinDriver, Pull};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::uart::{UartDriver, config::Config as UartConfig};
use esp_idf_hal::units::Hertz;
use log::{error, info};

use panicguard::adapters::hardware::HardwareAdapter;
use panicguard::adapters::log_sink::LogEventSink;
use panicguard::adapters::serial::SerialCommandChannel;
use panicguard::adapters::time::MonotonicTimer;
use panicguard::app::events::AppEvent;
use panicguard::app::ports::{EventSink, TimerPort};
use panicguard::app::service::Controller;
use panicguard::config::AlarmConfig;
use panicguard::drivers::button::PanicButton;
use panicguard::drivers::buzzer::Buzzer;
use panicguard::drivers::relay::Relay;
use panicguard::drivers::status_led::StatusLed;
use panicguard::drivers::watchdog::Watchdog;
use panicguard::error::{self, CommsError, Error};
use panicguard::pins::BoardPins;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  PanicGuard v{}                      ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = AlarmConfig::default();
    config.validate().map_err(Error::from)?;
    info!(
        "Config: monitor timeout {}ms, alarm {}ms, {} baud",
        config.monitor_timeout_ms(),
        config.alarm_duration_ms(),
        config.serial_baud
    );

    // ── 3. Peripherals ────────────────────────────────────────
    let peripherals = Peripherals::take().map_err(|e| {
        error!("peripherals: {}", e);
        Error::Init("peripherals already taken")
    })?;
    let board = BoardPins::take(peripherals.pins);

    let mut button_pin = PinDriver::input(board.button).map_err(|e| {
        error!("button pin: {}", e);
        Error::Gpio("button")
    })?;
    button_pin.set_pull(Pull::Up).map_err(|e| {
        error!("button pull-up: {}", e);
        Error::Gpio("button")
    })?;

    let mut hw = HardwareAdapter::new(
        StatusLed::new(output_pin(board.indicator, "indicator")?),
        Buzzer::new(output_pin(board.buzzer, "buzzer")?),
        Relay::new(output_pin(board.relay, "relay")?),
        PanicButton::new(button_pin),
    );

    let uart = UartDriver::new(
        peripherals.uart1,
        board.uart_tx,
        board.uart_rx,
        Option::<AnyIOPin>::None,
        Option::<AnyIOPin>::None,
        &UartConfig::default().baudrate(Hertz(config.serial_baud)),
    )
    .map_err(|e| {
        error!("UART1 init: {}", e);
        Error::from(CommsError::UartInitFailed)
    })?;
    let mut serial = SerialCommandChannel::new(uart);

    // ── 4. Controller ─────────────────────────────────────────
    let mut timer = MonotonicTimer::new();
    let mut sink = LogEventSink::new();
    let mut controller = Controller::new(config);
    controller.start(&mut hw, &mut timer, &mut sink);

    let watchdog = Watchdog::new(config.watchdog_timeout_ms);
    let mut status_clock = MonotonicTimer::new();

    info!("System ready. Entering poll loop.");

    // ── 5. Poll loop ──────────────────────────────────────────
    loop {
        controller.tick(&mut hw, &mut serial, &mut timer, &mut sink);

        if status_clock.elapsed_ms() >= u64::from(config.status_interval_ms) {
            status_clock.reset();
            sink.emit(&AppEvent::Status(controller.status()));
            let (rx_err, tx_err) = serial.error_counts();
            if rx_err + tx_err > 0 {
                info!("Serial errors since boot: rx={} tx={}", rx_err, tx_err);
            }
        }

        watchdog.feed();

        // Yield so the idle task runs; the core itself never blocks.
        FreeRtos::delay_ms(config.poll_interval_ms);
    }
}

/// Claim an actuator pin in output mode, logging the IDF error on failure.
fn output_pin(
    pin: AnyOutputPin,
    name: &'static str,
) -> error::Result<PinDriver<'static, AnyOutputPin, Output>> {
    PinDriver::output(pin).map_err(|e| {
        error!("{} pin: {}", name, e);
        Error::Gpio(name)
    })
}
