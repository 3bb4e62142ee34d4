//! Mock adapters for integration tests.
//!
//! Records every output write and serial byte so tests can assert on the
//! full history without touching real GPIO or UART registers.

use std::collections::VecDeque;

use panicguard::app::events::AppEvent;
use panicguard::app::ports::{ButtonPort, CommandChannel, EventSink, OutputPort, TimerPort};
use panicguard::app::service::Controller;
use panicguard::config::AlarmConfig;

// ── MockHardware ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputCall {
    Indicator(bool),
    Buzzer(bool),
    Relay(bool),
    AllOff,
}

#[derive(Default)]
pub struct MockHardware {
    pub calls: Vec<OutputCall>,
    pub indicator: bool,
    pub buzzer: bool,
    pub relay: bool,
    pub pressed: bool,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self::default()
    }

    /// (indicator, buzzer, relay) as last written.
    pub fn levels(&self) -> (bool, bool, bool) {
        (self.indicator, self.buzzer, self.relay)
    }
}

impl OutputPort for MockHardware {
    fn set_indicator(&mut self, on: bool) {
        self.indicator = on;
        self.calls.push(OutputCall::Indicator(on));
    }

    fn set_buzzer(&mut self, on: bool) {
        self.buzzer = on;
        self.calls.push(OutputCall::Buzzer(on));
    }

    fn set_relay(&mut self, engaged: bool) {
        self.relay = engaged;
        self.calls.push(OutputCall::Relay(engaged));
    }

    fn all_off(&mut self) {
        self.indicator = false;
        self.buzzer = false;
        self.relay = false;
        self.calls.push(OutputCall::AllOff);
    }
}

impl ButtonPort for MockHardware {
    fn is_pressed(&mut self) -> bool {
        self.pressed
    }
}

// ── MockChannel ───────────────────────────────────────────────

#[derive(Default)]
pub struct MockChannel {
    pub rx: VecDeque<u8>,
    pub tx: Vec<u8>,
}

impl CommandChannel for MockChannel {
    fn read_byte(&mut self) -> Option<u8> {
        self.rx.pop_front()
    }

    fn write_byte(&mut self, byte: u8) {
        self.tx.push(byte);
    }
}

// ── FakeTimer ─────────────────────────────────────────────────

/// Manually advanced stopwatch.
#[derive(Default)]
pub struct FakeTimer {
    pub now_ms: u64,
    pub reset_at_ms: u64,
    pub resets: u32,
}

impl FakeTimer {
    pub fn advance_ms(&mut self, ms: u64) {
        self.now_ms += ms;
    }
}

impl TimerPort for FakeTimer {
    fn elapsed_ms(&self) -> u64 {
        self.now_ms - self.reset_at_ms
    }

    fn reset(&mut self) {
        self.reset_at_ms = self.now_ms;
        self.resets += 1;
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Rig ───────────────────────────────────────────────────────

/// A started controller wired to all four mocks.
pub struct Rig {
    pub app: Controller,
    pub hw: MockHardware,
    pub channel: MockChannel,
    pub timer: FakeTimer,
    pub sink: RecordingSink,
}

#[allow(dead_code)]
impl Rig {
    pub fn new() -> Self {
        Self::with_config(AlarmConfig::default())
    }

    pub fn with_config(config: AlarmConfig) -> Self {
        let mut rig = Self {
            app: Controller::new(config),
            hw: MockHardware::new(),
            channel: MockChannel::default(),
            timer: FakeTimer::default(),
            sink: RecordingSink::default(),
        };
        rig.app.start(&mut rig.hw, &mut rig.timer, &mut rig.sink);
        rig
    }

    pub fn tick(&mut self) {
        self.app
            .tick(&mut self.hw, &mut self.channel, &mut self.timer, &mut self.sink);
    }

    /// Queue one byte and run the tick that consumes it.
    pub fn send(&mut self, byte: u8) {
        self.channel.rx.push_back(byte);
        self.tick();
    }

    /// Advance the clock by whole time units, then tick once.
    pub fn wait_units(&mut self, units: u64) {
        let unit = u64::from(self.app.config().time_unit_ms);
        self.timer.advance_ms(units * unit);
        self.tick();
    }

    /// Drain and return everything written to the channel so far.
    pub fn take_tx(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.channel.tx)
    }
}
