//! Fuzz target: `Controller::tick`
//!
//! Interprets the input as a stream of poll iterations (command byte,
//! button level, clock advance) and asserts that the controller never
//! panics and never holds the panic lock outside Panic.
//!
//! cargo fuzz run fuzz_control_stream

#![no_main]

use libfuzzer_sys::fuzz_target;
use panicguard::app::events::AppEvent;
use panicguard::app::ports::{ButtonPort, CommandChannel, EventSink, OutputPort, TimerPort};
use panicguard::app::service::Controller;
use panicguard::config::AlarmConfig;
use panicguard::fsm::StateId;

#[derive(Default)]
struct Rig {
    pressed: bool,
    relay: bool,
}

impl OutputPort for Rig {
    fn set_indicator(&mut self, _on: bool) {}
    fn set_buzzer(&mut self, _on: bool) {}
    fn set_relay(&mut self, engaged: bool) {
        self.relay = engaged;
    }
}

impl ButtonPort for Rig {
    fn is_pressed(&mut self) -> bool {
        self.pressed
    }
}

#[derive(Default)]
struct Wire {
    rx: Option<u8>,
}

impl CommandChannel for Wire {
    fn read_byte(&mut self) -> Option<u8> {
        self.rx.take()
    }
    fn write_byte(&mut self, _byte: u8) {}
}

struct Clock {
    now: u64,
    reset_at: u64,
}

impl TimerPort for Clock {
    fn elapsed_ms(&self) -> u64 {
        self.now - self.reset_at
    }
    fn reset(&mut self) {
        self.reset_at = self.now;
    }
}

struct Discard;

impl EventSink for Discard {
    fn emit(&mut self, _event: &AppEvent) {}
}

fuzz_target!(|data: &[u8]| {
    let mut app = Controller::new(AlarmConfig::default());
    let mut rig = Rig::default();
    let mut wire = Wire::default();
    let mut clock = Clock { now: 0, reset_at: 0 };
    app.start(&mut rig, &mut clock, &mut Discard);

    // Three bytes per iteration: command, flags, clock advance (x100 ms).
    for chunk in data.chunks_exact(3) {
        let (cmd, flags, advance) = (chunk[0], chunk[1], chunk[2]);
        wire.rx = (flags & 0x01 != 0).then_some(cmd);
        rig.pressed = flags & 0x02 != 0;
        clock.now += u64::from(advance) * 100;

        app.tick(&mut rig, &mut wire, &mut clock, &mut Discard);

        if app.panic_locked() {
            assert_eq!(app.state(), StateId::Panic);
        }
        if rig.relay {
            assert_eq!(app.state(), StateId::Panic);
        }
    }
});
