//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns the three actuator drivers and the panic button, exposing them
//! through [`OutputPort`] and [`ButtonPort`].  This is the only module in
//! the system that touches pins.  Generic over `embedded-hal` pins so that
//! the same adapter runs against `PinDriver`s on target and mock pins in
//! tests.

use embedded_hal::digital::{InputPin, OutputPin};

use crate::app::ports::{ButtonPort, OutputPort};
use crate::drivers::button::PanicButton;
use crate::drivers::buzzer::Buzzer;
use crate::drivers::relay::Relay;
use crate::drivers::status_led::StatusLed;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<L, Z, R, B> {
    led: StatusLed<L>,
    buzzer: Buzzer<Z>,
    relay: Relay<R>,
    button: PanicButton<B>,
}

impl<L, Z, R, B> HardwareAdapter<L, Z, R, B>
where
    L: OutputPin,
    Z: OutputPin,
    R: OutputPin,
    B: InputPin,
{
    pub fn new(led: StatusLed<L>, buzzer: Buzzer<Z>, relay: Relay<R>, button: PanicButton<B>) -> Self {
        Self {
            led,
            buzzer,
            relay,
            button,
        }
    }

    /// `true` while the relay is engaged (vehicle immobilised).
    pub fn immobilised(&self) -> bool {
        self.relay.is_engaged()
    }
}

// ── OutputPort implementation ─────────────────────────────────

impl<L, Z, R, B> OutputPort for HardwareAdapter<L, Z, R, B>
where
    L: OutputPin,
    Z: OutputPin,
    R: OutputPin,
    B: InputPin,
{
    fn set_indicator(&mut self, on: bool) {
        self.led.set(on);
    }

    fn set_buzzer(&mut self, on: bool) {
        self.buzzer.set(on);
    }

    fn set_relay(&mut self, engaged: bool) {
        self.relay.set(engaged);
    }

    fn all_off(&mut self) {
        self.led.off();
        self.buzzer.silence();
        self.relay.release();
    }
}

// ── ButtonPort implementation ─────────────────────────────────

impl<L, Z, R, B> ButtonPort for HardwareAdapter<L, Z, R, B>
where
    L: OutputPin,
    Z: OutputPin,
    R: OutputPin,
    B: InputPin,
{
    fn is_pressed(&mut self) -> bool {
        self.button.is_pressed()
    }
}
