//! Status indicator LED driver.
//!
//! Single active-high GPIO.  Off/Monitor keep it dark, the Panic alarm
//! phase blinks it, lockdown holds it on.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: wraps a `PinDriver` in output mode.
//! On host/test: wraps any `embedded-hal` output pin.

use embedded_hal::digital::{Error as _, OutputPin, PinState};
use log::warn;

pub struct StatusLed<P> {
    pin: P,
    on: bool,
}

impl<P: OutputPin> StatusLed<P> {
    pub fn new(pin: P) -> Self {
        Self { pin, on: false }
    }

    /// Drive the LED.  Unchanged levels are not rewritten; on a pin error
    /// the previous level is kept.
    pub fn set(&mut self, on: bool) {
        if on == self.on {
            return;
        }
        match self.pin.set_state(PinState::from(on)) {
            Ok(()) => self.on = on,
            Err(e) => warn!("StatusLed: pin write failed ({:?})", e.kind()),
        }
    }

    /// Drive the pin low even if it is already tracked as dark.
    pub fn off(&mut self) {
        match self.pin.set_low() {
            Ok(()) => self.on = false,
            Err(e) => warn!("StatusLed: off failed ({:?})", e.kind()),
        }
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}
