//! Piezo buzzer driver.
//!
//! Active buzzer behind a low-side transistor: GPIO high = sound.  The
//! alarm cadence comes from the state machine toggling the level once per
//! time unit; this driver only switches it.

use embedded_hal::digital::{Error as _, OutputPin, PinState};
use log::warn;

pub struct Buzzer<P> {
    pin: P,
    sounding: bool,
}

impl<P: OutputPin> Buzzer<P> {
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            sounding: false,
        }
    }

    pub fn set(&mut self, on: bool) {
        // Skip redundant writes; the poll loop re-applies levels every tick.
        if on == self.sounding {
            return;
        }
        match self.pin.set_state(PinState::from(on)) {
            Ok(()) => self.sounding = on,
            Err(e) => warn!("Buzzer: pin write failed ({:?})", e.kind()),
        }
    }

    /// Drive the pin low even if it is already tracked as silent.
    pub fn silence(&mut self) {
        match self.pin.set_low() {
            Ok(()) => self.sounding = false,
            Err(e) => warn!("Buzzer: silence failed ({:?})", e.kind()),
        }
    }

    pub fn is_sounding(&self) -> bool {
        self.sounding
    }
}
