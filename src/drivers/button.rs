//! Panic button input driver.
//!
//! ## Hardware
//!
//! Active-low momentary switch with pull-up, debounced in hardware
//! (RC + Schmitt trigger).  Electrical low = pressed.  The driver only
//! translates the level; edge detection and latching belong to the
//! controller so that it can apply the panic-lock rules in one place.

use embedded_hal::digital::{Error as _, InputPin};
use log::warn;

pub struct PanicButton<P> {
    pin: P,
    last_pressed: bool,
}

impl<P: InputPin> PanicButton<P> {
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            last_pressed: false,
        }
    }

    /// Sample the pin.  A failed read repeats the last good sample so that
    /// a glitch never looks like a release-and-press.
    pub fn is_pressed(&mut self) -> bool {
        match self.pin.is_low() {
            Ok(low) => self.last_pressed = low,
            Err(e) => warn!("PanicButton: read failed ({:?})", e.kind()),
        }
        self.last_pressed
    }
}
