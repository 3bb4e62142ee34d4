//! Ignition cut-off relay driver.
//!
//! GPIO high energises the relay coil, which opens the ignition / fuel
//! pump feed and immobilises the vehicle.
//!
//! ## Safety contract
//!
//! The relay must only engage in the Panic lockdown phase.  That is
//! decided by the state machine; this driver is a dumb actuator that
//! logs every edge so immobilisation is always traceable.

use embedded_hal::digital::{Error as _, OutputPin, PinState};
use log::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayState {
    Released,
    Engaged,
}

pub struct Relay<P> {
    pin: P,
    state: RelayState,
}

impl<P: OutputPin> Relay<P> {
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            state: RelayState::Released,
        }
    }

    pub fn set(&mut self, engaged: bool) {
        let target = if engaged {
            RelayState::Engaged
        } else {
            RelayState::Released
        };
        if target == self.state {
            return;
        }

        match self.pin.set_state(PinState::from(engaged)) {
            Ok(()) => {
                info!("Relay: {:?} -> {:?}", self.state, target);
                self.state = target;
            }
            Err(e) => warn!("Relay: pin write failed ({:?}), still {:?}", e.kind(), self.state),
        }
    }

    /// De-energise the coil, writing the pin even if already released.
    pub fn release(&mut self) {
        match self.pin.set_low() {
            Ok(()) => {
                if self.state == RelayState::Engaged {
                    info!("Relay: Engaged -> Released");
                }
                self.state = RelayState::Released;
            }
            Err(e) => warn!("Relay: release failed ({:?}), still {:?}", e.kind(), self.state),
        }
    }

    pub fn state(&self) -> RelayState {
        self.state
    }

    pub fn is_engaged(&self) -> bool {
        self.state == RelayState::Engaged
    }
}
