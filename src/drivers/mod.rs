//! Actuator and input drivers, plus the task watchdog.
//!
//! Drivers are generic over the `embedded-hal` 1.0 digital traits.  On
//! target they wrap `esp-idf-hal` `PinDriver`s; in tests they wrap the
//! recording pins in [`mock_pin`].

pub mod button;
pub mod buzzer;
pub mod relay;
pub mod status_led;
pub mod watchdog;
