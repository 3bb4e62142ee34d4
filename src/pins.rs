//! GPIO / peripheral pin assignments for the PanicGuard board (ESP32-S3).
//!
//! Single source of truth: `main` takes the typed pins from here rather
//! than naming GPIOs itself.  Change a pin here and it propagates everywhere.

use esp_idf_hal::gpio::{AnyIOPin, AnyInputPin, AnyOutputPin, IOPin, InputPin, OutputPin, Pins};

/// Board pins, downgraded to their type-erased form.
pub struct BoardPins {
    /// Status indicator LED (active high).
    pub indicator: AnyOutputPin,
    /// Piezo buzzer driver transistor (active high).
    pub buzzer: AnyOutputPin,
    /// Ignition cut-off relay coil driver (active high = immobilised).
    pub relay: AnyOutputPin,
    /// Panic button: BOOT key, active low.  Kept bidirectional because the
    /// IDF only exposes the internal pull-up on input/output capable pins.
    pub button: AnyIOPin,
    /// Command channel UART1 TX.
    pub uart_tx: AnyOutputPin,
    /// Command channel UART1 RX.
    pub uart_rx: AnyInputPin,
}

impl BoardPins {
    pub fn take(pins: Pins) -> Self {
        Self {
            indicator: pins.gpio2.downgrade_output(),
            buzzer: pins.gpio11.downgrade_output(),
            relay: pins.gpio12.downgrade_output(),
            button: pins.gpio0.downgrade(),
            uart_tx: pins.gpio17.downgrade_output(),
            uart_rx: pins.gpio18.downgrade_input(),
        }
    }
}
