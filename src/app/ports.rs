//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Controller (domain)
//! ```
//!
//! Driven adapters (pins, UART, timer, event sinks) implement these traits.
//! The [`Controller`](super::service::Controller) consumes them via
//! generics, so the domain core never touches hardware directly and every
//! rule can be exercised on the host with fakes.

// ───────────────────────────────────────────────────────────────
// Output port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the three binary actuators.
///
/// All outputs are active-high: `true` drives the pin high.
pub trait OutputPort {
    /// Status indicator LED.
    fn set_indicator(&mut self, on: bool);

    /// Audible alarm buzzer.
    fn set_buzzer(&mut self, on: bool);

    /// Ignition / power relay.  `true` = engaged (vehicle immobilised).
    fn set_relay(&mut self, engaged: bool);

    /// Drive every output low.
    fn all_off(&mut self) {
        self.set_indicator(false);
        self.set_buzzer(false);
        self.set_relay(false);
    }
}

// ───────────────────────────────────────────────────────────────
// Button port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port for the physical panic button.
///
/// The button is wired active-low with a pull-up; adapters translate the
/// electrical level so that the domain only sees "pressed".
pub trait ButtonPort {
    /// `true` while the button is held down.
    fn is_pressed(&mut self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Command channel (driven adapter: serial ↔ domain)
// ───────────────────────────────────────────────────────────────

/// Byte-oriented duplex channel carrying single-character commands in and
/// single-character acknowledgments out.
pub trait CommandChannel {
    /// Take one pending byte, if any.  Must never block; `None` is the
    /// normal "nothing arrived" answer, not an error.
    fn read_byte(&mut self) -> Option<u8>;

    /// Send one byte.  Sent synchronously from within event handling.
    fn write_byte(&mut self, byte: u8);
}

// ───────────────────────────────────────────────────────────────
// Timer port (driven adapter: hardware timer → domain)
// ───────────────────────────────────────────────────────────────

/// Resettable monotonic stopwatch.
///
/// Production backs this with the high-resolution system timer; tests use
/// a manually advanced counter.
pub trait TimerPort {
    /// Milliseconds since the last [`reset`](Self::reset).  Never decreases
    /// between resets.
    fn elapsed_ms(&self) -> u64;

    /// Restart the stopwatch from zero.
    fn reset(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
