//! Monotonic stopwatch adapter.
//!
//! Implements [`TimerPort`] for the controller's elapsed-time reference.
//!
//! - **`target_os = "espidf"`**: wraps `esp_timer_get_time()` from the
//!   ESP-IDF high-resolution timer (microsecond precision, monotonic).
//! - **`not(target_os = "espidf")`**: uses `std::time::Instant` for
//!   host-side testing and simulation.

use crate::app::ports::TimerPort;

/// Resettable monotonic timer.
pub struct MonotonicTimer {
    #[cfg(target_os = "espidf")]
    start_us: i64,
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl Default for MonotonicTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicTimer {
    /// A timer started now.
    pub fn new() -> Self {
        Self {
            #[cfg(target_os = "espidf")]
            start_us: now_us(),
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }
}

#[cfg(target_os = "espidf")]
fn now_us() -> i64 {
    // SAFETY: esp_timer is started by the IDF runtime before main().
    unsafe { esp_idf_svc::sys::esp_timer_get_time() }
}

impl TimerPort for MonotonicTimer {
    #[cfg(target_os = "espidf")]
    fn elapsed_ms(&self) -> u64 {
        (now_us() - self.start_us).max(0) as u64 / 1000
    }

    #[cfg(not(target_os = "espidf"))]
    fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    #[cfg(target_os = "espidf")]
    fn reset(&mut self) {
        self.start_us = now_us();
    }

    #[cfg(not(target_os = "espidf"))]
    fn reset(&mut self) {
        self.start = std::time::Instant::now();
    }
}
