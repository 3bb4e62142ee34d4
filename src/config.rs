//! System configuration parameters
//!
//! All tunable parameters for the PanicGuard controller.  Timing in the
//! state machine is expressed in abstract *time units*; `time_unit_ms`
//! fixes how long one unit is on the wire.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Core system configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlarmConfig {
    // --- State machine timing ---
    /// Monitor escalates to Panic once elapsed units strictly exceed this
    pub monitor_timeout_units: u32,
    /// Length of the Panic alarm phase; lockdown starts at this many units
    pub alarm_duration_units: u32,
    /// Duration of one time unit (milliseconds)
    pub time_unit_ms: u32,

    // --- I/O layer ---
    /// Command channel UART rate (8N1)
    pub serial_baud: u32,
    /// Cooperative delay between poll iterations (milliseconds)
    pub poll_interval_ms: u32,
    /// Status snapshot period (milliseconds)
    pub status_interval_ms: u32,
    /// Task watchdog timeout (milliseconds)
    pub watchdog_timeout_ms: u32,
}

impl Default for AlarmConfig {
    fn default() -> Self {
        Self {
            // State machine
            monitor_timeout_units: 5,
            alarm_duration_units: 20,
            time_unit_ms: 1000, // 1 unit = 1 s

            // I/O
            serial_baud: 9600,
            poll_interval_ms: 5,
            status_interval_ms: 10_000,
            watchdog_timeout_ms: 10_000,
        }
    }
}

impl AlarmConfig {
    /// Reject configurations the controller cannot run with.
    ///
    /// Out-of-range values are reported, never clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.time_unit_ms == 0 {
            return Err(ConfigError::ValidationFailed("time_unit_ms must be non-zero"));
        }
        if self.alarm_duration_units == 0 {
            return Err(ConfigError::ValidationFailed(
                "alarm_duration_units must be non-zero",
            ));
        }
        if self.serial_baud == 0 {
            return Err(ConfigError::ValidationFailed("serial_baud must be non-zero"));
        }
        if self.watchdog_timeout_ms <= self.poll_interval_ms {
            return Err(ConfigError::ValidationFailed(
                "watchdog_timeout_ms must exceed poll_interval_ms",
            ));
        }
        Ok(())
    }

    /// Monitor timeout expressed in milliseconds (for log lines).
    pub fn monitor_timeout_ms(&self) -> u64 {
        u64::from(self.monitor_timeout_units) * u64::from(self.time_unit_ms)
    }

    /// Alarm phase length expressed in milliseconds (for log lines).
    pub fn alarm_duration_ms(&self) -> u64 {
        u64::from(self.alarm_duration_units) * u64::from(self.time_unit_ms)
    }
}
