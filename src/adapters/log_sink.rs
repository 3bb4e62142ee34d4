//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART0 / USB-CDC in production, never
//! to the command UART).  Each line starts with a fixed tag so field logs
//! can be grepped.

use log::{debug, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(state) => {
                info!("START | initial_state={:?}", state);
            }
            AppEvent::StateChanged { from, to, cause } => {
                info!("STATE | {:?} -> {:?} ({:?})", from, to, cause);
            }
            AppEvent::CommandAccepted(cmd) => {
                info!("CMD   | accepted {:?}", cmd);
            }
            AppEvent::CommandIgnored(byte) => {
                debug!("CMD   | ignored {:#04x}", byte);
            }
            AppEvent::CommandRejected(byte) => {
                warn!("CMD   | rejected {:#04x}, panic locked", byte);
            }
            AppEvent::PanicLocked(cause) => {
                warn!("LOCK  | engaged by {:?}", cause);
            }
            AppEvent::PanicUnlocked => {
                info!("LOCK  | released");
            }
            AppEvent::Status(snapshot) => match serde_json::to_string(snapshot) {
                Ok(json) => info!("STATUS | {}", json),
                Err(e) => warn!("STATUS | encode failed ({}): {:?}", e, snapshot),
            },
        }
    }
}
