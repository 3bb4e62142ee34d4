//! Shared mutable context threaded through every FSM handler.
//!
//! `FsmContext` is the single struct that state handlers read from and
//! write to.  It holds the elapsed time since the last transition, the
//! output commands for this tick, the panic lock, the button latch and any
//! acknowledgments a handler wants sent.  Think of it as the "blackboard"
//! in a blackboard architecture.

use heapless::Vec;
use serde::Serialize;

use crate::app::commands::Ack;
use crate::config::AlarmConfig;

/// Upper bound on acknowledgments a single state update may raise.
const PENDING_ACK_CAP: usize = 2;

// ---------------------------------------------------------------------------
// Output commands (written by state handlers; applied by the controller)
// ---------------------------------------------------------------------------

/// Levels the state handlers want on the three outputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OutputCommands {
    /// Status indicator LED.
    pub indicator: bool,
    /// Alarm buzzer.
    pub buzzer: bool,
    /// Ignition relay; `true` = engaged (immobilised).
    pub relay: bool,
}

impl OutputCommands {
    /// All outputs low.
    pub const fn all_off() -> Self {
        Self {
            indicator: false,
            buzzer: false,
            relay: false,
        }
    }

    /// Terminal Panic pattern: indicator on, buzzer off, relay engaged.
    pub const fn lockdown() -> Self {
        Self {
            indicator: true,
            buzzer: false,
            relay: true,
        }
    }

    /// Alarm-phase pattern: indicator and buzzer follow `level`, relay released.
    pub const fn blink(level: bool) -> Self {
        Self {
            indicator: level,
            buzzer: level,
            relay: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Panic lock
// ---------------------------------------------------------------------------

/// Why the panic lock is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LockCause {
    /// Physical button press.
    Button,
    /// Panic outlived the alarm phase and reached lockdown.
    Lockdown,
}

// ---------------------------------------------------------------------------
// FsmContext
// ---------------------------------------------------------------------------

/// The shared context passed to every state handler function.
pub struct FsmContext {
    // -- Timing --
    /// Milliseconds since the last transition (or re-arm).
    pub elapsed_ms: u64,

    // -- Outputs --
    /// Levels to be applied to the outputs after the FSM tick.
    pub outputs: OutputCommands,

    // -- Configuration --
    pub config: AlarmConfig,

    // -- Latches --
    /// `Some` while the panic lock is held.  Only an `Off` command clears it.
    pub panic_lock: Option<LockCause>,
    /// Set on a button press edge, cleared on release.
    pub button_latched: bool,

    // -- Outbound --
    /// Acknowledgments raised by state handlers, flushed to the command
    /// channel by the controller at the end of the tick.
    pub pending_acks: Vec<Ack, PENDING_ACK_CAP>,
}

impl FsmContext {
    /// Create a new context with the given configuration.
    pub fn new(config: AlarmConfig) -> Self {
        Self {
            elapsed_ms: 0,
            outputs: OutputCommands::all_off(),
            config,
            panic_lock: None,
            button_latched: false,
            pending_acks: Vec::new(),
        }
    }

    /// Whole time units elapsed since the last transition (truncating).
    pub fn elapsed_units(&self) -> u64 {
        self.elapsed_ms / u64::from(self.config.time_unit_ms.max(1))
    }

    /// `true` while the panic lock is held.
    pub fn panic_locked(&self) -> bool {
        self.panic_lock.is_some()
    }

    /// Queue an acknowledgment for the command channel.
    pub fn raise_ack(&mut self, ack: Ack) {
        if self.pending_acks.push(ack).is_err() {
            log::warn!("FSM: ack queue full, dropping {:?}", ack);
        }
    }
}
