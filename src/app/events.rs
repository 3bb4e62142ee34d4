//! Outbound application events.
//!
//! The [`Controller`](super::service::Controller) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them (serial log, test recorder, ...).
//! Events are observational only; the serial acknowledgments are written
//! directly to the command channel.

use serde::Serialize;

use super::commands::Command;
use crate::fsm::context::{LockCause, OutputCommands};
use crate::fsm::{PanicPhase, StateId};

/// What caused a state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TransitionCause {
    /// A serial command.
    Command,
    /// A falling edge on the panic button.
    Button,
    /// Monitor ran past its timeout.
    MonitorTimeout,
}

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The controller has started (carries initial state).
    Started(StateId),

    /// The FSM transitioned between states (self-transitions included).
    StateChanged {
        from: StateId,
        to: StateId,
        cause: TransitionCause,
    },

    /// A command byte was recognised and applied.
    CommandAccepted(Command),

    /// A byte arrived that is not a command.
    CommandIgnored(u8),

    /// A byte arrived while the panic lock was held and was refused.
    CommandRejected(u8),

    /// The panic lock engaged.
    PanicLocked(LockCause),

    /// The panic lock was released by an `Off` command.
    PanicUnlocked,

    /// Periodic status snapshot.
    Status(StatusSnapshot),
}

/// A point-in-time view of the controller suitable for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusSnapshot {
    pub state: StateId,
    pub phase: Option<PanicPhase>,
    pub lock: Option<LockCause>,
    pub button_latched: bool,
    pub outputs: OutputCommands,
    pub elapsed_units: u64,
    pub tick_count: u64,
}
