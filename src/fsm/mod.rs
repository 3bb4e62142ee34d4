//! Function-pointer finite state machine engine.
//!
//! Classic embedded FSM pattern in Rust:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  StateTable                                              │
//! │  ┌─────────┬───────────┬──────────┬───────────────────┐  │
//! │  │ StateId │ on_enter  │ on_exit  │ on_update         │  │
//! │  ├─────────┼───────────┼──────────┼───────────────────┤  │
//! │  │ Off     │ fn(ctx)   │    -     │ fn(ctx)->Option<> │  │
//! │  │ Monitor │ fn(ctx)   │    -     │ fn(ctx)->Option<> │  │
//! │  │ Panic   │ fn(ctx)   │ fn(ctx)  │ fn(ctx)->Option<> │  │
//! │  └─────────┴───────────┴──────────┴───────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Each tick the engine samples the timer into the context and calls
//! `on_update` for the **current** state.  If it returns `Some(next_id)`
//! the engine transitions.  Every transition resets the timer: the
//! elapsed-time reference moves only through [`Fsm::transition_to`] (and
//! the explicit Monitor re-arm, [`Fsm::rearm`]).

pub mod context;
pub mod states;

use context::FsmContext;
use log::info;
use serde::Serialize;

use crate::app::ports::TimerPort;
use crate::config::AlarmConfig;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Enumeration of all possible controller states.
/// Must stay in sync with the state table built in [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum StateId {
    Off = 0,
    Monitor = 1,
    Panic = 2,
}

impl StateId {
    /// Total number of states, used to size the table array.
    pub const COUNT: usize = 3;

    /// Convert a table index back to `StateId`.  Out-of-range indices
    /// assert in debug builds and fall back to `Panic` in release.
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Off,
            1 => Self::Monitor,
            2 => Self::Panic,
            _ => {
                debug_assert!(false, "invalid state index: {idx}");
                Self::Panic
            }
        }
    }
}

/// Sub-phase of the Panic state, derived from time spent in Panic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PanicPhase {
    /// Indicator and buzzer blink; relay released.
    Alarm,
    /// Indicator on, buzzer off, relay engaged.
    Lockdown,
}

impl PanicPhase {
    pub fn at(elapsed_units: u64, config: &AlarmConfig) -> Self {
        if elapsed_units < u64::from(config.alarm_duration_units) {
            Self::Alarm
        } else {
            Self::Lockdown
        }
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` and `on_exit` actions.
/// These run exactly once on each state transition.
pub type StateActionFn = fn(&mut FsmContext);

/// Signature for the per-tick update handler.
/// Returns `Some(next)` to trigger a transition, or `None` to stay.
pub type StateUpdateFn = fn(&mut FsmContext) -> Option<StateId>;

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Static descriptor for a single FSM state.
/// Stored in a fixed-size array: no heap, no `dyn`.
pub struct StateDescriptor {
    pub id: StateId,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn>,
    pub on_exit: Option<StateActionFn>,
    pub on_update: StateUpdateFn,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// The finite state machine engine.
///
/// Owns the state table; the mutable [`FsmContext`] and the timer are
/// threaded through every call by the owner.
pub struct Fsm {
    /// Fixed-size table indexed by `StateId as usize`.
    table: [StateDescriptor; StateId::COUNT],
    /// Index of the currently active state.
    current: usize,
}

impl Fsm {
    /// Construct a new FSM with the given state table, starting in `initial`.
    pub fn new(table: [StateDescriptor; StateId::COUNT], initial: StateId) -> Self {
        Self {
            table,
            current: initial as usize,
        }
    }

    /// Start the timer and run the initial `on_enter` for the starting state.
    /// Call once after construction, before the first `tick()`.
    pub fn start(&mut self, ctx: &mut FsmContext, timer: &mut impl TimerPort) {
        info!("FSM starting in state: {}", self.table[self.current].name);
        timer.reset();
        ctx.elapsed_ms = 0;
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }

    /// Run the current state's output pattern once.
    ///
    /// 1. Sample the timer into `ctx.elapsed_ms`.
    /// 2. Call `on_update` for the current state.
    /// 3. If it returns `Some(next)`, transition (which resets the timer).
    ///
    /// Returns the state transitioned to, if any.
    pub fn tick(&mut self, ctx: &mut FsmContext, timer: &mut impl TimerPort) -> Option<StateId> {
        ctx.elapsed_ms = timer.elapsed_ms();

        let next = (self.table[self.current].on_update)(ctx);

        if let Some(next_id) = next {
            self.transition_to(next_id, ctx, timer);
        }
        next
    }

    /// Switch to `next` and reset the elapsed-time reference.
    ///
    /// Always runs `on_exit` / `on_enter`, also when `next` is the current
    /// state: re-entering Panic restarts the alarm phase.  The panic lock
    /// is left alone; callers manage it around the transition.
    pub fn transition_to(
        &mut self,
        next: StateId,
        ctx: &mut FsmContext,
        timer: &mut impl TimerPort,
    ) {
        let next_idx = next as usize;

        info!(
            "FSM transition: {} -> {}",
            self.table[self.current].name, self.table[next_idx].name
        );

        if let Some(exit) = self.table[self.current].on_exit {
            exit(ctx);
        }

        self.current = next_idx;
        timer.reset();
        ctx.elapsed_ms = 0;

        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }

    /// Reset the elapsed-time reference without leaving the current state.
    /// Used to re-arm Monitor without disturbing the outputs.
    pub fn rearm(&mut self, ctx: &mut FsmContext, timer: &mut impl TimerPort) {
        info!("FSM re-arm: {}", self.table[self.current].name);
        timer.reset();
        ctx.elapsed_ms = 0;
    }

    /// The current state's identity.
    pub fn current_state(&self) -> StateId {
        StateId::from_index(self.current)
    }

    /// Human-readable name of the current state.
    pub fn current_name(&self) -> &'static str {
        self.table[self.current].name
    }

    /// Panic sub-phase as of the last timer sample, `None` outside Panic.
    pub fn panic_phase(&self, ctx: &FsmContext) -> Option<PanicPhase> {
        (self.current_state() == StateId::Panic)
            .then(|| PanicPhase::at(ctx.elapsed_units(), &ctx.config))
    }
}
