//! Concrete state handler functions and table builder.
//!
//! Each state is defined by plain `fn` pointers: no closures, no dynamic
//! dispatch, no heap.  The `on_update` handler is the state's output
//! pattern: it runs once per tick, after commands and the button have been
//! considered, and may request the Monitor → Panic escalation.
//!
//! ```text
//!            'm'                      elapsed > monitor timeout
//!   OFF ───────────▶ MONITOR ─────────────────────────────────▶ PANIC
//!    ▲                  ▲ 'm' (re-arm)                  ┌───────┴───────┐
//!    │                  └──┘                            │ alarm │lockdown│
//!    │                                                  └───────┬───────┘
//!    └─────────────────────────── 'o' ──────────────────────────┘
//!
//!  Any state ──['p' | button edge]──▶ PANIC
//! ```

use super::context::{FsmContext, LockCause, OutputCommands};
use super::{StateDescriptor, StateId};
use crate::app::commands::Ack;
use log::{info, warn};

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table.  Called once at startup.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        // Index 0: Off
        StateDescriptor {
            id: StateId::Off,
            name: "Off",
            on_enter: Some(off_enter),
            on_exit: None,
            on_update: off_update,
        },
        // Index 1: Monitor
        StateDescriptor {
            id: StateId::Monitor,
            name: "Monitor",
            on_enter: Some(monitor_enter),
            on_exit: None,
            on_update: monitor_update,
        },
        // Index 2: Panic
        StateDescriptor {
            id: StateId::Panic,
            name: "Panic",
            on_enter: Some(panic_enter),
            on_exit: Some(panic_exit),
            on_update: panic_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  OFF state
// ═══════════════════════════════════════════════════════════════════════════

fn off_enter(_ctx: &mut FsmContext) {
    info!("OFF: outputs released");
}

fn off_update(ctx: &mut FsmContext) -> Option<StateId> {
    ctx.outputs = OutputCommands::all_off();
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  MONITOR state: silent, waiting for a re-arm before the timeout
// ═══════════════════════════════════════════════════════════════════════════

fn monitor_enter(ctx: &mut FsmContext) {
    info!(
        "MONITOR: armed, escalating after {} units without re-arm",
        ctx.config.monitor_timeout_units
    );
}

fn monitor_update(ctx: &mut FsmContext) -> Option<StateId> {
    ctx.outputs = OutputCommands::all_off();

    if ctx.elapsed_units() > u64::from(ctx.config.monitor_timeout_units) {
        warn!(
            "MONITOR: no re-arm for {} units, escalating to Panic",
            ctx.elapsed_units()
        );
        return Some(StateId::Panic);
    }

    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  PANIC state: blinking alarm, then lockdown with the relay engaged
// ═══════════════════════════════════════════════════════════════════════════

fn panic_enter(ctx: &mut FsmContext) {
    warn!(
        "PANIC: alarm for {} units before lockdown (lock={:?})",
        ctx.config.alarm_duration_units, ctx.panic_lock
    );
}

fn panic_exit(_ctx: &mut FsmContext) {
    info!("PANIC: alarm cleared");
}

fn panic_update(ctx: &mut FsmContext) -> Option<StateId> {
    let elapsed = ctx.elapsed_units();

    if elapsed < u64::from(ctx.config.alarm_duration_units) {
        // Toggle once per time unit.
        ctx.outputs = OutputCommands::blink(elapsed % 2 == 1);
        return None;
    }

    // Announce the lock exactly once, on the first lockdown tick.
    if ctx.panic_lock.is_none() {
        warn!("PANIC: lockdown reached after {} units, locking", elapsed);
        ctx.panic_lock = Some(LockCause::Lockdown);
        ctx.raise_ack(Ack::Panic);
    }
    ctx.outputs = OutputCommands::lockdown();

    None
}
