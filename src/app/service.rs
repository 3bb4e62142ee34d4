//! Application service: the hexagonal core.
//!
//! [`Controller`] owns the FSM and its shared context.  It is the single
//! owner of the state, the panic lock and the button latch; every port is
//! injected at the call site, so the whole controller runs on the host
//! against fakes.
//!
//! ```text
//!  CommandChannel ──▶ ┌─────────────────────────┐ ──▶ EventSink
//!      ButtonPort ──▶ │       Controller        │
//!       TimerPort ◀─▶ │ commands · button · FSM │ ──▶ OutputPort
//!                     └─────────────────────────┘
//! ```
//!
//! Within one tick the order is fixed: one command byte, then the button
//! level, then the active state's output pattern.

use log::{debug, info, warn};

use crate::config::AlarmConfig;
use crate::fsm::context::{FsmContext, LockCause, OutputCommands};
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, PanicPhase, StateId};

use super::commands::{Ack, Command};
use super::events::{AppEvent, StatusSnapshot, TransitionCause};
use super::ports::{ButtonPort, CommandChannel, EventSink, OutputPort, TimerPort};

// ───────────────────────────────────────────────────────────────
// Controller
// ───────────────────────────────────────────────────────────────

/// The panic alarm controller.
pub struct Controller {
    fsm: Fsm,
    ctx: FsmContext,
    tick_count: u64,
}

impl Controller {
    /// Construct the controller in `Off`, unlocked, button released.
    ///
    /// Does **not** start the timer; call [`start`](Self::start) next.
    pub fn new(config: AlarmConfig) -> Self {
        Self {
            fsm: Fsm::new(build_state_table(), StateId::Off),
            ctx: FsmContext::new(config),
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Start the timer, drive every output low and announce the start.
    pub fn start(
        &mut self,
        hw: &mut impl OutputPort,
        timer: &mut impl TimerPort,
        sink: &mut impl EventSink,
    ) {
        self.fsm.start(&mut self.ctx, timer);
        self.ctx.outputs = OutputCommands::all_off();
        hw.all_off();
        sink.emit(&AppEvent::Started(self.fsm.current_state()));
        info!("Controller started in {:?}", self.fsm.current_state());
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one poll iteration: command → button → state outputs.
    ///
    /// The `hw` parameter satisfies **both** [`OutputPort`] and
    /// [`ButtonPort`], which avoids a double mutable borrow while keeping
    /// the port boundary explicit.
    pub fn tick(
        &mut self,
        hw: &mut (impl OutputPort + ButtonPort),
        channel: &mut impl CommandChannel,
        timer: &mut impl TimerPort,
        sink: &mut impl EventSink,
    ) {
        self.tick_count += 1;

        // 1. At most one command byte per tick.
        if let Some(byte) = channel.read_byte() {
            self.handle_byte(byte, channel, timer, sink);
        }

        // 2. Button level.
        let pressed = hw.is_pressed();
        self.handle_button(pressed, channel, timer, sink);

        // 3. Active state's output pattern (may escalate or lock).
        let prev_state = self.fsm.current_state();
        let was_locked = self.ctx.panic_locked();

        if let Some(next) = self.fsm.tick(&mut self.ctx, timer) {
            sink.emit(&AppEvent::StateChanged {
                from: prev_state,
                to: next,
                cause: TransitionCause::MonitorTimeout,
            });
        }

        for ack in self.ctx.pending_acks.iter() {
            channel.write_byte(ack.as_byte());
        }
        self.ctx.pending_acks.clear();

        if !was_locked {
            if let Some(cause) = self.ctx.panic_lock {
                sink.emit(&AppEvent::PanicLocked(cause));
            }
        }

        // 4. Apply outputs.
        self.apply_outputs(hw);

        debug_assert!(
            !self.ctx.panic_locked() || self.fsm.current_state() == StateId::Panic,
            "panic lock held outside Panic ({:?})",
            self.fsm.current_state()
        );
    }

    /// Switch state and reset the elapsed-time reference.
    ///
    /// The panic lock is not touched here; the command and button paths
    /// manage it around the transition.
    pub fn transition_to(
        &mut self,
        next: StateId,
        cause: TransitionCause,
        timer: &mut impl TimerPort,
        sink: &mut impl EventSink,
    ) {
        let from = self.fsm.current_state();
        self.fsm.transition_to(next, &mut self.ctx, timer);
        sink.emit(&AppEvent::StateChanged {
            from,
            to: next,
            cause,
        });
    }

    // ── Input handling ────────────────────────────────────────

    /// Apply one inbound command byte.
    ///
    /// While the panic lock is held every byte except `o` is refused and
    /// answered with `P`, unrecognised bytes included.
    pub fn handle_byte(
        &mut self,
        byte: u8,
        channel: &mut impl CommandChannel,
        timer: &mut impl TimerPort,
        sink: &mut impl EventSink,
    ) {
        let command = Command::from_byte(byte);

        if self.ctx.panic_locked() && command != Some(Command::Off) {
            warn!("CMD: {:#04x} refused, panic lock held", byte);
            channel.write_byte(Ack::Panic.as_byte());
            sink.emit(&AppEvent::CommandRejected(byte));
            return;
        }

        let Some(command) = command else {
            debug!("CMD: ignoring byte {:#04x}", byte);
            sink.emit(&AppEvent::CommandIgnored(byte));
            return;
        };

        match command {
            Command::Off => {
                self.transition_to(StateId::Off, TransitionCause::Command, timer, sink);
                if self.ctx.panic_lock.take().is_some() {
                    info!("CMD: panic lock released");
                    sink.emit(&AppEvent::PanicUnlocked);
                }
            }
            Command::Monitor => {
                if self.fsm.current_state() == StateId::Monitor {
                    self.fsm.rearm(&mut self.ctx, timer);
                } else {
                    self.transition_to(StateId::Monitor, TransitionCause::Command, timer, sink);
                }
            }
            Command::Panic => {
                // Forced panic does not lock; lockdown will if it lasts.
                self.transition_to(StateId::Panic, TransitionCause::Command, timer, sink);
            }
        }
        channel.write_byte(command.ack().as_byte());
        sink.emit(&AppEvent::CommandAccepted(command));
    }

    /// Apply the current button level.
    ///
    /// A press edge (pressed, not latched, not locked) latches, locks,
    /// answers `P` and enters Panic.  Release clears the latch and nothing
    /// else.
    pub fn handle_button(
        &mut self,
        pressed: bool,
        channel: &mut impl CommandChannel,
        timer: &mut impl TimerPort,
        sink: &mut impl EventSink,
    ) {
        if !pressed {
            self.ctx.button_latched = false;
            return;
        }
        if self.ctx.button_latched || self.ctx.panic_locked() {
            return;
        }

        warn!("BUTTON: panic pressed in {}", self.fsm.current_name());
        self.ctx.button_latched = true;
        self.ctx.panic_lock = Some(LockCause::Button);
        channel.write_byte(Ack::Panic.as_byte());
        sink.emit(&AppEvent::PanicLocked(LockCause::Button));
        self.transition_to(StateId::Panic, TransitionCause::Button, timer, sink);
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current FSM state.
    pub fn state(&self) -> StateId {
        self.fsm.current_state()
    }

    /// `true` while the panic lock is held.
    pub fn panic_locked(&self) -> bool {
        self.ctx.panic_locked()
    }

    /// Why the panic lock is held, if it is.
    pub fn lock_cause(&self) -> Option<LockCause> {
        self.ctx.panic_lock
    }

    /// `true` while the button is held since its last press edge.
    pub fn button_latched(&self) -> bool {
        self.ctx.button_latched
    }

    /// Panic sub-phase as of the last tick, `None` outside Panic.
    pub fn panic_phase(&self) -> Option<PanicPhase> {
        self.fsm.panic_phase(&self.ctx)
    }

    /// Output levels computed on the last tick.
    pub fn outputs(&self) -> OutputCommands {
        self.ctx.outputs
    }

    /// Poll iterations executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Active configuration.
    pub fn config(&self) -> &AlarmConfig {
        &self.ctx.config
    }

    /// Build a status snapshot from the current context.
    pub fn status(&self) -> StatusSnapshot {
        StatusSnapshot {
            state: self.state(),
            phase: self.panic_phase(),
            lock: self.ctx.panic_lock,
            button_latched: self.ctx.button_latched,
            outputs: self.ctx.outputs,
            elapsed_units: self.ctx.elapsed_units(),
            tick_count: self.tick_count,
        }
    }

    // ── Internal ──────────────────────────────────────────────

    /// Translate output commands into port calls.
    fn apply_outputs(&self, hw: &mut impl OutputPort) {
        let out = &self.ctx.outputs;
        hw.set_indicator(out.indicator);
        hw.set_buzzer(out.buzzer);
        hw.set_relay(out.relay);
    }
}
