//! Serial command handling through the full tick path.

use panicguard::app::commands::Command;
use panicguard::app::events::{AppEvent, TransitionCause};
use panicguard::fsm::context::LockCause;
use panicguard::fsm::{PanicPhase, StateId};

use crate::mock_hw::Rig;

#[test]
fn monitor_command_arms_and_acks() {
    let mut rig = Rig::new();
    rig.send(b'm');
    assert_eq!(rig.app.state(), StateId::Monitor);
    assert_eq!(rig.take_tx(), b"M");
    assert!(rig.sink.events.contains(&AppEvent::StateChanged {
        from: StateId::Off,
        to: StateId::Monitor,
        cause: TransitionCause::Command,
    }));
}

#[test]
fn off_command_acks_from_every_state() {
    for setup in [&b""[..], b"m", b"p"] {
        let mut rig = Rig::new();
        for &b in setup {
            rig.send(b);
        }
        rig.take_tx();
        rig.send(b'o');
        assert_eq!(rig.app.state(), StateId::Off);
        assert_eq!(rig.take_tx(), b"O");
        assert_eq!(rig.hw.levels(), (false, false, false));
    }
}

#[test]
fn rearm_restarts_the_monitor_timeout() {
    let mut rig = Rig::new();
    rig.send(b'm');
    rig.wait_units(4);
    rig.send(b'm');
    assert_eq!(rig.take_tx(), b"MM");

    rig.wait_units(4);
    assert_eq!(rig.app.state(), StateId::Monitor);
    rig.wait_units(2);
    assert_eq!(rig.app.state(), StateId::Panic);

    // Re-arming stays in Monitor without a transition.
    let monitor_entries = rig.sink.count(|e| {
        matches!(e, AppEvent::StateChanged { to: StateId::Monitor, .. })
    });
    assert_eq!(monitor_entries, 1);
}

#[test]
fn forced_panic_does_not_lock() {
    let mut rig = Rig::new();
    rig.send(b'p');
    assert_eq!(rig.app.state(), StateId::Panic);
    assert_eq!(rig.app.panic_phase(), Some(PanicPhase::Alarm));
    assert!(!rig.app.panic_locked());
    assert_eq!(rig.take_tx(), b"P");

    // Unlocked Panic still accepts other commands.
    rig.send(b'm');
    assert_eq!(rig.app.state(), StateId::Monitor);
    assert_eq!(rig.take_tx(), b"M");
}

#[test]
fn repeated_panic_command_restarts_alarm_phase() {
    let mut rig = Rig::new();
    rig.send(b'p');
    rig.wait_units(10);
    rig.send(b'p');
    assert_eq!(rig.app.status().elapsed_units, 0);

    rig.wait_units(19);
    assert_eq!(rig.app.panic_phase(), Some(PanicPhase::Alarm));
    assert!(!rig.app.panic_locked());

    rig.wait_units(1);
    assert_eq!(rig.app.panic_phase(), Some(PanicPhase::Lockdown));
    assert_eq!(rig.app.lock_cause(), Some(LockCause::Lockdown));
    assert_eq!(rig.take_tx(), b"PPP");
}

#[test]
fn unknown_bytes_are_silently_ignored_when_unlocked() {
    let mut rig = Rig::new();
    for b in [b'x', b'\n', b'M', b'O', 0x00, 0xFF] {
        rig.send(b);
    }
    assert_eq!(rig.app.state(), StateId::Off);
    assert!(rig.channel.tx.is_empty());
    assert_eq!(rig.sink.count(|e| matches!(e, AppEvent::CommandIgnored(_))), 6);
}

#[test]
fn lock_refuses_everything_but_off() {
    let mut rig = Rig::new();
    rig.hw.pressed = true;
    rig.tick();
    rig.hw.pressed = false;
    rig.tick();
    assert_eq!(rig.take_tx(), b"P");

    for b in [b'm', b'p', b'x', b'P', b'\r'] {
        rig.send(b);
        assert_eq!(rig.app.state(), StateId::Panic);
        assert!(rig.app.panic_locked());
        assert_eq!(rig.take_tx(), b"P", "byte {:#04x}", b);
    }
    assert_eq!(rig.sink.count(|e| matches!(e, AppEvent::CommandRejected(_))), 5);

    rig.send(b'o');
    assert_eq!(rig.app.state(), StateId::Off);
    assert!(!rig.app.panic_locked());
    assert_eq!(rig.take_tx(), b"O");
    assert!(rig.sink.events.contains(&AppEvent::PanicUnlocked));
}

#[test]
fn one_command_consumed_per_tick() {
    let mut rig = Rig::new();
    rig.channel.rx.extend([b'm', b'o']);

    rig.tick();
    assert_eq!(rig.app.state(), StateId::Monitor);
    assert_eq!(rig.channel.tx, b"M");

    rig.tick();
    assert_eq!(rig.app.state(), StateId::Off);
    assert_eq!(rig.channel.tx, b"MO");
}

#[test]
fn accepted_commands_are_reported() {
    let mut rig = Rig::new();
    rig.send(b'm');
    rig.send(b'p');
    rig.send(b'o');
    let accepted: Vec<_> = rig
        .sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::CommandAccepted(c) => Some(*c),
            _ => None,
        })
        .collect();
    assert_eq!(accepted, vec![Command::Monitor, Command::Panic, Command::Off]);
}
