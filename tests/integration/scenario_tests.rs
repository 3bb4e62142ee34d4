//! End-to-end walk through a full arm → escalate → lockdown → disarm cycle.

use panicguard::app::events::{AppEvent, TransitionCause};
use panicguard::fsm::context::LockCause;
use panicguard::fsm::{PanicPhase, StateId};

use crate::mock_hw::Rig;

#[test]
fn arm_escalate_lockdown_disarm() {
    let mut rig = Rig::new();
    assert_eq!(rig.app.state(), StateId::Off);
    assert_eq!(rig.sink.events.first(), Some(&AppEvent::Started(StateId::Off)));

    // Arm.
    rig.send(b'm');
    assert_eq!(rig.take_tx(), b"M");
    assert_eq!(rig.app.state(), StateId::Monitor);

    // No re-arm: escalates past 5 units, unlocked.
    rig.wait_units(6);
    assert_eq!(rig.app.state(), StateId::Panic);
    assert!(!rig.app.panic_locked());
    rig.wait_units(1);
    assert_eq!(rig.hw.levels(), (true, true, false));

    // Alarm runs out after 20 units in Panic.
    rig.wait_units(19);
    assert_eq!(rig.app.panic_phase(), Some(PanicPhase::Lockdown));
    assert_eq!(rig.hw.levels(), (true, false, true));
    assert_eq!(rig.take_tx(), b"P");
    assert!(rig.app.panic_locked());

    // Locked: monitor is refused.
    rig.send(b'm');
    assert_eq!(rig.app.state(), StateId::Panic);
    assert_eq!(rig.take_tx(), b"P");

    // Disarm.
    rig.send(b'o');
    assert_eq!(rig.app.state(), StateId::Off);
    assert!(!rig.app.panic_locked());
    assert_eq!(rig.take_tx(), b"O");
    assert_eq!(rig.hw.levels(), (false, false, false));
}

#[test]
fn event_log_for_a_button_panic() {
    let mut rig = Rig::new();
    rig.send(b'm');
    rig.hw.pressed = true;
    rig.tick();
    rig.hw.pressed = false;
    rig.send(b'o');

    assert_eq!(
        rig.sink.events,
        vec![
            AppEvent::Started(StateId::Off),
            AppEvent::StateChanged {
                from: StateId::Off,
                to: StateId::Monitor,
                cause: TransitionCause::Command,
            },
            AppEvent::CommandAccepted(panicguard::app::commands::Command::Monitor),
            AppEvent::PanicLocked(LockCause::Button),
            AppEvent::StateChanged {
                from: StateId::Monitor,
                to: StateId::Panic,
                cause: TransitionCause::Button,
            },
            AppEvent::StateChanged {
                from: StateId::Panic,
                to: StateId::Off,
                cause: TransitionCause::Command,
            },
            AppEvent::PanicUnlocked,
            AppEvent::CommandAccepted(panicguard::app::commands::Command::Off),
        ]
    );
}
