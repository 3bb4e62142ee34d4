//! Time-driven behaviour: monitor escalation, blink and lockdown.

use panicguard::app::events::{AppEvent, TransitionCause};
use panicguard::config::AlarmConfig;
use panicguard::fsm::context::LockCause;
use panicguard::fsm::{PanicPhase, StateId};

use crate::mock_hw::Rig;

#[test]
fn monitor_escalates_only_after_timeout_is_exceeded() {
    let mut rig = Rig::new();
    rig.send(b'm');
    rig.wait_units(5);
    assert_eq!(rig.app.state(), StateId::Monitor);

    rig.wait_units(1);
    assert_eq!(rig.app.state(), StateId::Panic);
    assert!(!rig.app.panic_locked());
    assert!(rig.sink.events.contains(&AppEvent::StateChanged {
        from: StateId::Monitor,
        to: StateId::Panic,
        cause: TransitionCause::MonitorTimeout,
    }));
    // Escalation itself is silent on the wire.
    assert_eq!(rig.channel.tx, b"M");
}

#[test]
fn partial_units_truncate() {
    let mut rig = Rig::new();
    rig.send(b'm');
    rig.timer.advance_ms(5_999);
    rig.tick();
    assert_eq!(rig.app.state(), StateId::Monitor);

    rig.timer.advance_ms(1);
    rig.tick();
    assert_eq!(rig.app.state(), StateId::Panic);
}

#[test]
fn off_and_monitor_keep_outputs_low() {
    let mut rig = Rig::new();
    rig.wait_units(100);
    assert_eq!(rig.hw.levels(), (false, false, false));
    rig.send(b'm');
    rig.wait_units(3);
    assert_eq!(rig.hw.levels(), (false, false, false));
}

#[test]
fn alarm_phase_blinks_once_per_unit() {
    let mut rig = Rig::new();
    rig.send(b'p');
    assert_eq!(rig.hw.levels(), (false, false, false));

    for unit in 1..20u64 {
        rig.wait_units(1);
        let level = unit % 2 == 1;
        assert_eq!(rig.hw.levels(), (level, level, false), "unit {}", unit);
        assert_eq!(rig.app.panic_phase(), Some(PanicPhase::Alarm));
    }
}

#[test]
fn lockdown_starts_exactly_at_alarm_duration() {
    let mut rig = Rig::new();
    rig.send(b'p');
    rig.wait_units(19);
    assert!(!rig.app.panic_locked());
    assert_eq!(rig.take_tx(), b"P");

    rig.wait_units(1);
    assert_eq!(rig.hw.levels(), (true, false, true));
    assert_eq!(rig.app.lock_cause(), Some(LockCause::Lockdown));
    assert_eq!(rig.take_tx(), b"P");
    assert!(rig.sink.events.contains(&AppEvent::PanicLocked(LockCause::Lockdown)));

    for _ in 0..10 {
        rig.wait_units(1);
    }
    assert!(rig.channel.tx.is_empty());
    assert_eq!(rig.hw.levels(), (true, false, true));
}

#[test]
fn lockdown_is_terminal_until_off() {
    let mut rig = Rig::new();
    rig.send(b'm');
    rig.wait_units(6);
    rig.wait_units(20);
    rig.wait_units(10_000);
    assert_eq!(rig.app.state(), StateId::Panic);
    assert_eq!(rig.app.panic_phase(), Some(PanicPhase::Lockdown));
    assert_eq!(rig.hw.levels(), (true, false, true));
}

#[test]
fn custom_time_unit_scales_all_timing() {
    let config = AlarmConfig {
        time_unit_ms: 100,
        monitor_timeout_units: 2,
        alarm_duration_units: 4,
        ..AlarmConfig::default()
    };
    let mut rig = Rig::with_config(config);
    rig.send(b'm');
    rig.timer.advance_ms(299);
    rig.tick();
    assert_eq!(rig.app.state(), StateId::Monitor);
    rig.timer.advance_ms(1);
    rig.tick();
    assert_eq!(rig.app.state(), StateId::Panic);

    rig.timer.advance_ms(400);
    rig.tick();
    assert_eq!(rig.app.lock_cause(), Some(LockCause::Lockdown));
}

#[test]
fn every_transition_resets_the_timer() {
    let mut rig = Rig::new();
    let before = rig.timer.resets;
    rig.send(b'm');
    rig.send(b'm');
    rig.send(b'p');
    rig.send(b'p');
    rig.send(b'o');
    assert_eq!(rig.timer.resets - before, 5);
}

#[test]
fn status_snapshot_tracks_lockdown() {
    let mut rig = Rig::new();
    rig.send(b'p');
    rig.wait_units(25);
    let s = rig.app.status();
    assert_eq!(s.state, StateId::Panic);
    assert_eq!(s.phase, Some(PanicPhase::Lockdown));
    assert_eq!(s.lock, Some(LockCause::Lockdown));
    assert_eq!(s.elapsed_units, 25);
    assert!(s.outputs.relay);
    assert_eq!(s.tick_count, 2);
}
