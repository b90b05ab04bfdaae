//! Integration tests for the sample → classify → display → pump → record
//! pipeline, driven through `AppService::run_cycle` against the mock
//! gateway.

use crate::mock_hw::{GatewayCall, ManualClock, MockGateway, RecordingSink};

use soilguard::app::events::AppEvent;
use soilguard::app::ports::ActuatorError;
use soilguard::app::service::AppService;
use soilguard::config::SystemConfig;
use soilguard::error::{Error, PumpOperationError, TransportError};
use soilguard::fsm::MoistureState;

fn make_app(raws: &[i32], start_ms: u64) -> (AppService, MockGateway, ManualClock, RecordingSink) {
    let mut app = AppService::new(SystemConfig::default());
    let mut sink = RecordingSink::new();
    app.start(&mut sink);
    let clock = ManualClock::at(start_ms);
    let mut hw = MockGateway::with_readings(raws);
    hw.attach_clock(&clock);
    (app, hw, clock, sink)
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 0.05
}

// ── End-to-end walk through the buckets ───────────────────────

#[test]
fn dry_moderate_wet_sequence() {
    let (mut app, mut hw, clock, mut sink) = make_app(&[700, 665, 600], 2000);

    let mut states = Vec::new();
    for _ in 0..3 {
        states.push(app.run_cycle(&mut hw, &clock, &mut sink).unwrap());
        clock.advance(2000);
    }

    assert_eq!(
        states,
        [MoistureState::Dry, MoistureState::ModeratelyDry, MoistureState::Wet]
    );
    assert_eq!(hw.messages(), ["DRY: 19%", "MOD: 38%", "WET: 73%"]);
    assert_eq!(hw.pump_runs(), [2000], "only the dry cycle waters");

    let series = app.monitor().series_snapshot();
    assert_eq!(series.len(), 3);
    assert!(approx(series[0], 18.9), "got {}", series[0]);
    assert!(approx(series[1], 37.8), "got {}", series[1]);
    assert!(approx(series[2], 73.0), "got {}", series[2]);
}

#[test]
fn display_precedes_pump_within_a_cycle() {
    let (mut app, mut hw, clock, mut sink) = make_app(&[720], 0);
    app.run_cycle(&mut hw, &clock, &mut sink).unwrap();

    assert_eq!(
        hw.calls,
        [
            GatewayCall::ReadMoisture,
            GatewayCall::ShowMessage("DRY: 8%".to_string()),
            GatewayCall::RunPump {
                duration_ms: 2000,
                at_ms: 0
            },
        ]
    );
}

#[test]
fn state_changes_are_reported_only_on_change() {
    let (mut app, mut hw, clock, mut sink) = make_app(&[600, 610, 700], 0);
    for _ in 0..3 {
        app.run_cycle(&mut hw, &clock, &mut sink).unwrap();
        clock.advance(2000);
    }

    let changes: Vec<_> = sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::StateChanged { from, to } => Some((*from, *to)),
            _ => None,
        })
        .collect();
    assert_eq!(
        changes,
        [
            (MoistureState::Started, MoistureState::Wet),
            (MoistureState::Wet, MoistureState::Dry),
        ]
    );
}

// ── Pump cooldown ─────────────────────────────────────────────

#[test]
fn dry_cycles_inside_cooldown_pump_once() {
    let (mut app, mut hw, clock, mut sink) = make_app(&[700, 700], 2000);

    app.run_cycle(&mut hw, &clock, &mut sink).unwrap();
    // Pump ran 2000..4000, window open until 10_000.
    clock.set(6000);
    app.run_cycle(&mut hw, &clock, &mut sink).unwrap();

    assert_eq!(hw.pump_runs(), [2000]);
    assert!(
        sink.events
            .contains(&AppEvent::PumpSkipped { remaining_ms: 4000 })
    );
    // A skipped pump is not a failure: both readings are recorded.
    assert_eq!(app.monitor().series_len(), 2);
    assert_eq!(app.monitor().pump_activations(), 1);
}

#[test]
fn pump_fires_again_once_cooldown_expires() {
    let (mut app, mut hw, clock, mut sink) = make_app(&[700, 700, 700], 2000);

    app.run_cycle(&mut hw, &clock, &mut sink).unwrap();
    clock.set(8000);
    app.run_cycle(&mut hw, &clock, &mut sink).unwrap();
    clock.set(10_000);
    app.run_cycle(&mut hw, &clock, &mut sink).unwrap();

    assert_eq!(hw.pump_runs(), [2000, 10_000]);
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::PumpActivated { .. })),
        2
    );
}

#[test]
fn wet_cycles_never_touch_the_pump() {
    let (mut app, mut hw, clock, mut sink) = make_app(&[550, 580, 640], 0);
    for _ in 0..3 {
        app.run_cycle(&mut hw, &clock, &mut sink).unwrap();
        clock.advance(2000);
    }
    assert!(hw.pump_runs().is_empty());
    assert!(!app.pump_cooling_down(clock.now()));
}

// ── Failure handling ──────────────────────────────────────────

#[test]
fn read_failure_aborts_cycle_and_loop_continues() {
    let (mut app, mut hw, clock, mut sink) = make_app(&[], 0);
    hw.push_read_failure(TransportError::ReadFailed);
    hw.push_reading(600);

    let first = app.run_cycle(&mut hw, &clock, &mut sink);
    assert_eq!(first, Err(Error::Transport(TransportError::ReadFailed)));
    assert_eq!(app.state(), MoistureState::Started);
    assert!(app.monitor().series_snapshot().is_empty());
    assert_eq!(app.monitor().last_raw_reading(), None);
    assert!(sink.events.contains(&AppEvent::CycleFailed {
        cycle: 1,
        error: Error::Transport(TransportError::ReadFailed),
    }));

    let second = app.run_cycle(&mut hw, &clock, &mut sink);
    assert_eq!(second, Ok(MoistureState::Wet));

    let monitor = app.monitor();
    assert_eq!(monitor.series_len(), 1);
    assert_eq!(monitor.completed_cycles(), 1);
    assert_eq!(monitor.failed_cycles(), 1);
    assert_eq!(app.cycle_count(), 2);
}

#[test]
fn pump_failure_wraps_transport_cause() {
    let (mut app, mut hw, clock, mut sink) = make_app(&[700, 700], 0);
    hw.pump_error = Some(ActuatorError::Transport(TransportError::WriteFailed));

    let result = app.run_cycle(&mut hw, &clock, &mut sink);
    assert_eq!(
        result,
        Err(Error::Pump(PumpOperationError {
            cause: TransportError::WriteFailed
        }))
    );
    // The message went out before the pump was commanded.
    assert_eq!(hw.messages(), ["DRY: 19%"]);
    assert!(app.monitor().series_snapshot().is_empty());
    assert_eq!(app.monitor().pump_activations(), 0);

    // The failed run still opened the cooldown window.
    hw.pump_error = None;
    assert!(app.pump_cooling_down(clock.now()));
    app.run_cycle(&mut hw, &clock, &mut sink).unwrap();
    assert_eq!(hw.pump_runs().len(), 1);
}

#[test]
fn interrupted_pump_surfaces_interrupted_wait() {
    let (mut app, mut hw, clock, mut sink) = make_app(&[700], 0);
    hw.pump_error = Some(ActuatorError::Interrupted);

    let result = app.run_cycle(&mut hw, &clock, &mut sink);
    assert_eq!(result, Err(Error::InterruptedWait));
    assert!(app.monitor().series_snapshot().is_empty());
}

#[test]
fn display_failure_keeps_last_raw_but_records_nothing() {
    let (mut app, mut hw, clock, mut sink) = make_app(&[720], 0);
    hw.fail_display = true;

    let result = app.run_cycle(&mut hw, &clock, &mut sink);
    assert_eq!(result, Err(Error::Transport(TransportError::DisplayFailed)));
    assert!(hw.pump_runs().is_empty());

    let monitor = app.monitor();
    assert_eq!(monitor.last_raw_reading(), Some(720));
    assert_eq!(monitor.current_state(), MoistureState::Dry);
    assert!(monitor.series_snapshot().is_empty());
}

// ── Configuration ─────────────────────────────────────────────

#[test]
fn custom_thresholds_and_calibration_apply() {
    let config = SystemConfig {
        high_raw: 800,
        low_raw: 400,
        dry_threshold_raw: 750,
        moderately_dry_threshold_raw: 700,
        pump_run_ms: 500,
        ..Default::default()
    };
    let mut app = AppService::new(config);
    let mut sink = RecordingSink::new();
    app.start(&mut sink);
    let clock = ManualClock::at(0);
    let mut hw = MockGateway::with_readings(&[720, 760]);
    hw.attach_clock(&clock);

    // 720 is Dry under the defaults but only moderately dry here.
    assert_eq!(
        app.run_cycle(&mut hw, &clock, &mut sink),
        Ok(MoistureState::ModeratelyDry)
    );
    assert_eq!(
        app.run_cycle(&mut hw, &clock, &mut sink),
        Ok(MoistureState::Dry)
    );
    assert_eq!(hw.messages(), ["MOD: 20%", "DRY: 10%"]);
    assert_eq!(
        hw.calls.last(),
        Some(&GatewayCall::RunPump {
            duration_ms: 500,
            at_ms: 0
        })
    );
}

#[test]
fn telemetry_tracks_the_loop() {
    let (mut app, mut hw, clock, mut sink) = make_app(&[700, 600], 1000);
    app.run_cycle(&mut hw, &clock, &mut sink).unwrap();
    clock.advance(2000);
    app.run_cycle(&mut hw, &clock, &mut sink).unwrap();

    let t = app.build_telemetry(clock.now());
    assert_eq!(t.state, "WET");
    assert_eq!(t.cycles_in_state, 1);
    assert_eq!(t.last_raw, Some(600));
    assert_eq!(t.series_len, 2);
    assert_eq!(t.cycles, 2);
    assert_eq!(t.failed_cycles, 0);
    assert_eq!(t.pump_activations, 1);
    // Pump ended at 3000, now is 5000.
    assert_eq!(t.cooldown_remaining_ms, 4000);
}

#[test]
fn telemetry_counts_cycles_held_in_state() {
    let (mut app, mut hw, clock, mut sink) = make_app(&[600, 610, 620, 700], 0);
    for _ in 0..3 {
        app.run_cycle(&mut hw, &clock, &mut sink).unwrap();
        clock.advance(2000);
    }
    assert_eq!(app.build_telemetry(clock.now()).cycles_in_state, 3);

    app.run_cycle(&mut hw, &clock, &mut sink).unwrap();
    let t = app.build_telemetry(clock.now());
    assert_eq!(t.state, "DRY");
    assert_eq!(t.cycles_in_state, 1);
}
