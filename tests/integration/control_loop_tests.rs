//! Integration tests for the ControlLoop → GateActuator → actuators pipeline.

use std::panic::{AssertUnwindSafe, catch_unwind};

use embedded_hal::delay::DelayNs;
use vehiclegate::app::events::GateEvent;
use vehiclegate::app::gate::GateState;
use vehiclegate::app::ports::Indicator;
use vehiclegate::app::service::ControlLoop;
use vehiclegate::config::SystemConfig;
use vehiclegate::sensors::{SensorId, echo_us_to_cm};

use crate::mock_hw::{ActuatorCall, MockHardware, RecordingSink};

fn make_loop() -> (ControlLoop, MockHardware, RecordingSink) {
    let mut control = ControlLoop::new(SystemConfig::default());
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();
    control.start(&mut hw, &mut sink);
    hw.calls.clear();
    sink.events.clear();
    (control, hw, sink)
}

// ── Threshold rules ───────────────────────────────────────────

#[test]
fn entry_vehicle_closes_gate() {
    let (mut control, mut hw, mut sink) = make_loop();
    hw.script(10.0, 200.0);

    let out = control.tick(&mut hw, &mut sink);

    assert_eq!(out.state, GateState::Closed);
    assert_eq!(
        hw.calls,
        vec![
            ActuatorCall::Led { indicator: Indicator::Ready, on: false },
            ActuatorCall::Led { indicator: Indicator::Alert, on: true },
            ActuatorCall::Servo(90),
        ]
    );
}

#[test]
fn exit_vehicle_reopens_closed_gate() {
    let (mut control, mut hw, mut sink) = make_loop();
    hw.script(10.0, 200.0).script(200.0, 8.0);

    control.tick(&mut hw, &mut sink);
    let out = control.tick(&mut hw, &mut sink);

    assert_eq!(out.state, GateState::Open);
    assert_eq!(hw.servo_angle(), Some(0));
    assert!(hw.indicator_on(Indicator::Ready));
    assert!(!hw.indicator_on(Indicator::Alert));
}

#[test]
fn readings_beyond_threshold_do_nothing() {
    let (mut control, mut hw, mut sink) = make_loop();
    hw.script(15.01, 200.0);

    control.tick(&mut hw, &mut sink);

    assert_eq!(control.state(), GateState::Open);
    assert!(hw.calls.is_empty());
}

#[test]
fn reading_at_threshold_triggers() {
    let (mut control, mut hw, mut sink) = make_loop();
    hw.script(15.0, 200.0);

    control.tick(&mut hw, &mut sink);

    assert_eq!(control.state(), GateState::Closed);
}

#[test]
fn one_millisecond_echo_is_out_of_range() {
    let (mut control, mut hw, mut sink) = make_loop();
    let cm = echo_us_to_cm(1000);
    assert!((cm - 17.0).abs() < 1e-4);
    hw.script(cm, cm);

    control.tick(&mut hw, &mut sink);

    assert_eq!(control.state(), GateState::Open);
    assert!(hw.calls.is_empty());
}

// ── Timeout degradation ───────────────────────────────────────

#[test]
fn timeout_zero_reading_never_acts() {
    let (mut control, mut hw, mut sink) = make_loop();
    // Close first so an (incorrect) exit action would be observable.
    hw.script(5.0, 200.0).script(0.0, 0.0);

    control.tick(&mut hw, &mut sink);
    hw.calls.clear();
    let out = control.tick(&mut hw, &mut sink);

    assert_eq!(out.state, GateState::Closed);
    assert_eq!(out.exit.cm, 0.0);
    assert!(hw.calls.is_empty());
}

// ── Idempotence ───────────────────────────────────────────────

#[test]
fn repeated_entry_detection_closes_once() {
    let (mut control, mut hw, mut sink) = make_loop();
    hw.script(10.0, 200.0).script(9.0, 200.0).script(8.0, 200.0);

    for _ in 0..3 {
        control.tick(&mut hw, &mut sink);
    }

    assert_eq!(hw.calls.len(), 3, "one close = two LEDs + one servo write");
    assert_eq!(sink.transitions(), 1);
}

#[test]
fn exit_detection_while_open_touches_nothing() {
    let (mut control, mut hw, mut sink) = make_loop();
    hw.script(200.0, 5.0);

    control.tick(&mut hw, &mut sink);

    assert!(hw.calls.is_empty());
    assert_eq!(sink.transitions(), 0);
}

// ── Conflict resolution ───────────────────────────────────────

#[test]
fn simultaneous_entry_and_exit_ends_open() {
    let (mut control, mut hw, mut sink) = make_loop();
    hw.script(10.0, 10.0);

    let out = control.tick(&mut hw, &mut sink);

    assert_eq!(out.state, GateState::Open);
    assert_eq!(
        sink.events,
        vec![
            GateEvent::Readings { entry: out.entry, exit: out.exit },
            GateEvent::GateChanged { from: GateState::Open, to: GateState::Closed },
            GateEvent::GateChanged { from: GateState::Closed, to: GateState::Open },
        ]
    );
    assert_eq!(hw.servo_angle(), Some(0));
}

// ── Ordering and reporting ────────────────────────────────────

#[test]
fn every_tick_reads_entry_then_exit_and_reports() {
    let (mut control, mut hw, mut sink) = make_loop();

    control.tick(&mut hw, &mut sink);
    control.tick(&mut hw, &mut sink);

    assert_eq!(
        hw.measured,
        vec![SensorId::Entry, SensorId::Exit, SensorId::Entry, SensorId::Exit]
    );
    let readings = sink
        .events
        .iter()
        .filter(|e| matches!(e, GateEvent::Readings { .. }))
        .count();
    assert_eq!(readings, 2);
}

// ── Cadence ───────────────────────────────────────────────────

/// Records every sleep and aborts the endless loop after `limit` of them.
struct CountingDelay {
    sleeps_ms: Vec<u32>,
    limit: usize,
}

impl DelayNs for CountingDelay {
    fn delay_ns(&mut self, _ns: u32) {
        unreachable!("control loop sleeps in milliseconds");
    }

    fn delay_ms(&mut self, ms: u32) {
        self.sleeps_ms.push(ms);
        if self.sleeps_ms.len() >= self.limit {
            panic!("stop");
        }
    }
}

#[test]
fn run_sleeps_fixed_interval_after_every_tick() {
    let (mut control, mut hw, mut sink) = make_loop();
    hw.script(10.0, 200.0);
    let mut delay = CountingDelay { sleeps_ms: Vec::new(), limit: 3 };

    let result = catch_unwind(AssertUnwindSafe(|| {
        control.run(&mut hw, &mut sink, &mut delay);
    }));

    assert!(result.is_err());
    assert_eq!(delay.sleeps_ms, vec![200, 200, 200]);
    assert_eq!(control.tick_count(), 3);
    assert_eq!(control.state(), GateState::Closed);
}
