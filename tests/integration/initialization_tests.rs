//! Integration tests for start-up: initial gate state and outputs.

use vehiclegate::app::events::GateEvent;
use vehiclegate::app::gate::GateState;
use vehiclegate::app::ports::Indicator;
use vehiclegate::app::service::ControlLoop;
use vehiclegate::config::SystemConfig;

use crate::mock_hw::{ActuatorCall, MockHardware, RecordingSink};

#[test]
fn start_leaves_gate_open_green_on_red_off() {
    let mut control = ControlLoop::new(SystemConfig::default());
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();

    control.start(&mut hw, &mut sink);

    assert_eq!(control.state(), GateState::Open);
    assert!(hw.indicator_on(Indicator::Ready));
    assert!(!hw.indicator_on(Indicator::Alert));
    assert_eq!(hw.servo_angle(), Some(SystemConfig::default().open_angle_deg));
    assert_eq!(sink.events, vec![GateEvent::Started(GateState::Open)]);
}

#[test]
fn start_does_not_measure() {
    let mut control = ControlLoop::new(SystemConfig::default());
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();

    control.start(&mut hw, &mut sink);

    assert!(hw.measured.is_empty());
    assert_eq!(control.tick_count(), 0);
}

#[test]
fn setpoints_come_from_config() {
    let mut config = SystemConfig::default();
    config.open_angle_deg = 10;
    config.closed_angle_deg = 100;
    let mut control = ControlLoop::new(config);
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();

    control.start(&mut hw, &mut sink);
    assert_eq!(hw.calls.last(), Some(&ActuatorCall::Servo(10)));

    hw.script(3.0, 200.0);
    control.tick(&mut hw, &mut sink);
    assert_eq!(hw.servo_angle(), Some(100));
}
