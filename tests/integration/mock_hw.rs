//! Mock hardware adapter for integration tests.
//!
//! Serves scripted distances per ranger and records every actuator call,
//! so tests can assert on the full command history without touching real
//! GPIO/PWM registers or waiting on real echo timing.

use std::collections::VecDeque;

use vehiclegate::app::events::GateEvent;
use vehiclegate::app::ports::{ActuatorPort, EventSink, Indicator, RangingPort};
use vehiclegate::sensors::{DistanceReading, SensorId};

/// Distance served once a script runs dry: nothing in range.
pub const NOTHING_IN_RANGE_CM: f32 = 200.0;

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum ActuatorCall {
    Servo(u8),
    Led { indicator: Indicator, on: bool },
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub calls: Vec<ActuatorCall>,
    pub measured: Vec<SensorId>,
    entry: VecDeque<f32>,
    exit: VecDeque<f32>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            measured: Vec::new(),
            entry: VecDeque::new(),
            exit: VecDeque::new(),
        }
    }

    /// Queue one tick's worth of readings.
    pub fn script(&mut self, entry_cm: f32, exit_cm: f32) -> &mut Self {
        self.entry.push_back(entry_cm);
        self.exit.push_back(exit_cm);
        self
    }

    pub fn servo_angle(&self) -> Option<u8> {
        self.calls.iter().rev().find_map(|c| match c {
            ActuatorCall::Servo(deg) => Some(*deg),
            ActuatorCall::Led { .. } => None,
        })
    }

    pub fn indicator_on(&self, which: Indicator) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::Led { indicator, on } if *indicator == which => Some(*on),
                _ => None,
            })
            .unwrap_or(false)
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl RangingPort for MockHardware {
    fn measure(&mut self, sensor: SensorId) -> DistanceReading {
        self.measured.push(sensor);
        let queue = match sensor {
            SensorId::Entry => &mut self.entry,
            SensorId::Exit => &mut self.exit,
        };
        DistanceReading::new(sensor, queue.pop_front().unwrap_or(NOTHING_IN_RANGE_CM))
    }
}

impl ActuatorPort for MockHardware {
    fn set_servo_angle(&mut self, degrees: u8) {
        self.calls.push(ActuatorCall::Servo(degrees));
    }

    fn set_indicator(&mut self, indicator: Indicator, on: bool) {
        self.calls.push(ActuatorCall::Led { indicator, on });
    }
}

// ── RecordingSink ─────────────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<GateEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn transitions(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, GateEvent::GateChanged { .. }))
            .count()
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &GateEvent) {
        self.events.push(event.clone());
    }
}
