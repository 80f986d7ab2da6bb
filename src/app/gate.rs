//! Gate actuator: the barrier's binary state and its outputs.
//!
//! [`GateActuator`] owns the only copy of [`GateState`] and is the only
//! code that changes it.  Every transition drives both LEDs and the servo
//! in one step, so after any call returns the outputs match the state.
//! Both transitions are idempotent: repeating one touches no pins.

use log::debug;

use super::ports::{ActuatorPort, Indicator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GateState {
    #[default]
    Open,
    Closed,
}

/// Servo angles for the two gate positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Setpoints {
    pub open_deg: u8,
    pub closed_deg: u8,
}

pub struct GateActuator {
    state: GateState,
    setpoints: Setpoints,
}

impl GateActuator {
    /// Logical state starts Open; call [`apply_initial`](Self::apply_initial)
    /// once to bring the outputs in line.
    pub fn new(setpoints: Setpoints) -> Self {
        Self {
            state: GateState::Open,
            setpoints,
        }
    }

    /// Drive every output for the current state, unconditionally.
    /// Used once at init, when the physical outputs are unknown.
    pub fn apply_initial(&self, hw: &mut impl ActuatorPort) {
        self.drive(self.state, hw);
    }

    /// Close the gate.  Returns `true` if a transition happened.
    pub fn close(&mut self, hw: &mut impl ActuatorPort) -> bool {
        self.transition(GateState::Closed, hw)
    }

    /// Open the gate.  Returns `true` if a transition happened.
    pub fn open(&mut self, hw: &mut impl ActuatorPort) -> bool {
        self.transition(GateState::Open, hw)
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    fn transition(&mut self, to: GateState, hw: &mut impl ActuatorPort) -> bool {
        if self.state == to {
            return false;
        }
        debug!("gate: {:?} -> {:?}", self.state, to);
        self.drive(to, hw);
        self.state = to;
        true
    }

    // LED that goes dark is switched first, then the one that lights,
    // then the servo.
    fn drive(&self, state: GateState, hw: &mut impl ActuatorPort) {
        match state {
            GateState::Closed => {
                hw.set_indicator(Indicator::Ready, false);
                hw.set_indicator(Indicator::Alert, true);
                hw.set_servo_angle(self.setpoints.closed_deg);
            }
            GateState::Open => {
                hw.set_indicator(Indicator::Alert, false);
                hw.set_indicator(Indicator::Ready, true);
                hw.set_servo_angle(self.setpoints.open_deg);
            }
        }
    }
}
