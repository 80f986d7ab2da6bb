//! Control loop service: the hexagonal core.
//!
//! [`ControlLoop`] owns the [`GateActuator`] (and with it the gate state)
//! plus the live configuration.  All I/O flows through port traits
//! injected at call sites, making the whole loop testable with mock
//! adapters and no real delays.
//!
//! ```text
//!  RangingPort ──▶ ┌─────────────────────────┐ ──▶ EventSink
//!                  │       ControlLoop       │
//! ActuatorPort ◀── │    thresholds · gate    │
//!                  └─────────────────────────┘
//! ```
//!
//! Each tick reads Entry then Exit, reports both, then evaluates the entry
//! rule (close) before the exit rule (open).  When both fire in one tick
//! the exit rule runs last and the gate ends Open.

use embedded_hal::delay::DelayNs;
use log::info;

use crate::config::SystemConfig;
use crate::sensors::{DistanceReading, SensorId};

use super::events::GateEvent;
use super::gate::{GateActuator, GateState, Setpoints};
use super::ports::{ActuatorPort, EventSink, RangingPort};

/// What one tick observed and where it left the gate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutcome {
    pub entry: DistanceReading,
    pub exit: DistanceReading,
    pub state: GateState,
}

// ───────────────────────────────────────────────────────────────
// ControlLoop
// ───────────────────────────────────────────────────────────────

pub struct ControlLoop {
    gate: GateActuator,
    config: SystemConfig,
    tick_count: u64,
}

impl ControlLoop {
    /// Construct the loop from configuration.
    ///
    /// Does **not** touch outputs: call [`start`](Self::start) next.
    pub fn new(config: SystemConfig) -> Self {
        let gate = GateActuator::new(Setpoints {
            open_deg: config.open_angle_deg,
            closed_deg: config.closed_angle_deg,
        });
        Self {
            gate,
            config,
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Establish the initial outputs: gate Open, ready LED on, alert LED
    /// off, servo at the open setpoint.  Run once, before the first tick.
    pub fn start(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        self.gate.apply_initial(hw);
        sink.emit(&GateEvent::Started(self.gate.state()));
        info!("ControlLoop started, gate {:?}", self.gate.state());
    }

    /// Tick forever, sleeping `loop_interval_ms` after every iteration.
    /// The sleep is fixed; time spent measuring is not subtracted.
    pub fn run(
        &mut self,
        hw: &mut (impl RangingPort + ActuatorPort),
        sink: &mut impl EventSink,
        delay: &mut impl DelayNs,
    ) -> ! {
        loop {
            self.tick(hw, sink);
            delay.delay_ms(self.config.loop_interval_ms);
        }
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one iteration without the trailing sleep.
    ///
    /// `hw` implements both [`RangingPort`] and [`ActuatorPort`].
    pub fn tick(
        &mut self,
        hw: &mut (impl RangingPort + ActuatorPort),
        sink: &mut impl EventSink,
    ) -> TickOutcome {
        self.tick_count += 1;

        // 1. Sample both rangers, entry first.
        let entry = hw.measure(SensorId::Entry);
        let exit = hw.measure(SensorId::Exit);

        // 2. Report readings.
        sink.emit(&GateEvent::Readings { entry, exit });

        // 3. Entry rule, then 4. exit rule.  Order is the tie-break.
        let threshold = self.config.detection_threshold_cm;
        if entry.is_within(threshold) {
            self.transition(GateState::Closed, hw, sink);
        }
        if exit.is_within(threshold) {
            self.transition(GateState::Open, hw, sink);
        }

        TickOutcome {
            entry,
            exit,
            state: self.gate.state(),
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current gate state.
    pub fn state(&self) -> GateState {
        self.gate.state()
    }

    /// Total ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    // ── Internal ──────────────────────────────────────────────

    fn transition(
        &mut self,
        to: GateState,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) {
        let from = self.gate.state();
        let moved = match to {
            GateState::Closed => self.gate.close(hw),
            GateState::Open => self.gate.open(hw),
        };
        if moved {
            sink.emit(&GateEvent::GateChanged { from, to });
        }
    }
}
