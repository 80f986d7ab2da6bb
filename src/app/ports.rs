//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ControlLoop (domain)
//! ```
//!
//! Driven adapters (rangers, servo/LEDs, event sinks, clocks) implement these
//! traits.  The [`ControlLoop`](super::service::ControlLoop) consumes them via
//! generics, so the domain core never touches hardware directly and can be
//! exercised on the host with simulated sensors and no real timing delays.

use crate::sensors::{DistanceReading, SensorId};

// ───────────────────────────────────────────────────────────────
// Ranging port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this to obtain a distance.
pub trait RangingPort {
    /// Fire one ping on `sensor` and return the measured distance.
    ///
    /// Never fails: a missing echo or a pin error is reported as a zero
    /// reading.  Blocks for at most the configured echo timeout.
    fn measure(&mut self, sensor: SensorId) -> DistanceReading;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// The two discrete status LEDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    /// Green: gate open, vehicles may pass.
    Ready,
    /// Red: gate closed.
    Alert,
}

/// Write-side port: the domain calls this to command actuators.
///
/// Commands are fire-and-forget; there is no position feedback.
pub trait ActuatorPort {
    /// Move the gate servo to `degrees` (0–180).
    fn set_servo_angle(&mut self, degrees: u8);

    /// Switch one status LED on or off.
    fn set_indicator(&mut self, indicator: Indicator, on: bool);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits [`GateEvent`](super::events::GateEvent)s through this
/// port.  Adapters decide where they go (serial log, test recorder).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::GateEvent);
}

// ───────────────────────────────────────────────────────────────
// Time port (driven adapter: system timer → domain)
// ───────────────────────────────────────────────────────────────

/// Monotonic microsecond clock used to time echo pulses.
pub trait TimePort {
    /// Microseconds since boot (monotonic, wraps at `u64::MAX`).
    fn uptime_us(&self) -> u64;
}
