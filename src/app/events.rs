//! Outbound application events.
//!
//! The [`ControlLoop`](super::service::ControlLoop) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  The log adapter renders
//! them on the serial console; tests record them.

use crate::app::gate::GateState;
use crate::sensors::DistanceReading;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum GateEvent {
    /// Initialisation finished; carries the initial gate state.
    Started(GateState),

    /// Both rangers were sampled this tick (entry first).
    Readings {
        entry: DistanceReading,
        exit: DistanceReading,
    },

    /// The gate moved between states.
    GateChanged { from: GateState, to: GateState },
}
