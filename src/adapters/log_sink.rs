//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing application events to the logger
//! (which goes to the UART console in production).  The per-tick reading
//! line keeps the fixed human-readable format operators grep for:
//!
//! ```text
//! Entry Sensor: 12.34 cm | Exit Sensor: 0.00 cm
//! ```

use core::fmt::Write;

use log::{info, warn};

use crate::app::events::GateEvent;
use crate::app::ports::EventSink;
use crate::sensors::DistanceReading;

/// Enough for two readings at the maximum echo timeout.
pub const READINGS_LINE_CAPACITY: usize = 96;

/// Render the per-tick reading line.  Distances print with two decimals.
pub fn format_readings(
    entry: &DistanceReading,
    exit: &DistanceReading,
) -> Result<heapless::String<READINGS_LINE_CAPACITY>, core::fmt::Error> {
    let mut line = heapless::String::new();
    write!(
        line,
        "Entry Sensor: {:.2} cm | Exit Sensor: {:.2} cm",
        entry.cm, exit.cm
    )?;
    Ok(line)
}

/// Adapter that logs every [`GateEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &GateEvent) {
        match event {
            GateEvent::Readings { entry, exit } => match format_readings(entry, exit) {
                Ok(line) => info!("{}", line),
                Err(_) => warn!("readings line overflow: entry={} exit={}", entry.cm, exit.cm),
            },
            GateEvent::GateChanged { from, to } => {
                info!("GATE | {:?} -> {:?}", from, to);
            }
            GateEvent::Started(state) => {
                info!("START | gate={:?}", state);
            }
        }
    }
}
