//! Sensor subsystem: ultrasonic rangers and the readings they produce.
//!
//! A [`DistanceReading`] is produced fresh every control tick for each
//! [`SensorId`].  No history is kept; there is no filtering or smoothing.

pub mod ultrasonic;

/// Speed of sound in cm/µs (≈ 340 m/s).
pub const SOUND_CM_PER_US: f32 = 0.034;

/// Which ranger a reading came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorId {
    Entry,
    Exit,
}

/// One distance sample in centimetres.
///
/// A missing echo (timeout) is reported as `0.0`, exactly like an object
/// at zero distance.  The two cases cannot be told apart; callers treat
/// anything not strictly positive as "no detection".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceReading {
    pub sensor: SensorId,
    pub cm: f32,
}

impl DistanceReading {
    pub fn new(sensor: SensorId, cm: f32) -> Self {
        Self { sensor, cm }
    }

    /// Reading reported when no echo arrived in time.
    pub fn timeout(sensor: SensorId) -> Self {
        Self { sensor, cm: 0.0 }
    }

    /// Convert a round-trip echo duration into a reading.
    pub fn from_echo_us(sensor: SensorId, echo_us: u32) -> Self {
        Self {
            sensor,
            cm: echo_us_to_cm(echo_us),
        }
    }

    /// `true` when the sensor saw something (distance strictly positive).
    pub fn is_detection(&self) -> bool {
        self.cm > 0.0
    }

    /// `true` when an object is detected at or closer than `threshold_cm`.
    pub fn is_within(&self, threshold_cm: f32) -> bool {
        self.is_detection() && self.cm <= threshold_cm
    }
}

/// Round-trip echo time to one-way distance: `µs × 0.034 / 2`.
pub fn echo_us_to_cm(echo_us: u32) -> f32 {
    echo_us as f32 * SOUND_CM_PER_US / 2.0
}
