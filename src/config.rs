//! System configuration parameters
//!
//! All tunable parameters for the gate controller.  Values are compile-time
//! defaults; nothing is persisted across power cycles.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::pins;

/// Upper bound for the echo wait.  HC-SR04 class sensors give up after
/// ~38 ms, so waiting longer can never yield a real echo.
pub const MAX_ECHO_TIMEOUT_US: u32 = 38_000;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Detection ---
    /// A reading in (0, threshold] counts as a vehicle present (cm)
    pub detection_threshold_cm: f32,

    // --- Ultrasonic timing ---
    /// Maximum time to wait for an echo pulse (microseconds)
    pub echo_timeout_us: u32,
    /// Trigger held low before the pulse (microseconds)
    pub trigger_settle_us: u32,
    /// Trigger pulse width (microseconds)
    pub trigger_pulse_us: u32,

    // --- Servo ---
    /// Servo angle for the open gate (degrees)
    pub open_angle_deg: u8,
    /// Servo angle for the closed gate (degrees)
    pub closed_angle_deg: u8,
    /// Servo pulse width at 0° (microseconds)
    pub servo_min_pulse_us: u16,
    /// Servo pulse width at 180° (microseconds)
    pub servo_max_pulse_us: u16,

    // --- Timing ---
    /// Sleep at the end of every control loop iteration (milliseconds)
    pub loop_interval_ms: u32,

    // --- Logging ---
    /// Console UART baud rate
    pub log_baud_rate: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Detection
            detection_threshold_cm: 15.0,

            // Ultrasonic
            echo_timeout_us: 20_000, // ~3.4 m round trip
            trigger_settle_us: 2,
            trigger_pulse_us: 10,

            // Servo (Arduino Servo library pulse range)
            open_angle_deg: 0,
            closed_angle_deg: 90,
            servo_min_pulse_us: 544,
            servo_max_pulse_us: 2400,

            // Timing
            loop_interval_ms: 200, // 5 Hz

            // Logging
            log_baud_rate: 9600,
        }
    }
}

impl SystemConfig {
    /// Range-check every field.  Invalid values are rejected, not clamped.
    pub fn validate(&self) -> Result<()> {
        if !(self.detection_threshold_cm > 0.0 && self.detection_threshold_cm.is_finite()) {
            return Err(Error::Config("detection_threshold_cm must be positive"));
        }
        if self.echo_timeout_us == 0 || self.echo_timeout_us > MAX_ECHO_TIMEOUT_US {
            return Err(Error::Config("echo_timeout_us out of range"));
        }
        if self.trigger_pulse_us == 0 {
            return Err(Error::Config("trigger_pulse_us must be non-zero"));
        }
        if self.open_angle_deg > 180 || self.closed_angle_deg > 180 {
            return Err(Error::Config("servo angle above 180"));
        }
        if self.open_angle_deg == self.closed_angle_deg {
            return Err(Error::Config("open and closed setpoints are equal"));
        }
        if self.servo_min_pulse_us >= self.servo_max_pulse_us {
            return Err(Error::Config("servo pulse range is empty"));
        }
        if u32::from(self.servo_max_pulse_us) > pins::SERVO_FRAME_US {
            return Err(Error::Config("servo pulse longer than PWM frame"));
        }
        if self.loop_interval_ms == 0 {
            return Err(Error::Config("loop_interval_ms must be non-zero"));
        }
        if self.log_baud_rate == 0 {
            return Err(Error::Config("log_baud_rate must be non-zero"));
        }
        Ok(())
    }
}
