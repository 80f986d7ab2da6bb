//! Hobby servo driver for the gate arm.
//!
//! Angle is encoded as a pulse width inside a 20 ms (50 Hz) frame, linear
//! between `min_pulse_us` at 0° and `max_pulse_us` at 180°.  The pulse is
//! generated by the LEDC channel configured in [`hw_init`].
//!
//! ## Dual-target design
//!
//! On ESP-IDF: writes the LEDC duty register via hw_init.
//! On host/test: writes the simulated pin bank.

use log::warn;

use crate::drivers::hw_init;
use crate::error::Error;
use crate::pins;

/// Largest commandable angle.
pub const MAX_ANGLE_DEG: u8 = 180;


pub struct ServoDriver {
    channel: u32,
    min_pulse_us: u16,
    max_pulse_us: u16,
    angle: Option<u8>,
}

impl ServoDriver {
    pub fn new(channel: u32, min_pulse_us: u16, max_pulse_us: u16) -> Self {
        Self {
            channel,
            min_pulse_us,
            max_pulse_us,
            angle: None,
        }
    }

    /// Command `degrees` (clamped to 0–180).  A failed register write is
    /// logged; there is no position feedback to retry against.
    pub fn set_angle(&mut self, degrees: u8) {
        let degrees = degrees.min(MAX_ANGLE_DEG);
        let pulse = angle_to_pulse_us(degrees, self.min_pulse_us, self.max_pulse_us);
        let duty = pulse_us_to_duty(pulse, pins::SERVO_PWM_RESOLUTION_BITS);
        if let Err(e) = hw_init::ledc_set(self.channel, duty) {
            warn!("servo {}° not applied: {}", degrees, Error::from(e));
        }
        self.angle = Some(degrees);
    }

    /// Last commanded angle; `None` before the first command.
    pub fn angle(&self) -> Option<u8> {
        self.angle
    }
}

/// Linear angle → pulse width mapping, angle clamped to 0–180.
pub fn angle_to_pulse_us(degrees: u8, min_pulse_us: u16, max_pulse_us: u16) -> u16 {
    let degrees = u32::from(degrees.min(MAX_ANGLE_DEG));
    let span = u32::from(max_pulse_us.saturating_sub(min_pulse_us));
    min_pulse_us + (span * degrees / u32::from(MAX_ANGLE_DEG)) as u16
}

/// Pulse width → LEDC duty counts at `resolution_bits` over one frame.
pub fn pulse_us_to_duty(pulse_us: u16, resolution_bits: u32) -> u32 {
    let full_scale = 1u64 << resolution_bits;
    (u64::from(pulse_us) * full_scale / u64::from(pins::SERVO_FRAME_US)) as u32
}
