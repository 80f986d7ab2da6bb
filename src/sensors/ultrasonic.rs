//! HC-SR04 style ultrasonic ranger driver.
//!
//! A 10 µs pulse on the trigger line makes the module emit an ultrasonic
//! burst; the echo line then goes HIGH for as long as the sound took to
//! come back.  The driver measures that HIGH pulse against a microsecond
//! clock, giving up after a fixed timeout.
//!
//! Generic over `embedded-hal` 1.0 pins and delays, so the same code runs
//! against ESP32 GPIO on target and scripted fakes on the host.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::app::ports::TimePort;
use crate::config::SystemConfig;
use crate::error::SensorError;

/// Trigger and echo timing for one measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseTiming {
    pub settle_us: u32,
    pub pulse_us: u32,
    pub timeout_us: u32,
}

impl From<&SystemConfig> for PulseTiming {
    fn from(c: &SystemConfig) -> Self {
        Self {
            settle_us: c.trigger_settle_us,
            pulse_us: c.trigger_pulse_us,
            timeout_us: c.echo_timeout_us,
        }
    }
}

/// One ranger: a trigger output and an echo input.
pub struct Ultrasonic<TRIG, ECHO> {
    trigger: TRIG,
    echo: ECHO,
}

impl<TRIG: OutputPin, ECHO: InputPin> Ultrasonic<TRIG, ECHO> {
    /// Both pins must already be configured (output / input).
    pub fn new(trigger: TRIG, echo: ECHO) -> Self {
        Self { trigger, echo }
    }

    /// Fire one ping and return the echo HIGH time in microseconds.
    ///
    /// Returns `Ok(0)` if no complete echo pulse is seen within
    /// `timing.timeout_us`.  Blocks for at most the trigger sequence plus
    /// the timeout.
    pub fn echo_duration_us(
        &mut self,
        delay: &mut impl DelayNs,
        clock: &impl TimePort,
        timing: &PulseTiming,
    ) -> Result<u32, SensorError> {
        self.fire(delay, timing)?;
        self.pulse_in_high(clock, timing.timeout_us)
    }

    fn fire(&mut self, delay: &mut impl DelayNs, timing: &PulseTiming) -> Result<(), SensorError> {
        self.trigger
            .set_low()
            .map_err(|_| SensorError::TriggerWriteFailed)?;
        delay.delay_us(timing.settle_us);
        self.trigger
            .set_high()
            .map_err(|_| SensorError::TriggerWriteFailed)?;
        delay.delay_us(timing.pulse_us);
        self.trigger
            .set_low()
            .map_err(|_| SensorError::TriggerWriteFailed)
    }

    /// Measure a HIGH pulse on the echo line.
    ///
    /// Any pulse already in progress is skipped first, so only a complete
    /// pulse is timed.  The timeout bounds all three waits together.
    fn pulse_in_high(
        &mut self,
        clock: &impl TimePort,
        timeout_us: u32,
    ) -> Result<u32, SensorError> {
        let start = clock.uptime_us();
        let expired = |now: u64| now.wrapping_sub(start) >= u64::from(timeout_us);

        while self.echo_high()? {
            if expired(clock.uptime_us()) {
                return Ok(0);
            }
        }

        while !self.echo_high()? {
            if expired(clock.uptime_us()) {
                return Ok(0);
            }
        }
        let rise = clock.uptime_us();

        while self.echo_high()? {
            if expired(clock.uptime_us()) {
                return Ok(0);
            }
        }
        let fall = clock.uptime_us();

        Ok(fall.wrapping_sub(rise) as u32)
    }

    fn echo_high(&mut self) -> Result<bool, SensorError> {
        self.echo.is_high().map_err(|_| SensorError::EchoReadFailed)
    }
}
