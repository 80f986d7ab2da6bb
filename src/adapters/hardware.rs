//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns both ultrasonic rangers and every actuator driver, exposing them
//! through [`RangingPort`] and [`ActuatorPort`].  This is the only module
//! in the system that touches actual hardware.  On non-espidf targets, the
//! underlying drivers use the simulated pin bank.

use log::warn;

use crate::adapters::time::Esp32TimeAdapter;
use crate::app::ports::{ActuatorPort, Indicator, RangingPort};
use crate::drivers::delay::BlockingDelay;
use crate::drivers::gpio::{GpioInput, GpioOutput};
use crate::drivers::indicator_led::IndicatorLed;
use crate::drivers::servo::ServoDriver;
use crate::error::Error;
use crate::sensors::ultrasonic::{PulseTiming, Ultrasonic};
use crate::sensors::{DistanceReading, SensorId};

pub type Ranger = Ultrasonic<GpioOutput, GpioInput>;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    entry: Ranger,
    exit: Ranger,
    timing: PulseTiming,
    servo: ServoDriver,
    ready_led: IndicatorLed,
    alert_led: IndicatorLed,
    clock: Esp32TimeAdapter,
    delay: BlockingDelay,
}

impl HardwareAdapter {
    pub fn new(
        entry: Ranger,
        exit: Ranger,
        timing: PulseTiming,
        servo: ServoDriver,
        ready_led: IndicatorLed,
        alert_led: IndicatorLed,
    ) -> Self {
        Self {
            entry,
            exit,
            timing,
            servo,
            ready_led,
            alert_led,
            clock: Esp32TimeAdapter::new(),
            delay: BlockingDelay,
        }
    }

    /// Last commanded servo angle (`None` before init).
    pub fn servo_angle(&self) -> Option<u8> {
        self.servo.angle()
    }

    pub fn is_indicator_on(&self, indicator: Indicator) -> bool {
        match indicator {
            Indicator::Ready => self.ready_led.is_on(),
            Indicator::Alert => self.alert_led.is_on(),
        }
    }
}

// ── RangingPort implementation ────────────────────────────────

impl RangingPort for HardwareAdapter {
    fn measure(&mut self, sensor: SensorId) -> DistanceReading {
        let ranger = match sensor {
            SensorId::Entry => &mut self.entry,
            SensorId::Exit => &mut self.exit,
        };
        match ranger.echo_duration_us(&mut self.delay, &self.clock, &self.timing) {
            Ok(echo_us) => DistanceReading::from_echo_us(sensor, echo_us),
            Err(e) => {
                // Folded into "no detection" like a timeout.
                warn!("{:?} ranger: {}", sensor, Error::from(e));
                DistanceReading::timeout(sensor)
            }
        }
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl ActuatorPort for HardwareAdapter {
    fn set_servo_angle(&mut self, degrees: u8) {
        self.servo.set_angle(degrees);
    }

    fn set_indicator(&mut self, indicator: Indicator, on: bool) {
        match indicator {
            Indicator::Ready => self.ready_led.set(on),
            Indicator::Alert => self.alert_led.set(on),
        }
    }
}
