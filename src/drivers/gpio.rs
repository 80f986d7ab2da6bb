//! Raw GPIO numbers wrapped as `embedded-hal` 1.0 digital pins.
//!
//! Lets generic drivers (e.g. [`Ultrasonic`](crate::sensors::ultrasonic::Ultrasonic))
//! run on top of the pins configured by [`hw_init`].

use core::convert::Infallible;

use embedded_hal::digital::{ErrorKind, ErrorType, InputPin, OutputPin};

use crate::drivers::hw_init;
use crate::error::ActuatorError;

impl embedded_hal::digital::Error for ActuatorError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// A GPIO configured as a push-pull output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpioOutput(i32);

impl GpioOutput {
    pub fn new(gpio: i32) -> Self {
        Self(gpio)
    }
}

impl ErrorType for GpioOutput {
    type Error = ActuatorError;
}

impl OutputPin for GpioOutput {
    fn set_low(&mut self) -> Result<(), ActuatorError> {
        hw_init::gpio_write(self.0, false)
    }

    fn set_high(&mut self) -> Result<(), ActuatorError> {
        hw_init::gpio_write(self.0, true)
    }
}

/// A GPIO configured as a floating input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpioInput(i32);

impl GpioInput {
    pub fn new(gpio: i32) -> Self {
        Self(gpio)
    }
}

impl ErrorType for GpioInput {
    type Error = Infallible;
}

impl InputPin for GpioInput {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(hw_init::gpio_read(self.0))
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(!hw_init::gpio_read(self.0))
    }
}
