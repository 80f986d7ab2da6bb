//! Discrete status LED driver (one GPIO, active HIGH).
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the GPIO via hw_init.
//! On host/test: writes the simulated pin bank.

use log::warn;

use crate::drivers::hw_init;
use crate::error::Error;

pub struct IndicatorLed {
    gpio: i32,
    on: bool,
}

impl IndicatorLed {
    pub fn new(gpio: i32) -> Self {
        Self { gpio, on: false }
    }

    pub fn set(&mut self, on: bool) {
        if let Err(e) = hw_init::gpio_write(self.gpio, on) {
            warn!("LED gpio{}: {}", self.gpio, Error::from(e));
        }
        self.on = on;
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}
