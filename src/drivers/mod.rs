//! Actuator drivers, GPIO wrappers, hardware initialisation, and delays.

pub mod delay;
pub mod gpio;
pub mod hw_init;
pub mod indicator_led;
pub mod servo;
