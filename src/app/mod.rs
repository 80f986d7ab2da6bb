//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the business rules for the gate barrier: the
//! gate state machine and the threshold-driven control loop.  All
//! interaction with hardware happens through **port traits** defined
//! in [`ports`], keeping this layer fully testable without real peripherals.

pub mod events;
pub mod gate;
pub mod ports;
pub mod service;
