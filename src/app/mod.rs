//! Application core. Pure domain logic, zero I/O.
//!
//! The watering loop, its session boundary and the status frame it renders.
//! All interaction with hardware happens through **port traits** defined in
//! [`ports`], keeping this layer fully testable without real peripherals.

pub mod controller;
pub mod ports;
pub mod session;
pub mod status;
