//! Sensor drivers.
//!
//! Only the soil-moisture probe for now; it is owned by the board adapter
//! and surfaced through [`SensorPort`](crate::app::ports::SensorPort).

pub mod moisture;

pub use moisture::{MoistureSample, MoistureSensor};
