//! Sensor drivers.
//!
//! One probe today; the hardware adapter owns it and surfaces reads
//! through [`SensorPort`](crate::app::ports::SensorPort).

pub mod moisture;
