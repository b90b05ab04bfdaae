//! Actuator and display drivers, plus hardware initialisation.

pub mod display;
pub mod hw_init;
pub mod pump;
