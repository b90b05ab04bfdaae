//! SoilGuard controller library.
//!
//! Exposes the pure-logic modules and the adapters for integration
//! testing and for the binary.  All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod control;
pub mod error;
pub mod fsm;
pub mod lifecycle;
pub mod pins;
pub mod scheduler;
pub mod series;

pub mod adapters;
pub mod drivers;
pub mod sensors;

#[cfg(not(target_os = "espidf"))]
pub mod sim;
