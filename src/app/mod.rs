//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the business rules for the SoilGuard controller:
//! FSM orchestration, pump cooldown gating, and reading collection.
//! All interaction with hardware happens through **port traits** defined
//! in [`ports`], keeping this layer fully testable without real peripherals.

pub mod events;
pub mod monitor;
pub mod ports;
pub mod service;
