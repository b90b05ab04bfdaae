//! Pure control-law building blocks: sensor normalisation, moisture
//! classification, and the pump cooldown window.
//!
//! Nothing in here touches hardware or time sources directly; the
//! [`AppService`](crate::app::service::AppService) feeds readings and
//! timestamps in.

pub mod calibration;
pub mod cooldown;
pub mod thresholds;

/// Unprocessed sensor output in native device units.
pub type RawReading = i32;

/// A raw reading rescaled to percent moisture.  Not clamped.
pub type NormalizedReading = f64;

pub use calibration::{Calibration, normalize};
pub use cooldown::PumpCooldown;
pub use thresholds::{Thresholds, classify};
