//! System configuration parameters
//!
//! All tunable parameters for the SoilGuard controller.
//! Values can be overridden via NVS (non-volatile storage).

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigPort;
use crate::error::Result;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Calibration ---
    /// Raw reading of bone-dry soil (maps to 0 %)
    pub high_raw: i32,
    /// Raw reading of saturated soil (maps to 100 %)
    pub low_raw: i32,

    // --- Classification ---
    /// Readings at or above this are `Dry`
    pub dry_threshold_raw: i32,
    /// Readings at or above this (and below dry) are `ModeratelyDry`
    pub moderately_dry_threshold_raw: i32,

    // --- Pump ---
    /// How long the pump runs per activation (milliseconds)
    pub pump_run_ms: u32,
    /// Minimum gap after a run before the pump may fire again (milliseconds)
    pub pump_cooldown_ms: u32,
    /// Relay input is active-low (common on opto-isolated relay boards)
    pub pump_active_low: bool,

    // --- Timing ---
    /// Sampling period of the control loop (milliseconds)
    pub sample_interval_ms: u32,
    /// Telemetry report interval (seconds)
    pub telemetry_interval_secs: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Calibration
            high_raw: 735,
            low_raw: 550,

            // Classification
            dry_threshold_raw: 690,
            moderately_dry_threshold_raw: 660,

            // Pump
            pump_run_ms: 2000,
            pump_cooldown_ms: 6000,
            pump_active_low: false,

            // Timing
            sample_interval_ms: 2000,    // 0.5 Hz
            telemetry_interval_secs: 60, // 1/min
        }
    }
}

/// Load the stored config, reporting storage failures as [`Error::Config`].
///
/// [`Error::Config`]: crate::error::Error::Config
pub fn load_stored(store: &impl ConfigPort) -> Result<SystemConfig> {
    Ok(store.load()?)
}

/// Stored config, or the defaults when storage has nothing usable.
/// The controller always boots; a failed load is only logged.
pub fn load_or_default(store: &impl ConfigPort) -> SystemConfig {
    match load_stored(store) {
        Ok(cfg) => {
            info!("Config loaded from storage");
            cfg
        }
        Err(e) => {
            warn!("{}, using defaults", e);
            SystemConfig::default()
        }
    }
}
