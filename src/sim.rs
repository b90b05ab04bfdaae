//! Host-side soil model.
//!
//! Drives the simulated moisture ADC so the binary runs the full control
//! loop without a board.  The soil dries at a constant rate and is rewetted
//! in proportion to pump on-time:
//!
//! ```text
//!   raw(t+dt) = clamp(raw(t) + dry_rate·dt − wet_rate·pumped, floor, ceiling)
//! ```
//!
//! Deterministic: no noise, so a run is reproducible from its config.

use log::debug;

use crate::control::RawReading;

#[derive(Debug, Clone, PartialEq)]
pub struct SoilModel {
    raw: f64,
    /// Raw units gained per second of drying.
    pub dry_rate_per_sec: f64,
    /// Raw units lost per second of pumping.
    pub wet_rate_per_sec: f64,
    /// Fully saturated reading.
    pub floor: f64,
    /// Bone-dry reading.
    pub ceiling: f64,
}

impl Default for SoilModel {
    fn default() -> Self {
        Self {
            raw: 640.0,
            dry_rate_per_sec: 4.0,
            wet_rate_per_sec: 30.0,
            floor: 540.0,
            ceiling: 760.0,
        }
    }
}

impl SoilModel {
    /// Start from a given reading.
    pub fn starting_at(raw: RawReading) -> Self {
        Self {
            raw: f64::from(raw),
            ..Default::default()
        }
    }

    /// Advance by `elapsed_ms`, of which `pumped_ms` had the pump on.
    pub fn step(&mut self, elapsed_ms: u64, pumped_ms: u64) {
        let dried = self.dry_rate_per_sec * elapsed_ms as f64 / 1000.0;
        let wetted = self.wet_rate_per_sec * pumped_ms as f64 / 1000.0;
        self.raw = (self.raw + dried - wetted).clamp(self.floor, self.ceiling);
        debug!(
            "sim: +{:.1} dry, -{:.1} wet -> raw {:.1}",
            dried, wetted, self.raw
        );
    }

    pub fn raw(&self) -> RawReading {
        self.raw.round() as RawReading
    }

    /// Reading as the 12-bit ADC would report it.
    pub fn adc_value(&self) -> u16 {
        self.raw().clamp(0, 4095) as u16
    }
}
