//! Two-point linear calibration from raw capacitive readings to percent.
//!
//! The sensor reads *higher* the drier the soil, so the mapping is
//! inverted: `high_raw` is 0 % and `low_raw` is 100 %.  Readings outside
//! the calibration window are passed through unclamped and land outside
//! `[0, 100]`.

use crate::config::SystemConfig;

use super::NormalizedReading;

/// Raw reading of bone-dry soil.
pub const HIGH_RAW: i32 = 735;
/// Raw reading of saturated soil.
pub const LOW_RAW: i32 = 550;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calibration {
    pub high_raw: i32,
    pub low_raw: i32,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            high_raw: HIGH_RAW,
            low_raw: LOW_RAW,
        }
    }
}

impl Calibration {
    pub fn from_config(config: &SystemConfig) -> Self {
        Self {
            high_raw: config.high_raw,
            low_raw: config.low_raw,
        }
    }

    /// Full-precision percentage, as stored in the series.
    pub fn percent(&self, raw: impl Into<f64>) -> NormalizedReading {
        let high = f64::from(self.high_raw);
        let low = f64::from(self.low_raw);
        ((high - raw.into()) / (high - low)) * 100.0
    }

    /// Whole-number percentage for the text display.
    pub fn rounded_percent(&self, raw: impl Into<f64>) -> i64 {
        self.percent(raw).round() as i64
    }
}

/// Normalise against the factory calibration (735 dry, 550 wet).
pub fn normalize(raw: impl Into<f64>) -> NormalizedReading {
    Calibration::default().percent(raw)
}
