//! Two-threshold moisture classifier.
//!
//! Evaluated high-to-low; each boundary value belongs to the drier
//! bucket.  There is no hysteresis: the state is a total function of the
//! latest raw reading.

use crate::config::SystemConfig;
use crate::fsm::MoistureState;

use super::RawReading;

/// At or above: `Dry`.
pub const DRY_THRESHOLD_RAW: RawReading = 690;
/// At or above (and below dry): `ModeratelyDry`.
pub const MODERATELY_DRY_THRESHOLD_RAW: RawReading = 660;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    pub dry_raw: RawReading,
    pub moderately_dry_raw: RawReading,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            dry_raw: DRY_THRESHOLD_RAW,
            moderately_dry_raw: MODERATELY_DRY_THRESHOLD_RAW,
        }
    }
}

impl Thresholds {
    pub fn from_config(config: &SystemConfig) -> Self {
        Self {
            dry_raw: config.dry_threshold_raw,
            moderately_dry_raw: config.moderately_dry_threshold_raw,
        }
    }

    pub fn classify(&self, raw: RawReading) -> MoistureState {
        if raw >= self.dry_raw {
            MoistureState::Dry
        } else if raw >= self.moderately_dry_raw {
            MoistureState::ModeratelyDry
        } else {
            MoistureState::Wet
        }
    }
}

/// Classify against the factory thresholds (690 / 660).
pub fn classify(raw: RawReading) -> MoistureState {
    Thresholds::default().classify(raw)
}
