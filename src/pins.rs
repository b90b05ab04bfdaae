//! GPIO / peripheral pin assignments for the SoilGuard board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Sensors: Analog (ADC1)
// ---------------------------------------------------------------------------

/// Capacitive soil-moisture probe, analog output.
/// ADC1 channel 3 (GPIO 4 on ESP32-S3).
pub const MOISTURE_ADC_GPIO: i32 = 4;
/// ADC1 channel index for [`MOISTURE_ADC_GPIO`].
pub const MOISTURE_ADC_CHANNEL: u32 = 3;

// ---------------------------------------------------------------------------
// Pump relay
// ---------------------------------------------------------------------------

/// Digital output driving the pump relay coil.
/// The driver is built from `peripherals.pins.gpio2` in `main`; keep the
/// two in step.
pub const PUMP_RELAY_GPIO: i32 = 2;
