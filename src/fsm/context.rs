//! Shared mutable context threaded through every FSM handler.
//!
//! `FsmContext` is the single struct that state handlers read from and
//! write to.  It holds the current cycle's sample, the commands the
//! handlers emit for that cycle, and the derived control parameters.  Think of it as the "blackboard" in a blackboard
//! architecture.

use core::fmt::Write as _;

use crate::config::SystemConfig;
use crate::control::{Calibration, NormalizedReading, RawReading, Thresholds};

/// Fits the longest possible "TAG: -9223372036854775808%".
pub const DISPLAY_TEXT_CAPACITY: usize = 32;

/// Short status line for the text display.
pub type DisplayText = heapless::String<DISPLAY_TEXT_CAPACITY>;

// ---------------------------------------------------------------------------
// Sample snapshot (read-only to state handlers; written by the service)
// ---------------------------------------------------------------------------

/// One sensor sample and its derived percentages.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SampleSnapshot {
    /// Reading as returned by the sensor.
    pub raw: RawReading,
    /// Full-precision moisture percent (unclamped).
    pub percent: NormalizedReading,
    /// `percent` rounded half away from zero, for display.
    pub display_percent: i64,
}

impl SampleSnapshot {
    pub fn from_raw(raw: RawReading, calibration: &Calibration) -> Self {
        Self {
            raw,
            percent: calibration.percent(raw),
            display_percent: calibration.rounded_percent(raw),
        }
    }
}

// ---------------------------------------------------------------------------
// Cycle commands (written by state handlers; consumed by the service)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PumpRequest {
    #[default]
    Idle,
    /// Run the pump once, subject to the cooldown window.
    Run { duration_ms: u32 },
}

/// Side effects requested for the current cycle, applied in field order
/// by the service: display first, then pump.
#[derive(Debug, Clone, Default)]
pub struct CycleCommands {
    pub message: Option<DisplayText>,
    pub pump: PumpRequest,
}

impl CycleCommands {
    /// Replace the display message with `"{tag}: {percent}%"`.
    pub fn show_status(&mut self, tag: &str, percent: i64) {
        let mut text = DisplayText::new();
        // Capacity covers every i64, so the write cannot overflow.
        let _ = write!(text, "{tag}: {percent}%");
        self.message = Some(text);
    }
}

// ---------------------------------------------------------------------------
// FsmContext
// ---------------------------------------------------------------------------

/// The shared context passed to every state handler function.
pub struct FsmContext {
    // -- Sample --
    /// Latest sample.  Updated before each FSM tick.
    pub sample: SampleSnapshot,

    // -- Outputs --
    /// Commands to apply after the FSM tick.
    pub commands: CycleCommands,

    // -- Configuration --
    pub config: SystemConfig,
    pub calibration: Calibration,
    pub thresholds: Thresholds,
}

impl FsmContext {
    /// Create a new context with the given configuration.
    pub fn new(config: SystemConfig) -> Self {
        Self {
            sample: SampleSnapshot::default(),
            commands: CycleCommands::default(),
            calibration: Calibration::from_config(&config),
            thresholds: Thresholds::from_config(&config),
            config,
        }
    }

    /// Load a fresh sample and clear last cycle's commands.
    pub fn begin_cycle(&mut self, sample: SampleSnapshot) {
        self.sample = sample;
        self.commands = CycleCommands::default();
    }
}
