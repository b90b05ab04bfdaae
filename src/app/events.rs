//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them: log to serial, collect in a test,
//! forward to a dashboard.

use serde::Serialize;

use crate::control::{NormalizedReading, RawReading};
use crate::error::Error;
use crate::fsm::MoistureState;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The application service has started (carries initial state).
    Started(MoistureState),

    /// The classifier moved the FSM to a different bucket.
    StateChanged {
        from: MoistureState,
        to: MoistureState,
    },

    /// A cycle completed and its reading was appended to the series.
    Sample(SampleRecord),

    /// The pump ran to completion.
    PumpActivated { duration_ms: u32 },

    /// A dry cycle skipped the pump because the cooldown window is open.
    PumpSkipped { remaining_ms: u64 },

    /// A cycle was aborted.  The loop carries on with the next one.
    CycleFailed { cycle: u64, error: Error },

    /// Periodic telemetry snapshot.
    Telemetry(TelemetryData),

    /// The control loop has exited.
    Stopped { cycles: u64 },
}

/// One completed cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleRecord {
    pub cycle: u64,
    pub raw: RawReading,
    pub percent: NormalizedReading,
    pub state: MoistureState,
}

/// A point-in-time telemetry snapshot suitable for logging or transmission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TelemetryData {
    pub uptime_ms: u64,
    pub state: &'static str,
    /// Classified cycles the current state has been held.
    pub cycles_in_state: u64,
    pub last_raw: Option<RawReading>,
    pub last_percent: Option<NormalizedReading>,
    pub series_len: usize,
    pub cycles: u64,
    pub failed_cycles: u64,
    pub pump_activations: u64,
    pub cooldown_remaining_ms: u64,
}
