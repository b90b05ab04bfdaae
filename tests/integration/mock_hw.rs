//! Mock gateway for integration tests.
//!
//! Records every gateway call so tests can assert on the full command
//! history without touching the ADC, the relay, or the display.

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

use soilguard::app::events::AppEvent;
use soilguard::app::ports::{
    ActuatorError, ActuatorPort, ClockPort, DisplayPort, EventSink, SensorPort,
};
use soilguard::control::RawReading;
use soilguard::error::TransportError;

// ── Gateway call record ───────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum GatewayCall {
    ReadMoisture,
    ShowMessage(String),
    RunPump { duration_ms: u32, at_ms: u64 },
    ShutdownDisplay,
}

// ── ManualClock ───────────────────────────────────────────────

/// Test clock.  Clones share one time value, so the gateway can move the
/// clock forward while the pump "runs".
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

#[allow(dead_code)]
impl ManualClock {
    pub fn at(ms: u64) -> Self {
        let clock = Self::default();
        clock.set(ms);
        clock
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }

    pub fn now(&self) -> u64 {
        self.now.get()
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }
}

impl ClockPort for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

// ── MockGateway ───────────────────────────────────────────────

pub struct MockGateway {
    readings: VecDeque<Result<RawReading, TransportError>>,
    pub calls: Vec<GatewayCall>,
    /// Returned from every `run_pump` while set.
    pub pump_error: Option<ActuatorError>,
    pub fail_display: bool,
    clock: Option<ManualClock>,
}

#[allow(dead_code)]
impl MockGateway {
    pub fn new() -> Self {
        Self {
            readings: VecDeque::new(),
            calls: Vec::new(),
            pump_error: None,
            fail_display: false,
            clock: None,
        }
    }

    /// Gateway whose sensor returns `raws` in order.
    pub fn with_readings(raws: &[RawReading]) -> Self {
        let mut gw = Self::new();
        for &raw in raws {
            gw.push_reading(raw);
        }
        gw
    }

    /// Pump runs advance `clock` by their duration, like a real blocking run.
    pub fn attach_clock(&mut self, clock: &ManualClock) {
        self.clock = Some(clock.clone());
    }

    pub fn push_reading(&mut self, raw: RawReading) {
        self.readings.push_back(Ok(raw));
    }

    pub fn push_read_failure(&mut self, error: TransportError) {
        self.readings.push_back(Err(error));
    }

    pub fn messages(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                GatewayCall::ShowMessage(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn pump_runs(&self) -> Vec<u64> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                GatewayCall::RunPump { at_ms, .. } => Some(*at_ms),
                _ => None,
            })
            .collect()
    }

    pub fn shutdowns(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| **c == GatewayCall::ShutdownDisplay)
            .count()
    }
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorPort for MockGateway {
    fn read_moisture(&mut self) -> Result<RawReading, TransportError> {
        self.calls.push(GatewayCall::ReadMoisture);
        self.readings
            .pop_front()
            .unwrap_or(Err(TransportError::Disconnected))
    }
}

impl ActuatorPort for MockGateway {
    fn run_pump(&mut self, duration_ms: u32) -> Result<(), ActuatorError> {
        let at_ms = self.clock.as_ref().map_or(0, ClockPort::now_ms);
        self.calls.push(GatewayCall::RunPump { duration_ms, at_ms });
        if let Some(clock) = &self.clock {
            clock.advance(u64::from(duration_ms));
        }
        match self.pump_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl DisplayPort for MockGateway {
    fn show_message(&mut self, text: &str) -> Result<(), TransportError> {
        if self.fail_display {
            return Err(TransportError::DisplayFailed);
        }
        self.calls.push(GatewayCall::ShowMessage(text.to_string()));
        Ok(())
    }

    fn shutdown_display(&mut self) -> Result<(), TransportError> {
        self.calls.push(GatewayCall::ShutdownDisplay);
        Ok(())
    }
}

// ── RecordingSink ─────────────────────────────────────────────

/// Event sink that keeps every event.
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
