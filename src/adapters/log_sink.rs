//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade (ESP-IDF logger on the board, tracing-subscriber on a
//! host).  Every line carries a short tag so the console can be grepped.

use log::{error, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(state) => {
                info!("START | initial_state={:?}", state);
            }
            AppEvent::StateChanged { from, to } => {
                info!("STATE | {:?} -> {:?}", from, to);
            }
            AppEvent::Sample(s) => {
                info!(
                    "SAMPLE | #{} raw={} moisture={:.1}% state={:?}",
                    s.cycle, s.raw, s.percent, s.state
                );
            }
            AppEvent::PumpActivated { duration_ms } => {
                info!("PUMP | ran {} ms", duration_ms);
            }
            AppEvent::PumpSkipped { remaining_ms } => {
                info!("PUMP | cooldown, {} ms left", remaining_ms);
            }
            AppEvent::CycleFailed { cycle, error: e } => {
                error!("CYCLE | #{} aborted: {}", cycle, e);
            }
            AppEvent::Telemetry(t) => {
                info!(
                    "TELEM | state={} held={} | raw={} moisture={} | series={} | \
                     cycles={} failed={} | pumps={} cooldown={}ms | up={}s",
                    t.state,
                    t.cycles_in_state,
                    t.last_raw.map_or_else(|| "-".into(), |r| r.to_string()),
                    t.last_percent
                        .map_or_else(|| "-".into(), |p| format!("{p:.1}%")),
                    t.series_len,
                    t.cycles,
                    t.failed_cycles,
                    t.pump_activations,
                    t.cooldown_remaining_ms,
                    t.uptime_ms / 1000,
                );
            }
            AppEvent::Stopped { cycles } => {
                warn!("STOP | control loop exited after {} cycles", cycles);
            }
        }
    }
}
