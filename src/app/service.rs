//! Application service: the hexagonal core.
//!
//! [`AppService`] owns the FSM, the pump cooldown, the series, and the
//! shared status.  It exposes a clean, hardware-agnostic API.  All I/O
//! flows through port traits injected at call sites, making the entire
//! service testable with mock adapters.
//!
//! ```text
//!   SensorPort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                  │       AppService       │
//!  ActuatorPort ◀──│  FSM · Cooldown · Log  │──▶ SeriesStore ──▶ Monitor
//!   DisplayPort ◀──└────────────────────────┘
//!                             ▲
//!                         ClockPort
//! ```

use std::sync::Arc;

use log::{debug, info, warn};

use crate::config::SystemConfig;
use crate::control::PumpCooldown;
use crate::error::{Error, PumpOperationError, Result};
use crate::fsm::context::{FsmContext, PumpRequest, SampleSnapshot};
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, MoistureState};
use crate::series::SeriesStore;

use super::events::{AppEvent, SampleRecord, TelemetryData};
use super::monitor::{Monitor, SharedStatus};
use super::ports::{ActuatorError, ActuatorPort, ClockPort, DisplayPort, EventSink, SensorPort};

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService {
    fsm: Fsm,
    ctx: FsmContext,
    cooldown: PumpCooldown,
    series: SeriesStore,
    status: Arc<SharedStatus>,
    /// Cycles attempted, successful or not.
    cycle_count: u64,
}

impl AppService {
    /// Construct the service from configuration.
    ///
    /// Does **not** start the FSM: call [`start`](Self::start) next.
    pub fn new(config: SystemConfig) -> Self {
        let cooldown = PumpCooldown::new(u64::from(config.pump_cooldown_ms));
        let ctx = FsmContext::new(config);
        let fsm = Fsm::new(build_state_table());

        Self {
            fsm,
            ctx,
            cooldown,
            series: SeriesStore::new(),
            status: Arc::new(SharedStatus::default()),
            cycle_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Start the FSM in [`MoistureState::Started`].
    pub fn start(&mut self, sink: &mut impl EventSink) {
        self.fsm.start(&mut self.ctx);
        self.status.set_state(self.fsm.current_state());
        sink.emit(&AppEvent::Started(self.fsm.current_state()));
        info!("AppService started in {:?}", self.fsm.current_state());
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one control cycle:
    /// read sensor → classify → display → pump (cooldown-gated) → record.
    ///
    /// Any failure aborts the rest of the cycle, is reported through the
    /// sink as [`AppEvent::CycleFailed`], and is returned.  Nothing is
    /// appended to the series for a failed cycle.
    pub fn run_cycle<G>(
        &mut self,
        hw: &mut G,
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
    ) -> Result<MoistureState>
    where
        G: SensorPort + ActuatorPort + DisplayPort,
    {
        self.cycle_count += 1;
        match self.cycle(hw, clock, sink) {
            Ok(state) => Ok(state),
            Err(error) => {
                self.status.record_failed();
                sink.emit(&AppEvent::CycleFailed {
                    cycle: self.cycle_count,
                    error,
                });
                Err(error)
            }
        }
    }

    fn cycle<G>(
        &mut self,
        hw: &mut G,
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
    ) -> Result<MoistureState>
    where
        G: SensorPort + ActuatorPort + DisplayPort,
    {
        // 1. Read sensor via SensorPort
        let raw = hw.read_moisture()?;
        self.status.set_last_raw(raw);

        // 2. Classify (FSM tick writes display text and pump request)
        let prev_state = self.fsm.current_state();
        let sample = SampleSnapshot::from_raw(raw, &self.ctx.calibration);
        self.ctx.begin_cycle(sample);
        let state = self.fsm.tick(&mut self.ctx);
        self.status.set_state(state);
        if state != prev_state {
            sink.emit(&AppEvent::StateChanged {
                from: prev_state,
                to: state,
            });
        }

        // 3. Apply state actions in order: display, then pump
        if let Some(text) = self.ctx.commands.message.take() {
            hw.show_message(&text)?;
        }
        match self.ctx.commands.pump {
            PumpRequest::Run { duration_ms } => self.run_pump_gated(hw, duration_ms, clock, sink)?,
            PumpRequest::Idle => debug!("No pump action this cycle"),
        }

        // 4. Record.  Counted before the append so a reader never sees
        // more samples than completed cycles.
        self.status.record_completed();
        self.series.append(sample.percent);
        sink.emit(&AppEvent::Sample(SampleRecord {
            cycle: self.cycle_count,
            raw,
            percent: sample.percent,
            state,
        }));

        Ok(state)
    }

    /// Fire the pump unless the cooldown window is open.  The window is
    /// re-armed after every commanded run, failed or not.
    fn run_pump_gated(
        &mut self,
        hw: &mut impl ActuatorPort,
        duration_ms: u32,
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        let now = clock.now_ms();
        if self.cooldown.is_active(now) {
            let remaining_ms = self.cooldown.remaining_ms(now);
            info!("Pump cooldown active, {} ms left: skipping", remaining_ms);
            sink.emit(&AppEvent::PumpSkipped { remaining_ms });
            return Ok(());
        }

        info!("Pump is running for {} ms", duration_ms);
        let outcome = hw.run_pump(duration_ms);
        self.cooldown.arm(clock.now_ms());

        match outcome {
            Ok(()) => {
                self.status.record_pump();
                sink.emit(&AppEvent::PumpActivated { duration_ms });
                Ok(())
            }
            Err(ActuatorError::Transport(cause)) => {
                warn!("Pump command failed: {}", cause);
                Err(PumpOperationError { cause }.into())
            }
            Err(ActuatorError::Interrupted) => Err(Error::InterruptedWait),
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Read-only handle for other threads and for shutdown reporting.
    pub fn monitor(&self) -> Monitor {
        Monitor::new(self.status.clone(), self.series.clone())
    }

    /// Build a telemetry snapshot from the current context.
    pub fn build_telemetry(&self, now_ms: u64) -> TelemetryData {
        let monitor = self.monitor();
        TelemetryData {
            uptime_ms: now_ms,
            state: self.fsm.current_state().tag(),
            cycles_in_state: self.fsm.cycles_in_current_state(),
            last_raw: monitor.last_raw_reading(),
            last_percent: self.series.latest(),
            series_len: self.series.len(),
            cycles: self.cycle_count,
            failed_cycles: monitor.failed_cycles(),
            pump_activations: monitor.pump_activations(),
            cooldown_remaining_ms: self.cooldown.remaining_ms(now_ms),
        }
    }

    /// Current FSM state.
    pub fn state(&self) -> MoistureState {
        self.fsm.current_state()
    }

    /// Control cycles attempted since startup.
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    pub fn config(&self) -> &SystemConfig {
        &self.ctx.config
    }

    /// Whether a dry cycle at `now_ms` would skip the pump.
    pub fn pump_cooling_down(&self, now_ms: u64) -> bool {
        self.cooldown.is_active(now_ms)
    }
}
