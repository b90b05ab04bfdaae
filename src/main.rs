//! SoilGuard: Main Entry Point
//!
//! Hexagonal architecture with a fixed-rate sampling loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter          LogEventSink   NvsAdapter  SystemClock│
//! │  (Sensor+Actuator+Display) (EventSink)   (Config)    (Clock)   │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AppService (pure logic)                   │    │
//! │  │  FSM · Cooldown · Series                               │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  FixedRateTicker · ShutdownSignal · TerminationHook            │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::time::Duration;

use anyhow::Result;
use log::{debug, info, warn};

use soilguard::adapters::hardware::HardwareAdapter;
use soilguard::adapters::log_sink::LogEventSink;
use soilguard::adapters::nvs::NvsAdapter;
use soilguard::adapters::time::SystemClock;
use soilguard::app::events::AppEvent;
use soilguard::app::monitor::Monitor;
use soilguard::app::ports::{ClockPort, EventSink};
use soilguard::app::service::AppService;
use soilguard::config::SystemConfig;
use soilguard::drivers::display::TextDisplay;
use soilguard::drivers::pump::PumpDriver;
use soilguard::lifecycle::{self, ShutdownSignal, TerminationHook};
use soilguard::pins;
use soilguard::scheduler::FixedRateTicker;
use soilguard::sensors::moisture::MoistureSensor;

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. Bootstrap ──────────────────────────────────────────
    init_logging()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  SoilGuard v{}                    ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    lifecycle::install_panic_handler();
    soilguard::drivers::hw_init::init_peripherals()?;

    // ── 2. Load config from NVS (or defaults) ─────────────────
    let config = load_config();

    // ── 3. Shutdown path ──────────────────────────────────────
    let shutdown = ShutdownSignal::new();
    install_signal_handler(&shutdown);

    // ── 4. Construct adapters ─────────────────────────────────
    let pump = PumpDriver::new(relay_pin()?, config.pump_active_low)?;
    let hw = HardwareAdapter::new(
        MoistureSensor::new(pins::MOISTURE_ADC_CHANNEL),
        pump,
        TextDisplay::new(),
        shutdown.clone(),
    );
    let mut hook = TerminationHook::register(hw);
    let clock = SystemClock::new();
    let mut log_sink = LogEventSink::new();

    // ── 5. Construct app service ──────────────────────────────
    let mut app = AppService::new(config.clone());
    let monitor = app.monitor();
    app.start(&mut log_sink);

    #[cfg(not(target_os = "espidf"))]
    let mut soil = SimulatedSoil::new(clock.now_ms());

    info!("System ready. Entering control loop.");

    // ── 6. Control loop ───────────────────────────────────────
    let mut ticker = FixedRateTicker::new(u64::from(config.sample_interval_ms), clock.now_ms());
    let mut telemetry = FixedRateTicker::new(
        u64::from(config.telemetry_interval_secs) * 1000,
        clock.now_ms(),
    );

    loop {
        let wait = Duration::from_millis(ticker.wait_ms(clock.now_ms()));
        if shutdown.wait_timeout(wait) {
            info!("Shutdown requested, leaving control loop");
            break;
        }

        #[cfg(not(target_os = "espidf"))]
        soil.feed(clock.now_ms(), hook.gateway().pump_run_ms());

        // Failures are reported through the sink as CycleFailed.
        match app.run_cycle(hook.gateway_mut(), &clock, &mut log_sink) {
            Ok(state) => debug!("cycle {} done: {:?}", app.cycle_count(), state),
            Err(e) => debug!("cycle {} aborted: {}", app.cycle_count(), e),
        }

        let now = clock.now_ms();
        ticker.complete(now);

        if telemetry.is_due(now) {
            log_sink.emit(&AppEvent::Telemetry(app.build_telemetry(now)));
            telemetry.complete(now);
        }
    }

    // ── 7. Shutdown ───────────────────────────────────────────
    log_sink.emit(&AppEvent::Stopped {
        cycles: app.cycle_count(),
    });
    if ticker.coalesced() > 0 {
        info!("{} tick(s) coalesced by long cycles", ticker.coalesced());
    }
    report_series(&monitor);
    hook.fire();
    Ok(())
}

// ── Logging ───────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
fn init_logging() -> Result<()> {
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;
    Ok(())
}

/// `RUST_LOG` wins; otherwise `info`.  The subscriber also captures
/// `log` records from the library.
#[cfg(not(target_os = "espidf"))]
fn init_logging() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("logger init failed: {e}"))
}

// ── Config ────────────────────────────────────────────────────

fn load_config() -> SystemConfig {
    match NvsAdapter::new() {
        Ok(nvs) => soilguard::config::load_or_default(&nvs),
        Err(e) => {
            warn!("NVS init failed ({}), running with defaults", e);
            SystemConfig::default()
        }
    }
}

// ── Signals ───────────────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
fn install_signal_handler(shutdown: &ShutdownSignal) {
    let shutdown = shutdown.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        info!("SIGNAL: Received SIGINT/SIGTERM/SIGHUP - initiating shutdown");
        shutdown.request();
    }) {
        warn!(
            "Failed to set signal handler: {}. Shutdown via signals may not work cleanly.",
            e
        );
    }
}

/// The board has no terminal to interrupt; the loop runs until reset.
#[cfg(target_os = "espidf")]
fn install_signal_handler(_shutdown: &ShutdownSignal) {}

// ── Pump relay pin ────────────────────────────────────────────

#[cfg(target_os = "espidf")]
fn relay_pin() -> Result<
    esp_idf_hal::gpio::PinDriver<'static, esp_idf_hal::gpio::Gpio2, esp_idf_hal::gpio::Output>,
> {
    let peripherals = esp_idf_hal::peripherals::Peripherals::take()?;
    // Must match pins::PUMP_RELAY_GPIO.
    Ok(esp_idf_hal::gpio::PinDriver::output(peripherals.pins.gpio2)?)
}

#[cfg(not(target_os = "espidf"))]
fn relay_pin() -> Result<soilguard::drivers::pump::SimRelayPin> {
    info!("Simulation: pump relay on GPIO{} is virtual", pins::PUMP_RELAY_GPIO);
    Ok(soilguard::drivers::pump::SimRelayPin::default())
}

// ── Simulation feed ───────────────────────────────────────────

/// Steps the soil model between cycles and pushes its reading into the
/// simulated ADC.
#[cfg(not(target_os = "espidf"))]
struct SimulatedSoil {
    model: soilguard::sim::SoilModel,
    last_ms: u64,
    last_pump_ms: u64,
}

#[cfg(not(target_os = "espidf"))]
impl SimulatedSoil {
    fn new(now_ms: u64) -> Self {
        let model = soilguard::sim::SoilModel::default();
        soilguard::sensors::moisture::sim_set_moisture_adc(model.adc_value());
        info!("Simulation: soil model starting at raw {}", model.raw());
        Self {
            model,
            last_ms: now_ms,
            last_pump_ms: 0,
        }
    }

    fn feed(&mut self, now_ms: u64, pump_run_ms: u64) {
        self.model.step(
            now_ms.saturating_sub(self.last_ms),
            pump_run_ms.saturating_sub(self.last_pump_ms),
        );
        self.last_ms = now_ms;
        self.last_pump_ms = pump_run_ms;
        soilguard::sensors::moisture::sim_set_moisture_adc(self.model.adc_value());
    }
}

// ── Shutdown report ───────────────────────────────────────────

fn report_series(monitor: &Monitor) {
    info!(
        "SERIES | cycles completed={} failed={} | pump runs={}",
        monitor.completed_cycles(),
        monitor.failed_cycles(),
        monitor.pump_activations()
    );
    match monitor.series().summary() {
        Some(s) => {
            info!(
                "SERIES | {} samples | min {:.1}% max {:.1}% mean {:.1}% last {:.1}%",
                s.count, s.min, s.max, s.mean, s.last
            );
            match serde_json::to_string(&s) {
                Ok(json) => info!("SERIES | {}", json),
                Err(e) => warn!("SERIES | summary encode failed: {}", e),
            }
        }
        None => info!("SERIES | no samples recorded"),
    }
}
