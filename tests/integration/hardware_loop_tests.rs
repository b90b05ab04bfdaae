//! The control loop against the real host adapter stack: simulated ADC,
//! `PumpDriver` over `SimRelayPin`, `TextDisplay`, and the system clock.
//!
//! The simulated ADC is process-global; every test here feeds it the same
//! reading so they can run in parallel.

use crate::mock_hw::RecordingSink;

use soilguard::adapters::hardware::HardwareAdapter;
use soilguard::adapters::time::SystemClock;
use soilguard::app::ports::ClockPort;
use soilguard::app::service::AppService;
use soilguard::config::SystemConfig;
use soilguard::drivers::display::TextDisplay;
use soilguard::drivers::pump::{PumpDriver, SimRelayPin};
use soilguard::error::Error;
use soilguard::fsm::MoistureState;
use soilguard::lifecycle::{ShutdownSignal, TerminationHook};
use soilguard::pins;
use soilguard::sensors::moisture::{MoistureSensor, sim_set_moisture_adc};

const DRY_ADC: u16 = 700;

fn host_gateway(shutdown: &ShutdownSignal) -> HardwareAdapter<SimRelayPin> {
    HardwareAdapter::new(
        MoistureSensor::new(pins::MOISTURE_ADC_CHANNEL),
        PumpDriver::new(SimRelayPin::default(), false).unwrap(),
        TextDisplay::new(),
        shutdown.clone(),
    )
}

fn short_pump_config() -> SystemConfig {
    SystemConfig {
        pump_run_ms: 30,
        ..Default::default()
    }
}

#[test]
fn dry_cycle_waters_and_leaves_relay_off() {
    sim_set_moisture_adc(DRY_ADC);
    let shutdown = ShutdownSignal::new();
    let mut hook = TerminationHook::register(host_gateway(&shutdown));
    let clock = SystemClock::new();
    let mut sink = RecordingSink::new();
    let mut app = AppService::new(short_pump_config());
    app.start(&mut sink);

    let state = app
        .run_cycle(hook.gateway_mut(), &clock, &mut sink)
        .unwrap();
    assert_eq!(state, MoistureState::Dry);

    let hw = hook.gateway();
    assert_eq!(hw.display().current(), Some("DRY: 19%"));
    assert_eq!(hw.pump().activations(), 1);
    assert!(!hw.pump().is_running());
    assert!(!hw.pump().pin().is_high());
    assert!(hw.pump_run_ms() >= 30);
    assert_eq!(app.monitor().series_len(), 1);

    hook.fire();
    assert!(hook.gateway().display().is_shut_down());
}

#[test]
fn shutdown_during_pump_run_interrupts_the_cycle() {
    sim_set_moisture_adc(DRY_ADC);
    let shutdown = ShutdownSignal::new();
    let mut hook = TerminationHook::register(host_gateway(&shutdown));
    let clock = SystemClock::new();
    let mut sink = RecordingSink::new();
    let mut app = AppService::new(SystemConfig {
        pump_run_ms: 60_000,
        ..Default::default()
    });
    app.start(&mut sink);

    shutdown.request();
    let result = app.run_cycle(hook.gateway_mut(), &clock, &mut sink);

    assert_eq!(result, Err(Error::InterruptedWait));
    assert!(!hook.gateway().pump().is_running());
    assert!(app.monitor().series_snapshot().is_empty());
    // Interrupted or not, the run counts against the cooldown.
    assert!(app.pump_cooling_down(clock.now_ms()));
}
