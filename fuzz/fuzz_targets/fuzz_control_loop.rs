//! Fuzz target: `AppService::run_cycle` under arbitrary gateway behaviour
//!
//! Each 4-byte chunk scripts one cycle: a 12-bit reading, a time gap, and
//! a fault selector (read, display, or pump failure).  Verifies:
//! - No panics under any script
//! - Two pump starts are never closer than run time plus cooldown
//! - The series holds exactly one entry per successful cycle
//!
//! cargo fuzz run fuzz_control_loop

#![no_main]

use std::cell::Cell;

use libfuzzer_sys::fuzz_target;
use soilguard::app::events::AppEvent;
use soilguard::app::ports::{
    ActuatorError, ActuatorPort, ClockPort, DisplayPort, EventSink, SensorPort,
};
use soilguard::app::service::AppService;
use soilguard::config::SystemConfig;
use soilguard::error::TransportError;

struct Discard;

impl EventSink for Discard {
    fn emit(&mut self, _event: &AppEvent) {}
}

struct Clock(Cell<u64>);

impl ClockPort for Clock {
    fn now_ms(&self) -> u64 {
        self.0.get()
    }
}

struct ScriptedGateway<'a> {
    clock: &'a Clock,
    raw: i32,
    fault: u8,
    pump_starts: Vec<u64>,
}

impl SensorPort for ScriptedGateway<'_> {
    fn read_moisture(&mut self) -> Result<i32, TransportError> {
        if self.fault == 1 {
            return Err(TransportError::ReadFailed);
        }
        Ok(self.raw)
    }
}

impl ActuatorPort for ScriptedGateway<'_> {
    fn run_pump(&mut self, duration_ms: u32) -> Result<(), ActuatorError> {
        let clock = self.clock;
        self.pump_starts.push(clock.now_ms());
        clock.0.set(clock.now_ms() + u64::from(duration_ms));
        match self.fault {
            3 => Err(ActuatorError::Transport(TransportError::WriteFailed)),
            4 => Err(ActuatorError::Interrupted),
            _ => Ok(()),
        }
    }
}

impl DisplayPort for ScriptedGateway<'_> {
    fn show_message(&mut self, _text: &str) -> Result<(), TransportError> {
        if self.fault == 2 {
            return Err(TransportError::DisplayFailed);
        }
        Ok(())
    }

    fn shutdown_display(&mut self) -> Result<(), TransportError> {
        Ok(())
    }
}

fuzz_target!(|data: &[u8]| {
    let config = SystemConfig::default();
    let min_gap = u64::from(config.pump_run_ms) + u64::from(config.pump_cooldown_ms);
    let mut app = AppService::new(config);
    app.start(&mut Discard);

    let clock = Clock(Cell::new(0));
    let mut hw = ScriptedGateway {
        clock: &clock,
        raw: 0,
        fault: 0,
        pump_starts: Vec::new(),
    };
    let mut ok_cycles = 0usize;

    for chunk in data.chunks_exact(4) {
        hw.raw = i32::from(u16::from_le_bytes([chunk[0], chunk[1]]) & 0x0FFF);
        clock.0.set(clock.now_ms() + u64::from(chunk[2]) * 100);
        hw.fault = chunk[3] % 8;
        if app.run_cycle(&mut hw, &clock, &mut Discard).is_ok() {
            ok_cycles += 1;
        }
    }

    for pair in hw.pump_starts.windows(2) {
        assert!(pair[1] - pair[0] >= min_gap, "pump fired inside cooldown");
    }
    assert_eq!(app.monitor().series_len(), ok_cycles);
});
