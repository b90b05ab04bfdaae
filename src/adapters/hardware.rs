//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns the moisture sensor, the pump relay, and the text display,
//! exposing them through [`SensorPort`], [`ActuatorPort`], and
//! [`DisplayPort`].  This is the only module in the system that touches
//! actual hardware.  On non-espidf targets, the underlying drivers use
//! cfg-gated simulation stubs.

use std::time::{Duration, Instant};

use embedded_hal::digital::OutputPin;
use log::{error, warn};

use crate::app::ports::{ActuatorError, ActuatorPort, DisplayPort, SensorPort};
use crate::control::RawReading;
use crate::drivers::display::TextDisplay;
use crate::drivers::pump::PumpDriver;
use crate::error::TransportError;
use crate::lifecycle::ShutdownSignal;
use crate::sensors::moisture::MoistureSensor;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<P: OutputPin> {
    sensor: MoistureSensor,
    pump: PumpDriver<P>,
    display: TextDisplay,
    /// Cuts an in-progress pump run short.
    shutdown: ShutdownSignal,
    /// Wall time the relay has actually been energised.
    pump_run_ms: u64,
}

impl<P: OutputPin> HardwareAdapter<P> {
    pub fn new(
        sensor: MoistureSensor,
        pump: PumpDriver<P>,
        display: TextDisplay,
        shutdown: ShutdownSignal,
    ) -> Self {
        Self {
            sensor,
            pump,
            display,
            shutdown,
            pump_run_ms: 0,
        }
    }

    /// Cumulative pump on-time since construction.
    pub fn pump_run_ms(&self) -> u64 {
        self.pump_run_ms
    }

    pub fn pump(&self) -> &PumpDriver<P> {
        &self.pump
    }

    pub fn pump_mut(&mut self) -> &mut PumpDriver<P> {
        &mut self.pump
    }

    pub fn display(&self) -> &TextDisplay {
        &self.display
    }

    pub fn sensor(&self) -> &MoistureSensor {
        &self.sensor
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<P: OutputPin> SensorPort for HardwareAdapter<P> {
    fn read_moisture(&mut self) -> Result<RawReading, TransportError> {
        self.sensor.read()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<P: OutputPin> ActuatorPort for HardwareAdapter<P> {
    fn run_pump(&mut self, duration_ms: u32) -> Result<(), ActuatorError> {
        if let Err(e) = self.pump.on() {
            // Relay state is unknown after a failed write; try to force it off.
            if self.pump.off().is_err() {
                error!("pump: relay unresponsive, state unknown");
            }
            return Err(e.into());
        }

        let started = Instant::now();
        let interrupted = self
            .shutdown
            .wait_timeout(Duration::from_millis(u64::from(duration_ms)));
        self.pump_run_ms += started.elapsed().as_millis() as u64;

        if let Err(e) = self.pump.off() {
            error!("pump: switch-off failed, relay may still be energised");
            return Err(e.into());
        }

        if interrupted {
            warn!("pump: run cut short by shutdown request");
            return Err(ActuatorError::Interrupted);
        }
        Ok(())
    }
}

// ── DisplayPort implementation ────────────────────────────────

impl<P: OutputPin> DisplayPort for HardwareAdapter<P> {
    fn show_message(&mut self, text: &str) -> Result<(), TransportError> {
        self.display.show(text)
    }

    fn shutdown_display(&mut self) -> Result<(), TransportError> {
        self.display.shutdown();
        Ok(())
    }
}
