//! Pump relay driver.
//!
//! On/off control of a single relay over an `embedded-hal` output pin.
//! Relay boards come in both polarities; `active_low` flips the level
//! written for "on".
//!
//! ## Safety contract
//!
//! This driver is a dumb actuator.  Run timing and cooldown live above
//! it; it only guarantees that [`PumpDriver::off`] is attempted whenever
//! asked, whatever state it believes the relay is in.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: wraps an `esp-idf-hal` `PinDriver`.
//! On host/test: wraps [`SimRelayPin`], which tracks the level in memory.

use embedded_hal::digital::OutputPin;
use log::{debug, error};

use crate::error::TransportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpState {
    Stopped,
    Running,
}

pub struct PumpDriver<P: OutputPin> {
    pin: P,
    active_low: bool,
    state: PumpState,
    activations: u64,
}

impl<P: OutputPin> PumpDriver<P> {
    /// Takes ownership of the pin and drives it to "off" immediately.
    pub fn new(pin: P, active_low: bool) -> Result<Self, TransportError> {
        let mut pump = Self {
            pin,
            active_low,
            state: PumpState::Stopped,
            activations: 0,
        };
        pump.off()?;
        Ok(pump)
    }

    pub fn on(&mut self) -> Result<(), TransportError> {
        self.write(true)?;
        self.state = PumpState::Running;
        self.activations += 1;
        debug!("pump: relay on");
        Ok(())
    }

    pub fn off(&mut self) -> Result<(), TransportError> {
        self.write(false)?;
        self.state = PumpState::Stopped;
        debug!("pump: relay off");
        Ok(())
    }

    fn write(&mut self, energise: bool) -> Result<(), TransportError> {
        let high = energise != self.active_low;
        let result = if high {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        result.map_err(|e| {
            error!("pump: relay write failed: {:?}", e);
            TransportError::WriteFailed
        })
    }

    pub fn state(&self) -> PumpState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == PumpState::Running
    }

    /// Times the relay has been switched on.
    pub fn activations(&self) -> u64 {
        self.activations
    }

    pub fn pin(&self) -> &P {
        &self.pin
    }

    pub fn pin_mut(&mut self) -> &mut P {
        &mut self.pin
    }
}

// ── Host relay pin ────────────────────────────────────────────

/// In-memory output pin for host builds and tests.
#[cfg(not(target_os = "espidf"))]
#[derive(Debug, Default)]
pub struct SimRelayPin {
    high: bool,
    writes: u32,
    /// When set, every write fails.
    pub fail_writes: bool,
}

#[cfg(not(target_os = "espidf"))]
impl SimRelayPin {
    pub fn is_high(&self) -> bool {
        self.high
    }

    pub fn writes(&self) -> u32 {
        self.writes
    }
}

#[cfg(not(target_os = "espidf"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimPinError;

#[cfg(not(target_os = "espidf"))]
impl embedded_hal::digital::Error for SimPinError {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

#[cfg(not(target_os = "espidf"))]
impl embedded_hal::digital::ErrorType for SimRelayPin {
    type Error = SimPinError;
}

#[cfg(not(target_os = "espidf"))]
impl OutputPin for SimRelayPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        if self.fail_writes {
            return Err(SimPinError);
        }
        self.high = false;
        self.writes += 1;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        if self.fail_writes {
            return Err(SimPinError);
        }
        self.high = true;
        self.writes += 1;
        Ok(())
    }
}
