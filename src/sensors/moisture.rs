//! Capacitive soil-moisture probe driver.
//!
//! Reads the probe's analog output through an ESP32-S3 ADC channel.  The
//! probe reads *higher* the drier the soil.  No filtering is applied: the
//! controller classifies every raw sample as-is.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1 via the oneshot API (initialised by hw_init).
//! On host/test: reads from a static `AtomicU16` for injection, with an
//! optional injected read fault.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, AtomicU16, Ordering};

use log::warn;

use crate::control::RawReading;
use crate::error::TransportError;

#[cfg(not(target_os = "espidf"))]
static SIM_MOISTURE_ADC: AtomicU16 = AtomicU16::new(0);
#[cfg(not(target_os = "espidf"))]
static SIM_READ_FAULT: AtomicBool = AtomicBool::new(false);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_moisture_adc(raw: u16) {
    SIM_MOISTURE_ADC.store(raw, Ordering::Relaxed);
}

/// Make every subsequent simulated read fail until cleared.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_read_fault(fault: bool) {
    SIM_READ_FAULT.store(fault, Ordering::Relaxed);
}

pub struct MoistureSensor {
    channel: u32,
    last_raw: Option<RawReading>,
    total_reads: u32,
    failed_reads: u32,
}

impl MoistureSensor {
    pub fn new(adc_channel: u32) -> Self {
        Self {
            channel: adc_channel,
            last_raw: None,
            total_reads: 0,
            failed_reads: 0,
        }
    }

    pub fn read(&mut self) -> Result<RawReading, TransportError> {
        self.total_reads = self.total_reads.saturating_add(1);

        match self.read_adc() {
            Some(raw) => {
                let raw = RawReading::from(raw);
                self.last_raw = Some(raw);
                Ok(raw)
            }
            None => {
                self.failed_reads = self.failed_reads.saturating_add(1);
                warn!(
                    "moisture: ADC1 CH{} read failed ({} of {})",
                    self.channel, self.failed_reads, self.total_reads
                );
                Err(TransportError::ReadFailed)
            }
        }
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> Option<u16> {
        crate::drivers::hw_init::adc1_read(self.channel)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> Option<u16> {
        if SIM_READ_FAULT.load(Ordering::Relaxed) {
            return None;
        }
        Some(SIM_MOISTURE_ADC.load(Ordering::Relaxed))
    }

    pub fn last_raw(&self) -> Option<RawReading> {
        self.last_raw
    }

    pub fn total_reads(&self) -> u32 {
        self.total_reads
    }

    pub fn failed_reads(&self) -> u32 {
        self.failed_reads
    }
}
