//! Read-only view of the running controller.
//!
//! The [`AppService`](super::service::AppService) publishes its status
//! into a [`SharedStatus`] after every cycle; a [`Monitor`] handed out by
//! the service reads it from any thread without blocking the loop.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI32, AtomicU8, AtomicU64, Ordering};

use crate::control::{NormalizedReading, RawReading};
use crate::fsm::MoistureState;
use crate::series::SeriesStore;

/// Lock-free status cell written by the control loop.
#[derive(Debug)]
pub(crate) struct SharedStatus {
    state: AtomicU8,
    last_raw: AtomicI32,
    has_reading: AtomicBool,
    completed_cycles: AtomicU64,
    failed_cycles: AtomicU64,
    pump_activations: AtomicU64,
}

impl Default for SharedStatus {
    fn default() -> Self {
        Self {
            state: AtomicU8::new(MoistureState::Started as u8),
            last_raw: AtomicI32::new(0),
            has_reading: AtomicBool::new(false),
            completed_cycles: AtomicU64::new(0),
            failed_cycles: AtomicU64::new(0),
            pump_activations: AtomicU64::new(0),
        }
    }
}

impl SharedStatus {
    pub(crate) fn set_state(&self, state: MoistureState) {
        self.state.store(state as u8, Ordering::Release);
    }

    pub(crate) fn set_last_raw(&self, raw: RawReading) {
        self.last_raw.store(raw, Ordering::Release);
        self.has_reading.store(true, Ordering::Release);
    }

    pub(crate) fn record_completed(&self) {
        self.completed_cycles.fetch_add(1, Ordering::AcqRel);
    }

    pub(crate) fn record_failed(&self) {
        self.failed_cycles.fetch_add(1, Ordering::AcqRel);
    }

    pub(crate) fn record_pump(&self) {
        self.pump_activations.fetch_add(1, Ordering::AcqRel);
    }
}

/// Cloneable read-only handle.
#[derive(Debug, Clone)]
pub struct Monitor {
    status: Arc<SharedStatus>,
    series: SeriesStore,
}

impl Monitor {
    pub(crate) fn new(status: Arc<SharedStatus>, series: SeriesStore) -> Self {
        Self { status, series }
    }

    /// Every normalized reading recorded so far, oldest first.
    pub fn series_snapshot(&self) -> Vec<NormalizedReading> {
        self.series.snapshot()
    }

    pub fn series_len(&self) -> usize {
        self.series.len()
    }

    pub fn series(&self) -> &SeriesStore {
        &self.series
    }

    pub fn current_state(&self) -> MoistureState {
        MoistureState::from_index(self.status.state.load(Ordering::Acquire) as usize)
    }

    /// Latest raw reading, successful cycle or not.  `None` before the
    /// first successful sensor read.
    pub fn last_raw_reading(&self) -> Option<RawReading> {
        self.status
            .has_reading
            .load(Ordering::Acquire)
            .then(|| self.status.last_raw.load(Ordering::Acquire))
    }

    pub fn completed_cycles(&self) -> u64 {
        self.status.completed_cycles.load(Ordering::Acquire)
    }

    pub fn failed_cycles(&self) -> u64 {
        self.status.failed_cycles.load(Ordering::Acquire)
    }

    pub fn pump_activations(&self) -> u64 {
        self.status.pump_activations.load(Ordering::Acquire)
    }
}
