//! Append-only series of normalized moisture readings.
//!
//! One entry per successfully completed control cycle, in cycle order.
//! The control loop is the only writer; readers take snapshots from any
//! thread through a cloned handle.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use crate::control::NormalizedReading;

/// Shared handle to the series.  Cheap to clone.
#[derive(Debug, Clone, Default)]
pub struct SeriesStore {
    inner: Arc<Mutex<Vec<NormalizedReading>>>,
}

/// Aggregate view for the shutdown report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesSummary {
    pub count: usize,
    pub min: NormalizedReading,
    pub max: NormalizedReading,
    pub mean: NormalizedReading,
    pub last: NormalizedReading,
}

impl SeriesStore {
    pub fn new() -> Self {
        Self::default()
    }

    // A panicking reader cannot leave a Vec half-pushed, so a poisoned
    // lock still guards consistent data.
    fn lock(&self) -> MutexGuard<'_, Vec<NormalizedReading>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn append(&self, value: NormalizedReading) {
        self.lock().push(value);
    }

    /// Copy of every reading so far, oldest first.
    pub fn snapshot(&self) -> Vec<NormalizedReading> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn latest(&self) -> Option<NormalizedReading> {
        self.lock().last().copied()
    }

    /// `None` until the first reading lands.
    pub fn summary(&self) -> Option<SeriesSummary> {
        let series = self.lock();
        let last = *series.last()?;
        let (min, max, sum) = series.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY, 0.0),
            |(min, max, sum), &v| (min.min(v), max.max(v), sum + v),
        );
        Some(SeriesSummary {
            count: series.len(),
            min,
            max,
            mean: sum / series.len() as f64,
            last,
        })
    }
}
