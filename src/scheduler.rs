//! Fixed-rate tick scheduling.
//!
//! Deadlines sit on a fixed grid `start + k * period`, so per-cycle work
//! time never accumulates as drift.  When a cycle overruns one or more
//! grid slots (a pump run is longer than the sampling period, say), the
//! missed slots collapse into a single late tick that fires immediately;
//! the grid is never shifted.
//!
//! ```text
//!   period = 2000
//!   slot:   2000   4000   6000   8000   10000  12000
//!            │ cycle runs 8000 ms ──────▶│
//!            fire   skip   skip   skip   fire   fire
//! ```
//!
//! All times are milliseconds on the caller's monotonic clock
//! ([`ClockPort`](crate::app::ports::ClockPort)).

use log::debug;

#[derive(Debug, Clone)]
pub struct FixedRateTicker {
    period_ms: u64,
    next_ms: u64,
    fired: u64,
    coalesced: u64,
}

impl FixedRateTicker {
    /// First deadline is one full period after `start_ms`.
    pub fn new(period_ms: u64, start_ms: u64) -> Self {
        let period_ms = period_ms.max(1);
        Self {
            period_ms,
            next_ms: start_ms.saturating_add(period_ms),
            fired: 0,
            coalesced: 0,
        }
    }

    pub fn period_ms(&self) -> u64 {
        self.period_ms
    }

    /// Timestamp of the next tick.
    pub fn deadline_ms(&self) -> u64 {
        self.next_ms
    }

    pub fn is_due(&self, now_ms: u64) -> bool {
        now_ms >= self.next_ms
    }

    /// How long to wait from `now_ms` until the next tick (0 when overdue).
    pub fn wait_ms(&self, now_ms: u64) -> u64 {
        self.next_ms.saturating_sub(now_ms)
    }

    /// Mark the pending tick as handled and move to the next grid slot.
    ///
    /// `now_ms` is the time the tick's work finished.  If more than one
    /// slot has already elapsed, all but the latest are dropped.
    pub fn complete(&mut self, now_ms: u64) {
        self.fired += 1;
        let mut next = self.next_ms.saturating_add(self.period_ms);
        if next <= now_ms {
            let missed = (now_ms - next) / self.period_ms;
            next = next.saturating_add(missed.saturating_mul(self.period_ms));
            if missed > 0 {
                debug!("ticker: overran, coalesced {missed} tick(s)");
            }
            self.coalesced += missed;
        }
        self.next_ms = next;
    }

    /// Ticks handled so far.
    pub fn fired(&self) -> u64 {
        self.fired
    }

    /// Ticks dropped because an earlier tick overran them.
    pub fn coalesced(&self) -> u64 {
        self.coalesced
    }
}
