//! Pump cooldown window.
//!
//! Armed when the pump fires; while active, dry cycles must not command
//! the pump again.  Tracked as a cooldown-until timestamp on the caller's
//! monotonic clock, so nothing sleeps.

#[derive(Debug, Clone, Copy)]
pub struct PumpCooldown {
    window_ms: u64,
    until_ms: Option<u64>,
}

impl PumpCooldown {
    pub fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            until_ms: None,
        }
    }

    /// Open a fresh window starting at `now_ms`.
    pub fn arm(&mut self, now_ms: u64) {
        self.until_ms = Some(now_ms.saturating_add(self.window_ms));
    }

    pub fn is_active(&self, now_ms: u64) -> bool {
        self.until_ms.is_some_and(|until| now_ms < until)
    }

    /// Milliseconds left in the window, 0 when expired or never armed.
    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        self.until_ms
            .map_or(0, |until| until.saturating_sub(now_ms))
    }

    pub fn window_ms(&self) -> u64 {
        self.window_ms
    }
}
