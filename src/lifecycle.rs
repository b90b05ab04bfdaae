//! Process lifecycle: shutdown signalling, display teardown, panic logging.
//!
//! ```text
//!  Ctrl-C / SIGTERM ──▶ ShutdownSignal::request()
//!                              │
//!           ┌──────────────────┼──────────────────────┐
//!           ▼                  ▼                      ▼
//!   tick wait returns   pump run wait returns   loop exits after
//!   early               early (InterruptedWait) current cycle
//!                                                     │
//!                                                     ▼
//!                                   TerminationHook::fire()  (or Drop)
//!                                   └─▶ DisplayPort::shutdown_display()
//! ```

use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use log::{error, info, warn};

use crate::app::ports::DisplayPort;

// ═══════════════════════════════════════════════════════════════
//  Shutdown signal
// ═══════════════════════════════════════════════════════════════

/// Latching, cloneable shutdown flag with interruptible waits.
#[derive(Debug, Clone, Default)]
pub struct ShutdownSignal {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        Self::default()
    }

    fn flag(&self) -> MutexGuard<'_, bool> {
        self.inner.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Latch the flag and wake every waiter.  Idempotent.
    pub fn request(&self) {
        *self.flag() = true;
        self.inner.1.notify_all();
    }

    pub fn is_requested(&self) -> bool {
        *self.flag()
    }

    /// Sleep for up to `timeout`.  Returns `true` if shutdown was
    /// requested before or during the wait.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let guard = self.flag();
        let (guard, _) = self
            .inner
            .1
            .wait_timeout_while(guard, timeout, |requested| !*requested)
            .unwrap_or_else(PoisonError::into_inner);
        *guard
    }
}

// ═══════════════════════════════════════════════════════════════
//  Termination hook
// ═══════════════════════════════════════════════════════════════

/// Owns the gateway for the life of the control loop and blanks the
/// display exactly once on the way out: on [`fire`](Self::fire), or on
/// drop (including unwinding) if `fire` was never called.
pub struct TerminationHook<G: DisplayPort> {
    gateway: G,
    fired: bool,
}

impl<G: DisplayPort> TerminationHook<G> {
    pub fn register(gateway: G) -> Self {
        Self {
            gateway,
            fired: false,
        }
    }

    /// Borrow the gateway for a control cycle.
    pub fn gateway_mut(&mut self) -> &mut G {
        &mut self.gateway
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }

    /// Shut the display down.  Best-effort: a failure is logged, never
    /// propagated.  Later calls are no-ops.
    pub fn fire(&mut self) {
        if self.fired {
            return;
        }
        self.fired = true;
        match self.gateway.shutdown_display() {
            Ok(()) => info!("Display shut down"),
            Err(e) => warn!("Display shutdown failed: {e}"),
        }
    }
}

impl<G: DisplayPort> Drop for TerminationHook<G> {
    fn drop(&mut self) {
        self.fire();
    }
}

// ═══════════════════════════════════════════════════════════════
//  Panic handler
// ═══════════════════════════════════════════════════════════════

/// Route panic messages through the logger before the default unwinding
/// (host) or abort (device) takes over.
pub fn install_panic_handler() {
    std::panic::set_hook(Box::new(|info| {
        let reason = if let Some(msg) = info.payload().downcast_ref::<&str>() {
            *msg
        } else if let Some(msg) = info.payload().downcast_ref::<String>() {
            msg.as_str()
        } else {
            "unknown panic"
        };

        match info.location() {
            Some(loc) => error!("PANIC: {} ({}:{})", reason, loc.file(), loc.line()),
            None => error!("PANIC: {}", reason),
        }
    }));
}
