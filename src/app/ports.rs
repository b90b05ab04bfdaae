//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (sensor, pump, display, clock, event sinks, config
//! storage) implement these traits.  The
//! [`AppService`](super::service::AppService) consumes them via generics,
//! so the domain core never touches hardware directly.
//!
//! The board-facing ports together form the *gateway*: whatever sits
//! between the controller and the physical sensor, pump, and display.
//! A type that implements all three gets [`Gateway`] for free.

use crate::config::SystemConfig;
use crate::control::RawReading;
use crate::error::{Error, TransportError};

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this once per cycle.
pub trait SensorPort {
    /// Read the moisture sensor.  Higher means drier.
    fn read_moisture(&mut self) -> Result<RawReading, TransportError>;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the pump relay.
pub trait ActuatorPort {
    /// Energise the pump, hold for `duration_ms`, then de-energise.
    ///
    /// Blocks for the run.  Implementations must leave the pump off on
    /// every return path, including [`ActuatorError::Interrupted`].
    fn run_pump(&mut self, duration_ms: u32) -> Result<(), ActuatorError>;
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → text display)
// ───────────────────────────────────────────────────────────────

pub trait DisplayPort {
    /// Replace the displayed text.
    fn show_message(&mut self, text: &str) -> Result<(), TransportError>;

    /// Blank the display and release it.  Called once at process exit.
    fn shutdown_display(&mut self) -> Result<(), TransportError>;
}

/// Everything the control loop drives on the board.
pub trait Gateway: SensorPort + ActuatorPort + DisplayPort {}

impl<T: SensorPort + ActuatorPort + DisplayPort> Gateway for T {}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond clock.  Only differences are meaningful.
pub trait ClockPort {
    fn now_ms(&self) -> u64;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ↔ persistent config)
// ───────────────────────────────────────────────────────────────

/// Loads and persists system configuration.
///
/// Implementations MUST validate config values before persisting.
/// Invalid ranges are rejected with [`ConfigError::ValidationFailed`],
/// not silently clamped.
pub trait ConfigPort {
    /// Load configuration from persistent storage.
    /// Returns [`SystemConfig::default()`] if no stored config exists.
    fn load(&self) -> Result<SystemConfig, ConfigError>;

    /// Validate and persist configuration.
    fn save(&self, config: &SystemConfig) -> Result<(), ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ActuatorPort::run_pump`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorError {
    /// The relay could not be switched.
    Transport(TransportError),
    /// Shutdown was requested while the pump was running.  The pump has
    /// already been switched off.
    Interrupted,
}

impl core::fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "{}", e),
            Self::Interrupted => write!(f, "pump run interrupted"),
        }
    }
}

impl From<TransportError> for ActuatorError {
    fn from(e: TransportError) -> Self {
        Self::Transport(e)
    }
}

/// Errors from [`ConfigPort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// No config found in storage (first boot).
    NotFound,
    /// Stored config failed deserialization.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::NotFound => Self::Config("not found"),
            ConfigError::Corrupted => Self::Config("corrupted"),
            ConfigError::ValidationFailed(msg) => Self::Config(msg),
            ConfigError::IoError => Self::Config("storage I/O error"),
        }
    }
}
