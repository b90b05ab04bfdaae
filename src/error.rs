//! Unified error types for the SoilGuard controller.
//!
//! A single `Error` enum that every cycle step converts into, keeping the
//! control loop's per-cycle abort path uniform.  All variants are `Copy`
//! so they can be passed through the event sink and the monitor without
//! allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level controller error
// ---------------------------------------------------------------------------

/// Every fallible step of a control cycle funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The gateway could not read the sensor or drive the display.
    Transport(TransportError),
    /// The pump command failed.
    Pump(PumpOperationError),
    /// The pump's active-run wait was cut short by a shutdown request.
    InterruptedWait,
    /// Configuration is invalid or could not be loaded.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "transport: {e}"),
            Self::Pump(e) => write!(f, "pump: {e}"),
            Self::InterruptedWait => write!(f, "wait interrupted"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Transport errors
// ---------------------------------------------------------------------------

/// Failures reported by the sensor/actuator gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    /// The sensor read returned an error or timed out.
    ReadFailed,
    /// An output pin or relay write failed.
    WriteFailed,
    /// The text display rejected the message.
    DisplayFailed,
    /// The board connection is gone.
    Disconnected,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadFailed => write!(f, "sensor read failed"),
            Self::WriteFailed => write!(f, "output write failed"),
            Self::DisplayFailed => write!(f, "display update failed"),
            Self::Disconnected => write!(f, "gateway disconnected"),
        }
    }
}

impl std::error::Error for TransportError {}

impl From<TransportError> for Error {
    fn from(e: TransportError) -> Self {
        Self::Transport(e)
    }
}

// ---------------------------------------------------------------------------
// Pump errors
// ---------------------------------------------------------------------------

/// A pump command failed.  Carries the transport failure underneath.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PumpOperationError {
    pub cause: TransportError,
}

impl fmt::Display for PumpOperationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pump operation unsuccessful ({})", self.cause)
    }
}

impl std::error::Error for PumpOperationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.cause)
    }
}

impl From<PumpOperationError> for Error {
    fn from(e: PumpOperationError) -> Self {
        Self::Pump(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Controller-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
