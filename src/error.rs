//! Unified error types for the PlantCare firmware.
//!
//! A single [`SessionError`] that every fatal path funnels into, keeping the
//! session boundary's error handling uniform.  Observational collaborators
//! (display, chart) get their own error types because their failures are
//! never allowed to reach the session boundary.
//! All variants are `Copy` so they can be passed around without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Board transport errors
// ---------------------------------------------------------------------------

/// Failures of the board link (pin I/O, handshake, lifecycle).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// Peripheral bring-up failed (ESP-IDF return code).
    InitFailed(i32),
    /// The board was used before `start()` / `ensure_ready()` succeeded.
    NotReady,
    /// Pin mode could not be applied.
    PinConfigFailed { pin: i32, code: i32 },
    /// An analog or digital read failed.
    ReadFailed { pin: i32 },
    /// A digital write failed.
    WriteFailed { pin: i32 },
    /// The link to the board dropped mid-session.
    Disconnected,
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InitFailed(rc) => write!(f, "board init failed (rc={rc})"),
            Self::NotReady => write!(f, "board not ready"),
            Self::PinConfigFailed { pin, code } => {
                write!(f, "pin {pin} config failed (rc={code})")
            }
            Self::ReadFailed { pin } => write!(f, "read on pin {pin} failed"),
            Self::WriteFailed { pin } => write!(f, "write on pin {pin} failed"),
            Self::Disconnected => write!(f, "board disconnected"),
        }
    }
}

// ---------------------------------------------------------------------------
// Observational collaborator errors (non-fatal)
// ---------------------------------------------------------------------------

/// The status display could not render or clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayError {
    /// The bus transaction to the display failed.
    BusFailed,
    /// The display has not been initialised.
    NotInitialised,
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BusFailed => write!(f, "display bus failed"),
            Self::NotInitialised => write!(f, "display not initialised"),
        }
    }
}

/// The chart collaborator rejected a data point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartError {
    /// No room left for another series.
    TooManySeries,
    /// Series name longer than the fixed label capacity.
    SeriesNameTooLong,
}

impl fmt::Display for ChartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooManySeries => write!(f, "chart series limit reached"),
            Self::SeriesNameTooLong => write!(f, "chart series name too long"),
        }
    }
}

// ---------------------------------------------------------------------------
// Session errors (fatal)
// ---------------------------------------------------------------------------

/// Every fatal session failure funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    /// The board link could not be established; the loop never ran.
    Connect(BoardError),
    /// The board link failed while the loop was running.
    Transport(BoardError),
    /// Anything else caught at the session boundary.
    Unexpected(&'static str),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connect(e) => write!(f, "couldn't connect to the board: {e}"),
            Self::Transport(e) => write!(f, "board transport failed: {e}"),
            Self::Unexpected(msg) => write!(f, "unexpected error: {msg}"),
        }
    }
}

impl core::error::Error for SessionError {}

impl From<BoardError> for SessionError {
    fn from(e: BoardError) -> Self {
        Self::Transport(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Session-wide `Result` alias.
pub type Result<T> = core::result::Result<T, SessionError>;
