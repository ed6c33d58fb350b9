//! Port traits: the hexagonal boundary between the watering core and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ WateringController (domain)
//! ```
//!
//! Driven adapters (board, display, chart, clock) implement these traits.
//! The controller consumes them via generics, so the decision core never
//! touches hardware directly.
//!
//! ## Failure policy
//!
//! - **Board ports** (`SensorPort`, `ActuatorPort`, `AbortInput`,
//!   `BoardPort`) return [`BoardError`]; the controller propagates these
//!   and the session ends.
//! - **Observational ports** (`StatusSink`, `ChartSink`) return their own
//!   error types; the controller logs them and carries on.

use core::time::Duration;

use super::status::StatusFrame;
use crate::error::{BoardError, ChartError, DisplayError};

// ───────────────────────────────────────────────────────────────
// Board I/O (driven adapter: hardware ↔ domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port for the moisture probe.
pub trait SensorPort {
    /// One moisture reading in sensor units (0–1023).
    fn read_moisture(&mut self) -> Result<u16, BoardError>;
}

/// Write-side port for the pump relay.
pub trait ActuatorPort {
    /// Switch the pump relay.  Idempotent.
    fn set_pump(&mut self, on: bool) -> Result<(), BoardError>;
}

/// The manual abort button.
pub trait AbortInput {
    /// `true` while the button is asserted.
    fn abort_requested(&mut self) -> Result<bool, BoardError>;
}

/// How a board pin is driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinMode {
    Analog,
    Output,
    Input,
}

/// Board lifecycle.  The session acquires the board with `start` +
/// `ensure_ready` and always releases it with `stop`.
pub trait BoardPort {
    /// Open the link / bring up peripherals.
    fn start(&mut self) -> Result<(), BoardError>;

    /// Block until the board has finished its handshake.
    fn ensure_ready(&mut self) -> Result<(), BoardError>;

    fn set_pin_mode(&mut self, pin: i32, mode: PinMode) -> Result<(), BoardError>;

    /// Release the board.  Must be safe to call after a failed `start`.
    fn stop(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Observational collaborators (domain → operator)
// ───────────────────────────────────────────────────────────────

/// A small multi-line status display.
pub trait StatusSink {
    /// Replace whatever is shown with `frame`.
    fn show(&mut self, frame: &StatusFrame) -> Result<(), DisplayError>;

    /// Blank the display and wait for the panel to settle.
    fn clear(&mut self) -> Result<(), DisplayError>;
}

/// Receives moisture data points for later plotting.
pub trait ChartSink {
    fn record(&mut self, series: &str, at_ms: u64, value: f32) -> Result<(), ChartError>;
}

// ───────────────────────────────────────────────────────────────
// Time
// ───────────────────────────────────────────────────────────────

/// Monotonic time plus the single blocking hold primitive.
///
/// Every pause in the control loop goes through [`Clock::wait`], so a fake
/// clock in tests can advance time instantly and record hold lengths.
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin.
    fn now_ms(&self) -> u64;

    fn wait(&mut self, duration: Duration);
}
