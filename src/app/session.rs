//! Session boundary.
//!
//! [`run_session`] is the scoped unit of work: acquire the board, run the
//! controller, release the board no matter how the loop ended.  Every fatal
//! error is caught here and turned into a [`SessionFailure`] that still
//! carries the drained log, so the caller can always print a report.
//!
//! ```text
//!  start ─▶ ensure_ready ─▶ pin modes ─▶ controller.run ─▶ finish
//!    │            │              │              │
//!    └────────────┴──────────────┴──────────────┴──▶ stop (always)
//! ```

use core::fmt;
use core::ops::{Deref, DerefMut};

use log::{error, info};

use crate::error::SessionError;
use crate::pins;

use super::controller::{SessionReport, WateringController};
use super::ports::{AbortInput, ActuatorPort, BoardPort, ChartSink, Clock, PinMode, SensorPort, StatusSink};

/// A session that ended in error.
#[derive(Debug, Clone)]
pub struct SessionFailure {
    pub error: SessionError,
    /// Whatever the session logged before it failed.
    pub log: String,
}

impl SessionFailure {
    /// The partial log worth printing, if the session logged anything.
    pub fn partial_log(&self) -> Option<&str> {
        if self.log.is_empty() {
            None
        } else {
            Some(&self.log)
        }
    }
}

impl fmt::Display for SessionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "watering session failed: {}", self.error)
    }
}

/// Pin modes applied after the handshake.
const PIN_SETUP: [(i32, PinMode); 3] = [
    (pins::MOISTURE_ADC_GPIO, PinMode::Analog),
    (pins::PUMP_RELAY_GPIO, PinMode::Output),
    (pins::ABORT_BUTTON_GPIO, PinMode::Input),
];

/// Stops the board when dropped, including on unwind.
struct BoardGuard<'a, B: BoardPort>(&'a mut B);

impl<B: BoardPort> Deref for BoardGuard<'_, B> {
    type Target = B;

    fn deref(&self) -> &B {
        self.0
    }
}

impl<B: BoardPort> DerefMut for BoardGuard<'_, B> {
    fn deref_mut(&mut self) -> &mut B {
        self.0
    }
}

impl<B: BoardPort> Drop for BoardGuard<'_, B> {
    fn drop(&mut self) {
        self.0.stop();
        info!("Board stopped. End of the watering process.");
    }
}

fn connect<B: BoardPort>(board: &mut B) -> Result<(), SessionError> {
    board.start().map_err(SessionError::Connect)?;
    board.ensure_ready().map_err(SessionError::Connect)?;
    for (pin, mode) in PIN_SETUP {
        board.set_pin_mode(pin, mode).map_err(SessionError::Connect)?;
    }
    Ok(())
}

/// Run one complete session against `board`.
pub fn run_session<B, S, C, K>(
    controller: &mut WateringController,
    board: &mut B,
    display: &mut S,
    chart: &mut C,
    clock: &mut K,
) -> Result<SessionReport, SessionFailure>
where
    B: BoardPort + SensorPort + ActuatorPort + AbortInput,
    S: StatusSink,
    C: ChartSink,
    K: Clock,
{
    // The previous session's total line has already been reported.
    controller.log_mut().reset();
    let mut board = BoardGuard(board);

    let outcome = connect(&mut *board).and_then(|()| {
        controller
            .log_mut()
            .append("Board started for the watering process.");
        controller.run(&mut *board, display, chart, clock)
    });

    match outcome {
        Ok(state) => {
            let report = controller.finish(state, display);
            info!(
                "Session {}: {} iterations, {}s watering",
                report.phase.name(),
                report.iterations,
                report.total_watering_secs
            );
            Ok(report)
        }
        Err(error) => {
            match error {
                SessionError::Connect(e) => error!("Couldn't connect to the board: {}", e),
                SessionError::Transport(e) => error!("Board link lost mid-session: {}", e),
                SessionError::Unexpected(msg) => error!("Unexpected error occurred: {}", msg),
            }
            let log = controller.log().drain();
            controller.log_mut().reset();
            Err(SessionFailure { error, log })
        }
    }
}
