//! Session scheduler.
//!
//! Repeats watering sessions back-to-back, `runs_per_day` times a day.
//! Each session is already sized to `24h / runs_per_day` by the
//! controller, so an expired session is followed immediately by the next.
//! The scheduler knows nothing about boards or displays: it asks a
//! [`SessionRunner`] to run one session and decides what happens next
//! from the outcome.
//!
//! ```text
//!   ┌──────────────┐  run_session(n)  ┌──────────────┐
//!   │  Scheduler   │ ───────────────▶ │ SessionRunner│
//!   │              │ ◀─────────────── │  (main.rs)   │
//!   └──────────────┘  SessionOutcome  └──────────────┘
//!          │
//!          ├─ Expired ─▶ next session
//!          ├─ Failed  ─▶ back off, retry (bounded)
//!          └─ Aborted ─▶ stop
//! ```

use core::time::Duration;

use log::{info, warn};

use crate::app::ports::Clock;
use crate::config::SystemConfig;

/// How a single session ended, as seen by the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Ran to its deadline.
    Expired,
    /// The operator pressed the button.
    Aborted,
    /// Ended in error.
    Failed,
}

/// Why the schedule stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Aborted,
    TooManyFailures,
}

/// What the scheduler does after a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextAction {
    RunAgain { after: Duration },
    Stop(StopReason),
}

/// Runs one session on behalf of the scheduler.
pub trait SessionRunner {
    /// `index` counts sessions from 0.
    fn run_session(&mut self, index: u32) -> SessionOutcome;
}

impl<F: FnMut(u32) -> SessionOutcome> SessionRunner for F {
    fn run_session(&mut self, index: u32) -> SessionOutcome {
        self(index)
    }
}

/// Back-off after a failed session.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(10);
/// Failed sessions in a row before giving up.
pub const DEFAULT_MAX_FAILURES: u32 = 3;

pub struct SessionScheduler {
    runs_per_day: u16,
    retry_delay: Duration,
    max_consecutive_failures: u32,
    sessions_run: u32,
    consecutive_failures: u32,
}

impl SessionScheduler {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            runs_per_day: config.runs_per_day,
            retry_delay: DEFAULT_RETRY_DELAY,
            max_consecutive_failures: DEFAULT_MAX_FAILURES,
            sessions_run: 0,
            consecutive_failures: 0,
        }
    }

    pub fn with_retry(mut self, delay: Duration, max_consecutive_failures: u32) -> Self {
        self.retry_delay = delay;
        self.max_consecutive_failures = max_consecutive_failures.max(1);
        self
    }

    pub fn sessions_run(&self) -> u32 {
        self.sessions_run
    }

    /// Day number (from 0) the next session falls on.
    pub fn day(&self) -> u32 {
        self.sessions_run / u32::from(self.runs_per_day.max(1))
    }

    /// Book-keep one finished session and decide what comes next.
    pub fn on_session_end(&mut self, outcome: SessionOutcome) -> NextAction {
        self.sessions_run = self.sessions_run.saturating_add(1);

        match outcome {
            SessionOutcome::Aborted => {
                info!("Scheduler: session aborted, stopping");
                return NextAction::Stop(StopReason::Aborted);
            }
            SessionOutcome::Failed => {
                self.consecutive_failures += 1;
                if self.consecutive_failures >= self.max_consecutive_failures {
                    warn!(
                        "Scheduler: {} failed sessions in a row, giving up",
                        self.consecutive_failures
                    );
                    return NextAction::Stop(StopReason::TooManyFailures);
                }
            }
            SessionOutcome::Expired => self.consecutive_failures = 0,
        }

        let after = if outcome == SessionOutcome::Failed {
            self.retry_delay
        } else {
            Duration::ZERO
        };
        NextAction::RunAgain { after }
    }

    /// Drive sessions until the schedule stops.
    pub fn run<R, K>(&mut self, runner: &mut R, clock: &mut K) -> StopReason
    where
        R: SessionRunner,
        K: Clock,
    {
        loop {
            let index = self.sessions_run;
            info!(
                "Scheduler: session {} (day {}, {}/day)",
                index + 1,
                self.day(),
                self.runs_per_day
            );
            let outcome = runner.run_session(index);
            match self.on_session_end(outcome) {
                NextAction::Stop(reason) => return reason,
                NextAction::RunAgain { after } => {
                    if !after.is_zero() {
                        clock.wait(after);
                    }
                }
            }
        }
    }
}
