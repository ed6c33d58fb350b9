//! Per-session mutable state threaded through the watering loop.
//!
//! `SessionState` is the single struct the controller reads and writes while
//! a session runs: timing, the abort latch, the watering tally and the
//! current phase.  It is created at session start and dropped at the end.

use core::time::Duration;

use super::{MoistureTier, SessionPhase};

// ---------------------------------------------------------------------------
// Readings and actuations
// ---------------------------------------------------------------------------

/// One poll of the moisture probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoistureReading {
    /// Sensor units, 0-1023.
    pub value: u16,
    /// Monotonic milliseconds at which the value was read.
    pub at_ms: u64,
}

/// One paired pump ON/OFF.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActuationEvent {
    pub tier: MoistureTier,
    pub duration_secs: u32,
    pub at_ms: u64,
}

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// The state of one session.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub started_at_ms: u64,
    /// Fixed at creation; never extended.
    deadline_ms: u64,
    pub abort_requested: bool,
    pub total_watering_secs: u32,
    /// Loop iterations that got past the abort check.
    pub iterations: u32,
    pub phase: SessionPhase,
    pub actuations: Vec<ActuationEvent>,
}

impl SessionState {
    pub fn new(started_at_ms: u64, interval: Duration) -> Self {
        let budget_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
        Self {
            started_at_ms,
            deadline_ms: started_at_ms.saturating_add(budget_ms),
            abort_requested: false,
            total_watering_secs: 0,
            iterations: 0,
            phase: SessionPhase::Running,
            actuations: Vec::new(),
        }
    }

    pub fn deadline_ms(&self) -> u64 {
        self.deadline_ms
    }

    /// True once `now_ms` has reached the deadline.
    pub fn expired_at(&self, now_ms: u64) -> bool {
        now_ms >= self.deadline_ms
    }

    /// Record a completed pump run and add it to the tally.
    pub fn record_actuation(&mut self, tier: MoistureTier, duration_secs: u32, at_ms: u64) {
        self.total_watering_secs = self.total_watering_secs.saturating_add(duration_secs);
        self.actuations.push(ActuationEvent {
            tier,
            duration_secs,
            at_ms,
        });
    }
}
