//! Watering policy state machine.
//!
//! Two small machines live here:
//!
//! ```text
//!   reading ──classify──▶ MoistureTier ──tier table──▶ TierPlan (steps)
//!
//!   RUNNING ──[button]────▶ ABORTED   (terminal)
//!      │
//!      └────[deadline]───▶ EXPIRED   (terminal)
//! ```
//!
//! The tier machine is stateless: every reading is classified afresh and
//! the matching row of the table built by [`tiers::build_tier_table`] is
//! executed by the controller.  The session machine only ever moves out of
//! `Running`; both terminal states are sinks.

pub mod context;
pub mod tiers;

use log::info;

// ---------------------------------------------------------------------------
// Moisture tiers
// ---------------------------------------------------------------------------

/// Classification bucket derived from a moisture reading.
///
/// Capacitive probes read *higher* when the soil is drier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MoistureTier {
    Dry = 0,
    Moderate = 1,
    Wet = 2,
}

impl MoistureTier {
    /// Total number of tiers, used to size the tier table.
    pub const COUNT: usize = 3;
}

/// Tier boundaries in sensor units.
///
/// `value >= dry` is DRY, `moderate <= value < dry` is MODERATE, anything
/// below `moderate` is WET.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    pub dry: u16,
    pub moderate: u16,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            dry: 650,
            moderate: 500,
        }
    }
}

/// Map a reading to its tier.  Total over `u16`: the three ranges are
/// contiguous and do not overlap as long as `moderate < dry`.
pub fn classify(value: u16, thresholds: Thresholds) -> MoistureTier {
    if value >= thresholds.dry {
        MoistureTier::Dry
    } else if value >= thresholds.moderate {
        MoistureTier::Moderate
    } else {
        MoistureTier::Wet
    }
}

// ---------------------------------------------------------------------------
// Session phase
// ---------------------------------------------------------------------------

/// Lifecycle of one watering session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionPhase {
    Running,
    /// Ended by the manual abort button.
    Aborted,
    /// Ended because the time budget ran out.
    Expired,
}

impl SessionPhase {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Running)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Running => "Running",
            Self::Aborted => "Aborted",
            Self::Expired => "Expired",
        }
    }
}

/// Apply a phase change.  Terminal phases are sinks: a second terminal
/// transition is ignored and the first outcome wins.
pub fn transition(current: &mut SessionPhase, next: SessionPhase) {
    if current.is_terminal() || *current == next {
        return;
    }
    info!("Session transition: {} -> {}", current.name(), next.name());
    *current = next;
}
