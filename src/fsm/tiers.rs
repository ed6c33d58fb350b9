//! Tier plans and table builder.
//!
//! Each tier is handled by a fixed script of [`Step`]s: pump edges, status
//! frames, log announcement, holds.  The controller walks the script; the
//! script itself is plain data, so the pump pairing rule and the hold
//! lengths can be checked without running anything.
//!
//! ```text
//!  DRY       PumpOn · Announce · Show · Hold(2s) · +2 · PumpOff · Show · Hold(3s)
//!  MODERATE  PumpOn · Announce · Show · Hold(1s) · +1 · PumpOff · Show · Hold(1s)
//!                                                       · Show · Hold(2s)
//!  WET       Announce · Show · Hold(5s)
//! ```

use core::time::Duration;

use super::MoistureTier;
use crate::config::Holds;

// ═══════════════════════════════════════════════════════════════════════════
//  Script vocabulary
// ═══════════════════════════════════════════════════════════════════════════

/// Content of one status slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    Blank,
    Text(&'static str),
    /// `"Moisture: <n>"` from a fresh sensor read at render time.
    Moisture,
}

/// The four status slots, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTemplate {
    pub lines: [Line; 4],
}

impl FrameTemplate {
    pub const fn new(tier: Line, message: Line, readout: Line, pump: Line) -> Self {
        Self {
            lines: [tier, message, readout, pump],
        }
    }

    /// Whether rendering this frame needs a sensor read.
    pub fn needs_reading(&self) -> bool {
        self.lines.iter().any(|l| matches!(l, Line::Moisture))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    PumpOn,
    PumpOff,
    /// Append the tier's log message.
    Announce,
    Show(FrameTemplate),
    Hold(Duration),
    /// Add seconds to the session's watering total.
    Accumulate(u32),
}

/// Script for one tier.
#[derive(Debug, Clone)]
pub struct TierPlan {
    pub tier: MoistureTier,
    pub name: &'static str,
    pub steps: Vec<Step>,
}

impl TierPlan {
    /// Seconds this plan adds to the watering total.
    pub fn watering_secs(&self) -> u32 {
        self.steps
            .iter()
            .map(|s| match s {
                Step::Accumulate(secs) => *secs,
                _ => 0,
            })
            .sum()
    }

    /// Sum of every hold in the plan.
    pub fn hold_total(&self) -> Duration {
        self.steps
            .iter()
            .map(|s| match s {
                Step::Hold(d) => *d,
                _ => Duration::ZERO,
            })
            .sum()
    }

    /// Log line for this tier, given the session total so far.
    pub fn announcement(&self, total_watering_secs: u32) -> String {
        match self.tier {
            MoistureTier::Dry => format!(
                "Soil is dry, watering for {}",
                secs_phrase(self.watering_secs())
            ),
            MoistureTier::Moderate => format!(
                "Soil is not adequately wet, watering for {}",
                secs_phrase(self.watering_secs())
            ),
            MoistureTier::Wet => format!(
                "Soil is now wet after {} of watering",
                secs_phrase(total_watering_secs)
            ),
        }
    }
}

/// `"1 second"`, `"2 seconds"`.
pub fn secs_phrase(secs: u32) -> String {
    if secs == 1 {
        "1 second".to_string()
    } else {
        format!("{secs} seconds")
    }
}

/// Every `PumpOn` is closed by a `PumpOff` before the next `PumpOn` and
/// before the script ends.
pub fn pump_steps_paired(steps: &[Step]) -> bool {
    let mut on = false;
    for step in steps {
        match step {
            Step::PumpOn if on => return false,
            Step::PumpOn => on = true,
            Step::PumpOff => on = false,
            _ => {}
        }
    }
    !on
}

// ═══════════════════════════════════════════════════════════════════════════
//  Status frames
// ═══════════════════════════════════════════════════════════════════════════

const PUMP_ON: Line = Line::Text("Pump is On");
const PUMP_OFF: Line = Line::Text("Pump is Off");

/// Shown when the abort button ends the session.
pub const FAREWELL: FrameTemplate = FrameTemplate::new(
    Line::Text("Button Pressed"),
    Line::Text("Exiting the System"),
    Line::Text("Thank you"),
    Line::Blank,
);

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the tier table, indexed by `MoistureTier as usize`.
pub fn build_tier_table(holds: &Holds) -> [TierPlan; MoistureTier::COUNT] {
    let dry_secs = holds.dry_pump.as_secs() as u32;
    let moderate_secs = holds.moderate_pump.as_secs() as u32;

    [
        // Index 0: Dry
        TierPlan {
            tier: MoistureTier::Dry,
            name: "Dry",
            steps: vec![
                Step::PumpOn,
                Step::Announce,
                Step::Show(FrameTemplate::new(
                    Line::Text("Soil is dry"),
                    Line::Blank,
                    Line::Blank,
                    PUMP_ON,
                )),
                Step::Hold(holds.dry_pump),
                Step::Accumulate(dry_secs),
                Step::PumpOff,
                Step::Show(FrameTemplate::new(
                    Line::Text("Waiting"),
                    Line::Blank,
                    Line::Moisture,
                    PUMP_OFF,
                )),
                Step::Hold(holds.dry_cooldown),
            ],
        },
        // Index 1: Moderate
        TierPlan {
            tier: MoistureTier::Moderate,
            name: "Moderate",
            steps: vec![
                Step::PumpOn,
                Step::Announce,
                Step::Show(FrameTemplate::new(
                    Line::Text("Not Adequately Wet"),
                    Line::Blank,
                    Line::Moisture,
                    PUMP_ON,
                )),
                Step::Hold(holds.moderate_pump),
                Step::Accumulate(moderate_secs),
                Step::PumpOff,
                Step::Show(FrameTemplate::new(
                    Line::Text("Pump is Off"),
                    Line::Text("Waiting"),
                    Line::Moisture,
                    Line::Blank,
                )),
                Step::Hold(holds.moderate_settle),
                Step::Show(FrameTemplate::new(
                    Line::Text("Pump is Off"),
                    Line::Text("Waiting"),
                    Line::Moisture,
                    Line::Blank,
                )),
                Step::Hold(holds.moderate_cooldown),
            ],
        },
        // Index 2: Wet
        TierPlan {
            tier: MoistureTier::Wet,
            name: "Wet",
            steps: vec![
                Step::Announce,
                Step::Show(FrameTemplate::new(
                    Line::Text("Soil is Wet"),
                    Line::Text("no more water needed"),
                    Line::Moisture,
                    PUMP_OFF,
                )),
                Step::Hold(holds.wet_recheck),
            ],
        },
    ]
}
