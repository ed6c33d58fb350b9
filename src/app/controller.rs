//! Watering controller: the decision loop.
//!
//! [`WateringController`] owns the tier table and the session's
//! [`EventLog`].  It exposes one blocking [`run`](WateringController::run)
//! per session and a [`finish`](WateringController::finish) that turns the
//! final state into a [`SessionReport`].  All I/O flows through port traits
//! injected at the call site, so the whole loop runs against mocks.
//!
//! ```text
//!  SensorPort ──▶ ┌──────────────────────────┐ ──▶ StatusSink
//!  AbortInput ──▶ │   WateringController     │ ──▶ ChartSink
//! ActuatorPort ◀──│ classify · tier plan     │ ──▶ EventLog
//!                 └──────────────────────────┘
//!                              │
//!                        Clock::wait (holds)
//! ```
//!
//! Cancellation is polled once per iteration, before the sensor read; a
//! hold that has started always runs to completion.  The deadline is the
//! loop condition, so a session can overrun its budget by at most one
//! iteration's hold chain.

use log::{error, info, warn};

use crate::config::SystemConfig;
use crate::error::{Result, SessionError};
use crate::fsm::context::{ActuationEvent, MoistureReading, SessionState};
use crate::fsm::tiers::{FAREWELL, FrameTemplate, Line, Step, TierPlan, build_tier_table};
use crate::fsm::{MoistureTier, SessionPhase, Thresholds, classify, transition};
use crate::logbook::EventLog;

use super::ports::{AbortInput, ActuatorPort, ChartSink, Clock, SensorPort, StatusSink};
use super::status::StatusFrame;

/// Chart series every classification read is recorded under.
pub const CHART_SERIES: &str = "Moisture";

// ───────────────────────────────────────────────────────────────
// Session report
// ───────────────────────────────────────────────────────────────

/// What a finished session hands back to its caller.
#[derive(Debug, Clone)]
pub struct SessionReport {
    /// `Aborted` or `Expired`.
    pub phase: SessionPhase,
    pub total_watering_secs: u32,
    pub iterations: u32,
    pub actuations: Vec<ActuationEvent>,
    /// The drained event log of the session.
    pub log: String,
    /// What the log holds after the reset: the total-watering line.
    pub summary: String,
}

// ───────────────────────────────────────────────────────────────
// WateringController
// ───────────────────────────────────────────────────────────────

pub struct WateringController {
    config: SystemConfig,
    thresholds: Thresholds,
    table: [TierPlan; MoistureTier::COUNT],
    log: EventLog,
    /// Set between a `PumpOn` and its `PumpOff`.
    pump_engaged: bool,
}

impl WateringController {
    pub fn new(config: SystemConfig) -> Self {
        Self::with_log(config, EventLog::new())
    }

    /// Controller writing into a caller-supplied log.
    pub fn with_log(config: SystemConfig, log: EventLog) -> Self {
        let thresholds = config.thresholds();
        let table = build_tier_table(&config.holds());
        Self {
            config,
            thresholds,
            table,
            log,
            pump_engaged: false,
        }
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn log_mut(&mut self) -> &mut EventLog {
        &mut self.log
    }

    pub fn plan(&self, tier: MoistureTier) -> &TierPlan {
        &self.table[tier as usize]
    }

    // ── Session loop ──────────────────────────────────────────

    /// Run one session until the button is pressed or the time budget
    /// runs out.
    ///
    /// Board failures end the session with an error; if the pump was on
    /// at that point a best-effort OFF is sent first.
    pub fn run<H, S, C, K>(
        &mut self,
        hw: &mut H,
        display: &mut S,
        chart: &mut C,
        clock: &mut K,
    ) -> Result<SessionState>
    where
        H: SensorPort + ActuatorPort + AbortInput,
        S: StatusSink,
        C: ChartSink,
        K: Clock,
    {
        let result = self.run_loop(hw, display, chart, clock);
        if result.is_err() && self.pump_engaged {
            match hw.set_pump(false) {
                Ok(()) => warn!("Pump forced off after session failure"),
                Err(e) => error!("Pump may still be on, forced OFF failed: {}", e),
            }
            self.pump_engaged = false;
        }
        result
    }

    fn run_loop<H, S, C, K>(
        &mut self,
        hw: &mut H,
        display: &mut S,
        chart: &mut C,
        clock: &mut K,
    ) -> Result<SessionState>
    where
        H: SensorPort + ActuatorPort + AbortInput,
        S: StatusSink,
        C: ChartSink,
        K: Clock,
    {
        let mut state = SessionState::new(clock.now_ms(), self.config.session_interval());
        info!(
            "Session started, budget {}s, deadline at {}ms",
            self.config.session_interval().as_secs(),
            state.deadline_ms()
        );

        while !state.expired_at(clock.now_ms()) {
            // 1. Manual abort, polled once per iteration
            if hw.abort_requested()? {
                info!("Button Pressed!");
                state.abort_requested = true;
                transition(&mut state.phase, SessionPhase::Aborted);
                render(&FAREWELL, hw, display)?;
                break;
            }

            state.iterations += 1;

            // 2. Read and record
            let reading = MoistureReading {
                value: hw.read_moisture()?,
                at_ms: clock.now_ms(),
            };
            if let Err(e) = chart.record(CHART_SERIES, reading.at_ms, f32::from(reading.value)) {
                warn!("Chart point dropped: {}", e);
            }

            // 3. Classify and act
            let tier = classify(reading.value, self.thresholds);
            info!(
                "Iteration {}: moisture {} -> {}",
                state.iterations,
                reading.value,
                self.table[tier as usize].name
            );
            self.execute(tier, &mut state, hw, display, clock)?;

            if self.pump_engaged {
                return Err(SessionError::Unexpected("pump left on after tier plan"));
            }
        }

        // 4. Deadline
        transition(&mut state.phase, SessionPhase::Expired);
        info!("WATERING COMPLETED");
        Ok(state)
    }

    /// Walk one tier's script.
    fn execute<H, S, K>(
        &mut self,
        tier: MoistureTier,
        state: &mut SessionState,
        hw: &mut H,
        display: &mut S,
        clock: &mut K,
    ) -> Result<()>
    where
        H: SensorPort + ActuatorPort,
        S: StatusSink,
        K: Clock,
    {
        let plan = &self.table[tier as usize];
        for step in &plan.steps {
            match *step {
                Step::PumpOn => {
                    hw.set_pump(true)?;
                    self.pump_engaged = true;
                }
                Step::PumpOff => {
                    hw.set_pump(false)?;
                    self.pump_engaged = false;
                }
                Step::Announce => {
                    self.log.append(plan.announcement(state.total_watering_secs));
                }
                Step::Show(template) => render(&template, hw, display)?,
                Step::Hold(duration) => clock.wait(duration),
                Step::Accumulate(secs) => {
                    state.record_actuation(plan.tier, secs, clock.now_ms());
                }
            }
        }
        Ok(())
    }

    // ── Teardown ──────────────────────────────────────────────

    /// Close out a session: blank the display, hand the log over in the
    /// report, and restart the log with the total-watering line.
    pub fn finish<S: StatusSink>(&mut self, state: SessionState, display: &mut S) -> SessionReport {
        if let Err(e) = display.clear() {
            warn!("Status display clear failed: {}", e);
        }

        let log = self.log.drain();
        self.log.reset();
        self.log.append(format!(
            "Total Watering Time was {} Seconds",
            state.total_watering_secs
        ));
        let summary = self.log.drain();

        SessionReport {
            phase: state.phase,
            total_watering_secs: state.total_watering_secs,
            iterations: state.iterations,
            actuations: state.actuations,
            log,
            summary,
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Rendering
// ───────────────────────────────────────────────────────────────

/// Fill a template and push it to the display.  A readout slot costs one
/// fresh sensor read; a display failure is logged and swallowed.
fn render<H, S>(template: &FrameTemplate, hw: &mut H, display: &mut S) -> Result<()>
where
    H: SensorPort,
    S: StatusSink,
{
    let readout = if template.needs_reading() {
        Some(hw.read_moisture()?)
    } else {
        None
    };

    let mut frame = StatusFrame::new();
    for (slot, line) in template.lines.iter().enumerate() {
        match (line, readout) {
            (Line::Text(text), _) => frame.set(slot, text),
            (Line::Moisture, Some(value)) => frame.set(slot, &format!("Moisture: {value}")),
            _ => {}
        }
    }

    if let Err(e) = display.show(&frame) {
        warn!("Status display update failed: {}", e);
    }
    Ok(())
}
