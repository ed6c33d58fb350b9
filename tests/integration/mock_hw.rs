//! Mock adapters for integration tests.
//!
//! Records every board call so tests can assert on the full command
//! history without touching real GPIO / ADC registers.  The clock is fake:
//! `wait` advances time instantly and remembers each hold.

use core::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use plantcare::app::ports::{
    AbortInput, ActuatorPort, BoardPort, ChartSink, Clock, PinMode, SensorPort, StatusSink,
};
use plantcare::app::status::StatusFrame;
use plantcare::config::SystemConfig;
use plantcare::error::{BoardError, ChartError, DisplayError};
use plantcare::logbook::EventLog;

// ── Board call record ─────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardCall {
    Start,
    EnsureReady,
    PinMode(i32, PinMode),
    AbortPoll,
    ReadMoisture,
    Pump(bool),
    Stop,
}

// ── MockBoard ─────────────────────────────────────────────────

/// Scripted board.
///
/// `readings[k]` is the soil value seen during iteration `k + 1`; the last
/// value repeats once the script runs out.  The iteration advances on each
/// abort poll, so the readout refreshes inside an iteration see the same
/// value as the classification read.
pub struct MockBoard {
    pub calls: Vec<BoardCall>,
    readings: Vec<u16>,
    polls: u32,
    /// Abort on this (1-based) poll.
    pub abort_on_poll: Option<u32>,
    pub fail_start: Option<BoardError>,
    pub fail_ready: Option<BoardError>,
    reads: u32,
    /// Fail the n-th (1-based) sensor read of the board's lifetime.
    pub fail_read_number: Option<u32>,
    /// Fail every pump OFF command.
    pub fail_pump_off: bool,
}

#[allow(dead_code)]
impl MockBoard {
    pub fn new(readings: &[u16]) -> Self {
        Self {
            calls: Vec::new(),
            readings: readings.to_vec(),
            polls: 0,
            abort_on_poll: None,
            fail_start: None,
            fail_ready: None,
            reads: 0,
            fail_read_number: None,
            fail_pump_off: false,
        }
    }

    pub fn aborting_on(mut self, poll: u32) -> Self {
        self.abort_on_poll = Some(poll);
        self
    }

    pub fn count(&self, call: BoardCall) -> usize {
        self.calls.iter().filter(|c| **c == call).count()
    }

    pub fn pump_calls(&self) -> Vec<bool> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                BoardCall::Pump(on) => Some(*on),
                _ => None,
            })
            .collect()
    }

    /// Last commanded pump state.
    pub fn pump_on(&self) -> bool {
        self.pump_calls().last().copied().unwrap_or(false)
    }

    pub fn polls(&self) -> u32 {
        self.polls
    }

    fn current_reading(&self) -> u16 {
        let idx = (self.polls.max(1) - 1) as usize;
        self.readings
            .get(idx)
            .or(self.readings.last())
            .copied()
            .unwrap_or(0)
    }
}

impl BoardPort for MockBoard {
    fn start(&mut self) -> Result<(), BoardError> {
        self.calls.push(BoardCall::Start);
        self.fail_start.map_or(Ok(()), Err)
    }

    fn ensure_ready(&mut self) -> Result<(), BoardError> {
        self.calls.push(BoardCall::EnsureReady);
        self.fail_ready.map_or(Ok(()), Err)
    }

    fn set_pin_mode(&mut self, pin: i32, mode: PinMode) -> Result<(), BoardError> {
        self.calls.push(BoardCall::PinMode(pin, mode));
        Ok(())
    }

    fn stop(&mut self) {
        self.calls.push(BoardCall::Stop);
    }
}

impl SensorPort for MockBoard {
    fn read_moisture(&mut self) -> Result<u16, BoardError> {
        self.reads += 1;
        self.calls.push(BoardCall::ReadMoisture);
        if self.fail_read_number == Some(self.reads) {
            return Err(BoardError::ReadFailed { pin: 4 });
        }
        Ok(self.current_reading())
    }
}

impl ActuatorPort for MockBoard {
    fn set_pump(&mut self, on: bool) -> Result<(), BoardError> {
        self.calls.push(BoardCall::Pump(on));
        if !on && self.fail_pump_off {
            return Err(BoardError::WriteFailed { pin: 7 });
        }
        Ok(())
    }
}

impl AbortInput for MockBoard {
    fn abort_requested(&mut self) -> Result<bool, BoardError> {
        self.polls += 1;
        self.calls.push(BoardCall::AbortPoll);
        Ok(self.abort_on_poll == Some(self.polls))
    }
}

// ── MockDisplay ───────────────────────────────────────────────

#[derive(Default)]
pub struct MockDisplay {
    pub frames: Vec<StatusFrame>,
    pub clears: u32,
    pub broken: bool,
}

#[allow(dead_code)]
impl MockDisplay {
    pub fn last(&self) -> Option<&StatusFrame> {
        self.frames.last()
    }

    /// Every non-empty line ever drawn, in order.
    pub fn lines(&self) -> Vec<String> {
        self.frames
            .iter()
            .flat_map(|f| f.visible().map(|(_, text)| text.to_string()).collect::<Vec<_>>())
            .collect()
    }
}

impl StatusSink for MockDisplay {
    fn show(&mut self, frame: &StatusFrame) -> Result<(), DisplayError> {
        if self.broken {
            return Err(DisplayError::BusFailed);
        }
        self.frames.push(frame.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        if self.broken {
            return Err(DisplayError::BusFailed);
        }
        self.clears += 1;
        Ok(())
    }
}

// ── MockChart ─────────────────────────────────────────────────

#[derive(Default)]
pub struct MockChart {
    pub points: Vec<(String, u64, f32)>,
    pub broken: bool,
}

impl ChartSink for MockChart {
    fn record(&mut self, series: &str, at_ms: u64, value: f32) -> Result<(), ChartError> {
        if self.broken {
            return Err(ChartError::TooManySeries);
        }
        self.points.push((series.to_string(), at_ms, value));
        Ok(())
    }
}

// ── FakeClock ─────────────────────────────────────────────────

#[derive(Default)]
pub struct FakeClock {
    pub now_ms: u64,
    pub waits: Vec<Duration>,
}

#[allow(dead_code)]
impl FakeClock {
    pub fn total_waited(&self) -> Duration {
        self.waits.iter().sum()
    }
}

impl Clock for FakeClock {
    fn now_ms(&self) -> u64 {
        self.now_ms
    }

    fn wait(&mut self, duration: Duration) {
        self.now_ms += duration.as_millis() as u64;
        self.waits.push(duration);
    }
}

// ── Helpers ───────────────────────────────────────────────────

pub fn fixed_stamp() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 2)
        .and_then(|d| d.and_hms_opt(14, 3, 11))
        .unwrap()
}

pub fn fixed_log() -> EventLog {
    EventLog::with_stamp(fixed_stamp)
}

/// Config whose session budget is `secs` seconds.
#[allow(dead_code)]
pub fn config_with_budget(secs: u64) -> SystemConfig {
    SystemConfig {
        runs_per_day: (plantcare::config::SECS_PER_DAY / secs) as u16,
        ..SystemConfig::default()
    }
}
