//! Session event log.
//!
//! An append-only list of timestamped messages.  Every append is also
//! echoed through the `log` facade so the serial console shows events as
//! they happen; the accumulated text is drained at the end of a session
//! for the final report.
//!
//! Record format, one per line:
//!
//! ```text
//! 2024-05-02 14:03:11   Soil is dry, watering for 2 seconds
//! ```

use core::fmt;

use chrono::NaiveDateTime;
use log::info;

/// `strftime` pattern of the record timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Separator between timestamp and message.
const SEPARATOR: &str = "   ";

/// Source of record timestamps.
pub type StampFn = fn() -> NaiveDateTime;

fn local_now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

/// One log record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub at: NaiveDateTime,
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.at.format(TIMESTAMP_FORMAT),
            SEPARATOR,
            self.message
        )
    }
}

/// Append-only event log.
pub struct EventLog {
    entries: Vec<LogEntry>,
    stamp: StampFn,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLog {
    /// Log stamped with local wall-clock time.
    pub fn new() -> Self {
        Self::with_stamp(local_now)
    }

    /// Log stamped by `stamp` (fixed clocks in tests).
    pub fn with_stamp(stamp: StampFn) -> Self {
        Self {
            entries: Vec::new(),
            stamp,
        }
    }

    pub fn append(&mut self, message: impl Into<String>) {
        let message = message.into();
        info!("{}", message);
        self.entries.push(LogEntry {
            at: (self.stamp)(),
            message,
        });
    }

    /// The whole log as newline-terminated records.  Does not clear.
    pub fn drain(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(&entry.to_string());
            out.push('\n');
        }
        out
    }

    pub fn reset(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
