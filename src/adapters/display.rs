//! Log-mirrored status display adapter.
//!
//! Implements [`StatusSink`] by writing each visible line of a
//! [`StatusFrame`] to the logger, tagged with its pixel position on the
//! 128×64 panel.  The last frame is kept so callers (and tests) can see
//! what the operator is looking at.
//!
//! `clear()` blanks the panel and then blocks for the configured settle
//! time, matching the panel's refresh behaviour.

use core::time::Duration;

use embedded_hal::delay::DelayNs;
use log::info;

use crate::app::ports::StatusSink;
use crate::app::status::StatusFrame;
use crate::error::DisplayError;

pub struct LogDisplay<D: DelayNs> {
    delay: D,
    settle: Duration,
    current: StatusFrame,
    frames_shown: u32,
}

impl<D: DelayNs> LogDisplay<D> {
    pub fn new(delay: D, settle: Duration) -> Self {
        Self {
            delay,
            settle,
            current: StatusFrame::default(),
            frames_shown: 0,
        }
    }

    /// The frame currently on the panel.
    pub fn current(&self) -> &StatusFrame {
        &self.current
    }

    pub fn frames_shown(&self) -> u32 {
        self.frames_shown
    }
}

impl<D: DelayNs> StatusSink for LogDisplay<D> {
    fn show(&mut self, frame: &StatusFrame) -> Result<(), DisplayError> {
        for ((x, y), text) in frame.visible() {
            info!("OLED[{},{}] {}", x, y, text);
        }
        self.current = frame.clone();
        self.frames_shown = self.frames_shown.saturating_add(1);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.current = StatusFrame::default();
        info!("OLED cleared");
        if !self.settle.is_zero() {
            self.delay.delay_ms(self.settle.as_millis() as u32);
        }
        Ok(())
    }
}
