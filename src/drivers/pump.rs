//! Water pump relay driver.
//!
//! The pump is mains/USB powered and switched by a single relay.  The
//! driver only knows the relay polarity and the last commanded state; how
//! long the pump runs is the controller's business.
//!
//! ## Dual-target design
//!
//! Generic over any `embedded-hal` output pin.  On ESP-IDF that is a
//! [`BoardPin`](super::BoardPin); host tests use a recording pin.

use embedded_hal::digital::OutputPin;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpState {
    Stopped,
    Running,
}

pub struct RelayPump<P: OutputPin> {
    pin: P,
    active_low: bool,
    state: PumpState,
}

impl<P: OutputPin> RelayPump<P> {
    /// Wrap `pin`.  The relay is not driven until the first `set`.
    pub fn new(pin: P, active_low: bool) -> Self {
        Self {
            pin,
            active_low,
            state: PumpState::Stopped,
        }
    }

    /// Energise or release the relay.  The state only changes once the
    /// pin write succeeded.
    pub fn set(&mut self, on: bool) -> Result<(), P::Error> {
        if on != self.active_low {
            self.pin.set_high()?;
        } else {
            self.pin.set_low()?;
        }
        self.state = if on {
            PumpState::Running
        } else {
            PumpState::Stopped
        };
        Ok(())
    }

    pub fn stop(&mut self) -> Result<(), P::Error> {
        self.set(false)
    }

    pub fn state(&self) -> PumpState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, PumpState::Running)
    }
}
