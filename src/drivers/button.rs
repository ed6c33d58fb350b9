//! Debounced abort button.
//!
//! ## Hardware
//!
//! Momentary switch, active-high with an external pull-down on the bench
//! board (polarity is configurable).  The control loop polls the button
//! once per iteration, so there is no ISR: a press is accepted when the
//! pin reads asserted twice, `debounce` apart.
//!
//! A contact bounce or EMI spike shorter than the debounce window reads as
//! "not pressed".

use core::time::Duration;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;

pub struct AbortButton<P: InputPin, D: DelayNs> {
    pin: P,
    delay: D,
    active_low: bool,
    debounce: Duration,
    presses: u32,
}

impl<P: InputPin, D: DelayNs> AbortButton<P, D> {
    pub fn new(pin: P, delay: D, active_low: bool, debounce: Duration) -> Self {
        Self {
            pin,
            delay,
            active_low,
            debounce,
            presses: 0,
        }
    }

    fn asserted(&mut self) -> Result<bool, P::Error> {
        let high = self.pin.is_high()?;
        Ok(high != self.active_low)
    }

    /// `true` when the button is held down, confirmed after the debounce
    /// window.
    pub fn is_pressed(&mut self) -> Result<bool, P::Error> {
        if !self.asserted()? {
            return Ok(false);
        }
        if !self.debounce.is_zero() {
            self.delay.delay_ms(self.debounce.as_millis() as u32);
            if !self.asserted()? {
                log::debug!("abort button: bounce rejected");
                return Ok(false);
            }
        }
        self.presses = self.presses.saturating_add(1);
        Ok(true)
    }

    /// Confirmed presses seen so far.
    pub fn presses(&self) -> u32 {
        self.presses
    }
}
