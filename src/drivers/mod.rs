//! Actuator drivers, hardware initialisation, and raw pin access.
//!
//! [`BoardPin`] exposes a single GPIO through the `embedded-hal` digital
//! traits so the relay and button drivers stay generic over the pin type.

pub mod button;
pub mod hw_init;
pub mod pump;

use embedded_hal::digital::{ErrorKind, ErrorType, InputPin, OutputPin};

use crate::error::BoardError;

impl embedded_hal::digital::Error for BoardError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// One GPIO backed by [`hw_init`] register access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardPin {
    gpio: i32,
}

impl BoardPin {
    pub const fn new(gpio: i32) -> Self {
        Self { gpio }
    }

    pub fn gpio(&self) -> i32 {
        self.gpio
    }
}

impl ErrorType for BoardPin {
    type Error = BoardError;
}

impl OutputPin for BoardPin {
    fn set_low(&mut self) -> Result<(), BoardError> {
        hw_init::gpio_write(self.gpio, false)
    }

    fn set_high(&mut self) -> Result<(), BoardError> {
        hw_init::gpio_write(self.gpio, true)
    }
}

impl InputPin for BoardPin {
    fn is_high(&mut self) -> Result<bool, BoardError> {
        Ok(hw_init::gpio_read(self.gpio))
    }

    fn is_low(&mut self) -> Result<bool, BoardError> {
        Ok(!hw_init::gpio_read(self.gpio))
    }
}
