//! Hardware adapter: bridges the real board to the domain port traits.
//!
//! Owns the moisture sensor, pump relay and abort button, exposing them
//! through [`SensorPort`], [`ActuatorPort`], [`AbortInput`] and the
//! [`BoardPort`] lifecycle.  This is the only module in the system that
//! touches actual hardware.  On non-espidf targets the underlying drivers
//! use cfg-gated simulation stubs.

use embedded_hal::delay::DelayNs;

use crate::app::ports::{AbortInput, ActuatorPort, BoardPort, PinMode, SensorPort};
use crate::config::SystemConfig;
use crate::drivers::button::AbortButton;
use crate::drivers::hw_init;
use crate::drivers::pump::RelayPump;
use crate::drivers::BoardPin;
use crate::error::BoardError;
use crate::pins;
use crate::sensors::MoistureSensor;

/// The ESP32 controller board with its three peripherals.
pub struct Esp32Board<D: DelayNs> {
    sensor: MoistureSensor,
    pump: RelayPump<BoardPin>,
    button: AbortButton<BoardPin, D>,
    started: bool,
}

impl<D: DelayNs> Esp32Board<D> {
    /// `delay` is used for the button debounce window.
    pub fn new(config: &SystemConfig, delay: D) -> Self {
        Self {
            sensor: MoistureSensor::new(pins::MOISTURE_ADC_CHANNEL, config.sensor_samples),
            pump: RelayPump::new(BoardPin::new(pins::PUMP_RELAY_GPIO), pins::PUMP_RELAY_ACTIVE_LOW),
            button: AbortButton::new(
                BoardPin::new(pins::ABORT_BUTTON_GPIO),
                delay,
                pins::ABORT_BUTTON_ACTIVE_LOW,
                core::time::Duration::from_millis(u64::from(config.button_debounce_ms)),
            ),
            started: false,
        }
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn pump_running(&self) -> bool {
        self.pump.is_running()
    }

    /// `(total, failed)` moisture reads since power-up.
    pub fn sensor_stats(&self) -> (u32, u32) {
        (self.sensor.total_reads(), self.sensor.failed_reads())
    }

    fn ready(&self) -> Result<(), BoardError> {
        if self.started {
            Ok(())
        } else {
            Err(BoardError::NotReady)
        }
    }
}

// ── BoardPort implementation ──────────────────────────────────

impl<D: DelayNs> BoardPort for Esp32Board<D> {
    fn start(&mut self) -> Result<(), BoardError> {
        hw_init::init_peripherals()?;
        self.started = true;
        Ok(())
    }

    fn ensure_ready(&mut self) -> Result<(), BoardError> {
        self.ready()
    }

    fn set_pin_mode(&mut self, pin: i32, mode: PinMode) -> Result<(), BoardError> {
        self.ready()?;
        hw_init::configure_pin(pin, mode)?;
        Ok(())
    }

    fn stop(&mut self) {
        if self.started {
            if let Err(e) = self.pump.stop() {
                log::warn!("board stop: pump release failed: {}", e);
            }
            let (total, failed) = self.sensor_stats();
            log::info!("board stop: {} moisture reads, {} failed", total, failed);
        }
        self.started = false;
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<D: DelayNs> SensorPort for Esp32Board<D> {
    fn read_moisture(&mut self) -> Result<u16, BoardError> {
        self.ready()?;
        Ok(self.sensor.read()?.value)
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<D: DelayNs> ActuatorPort for Esp32Board<D> {
    fn set_pump(&mut self, on: bool) -> Result<(), BoardError> {
        self.ready()?;
        self.pump.set(on)
    }
}

// ── AbortInput implementation ─────────────────────────────────

impl<D: DelayNs> AbortInput for Esp32Board<D> {
    fn abort_requested(&mut self) -> Result<bool, BoardError> {
        self.ready()?;
        self.button.is_pressed()
    }
}
