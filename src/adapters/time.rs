//! ESP32 time adapter.
//!
//! Monotonic time and blocking holds for the watering loop.
//!
//! - **`target_os = "espidf"`**: wraps `esp_timer_get_time()` from the
//!   ESP-IDF high-resolution timer and sleeps through FreeRTOS.
//! - **`not(target_os = "espidf")`**: uses `std::time::Instant` and
//!   `std::thread::sleep` for host-side simulation.

use core::time::Duration;

use embedded_hal::delay::DelayNs;

use crate::app::ports::Clock;

/// Wall-clock backed [`Clock`].  Also usable as an `embedded-hal` delay.
pub struct SystemClock {
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }

    /// Microseconds since boot (monotonic).
    #[cfg(target_os = "espidf")]
    pub fn uptime_us(&self) -> u64 {
        (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u64
    }

    /// Microseconds since this clock was created (monotonic).
    #[cfg(not(target_os = "espidf"))]
    pub fn uptime_us(&self) -> u64 {
        self.start.elapsed().as_micros() as u64
    }

    #[cfg(target_os = "espidf")]
    fn sleep(duration: Duration) {
        esp_idf_svc::hal::delay::FreeRtos::delay_ms(duration.as_millis() as u32);
    }

    #[cfg(not(target_os = "espidf"))]
    fn sleep(duration: Duration) {
        std::thread::sleep(duration);
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.uptime_us() / 1_000
    }

    fn wait(&mut self, duration: Duration) {
        Self::sleep(duration);
    }
}

impl DelayNs for SystemClock {
    fn delay_ns(&mut self, ns: u32) {
        Self::sleep(Duration::from_nanos(u64::from(ns)));
    }

    fn delay_ms(&mut self, ms: u32) {
        Self::sleep(Duration::from_millis(u64::from(ms)));
    }
}
