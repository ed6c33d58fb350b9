//! GPIO / peripheral pin assignments for the PlantCare controller board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Soil moisture probe (capacitive, analog)
// ---------------------------------------------------------------------------

/// Moisture probe signal: ADC1 channel 3 (GPIO 4 on ESP32-S3).
pub const MOISTURE_ADC_GPIO: i32 = 4;
/// ADC1 channel backing [`MOISTURE_ADC_GPIO`].
pub const MOISTURE_ADC_CHANNEL: u32 = 3;
/// Full-scale raw value of the 12-bit ESP32 ADC.
pub const ADC_FULL_SCALE: u16 = 4095;

// ---------------------------------------------------------------------------
// Water pump relay
// ---------------------------------------------------------------------------

/// Digital output driving the pump relay module.
pub const PUMP_RELAY_GPIO: i32 = 7;
/// Relay board input polarity.  Most opto-isolated relay boards are
/// active-low; the Grove relay used on the bench is active-high.
pub const PUMP_RELAY_ACTIVE_LOW: bool = false;

// ---------------------------------------------------------------------------
// Abort button (active-high with external pull-down)
// ---------------------------------------------------------------------------

/// Momentary push-button that ends the watering session.
pub const ABORT_BUTTON_GPIO: i32 = 6;
/// `true` when a pressed button reads LOW.
pub const ABORT_BUTTON_ACTIVE_LOW: bool = false;
