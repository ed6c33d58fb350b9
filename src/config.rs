//! System configuration parameters
//!
//! All tunable parameters for the PlantCare controller.
//! Defaults carry the bench-tuned dry/moist/wet policy; a JSON blob can
//! override any of them at boot.

use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::fsm::Thresholds;

/// Seconds in a day, the span that `runs_per_day` divides.
pub const SECS_PER_DAY: u64 = 24 * 60 * 60;

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    // --- Moisture thresholds (sensor units, 0-1023) ---
    /// Readings at or above this are DRY
    pub dry_threshold: u16,
    /// Readings at or above this (and below `dry_threshold`) are MODERATE
    pub moderate_threshold: u16,

    // --- DRY tier ---
    /// Pump run time when the soil is dry (seconds)
    pub dry_pump_secs: u16,
    /// Cooldown after a dry-tier watering (seconds)
    pub dry_cooldown_secs: u16,

    // --- MODERATE tier ---
    /// Pump run time when the soil is not adequately wet (seconds)
    pub moderate_pump_secs: u16,
    /// Pause after the pump stops, before the readout refresh (seconds)
    pub moderate_settle_secs: u16,
    /// Pause after the readout refresh (seconds)
    pub moderate_cooldown_secs: u16,

    // --- WET tier ---
    /// Re-check delay while the soil is wet (seconds)
    pub wet_recheck_secs: u16,

    // --- Scheduling ---
    /// Number of sessions per day; each session is budgeted `24h / N`
    pub runs_per_day: u16,

    // --- Hardware quirks ---
    /// Display settle delay after a clear (milliseconds)
    pub display_settle_ms: u32,
    /// ADC samples averaged into one moisture reading
    pub sensor_samples: u8,
    /// Button level must be stable this long to count (milliseconds)
    pub button_debounce_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Thresholds
            dry_threshold: 650,
            moderate_threshold: 500,

            // DRY: 2s water, 3s cooldown
            dry_pump_secs: 2,
            dry_cooldown_secs: 3,

            // MODERATE: 1s water, 1s + 2s settle
            moderate_pump_secs: 1,
            moderate_settle_secs: 1,
            moderate_cooldown_secs: 2,

            // WET: check again in 5s
            wet_recheck_secs: 5,

            // 26 runs/day, about 55 minutes per session
            runs_per_day: 26,

            display_settle_ms: 1000,
            sensor_samples: 4,
            button_debounce_ms: 50,
        }
    }
}

/// Named hold durations consumed by the tier plans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Holds {
    pub dry_pump: Duration,
    pub dry_cooldown: Duration,
    pub moderate_pump: Duration,
    pub moderate_settle: Duration,
    pub moderate_cooldown: Duration,
    pub wet_recheck: Duration,
}

impl SystemConfig {
    /// Parse a JSON override blob.  Missing fields keep their defaults;
    /// the result is validated before it is returned.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|_| ConfigError::Malformed)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the policy meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.moderate_threshold >= self.dry_threshold {
            return Err(ConfigError::ValidationFailed(
                "moderate_threshold must be below dry_threshold",
            ));
        }
        if self.dry_threshold > 1023 {
            return Err(ConfigError::ValidationFailed(
                "dry_threshold outside the 0-1023 sensor range",
            ));
        }
        if self.dry_pump_secs == 0 || self.moderate_pump_secs == 0 {
            return Err(ConfigError::ValidationFailed(
                "pump run times must be at least one second",
            ));
        }
        if self.wet_recheck_secs == 0 {
            return Err(ConfigError::ValidationFailed(
                "wet_recheck_secs must be non-zero",
            ));
        }
        if self.runs_per_day == 0 || u64::from(self.runs_per_day) > SECS_PER_DAY {
            return Err(ConfigError::ValidationFailed(
                "runs_per_day must be between 1 and 86400",
            ));
        }
        if self.sensor_samples == 0 {
            return Err(ConfigError::ValidationFailed(
                "sensor_samples must be non-zero",
            ));
        }
        Ok(())
    }

    /// Tier boundaries for [`crate::fsm::classify`].
    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            dry: self.dry_threshold,
            moderate: self.moderate_threshold,
        }
    }

    /// Per-session time budget: `24h / runs_per_day`.
    pub fn session_interval(&self) -> Duration {
        Duration::from_secs(SECS_PER_DAY / u64::from(self.runs_per_day.max(1)))
    }

    pub fn holds(&self) -> Holds {
        let secs = |s: u16| Duration::from_secs(u64::from(s));
        Holds {
            dry_pump: secs(self.dry_pump_secs),
            dry_cooldown: secs(self.dry_cooldown_secs),
            moderate_pump: secs(self.moderate_pump_secs),
            moderate_settle: secs(self.moderate_settle_secs),
            moderate_cooldown: secs(self.moderate_cooldown_secs),
            wet_recheck: secs(self.wet_recheck_secs),
        }
    }

    pub fn display_settle(&self) -> Duration {
        Duration::from_millis(u64::from(self.display_settle_ms))
    }
}

/// Errors from loading or validating a [`SystemConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The override blob is not valid JSON for this struct.
    Malformed,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Malformed => write!(f, "config malformed"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}
