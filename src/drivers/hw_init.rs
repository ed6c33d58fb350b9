//! Hardware peripheral bring-up and raw pin access.
//!
//! Configures the moisture ADC channel and the relay / button GPIOs using
//! raw ESP-IDF sys calls.  Called from the board adapter's `start()`.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: oneshot ADC and GPIO register access.
//! On host/test: pin levels and the ADC value live in atomics so tests can
//! inject readings and observe outputs.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, AtomicU16, AtomicU64, Ordering};

use crate::app::ports::PinMode;
use crate::error::BoardError;
use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during peripheral bring-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    AdcInitFailed(i32),
    GpioConfigFailed { pin: i32, rc: i32 },
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AdcInitFailed(rc) => write!(f, "ADC1 init failed (rc={})", rc),
            Self::GpioConfigFailed { pin, rc } => {
                write!(f, "GPIO {} config failed (rc={})", pin, rc)
            }
        }
    }
}

impl From<HwInitError> for BoardError {
    fn from(e: HwInitError) -> Self {
        match e {
            HwInitError::AdcInitFailed(rc) => Self::InitFailed(rc),
            HwInitError::GpioConfigFailed { pin, rc } => Self::PinConfigFailed { pin, code: rc },
        }
    }
}

// ── Peripheral init ───────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from the board adapter before any pin access;
    // single-threaded.
    unsafe {
        init_adc()?;
    }
    log::info!("hw_init: ADC1 configured (CH{}=moisture)", pins::MOISTURE_ADC_CHANNEL);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
static SIM_FAIL_INIT: AtomicBool = AtomicBool::new(false);

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    if SIM_FAIL_INIT.load(Ordering::Relaxed) {
        return Err(HwInitError::AdcInitFailed(-1));
    }
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

/// Make the next `init_peripherals()` calls fail (host only).
#[cfg(not(target_os = "espidf"))]
pub fn sim_fail_init(fail: bool) {
    SIM_FAIL_INIT.store(fail, Ordering::Relaxed);
}

// ── ADC (oneshot) ─────────────────────────────────────────────

#[cfg(target_os = "espidf")]
static mut ADC1_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();

/// SAFETY: Must be called only after `init_adc()`, from the single control
/// task.
#[cfg(target_os = "espidf")]
unsafe fn adc1_handle() -> adc_oneshot_unit_handle_t {
    unsafe { ADC1_HANDLE }
}

#[cfg(target_os = "espidf")]
unsafe fn init_adc() -> Result<(), HwInitError> {
    // Re-starting the board after a session must not allocate a second unit.
    if !unsafe { adc1_handle() }.is_null() {
        return Ok(());
    }

    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    // SAFETY: ADC1_HANDLE is only written here.
    let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &raw mut ADC1_HANDLE) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::AdcInitFailed(ret));
    }

    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };
    let ret = unsafe {
        adc_oneshot_config_channel(adc1_handle(), pins::MOISTURE_ADC_CHANNEL, &chan_cfg)
    };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::AdcInitFailed(ret));
    }
    Ok(())
}

/// One raw 12-bit sample.
#[cfg(target_os = "espidf")]
pub fn adc1_read(channel: u32) -> Result<u16, BoardError> {
    let mut raw: i32 = 0;
    // SAFETY: adc1_handle() contract: single control task, after init.
    let ret = unsafe { adc_oneshot_read(adc1_handle(), channel, &mut raw) };
    if ret != ESP_OK as i32 {
        return Err(BoardError::ReadFailed {
            pin: pins::MOISTURE_ADC_GPIO,
        });
    }
    Ok(raw.max(0) as u16)
}

#[cfg(not(target_os = "espidf"))]
static SIM_ADC: AtomicU16 = AtomicU16::new(0);
#[cfg(not(target_os = "espidf"))]
static SIM_ADC_FAULT: AtomicBool = AtomicBool::new(false);

#[cfg(not(target_os = "espidf"))]
pub fn adc1_read(_channel: u32) -> Result<u16, BoardError> {
    if SIM_ADC_FAULT.load(Ordering::Relaxed) {
        return Err(BoardError::ReadFailed {
            pin: pins::MOISTURE_ADC_GPIO,
        });
    }
    Ok(SIM_ADC.load(Ordering::Relaxed))
}

/// Inject the raw value the next ADC reads return (host only).
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_adc(raw: u16) {
    SIM_ADC.store(raw, Ordering::Relaxed);
}

/// Make ADC reads fail (host only).
#[cfg(not(target_os = "espidf"))]
pub fn sim_adc_fault(fault: bool) {
    SIM_ADC_FAULT.store(fault, Ordering::Relaxed);
}

// ── GPIO ──────────────────────────────────────────────────────

/// Apply a pin mode.  Analog pins are owned by the ADC unit; only the
/// digital directions touch the GPIO matrix.
#[cfg(target_os = "espidf")]
pub fn configure_pin(pin: i32, mode: PinMode) -> Result<(), HwInitError> {
    let gpio_mode = match mode {
        PinMode::Analog => return Ok(()),
        PinMode::Output => gpio_mode_t_GPIO_MODE_OUTPUT,
        PinMode::Input => gpio_mode_t_GPIO_MODE_INPUT,
    };
    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pin,
        mode: gpio_mode,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
        pull_down_en: if matches!(mode, PinMode::Input) {
            gpio_pulldown_t_GPIO_PULLDOWN_ENABLE
        } else {
            gpio_pulldown_t_GPIO_PULLDOWN_DISABLE
        },
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    // SAFETY: plain register configuration from the control task.
    let ret = unsafe { gpio_config(&cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::GpioConfigFailed { pin, rc: ret });
    }
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn configure_pin(pin: i32, mode: PinMode) -> Result<(), HwInitError> {
    if !(0..64).contains(&pin) {
        return Err(HwInitError::GpioConfigFailed { pin, rc: -1 });
    }
    log::debug!("hw_init(sim): GPIO {} -> {:?}", pin, mode);
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: read-only register access on a configured input pin.
    (unsafe { gpio_get_level(pin) }) != 0
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) -> Result<(), BoardError> {
    // SAFETY: writes an already-configured output pin; control task only.
    let ret = unsafe { gpio_set_level(pin, u32::from(high)) };
    if ret != ESP_OK as i32 {
        return Err(BoardError::WriteFailed { pin });
    }
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
static SIM_LEVELS: AtomicU64 = AtomicU64::new(0);

#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(pin: i32) -> bool {
    SIM_LEVELS.load(Ordering::Relaxed) & (1u64 << pin) != 0
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(pin: i32, high: bool) -> Result<(), BoardError> {
    sim_set_level(pin, high);
    Ok(())
}

/// Drive a simulated pin level (host only).
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_level(pin: i32, high: bool) {
    if high {
        SIM_LEVELS.fetch_or(1u64 << pin, Ordering::Relaxed);
    } else {
        SIM_LEVELS.fetch_and(!(1u64 << pin), Ordering::Relaxed);
    }
}
