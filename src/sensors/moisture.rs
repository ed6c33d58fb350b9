//! Capacitive soil-moisture probe driver.
//!
//! Reads the probe through ADC1 (12-bit), averages a small burst of
//! samples and rescales to the 0–1023 range the watering thresholds are
//! expressed in.  Higher values mean drier soil.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: oneshot reads via `hw_init::adc1_read`.
//! On host/test: `hw_init::sim_set_adc` injects the raw value.

use crate::drivers::hw_init;
use crate::error::BoardError;
use crate::pins;

/// Upper bound of the scaled reading.
pub const MOISTURE_MAX: u16 = 1023;

/// Rescale a 12-bit ADC sample to 0–1023.
pub fn scale_to_10bit(raw: u16) -> u16 {
    let raw = u32::from(raw.min(pins::ADC_FULL_SCALE));
    (raw * u32::from(MOISTURE_MAX) / u32::from(pins::ADC_FULL_SCALE)) as u16
}

/// Average up to `n` samples from `read`, discarding failed ones.
///
/// Fails with the last sample error only when every sample failed.
pub fn average_samples<F>(n: usize, mut read: F) -> Result<u16, BoardError>
where
    F: FnMut() -> Result<u16, BoardError>,
{
    let mut acc: u32 = 0;
    let mut cnt: u32 = 0;
    let mut last_err = BoardError::ReadFailed {
        pin: pins::MOISTURE_ADC_GPIO,
    };
    for _ in 0..n.max(1) {
        match read() {
            Ok(v) => {
                acc += u32::from(v);
                cnt += 1;
            }
            Err(e) => last_err = e,
        }
    }
    if cnt == 0 {
        return Err(last_err);
    }
    Ok((acc / cnt) as u16)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoistureSample {
    pub raw: u16,
    pub value: u16,
}

pub struct MoistureSensor {
    channel: u32,
    samples: usize,
    total_reads: u32,
    failed_reads: u32,
}

impl MoistureSensor {
    pub fn new(channel: u32, samples: u8) -> Self {
        Self {
            channel,
            samples: usize::from(samples.max(1)),
            total_reads: 0,
            failed_reads: 0,
        }
    }

    pub fn read(&mut self) -> Result<MoistureSample, BoardError> {
        self.total_reads = self.total_reads.saturating_add(1);
        let channel = self.channel;
        match average_samples(self.samples, || hw_init::adc1_read(channel)) {
            Ok(raw) => Ok(MoistureSample {
                raw,
                value: scale_to_10bit(raw),
            }),
            Err(e) => {
                self.failed_reads = self.failed_reads.saturating_add(1);
                log::warn!("moisture: all {} samples failed: {}", self.samples, e);
                Err(e)
            }
        }
    }

    pub fn total_reads(&self) -> u32 {
        self.total_reads
    }

    pub fn failed_reads(&self) -> u32 {
        self.failed_reads
    }
}
