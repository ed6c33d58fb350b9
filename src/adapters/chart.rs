//! In-memory moisture chart.
//!
//! Implements [`ChartSink`] with a bounded rolling window per named
//! series, ready to be plotted or dumped.  Old points fall off the front
//! once the window is full; memory use is fixed at construction.

use heapless::{HistoryBuffer, String, Vec};

use crate::app::ports::ChartSink;
use crate::error::ChartError;

/// Points kept per series.
pub const WINDOW_LEN: usize = 128;
/// Series a chart can hold.
pub const MAX_SERIES: usize = 4;
/// Longest series label.
pub const LABEL_LEN: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataPoint {
    pub at_ms: u64,
    pub value: f32,
}

struct Series {
    name: String<LABEL_LEN>,
    window: HistoryBuffer<DataPoint, WINDOW_LEN>,
}

pub struct MoistureChart {
    title: &'static str,
    x_label: &'static str,
    y_label: &'static str,
    series: Vec<Series, MAX_SERIES>,
}

impl MoistureChart {
    pub fn new(title: &'static str, x_label: &'static str, y_label: &'static str) -> Self {
        Self {
            title,
            x_label,
            y_label,
            series: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        self.title
    }

    pub fn axes(&self) -> (&str, &str) {
        (self.x_label, self.y_label)
    }

    /// Points of `series`, oldest first.  Empty for an unknown series.
    pub fn data_window(&self, series: &str) -> std::vec::Vec<DataPoint> {
        self.find(series)
            .map(|s| s.window.oldest_ordered().copied().collect())
            .unwrap_or_default()
    }

    /// Most recent point of `series`.
    pub fn latest(&self, series: &str) -> Option<DataPoint> {
        self.find(series).and_then(|s| s.window.recent().copied())
    }

    pub fn series_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.series.iter().map(|s| s.name.as_str())
    }

    fn find(&self, name: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.name.as_str() == name)
    }

    fn find_or_insert(&mut self, name: &str) -> Result<&mut Series, ChartError> {
        if let Some(idx) = self.series.iter().position(|s| s.name.as_str() == name) {
            return Ok(&mut self.series[idx]);
        }
        let label = String::try_from(name).map_err(|_| ChartError::SeriesNameTooLong)?;
        self.series
            .push(Series {
                name: label,
                window: HistoryBuffer::new(),
            })
            .map_err(|_| ChartError::TooManySeries)?;
        let last = self.series.len() - 1;
        Ok(&mut self.series[last])
    }
}

impl ChartSink for MoistureChart {
    fn record(&mut self, series: &str, at_ms: u64, value: f32) -> Result<(), ChartError> {
        let s = self.find_or_insert(series)?;
        s.window.write(DataPoint { at_ms, value });
        log::debug!("chart {}: {}={} @{}ms", self.title, series, value, at_ms);
        Ok(())
    }
}
