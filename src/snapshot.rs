//! Point-in-time record of all derived signal metrics
//!
//! [`Snapshot`] bundles the processor's derived quantities into one plain
//! record that can be logged, displayed, or serialized for telemetry. Fields
//! are public so downstream code can pick what it needs.

use core::fmt::Display;

use serde::{Deserialize, Serialize};

/// Derived metrics captured from a
/// [`SignalProcessor`](crate::processing::SignalProcessor) at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Snapshot<T> {
    /// Number of samples retained in the window.
    pub count: u16,
    /// Arithmetic mean of the window.
    pub mean: f64,
    /// Sample standard deviation of the window.
    pub std_dev: f64,
    /// Smallest retained sample.
    pub min: T,
    /// Largest retained sample.
    pub max: T,
    /// Exponentially weighted moving average.
    pub ema: f64,
    /// Instantaneous rate of change, units per second.
    pub derivative: f64,
    /// Smoothed rate of change.
    pub derivative_filtered: f64,
    /// Accumulated trapezoidal integral, unit-seconds.
    pub integral: f64,
}

impl<T: Display> Display for Snapshot<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "[Snapshot] count: {}, mean: {:.3}, std_dev: {:.3}, min: {}, max: {}, ema: {:.3}, d/dt: {:.3}, integral: {:.3}",
            self.count,
            self.mean,
            self.std_dev,
            self.min,
            self.max,
            self.ema,
            self.derivative_filtered,
            self.integral
        )
    }
}
