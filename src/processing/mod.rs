//! The signal processor aggregate and its sub-components
//!
//! [`SignalProcessor`] ties the circular window, the online statistics, the
//! min/max cache, the exponential filter and the rate tracker together behind
//! a single `add_sample` entry point. All state lives inside the instance;
//! separate instances are fully independent.

mod ema;
mod minmax;
mod rate;
mod ring;
mod stats;

use log::debug;

use crate::sample::Sample;
use crate::snapshot::Snapshot;
use ema::EmaFilter;
use minmax::MinMaxTracker;
use rate::RateTracker;
use ring::RingBuffer;
use stats::RunningStats;

/// Timestamp value meaning "no timing information supplied with this sample".
///
/// Samples carrying it update the window, statistics and filter but never the
/// derivative or integral.
pub const NO_TIMESTAMP: u32 = 0;

/// Default deviation threshold for [`SignalProcessor::is_outlier`], in
/// standard deviations.
pub const DEFAULT_SIGMA_THRESHOLD: f64 = 3.0;

const DEFAULT_EMA_ALPHA: f64 = 0.1;
const DEFAULT_DERIVATIVE_FILTER_ALPHA: f64 = 0.2;
const DEFAULT_LOWPASS_ALPHA: f64 = 0.1;

/// Streaming processor over a fixed window of the `N` most recent samples.
///
/// Each call to [`add_sample`](Self::add_sample) runs in O(1): evicted samples
/// are subtracted from the running aggregates instead of rescanning the
/// window. The single exception is a min/max read after the cached extremum
/// was evicted, which rescans the window once.
///
/// The processor is single-context by design; wrap it in
/// [`SharedSignalProcessor`](crate::shared::SharedSignalProcessor) when more
/// than one execution context needs access.
///
/// ```
/// use sigproc::SignalProcessor;
///
/// let mut proc: SignalProcessor<f32, 16> = SignalProcessor::new();
/// proc.add_sample(21.5, 1000);
/// proc.add_sample(21.7, 2000);
/// proc += 21.6; // no timestamp
/// assert_eq!(proc.count(), 3);
/// ```
pub struct SignalProcessor<T, const N: usize> {
    window: RingBuffer<T, N>,
    stats: RunningStats,
    extrema: MinMaxTracker<T>,
    ema: EmaFilter,
    rate: RateTracker,
    lowpass_alpha: f64,
}

impl<T: Sample, const N: usize> SignalProcessor<T, N> {
    /// Create an empty processor with default filter coefficients.
    ///
    /// Capacities below 2 are rejected at compile time.
    pub const fn new() -> Self {
        const {
            assert!(N >= 2, "window capacity must be at least 2");
        }

        Self {
            window: RingBuffer::new(),
            stats: RunningStats::new(),
            extrema: MinMaxTracker::new(),
            ema: EmaFilter::new(DEFAULT_EMA_ALPHA),
            rate: RateTracker::new(DEFAULT_DERIVATIVE_FILTER_ALPHA),
            lowpass_alpha: DEFAULT_LOWPASS_ALPHA,
        }
    }

    /// Ingest one sample with a millisecond timestamp.
    ///
    /// `time_ms == `[`NO_TIMESTAMP`] suppresses the derivative/integrator
    /// update for this call; everything else still advances.
    pub fn add_sample(&mut self, value: T, time_ms: u32) {
        if let Some(old) = self.window.push(value) {
            self.stats.remove(old.to_f64());
            self.extrema.observe_evict(old);
        }

        self.stats.insert(value.to_f64());

        let first = self.window.len() == 1;
        self.extrema.observe_insert(value, first);
        self.ema.update(value.to_f64(), first);
        self.rate.update(value.to_f64(), self.ema.value(), time_ms);
    }

    /// Ingest one sample without timing information.
    pub fn add(&mut self, value: T) {
        self.add_sample(value, NO_TIMESTAMP);
    }

    /// Restore all data to construction-time defaults.
    ///
    /// Configured coefficients (alphas, derivative period, source selection)
    /// survive the reset.
    pub fn reset(&mut self) {
        debug!("signal processor reset");
        self.window.clear();
        self.stats.clear();
        self.extrema.clear();
        self.ema.clear();
        self.rate.clear();
    }

    /// Clear only the accumulated integral and its pending trapezoid
    /// endpoint.
    pub fn reset_integral(&mut self) {
        self.rate.reset_integral();
    }

    // Configuration. All coefficient setters clamp to [0, 1] instead of
    // failing.

    /// Smoothing coefficient of the exponential filter.
    pub fn set_ema_alpha(&mut self, alpha: f64) {
        self.ema.set_alpha(alpha);
    }

    /// Smoothing coefficient of the filtered derivative.
    pub fn set_derivative_filter_alpha(&mut self, alpha: f64) {
        self.rate.set_alpha(alpha);
    }

    /// Low-pass filter coefficient. Reserved: stored and clamped, but no
    /// current computation consumes it.
    pub fn set_lowpass_alpha(&mut self, alpha: f64) {
        self.lowpass_alpha = alpha.clamp(0.0, 1.0);
    }

    /// Minimum time between derivative/integrator updates, in milliseconds.
    pub fn set_derivative_period_ms(&mut self, period_ms: u16) {
        self.rate.set_period_ms(period_ms);
    }

    /// Differentiate the EMA-filtered value instead of the raw sample.
    pub fn set_use_filtered_for_derivative(&mut self, use_filtered: bool) {
        self.rate.set_use_filtered(use_filtered);
    }

    // Window accessors.

    /// Number of retained samples (0 to `N`).
    pub fn count(&self) -> usize {
        self.window.len()
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn is_full(&self) -> bool {
        self.window.is_full()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// Retained samples in storage order.
    ///
    /// Index 0 is not necessarily the oldest sample; use
    /// [`samples`](Self::samples) for chronological order.
    pub fn buffer(&self) -> &[T] {
        self.window.as_slice()
    }

    /// Copy of the retained samples in chronological order, oldest first.
    pub fn samples(&self) -> heapless::Vec<T, N> {
        self.window.ordered()
    }

    // Statistics accessors.

    /// Sum of the retained samples.
    pub fn sum(&self) -> f64 {
        self.stats.sum()
    }

    /// Arithmetic mean, 0 for an empty window.
    pub fn mean(&self) -> f64 {
        self.stats.mean()
    }

    /// Simple moving average; alias of [`mean`](Self::mean).
    pub fn sma(&self) -> f64 {
        self.stats.mean()
    }

    /// Sample variance (Bessel-corrected), 0 for fewer than two samples.
    pub fn variance(&self) -> f64 {
        self.stats.variance()
    }

    pub fn std_dev(&self) -> f64 {
        self.stats.std_dev()
    }

    /// Relative variability in percent, 0 when the mean is zero.
    pub fn coefficient_of_variation(&self) -> f64 {
        self.stats.coefficient_of_variation()
    }

    /// Smallest retained sample, 0 for an empty window.
    ///
    /// Takes `&mut self` because a stale cache is rescanned before answering.
    pub fn min(&mut self) -> T {
        self.extrema.min(self.window.as_slice())
    }

    /// Largest retained sample, 0 for an empty window.
    pub fn max(&mut self) -> T {
        self.extrema.max(self.window.as_slice())
    }

    /// Spread between max and min.
    pub fn range(&mut self) -> f64 {
        self.extrema.range(self.window.as_slice())
    }

    // Filter and rate accessors.

    /// Current exponentially weighted moving average.
    pub fn ema(&self) -> f64 {
        self.ema.value()
    }

    /// Instantaneous rate of change, units per second.
    pub fn derivative(&self) -> f64 {
        self.rate.derivative()
    }

    /// Smoothed rate of change.
    pub fn derivative_filtered(&self) -> f64 {
        self.rate.derivative_filtered()
    }

    /// Accumulated trapezoidal integral, unit-seconds.
    pub fn integral(&self) -> f64 {
        self.rate.integral()
    }

    /// Derivative source value at the last qualifying sample.
    pub fn last_value(&self) -> f64 {
        self.rate.last_value()
    }

    /// Timestamp of the last qualifying sample, in milliseconds.
    pub fn last_time_ms(&self) -> u32 {
        self.rate.last_time_ms()
    }

    /// Reserved low-pass coefficient as currently configured.
    pub fn lowpass_alpha(&self) -> f64 {
        self.lowpass_alpha
    }

    // Signal quality.

    /// Three-sigma outlier test against the current window statistics.
    pub fn is_outlier(&self, value: T) -> bool {
        self.is_outlier_with_threshold(value, DEFAULT_SIGMA_THRESHOLD)
    }

    /// Outlier test with an explicit deviation threshold.
    ///
    /// Returns `false` for windows with fewer than two samples or zero
    /// deviation, never an error.
    pub fn is_outlier_with_threshold(&self, value: T, sigma_threshold: f64) -> bool {
        if self.stats.count() < 2 {
            return false;
        }
        let std_dev = self.stats.std_dev();
        if std_dev == 0.0 {
            return false;
        }

        let deviation = value.to_f64() - self.stats.mean();
        let deviation = if deviation < 0.0 { -deviation } else { deviation };
        deviation > sigma_threshold * std_dev
    }

    /// Whether the signal is stable: the window is at least half full and the
    /// standard deviation is below `max_std_dev`.
    pub fn is_stable(&self, max_std_dev: f64) -> bool {
        self.stats.count() >= N / 2 && self.stats.std_dev() < max_std_dev
    }

    /// Capture all derived quantities at once.
    pub fn snapshot(&mut self) -> Snapshot<T> {
        Snapshot {
            count: self.count() as u16,
            mean: self.mean(),
            std_dev: self.std_dev(),
            min: self.min(),
            max: self.max(),
            ema: self.ema(),
            derivative: self.derivative(),
            derivative_filtered: self.derivative_filtered(),
            integral: self.integral(),
        }
    }
}

impl<T: Sample, const N: usize> Default for SignalProcessor<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience for timestamp-less ingestion: `proc += value`.
impl<T: Sample, const N: usize> core::ops::AddAssign<T> for SignalProcessor<T, N> {
    fn add_assign(&mut self, value: T) {
        self.add(value);
    }
}
