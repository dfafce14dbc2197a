//! Rate-limited derivative and trapezoidal integrator
//!
//! Only samples carrying a real timestamp advance this state, and only when
//! enough time has elapsed since the last qualifying sample. Samples that
//! fail the gate still feed the window, statistics and filter upstream; here
//! they are simply ignored.

use super::NO_TIMESTAMP;

/// Derivative and integral state, advanced per qualifying timestamped sample.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RateTracker {
    period_ms: u16,
    use_filtered: bool,
    alpha: f64,
    last_value: f64,
    last_time_ms: u32,
    derivative: f64,
    derivative_filtered: f64,
    integral: f64,
    last_integrand: f64,
    updates: u32,
}

impl RateTracker {
    pub(crate) const fn new(alpha: f64) -> Self {
        Self {
            period_ms: 0,
            use_filtered: false,
            alpha,
            last_value: 0.0,
            last_time_ms: 0,
            derivative: 0.0,
            derivative_filtered: 0.0,
            integral: 0.0,
            last_integrand: 0.0,
            updates: 0,
        }
    }

    /// Minimum elapsed time between derivative updates.
    pub(crate) fn set_period_ms(&mut self, period_ms: u16) {
        self.period_ms = period_ms;
    }

    /// Differentiate the smoothed value instead of the raw one.
    pub(crate) fn set_use_filtered(&mut self, use_filtered: bool) {
        self.use_filtered = use_filtered;
    }

    /// Smoothing coefficient for the filtered derivative, clamped to [0, 1].
    pub(crate) fn set_alpha(&mut self, alpha: f64) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    /// Advance from one timestamped sample.
    ///
    /// `raw` is always the integrand; `filtered` is used as the derivative
    /// source when configured. A sentinel or non-monotonic timestamp, or one
    /// inside the rate-limit period, leaves all state untouched.
    pub(crate) fn update(&mut self, raw: f64, filtered: f64, time_ms: u32) {
        if time_ms == NO_TIMESTAMP || time_ms <= self.last_time_ms {
            return;
        }
        let elapsed_ms = time_ms - self.last_time_ms;
        if elapsed_ms <= self.period_ms as u32 {
            return;
        }

        let dt = elapsed_ms as f64 * 1e-3;
        let source = if self.use_filtered { filtered } else { raw };
        let rate = (source - self.last_value) / dt;

        self.updates += 1;
        self.derivative = rate;
        if self.updates <= 2 {
            self.derivative_filtered = rate;
        } else {
            self.derivative_filtered =
                self.alpha * rate + (1.0 - self.alpha) * self.derivative_filtered;
        }

        // Trapezoid spans qualifying sample to qualifying sample; the first
        // one only records its endpoint.
        if self.updates > 1 {
            self.integral += 0.5 * (self.last_integrand + raw) * dt;
        }
        self.last_integrand = raw;

        self.last_time_ms = time_ms;
        self.last_value = source;
    }

    pub(crate) fn derivative(&self) -> f64 {
        self.derivative
    }

    pub(crate) fn derivative_filtered(&self) -> f64 {
        self.derivative_filtered
    }

    pub(crate) fn integral(&self) -> f64 {
        self.integral
    }

    pub(crate) fn last_value(&self) -> f64 {
        self.last_value
    }

    pub(crate) fn last_time_ms(&self) -> u32 {
        self.last_time_ms
    }

    /// Clears the accumulated integral only; derivative state is kept.
    pub(crate) fn reset_integral(&mut self) {
        self.integral = 0.0;
        self.last_integrand = 0.0;
    }

    /// Clears all tracked state; configuration is kept.
    pub(crate) fn clear(&mut self) {
        self.last_value = 0.0;
        self.last_time_ms = 0;
        self.derivative = 0.0;
        self.derivative_filtered = 0.0;
        self.integral = 0.0;
        self.last_integrand = 0.0;
        self.updates = 0;
    }
}
