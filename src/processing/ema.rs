//! Single-pole exponential smoothing filter
//!
//! Forward-only recursion over the insertion order; unlike the windowed
//! statistics it is unaffected by eviction.

/// Exponentially weighted moving average state.
#[derive(Debug, Clone, Copy)]
pub(crate) struct EmaFilter {
    alpha: f64,
    value: f64,
}

impl EmaFilter {
    pub(crate) const fn new(alpha: f64) -> Self {
        Self { alpha, value: 0.0 }
    }

    /// Smoothing coefficient, clamped to [0, 1]. Higher reacts faster.
    pub(crate) fn set_alpha(&mut self, alpha: f64) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    /// Advance the filter. The first sample seeds the state directly so the
    /// output carries no warm-up bias toward zero.
    pub(crate) fn update(&mut self, sample: f64, first: bool) {
        if first {
            self.value = sample;
        } else {
            self.value = self.alpha * sample + (1.0 - self.alpha) * self.value;
        }
    }

    pub(crate) fn value(&self) -> f64 {
        self.value
    }

    /// Clears the filtered value; the configured alpha is kept.
    pub(crate) fn clear(&mut self) {
        self.value = 0.0;
    }
}
