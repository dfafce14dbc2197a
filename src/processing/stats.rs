//! Online descriptive statistics over the retained window
//!
//! Maintains sum and sum-of-squares incrementally so mean, variance, standard
//! deviation and coefficient of variation are all O(1) reads. Evicted samples
//! are subtracted back out rather than recomputed.
//!
//! The sum/sum-of-squares formulation can cancel badly for very large sums
//! with tiny variance; acceptable for small fixed windows, reconsider before
//! extending to large `N` or ill-conditioned inputs.

/// Incrementally maintained aggregates in wide (`f64`) precision.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RunningStats {
    sum: f64,
    sum_sq: f64,
    count: usize,
}

impl RunningStats {
    pub(crate) const fn new() -> Self {
        Self {
            sum: 0.0,
            sum_sq: 0.0,
            count: 0,
        }
    }

    /// Fold a newly retained sample into the aggregates.
    pub(crate) fn insert(&mut self, value: f64) {
        self.sum += value;
        self.sum_sq += value * value;
        self.count += 1;
    }

    /// Un-count an evicted sample.
    pub(crate) fn remove(&mut self, value: f64) {
        self.sum -= value;
        self.sum_sq -= value * value;
        self.count -= 1;
    }

    pub(crate) fn count(&self) -> usize {
        self.count
    }

    pub(crate) fn sum(&self) -> f64 {
        self.sum
    }

    /// Arithmetic mean, 0 for an empty window.
    pub(crate) fn mean(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.sum / self.count as f64
    }

    /// Sample variance (Bessel-corrected), 0 for fewer than two samples.
    pub(crate) fn variance(&self) -> f64 {
        if self.count <= 1 {
            return 0.0;
        }
        let mean = self.mean();
        let var = (self.sum_sq - self.count as f64 * mean * mean) / (self.count - 1) as f64;
        // Cancellation can push the estimate slightly below zero.
        if var < 0.0 { 0.0 } else { var }
    }

    pub(crate) fn std_dev(&self) -> f64 {
        libm::sqrt(self.variance())
    }

    /// Relative variability in percent, 0 when the mean is zero.
    pub(crate) fn coefficient_of_variation(&self) -> f64 {
        let mean = self.mean();
        if mean == 0.0 {
            return 0.0;
        }
        self.std_dev() / mean * 100.0
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::new();
    }
}
