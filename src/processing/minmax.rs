//! Lazily invalidated min/max cache
//!
//! Inserts update the cached extrema in O(1). Evicting a value equal to a
//! cached extremum only marks the cache dirty; the full window rescan is
//! deferred until the next min/max/range query. Duplicate extremal values
//! still trigger the rescan, which is conservative but always correct.

use log::trace;

use crate::sample::Sample;

#[derive(Debug, Clone, Copy)]
pub(crate) struct MinMaxTracker<T> {
    min: T,
    max: T,
    dirty: bool,
}

impl<T: Sample> MinMaxTracker<T> {
    pub(crate) const fn new() -> Self {
        Self {
            min: T::ZERO,
            max: T::ZERO,
            dirty: false,
        }
    }

    /// Fold a newly retained sample into the cache.
    ///
    /// `first` marks the first sample of an empty window, which seeds both
    /// bounds directly. While dirty, new samples are left for the pending
    /// rescan to pick up.
    pub(crate) fn observe_insert(&mut self, value: T, first: bool) {
        if first {
            self.min = value;
            self.max = value;
            self.dirty = false;
        } else if !self.dirty {
            if value < self.min {
                self.min = value;
            }
            if value > self.max {
                self.max = value;
            }
        }
    }

    /// Note an eviction. If the evicted sample may have held an extremum the
    /// cache is invalidated.
    pub(crate) fn observe_evict(&mut self, evicted: T) {
        if !self.dirty && (evicted == self.min || evicted == self.max) {
            self.dirty = true;
        }
    }

    pub(crate) fn min(&mut self, window: &[T]) -> T {
        self.refresh_if_dirty(window);
        self.min
    }

    pub(crate) fn max(&mut self, window: &[T]) -> T {
        self.refresh_if_dirty(window);
        self.max
    }

    /// Spread between max and min, widened to `f64`.
    pub(crate) fn range(&mut self, window: &[T]) -> f64 {
        self.refresh_if_dirty(window);
        self.max.to_f64() - self.min.to_f64()
    }

    #[cfg(test)]
    pub(crate) fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::new();
    }

    fn refresh_if_dirty(&mut self, window: &[T]) {
        if !self.dirty {
            return;
        }

        trace!("min/max cache stale, rescanning {} samples", window.len());

        if window.is_empty() {
            self.min = T::ZERO;
            self.max = T::ZERO;
        } else {
            let mut min = window[0];
            let mut max = window[0];
            for &value in &window[1..] {
                if value < min {
                    min = value;
                }
                if value > max {
                    max = value;
                }
            }
            self.min = min;
            self.max = max;
        }

        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sample_seeds_both_bounds() {
        let mut tracker: MinMaxTracker<i32> = MinMaxTracker::new();
        tracker.observe_insert(7, true);

        assert_eq!(tracker.min(&[7]), 7);
        assert_eq!(tracker.max(&[7]), 7);
    }

    #[test]
    fn test_incremental_updates() {
        let mut tracker: MinMaxTracker<i32> = MinMaxTracker::new();
        tracker.observe_insert(5, true);
        tracker.observe_insert(1, false);
        tracker.observe_insert(9, false);

        let window = [5, 1, 9];
        assert_eq!(tracker.min(&window), 1);
        assert_eq!(tracker.max(&window), 9);
        assert_eq!(tracker.range(&window), 8.0);
    }

    #[test]
    fn test_evicting_non_extremum_keeps_cache_clean() {
        let mut tracker: MinMaxTracker<i32> = MinMaxTracker::new();
        tracker.observe_insert(5, true);
        tracker.observe_insert(1, false);
        tracker.observe_insert(9, false);

        tracker.observe_evict(5);
        assert!(!tracker.is_dirty());
        tracker.observe_insert(2, false);

        assert_eq!(tracker.min(&[2, 1, 9]), 1);
    }

    #[test]
    fn test_evicting_extremum_triggers_rescan() {
        let mut tracker: MinMaxTracker<i32> = MinMaxTracker::new();
        tracker.observe_insert(5, true);
        tracker.observe_insert(1, false);
        tracker.observe_insert(9, false);

        tracker.observe_evict(1);
        assert!(tracker.is_dirty());
        tracker.observe_insert(20, false);

        // Rescan happens on first read and picks up the sample inserted
        // while dirty.
        assert_eq!(tracker.min(&[20, 9, 2]), 2);
        assert!(!tracker.is_dirty());
        assert_eq!(tracker.max(&[20, 9, 2]), 20);
    }

    #[test]
    fn test_duplicate_extremum_still_invalidates() {
        let mut tracker: MinMaxTracker<i32> = MinMaxTracker::new();
        tracker.observe_insert(3, true);
        tracker.observe_insert(3, false);
        tracker.observe_insert(8, false);

        // One copy of the duplicated minimum leaves; the conservative rescan
        // still lands on the surviving copy.
        tracker.observe_evict(3);
        assert!(tracker.is_dirty());
        assert_eq!(tracker.min(&[3, 8, 6]), 3);
    }

    #[test]
    fn test_empty_window_defaults_to_zero() {
        let mut tracker: MinMaxTracker<f32> = MinMaxTracker::new();
        assert_eq!(tracker.min(&[]), 0.0);
        assert_eq!(tracker.max(&[]), 0.0);
        assert_eq!(tracker.range(&[]), 0.0);
    }
}
