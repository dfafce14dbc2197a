//! Fixed-capacity circular sample storage
//!
//! The ring buffer owns eviction: once full, every push overwrites the oldest
//! slot and hands the previous occupant back to the caller so running
//! aggregates can un-count it without rescanning the window.

use heapless::Vec;

use crate::sample::Sample;

/// Circular buffer of the `N` most recent samples.
///
/// Occupied slots always form the prefix `0..len()` in storage order; the
/// write index wraps to 0 at `N`. Storage order is *not* chronological once
/// the buffer has wrapped.
pub(crate) struct RingBuffer<T, const N: usize> {
    slots: [T; N],
    count: usize,
    write_index: usize,
}

impl<T: Sample, const N: usize> RingBuffer<T, N> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: [T::ZERO; N],
            count: 0,
            write_index: 0,
        }
    }

    /// Store `value`, returning the evicted occupant if the buffer was full.
    pub(crate) fn push(&mut self, value: T) -> Option<T> {
        let evicted = if self.count == N {
            Some(self.slots[self.write_index])
        } else {
            self.count += 1;
            None
        };

        self.slots[self.write_index] = value;
        self.write_index += 1;
        if self.write_index >= N {
            self.write_index = 0;
        }

        evicted
    }

    /// Number of samples currently retained (0 to `N`).
    pub(crate) fn len(&self) -> usize {
        self.count
    }

    pub(crate) const fn capacity(&self) -> usize {
        N
    }

    pub(crate) fn is_full(&self) -> bool {
        self.count == N
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Retained samples in storage order.
    ///
    /// Index 0 is *not* necessarily the oldest sample once the buffer has
    /// wrapped; use [`RingBuffer::ordered`] for chronological order.
    pub(crate) fn as_slice(&self) -> &[T] {
        &self.slots[..self.count]
    }

    /// Copy of the retained samples in chronological order, oldest first.
    pub(crate) fn ordered(&self) -> Vec<T, N> {
        let mut out = Vec::new();
        if self.count == N {
            // Oldest sample sits at the write index once wrapped.
            let _ = out.extend_from_slice(&self.slots[self.write_index..]);
            let _ = out.extend_from_slice(&self.slots[..self.write_index]);
        } else {
            let _ = out.extend_from_slice(&self.slots[..self.count]);
        }
        out
    }

    pub(crate) fn clear(&mut self) {
        self.count = 0;
        self.write_index = 0;
    }
}
