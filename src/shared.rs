//! Shared access to a processor from multiple execution contexts
//!
//! The processor itself is single-context and lock-free; when an interrupt
//! handler and a polling task both need it, access must be serialized by the
//! caller. [`SharedSignalProcessor`] packages the standard way to do that: a
//! critical-section blocking mutex around the instance.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

use crate::processing::SignalProcessor;
use crate::sample::Sample;
use crate::snapshot::Snapshot;

/// A [`SignalProcessor`] behind a critical-section mutex.
///
/// Every operation runs to completion inside one critical section, so a
/// producer in interrupt context and a consumer task cannot observe the
/// aggregates mid-update. Place it in a `static` (e.g. via `StaticCell`) to
/// share between tasks.
pub struct SharedSignalProcessor<T, const N: usize> {
    inner: Mutex<CriticalSectionRawMutex, RefCell<SignalProcessor<T, N>>>,
}

impl<T: Sample, const N: usize> SharedSignalProcessor<T, N> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(SignalProcessor::new())),
        }
    }

    /// Run `f` with exclusive access to the processor.
    pub fn with<R>(&self, f: impl FnOnce(&mut SignalProcessor<T, N>) -> R) -> R {
        self.inner.lock(|cell| f(&mut cell.borrow_mut()))
    }

    /// Ingest one timestamped sample.
    pub fn add_sample(&self, value: T, time_ms: u32) {
        self.with(|proc| proc.add_sample(value, time_ms));
    }

    /// Ingest one sample without timing information.
    pub fn add(&self, value: T) {
        self.with(|proc| proc.add(value));
    }

    /// Capture all derived quantities at once.
    pub fn snapshot(&self) -> Snapshot<T> {
        self.with(|proc| proc.snapshot())
    }
}

impl<T: Sample, const N: usize> Default for SharedSignalProcessor<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_access() {
        let shared: SharedSignalProcessor<f32, 4> = SharedSignalProcessor::new();
        shared.add_sample(1.0, 1000);
        shared.add_sample(3.0, 2000);
        shared.add(5.0);

        let snap = shared.snapshot();
        assert_eq!(snap.count, 3);
        assert_eq!(snap.min, 1.0);
        assert_eq!(snap.max, 5.0);

        shared.with(|proc| proc.reset());
        assert_eq!(shared.snapshot().count, 0);
    }

    #[test]
    fn test_static_instance() {
        static PROCESSOR: SharedSignalProcessor<i32, 8> = SharedSignalProcessor::new();

        PROCESSOR.with(|proc| {
            proc.add(4);
            proc.add(6);
        });

        assert_eq!(PROCESSOR.with(|proc| proc.mean()), 5.0);
    }
}
