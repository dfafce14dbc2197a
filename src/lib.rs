//! Fixed-capacity, allocation-free signal processing for streaming sensor data
//!
//! This crate provides [`SignalProcessor`], a self-contained aggregate that
//! ingests one scalar sample at a time and incrementally maintains descriptive
//! statistics, an exponential smoothing filter, a rate-of-change estimate, a
//! trapezoidal integral, and simple signal-quality checks over a circular
//! window of the most recent samples.
//!
//! All memory is fixed at compile time through const generics; no operation
//! allocates, and every update is O(1) amortized. The one exception is a
//! min/max query after the current extremum was evicted, which lazily rescans
//! the window.
//!
//! It is `#![no_std]` so it compiles on both embedded targets and desktop
//! hosts (std is enabled only for the test harness).

#![cfg_attr(not(test), no_std)]

pub mod processing;
pub mod sample;
pub mod shared;
pub mod snapshot;

pub use processing::{DEFAULT_SIGMA_THRESHOLD, NO_TIMESTAMP, SignalProcessor};
pub use sample::Sample;
pub use shared::SharedSignalProcessor;
pub use snapshot::Snapshot;
