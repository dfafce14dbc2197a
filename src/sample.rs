//! Element type abstraction for the signal processor
//!
//! The processor is generic over the stored sample type so the same window
//! logic serves raw ADC counts (`u16`, `i32`), fixed-point milli-units, or
//! already-converted floating readings. Derived statistics are always
//! accumulated in `f64` regardless of the element type.

/// A scalar sample that can be stored in the processing window.
///
/// Implementations exist for the numeric types a sampling source realistically
/// produces. `ZERO` is the construction-time default for empty-window queries
/// and lets all containers be built in `const` context.
pub trait Sample: Copy + PartialOrd {
    /// The zero value of this type, used for empty-window fallbacks.
    const ZERO: Self;

    /// Widen to `f64` for aggregate arithmetic.
    fn to_f64(self) -> f64;
}

macro_rules! impl_sample {
    ($($ty:ty),*) => {
        $(
            impl Sample for $ty {
                const ZERO: Self = 0 as $ty;

                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_sample!(f32, f64, i8, i16, i32, u8, u16, u32);
