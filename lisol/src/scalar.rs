//! Trait gathering what the solvers need from a floating point scalar.

use std::fmt::{Debug, Display};

use num_traits::{Float, MulAdd};

/// A real floating point scalar usable in sparse matrices and solvers.
///
/// Implemented for `f32` and `f64`. The `Send + Sync` bounds let the
/// `multi_thread` feature split row loops across threads.
pub trait Scalar:
    Float + MulAdd<Output = Self> + Debug + Display + Send + Sync + 'static
{
    /// Widen to `f64`, for reporting.
    fn as_f64(self) -> f64;

    /// Narrow an `f64` constant to this type.
    fn from_f64(value: f64) -> Self;
}

macro_rules! float_scalar_impl {
    ($prim: ty) => {
        impl Scalar for $prim {
            #[inline(always)]
            fn as_f64(self) -> f64 {
                self as f64
            }

            #[inline(always)]
            fn from_f64(value: f64) -> Self {
                value as $prim
            }
        }
    };
}

float_scalar_impl!(f32);
float_scalar_impl!(f64);
