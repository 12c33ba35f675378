//! Multiply-accumulate (MAC) primitive and the dense kernels built on it.
//!
//! Dot products, row products of the sparse matrix and the CG updates all
//! reduce to `acc += a * b`, so the fused form is defined once here.

use crate::Scalar;

/// Trait for types that have a multiply-accumulate operation, as required
/// in dot products and matrix products.
pub trait MulAcc {
    /// Multiply and accumulate in this variable, formally `*self += a * b`.
    fn mul_acc(&mut self, a: &Self, b: &Self);
}

impl<N> MulAcc for N
where
    N: Copy + num_traits::MulAdd<Output = N>,
{
    #[inline(always)]
    fn mul_acc(&mut self, a: &Self, b: &Self) {
        *self = a.mul_add(*b, *self);
    }
}

/// Dot product of two slices of equal length.
///
/// # Panics
///
/// If the slices have different lengths.
#[cfg(not(feature = "multi_thread"))]
pub fn dot<T: Scalar>(lhs: &[T], rhs: &[T]) -> T {
    assert_eq!(lhs.len(), rhs.len(), "dot: length mismatch");
    let mut acc = T::zero();
    for (a, b) in lhs.iter().zip(rhs) {
        acc.mul_acc(a, b);
    }
    acc
}

/// Dot product of two slices of equal length, reduced in parallel.
///
/// # Panics
///
/// If the slices have different lengths.
#[cfg(feature = "multi_thread")]
pub fn dot<T: Scalar>(lhs: &[T], rhs: &[T]) -> T {
    use rayon::prelude::*;
    assert_eq!(lhs.len(), rhs.len(), "dot: length mismatch");
    lhs.par_iter()
        .zip(rhs.par_iter())
        .fold(T::zero, |mut acc, (a, b)| {
            acc.mul_acc(a, b);
            acc
        })
        .reduce(T::zero, |a, b| a + b)
}

/// `y += alpha * x`
///
/// # Panics
///
/// If the slices have different lengths.
pub fn axpy<T: Scalar>(alpha: T, x: &[T], y: &mut [T]) {
    assert_eq!(x.len(), y.len(), "axpy: length mismatch");
    #[cfg(feature = "multi_thread")]
    {
        use rayon::prelude::*;
        y.par_iter_mut()
            .zip(x.par_iter())
            .for_each(|(yi, xi)| yi.mul_acc(&alpha, xi));
    }
    #[cfg(not(feature = "multi_thread"))]
    {
        for (yi, xi) in y.iter_mut().zip(x) {
            yi.mul_acc(&alpha, xi);
        }
    }
}
