//! Dense vector of fixed length.

use std::ops::{
    Add, AddAssign, Deref, DerefMut, Index, IndexMut, Mul, MulAssign, Sub,
    SubAssign,
};

use ndarray::Array1;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dense_vector::{DenseVector, DenseVectorMut};
use crate::mul_acc;
use crate::Scalar;

/// A dense vector of `n` scalars.
///
/// The length is fixed once the vector is created: there is no push or
/// resize, only positional access and arithmetic. Elementwise operations
/// between vectors of different lengths panic, mirroring `ndarray`.
///
/// ```rust
/// use lisol::Vector;
/// let mut u = Vector::zeros(4);
/// u.fill(2.);
/// u[3] = 5.;
/// let v = &u * 0.5;
/// assert_eq!(v.as_slice(), &[1., 1., 1., 2.5]);
/// assert_eq!(u.dot(&v), 2. + 2. + 2. + 12.5);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Vector<T> {
    data: Vec<T>,
}

impl<T: Scalar> Vector<T> {
    /// A vector of `n` zeros
    pub fn zeros(n: usize) -> Self {
        Self::from_elem(n, T::zero())
    }

    /// A vector of `n` copies of `value`
    pub fn from_elem(n: usize, value: T) -> Self {
        Self {
            data: vec![value; n],
        }
    }

    /// Assign `value` to every element.
    pub fn fill(&mut self, value: T) {
        self.data.iter_mut().for_each(|x| *x = value);
    }

    pub fn dot(&self, other: &Self) -> T {
        mul_acc::dot(&self.data, &other.data)
    }

    pub fn squared_l2_norm(&self) -> T {
        self.dot(self)
    }

    pub fn l2_norm(&self) -> T {
        self.squared_l2_norm().sqrt()
    }

    /// Largest absolute value, zero for an empty vector.
    pub fn max_norm(&self) -> T {
        self.data.iter().fold(T::zero(), |acc, x| acc.max(x.abs()))
    }

    /// `self += alpha * x`
    ///
    /// # Panics
    ///
    /// If the lengths differ.
    pub fn axpy(&mut self, alpha: T, x: &Self) {
        mul_acc::axpy(alpha, &x.data, &mut self.data);
    }

    /// Copy the values of `other` into `self`.
    ///
    /// # Panics
    ///
    /// If the lengths differ.
    pub fn assign(&mut self, other: &Self) {
        self.data.copy_from_slice(&other.data);
    }

    pub fn to_ndarray(&self) -> Array1<T> {
        Array1::from(self.data.clone())
    }
}

impl<T> Vector<T> {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T> From<Vec<T>> for Vector<T> {
    fn from(data: Vec<T>) -> Self {
        Self { data }
    }
}

impl<T: Clone> From<Array1<T>> for Vector<T> {
    fn from(array: Array1<T>) -> Self {
        Self {
            data: array.to_vec(),
        }
    }
}

impl<T> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

impl<T> Deref for Vector<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.data
    }
}

impl<T> DerefMut for Vector<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        &mut self.data
    }
}

impl<T> Index<usize> for Vector<T> {
    type Output = T;

    #[inline(always)]
    fn index(&self, idx: usize) -> &T {
        &self.data[idx]
    }
}

impl<T> IndexMut<usize> for Vector<T> {
    #[inline(always)]
    fn index_mut(&mut self, idx: usize) -> &mut T {
        &mut self.data[idx]
    }
}

impl<T> DenseVector for Vector<T> {
    type Scalar = T;

    fn dim(&self) -> usize {
        self.data.len()
    }

    #[inline(always)]
    fn index(&self, idx: usize) -> &T {
        &self.data[idx]
    }

    fn as_contiguous(&self) -> Option<&[T]> {
        Some(&self.data)
    }
}

impl<T> DenseVectorMut for Vector<T> {
    #[inline(always)]
    fn index_mut(&mut self, idx: usize) -> &mut T {
        &mut self.data[idx]
    }

    fn as_contiguous_mut(&mut self) -> Option<&mut [T]> {
        Some(&mut self.data)
    }
}

fn check_len(lhs: usize, rhs: usize) {
    assert_eq!(lhs, rhs, "vector length mismatch");
}

impl<'a, T: Scalar> AddAssign<&'a Vector<T>> for Vector<T> {
    fn add_assign(&mut self, rhs: &'a Vector<T>) {
        check_len(self.len(), rhs.len());
        for (a, &b) in self.data.iter_mut().zip(&rhs.data) {
            *a = *a + b;
        }
    }
}

impl<'a, T: Scalar> SubAssign<&'a Vector<T>> for Vector<T> {
    fn sub_assign(&mut self, rhs: &'a Vector<T>) {
        check_len(self.len(), rhs.len());
        for (a, &b) in self.data.iter_mut().zip(&rhs.data) {
            *a = *a - b;
        }
    }
}

impl<T: Scalar> MulAssign<T> for Vector<T> {
    fn mul_assign(&mut self, rhs: T) {
        self.data.iter_mut().for_each(|a| *a = *a * rhs);
    }
}

impl<'a, 'b, T: Scalar> Add<&'b Vector<T>> for &'a Vector<T> {
    type Output = Vector<T>;

    fn add(self, rhs: &'b Vector<T>) -> Vector<T> {
        let mut res = self.clone();
        res += rhs;
        res
    }
}

impl<'a, 'b, T: Scalar> Sub<&'b Vector<T>> for &'a Vector<T> {
    type Output = Vector<T>;

    fn sub(self, rhs: &'b Vector<T>) -> Vector<T> {
        let mut res = self.clone();
        res -= rhs;
        res
    }
}

impl<'a, T: Scalar> Mul<T> for &'a Vector<T> {
    type Output = Vector<T>;

    fn mul(self, rhs: T) -> Vector<T> {
        let mut res = self.clone();
        res *= rhs;
        res
    }
}

#[cfg(feature = "approx")]
mod approx_impls {
    use super::Vector;
    use crate::Scalar;
    use approx::{AbsDiffEq, RelativeEq};

    impl<T> AbsDiffEq for Vector<T>
    where
        T: Scalar + AbsDiffEq<Epsilon = T>,
    {
        type Epsilon = T;

        fn default_epsilon() -> T {
            T::default_epsilon()
        }

        fn abs_diff_eq(&self, other: &Self, epsilon: T) -> bool {
            self.len() == other.len()
                && self
                    .iter()
                    .zip(other.iter())
                    .all(|(a, b)| a.abs_diff_eq(b, epsilon))
        }
    }

    impl<T> RelativeEq for Vector<T>
    where
        T: Scalar + RelativeEq<Epsilon = T>,
    {
        fn default_max_relative() -> T {
            T::default_max_relative()
        }

        fn relative_eq(
            &self,
            other: &Self,
            epsilon: T,
            max_relative: T,
        ) -> bool {
            self.len() == other.len()
                && self
                    .iter()
                    .zip(other.iter())
                    .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
        }
    }
}
