use ndarray::{self, ArrayBase, Ix1};

/// A trait for types representing dense vectors, useful for expressing
/// algorithms such as the sparse matrix-vector product independently of
/// the storage the caller happens to use.
///
/// Implemented for slices, `Vec`, one dimensional `ndarray` arrays and
/// [`Vector`](crate::Vector).
pub trait DenseVector {
    type Scalar;

    /// The dimension of the vector
    fn dim(&self) -> usize;

    /// Random access to an element in the vector.
    ///
    /// # Panics
    ///
    /// If the index is out of bounds
    fn index(&self, idx: usize) -> &Self::Scalar;

    /// Contiguous view of the elements, when the storage allows it
    fn as_contiguous(&self) -> Option<&[Self::Scalar]>;
}

pub trait DenseVectorMut: DenseVector {
    /// Random mutable access to an element in the vector.
    ///
    /// # Panics
    ///
    /// If the index is out of bounds
    fn index_mut(&mut self, idx: usize) -> &mut Self::Scalar;

    /// Contiguous mutable view of the elements, when the storage allows it
    fn as_contiguous_mut(&mut self) -> Option<&mut [Self::Scalar]>;
}

impl<N> DenseVector for [N] {
    type Scalar = N;

    fn dim(&self) -> usize {
        self.len()
    }

    #[inline(always)]
    fn index(&self, idx: usize) -> &N {
        &self[idx]
    }

    fn as_contiguous(&self) -> Option<&[N]> {
        Some(self)
    }
}

impl<N> DenseVectorMut for [N] {
    #[inline(always)]
    fn index_mut(&mut self, idx: usize) -> &mut N {
        &mut self[idx]
    }

    fn as_contiguous_mut(&mut self) -> Option<&mut [N]> {
        Some(self)
    }
}

impl<N> DenseVector for Vec<N> {
    type Scalar = N;

    fn dim(&self) -> usize {
        self.len()
    }

    #[inline(always)]
    fn index(&self, idx: usize) -> &N {
        &self[idx]
    }

    fn as_contiguous(&self) -> Option<&[N]> {
        Some(&self[..])
    }
}

impl<N> DenseVectorMut for Vec<N> {
    #[inline(always)]
    fn index_mut(&mut self, idx: usize) -> &mut N {
        &mut self[idx]
    }

    fn as_contiguous_mut(&mut self) -> Option<&mut [N]> {
        Some(&mut self[..])
    }
}

impl<N, S> DenseVector for ArrayBase<S, Ix1>
where
    S: ndarray::Data<Elem = N>,
{
    type Scalar = N;

    fn dim(&self) -> usize {
        self.shape()[0]
    }

    #[inline(always)]
    fn index(&self, idx: usize) -> &N {
        &self[[idx]]
    }

    fn as_contiguous(&self) -> Option<&[N]> {
        self.as_slice()
    }
}

impl<N, S> DenseVectorMut for ArrayBase<S, Ix1>
where
    S: ndarray::DataMut<Elem = N>,
{
    #[inline(always)]
    fn index_mut(&mut self, idx: usize) -> &mut N {
        &mut self[[idx]]
    }

    fn as_contiguous_mut(&mut self) -> Option<&mut [N]> {
        self.as_slice_mut()
    }
}

#[cfg(test)]
mod test {
    use super::{DenseVector, DenseVectorMut};
    use ndarray::{arr1, s};

    #[test]
    fn strided_arrays_are_not_contiguous() {
        let a = arr1(&[1., 2., 3., 4.]);
        let v = a.slice(s![..;2]);
        assert_eq!(DenseVector::dim(&v), 2);
        assert_eq!(*DenseVector::index(&v, 1), 3.);
        assert!(v.as_contiguous().is_none());
        assert!(a.as_contiguous().is_some());
    }

    #[test]
    fn vec_index_mut() {
        let mut v = vec![0; 3];
        *DenseVectorMut::index_mut(&mut v, 2) = 5;
        assert_eq!(v.as_contiguous(), Some(&[0, 0, 5][..]));
    }
}
