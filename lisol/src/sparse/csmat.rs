//! Closed sparse matrix in a diagonal-first compressed row format
//!
//! The matrix is a structure containing three vectors: `indptr`, `indices`
//! and `data`. For row `i`, the stored entries are located in
//! `indices[indptr[i]..indptr[i + 1]]` and `data[indptr[i]..indptr[i + 1]]`.
//! The first entry of every row is its diagonal, the remaining ones are the
//! off-diagonal entries sorted by column.

use ndarray::Array2;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::dense_vector::{DenseVector, DenseVectorMut};
use crate::errors::StructureError;
use crate::mul_acc::MulAcc;
use crate::{Scalar, Vector};

/// Square sparse matrix whose structure is frozen.
///
/// Obtained by closing a [`SparseMatBuilder`](crate::SparseMatBuilder), or
/// from raw arrays with [`SparseMat::try_from_csr`]. Values can still be
/// modified through [`SparseMat::zero_off_diag`], the structure cannot.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SparseMat<T> {
    dim: usize,
    indptr: Vec<usize>,
    indices: Vec<usize>,
    data: Vec<T>,
}

/// A row of a [`SparseMat`]
#[derive(Debug, Clone, Copy)]
pub struct RowView<'a, T> {
    row: usize,
    indices: &'a [usize],
    data: &'a [T],
}

impl<'a, T: Scalar> RowView<'a, T> {
    /// Index of this row in the matrix
    pub fn row(&self) -> usize {
        self.row
    }

    pub fn nnz(&self) -> usize {
        self.data.len()
    }

    pub fn diag(&self) -> T {
        self.data[0]
    }

    /// Stored off-diagonal entries, by increasing column
    pub fn off_diag(&self) -> impl Iterator<Item = (usize, T)> + 'a {
        self.indices[1..].iter().copied().zip(self.data[1..].iter().copied())
    }

    /// All stored entries, diagonal first
    pub fn iter(&self) -> impl Iterator<Item = (usize, T)> + 'a {
        self.indices.iter().copied().zip(self.data.iter().copied())
    }

    /// `sum_{j != row} a_ij * x_j`
    #[inline]
    pub fn off_diag_dot(&self, x: &[T]) -> T {
        let mut acc = T::zero();
        for (&col, val) in self.indices[1..].iter().zip(&self.data[1..]) {
            acc.mul_acc(val, &x[col]);
        }
        acc
    }

    /// `sum_j a_ij * x_j`
    #[inline]
    pub fn dot(&self, x: &[T]) -> T {
        let mut acc = T::zero();
        for (&col, val) in self.indices.iter().zip(self.data) {
            acc.mul_acc(val, &x[col]);
        }
        acc
    }

    /// Largest absolute value stored in the row
    pub fn max_abs(&self) -> T {
        self.data.iter().fold(T::zero(), |acc, v| acc.max(v.abs()))
    }
}

impl<T: Scalar> SparseMat<T> {
    /// Build from arrays already known to satisfy the structure invariants.
    pub(crate) fn new_unchecked(
        dim: usize,
        indptr: Vec<usize>,
        indices: Vec<usize>,
        data: Vec<T>,
    ) -> Self {
        Self {
            dim,
            indptr,
            indices,
            data,
        }
    }

    /// Create a matrix from its compressed arrays, checking their validity.
    ///
    /// Every row must start with its diagonal, followed by strictly
    /// increasing off-diagonal column indices.
    pub fn try_from_csr(
        dim: usize,
        indptr: Vec<usize>,
        indices: Vec<usize>,
        data: Vec<T>,
    ) -> Result<Self, StructureError> {
        if dim.checked_add(1) != Some(indptr.len())
            || indptr[0] != 0
            || indptr.windows(2).any(|w| w[0] > w[1])
            || indptr[dim] != indices.len()
        {
            return Err(StructureError::BadIndptr);
        }
        if indices.len() != data.len() {
            return Err(StructureError::DataIndicesMismatch);
        }
        for row in 0..dim {
            let inds = &indices[indptr[row]..indptr[row + 1]];
            match inds.first() {
                Some(&col) if col == row => (),
                _ => return Err(StructureError::MissingDiagonal { row }),
            }
            if let Some(&col) = inds.iter().find(|&&col| col >= dim) {
                return Err(StructureError::OutOfBounds { row, col, dim });
            }
            let off = &inds[1..];
            if off.contains(&row) || off.windows(2).any(|w| w[0] >= w[1]) {
                return Err(StructureError::UnsortedIndices { row });
            }
        }
        Ok(Self::new_unchecked(dim, indptr, indices, data))
    }

    /// Size `n` of the `n x n` matrix
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn rows(&self) -> usize {
        self.dim
    }

    pub fn cols(&self) -> usize {
        self.dim
    }

    /// Number of stored entries, explicit zeros included
    pub fn nnz(&self) -> usize {
        self.data.len()
    }

    pub fn indptr(&self) -> &[usize] {
        &self.indptr
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Access a row
    ///
    /// # Panics
    ///
    /// If `row >= self.dim()`
    pub fn row(&self, row: usize) -> RowView<'_, T> {
        let range = self.indptr[row]..self.indptr[row + 1];
        RowView {
            row,
            indices: &self.indices[range.clone()],
            data: &self.data[range],
        }
    }

    /// Iterate over the rows of the matrix
    pub fn row_iter(&self) -> impl Iterator<Item = RowView<'_, T>> + '_ {
        (0..self.dim).map(move |row| self.row(row))
    }

    /// The diagonal entry of `row`, in constant time
    ///
    /// # Panics
    ///
    /// If `row >= self.dim()`
    #[inline]
    pub fn diag(&self, row: usize) -> T {
        self.data[self.indptr[row]]
    }

    /// The value at `(row, col)`, zero if nothing is stored there.
    ///
    /// The diagonal is found in constant time, other entries by a binary
    /// search over the off-diagonal part of the row.
    ///
    /// # Panics
    ///
    /// If the location is out of bounds
    pub fn get(&self, row: usize, col: usize) -> T {
        assert!(
            row < self.dim && col < self.dim,
            "({}, {}) out of bounds for a {}x{} matrix",
            row,
            col,
            self.dim,
            self.dim
        );
        if row == col {
            return self.diag(row);
        }
        let start = self.indptr[row] + 1;
        let stop = self.indptr[row + 1];
        match self.indices[start..stop].binary_search(&col) {
            Ok(pos) => self.data[start + pos],
            Err(_) => T::zero(),
        }
    }

    /// Set every off-diagonal value of `row` to zero, keeping the diagonal.
    ///
    /// This decouples the unknown of `row` from its neighbours, turning the
    /// row equation into `a_ii * x_i = b_i`. Stored positions are kept.
    ///
    /// # Panics
    ///
    /// If `row >= self.dim()`
    pub fn zero_off_diag(&mut self, row: usize) {
        let start = self.indptr[row] + 1;
        let stop = self.indptr[row + 1];
        self.data[start..stop]
            .iter_mut()
            .for_each(|v| *v = T::zero());
    }

    /// Compute `result = self * x`
    ///
    /// Runs in time proportional to the number of stored entries.
    pub fn multiply<V, W>(
        &self,
        x: &V,
        result: &mut W,
    ) -> Result<(), StructureError>
    where
        V: DenseVector<Scalar = T> + ?Sized,
        W: DenseVectorMut<Scalar = T> + ?Sized,
    {
        self.check_dim(x.dim())?;
        self.check_dim(result.dim())?;
        if let Some(xs) = x.as_contiguous() {
            if let Some(res) = result.as_contiguous_mut() {
                self.mul_slice(xs, res);
                return Ok(());
            }
        }
        for row in self.row_iter() {
            let mut acc = T::zero();
            for (col, val) in row.iter() {
                acc.mul_acc(&val, x.index(col));
            }
            *result.index_mut(row.row()) = acc;
        }
        Ok(())
    }

    /// Allocating variant of [`SparseMat::multiply`]
    pub fn mul_vec(&self, x: &Vector<T>) -> Result<Vector<T>, StructureError> {
        let mut res = Vector::zeros(self.dim);
        self.multiply(x, &mut res)?;
        Ok(res)
    }

    /// Compute the residual `r = b - self * x` and return its l2 norm.
    pub fn residual(
        &self,
        x: &Vector<T>,
        b: &Vector<T>,
        r: &mut Vector<T>,
    ) -> Result<T, StructureError> {
        self.check_dim(x.len())?;
        self.check_dim(b.len())?;
        self.check_dim(r.len())?;
        Ok(self.residual_slice(x, b, r))
    }

    /// l2 norm of `b - self * x`, without storing the residual.
    pub(crate) fn residual_norm(&self, x: &[T], b: &[T]) -> T {
        let row_sq = |row: RowView<'_, T>| {
            let ri = b[row.row()] - row.dot(x);
            ri * ri
        };
        #[cfg(feature = "multi_thread")]
        let sq = {
            use rayon::prelude::*;
            (0..self.dim)
                .into_par_iter()
                .map(|i| row_sq(self.row(i)))
                .reduce(T::zero, |a, b| a + b)
        };
        #[cfg(not(feature = "multi_thread"))]
        let sq = self.row_iter().map(row_sq).fold(T::zero(), |a, b| a + b);
        sq.sqrt()
    }

    pub(crate) fn residual_slice(&self, x: &[T], b: &[T], r: &mut [T]) -> T {
        #[cfg(feature = "multi_thread")]
        {
            use rayon::prelude::*;
            r.par_iter_mut().enumerate().for_each(|(i, ri)| {
                *ri = b[i] - self.row(i).dot(x);
            });
        }
        #[cfg(not(feature = "multi_thread"))]
        {
            for (row, ri) in self.row_iter().zip(r.iter_mut()) {
                *ri = b[row.row()] - row.dot(x);
            }
        }
        crate::mul_acc::dot(r, r).sqrt()
    }

    fn mul_slice(&self, x: &[T], res: &mut [T]) {
        #[cfg(feature = "multi_thread")]
        {
            use rayon::prelude::*;
            res.par_iter_mut()
                .enumerate()
                .for_each(|(i, yi)| *yi = self.row(i).dot(x));
        }
        #[cfg(not(feature = "multi_thread"))]
        {
            for (row, yi) in self.row_iter().zip(res.iter_mut()) {
                *yi = row.dot(x);
            }
        }
    }

    fn check_dim(&self, found: usize) -> Result<(), StructureError> {
        if found != self.dim {
            return Err(StructureError::DimensionMismatch {
                expected: self.dim,
                found,
            });
        }
        Ok(())
    }

    /// Check whether `|a_ij - a_ji| <= tol` for every stored entry.
    ///
    /// Entries stored on one side only are compared against zero, so a
    /// matrix with explicit zeros is symmetric as long as its values are.
    pub fn is_symmetric(&self, tol: T) -> bool {
        self.row_iter().all(|row| {
            row.off_diag()
                .all(|(col, val)| (val - self.get(col, row.row())).abs() <= tol)
        })
    }

    /// Check weak diagonal dominance by rows:
    /// `|a_ii| >= sum_{j != i} |a_ij|` for every row.
    pub fn is_diagonally_dominant(&self) -> bool {
        self.row_iter().all(|row| {
            let off =
                row.off_diag().fold(T::zero(), |acc, (_, v)| acc + v.abs());
            row.diag().abs() >= off
        })
    }

    /// Dense copy of the matrix
    pub fn to_dense(&self) -> Array2<T> {
        let mut res = Array2::zeros((self.dim, self.dim));
        for row in self.row_iter() {
            for (col, val) in row.iter() {
                res[[row.row(), col]] = val;
            }
        }
        res
    }
}

#[cfg(test)]
mod test {
    use crate::errors::StructureError;
    use crate::{SparseMat, SparseMatBuilder, Vector};
    use ndarray::{arr1, arr2};

    //  | 4 -1  0 |
    //  |-1  4 -2 |
    //  | 0 -1  4 |
    fn mat() -> SparseMat<f64> {
        let mut b = SparseMatBuilder::new(3);
        b.set(0, 0, 4.).unwrap();
        b.set(0, 1, -1.).unwrap();
        b.set(1, 1, 4.).unwrap();
        b.set(1, 2, -2.).unwrap();
        b.set(1, 0, -1.).unwrap();
        b.set(2, 2, 4.).unwrap();
        b.set(2, 1, -1.).unwrap();
        b.close().unwrap()
    }

    #[test]
    fn random_access() {
        let m = mat();
        assert_eq!(m.nnz(), 7);
        assert_eq!(m.get(1, 2), -2.);
        assert_eq!(m.get(2, 1), -1.);
        assert_eq!(m.get(0, 2), 0.);
        assert_eq!(m.diag(2), 4.);
        assert_eq!(
            m.to_dense(),
            arr2(&[[4., -1., 0.], [-1., 4., -2.], [0., -1., 4.]])
        );
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn get_out_of_bounds() {
        mat().get(0, 3);
    }

    #[test]
    fn multiply_matches_rows() {
        let m = mat();
        let x: Vector<f64> = vec![1., 2., 3.].into();
        let y = m.mul_vec(&x).unwrap();
        for row in m.row_iter() {
            let expected: f64 =
                (0..3).map(|j| m.get(row.row(), j) * x[j]).sum();
            assert_eq!(y[row.row()], expected);
        }
        assert_eq!(y.as_slice(), &[2., 1., 10.]);
    }

    #[test]
    fn multiply_other_storages() {
        let m = mat();
        let x = arr1(&[1., 2., 3.]);
        let mut y = vec![0.; 3];
        m.multiply(&x, &mut y).unwrap();
        assert_eq!(y, vec![2., 1., 10.]);

        // strided output goes through the generic path
        let mut out = ndarray::Array1::zeros(6);
        let mut view = out.slice_mut(ndarray::s![..;2]);
        m.multiply(&x, &mut view).unwrap();
        assert_eq!(out, arr1(&[2., 0., 1., 0., 10., 0.]));
    }

    #[test]
    fn multiply_dimension_mismatch() {
        let m = mat();
        let mut y = vec![0.; 3];
        assert!(m.multiply(&vec![1., 2.], &mut y).is_err());
        assert!(m.multiply(&vec![1., 2., 3.], &mut vec![0.; 4]).is_err());
    }

    #[test]
    fn zero_off_diag_keeps_diagonal() {
        let mut m = mat();
        m.zero_off_diag(1);
        assert_eq!(m.get(1, 0), 0.);
        assert_eq!(m.get(1, 2), 0.);
        assert_eq!(m.get(1, 1), 4.);
        assert_eq!(m.get(0, 1), -1.);
        assert_eq!(m.nnz(), 7);
    }

    #[test]
    fn residual() {
        let m = mat();
        let x = Vector::from_elem(3, 1.);
        let b: Vector<f64> = vec![3., 1., 3.].into();
        let mut r = Vector::zeros(3);
        let norm = m.residual(&x, &b, &mut r).unwrap();
        assert_eq!(r.as_slice(), &[0., 0., 0.]);
        assert_eq!(norm, 0.);
        assert_eq!(m.residual_norm(&[0., 0., 0.], &b), 19f64.sqrt());
    }

    #[test]
    fn structure_checks() {
        let mut m = mat();
        assert!(!m.is_symmetric(1e-12));
        assert!(m.is_diagonally_dominant());
        m.zero_off_diag(1);
        assert!(!m.is_symmetric(1e-12));
        m.zero_off_diag(0);
        m.zero_off_diag(2);
        assert!(m.is_symmetric(0.));
    }

    #[test]
    fn csr_validation() {
        assert!(SparseMat::try_from_csr(
            2,
            vec![0, 2, 3],
            vec![0, 1, 1],
            vec![1., 2., 3.]
        )
        .is_ok());
        // diagonal is not first
        assert!(SparseMat::try_from_csr(
            2,
            vec![0, 2, 3],
            vec![1, 0, 1],
            vec![1., 2., 3.]
        )
        .is_err());
        // bad indptr
        assert!(SparseMat::try_from_csr(
            2,
            vec![0, 3, 2],
            vec![0, 1, 1],
            vec![1., 2., 3.]
        )
        .is_err());
        // unsorted off diagonal entries
        assert!(SparseMat::try_from_csr(
            3,
            vec![0, 3, 4, 5],
            vec![0, 2, 1, 1, 2],
            vec![1., 2., 3., 4., 5.]
        )
        .is_err());
        // dim + 1 does not fit in usize
        assert_eq!(
            SparseMat::<f64>::try_from_csr(usize::MAX, vec![0], vec![], vec![]),
            Err(StructureError::BadIndptr)
        );
    }
}
