//! Open assembly phase of a sparse matrix
//!
//! Entries are collected per row, diagonal first, until the builder is
//! closed into a [`SparseMat`]. Useful for building a matrix, but not for
//! computations.

use smallvec::SmallVec;

use crate::errors::StructureError;
use crate::sparse::SparseMat;
use crate::Scalar;

/// Inline capacity of a row, enough for a 5-point stencil.
const STENCIL: usize = 5;

type RowEntries<T> = SmallVec<[(usize, T); STENCIL]>;

/// A square sparse matrix under assembly.
///
/// The first entry set in any row must be its diagonal; later entries of
/// the row may come in any column order. Setting a cell that already holds a
/// value overwrites it.
///
/// ```rust
/// use lisol::SparseMatBuilder;
/// let mut builder = SparseMatBuilder::new(2);
/// builder.set(0, 0, 2.).unwrap();
/// builder.set(0, 1, -1.).unwrap();
/// builder.set(1, 1, 2.).unwrap();
/// builder.set(1, 0, -1.).unwrap();
/// let mat = builder.close().unwrap();
/// assert_eq!(mat.get(0, 1), -1.);
/// ```
#[derive(Debug, Clone)]
pub struct SparseMatBuilder<T> {
    dim: usize,
    rows: Vec<RowEntries<T>>,
}

impl<T: Scalar> SparseMatBuilder<T> {
    /// An empty `dim x dim` matrix
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            rows: vec![SmallVec::new(); dim],
        }
    }

    /// An empty `dim x dim` matrix reserving room for `nnz_per_row` entries
    /// in every row.
    pub fn with_capacity(dim: usize, nnz_per_row: usize) -> Self {
        Self {
            dim,
            rows: (0..dim)
                .map(|_| SmallVec::with_capacity(nnz_per_row))
                .collect(),
        }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of entries set so far
    pub fn nnz(&self) -> usize {
        self.rows.iter().map(|row| row.len()).sum()
    }

    /// Set the value of the entry at `(row, col)`.
    ///
    /// Fails if the location is out of bounds, or if `col != row` while the
    /// diagonal of `row` has not been set yet.
    pub fn set(
        &mut self,
        row: usize,
        col: usize,
        value: T,
    ) -> Result<(), StructureError> {
        if row >= self.dim || col >= self.dim {
            return Err(StructureError::OutOfBounds {
                row,
                col,
                dim: self.dim,
            });
        }
        let entries = &mut self.rows[row];
        if entries.is_empty() && row != col {
            return Err(StructureError::DiagonalNotFirst { row, col });
        }
        match entries.iter_mut().find(|(c, _)| *c == col) {
            Some(entry) => entry.1 = value,
            None => entries.push((col, value)),
        }
        Ok(())
    }

    /// Freeze the structure into a compressed matrix.
    ///
    /// Each row keeps its diagonal first, followed by the off-diagonal
    /// entries sorted by column. Fails if some row was never set, since
    /// every row then lacks its diagonal.
    pub fn close(self) -> Result<SparseMat<T>, StructureError> {
        let nnz = self.nnz();
        let mut indptr = Vec::with_capacity(self.dim + 1);
        let mut indices = Vec::with_capacity(nnz);
        let mut data = Vec::with_capacity(nnz);
        indptr.push(0);
        for (row, mut entries) in self.rows.into_iter().enumerate() {
            if entries.is_empty() {
                return Err(StructureError::MissingDiagonal { row });
            }
            debug_assert_eq!(entries[0].0, row);
            entries[1..].sort_unstable_by_key(|&(col, _)| col);
            for (col, value) in entries {
                indices.push(col);
                data.push(value);
            }
            indptr.push(indices.len());
        }
        tracing::debug!("closed {0}x{0} sparse matrix, nnz={1}", self.dim, nnz);
        Ok(SparseMat::new_unchecked(self.dim, indptr, indices, data))
    }
}
