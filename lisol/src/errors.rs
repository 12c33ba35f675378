//! Error types for lisol

/// Errors raised while assembling or using the structure of a sparse matrix.
///
/// Reading a matrix before it is closed, or inserting into it afterwards,
/// cannot be expressed: [`SparseMatBuilder::close`] consumes the builder.
///
/// [`SparseMatBuilder::close`]: crate::SparseMatBuilder::close
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StructureError {
    #[error("entry ({row}, {col}) is out of bounds for a {dim}x{dim} matrix")]
    OutOfBounds { row: usize, col: usize, dim: usize },
    #[error(
        "row {row} must start with its diagonal entry, got column {col} first"
    )]
    DiagonalNotFirst { row: usize, col: usize },
    #[error("row {row} has no diagonal entry")]
    MissingDiagonal { row: usize },
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
    #[error("indptr is not a non-decreasing array of length dim + 1")]
    BadIndptr,
    #[error("off-diagonal indices of row {row} are not sorted and unique")]
    UnsortedIndices { row: usize },
    #[error("indices and data have different lengths")]
    DataIndicesMismatch,
}

/// Errors raised by the iterative solvers.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SolverError {
    #[error(transparent)]
    Structure(#[from] StructureError),
    #[error(
        "dimension mismatch: matrix is {matrix}x{matrix}, \
         x has length {x}, b has length {b}"
    )]
    DimensionMismatch { matrix: usize, x: usize, b: usize },
    #[error("parameter out of range: {name} = {value} (expected {expected})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("zero or negligible diagonal entry in row {row}")]
    ZeroPivot { row: usize },
    #[error("residual became non-finite at iteration {iteration}")]
    NonFinite { iteration: usize },
    #[error(
        "p.Ap <= 0 at iteration {iteration}, matrix is not positive definite"
    )]
    NotPositiveDefinite { iteration: usize },
    #[error("matrix is not symmetric")]
    NotSymmetric,
    #[error(
        "no convergence after {iterations} iterations \
         (residual {residual:.3e})"
    )]
    NotConverged { iterations: usize, residual: f64 },
}

impl SolverError {
    pub(crate) fn invalid_parameter<V: std::fmt::Display>(
        name: &'static str,
        value: V,
        expected: &'static str,
    ) -> Self {
        SolverError::InvalidParameter {
            name,
            value: value.to_string(),
            expected,
        }
    }
}

/// Error returned when parsing an unknown solver name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown solver `{0}`, expected one of jacobi, sor, ssor, cg")]
pub struct ParseMethodError(pub String);
