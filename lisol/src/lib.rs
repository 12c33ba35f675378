/*!
# lisol

lisol is a small toolkit for large sparse linear systems `A x = b`, such as
the ones produced by finite difference discretizations of elliptic PDEs.

It features a dense [`Vector`] type, a square sparse matrix assembled in two
phases ([`SparseMatBuilder`] then [`SparseMat`]), and four iterative solvers:
Jacobi, SOR, SSOR and conjugate gradient.

The sparse matrix stores every row diagonal first, followed by the
off-diagonal entries sorted by column. The diagonal is therefore available
in constant time, which all the supported solvers rely on.

## Examples

Matrix assembly

```rust
use lisol::SparseMatBuilder;
let mut builder = SparseMatBuilder::new(3);
for i in 0..3 {
    // the diagonal of a row has to be set first
    builder.set(i, i, 2.).unwrap();
}
builder.set(0, 1, -1.).unwrap();
builder.set(1, 0, -1.).unwrap();
assert!(builder.set(3, 3, 1.).is_err());
let a = builder.close().unwrap();
assert_eq!(a.get(1, 0), -1.);
assert_eq!(a.get(2, 0), 0.);
```

Matrix vector multiplication

```rust
use lisol::{SparseMatBuilder, Vector};
let mut builder = SparseMatBuilder::new(2);
builder.set(0, 0, 2.).unwrap();
builder.set(0, 1, 1.).unwrap();
builder.set(1, 1, 3.).unwrap();
let a = builder.close().unwrap();
let x: Vector<f64> = vec![1., 2.].into();
let y = a.mul_vec(&x).unwrap();
assert_eq!(y.as_slice(), &[4., 6.]);

// any dense vector type works, eg ndarray
let x = ndarray::arr1(&[1., 2.]);
let mut y = ndarray::Array1::zeros(2);
a.multiply(&x, &mut y).unwrap();
assert_eq!(y, ndarray::arr1(&[4., 6.]));
```

Solving a system

```rust
use lisol::{ConjugateGradient, IterativeSolver, SparseMatBuilder, Vector};
let mut builder = SparseMatBuilder::new(2);
builder.set(0, 0, 4.).unwrap();
builder.set(0, 1, 1.).unwrap();
builder.set(1, 1, 3.).unwrap();
builder.set(1, 0, 1.).unwrap();
let a = builder.close().unwrap();
let b: Vector<f64> = vec![1., 2.].into();
let mut x = Vector::zeros(2);
let stats = ConjugateGradient::new(10, 1e-12).solve(&a, &mut x, &b).unwrap();
assert!(stats.converged());
assert!(stats.iterations() <= 2);
assert!((x[0] - 1. / 11.).abs() < 1e-10);
assert!((x[1] - 7. / 11.).abs() < 1e-10);
```

## Features

- `multi_thread` (default): row loops of the matrix-vector product, the
  residual and the Jacobi sweep run in parallel with `rayon`.
- `serde`: serialization of [`Vector`] and [`SparseMat`]. Deserialized
  matrices are validated.
- `approx`: approximate comparisons of [`Vector`]s.
*/

pub mod dense_vector;
pub mod errors;
pub mod mul_acc;
mod scalar;
pub mod sparse;
mod vector;

pub use crate::errors::{ParseMethodError, SolverError, StructureError};
pub use crate::scalar::Scalar;
pub use crate::sparse::linalg::{
    ConjugateGradient, IterativeSolver, Jacobi, Method, SolveStats, Solver,
    Sor, Ssor, StoppingCriterion, SymmetryCheck,
};
pub use crate::sparse::{RowView, SparseMat, SparseMatBuilder};
pub use crate::vector::Vector;

/// Solver modules, reexported at the crate root for convenience
pub use crate::sparse::linalg;
