//! Jacobi iteration
//!
//! Every unknown is updated from the previous iterate only:
//!
//! ```text
//! x_new[i] = (b[i] - sum_{j != i} a_ij x[j]) / a_ii
//! ```
//!
//! The residual of the current iterate is accumulated during the same pass
//! over the matrix, so an iteration costs a single traversal. The rows are
//! independent, and processed in parallel with the `multi_thread` feature.
//! Convergence is guaranteed for strictly diagonally dominant matrices.

use crate::errors::SolverError;
use crate::sparse::linalg::{
    check_problem, criterion::Monitor, inverse_diagonal, IterativeSolver,
    Settings, SolveStats,
};
use crate::sparse::SparseMat;
use crate::{Scalar, Vector};

/// Jacobi solver configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Jacobi<T> {
    settings: Settings<T>,
}

impl<T: Scalar> Jacobi<T> {
    pub fn new(max_iter: usize, tolerance: T) -> Self {
        Self {
            settings: Settings::new(max_iter, tolerance),
        }
    }
}

solver_settings_impl!(Jacobi);

/// Write the Jacobi update of `x` into `x_new` and return the residual norm
/// of `x`.
fn sweep<T: Scalar>(
    a: &SparseMat<T>,
    x: &[T],
    b: &[T],
    inv_diag: &[T],
    x_new: &mut [T],
) -> T {
    let update = |i: usize, xi_new: &mut T| {
        let row = a.row(i);
        let sigma = row.off_diag_dot(x);
        let ri = b[i] - sigma - row.diag() * x[i];
        *xi_new = (b[i] - sigma) * inv_diag[i];
        ri * ri
    };
    #[cfg(feature = "multi_thread")]
    let sq = {
        use rayon::prelude::*;
        x_new
            .par_iter_mut()
            .enumerate()
            .map(|(i, xi_new)| update(i, xi_new))
            .reduce(T::zero, |a, b| a + b)
    };
    #[cfg(not(feature = "multi_thread"))]
    let sq = x_new
        .iter_mut()
        .enumerate()
        .fold(T::zero(), |acc, (i, xi_new)| acc + update(i, xi_new));
    sq.sqrt()
}

impl<T: Scalar> IterativeSolver<T> for Jacobi<T> {
    fn solve(
        &self,
        a: &SparseMat<T>,
        x: &mut Vector<T>,
        b: &Vector<T>,
    ) -> Result<SolveStats<T>, SolverError> {
        check_problem(&self.settings, a, x, b)?;
        let inv_diag = inverse_diagonal(a)?;
        let mut monitor =
            Monitor::new(self.name(), &self.settings, b.l2_norm());
        let mut x_new = Vector::zeros(a.dim());
        for iter in 0..self.settings.max_iter {
            let res = sweep(a, x, b, &inv_diag, &mut x_new);
            if monitor.check(iter, res)? {
                // x_new is one sweep ahead of the converged iterate
                return Ok(monitor.finish(iter, true));
            }
            std::mem::swap(x, &mut x_new);
        }
        let res = a.residual_norm(x, b);
        let converged = monitor.check(self.settings.max_iter, res)?;
        Ok(monitor.finish(self.settings.max_iter, converged))
    }

    fn name(&self) -> &'static str {
        "jacobi"
    }

    fn max_iter(&self) -> usize {
        self.settings.max_iter
    }

    fn tolerance(&self) -> T {
        self.settings.tolerance
    }
}
