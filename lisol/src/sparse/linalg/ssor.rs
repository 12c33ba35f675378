//! Symmetric successive over-relaxation
//!
//! One iteration is a forward SOR sweep (increasing row order) followed by a
//! backward sweep (decreasing row order) with the same `omega`.

use crate::errors::SolverError;
use crate::sparse::linalg::{
    check_omega, check_problem, criterion::Monitor, inverse_diagonal,
    sor::sor_sweep, IterativeSolver, Settings, SolveStats,
};
use crate::sparse::SparseMat;
use crate::{Scalar, Vector};

/// SSOR solver configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ssor<T> {
    settings: Settings<T>,
    omega: T,
}

impl<T: Scalar> Ssor<T> {
    /// `omega` must lie in `(0, 2)`, which is checked when solving.
    pub fn new(max_iter: usize, tolerance: T, omega: T) -> Self {
        Self {
            settings: Settings::new(max_iter, tolerance),
            omega,
        }
    }

    pub fn omega(&self) -> T {
        self.omega
    }
}

solver_settings_impl!(Ssor);

impl<T: Scalar> IterativeSolver<T> for Ssor<T> {
    fn solve(
        &self,
        a: &SparseMat<T>,
        x: &mut Vector<T>,
        b: &Vector<T>,
    ) -> Result<SolveStats<T>, SolverError> {
        check_problem(&self.settings, a, x, b)?;
        check_omega(self.omega)?;
        let inv_diag = inverse_diagonal(a)?;
        let mut monitor =
            Monitor::new(self.name(), &self.settings, b.l2_norm());
        let n = a.dim();
        for iter in 0..self.settings.max_iter {
            if monitor.check(iter, a.residual_norm(x, b))? {
                return Ok(monitor.finish(iter, true));
            }
            sor_sweep(a, x, b, &inv_diag, self.omega, 0..n);
            sor_sweep(a, x, b, &inv_diag, self.omega, (0..n).rev());
        }
        let res = a.residual_norm(x, b);
        let converged = monitor.check(self.settings.max_iter, res)?;
        Ok(monitor.finish(self.settings.max_iter, converged))
    }

    fn name(&self) -> &'static str {
        "ssor"
    }

    fn max_iter(&self) -> usize {
        self.settings.max_iter
    }

    fn tolerance(&self) -> T {
        self.settings.tolerance
    }
}
