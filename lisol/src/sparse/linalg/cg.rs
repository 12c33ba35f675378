//! Conjugate gradient method for symmetric positive definite matrices
//!
//! Plain, un-preconditioned CG:
//!
//! ```text
//! r = b - A x, p = r
//! loop:
//!     alpha = (r . r) / (p . A p)
//!     x += alpha p
//!     r -= alpha A p
//!     beta = (r_new . r_new) / (r . r)
//!     p = r_new + beta p
//! ```
//!
//! The tolerance is checked on the recurrence residual after every update.
//! In exact arithmetic, an `n x n` SPD system is solved in at most `n`
//! iterations.
//!
//! Symmetry is not verified by default: a Dirichlet boundary row decoupled
//! with [`SparseMat::zero_off_diag`] breaks the symmetry of the matrix.
//! Before iterating, every row without a nonzero off-diagonal entry is
//! solved directly, `x_i = b_i / a_ii`. The residual and search direction
//! then vanish on those rows and CG only sees the symmetric interior
//! block, whatever the initial guess held there. Use
//! [`SymmetryCheck::CheckSymmetry`] to verify symmetry up front.
//!
//! # References
//!
//! ```text
//! J. R. Shewchuk,
//! "An Introduction to the Conjugate Gradient Method Without the
//! Agonizing Pain",
//! Carnegie Mellon University, 1994.
//! ```

use crate::errors::SolverError;
use crate::sparse::linalg::{
    check_problem, criterion::Monitor, IterativeSolver, Settings, SolveStats,
    SymmetryCheck,
};
use crate::sparse::SparseMat;
use crate::{Scalar, Vector};

/// Conjugate gradient solver configuration
///
/// The matrix must be symmetric positive definite, apart from rows that
/// only hold their diagonal. Those rows are pinned to `b_i / a_ii` in `x`
/// before the first residual is computed, so a Dirichlet-decoupled system
/// converges from any initial guess, including zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConjugateGradient<T> {
    settings: Settings<T>,
    check_symmetry: SymmetryCheck,
}

impl<T: Scalar> ConjugateGradient<T> {
    pub fn new(max_iter: usize, tolerance: T) -> Self {
        Self {
            settings: Settings::new(max_iter, tolerance),
            check_symmetry: SymmetryCheck::default(),
        }
    }

    pub fn with_symmetry_check(mut self, check: SymmetryCheck) -> Self {
        self.check_symmetry = check;
        self
    }

    pub fn symmetry_check(&self) -> SymmetryCheck {
        self.check_symmetry
    }
}

solver_settings_impl!(ConjugateGradient);

impl<T: Scalar> IterativeSolver<T> for ConjugateGradient<T> {
    fn solve(
        &self,
        a: &SparseMat<T>,
        x: &mut Vector<T>,
        b: &Vector<T>,
    ) -> Result<SolveStats<T>, SolverError> {
        check_problem(&self.settings, a, x, b)?;
        if self.check_symmetry == SymmetryCheck::CheckSymmetry {
            let scale = a.data().iter().fold(T::zero(), |m, v| m.max(v.abs()));
            let tol = T::epsilon() * T::from_f64(16.) * scale;
            if !a.is_symmetric(tol) {
                return Err(SolverError::NotSymmetric);
            }
        }
        let n = a.dim();
        let mut monitor =
            Monitor::new(self.name(), &self.settings, b.l2_norm());

        pin_decoupled_rows(a, x, b);
        let mut r = Vector::zeros(n);
        let res = a.residual(x, b, &mut r)?;
        if monitor.check(0, res)? {
            return Ok(monitor.finish(0, true));
        }
        let mut p = r.clone();
        let mut ap = Vector::zeros(n);
        let mut rr = r.squared_l2_norm();

        for iter in 1..=self.settings.max_iter {
            a.multiply(&p, &mut ap)?;
            let pap = p.dot(&ap);
            if !pap.is_finite() {
                tracing::warn!("cg: p.Ap is not finite at iteration {}", iter);
                return Err(SolverError::NonFinite { iteration: iter });
            }
            if pap <= T::zero() {
                tracing::warn!(
                    "cg: p.Ap = {:e} at iteration {}",
                    pap.as_f64(),
                    iter
                );
                return Err(SolverError::NotPositiveDefinite {
                    iteration: iter,
                });
            }
            let alpha = rr / pap;
            x.axpy(alpha, &p);
            r.axpy(-alpha, &ap);
            let rr_new = r.squared_l2_norm();
            if monitor.check(iter, rr_new.sqrt())? {
                return Ok(monitor.finish(iter, true));
            }
            let beta = rr_new / rr;
            rr = rr_new;
            p *= beta;
            p += &r;
        }
        Ok(monitor.finish(self.settings.max_iter, false))
    }

    fn name(&self) -> &'static str {
        "cg"
    }

    fn max_iter(&self) -> usize {
        self.settings.max_iter
    }

    fn tolerance(&self) -> T {
        self.settings.tolerance
    }
}

/// Solve the rows of `a` that have no nonzero off-diagonal entry.
fn pin_decoupled_rows<T: Scalar>(
    a: &SparseMat<T>,
    x: &mut Vector<T>,
    b: &Vector<T>,
) {
    let mut pinned = 0usize;
    for row in a.row_iter() {
        let diag = row.diag();
        if diag != T::zero() && row.off_diag().all(|(_, v)| v == T::zero()) {
            x[row.row()] = b[row.row()] / diag;
            pinned += 1;
        }
    }
    tracing::trace!("cg: pinned {} decoupled rows", pinned);
}
