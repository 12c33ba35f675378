//! Stopping criteria and the statistics reported by a solve.

use crate::errors::SolverError;
use crate::Scalar;

/// What the residual norm `||b - A x||` is compared against.
///
/// A solve stops when `||r|| <= tol * reference`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StoppingCriterion {
    /// `reference = ||b||`, or 1 when `b` is zero.
    ///
    /// For a zero initial guess this is the same as
    /// [`StoppingCriterion::RelativeToInitial`]. For any other guess, solving
    /// an already converged system again returns immediately.
    #[default]
    RelativeToRhs,
    /// `reference = ||r_0||`, the residual of the initial guess. An exact
    /// initial guess is accepted without iterating.
    RelativeToInitial,
    /// `reference = 1`
    Absolute,
}

/// Outcome of an iterative solve.
///
/// Running out of iterations is not an error of the solve itself: it shows
/// up as `converged() == false` with `iterations() == max_iter`. Use
/// [`SolveStats::into_result`] to turn it into one.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveStats<T> {
    iterations: usize,
    residual: T,
    converged: bool,
    history: Option<Vec<T>>,
}

impl<T: Scalar> SolveStats<T> {
    /// Number of sweeps or steps performed
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Final residual norm, divided by the reference of the criterion
    pub fn residual(&self) -> T {
        self.residual
    }

    pub fn converged(&self) -> bool {
        self.converged
    }

    /// Relative residual norm before each iteration, then the final one.
    ///
    /// Only available when the solver was configured with
    /// `record_history(true)`.
    pub fn history(&self) -> Option<&[T]> {
        self.history.as_deref()
    }

    /// Fail with [`SolverError::NotConverged`] if the tolerance was not
    /// reached.
    pub fn into_result(self) -> Result<Self, SolverError> {
        if self.converged {
            Ok(self)
        } else {
            Err(SolverError::NotConverged {
                iterations: self.iterations,
                residual: self.residual.as_f64(),
            })
        }
    }
}

/// Convergence bookkeeping shared by the solvers
pub(crate) struct Monitor<T> {
    name: &'static str,
    criterion: StoppingCriterion,
    tolerance: T,
    reference: Option<T>,
    last: T,
    history: Option<Vec<T>>,
}

impl<T: Scalar> Monitor<T> {
    pub(crate) fn new(
        name: &'static str,
        settings: &super::Settings<T>,
        rhs_norm: T,
    ) -> Self {
        let reference = match settings.criterion {
            StoppingCriterion::RelativeToRhs => Some(non_zero(rhs_norm)),
            StoppingCriterion::RelativeToInitial => None,
            StoppingCriterion::Absolute => Some(T::one()),
        };
        tracing::debug!(
            "{}: max_iter={}, tol={:e}, criterion={:?}",
            name,
            settings.max_iter,
            settings.tolerance.as_f64(),
            settings.criterion
        );
        Self {
            name,
            criterion: settings.criterion,
            tolerance: settings.tolerance,
            reference,
            last: T::infinity(),
            history: settings.record_history.then(Vec::new),
        }
    }

    /// Record the residual norm reached after `iteration` iterations and
    /// tell whether it satisfies the criterion.
    pub(crate) fn check(
        &mut self,
        iteration: usize,
        res_norm: T,
    ) -> Result<bool, SolverError> {
        if !res_norm.is_finite() {
            tracing::warn!(
                "{}: non-finite residual at iteration {}",
                self.name,
                iteration
            );
            return Err(SolverError::NonFinite { iteration });
        }
        let reference =
            *self.reference.get_or_insert_with(|| non_zero(res_norm));
        self.last = res_norm / reference;
        if let Some(history) = self.history.as_mut() {
            history.push(self.last);
        }
        tracing::trace!(
            "{}: iteration {}, residual {:e}",
            self.name,
            iteration,
            self.last.as_f64()
        );
        Ok(self.last <= self.tolerance)
    }

    pub(crate) fn finish(
        self,
        iterations: usize,
        converged: bool,
    ) -> SolveStats<T> {
        if converged {
            tracing::debug!(
                "{}: converged after {} iterations, residual {:e}",
                self.name,
                iterations,
                self.last.as_f64()
            );
        } else {
            tracing::warn!(
                "{}: no convergence after {} iterations ({:?}), residual {:e}",
                self.name,
                iterations,
                self.criterion,
                self.last.as_f64()
            );
        }
        SolveStats {
            iterations,
            residual: self.last,
            converged,
            history: self.history,
        }
    }
}

fn non_zero<T: Scalar>(norm: T) -> T {
    if norm > T::zero() {
        norm
    } else {
        T::one()
    }
}
