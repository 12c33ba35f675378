//! Iterative solvers for `A x = b`
//!
//! Four methods are provided: [`Jacobi`], [`Sor`] (successive
//! over-relaxation, Gauss-Seidel for `omega = 1`), [`Ssor`] (symmetric SOR)
//! and [`ConjugateGradient`]. They share the [`IterativeSolver`] interface,
//! and the [`Solver`] enum selects one of them at run time, for instance from
//! a [`Method`] parsed out of a command line.
//!
//! ```rust
//! use lisol::{IterativeSolver, Method, Solver, SparseMatBuilder, Vector};
//!
//! let mut builder = SparseMatBuilder::new(4);
//! for i in 0..4 {
//!     builder.set(i, i, 4.).unwrap();
//!     if i > 0 {
//!         builder.set(i, i - 1, -1.).unwrap();
//!     }
//!     if i < 3 {
//!         builder.set(i, i + 1, -1.).unwrap();
//!     }
//! }
//! let a = builder.close().unwrap();
//! let b: Vector<f64> = vec![3., 2., 2., 3.].into();
//!
//! let method: Method = "ssor".parse().unwrap();
//! let solver = Solver::new(method, 100, 1e-10, 1.2);
//! let mut x = Vector::zeros(4);
//! let stats = solver.solve(&a, &mut x, &b).unwrap();
//! assert!(stats.converged());
//! for xi in x.iter() {
//!     assert!((xi - 1.).abs() < 1e-8);
//! }
//! ```

use std::fmt;
use std::str::FromStr;

use crate::errors::{ParseMethodError, SolverError};
use crate::sparse::SparseMat;
use crate::{Scalar, Vector};

/// Generates the configuration methods common to every solver
macro_rules! solver_settings_impl {
    ($Solver: ident) => {
        impl<T: $crate::Scalar> $Solver<T> {
            /// Select how the residual norm is compared to the tolerance
            pub fn with_criterion(
                mut self,
                criterion: $crate::StoppingCriterion,
            ) -> Self {
                self.settings.criterion = criterion;
                self
            }

            /// Keep the residual of every iteration in the returned
            /// statistics
            pub fn record_history(mut self, record: bool) -> Self {
                self.settings.record_history = record;
                self
            }

            pub fn criterion(&self) -> $crate::StoppingCriterion {
                self.settings.criterion
            }
        }
    };
}

pub mod cg;
pub mod criterion;
pub mod jacobi;
pub mod sor;
pub mod ssor;

pub use self::cg::ConjugateGradient;
pub use self::criterion::{SolveStats, StoppingCriterion};
pub use self::jacobi::Jacobi;
pub use self::sor::Sor;
pub use self::ssor::Ssor;

/// Common interface of the iterative solvers.
pub trait IterativeSolver<T: Scalar> {
    /// Solve `a x = b`, using the content of `x` as the initial guess and
    /// overwriting it with the approximate solution.
    ///
    /// Neither `a` nor `b` is modified. Running out of iterations is
    /// reported through [`SolveStats::converged`], not as an error.
    fn solve(
        &self,
        a: &SparseMat<T>,
        x: &mut Vector<T>,
        b: &Vector<T>,
    ) -> Result<SolveStats<T>, SolverError>;

    /// Short lowercase name of the method
    fn name(&self) -> &'static str;

    /// Iteration budget
    fn max_iter(&self) -> usize;

    fn tolerance(&self) -> T;
}

/// Whether a solver should verify the symmetry of the matrix before
/// solving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SymmetryCheck {
    CheckSymmetry,
    #[default]
    DontCheckSymmetry,
}

/// The available methods, by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Jacobi,
    Sor,
    Ssor,
    Cg,
}

impl Method {
    pub const ALL: [Method; 4] =
        [Method::Jacobi, Method::Sor, Method::Ssor, Method::Cg];

    pub fn name(self) -> &'static str {
        match self {
            Method::Jacobi => "jacobi",
            Method::Sor => "sor",
            Method::Ssor => "ssor",
            Method::Cg => "cg",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Method {
    type Err = ParseMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Method::ALL
            .into_iter()
            .find(|method| method.name() == lower)
            .ok_or_else(|| ParseMethodError(s.to_string()))
    }
}

/// One of the four solvers, chosen at run time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Solver<T> {
    Jacobi(Jacobi<T>),
    Sor(Sor<T>),
    Ssor(Ssor<T>),
    Cg(ConjugateGradient<T>),
}

impl<T: Scalar> Solver<T> {
    /// Build the solver for `method`. `omega` is only used by the SOR
    /// variants.
    pub fn new(
        method: Method,
        max_iter: usize,
        tolerance: T,
        omega: T,
    ) -> Self {
        match method {
            Method::Jacobi => Solver::Jacobi(Jacobi::new(max_iter, tolerance)),
            Method::Sor => Solver::Sor(Sor::new(max_iter, tolerance, omega)),
            Method::Ssor => Solver::Ssor(Ssor::new(max_iter, tolerance, omega)),
            Method::Cg => {
                Solver::Cg(ConjugateGradient::new(max_iter, tolerance))
            }
        }
    }

    pub fn method(&self) -> Method {
        match self {
            Solver::Jacobi(_) => Method::Jacobi,
            Solver::Sor(_) => Method::Sor,
            Solver::Ssor(_) => Method::Ssor,
            Solver::Cg(_) => Method::Cg,
        }
    }

    pub fn with_criterion(self, criterion: StoppingCriterion) -> Self {
        match self {
            Solver::Jacobi(s) => Solver::Jacobi(s.with_criterion(criterion)),
            Solver::Sor(s) => Solver::Sor(s.with_criterion(criterion)),
            Solver::Ssor(s) => Solver::Ssor(s.with_criterion(criterion)),
            Solver::Cg(s) => Solver::Cg(s.with_criterion(criterion)),
        }
    }

    pub fn record_history(self, record: bool) -> Self {
        match self {
            Solver::Jacobi(s) => Solver::Jacobi(s.record_history(record)),
            Solver::Sor(s) => Solver::Sor(s.record_history(record)),
            Solver::Ssor(s) => Solver::Ssor(s.record_history(record)),
            Solver::Cg(s) => Solver::Cg(s.record_history(record)),
        }
    }

    fn inner(&self) -> &dyn IterativeSolver<T> {
        match self {
            Solver::Jacobi(s) => s,
            Solver::Sor(s) => s,
            Solver::Ssor(s) => s,
            Solver::Cg(s) => s,
        }
    }
}

impl<T: Scalar> IterativeSolver<T> for Solver<T> {
    fn solve(
        &self,
        a: &SparseMat<T>,
        x: &mut Vector<T>,
        b: &Vector<T>,
    ) -> Result<SolveStats<T>, SolverError> {
        self.inner().solve(a, x, b)
    }

    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn max_iter(&self) -> usize {
        self.inner().max_iter()
    }

    fn tolerance(&self) -> T {
        self.inner().tolerance()
    }
}

/// Parameters shared by every solver
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Settings<T> {
    pub(crate) max_iter: usize,
    pub(crate) tolerance: T,
    pub(crate) criterion: StoppingCriterion,
    pub(crate) record_history: bool,
}

impl<T: Scalar> Settings<T> {
    pub(crate) fn new(max_iter: usize, tolerance: T) -> Self {
        Self {
            max_iter,
            tolerance,
            criterion: StoppingCriterion::default(),
            record_history: false,
        }
    }

    fn validate(&self) -> Result<(), SolverError> {
        if self.max_iter == 0 {
            return Err(SolverError::invalid_parameter(
                "max_iter",
                self.max_iter,
                "at least 1",
            ));
        }
        if !(self.tolerance.is_finite() && self.tolerance > T::zero()) {
            return Err(SolverError::invalid_parameter(
                "tolerance",
                self.tolerance,
                "positive and finite",
            ));
        }
        Ok(())
    }
}

/// Checks run by every solver before iterating.
pub(crate) fn check_problem<T: Scalar>(
    settings: &Settings<T>,
    a: &SparseMat<T>,
    x: &Vector<T>,
    b: &Vector<T>,
) -> Result<(), SolverError> {
    settings.validate()?;
    if x.len() != a.dim() || b.len() != a.dim() {
        return Err(SolverError::DimensionMismatch {
            matrix: a.dim(),
            x: x.len(),
            b: b.len(),
        });
    }
    Ok(())
}

pub(crate) fn check_omega<T: Scalar>(omega: T) -> Result<(), SolverError> {
    let two = T::one() + T::one();
    if omega > T::zero() && omega < two {
        Ok(())
    } else {
        Err(SolverError::invalid_parameter("omega", omega, "in (0, 2)"))
    }
}

/// Inverse of the diagonal entries, failing on a pivot that is zero or
/// negligible relative to the rest of its row.
pub(crate) fn inverse_diagonal<T: Scalar>(
    a: &SparseMat<T>,
) -> Result<Vec<T>, SolverError> {
    a.row_iter()
        .map(|row| {
            let diag = row.diag();
            if diag.abs() <= T::epsilon() * row.max_abs() || diag.is_nan() {
                tracing::warn!("zero pivot in row {}", row.row());
                Err(SolverError::ZeroPivot { row: row.row() })
            } else {
                Ok(T::one() / diag)
            }
        })
        .collect()
}
