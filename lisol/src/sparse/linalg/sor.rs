//! Successive over-relaxation
//!
//! Rows are visited in increasing order. The Gauss-Seidel value of row `i`
//! uses the already updated unknowns `x[j], j < i`, and is blended with the
//! previous value:
//!
//! ```text
//! x[i] = (1 - omega) x[i] + omega (b[i] - sum_{j != i} a_ij x[j]) / a_ii
//! ```
//!
//! `omega = 1` is Gauss-Seidel. The sweep is inherently sequential.

use crate::errors::SolverError;
use crate::sparse::linalg::{
    check_omega, check_problem, criterion::Monitor, inverse_diagonal,
    IterativeSolver, Settings, SolveStats,
};
use crate::sparse::SparseMat;
use crate::{Scalar, Vector};

/// SOR solver configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sor<T> {
    settings: Settings<T>,
    omega: T,
}

impl<T: Scalar> Sor<T> {
    /// `omega` must lie in `(0, 2)`, which is checked when solving.
    pub fn new(max_iter: usize, tolerance: T, omega: T) -> Self {
        Self {
            settings: Settings::new(max_iter, tolerance),
            omega,
        }
    }

    /// Gauss-Seidel, SOR without relaxation
    pub fn gauss_seidel(max_iter: usize, tolerance: T) -> Self {
        Self::new(max_iter, tolerance, T::one())
    }

    pub fn omega(&self) -> T {
        self.omega
    }
}

solver_settings_impl!(Sor);

/// In place relaxation sweep over `rows`, in the given order.
pub(crate) fn sor_sweep<T, I>(
    a: &SparseMat<T>,
    x: &mut [T],
    b: &[T],
    inv_diag: &[T],
    omega: T,
    rows: I,
) where
    T: Scalar,
    I: Iterator<Item = usize>,
{
    let keep = T::one() - omega;
    for i in rows {
        let gs = (b[i] - a.row(i).off_diag_dot(x)) * inv_diag[i];
        x[i] = keep * x[i] + omega * gs;
    }
}

impl<T: Scalar> IterativeSolver<T> for Sor<T> {
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
        for iter in 0..self.settings.max_iter {
            if monitor.check(iter, a.residual_norm(x, b))? {
                return Ok(monitor.finish(iter, true));
            }
            sor_sweep(a, x, b, &inv_diag, self.omega, 0..a.dim());
        }
        let res = a.residual_norm(x, b);
        let converged = monitor.check(self.settings.max_iter, res)?;
        Ok(monitor.finish(self.settings.max_iter, converged))
    }

    fn name(&self) -> &'static str {
        "sor"
    }

    fn max_iter(&self) -> usize {
        self.settings.max_iter
    }

    fn tolerance(&self) -> T {
        self.settings.tolerance
    }
}

#[cfg(test)]
mod test {
    use super::Sor;
    use crate::errors::SolverError;
    use crate::sparse::linalg::IterativeSolver;
    use crate::{SparseMat, SparseMatBuilder, Vector};

    /// 5-point Laplacian on an `m x m` grid of unknowns
    fn laplacian(m: usize) -> SparseMat<f64> {
        let mut builder = SparseMatBuilder::with_capacity(m * m, 5);
        for j in 0..m {
            for i in 0..m {
                let c = i + j * m;
                builder.set(c, c, 4.).unwrap();
                if i > 0 {
                    builder.set(c, c - 1, -1.).unwrap();
                }
                if i + 1 < m {
                    builder.set(c, c + 1, -1.).unwrap();
                }
                if j > 0 {
                    builder.set(c, c - m, -1.).unwrap();
                }
                if j + 1 < m {
                    builder.set(c, c + m, -1.).unwrap();
                }
            }
        }
        builder.close().unwrap()
    }

    #[test]
    fn tridiagonal_4x4() {
        let mut builder = SparseMatBuilder::new(4);
        for i in 0..4 {
            builder.set(i, i, 4.).unwrap();
            if i > 0 {
                builder.set(i, i - 1, -1.).unwrap();
            }
            if i < 3 {
                builder.set(i, i + 1, -1.).unwrap();
            }
        }
        let a = builder.close().unwrap();
        let b: Vector<f64> = vec![3., 2., 2., 3.].into();
        for omega in [1., 1.2] {
            let mut x = Vector::zeros(4);
            let stats =
                Sor::new(100, 1e-8, omega).solve(&a, &mut x, &b).unwrap();
            assert!(stats.converged());
            assert!(stats.iterations() < 20);
            assert!(x.iter().all(|xi| (xi - 1.).abs() < 1e-6));
        }
    }

    #[test]
    fn residual_is_monotone() {
        let a = laplacian(5);
        let b = Vector::from_elem(25, 1.);
        let mut iterations = Vec::new();
        for omega in [1., 1.2, 1.5] {
            let mut x = Vector::zeros(25);
            let stats = Sor::new(500, 1e-8, omega)
                .record_history(true)
                .solve(&a, &mut x, &b)
                .unwrap();
            assert!(stats.converged());
            let history = stats.history().unwrap();
            assert!(history.windows(2).all(|w| w[1] <= w[0]));
            iterations.push(stats.iterations());
        }
        // over-relaxation pays off on the Laplacian
        assert!(iterations[2] < iterations[1]);
        assert!(iterations[1] < iterations[0]);
    }

    #[test]
    fn gauss_seidel_beats_jacobi() {
        use crate::sparse::linalg::Jacobi;
        let a = laplacian(5);
        let b = Vector::from_elem(25, 1.);
        let mut x = Vector::zeros(25);
        let gs = Sor::gauss_seidel(500, 1e-8).solve(&a, &mut x, &b).unwrap();
        let mut x = Vector::zeros(25);
        let jac = Jacobi::new(500, 1e-8).solve(&a, &mut x, &b).unwrap();
        assert!(gs.iterations() < jac.iterations());
    }

    #[test]
    fn resolve_is_immediate() {
        let a = laplacian(4);
        let b = Vector::from_elem(16, 1.);
        let mut x = Vector::zeros(16);
        let solver = Sor::new(500, 1e-9, 1.3);
        solver.solve(&a, &mut x, &b).unwrap();
        let first = x.clone();
        let stats = solver.solve(&a, &mut x, &b).unwrap();
        assert_eq!(stats.iterations(), 0);
        assert_eq!(x, first);
    }

    #[test]
    fn omega_out_of_range() {
        let a = laplacian(2);
        let b = Vector::from_elem(4, 1.);
        let mut x = Vector::zeros(4);
        for omega in [0., 2., -0.5, 2.5] {
            match Sor::new(10, 1e-6, omega).solve(&a, &mut x, &b) {
                Err(SolverError::InvalidParameter { name, .. }) => {
                    assert_eq!(name, "omega")
                }
                other => panic!("unexpected {:?}", other),
            }
        }
    }
}
