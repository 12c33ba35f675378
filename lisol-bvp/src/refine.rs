//! Grid refinement study on the 1D model problem
//!
//! `-u'' = sin(x)` on `[0, 2 pi]` with `u(0) = u(2 pi) = 0`, whose solution is
//! `u = sin(x)`. The 3-point scheme is second order accurate, so halving `h`
//! should divide the maximum error by about 4.

use std::f64::consts::PI;
use std::fmt;

use lisol::{IterativeSolver, SparseMatBuilder, Vector};

use crate::BvpError;

/// Result of the 1D solve on one grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefinementRow {
    /// Number of nodes, boundary included
    pub n: usize,
    pub h: f64,
    /// Maximum nodal error
    pub error: f64,
    pub iterations: usize,
    /// `log(e_prev / e) / log 2`, none for the coarsest grid
    pub rate: Option<f64>,
}

/// Solve the 1D problem on `n` nodes and return `(h, max_error, iterations)`.
///
/// Fails if the solver does not reach its tolerance, since the error would
/// then measure the solver rather than the discretization.
pub fn solve_poisson_1d<S>(
    n: usize,
    solver: &S,
) -> Result<(f64, f64, usize), BvpError>
where
    S: IterativeSolver<f64> + ?Sized,
{
    if n < 2 {
        return Err(BvpError::GridTooSmall { nx: n, ny: 1 });
    }
    let (xmin, xmax) = (0., 2. * PI);
    let h = (xmax - xmin) / (n - 1) as f64;
    let x = |i: usize| xmin + i as f64 * h;
    let diag = 2. / (h * h);
    let off = -1. / (h * h);

    let mut builder = SparseMatBuilder::with_capacity(n, 3);
    for i in 0..n {
        builder.set(i, i, diag)?;
        if i > 0 {
            builder.set(i, i - 1, off)?;
        }
        if i + 1 < n {
            builder.set(i, i + 1, off)?;
        }
    }
    let mut a = builder.close()?;

    let mut u = Vector::zeros(n);
    let mut b: Vector<f64> = (0..n).map(|i| x(i).sin()).collect();
    for i in [0, n - 1] {
        u[i] = x(i).sin();
        b[i] = diag * u[i];
        a.zero_off_diag(i);
    }

    let stats = solver.solve(&a, &mut u, &b)?.into_result()?;
    let error = (0..n)
        .map(|i| (u[i] - x(i).sin()).abs())
        .fold(0., f64::max);
    tracing::debug!(
        "n={}: h={:.3e}, error={:.4e}, {} iterations",
        n,
        h,
        error,
        stats.iterations()
    );
    Ok((h, error, stats.iterations()))
}

/// Errors and observed convergence rates on a sequence of grids
#[derive(Debug, Clone, PartialEq)]
pub struct RefinementStudy {
    method: &'static str,
    rows: Vec<RefinementRow>,
}

impl RefinementStudy {
    pub fn rows(&self) -> &[RefinementRow] {
        &self.rows
    }

    /// Name of the solver used
    pub fn method(&self) -> &'static str {
        self.method
    }
}

/// Solve the 1D problem for every size in `sizes`, typically doubling.
pub fn refinement_study<S>(
    sizes: &[usize],
    solver: &S,
) -> Result<RefinementStudy, BvpError>
where
    S: IterativeSolver<f64> + ?Sized,
{
    let mut rows: Vec<RefinementRow> = Vec::with_capacity(sizes.len());
    for &n in sizes {
        let (h, error, iterations) = solve_poisson_1d(n, solver)?;
        let rate = rows
            .last()
            .map(|prev| (prev.error / error).ln() / 2f64.ln());
        rows.push(RefinementRow {
            n,
            h,
            error,
            iterations,
            rate,
        });
    }
    Ok(RefinementStudy {
        method: solver.name(),
        rows,
    })
}

impl fmt::Display for RefinementStudy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>6}  {:>6}  {:>10}  {:>5}  {:>10}",
            "n", "h", "error", "rate", "iterations"
        )?;
        for row in &self.rows {
            let rate = match row.rate {
                Some(rate) => format!("{:.2}", rate),
                None => "---".to_string(),
            };
            writeln!(
                f,
                "{:>6}  {:>6.3}  {:>10.4e}  {:>5}  {:>10}",
                row.n, row.h, row.error, rate, row.iterations
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::{refinement_study, solve_poisson_1d};
    use crate::BvpError;
    use lisol::{ConjugateGradient, Jacobi, Ssor};

    #[test]
    fn second_order() {
        let solver = ConjugateGradient::new(1000, 1e-12);
        let study = refinement_study(&[20, 40, 80], &solver).unwrap();
        assert_eq!(study.method(), "cg");
        let rows = study.rows();
        assert_eq!(rows.len(), 3);
        assert!(rows[0].rate.is_none());
        for row in &rows[1..] {
            let rate = row.rate.unwrap();
            assert!(rate > 1.9 && rate < 2.3, "rate {}", rate);
        }
        assert!((rows[0].error - 9.132e-3).abs() < 1e-5);
        // n - 2 unknowns, so n - 2 CG steps at most
        assert!(rows.iter().all(|row| row.iterations <= row.n - 2));
    }

    #[test]
    fn ssor_matches_cg() {
        let (_, cg_err, _) =
            solve_poisson_1d(30, &ConjugateGradient::new(100, 1e-12)).unwrap();
        let (_, ssor_err, _) =
            solve_poisson_1d(30, &Ssor::new(5000, 1e-12, 1.8)).unwrap();
        assert!((cg_err - ssor_err).abs() < 1e-8);
    }

    #[test]
    fn not_converged_is_an_error() {
        let res = solve_poisson_1d(100, &Jacobi::new(10, 1e-12));
        assert!(matches!(
            res,
            Err(BvpError::Solver(lisol::SolverError::NotConverged { .. }))
        ));
        assert!(solve_poisson_1d(1, &Jacobi::new(10, 1e-12)).is_err());
    }

    #[test]
    fn table() {
        let solver = ConjugateGradient::new(1000, 1e-12);
        let study = refinement_study(&[10, 20], &solver).unwrap();
        let text = study.to_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("rate"));
        assert!(lines[1].contains("---"));
        assert!(lines[2].contains("2.17"));
    }
}
