//! Problem definitions for the 2D Poisson equation `-laplace(u) = f`

use std::f64::consts::PI;

/// Data of a Dirichlet problem
pub trait Problem2d {
    /// `g(x, y)`, the prescribed value on the boundary
    fn boundary_value(&self, x: f64, y: f64) -> f64;

    /// `f(x, y)`, the right hand side of `-laplace(u) = f`
    fn rhs_value(&self, x: f64, y: f64) -> f64;

    /// The exact solution, when it is known
    fn exact(&self, _x: f64, _y: f64) -> Option<f64> {
        None
    }
}

/// Manufactured problem with solution `u = 1 + sin(2 pi x) sin(2 pi y)`,
/// hence `f = 8 pi^2 sin(2 pi x) sin(2 pi y)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SineProblem;

impl SineProblem {
    fn solution(x: f64, y: f64) -> f64 {
        1. + (2. * PI * x).sin() * (2. * PI * y).sin()
    }
}

impl Problem2d for SineProblem {
    fn boundary_value(&self, x: f64, y: f64) -> f64 {
        Self::solution(x, y)
    }

    fn rhs_value(&self, x: f64, y: f64) -> f64 {
        8. * PI * PI * (2. * PI * x).sin() * (2. * PI * y).sin()
    }

    fn exact(&self, x: f64, y: f64) -> Option<f64> {
        Some(Self::solution(x, y))
    }
}

/// Problem given by closures for `g` and `f`, without known solution.
///
/// ```rust
/// use lisol_bvp::{FnProblem, Problem2d};
/// let problem = FnProblem::new(|x, y| x * y, |_, _| 0.);
/// assert_eq!(problem.boundary_value(2., 3.), 6.);
/// assert!(problem.exact(0., 0.).is_none());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FnProblem<G, F> {
    boundary: G,
    rhs: F,
}

impl<G, F> FnProblem<G, F>
where
    G: Fn(f64, f64) -> f64,
    F: Fn(f64, f64) -> f64,
{
    pub fn new(boundary: G, rhs: F) -> Self {
        Self { boundary, rhs }
    }
}

impl<G, F> Problem2d for FnProblem<G, F>
where
    G: Fn(f64, f64) -> f64,
    F: Fn(f64, f64) -> f64,
{
    fn boundary_value(&self, x: f64, y: f64) -> f64 {
        (self.boundary)(x, y)
    }

    fn rhs_value(&self, x: f64, y: f64) -> f64 {
        (self.rhs)(x, y)
    }
}

#[cfg(test)]
mod test {
    use super::{Problem2d, SineProblem};
    use approx::assert_abs_diff_eq;

    #[test]
    fn sine_problem_is_consistent() {
        // -laplace(u) approximated by a fine 5-point stencil matches f
        let p = SineProblem;
        let h = 1e-3;
        let u = |x, y| p.exact(x, y).unwrap();
        for &(x, y) in &[(0.1, 0.2), (0.3, 0.7), (0.55, 0.45)] {
            let lap = (u(x + h, y) + u(x - h, y) + u(x, y + h) + u(x, y - h)
                - 4. * u(x, y))
                / (h * h);
            assert_abs_diff_eq!(-lap, p.rhs_value(x, y), epsilon = 1e-3);
        }
        assert_abs_diff_eq!(p.boundary_value(0., 0.3), 1.);
        assert_abs_diff_eq!(p.boundary_value(0.25, 1.), 1., epsilon = 1e-12);
    }
}
