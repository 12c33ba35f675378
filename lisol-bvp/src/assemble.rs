//! 5-point finite difference discretization of the Poisson equation

use std::f64::consts::PI;

use lisol::{SparseMat, SparseMatBuilder, Vector};

use crate::grid::Grid2d;
use crate::problem::Problem2d;
use crate::BvpError;

/// A discretized problem, ready to be handed to a solver
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSystem {
    pub matrix: SparseMat<f64>,
    pub rhs: Vector<f64>,
    /// Boundary values on boundary nodes, zero in the interior
    pub initial_guess: Vector<f64>,
}

/// Assemble `-laplace(u) = f`, `u = g` on the boundary, on `grid`.
///
/// Interior rows hold the stencil
///
/// ```text
/// a0 u_c + a1 (u_left + u_right) + a2 (u_bottom + u_top) = f(x, y)
/// a0 = 2/dx^2 + 2/dy^2, a1 = -1/dx^2, a2 = -1/dy^2
/// ```
///
/// Boundary rows are decoupled from their neighbours and reduce to
/// `a0 u_c = a0 g(x, y)`. Only rows are decoupled, so the matrix is not
/// symmetric, but the solvers converge on it when started from
/// [`LinearSystem::initial_guess`].
pub fn assemble_poisson_2d<P>(
    grid: &Grid2d,
    problem: &P,
) -> Result<LinearSystem, BvpError>
where
    P: Problem2d + ?Sized,
{
    let (nx, ny) = (grid.nx(), grid.ny());
    let n = grid.num_nodes();
    let a0 = 2. / (grid.dx() * grid.dx()) + 2. / (grid.dy() * grid.dy());
    let a1 = -1. / (grid.dx() * grid.dx());
    let a2 = -1. / (grid.dy() * grid.dy());

    let mut builder = SparseMatBuilder::with_capacity(n, 5);
    for (i, j) in grid.nodes() {
        let c = grid.index(i, j);
        builder.set(c, c, a0)?;
        if i > 0 {
            builder.set(c, c - 1, a1)?;
        }
        if i + 1 < nx {
            builder.set(c, c + 1, a1)?;
        }
        if j > 0 {
            builder.set(c, c - nx, a2)?;
        }
        if j + 1 < ny {
            builder.set(c, c + nx, a2)?;
        }
    }
    let mut matrix = builder.close()?;

    let mut rhs = Vector::zeros(n);
    let mut initial_guess = Vector::zeros(n);
    for (i, j) in grid.nodes() {
        let c = grid.index(i, j);
        let (x, y) = (grid.x(i), grid.y(j));
        if grid.is_boundary(i, j) {
            let g = problem.boundary_value(x, y);
            initial_guess[c] = g;
            rhs[c] = matrix.diag(c) * g;
            matrix.zero_off_diag(c);
        } else {
            rhs[c] = problem.rhs_value(x, y);
        }
    }
    tracing::debug!(
        "assembled {}x{} poisson problem, {} unknowns, nnz={}",
        nx,
        ny,
        n,
        matrix.nnz()
    );
    Ok(LinearSystem {
        matrix,
        rhs,
        initial_guess,
    })
}

/// Relaxation factor `2 / (1 + sin(pi h))`, `h = min(dx, dy)`, optimal for
/// SOR on the Laplacian of a square grid.
pub fn default_omega(grid: &Grid2d) -> f64 {
    let h = grid.dx().min(grid.dy());
    2. / (1. + (PI * h).sin())
}
