/*!
# lisol-bvp

Finite difference boundary value problems, solved with the iterative
solvers of [`lisol`].

The main problem is the Poisson equation on a rectangle with Dirichlet
boundary conditions,

```text
-laplace(u) = f   in (xmin, xmax) x (ymin, ymax)
         u = g   on the boundary
```

discretized with the 5-point stencil on a uniform grid. Boundary rows of
the matrix are decoupled, so every solver sees a square system with one
unknown per node.

```rust
use lisol::{IterativeSolver, Method, Solver};
use lisol_bvp::{
    assemble_poisson_2d, default_omega, max_error, Domain, Grid2d, SineProblem,
};

let grid = Grid2d::new(11, 11, Domain::default()).unwrap();
let system = assemble_poisson_2d(&grid, &SineProblem).unwrap();
let solver = Solver::new(Method::Sor, 1000, 1e-8, default_omega(&grid));
let mut u = system.initial_guess.clone();
let stats = solver.solve(&system.matrix, &mut u, &system.rhs).unwrap();
assert!(stats.converged());
assert!(max_error(&grid, &SineProblem, &u).unwrap() < 0.05);
```

The [`refine`] module measures the order of accuracy of the 1D analogue
on a sequence of grids.
*/

pub mod assemble;
pub mod grid;
pub mod output;
pub mod problem;
pub mod refine;

pub use crate::assemble::{assemble_poisson_2d, default_omega, LinearSystem};
pub use crate::grid::{Domain, Grid2d};
pub use crate::output::{max_error, save_solution, write_solution};
pub use crate::problem::{FnProblem, Problem2d, SineProblem};
pub use crate::refine::{
    refinement_study, solve_poisson_1d, RefinementRow, RefinementStudy,
};

use lisol::{SolverError, StructureError};

/// Errors raised while setting up or solving a boundary value problem
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BvpError {
    #[error("a grid needs at least 2 nodes per direction, got {nx}x{ny}")]
    GridTooSmall { nx: usize, ny: usize },
    #[error("empty interval [{min}, {max}] along {axis}")]
    EmptyDomain {
        axis: &'static str,
        min: f64,
        max: f64,
    },
    #[error(transparent)]
    Structure(#[from] StructureError),
    #[error(transparent)]
    Solver(#[from] SolverError),
}
