//! lisol-bvp - finite difference Poisson problems solved iteratively
//!
//! ## Commands
//!
//! - `lisol-bvp solve <NX> <NY> <METHOD> [MAX_ITER]` - Solve the 2D
//!   manufactured sine problem on the unit square and save the solution
//! - `lisol-bvp refine <METHOD>` - Grid refinement study of the 1D problem
//!
//! `METHOD` is one of `jacobi`, `sor`, `ssor` or `cg`.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use lisol::{IterativeSolver, Method, Solver};
use lisol_bvp::{
    assemble_poisson_2d, default_omega, max_error, refinement_study,
    save_solution, Domain, Grid2d, SineProblem,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Finite difference boundary value problems solved with lisol
#[derive(Debug, Parser)]
#[command(name = "lisol-bvp")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Solve -laplace(u) = f on the unit square, exact solution
    /// u = 1 + sin(2 pi x) sin(2 pi y)
    Solve {
        /// Number of grid nodes along x, boundary included
        nx: usize,

        /// Number of grid nodes along y, boundary included
        ny: usize,

        /// Solver: jacobi, sor, ssor or cg
        method: Method,

        /// Maximum number of iterations
        #[arg(default_value_t = 1000)]
        max_iter: usize,

        /// Convergence tolerance, relative to the right hand side
        #[arg(long, default_value_t = 1e-6)]
        tol: f64,

        /// Relaxation factor for sor and ssor [default: 2 / (1 + sin(pi h))]
        #[arg(long)]
        omega: Option<f64>,

        /// Output file for the solution
        #[arg(short, long, default_value = "u.dat")]
        output: PathBuf,
    },

    /// Measure the order of accuracy of the 1D problem -u'' = sin(x)
    Refine {
        /// Solver: jacobi, sor, ssor or cg
        method: Method,

        /// Numbers of grid nodes, comma separated
        #[arg(
            long,
            value_delimiter = ',',
            default_values_t = [20, 40, 80, 160]
        )]
        sizes: Vec<usize>,

        /// Maximum number of iterations per grid
        #[arg(long, default_value_t = 100_000)]
        max_iter: usize,

        /// Convergence tolerance, relative to the right hand side
        #[arg(long, default_value_t = 1e-10)]
        tol: f64,

        /// Relaxation factor for sor and ssor
        #[arg(long, default_value_t = 1.9)]
        omega: f64,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Commands::Solve {
            nx,
            ny,
            method,
            max_iter,
            tol,
            omega,
            output,
        } => solve(nx, ny, method, max_iter, tol, omega, output),
        Commands::Refine {
            method,
            sizes,
            max_iter,
            tol,
            omega,
        } => refine(method, &sizes, max_iter, tol, omega),
    }
}

fn solve(
    nx: usize,
    ny: usize,
    method: Method,
    max_iter: usize,
    tol: f64,
    omega: Option<f64>,
    output: PathBuf,
) -> anyhow::Result<()> {
    let grid = Grid2d::new(nx, ny, Domain::default())?;
    let system = assemble_poisson_2d(&grid, &SineProblem)
        .context("Failed to assemble the linear system")?;
    let omega = omega.unwrap_or_else(|| default_omega(&grid));
    let solver = Solver::new(method, max_iter, tol, omega);

    let mut u = system.initial_guess;
    let stats = solver
        .solve(&system.matrix, &mut u, &system.rhs)
        .with_context(|| format!("{} solver failed", method))?;

    println!("Convergence tolerance = {:e}", tol);
    println!("Number of iterations = {}", stats.iterations());
    if !stats.converged() {
        println!(
            "Not converged, relative residual = {:e}",
            stats.residual()
        );
    }
    if let Some(err) = max_error(&grid, &SineProblem, &u) {
        println!("Maximum error = {:e}", err);
    }

    save_solution(&output, &grid, &u)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("Saved solution into file {}", output.display());
    Ok(())
}

fn refine(
    method: Method,
    sizes: &[usize],
    max_iter: usize,
    tol: f64,
    omega: f64,
) -> anyhow::Result<()> {
    anyhow::ensure!(!sizes.is_empty(), "No grid sizes given");
    let solver = Solver::new(method, max_iter, tol, omega);
    let study = refinement_study(sizes, &solver).with_context(|| {
        format!("Refinement study with {} failed", solver.name())
    })?;
    print!("{}", study);
    Ok(())
}
