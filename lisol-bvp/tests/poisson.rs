use std::process::Command;

use approx::assert_abs_diff_eq;
use lisol::{IterativeSolver, Method, Solver};
use lisol_bvp::{
    assemble_poisson_2d, default_omega, max_error, refinement_study,
    save_solution, Domain, FnProblem, Grid2d, RefinementRow, SineProblem,
};

fn solve_sine(n: usize, method: Method) -> f64 {
    let grid = Grid2d::new(n, n, Domain::default()).unwrap();
    let system = assemble_poisson_2d(&grid, &SineProblem).unwrap();
    let solver = Solver::new(method, 20_000, 1e-10, default_omega(&grid));
    let mut u = system.initial_guess.clone();
    let stats = solver.solve(&system.matrix, &mut u, &system.rhs).unwrap();
    assert!(stats.converged(), "{} did not converge", method);
    // boundary values are untouched by every solver
    for (i, j) in grid.boundary_nodes() {
        let c = grid.index(i, j);
        assert_abs_diff_eq!(u[c], system.initial_guess[c], epsilon = 1e-12);
    }
    max_error(&grid, &SineProblem, &u).unwrap()
}

#[test]
fn every_method_solves_the_sine_problem() {
    let reference = solve_sine(21, Method::Cg);
    assert!(reference < 1e-2, "error {}", reference);
    for method in [Method::Jacobi, Method::Sor, Method::Ssor] {
        let err = solve_sine(21, method);
        assert_abs_diff_eq!(err, reference, epsilon = 1e-6);
    }
}

#[test]
fn second_order_in_2d() {
    let e1 = solve_sine(11, Method::Cg);
    let e2 = solve_sine(21, Method::Cg);
    let e3 = solve_sine(41, Method::Cg);
    for ratio in [e1 / e2, e2 / e3] {
        assert!(ratio > 3.5 && ratio < 4.5, "ratio {}", ratio);
    }
}

#[test]
fn refinement_rows() {
    let solver = Solver::new(Method::Cg, 1000, 1e-12, 1.);
    let study = refinement_study(&[10, 20, 40], &solver).unwrap();
    let rows: Vec<RefinementRow> = study.rows().to_vec();
    assert_eq!(rows.iter().map(|row| row.n).collect::<Vec<_>>(), [10, 20, 40]);
    assert!(rows.windows(2).all(|w| w[1].h < w[0].h));
    assert!(rows.windows(2).all(|w| w[1].error < w[0].error));
    assert_abs_diff_eq!(rows[0].error, 4.0993e-2, epsilon = 1e-5);
    assert_abs_diff_eq!(rows[2].rate.unwrap(), 2.077, epsilon = 1e-3);
}

#[test]
fn rectangular_domain() {
    // u = x^2 - y^2 + 3 is harmonic and reproduced exactly by the stencil
    let domain = Domain::new(-1., 2., 0.5, 1.5);
    let grid = Grid2d::new(13, 7, domain).unwrap();
    let g = |x: f64, y: f64| x * x - y * y + 3.;
    let problem = FnProblem::new(g, |_, _| 0.);
    let system = assemble_poisson_2d(&grid, &problem).unwrap();
    let mut u = system.initial_guess.clone();
    Solver::new(Method::Ssor, 5000, 1e-12, 1.5)
        .solve(&system.matrix, &mut u, &system.rhs)
        .unwrap()
        .into_result()
        .unwrap();
    for (i, j) in grid.nodes() {
        assert_abs_diff_eq!(
            u[grid.index(i, j)],
            g(grid.x(i), grid.y(j)),
            epsilon = 1e-8
        );
    }
}

#[test]
fn saved_solution() {
    let grid = Grid2d::new(5, 4, Domain::default()).unwrap();
    let system = assemble_poisson_2d(&grid, &SineProblem).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("u.dat");
    save_solution(&path, &grid, &system.initial_guess).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 4 * (5 + 1));
    for block in lines.chunks(6) {
        assert!(block[..5].iter().all(|l| l.split_whitespace().count() == 3));
        assert!(block[5].is_empty());
    }
    let last: Vec<f64> = lines[22]
        .split_whitespace()
        .map(|v| v.parse().unwrap())
        .collect();
    assert_eq!(&last[..2], &[1., 1.]);
}

#[test]
fn command_line_solve() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("solution.dat");
    let out = Command::new(env!("CARGO_BIN_EXE_lisol-bvp"))
        .args(["solve", "9", "9", "cg", "--tol", "1e-8", "--output"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.contains("Number of iterations"));
    assert!(stdout.contains("Saved solution into file"));
    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), 9 * 10);
}

#[test]
fn command_line_errors() {
    let out = Command::new(env!("CARGO_BIN_EXE_lisol-bvp"))
        .args(["solve", "1", "9", "jacobi"])
        .output()
        .unwrap();
    assert!(!out.status.success());
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("at least 2 nodes"));

    let out = Command::new(env!("CARGO_BIN_EXE_lisol-bvp"))
        .args(["solve", "9", "9", "sor", "--omega", "2.5"])
        .output()
        .unwrap();
    assert!(!out.status.success());
}

#[test]
fn command_line_refine() {
    let out = Command::new(env!("CARGO_BIN_EXE_lisol-bvp"))
        .args(["refine", "cg", "--sizes", "10,20,40"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 4);
}
