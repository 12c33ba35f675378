#[macro_use]
extern crate bencher;

use bencher::Bencher;
use lisol::{
    ConjugateGradient, IterativeSolver, Jacobi, Sor, SparseMat,
    SparseMatBuilder, StoppingCriterion, Vector,
};

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

fn assemble_100x100(bench: &mut Bencher) {
    bench.iter(|| laplacian(100));
}

fn multiply_200x200(bench: &mut Bencher) {
    let a = laplacian(200);
    let x = Vector::from_elem(a.dim(), 1.);
    let mut y = Vector::zeros(a.dim());
    bench.iter(|| a.multiply(&x, &mut y).unwrap());
}

// fixed iteration counts, so every run does the same amount of work
fn jacobi_50_sweeps(bench: &mut Bencher) {
    let a = laplacian(100);
    let b = Vector::from_elem(a.dim(), 1.);
    let solver =
        Jacobi::new(50, 1e-30).with_criterion(StoppingCriterion::Absolute);
    bench.iter(|| {
        let mut x = Vector::zeros(a.dim());
        solver.solve(&a, &mut x, &b).unwrap()
    });
}

fn sor_50_sweeps(bench: &mut Bencher) {
    let a = laplacian(100);
    let b = Vector::from_elem(a.dim(), 1.);
    let solver =
        Sor::new(50, 1e-30, 1.9).with_criterion(StoppingCriterion::Absolute);
    bench.iter(|| {
        let mut x = Vector::zeros(a.dim());
        solver.solve(&a, &mut x, &b).unwrap()
    });
}

fn cg_laplacian_100x100(bench: &mut Bencher) {
    let a = laplacian(100);
    let b = Vector::from_elem(a.dim(), 1.);
    let solver = ConjugateGradient::new(1000, 1e-8);
    bench.iter(|| {
        let mut x = Vector::zeros(a.dim());
        solver.solve(&a, &mut x, &b).unwrap()
    });
}

benchmark_group!(
    benches,
    assemble_100x100,
    multiply_200x200,
    jacobi_50_sweeps,
    sor_50_sweeps,
    cg_laplacian_100x100
);
benchmark_main!(benches);
