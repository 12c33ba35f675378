//! Writing and checking nodal solutions

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use lisol::Vector;

use crate::grid::Grid2d;
use crate::problem::Problem2d;

fn check_len(grid: &Grid2d, u: &Vector<f64>) -> io::Result<()> {
    if u.len() != grid.num_nodes() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "solution has {} values for a grid of {} nodes",
                u.len(),
                grid.num_nodes()
            ),
        ));
    }
    Ok(())
}

/// Write `x  y  u` for every node, one grid row after the other, each row
/// followed by a blank line. This is the block format gnuplot's `splot`
/// understands.
pub fn write_solution<W: Write>(
    mut writer: W,
    grid: &Grid2d,
    u: &Vector<f64>,
) -> io::Result<()> {
    check_len(grid, u)?;
    for j in 0..grid.ny() {
        let y = grid.y(j);
        for i in 0..grid.nx() {
            writeln!(writer, "{}  {}  {}", grid.x(i), y, u[grid.index(i, j)])?;
        }
        writeln!(writer)?;
    }
    writer.flush()
}

/// [`write_solution`] into a newly created file
pub fn save_solution<P: AsRef<Path>>(
    path: P,
    grid: &Grid2d,
    u: &Vector<f64>,
) -> io::Result<()> {
    let file = File::create(path.as_ref())?;
    write_solution(BufWriter::new(file), grid, u)?;
    tracing::debug!("saved solution into {}", path.as_ref().display());
    Ok(())
}

/// Largest nodal error `|u - u_exact|`, if the exact solution is known.
///
/// # Panics
///
/// If `u` does not have one value per node of `grid`
pub fn max_error<P>(grid: &Grid2d, problem: &P, u: &Vector<f64>) -> Option<f64>
where
    P: Problem2d + ?Sized,
{
    assert_eq!(u.len(), grid.num_nodes(), "one value per node expected");
    grid.nodes().try_fold(0f64, |err, (i, j)| {
        let exact = problem.exact(grid.x(i), grid.y(j))?;
        Some(err.max((u[grid.index(i, j)] - exact).abs()))
    })
}

#[cfg(test)]
mod test {
    use super::{max_error, write_solution};
    use crate::{Domain, FnProblem, Grid2d, SineProblem};
    use lisol::Vector;

    #[test]
    fn block_format() {
        let grid = Grid2d::new(2, 2, Domain::new(0., 1., 0., 2.)).unwrap();
        let u: Vector<f64> = vec![1., 2., 3., 4.5].into();
        let mut out = Vec::new();
        write_solution(&mut out, &grid, &u).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "0  0  1\n1  0  2\n\n0  2  3\n1  2  4.5\n\n");
    }

    #[test]
    fn wrong_length() {
        let grid = Grid2d::new(3, 3, Domain::default()).unwrap();
        let u = Vector::zeros(4);
        assert!(write_solution(Vec::new(), &grid, &u).is_err());
    }

    #[test]
    fn errors() {
        let grid = Grid2d::new(3, 3, Domain::default()).unwrap();
        let mut u = Vector::from_elem(9, 1.);
        // sin(pi) is not exactly zero
        assert!(max_error(&grid, &SineProblem, &u).unwrap() < 1e-12);
        u[4] = 1.5;
        let err = max_error(&grid, &SineProblem, &u).unwrap();
        assert!((err - 0.5).abs() < 1e-12);

        let problem = FnProblem::new(|_, _| 0., |_, _| 0.);
        assert_eq!(max_error(&grid, &problem, &u), None);
    }
}
