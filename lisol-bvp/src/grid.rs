//! Uniform grids on rectangles

use crate::BvpError;

/// Rectangle `[xmin, xmax] x [ymin, ymax]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl Domain {
    pub fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Self {
        Self {
            xmin,
            xmax,
            ymin,
            ymax,
        }
    }
}

/// The unit square
impl Default for Domain {
    fn default() -> Self {
        Self::new(0., 1., 0., 1.)
    }
}

/// Uniform `nx x ny` grid of nodes covering a [`Domain`], boundary
/// included.
///
/// Node `(i, j)` sits at `(xmin + i dx, ymin + j dy)` and is numbered
/// `i + j * nx`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid2d {
    nx: usize,
    ny: usize,
    domain: Domain,
    dx: f64,
    dy: f64,
}

impl Grid2d {
    pub fn new(nx: usize, ny: usize, domain: Domain) -> Result<Self, BvpError> {
        if nx < 2 || ny < 2 {
            return Err(BvpError::GridTooSmall { nx, ny });
        }
        // also rejects NaN bounds
        if !(domain.xmax > domain.xmin) {
            return Err(BvpError::EmptyDomain {
                axis: "x",
                min: domain.xmin,
                max: domain.xmax,
            });
        }
        if !(domain.ymax > domain.ymin) {
            return Err(BvpError::EmptyDomain {
                axis: "y",
                min: domain.ymin,
                max: domain.ymax,
            });
        }
        Ok(Self {
            nx,
            ny,
            domain,
            dx: (domain.xmax - domain.xmin) / (nx - 1) as f64,
            dy: (domain.ymax - domain.ymin) / (ny - 1) as f64,
        })
    }

    pub fn nx(&self) -> usize {
        self.nx
    }

    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Total number of nodes
    pub fn num_nodes(&self) -> usize {
        self.nx * self.ny
    }

    pub fn dx(&self) -> f64 {
        self.dx
    }

    pub fn dy(&self) -> f64 {
        self.dy
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    #[inline]
    pub fn index(&self, i: usize, j: usize) -> usize {
        i + j * self.nx
    }

    pub fn x(&self, i: usize) -> f64 {
        self.domain.xmin + i as f64 * self.dx
    }

    pub fn y(&self, j: usize) -> f64 {
        self.domain.ymin + j as f64 * self.dy
    }

    pub fn is_boundary(&self, i: usize, j: usize) -> bool {
        i == 0 || j == 0 || i + 1 == self.nx || j + 1 == self.ny
    }

    /// All nodes `(i, j)`, in index order
    pub fn nodes(&self) -> impl Iterator<Item = (usize, usize)> {
        let (nx, ny) = (self.nx, self.ny);
        (0..ny).flat_map(move |j| (0..nx).map(move |i| (i, j)))
    }

    /// Boundary nodes, each one once, in index order
    pub fn boundary_nodes(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.nodes().filter(move |&(i, j)| self.is_boundary(i, j))
    }
}
