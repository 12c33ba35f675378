//! Two-phase sparse matrices and the solvers working on them.

pub mod builder;
pub mod csmat;
pub mod linalg;
#[cfg(feature = "serde")]
mod serde_traits;

pub use self::builder::SparseMatBuilder;
pub use self::csmat::{RowView, SparseMat};
