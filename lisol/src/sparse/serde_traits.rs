use std::convert::TryFrom;

use serde::{Deserialize, Deserializer};

use crate::errors::StructureError;
use crate::sparse::SparseMat;
use crate::Scalar;

/// Unvalidated form of [`SparseMat`], checked on conversion so that a
/// deserialized matrix always satisfies the diagonal-first invariant.
#[derive(Deserialize)]
struct SparseMatShadow<T> {
    dim: usize,
    indptr: Vec<usize>,
    indices: Vec<usize>,
    data: Vec<T>,
}

impl<T: Scalar> TryFrom<SparseMatShadow<T>> for SparseMat<T> {
    type Error = StructureError;
    fn try_from(val: SparseMatShadow<T>) -> Result<Self, Self::Error> {
        let SparseMatShadow {
            dim,
            indptr,
            indices,
            data,
        } = val;
        Self::try_from_csr(dim, indptr, indices, data)
    }
}

impl<'de, T> Deserialize<'de> for SparseMat<T>
where
    T: Scalar + Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let shadow = SparseMatShadow::deserialize(deserializer)?;
        Self::try_from(shadow).map_err(serde::de::Error::custom)
    }
}
