//! Magnitude storage: dense and sparse layouts of an SI value array
//!
//! Both layouts implement [`Storage`] for reads; [`VectorData`] owns one of
//! them and carries the element-wise algebra and the rules that decide which
//! layout a result gets.

mod data;
mod dense;
mod kernel;
mod sparse;

pub use data::VectorData;
pub use dense::DenseData;
pub use sparse::SparseData;

use crate::error::ValueError;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Layout of a magnitude array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StorageType {
    /// One slot per index, zeros included
    Dense,
    /// Sorted `(index, value)` pairs for the nonzero entries plus a logical length
    Sparse,
}

impl StorageType {
    /// Tag used in verbose rendering, padded to equal width
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            StorageType::Dense => "Dense  ",
            StorageType::Sparse => "Sparse ",
        }
    }
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StorageType::Dense => "Dense",
            StorageType::Sparse => "Sparse",
        })
    }
}

impl FromStr for StorageType {
    type Err = ValueError;

    /// Parse `"dense"` or `"sparse"`, ignoring case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dense" => Ok(StorageType::Dense),
            "sparse" => Ok(StorageType::Sparse),
            _ => Err(ValueError::UnknownStorageKind(s.to_string())),
        }
    }
}

/// Read access shared by both layouts
///
/// Indices passed to [`Storage::get_si`] must be below [`Storage::size`];
/// bounds are checked once by [`VectorData`].
pub trait Storage: Send + Sync {
    fn storage_type(&self) -> StorageType;

    /// Logical length, including implicit zeros
    fn size(&self) -> usize;

    /// SI value at `index`
    fn get_si(&self, index: usize) -> f64;

    /// Number of nonzero values, counted by scanning
    fn cardinality(&self) -> usize;

    /// Sum of all values
    fn z_sum(&self) -> f64;

    /// Full array of SI values. Dense storage borrows, sparse storage expands.
    fn dense_image(&self) -> Cow<'_, [f64]>;
}
