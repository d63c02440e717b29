//! Storage-independent magnitude array and its element-wise algebra
//!
//! Result layouts of the non-mutating operations:
//!
//! | operation      | both dense | both sparse | mixed  |
//! |----------------|------------|-------------|--------|
//! | plus / minus   | Dense      | Sparse      | Dense  |
//! | times / divide | Dense      | Sparse      | Sparse |
//!
//! Mutating operations keep the layout of the value they write to. A sparse
//! target grows when a write lands on an implicit zero and is never turned
//! dense behind the caller's back.

use crate::error::ValueError;
use crate::storage::dense::DenseData;
use crate::storage::kernel;
use crate::storage::sparse::SparseData;
use crate::storage::{Storage, StorageType};
use crate::unit::Scale;
use nalgebra::DVector;
use std::borrow::Cow;
use std::collections::BTreeMap;
use tracing::trace;

/// SI magnitude array in one of the two layouts
#[derive(Debug, Clone, PartialEq)]
pub enum VectorData {
    Dense(DenseData),
    Sparse(SparseData),
}

impl VectorData {
    /// Convert raw display-unit values to SI and store them in `storage` layout
    ///
    /// # Errors
    /// [`ValueError::InvalidInput`] when `values` is empty.
    pub fn instantiate(values: &[f64], scale: &Scale, storage: StorageType) -> Result<Self, ValueError> {
        if values.is_empty() {
            return Err(ValueError::InvalidInput(
                "Cannot create a vector from an empty array".to_string(),
            ));
        }
        let si = if scale.is_base_si() {
            values.to_vec()
        } else {
            kernel::map(values, |v| scale.to_standard_unit(v))
        };
        Ok(Self::from_si(si, storage))
    }

    /// Wrap values that are already SI
    #[must_use]
    pub fn from_si(values_si: Vec<f64>, storage: StorageType) -> Self {
        match storage {
            StorageType::Dense => VectorData::Dense(DenseData::from_vec(values_si)),
            StorageType::Sparse => VectorData::Sparse(SparseData::from_dense(&values_si)),
        }
    }

    /// Build from an index -> raw value map with explicit length
    ///
    /// Unlisted indices hold the SI value of a raw 0.0, which is not zero for
    /// an offset scale (0 °C is 273.15 K).
    ///
    /// # Errors
    /// [`ValueError::InvalidInput`] when `size` is 0 or the map is empty,
    /// [`ValueError::IndexOutOfRange`] when a key is not below `size`.
    pub fn instantiate_map(
        values: &BTreeMap<usize, f64>,
        size: usize,
        scale: &Scale,
        storage: StorageType,
    ) -> Result<Self, ValueError> {
        if size == 0 || values.is_empty() {
            return Err(ValueError::InvalidInput(
                "Cannot create a vector from an empty map".to_string(),
            ));
        }
        if let Some((&index, _)) = values.range(size..).next() {
            return Err(ValueError::IndexOutOfRange { index, size });
        }

        let zero_si = scale.to_standard_unit(0.0);
        if zero_si == 0.0 && storage == StorageType::Sparse {
            let mut sparse = SparseData::new(size);
            for (&index, &value) in values {
                sparse.set(index, scale.to_standard_unit(value));
            }
            return Ok(VectorData::Sparse(sparse));
        }

        let mut si = vec![zero_si; size];
        for (&index, &value) in values {
            si[index] = scale.to_standard_unit(value);
        }
        Ok(Self::from_si(si, storage))
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    fn storage(&self) -> &dyn Storage {
        match self {
            VectorData::Dense(dense) => dense,
            VectorData::Sparse(sparse) => sparse,
        }
    }

    #[must_use]
    pub fn storage_type(&self) -> StorageType {
        self.storage().storage_type()
    }

    #[must_use]
    pub fn is_dense(&self) -> bool {
        matches!(self, VectorData::Dense(_))
    }

    #[must_use]
    pub fn is_sparse(&self) -> bool {
        matches!(self, VectorData::Sparse(_))
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.storage().size()
    }

    #[must_use]
    pub fn cardinality(&self) -> usize {
        self.storage().cardinality()
    }

    #[must_use]
    pub fn z_sum(&self) -> f64 {
        self.storage().z_sum()
    }

    /// Full SI array, borrowed for dense storage
    #[must_use]
    pub fn dense_image(&self) -> Cow<'_, [f64]> {
        self.storage().dense_image()
    }

    /// SI values as an `nalgebra` column vector
    #[must_use]
    pub fn to_dvector(&self) -> DVector<f64> {
        match self {
            VectorData::Dense(dense) => dense.as_dvector().clone(),
            VectorData::Sparse(sparse) => DVector::from_vec(sparse.dense_image().into_owned()),
        }
    }

    fn check_index(&self, index: usize) -> Result<(), ValueError> {
        let size = self.size();
        if index < size {
            Ok(())
        } else {
            Err(ValueError::IndexOutOfRange { index, size })
        }
    }

    fn check_size(&self, other: &VectorData) -> Result<(), ValueError> {
        if self.size() == other.size() {
            Ok(())
        } else {
            Err(ValueError::SizeMismatch {
                left: self.size(),
                right: other.size(),
            })
        }
    }

    /// SI value at `index`
    ///
    /// # Errors
    /// [`ValueError::IndexOutOfRange`] when `index >= size()`.
    pub fn get(&self, index: usize) -> Result<f64, ValueError> {
        self.check_index(index)?;
        Ok(self.storage().get_si(index))
    }

    /// Store an SI value at `index`
    ///
    /// # Errors
    /// [`ValueError::IndexOutOfRange`] when `index >= size()`.
    pub fn set(&mut self, index: usize, value_si: f64) -> Result<(), ValueError> {
        self.check_index(index)?;
        match self {
            VectorData::Dense(dense) => dense.set(index, value_si),
            VectorData::Sparse(sparse) => sparse.set(index, value_si),
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Layout conversion
    // ------------------------------------------------------------------

    /// Deep clone of the current layout
    #[must_use]
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Dense copy; a plain clone when already dense
    #[must_use]
    pub fn to_dense(&self) -> Self {
        match self {
            VectorData::Dense(_) => self.clone(),
            VectorData::Sparse(sparse) => {
                trace!(size = sparse.size(), "Converting sparse storage to dense");
                VectorData::Dense(DenseData::from_vec(sparse.dense_image().into_owned()))
            }
        }
    }

    /// Sparse copy; a plain clone when already sparse
    #[must_use]
    pub fn to_sparse(&self) -> Self {
        match self {
            VectorData::Sparse(_) => self.clone(),
            VectorData::Dense(dense) => {
                trace!(size = dense.size(), "Converting dense storage to sparse");
                VectorData::Sparse(SparseData::from_dense(dense.as_slice()))
            }
        }
    }

    // ------------------------------------------------------------------
    // Non-mutating element-wise operations
    // ------------------------------------------------------------------

    /// Element-wise sum; sparse only when both operands are sparse
    ///
    /// # Errors
    /// [`ValueError::SizeMismatch`] when the sizes differ.
    pub fn plus(&self, other: &VectorData) -> Result<Self, ValueError> {
        self.additive(other, |a, b| a + b)
    }

    /// Element-wise difference; sparse only when both operands are sparse
    ///
    /// # Errors
    /// [`ValueError::SizeMismatch`] when the sizes differ.
    pub fn minus(&self, other: &VectorData) -> Result<Self, ValueError> {
        self.additive(other, |a, b| a - b)
    }

    /// Element-wise product; dense only when both operands are dense
    ///
    /// # Errors
    /// [`ValueError::SizeMismatch`] when the sizes differ.
    pub fn times(&self, other: &VectorData) -> Result<Self, ValueError> {
        self.multiplicative(other, |a, b| a * b)
    }

    /// Element-wise quotient; dense only when both operands are dense
    ///
    /// Implicit zeros take part in the division, so `0 / 0` yields NaN.
    ///
    /// # Errors
    /// [`ValueError::SizeMismatch`] when the sizes differ.
    pub fn divide(&self, other: &VectorData) -> Result<Self, ValueError> {
        self.multiplicative(other, |a, b| a / b)
    }

    fn additive<F>(&self, other: &VectorData, op: F) -> Result<Self, ValueError>
    where
        F: Fn(f64, f64) -> f64 + Send + Sync,
    {
        self.check_size(other)?;
        Ok(match (self, other) {
            (VectorData::Sparse(left), VectorData::Sparse(right)) => {
                VectorData::Sparse(left.merge(right, op))
            }
            _ => {
                let values = kernel::zip_map(&self.dense_image(), &other.dense_image(), op);
                VectorData::Dense(DenseData::from_vec(values))
            }
        })
    }

    fn multiplicative<F>(&self, other: &VectorData, op: F) -> Result<Self, ValueError>
    where
        F: Fn(f64, f64) -> f64 + Send + Sync,
    {
        self.check_size(other)?;
        let values = kernel::zip_map(&self.dense_image(), &other.dense_image(), op);
        Ok(match (self, other) {
            (VectorData::Dense(_), VectorData::Dense(_)) => {
                VectorData::Dense(DenseData::from_vec(values))
            }
            _ => VectorData::Sparse(SparseData::from_dense(&values)),
        })
    }

    // ------------------------------------------------------------------
    // Mutating operations (layout of `self` preserved)
    // ------------------------------------------------------------------

    /// `self[i] += other[i]`
    ///
    /// # Errors
    /// [`ValueError::SizeMismatch`] when the sizes differ.
    pub fn increment_by(&mut self, other: &VectorData) -> Result<(), ValueError> {
        self.zip_assign(other, |a, b| a + b)
    }

    /// `self[i] -= other[i]`
    ///
    /// # Errors
    /// [`ValueError::SizeMismatch`] when the sizes differ.
    pub fn decrement_by(&mut self, other: &VectorData) -> Result<(), ValueError> {
        self.zip_assign(other, |a, b| a - b)
    }

    /// `self[i] *= other[i]`
    ///
    /// # Errors
    /// [`ValueError::SizeMismatch`] when the sizes differ.
    pub fn multiply_by(&mut self, other: &VectorData) -> Result<(), ValueError> {
        self.zip_assign(other, |a, b| a * b)
    }

    /// `self[i] /= other[i]`
    ///
    /// # Errors
    /// [`ValueError::SizeMismatch`] when the sizes differ.
    pub fn divide_by(&mut self, other: &VectorData) -> Result<(), ValueError> {
        self.zip_assign(other, |a, b| a / b)
    }

    fn zip_assign<F>(&mut self, other: &VectorData, op: F) -> Result<(), ValueError>
    where
        F: Fn(f64, f64) -> f64 + Send + Sync,
    {
        self.check_size(other)?;
        match self {
            VectorData::Dense(dense) => {
                kernel::zip_in_place(dense.as_mut_slice(), &other.dense_image(), op);
            }
            VectorData::Sparse(sparse) => {
                let mut image = sparse.dense_image().into_owned();
                kernel::zip_in_place(&mut image, &other.dense_image(), op);
                *sparse = SparseData::from_dense(&image);
            }
        }
        Ok(())
    }

    /// Replace every value (implicit zeros included) by `op(value)`
    ///
    /// Sparse storage is expanded, mapped and compressed again, so the
    /// result has no stored zeros even when `op` produces some.
    pub fn assign<F>(&mut self, op: F)
    where
        F: Fn(f64) -> f64 + Send + Sync,
    {
        match self {
            VectorData::Dense(dense) => kernel::map_in_place(dense.as_mut_slice(), op),
            VectorData::Sparse(sparse) => {
                let mut image = sparse.dense_image().into_owned();
                kernel::map_in_place(&mut image, op);
                *sparse = SparseData::from_dense(&image);
            }
        }
    }

    /// Add an SI value to every element
    pub fn increment_by_si(&mut self, increment: f64) {
        self.assign(|v| v + increment);
    }

    /// Subtract an SI value from every element
    pub fn decrement_by_si(&mut self, decrement: f64) {
        self.assign(|v| v - decrement);
    }

    /// Multiply every element by a plain factor
    pub fn multiply_by_factor(&mut self, factor: f64) {
        self.assign(|v| v * factor);
    }

    /// Divide every element by a plain factor
    pub fn divide_by_factor(&mut self, factor: f64) {
        self.assign(|v| v / factor);
    }
}
