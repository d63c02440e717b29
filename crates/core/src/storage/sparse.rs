//! Sparse layout: sorted nonzero entries plus a logical length
//!
//! `indices` is strictly ascending and `values` holds the matching SI values,
//! none of them zero. Every index that is not listed reads as 0.0.

use crate::storage::{Storage, StorageType};
use std::borrow::Cow;

/// Nonzero SI values keyed by index
#[derive(Debug, Clone, PartialEq)]
pub struct SparseData {
    indices: Vec<usize>,
    values: Vec<f64>,
    size: usize,
}

impl SparseData {
    /// All-zero array of logical length `size`
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            indices: Vec::new(),
            values: Vec::new(),
            size,
        }
    }

    /// Keep the nonzero entries of a full array
    #[must_use]
    pub fn from_dense(image: &[f64]) -> Self {
        let (indices, values) = image
            .iter()
            .enumerate()
            .filter(|(_, &v)| v != 0.0)
            .map(|(i, &v)| (i, v))
            .unzip();
        Self {
            indices,
            values,
            size: image.len(),
        }
    }

    /// Stored indices, ascending
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Stored values, matching [`SparseData::indices`]
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Write `value` at `index`; callers check bounds
    ///
    /// A new nonzero index is inserted into both arrays at its sorted
    /// position, which shifts the tail of each array. Writing 0.0 removes the
    /// entry.
    pub(crate) fn set(&mut self, index: usize, value: f64) {
        match self.indices.binary_search(&index) {
            Ok(pos) if value == 0.0 => {
                self.indices.remove(pos);
                self.values.remove(pos);
            }
            Ok(pos) => self.values[pos] = value,
            Err(_) if value == 0.0 => {}
            Err(pos) => {
                self.indices.insert(pos, index);
                self.values.insert(pos, value);
            }
        }
    }

    /// `op` applied over the union of stored indices of two operands
    ///
    /// Only valid for operations with `op(0, 0) == 0` (addition, subtraction):
    /// indices stored in neither operand stay implicit zeros.
    pub(crate) fn merge<F>(&self, other: &SparseData, op: F) -> SparseData
    where
        F: Fn(f64, f64) -> f64,
    {
        debug_assert_eq!(self.size, other.size);
        let mut merged = SparseData::new(self.size);
        merged.indices.reserve(self.indices.len().max(other.indices.len()));
        merged.values.reserve(self.indices.len().max(other.indices.len()));

        let (mut a, mut b) = (0, 0);
        while a < self.indices.len() || b < other.indices.len() {
            let left = self.indices.get(a).copied().unwrap_or(usize::MAX);
            let right = other.indices.get(b).copied().unwrap_or(usize::MAX);
            let (index, value) = if left == right {
                a += 1;
                b += 1;
                (left, op(self.values[a - 1], other.values[b - 1]))
            } else if left < right {
                a += 1;
                (left, op(self.values[a - 1], 0.0))
            } else {
                b += 1;
                (right, op(0.0, other.values[b - 1]))
            };
            if value != 0.0 {
                merged.indices.push(index);
                merged.values.push(value);
            }
        }
        merged
    }
}

impl Storage for SparseData {
    fn storage_type(&self) -> StorageType {
        StorageType::Sparse
    }

    fn size(&self) -> usize {
        self.size
    }

    fn get_si(&self, index: usize) -> f64 {
        match self.indices.binary_search(&index) {
            Ok(pos) => self.values[pos],
            Err(_) => 0.0,
        }
    }

    fn cardinality(&self) -> usize {
        self.values.iter().filter(|&&v| v != 0.0).count()
    }

    fn z_sum(&self) -> f64 {
        self.values.iter().sum()
    }

    fn dense_image(&self) -> Cow<'_, [f64]> {
        let mut image = vec![0.0; self.size];
        for (&i, &v) in self.indices.iter().zip(&self.values) {
            image[i] = v;
        }
        Cow::Owned(image)
    }
}
