//! Dense layout: one SI value per index

use crate::storage::{Storage, StorageType};
use nalgebra::DVector;
use std::borrow::Cow;

/// Contiguous SI values, zeros included
#[derive(Debug, Clone, PartialEq)]
pub struct DenseData {
    values: DVector<f64>,
}

impl DenseData {
    #[must_use]
    pub fn from_vec(values: Vec<f64>) -> Self {
        Self {
            values: DVector::from_vec(values),
        }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        self.values.as_slice()
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        self.values.as_mut_slice()
    }

    /// The values as an `nalgebra` column vector
    #[must_use]
    pub fn as_dvector(&self) -> &DVector<f64> {
        &self.values
    }

    /// Write `value` at `index`; callers check bounds
    #[inline]
    pub(crate) fn set(&mut self, index: usize, value: f64) {
        self.values[index] = value;
    }
}

impl Storage for DenseData {
    fn storage_type(&self) -> StorageType {
        StorageType::Dense
    }

    fn size(&self) -> usize {
        self.values.len()
    }

    #[inline]
    fn get_si(&self, index: usize) -> f64 {
        self.values[index]
    }

    fn cardinality(&self) -> usize {
        self.values.iter().filter(|&&v| v != 0.0).count()
    }

    fn z_sum(&self) -> f64 {
        self.values.iter().sum()
    }

    fn dense_image(&self) -> Cow<'_, [f64]> {
        Cow::Borrowed(self.values.as_slice())
    }
}
