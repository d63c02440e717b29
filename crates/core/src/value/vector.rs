//! Quantity vector with copy-on-write mutable/immutable views
//!
//! An immutable vector is never written after construction. [`QuantityVector::mutable`]
//! returns a writable view that shares the same storage; both the source and
//! the view are flagged copy-on-write, and the first write through any flagged
//! instance duplicates the storage before touching it. Holders of an immutable
//! vector therefore never observe writes made through views derived from it.
//!
//! Writes take `&mut self`, so the flag check, the copy and the write happen
//! under exclusive access to one instance. The storage itself sits behind an
//! `Arc` and is only written once the instance owns it alone.

use crate::error::ValueError;
use crate::kind::{Operation, ValueKind};
use crate::storage::{StorageType, VectorData};
use crate::unit::{Unit, UnitRef};
use crate::value::scalar::Scalar;
use nalgebra::DVector;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::trace;

/// Fixed-length array of quantity values sharing one display unit
#[derive(Debug)]
pub struct QuantityVector {
    data: Arc<VectorData>,
    unit: UnitRef,
    mutable: bool,
    /// Set when `data` may be shared with another instance
    copy_on_write: AtomicBool,
}

impl QuantityVector {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Immutable vector from raw values expressed in `unit`
    ///
    /// # Errors
    /// [`ValueError::InvalidInput`] when `values` is empty.
    pub fn new(values: &[f64], unit: &UnitRef, storage: StorageType) -> Result<Self, ValueError> {
        let data = VectorData::instantiate(values, unit.scale(), storage)?;
        Ok(Self::from_data(data, unit))
    }

    /// Immutable vector from values that are already SI
    ///
    /// # Errors
    /// [`ValueError::InvalidInput`] when `values_si` is empty.
    pub fn from_si(values_si: Vec<f64>, unit: &UnitRef, storage: StorageType) -> Result<Self, ValueError> {
        if values_si.is_empty() {
            return Err(ValueError::InvalidInput(
                "Cannot create a vector from an empty array".to_string(),
            ));
        }
        Ok(Self::from_data(VectorData::from_si(values_si, storage), unit))
    }

    /// Immutable vector from unit-tagged values; the first value's unit is
    /// the display unit
    ///
    /// # Errors
    /// [`ValueError::InvalidInput`] when `values` is empty,
    /// [`ValueError::IncompatibleUnit`] when the values are of different quantities.
    pub fn from_scalars(values: &[Scalar], storage: StorageType) -> Result<Self, ValueError> {
        let first = values.first().ok_or_else(|| {
            ValueError::InvalidInput("Cannot create a vector from an empty list".to_string())
        })?;
        let unit = first.unit();
        let mut si = Vec::with_capacity(values.len());
        for value in values {
            unit.check_compatible(value.unit())?;
            si.push(value.si());
        }
        Ok(Self::from_data(VectorData::from_si(si, storage), unit))
    }

    /// Immutable vector of logical length `size` from an index -> value map
    /// in `unit`; unlisted indices hold a raw 0.0 in `unit`
    ///
    /// # Errors
    /// [`ValueError::InvalidInput`] when the map is empty or `size` is 0,
    /// [`ValueError::IndexOutOfRange`] when a key is not below `size`.
    pub fn from_map(
        values: &BTreeMap<usize, f64>,
        size: usize,
        unit: &UnitRef,
        storage: StorageType,
    ) -> Result<Self, ValueError> {
        let data = VectorData::instantiate_map(values, size, unit.scale(), storage)?;
        Ok(Self::from_data(data, unit))
    }

    pub(crate) fn from_data(data: VectorData, unit: &UnitRef) -> Self {
        Self {
            data: Arc::new(data),
            unit: Arc::clone(unit),
            mutable: false,
            copy_on_write: AtomicBool::new(false),
        }
    }

    fn share(&self, mutable: bool) -> Self {
        Self {
            data: Arc::clone(&self.data),
            unit: Arc::clone(&self.unit),
            mutable,
            copy_on_write: AtomicBool::new(true),
        }
    }

    // ------------------------------------------------------------------
    // Mutable/immutable duality
    // ------------------------------------------------------------------

    /// Writable view sharing this vector's storage
    ///
    /// Both `self` and the view are flagged copy-on-write; whichever writes
    /// first takes a private copy.
    #[must_use]
    pub fn mutable(&self) -> Self {
        self.copy_on_write.store(true, Ordering::Release);
        self.share(true)
    }

    /// Read-only view sharing this vector's storage
    ///
    /// `self` is flagged copy-on-write, so later writes through it leave the
    /// returned vector unchanged.
    #[must_use]
    pub fn immutable(&self) -> Self {
        self.copy_on_write.store(true, Ordering::Release);
        let mut view = self.share(false);
        *view.copy_on_write.get_mut() = false;
        view
    }

    /// Writable copy; storage is duplicated lazily on first write
    #[must_use]
    pub fn copy(&self) -> Self {
        self.mutable()
    }

    #[must_use]
    pub fn is_mutable(&self) -> bool {
        self.mutable
    }

    /// Whether the next write will duplicate the storage first
    #[must_use]
    pub fn is_copy_on_write(&self) -> bool {
        self.copy_on_write.load(Ordering::Acquire)
    }

    /// Storage for writing, privatised first when shared
    pub(crate) fn data_mut(&mut self) -> Result<&mut VectorData, ValueError> {
        if !self.mutable {
            return Err(ValueError::ImmutableValue);
        }
        let shared = self.copy_on_write.get_mut();
        if *shared {
            trace!(size = self.data.size(), "Copy-on-write: duplicating shared storage");
            self.data = Arc::new(self.data.copy());
            *shared = false;
        }
        Ok(Arc::make_mut(&mut self.data))
    }

    pub(crate) fn data(&self) -> &VectorData {
        &self.data
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    #[must_use]
    pub fn unit(&self) -> &UnitRef {
        &self.unit
    }

    #[must_use]
    pub fn kind(&self) -> ValueKind {
        self.unit.kind()
    }

    #[must_use]
    pub fn storage_type(&self) -> StorageType {
        self.data.storage_type()
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.data.size()
    }

    /// Number of nonzero values
    #[must_use]
    pub fn cardinality(&self) -> usize {
        self.data.cardinality()
    }

    /// Sum of all SI values
    #[must_use]
    pub fn z_sum(&self) -> f64 {
        self.data.z_sum()
    }

    /// # Errors
    /// [`ValueError::IndexOutOfRange`] when `index >= size()`.
    pub fn get_si(&self, index: usize) -> Result<f64, ValueError> {
        self.data.get(index)
    }

    /// Value at `index` in the display unit
    ///
    /// # Errors
    /// [`ValueError::IndexOutOfRange`] when `index >= size()`.
    pub fn get_in_unit(&self, index: usize) -> Result<f64, ValueError> {
        Ok(self.unit.to_unit(self.data.get(index)?))
    }

    /// Value at `index` in `unit`
    ///
    /// # Errors
    /// [`ValueError::IndexOutOfRange`] when `index >= size()`,
    /// [`ValueError::IncompatibleUnit`] when `unit` is of another quantity.
    pub fn get_in_unit_as(&self, index: usize, unit: &Unit) -> Result<f64, ValueError> {
        self.unit.check_compatible(unit)?;
        Ok(unit.to_unit(self.data.get(index)?))
    }

    /// Value at `index` as a scalar in the display unit
    ///
    /// # Errors
    /// [`ValueError::IndexOutOfRange`] when `index >= size()`.
    pub fn get(&self, index: usize) -> Result<Scalar, ValueError> {
        Ok(Scalar::from_si(self.data.get(index)?, &self.unit))
    }

    /// Snapshot of the SI values
    #[must_use]
    pub fn values_si(&self) -> Vec<f64> {
        self.data.dense_image().into_owned()
    }

    /// Snapshot of the values in the display unit
    #[must_use]
    pub fn values_in_unit(&self) -> Vec<f64> {
        self.data.dense_image().iter().map(|&si| self.unit.to_unit(si)).collect()
    }

    /// Snapshot of the values in `unit`
    ///
    /// # Errors
    /// [`ValueError::IncompatibleUnit`] when `unit` is of another quantity.
    pub fn values_in_unit_as(&self, unit: &Unit) -> Result<Vec<f64>, ValueError> {
        self.unit.check_compatible(unit)?;
        Ok(self.data.dense_image().iter().map(|&si| unit.to_unit(si)).collect())
    }

    /// SI values as an `nalgebra` column vector
    #[must_use]
    pub fn to_dvector(&self) -> DVector<f64> {
        self.data.to_dvector()
    }

    /// Values as scalars in the display unit, in index order
    pub fn iter(&self) -> impl Iterator<Item = Scalar> + '_ {
        (0..self.size()).filter_map(move |i| self.get(i).ok())
    }

    // ------------------------------------------------------------------
    // Layout
    // ------------------------------------------------------------------

    /// Same values in dense storage, with the mutability of `self`
    #[must_use]
    pub fn to_dense(&self) -> Self {
        self.with_layout(StorageType::Dense)
    }

    /// Same values in sparse storage, with the mutability of `self`
    #[must_use]
    pub fn to_sparse(&self) -> Self {
        self.with_layout(StorageType::Sparse)
    }

    fn with_layout(&self, storage: StorageType) -> Self {
        if self.storage_type() == storage {
            return self.clone();
        }
        let data = match storage {
            StorageType::Dense => self.data.to_dense(),
            StorageType::Sparse => self.data.to_sparse(),
        };
        let mut converted = Self::from_data(data, &self.unit);
        converted.mutable = self.mutable;
        converted
    }

    // ------------------------------------------------------------------
    // Element writes
    // ------------------------------------------------------------------

    /// # Errors
    /// [`ValueError::ImmutableValue`] on an immutable vector,
    /// [`ValueError::IndexOutOfRange`] when `index >= size()`.
    pub fn set_si(&mut self, index: usize, value_si: f64) -> Result<(), ValueError> {
        self.check_index(index)?;
        self.data_mut()?.set(index, value_si)
    }

    /// Write a value expressed in the display unit
    ///
    /// # Errors
    /// Same as [`QuantityVector::set_si`].
    pub fn set_in_unit(&mut self, index: usize, value: f64) -> Result<(), ValueError> {
        let si = self.unit.to_standard_unit(value);
        self.set_si(index, si)
    }

    /// Write a value expressed in `unit`
    ///
    /// # Errors
    /// [`ValueError::IncompatibleUnit`] when `unit` is of another quantity,
    /// otherwise the same as [`QuantityVector::set_si`].
    pub fn set_in_unit_as(&mut self, index: usize, value: f64, unit: &Unit) -> Result<(), ValueError> {
        self.unit.check_compatible(unit)?;
        self.set_si(index, unit.to_standard_unit(value))
    }

    /// Write a scalar of the same quantity
    ///
    /// # Errors
    /// [`ValueError::IncompatibleUnit`] when `value` is of another quantity,
    /// otherwise the same as [`QuantityVector::set_si`].
    pub fn set(&mut self, index: usize, value: &Scalar) -> Result<(), ValueError> {
        self.unit.check_compatible(value.unit())?;
        self.set_si(index, value.si())
    }

    pub(crate) fn check_mutable(&self) -> Result<(), ValueError> {
        if self.mutable {
            Ok(())
        } else {
            Err(ValueError::ImmutableValue)
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

    // ------------------------------------------------------------------
    // Whole-vector updates
    // ------------------------------------------------------------------

    /// Add an SI amount to every element
    ///
    /// # Errors
    /// [`ValueError::ImmutableValue`] on an immutable vector.
    pub fn increment_by_si(&mut self, increment: f64) -> Result<(), ValueError> {
        self.data_mut()?.increment_by_si(increment);
        Ok(())
    }

    /// Subtract an SI amount from every element
    ///
    /// # Errors
    /// [`ValueError::ImmutableValue`] on an immutable vector.
    pub fn decrement_by_si(&mut self, decrement: f64) -> Result<(), ValueError> {
        self.data_mut()?.decrement_by_si(decrement);
        Ok(())
    }

    /// # Errors
    /// [`ValueError::ImmutableValue`] on an immutable vector.
    pub fn multiply_by_factor(&mut self, factor: f64) -> Result<(), ValueError> {
        self.data_mut()?.multiply_by_factor(factor);
        Ok(())
    }

    /// # Errors
    /// [`ValueError::ImmutableValue`] on an immutable vector.
    pub fn divide_by_factor(&mut self, factor: f64) -> Result<(), ValueError> {
        self.data_mut()?.divide_by_factor(factor);
        Ok(())
    }

    /// Replace every SI value by `op(value)`, implicit zeros included
    ///
    /// # Errors
    /// [`ValueError::ImmutableValue`] on an immutable vector.
    pub fn assign<F>(&mut self, op: F) -> Result<(), ValueError>
    where
        F: Fn(f64) -> f64 + Send + Sync,
    {
        self.data_mut()?.assign(op);
        Ok(())
    }

    /// Absolute value of every element of a relative vector
    ///
    /// # Errors
    /// [`ValueError::ImmutableValue`] on an immutable vector,
    /// [`ValueError::IllegalCombination`] on an absolute vector.
    pub fn abs(&mut self) -> Result<(), ValueError> {
        self.check_mutable()?;
        Operation::Abs.check_unary(self.kind())?;
        self.assign(f64::abs)
    }

    /// # Errors
    /// [`ValueError::ImmutableValue`] on an immutable vector.
    pub fn ceil(&mut self) -> Result<(), ValueError> {
        self.assign(f64::ceil)
    }

    /// # Errors
    /// [`ValueError::ImmutableValue`] on an immutable vector.
    pub fn floor(&mut self) -> Result<(), ValueError> {
        self.assign(f64::floor)
    }

    /// Negate every element of a relative vector
    ///
    /// # Errors
    /// [`ValueError::ImmutableValue`] on an immutable vector,
    /// [`ValueError::IllegalCombination`] on an absolute vector.
    pub fn neg(&mut self) -> Result<(), ValueError> {
        self.check_mutable()?;
        Operation::Neg.check_unary(self.kind())?;
        self.assign(|v| -v)
    }

    /// Round to the nearest integer, ties to even
    ///
    /// # Errors
    /// [`ValueError::ImmutableValue`] on an immutable vector.
    pub fn rint(&mut self) -> Result<(), ValueError> {
        self.assign(f64::round_ties_even)
    }

    /// Round to the nearest integer, ties away from zero
    ///
    /// # Errors
    /// [`ValueError::ImmutableValue`] on an immutable vector.
    pub fn round(&mut self) -> Result<(), ValueError> {
        self.assign(f64::round)
    }

    /// Scale a relative vector so that its values sum to 1
    ///
    /// # Errors
    /// [`ValueError::ImmutableValue`] on an immutable vector,
    /// [`ValueError::IllegalCombination`] on an absolute vector,
    /// [`ValueError::InvalidInput`] when the values sum to zero.
    pub fn normalize(&mut self) -> Result<(), ValueError> {
        self.check_mutable()?;
        Operation::Divide.result_kind(self.kind(), ValueKind::Relative)?;
        let sum = self.z_sum();
        if sum == 0.0 {
            return Err(ValueError::InvalidInput(
                "Cannot normalize a vector that sums to 0".to_string(),
            ));
        }
        self.divide_by_factor(sum)
    }
}

impl Clone for QuantityVector {
    /// A clone of a mutable vector is another copy-on-write view
    fn clone(&self) -> Self {
        if self.mutable {
            self.mutable()
        } else {
            let mut view = self.share(false);
            *view.copy_on_write.get_mut() = false;
            view
        }
    }
}

impl PartialEq for QuantityVector {
    /// Same unit and same SI values, in either layout
    fn eq(&self, other: &Self) -> bool {
        *self.unit == *other.unit
            && self.size() == other.size()
            && self.data.dense_image() == other.data.dense_image()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::catalog::{ABSOLUTE_CELSIUS, ABSOLUTE_KELVIN, KILOMETER, METER, SECOND};

    fn immutable_km() -> QuantityVector {
        QuantityVector::new(&[1.0, 0.0, 2.0], &KILOMETER, StorageType::Dense).unwrap()
    }

    #[test]
    fn test_reads_convert_units() {
        let v = immutable_km();
        assert_eq!(v.get_si(0), Ok(1000.0));
        assert_eq!(v.get_in_unit(2), Ok(2.0));
        assert_eq!(v.get_in_unit_as(0, &METER), Ok(1000.0));
        assert!(v.get_in_unit_as(0, &SECOND).is_err());
        assert_eq!(v.values_in_unit(), vec![1.0, 0.0, 2.0]);
        assert_eq!(v.values_si(), vec![1000.0, 0.0, 2000.0]);
        assert_eq!(v.get(5).unwrap_err(), ValueError::IndexOutOfRange { index: 5, size: 3 });
    }

    #[test]
    fn test_immutable_rejects_writes() {
        let mut v = immutable_km();
        assert_eq!(v.set_si(0, 1.0), Err(ValueError::ImmutableValue));
        assert_eq!(v.abs(), Err(ValueError::ImmutableValue));
    }

    #[test]
    fn test_mutable_view_is_private_after_first_write() {
        let a = immutable_km();
        let mut m = a.mutable();
        assert!(m.is_copy_on_write());
        assert!(a.is_copy_on_write());

        m.set_in_unit(0, 9.0).unwrap();
        assert!(!m.is_copy_on_write());
        assert_eq!(m.get_in_unit(0), Ok(9.0));
        assert_eq!(a.get_in_unit(0), Ok(1.0));
    }

    #[test]
    fn test_immutable_snapshot_of_mutable() {
        let mut m = immutable_km().mutable();
        m.set_si(1, 5.0).unwrap();
        let b = m.immutable();
        assert!(!b.is_mutable());
        m.set_si(1, 7.0).unwrap();
        assert_eq!(b.get_si(1), Ok(5.0));
        assert_eq!(m.get_si(1), Ok(7.0));
    }

    #[test]
    fn test_clone_of_mutable_is_independent() {
        let mut m = immutable_km().mutable();
        let c = m.clone();
        m.multiply_by_factor(2.0).unwrap();
        assert_eq!(c.get_in_unit(2), Ok(2.0));
        assert_eq!(m.get_in_unit(2), Ok(4.0));
    }

    #[test]
    fn test_divide_by_factor_respects_sharing() {
        let a = immutable_km();
        let mut m = a.copy();
        m.divide_by_factor(4.0).unwrap();
        assert_eq!(a.get_si(0), Ok(1000.0));
        assert_eq!(m.get_si(0), Ok(250.0));
    }

    #[test]
    fn test_set_in_other_unit() {
        let mut m = immutable_km().mutable();
        m.set_in_unit_as(1, 500.0, &METER).unwrap();
        assert_eq!(m.get_in_unit(1), Ok(0.5));
        assert!(matches!(
            m.set_in_unit_as(1, 1.0, &SECOND),
            Err(ValueError::IncompatibleUnit { .. })
        ));
        let s = Scalar::new(3.0, &METER);
        m.set(2, &s).unwrap();
        assert_eq!(m.get_si(2), Ok(3.0));
    }

    #[test]
    fn test_math_functions() {
        let mut m = QuantityVector::new(&[-1.5, 2.5, 0.5, -0.4], &METER, StorageType::Sparse)
            .unwrap()
            .mutable();
        let mut r = m.copy();
        m.rint().unwrap();
        assert_eq!(m.values_si(), vec![-2.0, 2.0, 0.0, -0.0]);
        assert_eq!(m.cardinality(), 2);
        r.round().unwrap();
        assert_eq!(r.values_si(), vec![-2.0, 3.0, 1.0, -0.0]);
        r.neg().unwrap();
        r.abs().unwrap();
        assert_eq!(r.values_si(), vec![2.0, 3.0, 1.0, 0.0]);
        assert!(r.storage_type() == StorageType::Sparse);
    }

    #[test]
    fn test_sign_changes_need_relative() {
        let mut kelvin =
            QuantityVector::new(&[240.0, 0.0, 300.0], &ABSOLUTE_KELVIN, StorageType::Dense)
                .unwrap()
                .mutable();
        assert!(matches!(
            kelvin.neg(),
            Err(ValueError::IllegalCombination { operation: Operation::Neg, .. })
        ));
        assert!(matches!(
            kelvin.abs(),
            Err(ValueError::IllegalCombination { operation: Operation::Abs, .. })
        ));
        assert_eq!(kelvin.values_si(), vec![240.0, 0.0, 300.0]);

        kelvin.divide_by_factor(100.0).unwrap();
        kelvin.round().unwrap();
        kelvin.ceil().unwrap();
        kelvin.floor().unwrap();
        kelvin.rint().unwrap();
        assert_eq!(kelvin.values_si(), vec![2.0, 0.0, 3.0]);

        let mut frozen = immutable_km();
        assert_eq!(frozen.neg(), Err(ValueError::ImmutableValue));
    }

    #[test]
    fn test_normalize() {
        let mut m = QuantityVector::new(&[1.0, 3.0], &METER, StorageType::Dense).unwrap().mutable();
        m.normalize().unwrap();
        assert_eq!(m.values_si(), vec![0.25, 0.75]);

        let mut zero = QuantityVector::new(&[1.0, -1.0], &METER, StorageType::Dense).unwrap().mutable();
        assert!(matches!(zero.normalize(), Err(ValueError::InvalidInput(_))));

        let mut temps = QuantityVector::new(&[20.0], &ABSOLUTE_CELSIUS, StorageType::Dense)
            .unwrap()
            .mutable();
        assert!(matches!(temps.normalize(), Err(ValueError::IllegalCombination { .. })));
    }

    #[test]
    fn test_layout_conversion_keeps_mutability() {
        let m = immutable_km().mutable();
        let sparse = m.to_sparse();
        assert!(sparse.is_mutable());
        assert_eq!(sparse.storage_type(), StorageType::Sparse);
        assert_eq!(sparse, m);
    }

    #[test]
    fn test_from_scalars_and_map() {
        let values = [Scalar::new(1.0, &KILOMETER), Scalar::new(10.0, &METER)];
        let v = QuantityVector::from_scalars(&values, StorageType::Dense).unwrap();
        assert_eq!(v.unit().abbreviation(), "km");
        assert_eq!(v.values_si(), vec![1000.0, 10.0]);
        assert!(QuantityVector::from_scalars(&[], StorageType::Dense).is_err());

        let mixed = [Scalar::new(1.0, &METER), Scalar::new(1.0, &SECOND)];
        assert!(QuantityVector::from_scalars(&mixed, StorageType::Dense).is_err());

        let map = BTreeMap::from([(2, 4.0)]);
        let v = QuantityVector::from_map(&map, 4, &METER, StorageType::Sparse).unwrap();
        assert_eq!(v.size(), 4);
        assert_eq!(v.cardinality(), 1);
    }

    #[test]
    fn test_iter_yields_scalars() {
        let v = immutable_km();
        let in_unit: Vec<f64> = v.iter().map(|s| s.in_unit()).collect();
        assert_eq!(in_unit, vec![1.0, 0.0, 2.0]);
    }
}
