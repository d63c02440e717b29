//! Element-wise arithmetic between quantity vectors
//!
//! Kinds are checked first ([`Operation::result_kind`]), then units, then
//! sizes. Results are always new immutable vectors built by
//! [`instantiate_abs`] or [`instantiate_rel`]; the in-place forms write to a
//! mutable vector through its copy-on-write guard.

use crate::error::ValueError;
use crate::kind::{Operation, ValueKind};
use crate::storage::{StorageType, VectorData};
use crate::unit::{catalog, UnitRef, UnitRegistry};
use crate::value::vector::QuantityVector;

/// Result vector anchored to an origin; `unit` is the absolute operand's unit
fn instantiate_abs(data: VectorData, unit: &UnitRef) -> QuantityVector {
    debug_assert!(unit.is_absolute());
    QuantityVector::from_data(data, unit)
}

/// Result vector of differences or magnitudes
fn instantiate_rel(data: VectorData, unit: &UnitRef) -> QuantityVector {
    debug_assert!(!unit.is_absolute());
    QuantityVector::from_data(data, unit)
}

/// Route a `+`/`-` result to the factory of its kind
///
/// `Absolute - Absolute` is expressed in the relative counterpart of the
/// left operand's unit (°C absolute -> °C difference).
fn instantiate(kind: ValueKind, data: VectorData, left_unit: &UnitRef) -> QuantityVector {
    match kind {
        ValueKind::Absolute => instantiate_abs(data, left_unit),
        ValueKind::Relative => instantiate_rel(data, left_unit.relative_unit().unwrap_or(left_unit)),
    }
}

impl QuantityVector {
    fn check_same_dimensions(&self, other: &QuantityVector) -> Result<(), ValueError> {
        if self.unit().dimensions() == other.unit().dimensions() {
            Ok(())
        } else {
            Err(ValueError::IncompatibleUnit {
                expected: format!("{} ({})", self.unit().abbreviation(), self.unit().dimensions()),
                found: format!("{} ({})", other.unit().abbreviation(), other.unit().dimensions()),
            })
        }
    }

    fn check_same_size(&self, other_size: usize) -> Result<(), ValueError> {
        if self.size() == other_size {
            Ok(())
        } else {
            Err(ValueError::SizeMismatch {
                left: self.size(),
                right: other_size,
            })
        }
    }

    // ------------------------------------------------------------------
    // New-value operations
    // ------------------------------------------------------------------

    /// Element-wise sum (`Rel + Rel`, `Abs + Rel`)
    ///
    /// The result has the unit of `self`. Storage is sparse only when both
    /// operands are sparse.
    ///
    /// # Errors
    /// [`ValueError::IllegalCombination`] for `Abs + Abs` and `Rel + Abs`,
    /// [`ValueError::IncompatibleUnit`] for operands of different quantities,
    /// [`ValueError::SizeMismatch`] for operands of different sizes.
    pub fn plus(&self, other: &QuantityVector) -> Result<QuantityVector, ValueError> {
        let kind = Operation::Plus.result_kind(self.kind(), other.kind())?;
        self.check_same_dimensions(other)?;
        let data = self.data().plus(other.data())?;
        Ok(instantiate(kind, data, self.unit()))
    }

    /// Element-wise difference (`Rel - Rel`, `Abs - Rel`, `Abs - Abs`)
    ///
    /// `Abs - Abs` yields a relative vector in the relative counterpart of
    /// the unit of `self`.
    ///
    /// # Errors
    /// [`ValueError::IllegalCombination`] for `Rel - Abs`,
    /// [`ValueError::IncompatibleUnit`] for operands of different quantities,
    /// [`ValueError::SizeMismatch`] for operands of different sizes.
    pub fn minus(&self, other: &QuantityVector) -> Result<QuantityVector, ValueError> {
        let kind = Operation::Minus.result_kind(self.kind(), other.kind())?;
        self.check_same_dimensions(other)?;
        let data = self.data().minus(other.data())?;
        Ok(instantiate(kind, data, self.unit()))
    }

    /// Element-wise product, unit resolved in the global registry
    ///
    /// # Errors
    /// See [`QuantityVector::times_with`].
    pub fn times(&self, other: &QuantityVector) -> Result<QuantityVector, ValueError> {
        self.times_with(other, UnitRegistry::global())
    }

    /// Element-wise product of two relative vectors
    ///
    /// The result unit is the registry's unit for the summed signature, so
    /// equal signatures always give the same unit instance. Storage is dense
    /// only when both operands are dense.
    ///
    /// # Errors
    /// [`ValueError::IllegalCombination`] when either operand is absolute,
    /// [`ValueError::SizeMismatch`] for operands of different sizes,
    /// [`ValueError::InvalidInput`] when an exponent of the product signature
    /// leaves the `i8` range.
    pub fn times_with(
        &self,
        other: &QuantityVector,
        registry: &UnitRegistry,
    ) -> Result<QuantityVector, ValueError> {
        Operation::Times.result_kind(self.kind(), other.kind())?;
        let data = self.data().times(other.data())?;
        let unit = registry.resolve(self.unit().dimensions().plus(other.unit().dimensions())?);
        Ok(instantiate_rel(data, &unit))
    }

    /// Element-wise quotient, unit resolved in the global registry
    ///
    /// # Errors
    /// See [`QuantityVector::divide_with`].
    pub fn divide(&self, other: &QuantityVector) -> Result<QuantityVector, ValueError> {
        self.divide_with(other, UnitRegistry::global())
    }

    /// Element-wise quotient of two relative vectors
    ///
    /// # Errors
    /// [`ValueError::IllegalCombination`] when either operand is absolute,
    /// [`ValueError::SizeMismatch`] for operands of different sizes,
    /// [`ValueError::InvalidInput`] when an exponent of the quotient signature
    /// leaves the `i8` range.
    pub fn divide_with(
        &self,
        other: &QuantityVector,
        registry: &UnitRegistry,
    ) -> Result<QuantityVector, ValueError> {
        Operation::Divide.result_kind(self.kind(), other.kind())?;
        let data = self.data().divide(other.data())?;
        let unit = registry.resolve(self.unit().dimensions().minus(other.unit().dimensions())?);
        Ok(instantiate_rel(data, &unit))
    }

    /// Element-wise scaling by plain factors, keeping the unit of `self`
    ///
    /// # Errors
    /// [`ValueError::SizeMismatch`] when `factors` has another length.
    pub fn times_values(&self, factors: &[f64]) -> Result<QuantityVector, ValueError> {
        self.check_same_size(factors.len())?;
        let factors = VectorData::from_si(factors.to_vec(), StorageType::Dense);
        let data = self.data().times(&factors)?;
        Ok(QuantityVector::from_data(data, self.unit()))
    }

    // ------------------------------------------------------------------
    // In-place operations
    // ------------------------------------------------------------------

    /// `self += other` (`Rel += Rel`, `Abs += Rel`)
    ///
    /// # Errors
    /// [`ValueError::ImmutableValue`] on an immutable vector, otherwise as
    /// [`QuantityVector::plus`] with `Abs += Abs` rejected.
    pub fn increment_by(&mut self, other: &QuantityVector) -> Result<(), ValueError> {
        self.check_mutable()?;
        Operation::Plus.check_in_place(self.kind(), other.kind())?;
        self.check_same_dimensions(other)?;
        self.check_same_size(other.size())?;
        self.data_mut()?.increment_by(other.data())
    }

    /// `self -= other` (`Rel -= Rel`, `Abs -= Rel`)
    ///
    /// # Errors
    /// [`ValueError::ImmutableValue`] on an immutable vector,
    /// [`ValueError::IllegalCombination`] for `Abs -= Abs` (the difference is
    /// relative and cannot be written into an absolute vector) and `Rel -= Abs`,
    /// otherwise as [`QuantityVector::minus`].
    pub fn decrement_by(&mut self, other: &QuantityVector) -> Result<(), ValueError> {
        self.check_mutable()?;
        Operation::Minus.check_in_place(self.kind(), other.kind())?;
        self.check_same_dimensions(other)?;
        self.check_same_size(other.size())?;
        self.data_mut()?.decrement_by(other.data())
    }

    /// `self *= other` for a dimensionless relative `other`
    ///
    /// # Errors
    /// [`ValueError::ImmutableValue`] on an immutable vector,
    /// [`ValueError::IllegalCombination`] when either operand is absolute,
    /// [`ValueError::IncompatibleUnit`] when `other` has a dimension,
    /// [`ValueError::SizeMismatch`] for operands of different sizes.
    pub fn multiply_by(&mut self, other: &QuantityVector) -> Result<(), ValueError> {
        self.check_mutable()?;
        Operation::Times.check_in_place(self.kind(), other.kind())?;
        catalog::SI.check_compatible(other.unit())?;
        self.check_same_size(other.size())?;
        self.data_mut()?.multiply_by(other.data())
    }

    /// `self /= other` for a dimensionless relative `other`
    ///
    /// # Errors
    /// Same as [`QuantityVector::multiply_by`].
    pub fn divide_by(&mut self, other: &QuantityVector) -> Result<(), ValueError> {
        self.check_mutable()?;
        Operation::Divide.check_in_place(self.kind(), other.kind())?;
        catalog::SI.check_compatible(other.unit())?;
        self.check_same_size(other.size())?;
        self.data_mut()?.divide_by(other.data())
    }

    /// Element-wise in-place scaling by plain factors
    ///
    /// # Errors
    /// [`ValueError::ImmutableValue`] on an immutable vector,
    /// [`ValueError::SizeMismatch`] when `factors` has another length.
    pub fn multiply_by_values(&mut self, factors: &[f64]) -> Result<(), ValueError> {
        self.check_mutable()?;
        self.check_same_size(factors.len())?;
        let factors = VectorData::from_si(factors.to_vec(), StorageType::Dense);
        self.data_mut()?.multiply_by(&factors)
    }
}
