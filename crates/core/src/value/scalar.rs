//! Single quantity value

use crate::error::ValueError;
use crate::kind::ValueKind;
use crate::unit::{Unit, UnitRef};
use std::fmt;
use std::sync::Arc;

/// One SI magnitude tagged with its display unit
#[derive(Debug, Clone)]
pub struct Scalar {
    si: f64,
    unit: UnitRef,
}

impl Scalar {
    /// Create from a value expressed in `unit`
    #[must_use]
    pub fn new(value: f64, unit: &UnitRef) -> Self {
        Self {
            si: unit.to_standard_unit(value),
            unit: Arc::clone(unit),
        }
    }

    /// Create from a value that is already SI
    #[must_use]
    pub fn from_si(si: f64, unit: &UnitRef) -> Self {
        Self {
            si,
            unit: Arc::clone(unit),
        }
    }

    #[inline]
    #[must_use]
    pub fn si(&self) -> f64 {
        self.si
    }

    /// Value expressed in the display unit
    #[inline]
    #[must_use]
    pub fn in_unit(&self) -> f64 {
        self.unit.to_unit(self.si)
    }

    /// Value expressed in another unit of the same quantity
    ///
    /// # Errors
    /// [`ValueError::IncompatibleUnit`] when `unit` has another signature or kind.
    pub fn in_unit_as(&self, unit: &Unit) -> Result<f64, ValueError> {
        self.unit.check_compatible(unit)?;
        Ok(unit.to_unit(self.si))
    }

    #[must_use]
    pub fn unit(&self) -> &UnitRef {
        &self.unit
    }

    #[must_use]
    pub fn kind(&self) -> ValueKind {
        self.unit.kind()
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        self.si == other.si && *self.unit == *other.unit
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.in_unit(), self.unit.abbreviation())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::catalog::{ABSOLUTE_CELSIUS, ABSOLUTE_KELVIN, KILOMETER, METER, SECOND};
    use approx::assert_relative_eq;

    #[test]
    fn test_conversion() {
        let distance = Scalar::new(2.5, &KILOMETER);
        assert_eq!(distance.si(), 2500.0);
        assert_eq!(distance.in_unit(), 2.5);
        assert_eq!(distance.in_unit_as(&METER), Ok(2500.0));
        assert!(distance.in_unit_as(&SECOND).is_err());
    }

    #[test]
    fn test_absolute_temperature() {
        let boiling = Scalar::new(100.0, &ABSOLUTE_CELSIUS);
        assert_eq!(boiling.kind(), ValueKind::Absolute);
        assert_relative_eq!(boiling.in_unit_as(&ABSOLUTE_KELVIN).unwrap(), 373.15, epsilon = 1e-12);
    }

    #[test]
    fn test_display() {
        assert_eq!(Scalar::new(3.0, &METER).to_string(), "3 m");
    }
}
