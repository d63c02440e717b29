//! Unit descriptor
//!
//! A unit binds a name and abbreviation to an SI signature, a scale and an
//! absolute/relative kind. Dimensions are plain data here: one descriptor type
//! serves every physical quantity. Units are shared as `Arc<Unit>`, which makes
//! registry results comparable by reference.

use crate::error::ValueError;
use crate::kind::ValueKind;
use crate::unit::dimensions::SiDimensions;
use crate::unit::scale::Scale;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Shared handle to a unit
pub type UnitRef = Arc<Unit>;

/// A display unit for one physical quantity
#[derive(Debug, Clone)]
pub struct Unit {
    name: Cow<'static, str>,
    abbreviation: Cow<'static, str>,
    quantity: Cow<'static, str>,
    dimensions: SiDimensions,
    scale: Scale,
    /// Relative counterpart of an absolute unit; `None` for relative units
    relative: Option<UnitRef>,
}

impl Unit {
    /// Create a relative unit (difference or magnitude)
    #[must_use]
    pub fn relative(
        name: impl Into<Cow<'static, str>>,
        abbreviation: impl Into<Cow<'static, str>>,
        quantity: impl Into<Cow<'static, str>>,
        dimensions: SiDimensions,
        scale: Scale,
    ) -> Self {
        Unit {
            name: name.into(),
            abbreviation: abbreviation.into(),
            quantity: quantity.into(),
            dimensions,
            scale,
            relative: None,
        }
    }

    /// Create an absolute unit anchored to an origin
    ///
    /// `relative` is the unit of the difference of two values in this unit;
    /// it must have the same signature and be relative itself.
    #[must_use]
    #[track_caller]
    pub fn absolute(
        name: impl Into<Cow<'static, str>>,
        abbreviation: impl Into<Cow<'static, str>>,
        quantity: impl Into<Cow<'static, str>>,
        scale: Scale,
        relative: UnitRef,
    ) -> Self {
        assert!(
            !relative.is_absolute(),
            "Unit::absolute: relative counterpart must be a relative unit"
        );
        Unit {
            name: name.into(),
            abbreviation: abbreviation.into(),
            quantity: quantity.into(),
            dimensions: relative.dimensions,
            scale,
            relative: Some(relative),
        }
    }

    /// Identity-scale unit created for a signature with no registered unit
    #[must_use]
    pub fn derived(dimensions: SiDimensions) -> Self {
        let text = dimensions.to_string();
        Unit {
            name: Cow::Owned(format!("SI unit {text}")),
            abbreviation: Cow::Owned(text),
            quantity: Cow::Borrowed("SI"),
            dimensions,
            scale: Scale::IDENTITY,
            relative: None,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn abbreviation(&self) -> &str {
        &self.abbreviation
    }

    /// Name of the physical quantity, e.g. `"Length"`
    #[must_use]
    pub fn quantity(&self) -> &str {
        &self.quantity
    }

    #[must_use]
    pub fn dimensions(&self) -> SiDimensions {
        self.dimensions
    }

    #[must_use]
    pub fn scale(&self) -> &Scale {
        &self.scale
    }

    #[must_use]
    pub fn kind(&self) -> ValueKind {
        if self.relative.is_some() {
            ValueKind::Absolute
        } else {
            ValueKind::Relative
        }
    }

    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.relative.is_some()
    }

    /// Relative counterpart of an absolute unit, `None` for a relative unit
    #[must_use]
    pub fn relative_unit(&self) -> Option<&UnitRef> {
        self.relative.as_ref()
    }

    /// Convert a value in this unit to SI
    #[inline]
    #[must_use]
    pub fn to_standard_unit(&self, value: f64) -> f64 {
        self.scale.to_standard_unit(value)
    }

    /// Convert an SI value to this unit
    #[inline]
    #[must_use]
    pub fn to_unit(&self, value_si: f64) -> f64 {
        self.scale.to_unit(value_si)
    }

    /// Same signature and same absolute/relative kind
    #[must_use]
    pub fn is_compatible(&self, other: &Unit) -> bool {
        self.dimensions == other.dimensions && self.kind() == other.kind()
    }

    /// Fail unless `other` can express values of this unit
    ///
    /// # Errors
    /// [`ValueError::IncompatibleUnit`] when signature or kind differ.
    pub fn check_compatible(&self, other: &Unit) -> Result<(), ValueError> {
        if self.is_compatible(other) {
            Ok(())
        } else {
            Err(ValueError::IncompatibleUnit {
                expected: self.describe(),
                found: other.describe(),
            })
        }
    }

    fn describe(&self) -> String {
        format!("{} [{} {}]", self.abbreviation, self.kind(), self.dimensions)
    }
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.abbreviation == other.abbreviation
            && self.dimensions == other.dimensions
            && self.scale == other.scale
            && self.kind() == other.kind()
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.abbreviation)
    }
}
