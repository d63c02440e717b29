//! Conversion between a display unit and the SI standard unit
//!
//! Values are always stored in the SI unit; a scale is only consulted when a
//! raw value enters a vector or when a stored value is read out in a unit.

use serde::{Deserialize, Serialize};

/// Linear or affine map from a display-unit value to its SI value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Scale {
    /// `si = value * factor`
    Linear {
        /// Multiplier to the SI unit
        factor: f64,
    },
    /// `si = (value + offset) * factor`, e.g. degrees Celsius to kelvin
    OffsetLinear {
        /// Multiplier to the SI unit, applied after the offset
        factor: f64,
        /// Zero-point shift in display units
        offset: f64,
    },
}

impl Scale {
    /// Scale of an SI standard unit
    pub const IDENTITY: Scale = Scale::Linear { factor: 1.0 };

    /// Create a linear scale. Asserts a finite, non-zero factor.
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn linear(factor: f64) -> Self {
        assert!(
            factor.is_finite() && factor != 0.0,
            "Scale::linear: factor must be finite and non-zero"
        );
        Scale::Linear { factor }
    }

    /// Create an affine scale. Asserts a finite, non-zero factor and a finite offset.
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn offset_linear(factor: f64, offset: f64) -> Self {
        assert!(
            factor.is_finite() && factor != 0.0,
            "Scale::offset_linear: factor must be finite and non-zero"
        );
        assert!(offset.is_finite(), "Scale::offset_linear: offset must be finite");
        Scale::OffsetLinear { factor, offset }
    }

    /// Convert a display-unit value to the SI unit
    #[inline]
    #[must_use]
    pub fn to_standard_unit(&self, value: f64) -> f64 {
        match *self {
            Scale::Linear { factor } => value * factor,
            Scale::OffsetLinear { factor, offset } => (value + offset) * factor,
        }
    }

    /// Convert an SI value to the display unit
    #[inline]
    #[must_use]
    pub fn to_unit(&self, value_si: f64) -> f64 {
        match *self {
            Scale::Linear { factor } => value_si / factor,
            Scale::OffsetLinear { factor, offset } => value_si / factor - offset,
        }
    }

    /// Multiplier to the SI unit (ignores any offset)
    #[must_use]
    pub fn factor(&self) -> f64 {
        match *self {
            Scale::Linear { factor } | Scale::OffsetLinear { factor, .. } => factor,
        }
    }

    /// True when conversion is the identity, so raw values can be stored as-is
    #[must_use]
    pub fn is_base_si(&self) -> bool {
        matches!(*self, Scale::Linear { factor } if factor == 1.0)
    }
}

impl Default for Scale {
    fn default() -> Self {
        Scale::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_round_trip() {
        let km = Scale::linear(1000.0);
        assert_eq!(km.to_standard_unit(1.0), 1000.0);
        assert_eq!(km.to_unit(1000.0), 1.0);
        for x in [-3.5, 0.0, 1e-9, 42.0, 7.25e12] {
            assert_relative_eq!(km.to_unit(km.to_standard_unit(x)), x, max_relative = 1e-15);
        }
    }

    #[test]
    fn test_offset_round_trip() {
        let fahrenheit = Scale::offset_linear(5.0 / 9.0, 459.67);
        assert_relative_eq!(fahrenheit.to_standard_unit(32.0), 273.15, epsilon = 1e-9);
        assert_relative_eq!(fahrenheit.to_unit(373.15), 212.0, epsilon = 1e-9);
        for x in [-459.67, -40.0, 0.0, 98.6, 1000.0] {
            assert_relative_eq!(
                fahrenheit.to_unit(fahrenheit.to_standard_unit(x)),
                x,
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn test_celsius_zero_is_not_zero_si() {
        let celsius = Scale::offset_linear(1.0, 273.15);
        assert_eq!(celsius.to_standard_unit(0.0), 273.15);
        assert!(!celsius.is_base_si());
    }

    #[test]
    fn test_identity() {
        assert!(Scale::IDENTITY.is_base_si());
        assert!(!Scale::linear(0.3048).is_base_si());
        assert_eq!(Scale::default(), Scale::IDENTITY);
    }

    #[test]
    #[should_panic(expected = "Scale::linear: factor must be finite and non-zero")]
    fn test_zero_factor_panics() {
        let _ = Scale::linear(0.0);
    }
}
