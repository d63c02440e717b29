//! SI-coefficient signatures
//!
//! A signature is the exponent vector of a unit over the base dimensions
//! m, kg, s, A, K, mol, cd and money. Multiplying two quantities adds their
//! signatures, dividing subtracts them. The signature doubles as the lookup
//! key of the derived-unit registry.

use crate::error::ValueError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of base dimensions in a signature
pub const NUMBER_DIMENSIONS: usize = 8;

/// Abbreviations of the base dimensions, in signature order
pub const SI_ABBREVIATIONS: [&str; NUMBER_DIMENSIONS] = ["m", "kg", "s", "A", "K", "mol", "cd", "$"];

/// Exponents over (m, kg, s, A, K, mol, cd, money)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SiDimensions([i8; NUMBER_DIMENSIONS]);

impl SiDimensions {
    pub const DIMENSIONLESS: SiDimensions = SiDimensions([0, 0, 0, 0, 0, 0, 0, 0]);
    pub const LENGTH: SiDimensions = SiDimensions([1, 0, 0, 0, 0, 0, 0, 0]);
    pub const MASS: SiDimensions = SiDimensions([0, 1, 0, 0, 0, 0, 0, 0]);
    pub const TIME: SiDimensions = SiDimensions([0, 0, 1, 0, 0, 0, 0, 0]);
    pub const CURRENT: SiDimensions = SiDimensions([0, 0, 0, 1, 0, 0, 0, 0]);
    pub const TEMPERATURE: SiDimensions = SiDimensions([0, 0, 0, 0, 1, 0, 0, 0]);
    pub const AMOUNT_OF_SUBSTANCE: SiDimensions = SiDimensions([0, 0, 0, 0, 0, 1, 0, 0]);
    pub const LUMINOUS_INTENSITY: SiDimensions = SiDimensions([0, 0, 0, 0, 0, 0, 1, 0]);
    pub const MONEY: SiDimensions = SiDimensions([0, 0, 0, 0, 0, 0, 0, 1]);

    /// Build a signature from raw exponents in (m, kg, s, A, K, mol, cd, money) order
    #[must_use]
    pub const fn new(exponents: [i8; NUMBER_DIMENSIONS]) -> Self {
        SiDimensions(exponents)
    }

    /// Exponents in signature order
    #[must_use]
    pub const fn exponents(&self) -> [i8; NUMBER_DIMENSIONS] {
        self.0
    }

    /// Signature of a product: exponents added
    ///
    /// # Errors
    /// [`ValueError::InvalidInput`] when an exponent leaves the `i8` range.
    pub fn plus(self, other: SiDimensions) -> Result<SiDimensions, ValueError> {
        self.combine(other, i8::checked_add, "*")
    }

    /// Signature of a quotient: exponents subtracted
    ///
    /// # Errors
    /// [`ValueError::InvalidInput`] when an exponent leaves the `i8` range.
    pub fn minus(self, other: SiDimensions) -> Result<SiDimensions, ValueError> {
        self.combine(other, i8::checked_sub, "/")
    }

    /// Signature of the reciprocal
    ///
    /// # Errors
    /// [`ValueError::InvalidInput`] when an exponent is `i8::MIN`.
    pub fn invert(self) -> Result<SiDimensions, ValueError> {
        SiDimensions::DIMENSIONLESS.minus(self)
    }

    fn combine(
        self,
        other: SiDimensions,
        op: fn(i8, i8) -> Option<i8>,
        symbol: &str,
    ) -> Result<SiDimensions, ValueError> {
        let mut dims = [0i8; NUMBER_DIMENSIONS];
        for (i, d) in dims.iter_mut().enumerate() {
            *d = op(self.0[i], other.0[i]).ok_or_else(|| {
                ValueError::InvalidInput(format!(
                    "Exponent of {} overflows in ({self}) {symbol} ({other})",
                    SI_ABBREVIATIONS[i]
                ))
            })?;
        }
        Ok(SiDimensions(dims))
    }

    #[must_use]
    pub fn is_dimensionless(&self) -> bool {
        *self == SiDimensions::DIMENSIONLESS
    }

    /// Parse the canonical text form, e.g. `"kg.m/s2"`, `"m.s-2"`, `"1/s"` or `"1"`
    ///
    /// # Errors
    /// [`ValueError::InvalidInput`] when the text has more than one `/`, an
    /// unknown symbol or a malformed exponent.
    pub fn parse(text: &str) -> Result<SiDimensions, ValueError> {
        let text = text.trim();
        let mut parts = text.split('/');
        let numerator = parse_product(parts.next().unwrap_or(""), text)?;
        let result = match parts.next() {
            Some(denominator) => numerator.minus(parse_product(denominator, text)?)?,
            None => numerator,
        };
        if parts.next().is_some() {
            return Err(ValueError::InvalidInput(format!(
                "SI string {text} contains more than one division sign"
            )));
        }
        Ok(result)
    }
}

/// Parse `"kg.m2.s-1"` style products
fn parse_product(part: &str, full: &str) -> Result<SiDimensions, ValueError> {
    let mut dims = [0i8; NUMBER_DIMENSIONS];
    let part = part.trim();
    if part.is_empty() || part == "1" {
        return Ok(SiDimensions(dims));
    }

    for token in part.split('.') {
        // longest symbol first so "mol" is not read as "m" + "ol"
        let (slot, rest) = SI_ABBREVIATIONS
            .iter()
            .enumerate()
            .filter(|(_, symbol)| token.starts_with(**symbol))
            .max_by_key(|(_, symbol)| symbol.len())
            .map(|(slot, symbol)| (slot, &token[symbol.len()..]))
            .ok_or_else(|| {
                ValueError::InvalidInput(format!("Unknown symbol {token:?} in SI string {full}"))
            })?;

        let exponent = if rest.is_empty() {
            1
        } else {
            rest.parse::<i8>().map_err(|_| {
                ValueError::InvalidInput(format!("Malformed exponent {rest:?} in SI string {full}"))
            })?
        };
        dims[slot] = dims[slot].checked_add(exponent).ok_or_else(|| {
            ValueError::InvalidInput(format!(
                "Exponent of {} out of range in SI string {full}",
                SI_ABBREVIATIONS[slot]
            ))
        })?;
    }
    Ok(SiDimensions(dims))
}

impl FromStr for SiDimensions {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SiDimensions::parse(s)
    }
}

impl fmt::Display for SiDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_side(
            f: &mut fmt::Formatter<'_>,
            dims: &[i8; NUMBER_DIMENSIONS],
            positive: bool,
        ) -> fmt::Result {
            let mut first = true;
            for (i, &exp) in dims.iter().enumerate() {
                // widened so that -i8::MIN does not overflow
                let exp = i16::from(exp);
                let exp = if positive { exp } else { -exp };
                if exp <= 0 {
                    continue;
                }
                if !first {
                    f.write_str(".")?;
                }
                first = false;
                f.write_str(SI_ABBREVIATIONS[i])?;
                if exp != 1 {
                    write!(f, "{exp}")?;
                }
            }
            Ok(())
        }

        let has_positive = self.0.iter().any(|&d| d > 0);
        let has_negative = self.0.iter().any(|&d| d < 0);
        if has_positive {
            write_side(f, &self.0, true)?;
        } else {
            f.write_str("1")?;
        }
        if has_negative {
            f.write_str("/")?;
            write_side(f, &self.0, false)?;
        }
        Ok(())
    }
}
