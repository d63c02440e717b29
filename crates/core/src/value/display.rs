//! Text rendering: `"[ v1 v2 ... vn] unit"`
//!
//! The verbose form starts with the mutability, kind and storage tags, e.g.
//! `"Immutable Rel Sparse [ 0 5 0 3 0] m"`.

use crate::error::ValueError;
use crate::unit::Unit;
use crate::value::vector::QuantityVector;
use std::fmt::{self, Write};

impl QuantityVector {
    /// Render with values expressed in `unit`
    ///
    /// # Errors
    /// [`ValueError::IncompatibleUnit`] when `unit` is of another quantity.
    pub fn to_string_with(&self, unit: &Unit, verbose: bool, with_unit: bool) -> Result<String, ValueError> {
        self.unit().check_compatible(unit)?;
        Ok(self.render(unit, verbose, with_unit))
    }

    /// Render in the display unit
    #[must_use]
    pub fn to_string_verbose(&self, verbose: bool, with_unit: bool) -> String {
        self.render(self.unit(), verbose, with_unit)
    }

    fn render(&self, unit: &Unit, verbose: bool, with_unit: bool) -> String {
        let mut buf = String::with_capacity(8 + self.size() * 8);
        if verbose {
            buf.push_str(if self.is_mutable() { "Mutable   " } else { "Immutable " });
            buf.push_str(self.kind().tag());
            buf.push(' ');
            buf.push_str(self.storage_type().tag());
        }
        buf.push('[');
        for si in self.data().dense_image().iter() {
            // writing to a String cannot fail
            let _ = write!(buf, " {}", unit.to_unit(*si));
        }
        buf.push(']');
        if with_unit {
            buf.push(' ');
            buf.push_str(unit.abbreviation());
        }
        buf
    }
}

impl fmt::Display for QuantityVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(self.unit(), false, true))
    }
}

#[cfg(test)]
mod tests {
    use crate::storage::StorageType;
    use crate::unit::catalog::{KILOMETER, METER, POSITION_METER, SECOND};
    use crate::value::vector::QuantityVector;

    #[test]
    fn test_plain_rendering() {
        let v = QuantityVector::new(&[0.0, 5.0, 0.0, 3.5, 0.0], &METER, StorageType::Sparse).unwrap();
        assert_eq!(v.to_string(), "[ 0 5 0 3.5 0] m");
        assert_eq!(v.to_string_verbose(false, false), "[ 0 5 0 3.5 0]");
    }

    #[test]
    fn test_verbose_rendering() {
        let v = QuantityVector::new(&[1.0, 2.0], &METER, StorageType::Sparse).unwrap();
        assert_eq!(v.to_string_verbose(true, true), "Immutable Rel Sparse [ 1 2] m");

        let m = QuantityVector::new(&[1.0], &POSITION_METER, StorageType::Dense)
            .unwrap()
            .mutable();
        assert_eq!(m.to_string_verbose(true, true), "Mutable   Abs Dense  [ 1] m");
    }

    #[test]
    fn test_render_in_other_unit() {
        let v = QuantityVector::new(&[1500.0, 250.0], &METER, StorageType::Dense).unwrap();
        assert_eq!(v.to_string_with(&KILOMETER, false, true).unwrap(), "[ 1.5 0.25] km");
        assert!(v.to_string_with(&SECOND, false, true).is_err());
    }
}
