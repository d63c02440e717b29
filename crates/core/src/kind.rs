//! Absolute/relative arithmetic rules
//!
//! An absolute value is anchored to an origin (a position, a point in time, an
//! absolute temperature); a relative value is an unanchored difference or
//! magnitude (a displacement, a duration, a temperature difference).
//!
//! | left     | op  | right    | result   |
//! |----------|-----|----------|----------|
//! | Relative | +   | Relative | Relative |
//! | Absolute | +   | Relative | Absolute |
//! | Absolute | -   | Relative | Absolute |
//! | Absolute | -   | Absolute | Relative |
//! | Relative | -   | Relative | Relative |
//! | Relative | * / | Relative | Relative |
//!
//! Every other combination is rejected with [`ValueError::IllegalCombination`].
//! The sign-changing updates `abs` and `neg` apply to relative values only:
//! an absolute value negated would land on the other side of its origin.

use crate::error::ValueError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a quantity is anchored to an origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    /// Anchored to a fixed origin
    Absolute,
    /// Unanchored difference or magnitude
    Relative,
}

impl ValueKind {
    /// Short tag used in verbose rendering
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            ValueKind::Absolute => "Abs",
            ValueKind::Relative => "Rel",
        }
    }

    #[must_use]
    pub const fn is_absolute(self) -> bool {
        matches!(self, ValueKind::Absolute)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Element-wise operation on quantities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Plus,
    Minus,
    Times,
    Divide,
    /// Unary absolute value
    Abs,
    /// Unary negation
    Neg,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Plus => "+",
            Operation::Minus => "-",
            Operation::Times => "*",
            Operation::Divide => "/",
            Operation::Abs => "abs",
            Operation::Neg => "neg",
        })
    }
}

impl Operation {
    /// Kind of `left <op> right`
    ///
    /// # Errors
    /// [`ValueError::IllegalCombination`] for any combination outside the table.
    pub fn result_kind(self, left: ValueKind, right: ValueKind) -> Result<ValueKind, ValueError> {
        use ValueKind::{Absolute, Relative};

        let result = match (self, left, right) {
            (Operation::Plus, Relative, Relative) | (Operation::Minus, Relative, Relative) => {
                Some(Relative)
            }
            (Operation::Plus, Absolute, Relative) | (Operation::Minus, Absolute, Relative) => {
                Some(Absolute)
            }
            (Operation::Minus, Absolute, Absolute) => Some(Relative),
            (Operation::Times | Operation::Divide, Relative, Relative) => Some(Relative),
            _ => None,
        };

        result.ok_or(ValueError::IllegalCombination {
            operation: self,
            left,
            right,
        })
    }

    #[must_use]
    pub const fn is_unary(self) -> bool {
        matches!(self, Operation::Abs | Operation::Neg)
    }

    /// Check that the unary update `self` may be applied to a value of `kind`
    ///
    /// # Errors
    /// [`ValueError::IllegalCombination`] for an absolute operand or a binary
    /// operation.
    pub fn check_unary(self, kind: ValueKind) -> Result<(), ValueError> {
        if self.is_unary() && kind == ValueKind::Relative {
            Ok(())
        } else {
            Err(ValueError::IllegalCombination {
                operation: self,
                left: kind,
                right: kind,
            })
        }
    }

    /// Check that `left <op>= right` keeps the kind of `left`
    ///
    /// An in-place update cannot change the kind of the value it writes to, so
    /// `Absolute -= Absolute` (which yields a relative value) is rejected here
    /// although `Absolute - Absolute` is legal.
    ///
    /// # Errors
    /// [`ValueError::IllegalCombination`] when the result kind differs from `left`
    /// or the combination is illegal.
    pub fn check_in_place(self, left: ValueKind, right: ValueKind) -> Result<(), ValueError> {
        match self.result_kind(left, right) {
            Ok(kind) if kind == left => Ok(()),
            _ => Err(ValueError::IllegalCombination {
                operation: self,
                left,
                right,
            }),
        }
    }
}
