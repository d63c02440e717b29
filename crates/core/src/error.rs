//! Error type shared by every value operation
//!
//! Bad input is reported to the caller, never coerced: a vector is never
//! resized to make a size mismatch fit and an index is never clamped.

use crate::kind::{Operation, ValueKind};

/// Errors that can occur when building, reading or combining quantity values
#[derive(Debug, Clone, PartialEq)]
pub enum ValueError {
    /// Empty backing collection or otherwise unusable constructor input
    InvalidInput(String),
    /// Binary operation between operands of unequal length
    SizeMismatch {
        /// Size of the left operand
        left: usize,
        /// Size of the right operand
        right: usize,
    },
    /// Index outside `0..size`
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Logical length of the vector
        size: usize,
    },
    /// Absolute/relative combination that has no meaning (e.g. absolute + absolute)
    IllegalCombination {
        /// Attempted operation
        operation: Operation,
        /// Kind of the left operand
        left: ValueKind,
        /// Kind of the right operand
        right: ValueKind,
    },
    /// Storage kind name that is neither dense nor sparse
    UnknownStorageKind(String),
    /// Unit of another dimension, or absolute where relative is expected (or vice versa)
    IncompatibleUnit {
        /// Unit the operation requires a match with
        expected: String,
        /// Unit that was supplied
        found: String,
    },
    /// Mutating call on an immutable vector
    ImmutableValue,
}

impl std::fmt::Display for ValueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueError::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
            ValueError::SizeMismatch { left, right } => {
                write!(f, "Operands have different sizes: {left} != {right}")
            }
            ValueError::IndexOutOfRange { index, size } => {
                write!(f, "Index {index} out of range for size {size}")
            }
            ValueError::IllegalCombination {
                operation,
                left,
                right,
            } => {
                if operation.is_unary() {
                    write!(f, "Illegal operation: {operation} on {left}")
                } else {
                    write!(f, "Illegal combination: {left} {operation} {right}")
                }
            }
            ValueError::UnknownStorageKind(name) => write!(f, "Unknown storage kind: {name}"),
            ValueError::IncompatibleUnit { expected, found } => {
                write!(f, "Unit {found} is not compatible with {expected}")
            }
            ValueError::ImmutableValue => write!(f, "Attempt to change an immutable vector"),
        }
    }
}

impl std::error::Error for ValueError {}
