//! Quantity values: scalars and vectors with units

mod arithmetic;
mod display;
mod scalar;
mod vector;

pub use scalar::Scalar;
pub use vector::QuantityVector;
