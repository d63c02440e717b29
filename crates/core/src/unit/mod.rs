//! Units, scales and SI signatures

pub mod catalog;
mod definition;
mod dimensions;
mod registry;
mod scale;

pub use definition::{Unit, UnitRef};
pub use dimensions::{SiDimensions, NUMBER_DIMENSIONS, SI_ABBREVIATIONS};
pub use registry::UnitRegistry;
pub use scale::Scale;
