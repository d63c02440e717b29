//! Typed physical-quantity vectors
//!
//! Arrays of measurement magnitudes tagged with a unit, stored in SI and
//! converted to display units on read. Vectors come in a dense and a sparse
//! layout, support element-wise arithmetic under absolute/relative rules, and
//! resolve the unit of products and quotients through a shared registry.
//!
//! ## Overview
//!
//! - [`unit`]: SI signatures, linear/affine scales, the unit catalog and the
//!   derived-unit registry
//! - [`storage`]: dense and sparse magnitude arrays and their algebra
//! - [`value`]: scalars and copy-on-write quantity vectors
//! - [`kind`]: which absolute/relative combinations are legal
//!
//! ```
//! use unitvec_core::unit::catalog::{KILOMETER, METER, SQUARE_METER};
//! use unitvec_core::{QuantityVector, StorageType};
//!
//! let a = QuantityVector::new(&[1.0, 2.0], &KILOMETER, StorageType::Dense)?;
//! let b = QuantityVector::new(&[500.0, 0.0], &METER, StorageType::Sparse)?;
//! assert_eq!(a.plus(&b)?.to_string(), "[ 1.5 2] km");
//!
//! let area = b.times(&b)?;
//! assert!(std::sync::Arc::ptr_eq(area.unit(), &SQUARE_METER));
//! # Ok::<(), unitvec_core::ValueError>(())
//! ```

pub mod config;
pub mod error;
pub mod kind;
pub mod storage;
pub mod unit;
pub mod value;

pub use config::EngineConfig;
pub use error::ValueError;
pub use kind::{Operation, ValueKind};
pub use storage::{StorageType, VectorData};
pub use unit::{Scale, SiDimensions, Unit, UnitRef, UnitRegistry};
pub use value::{QuantityVector, Scalar};
