//! Derived-unit registry
//!
//! Multiplying or dividing two quantities produces a new SI signature. The
//! registry maps each signature to exactly one unit: a registered catalog unit
//! when one exists, otherwise an identity-scale unit created on first request.
//! Lookup-or-insert happens under one lock, so two threads resolving the same
//! new signature at the same time receive the same `Arc`.

use crate::error::ValueError;
use crate::kind::ValueKind;
use crate::unit::catalog;
use crate::unit::definition::{Unit, UnitRef};
use crate::unit::dimensions::SiDimensions;
use rustc_hash::FxHashMap;
use std::sync::{Arc, LazyLock, Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

static GLOBAL_REGISTRY: LazyLock<UnitRegistry> = LazyLock::new(UnitRegistry::with_standard_units);

/// Signature -> unit cache shared by every product and quotient
#[derive(Debug, Default)]
pub struct UnitRegistry {
    units: Mutex<FxHashMap<SiDimensions, UnitRef>>,
}

impl UnitRegistry {
    /// Empty registry; every resolution creates a derived unit
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry seeded with the identity-scale units of the catalog
    #[must_use]
    pub fn with_standard_units() -> Self {
        let registry = Self::new();
        for unit in catalog::standard_units() {
            if let Err(err) = registry.register(unit) {
                warn!(%err, "Skipped catalog unit while seeding the unit registry");
            }
        }
        debug!(units = registry.len(), "Unit registry seeded with standard units");
        registry
    }

    /// Process-wide registry used by the operations without a `_with` suffix
    pub fn global() -> &'static UnitRegistry {
        &GLOBAL_REGISTRY
    }

    /// The unit for `dimensions`, creating and caching it if needed
    pub fn resolve(&self, dimensions: SiDimensions) -> UnitRef {
        let mut units = self.lock();
        let unit = units.entry(dimensions).or_insert_with(|| {
            debug!(signature = %dimensions, "Created derived unit");
            Arc::new(Unit::derived(dimensions))
        });
        Arc::clone(unit)
    }

    /// The unit for `dimensions` if one was registered or resolved before
    pub fn lookup(&self, dimensions: SiDimensions) -> Option<UnitRef> {
        self.lock().get(&dimensions).cloned()
    }

    /// Register `unit` as the unit of its signature
    ///
    /// The first unit registered for a signature wins; the unit that ends up
    /// registered is returned either way.
    ///
    /// # Errors
    /// [`ValueError::InvalidInput`] for an absolute unit or a unit whose scale
    /// is not the identity, since results of products are stored in SI.
    pub fn register(&self, unit: UnitRef) -> Result<UnitRef, ValueError> {
        if unit.kind() != ValueKind::Relative || !unit.scale().is_base_si() {
            return Err(ValueError::InvalidInput(format!(
                "Only relative SI units can be registered, got {}",
                unit.name()
            )));
        }
        let mut units = self.lock();
        Ok(Arc::clone(units.entry(unit.dimensions()).or_insert(unit)))
    }

    /// Number of cached signatures
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // The map is insert-only, so a panic while holding the lock cannot leave it
    // half-updated.
    fn lock(&self) -> MutexGuard<'_, FxHashMap<SiDimensions, UnitRef>> {
        self.units.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
