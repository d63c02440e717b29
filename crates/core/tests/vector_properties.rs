//! Behavioural properties of quantity vectors over random inputs
//!
//! Inputs come from a seeded generator so failures are reproducible. Set
//! `RUST_LOG=unitvec_core=trace` to see copy-on-write and conversion events.

use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use unitvec_core::unit::catalog::{
    ABSOLUTE_CELSIUS, ABSOLUTE_FAHRENHEIT, DEGREE_FAHRENHEIT, FOOT, KILOMETER, METER, MILE,
};
use unitvec_core::{
    QuantityVector, Scale, SiDimensions, StorageType, UnitRegistry, ValueError, ValueKind,
};

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

const SEED: u64 = 0x5EED_0001;

/// Random SI array with roughly half of the entries zero
fn random_array(rng: &mut StdRng, len: usize) -> Vec<f64> {
    (0..len)
        .map(|_| {
            if rng.random_bool(0.5) {
                0.0
            } else {
                rng.random_range(-1.0e6..1.0e6)
            }
        })
        .collect()
}

fn random_lengths(rng: &mut StdRng) -> impl Iterator<Item = Vec<f64>> + '_ {
    // includes lengths around the parallel threshold
    [1usize, 2, 7, 64, 999, 1000, 1001, 2500]
        .into_iter()
        .map(move |len| random_array(rng, len))
}

#[test]
fn dense_and_sparse_read_the_same_values() {
    let mut rng = StdRng::seed_from_u64(SEED);
    for raw in random_lengths(&mut rng) {
        let dense = QuantityVector::from_si(raw.clone(), &METER, StorageType::Dense).unwrap();
        let sparse = QuantityVector::from_si(raw.clone(), &METER, StorageType::Sparse).unwrap();
        for i in 0..raw.len() {
            assert_eq!(dense.get_si(i), sparse.get_si(i), "index {i}");
        }
        assert_eq!(dense, sparse);
    }
}

#[test]
fn storage_round_trip_is_exact() {
    let mut rng = StdRng::seed_from_u64(SEED + 1);
    for raw in random_lengths(&mut rng) {
        for storage in [StorageType::Dense, StorageType::Sparse] {
            let v = QuantityVector::from_si(raw.clone(), &METER, storage).unwrap();
            assert_eq!(v.to_sparse().to_dense().values_si(), raw);
            assert_eq!(v.to_dense().to_sparse().values_si(), raw);
        }
    }
}

#[test]
fn storage_conversion_is_idempotent() {
    let mut rng = StdRng::seed_from_u64(SEED + 2);
    for raw in random_lengths(&mut rng) {
        let v = QuantityVector::from_si(raw, &METER, StorageType::Dense).unwrap();
        let dense = v.to_dense();
        let sparse = v.to_sparse();
        assert_eq!(dense.to_dense().storage_type(), StorageType::Dense);
        assert_eq!(dense.to_dense().values_si(), dense.values_si());
        assert_eq!(sparse.to_sparse().storage_type(), StorageType::Sparse);
        assert_eq!(sparse.to_sparse().values_si(), sparse.values_si());
    }
}

#[test]
fn cardinality_counts_nonzero_values() {
    let mut rng = StdRng::seed_from_u64(SEED + 3);
    for raw in random_lengths(&mut rng) {
        let expected = raw.iter().filter(|&&v| v != 0.0).count();
        let sparse = QuantityVector::from_si(raw, &METER, StorageType::Sparse).unwrap();
        assert_eq!(sparse.cardinality(), expected);
        assert_eq!(sparse.to_dense().cardinality(), expected);
    }
}

#[test]
fn unit_scales_round_trip() {
    let mut rng = StdRng::seed_from_u64(SEED + 4);
    let scales = [
        Scale::linear(1000.0),
        Scale::linear(0.3048),
        Scale::linear(1609.344),
        Scale::offset_linear(1.0, 273.15),
        Scale::offset_linear(5.0 / 9.0, 459.67),
    ];
    for _ in 0..1000 {
        let x: f64 = rng.random_range(-1.0e4..1.0e4);
        for scale in &scales {
            assert_relative_eq!(
                scale.to_unit(scale.to_standard_unit(x)),
                x,
                epsilon = 1e-9,
                max_relative = 1e-12
            );
        }
    }
}

#[test]
fn mutable_view_never_leaks_into_its_source() {
    let a = QuantityVector::new(&[1.0, 2.0, 3.0], &METER, StorageType::Dense).unwrap();
    let mut m = a.mutable();
    m.set_si(0, 10.0).unwrap();
    assert_eq!(a.values_si(), vec![1.0, 2.0, 3.0]);

    let b = m.immutable();
    m.increment_by_si(1.0).unwrap();
    assert_eq!(b.values_si(), vec![10.0, 2.0, 3.0]);
    assert_eq!(m.values_si(), vec![11.0, 3.0, 4.0]);
    assert_eq!(a.values_si(), vec![1.0, 2.0, 3.0]);
}

#[test]
fn copy_on_write_holds_over_many_generations() {
    let original = QuantityVector::new(&[0.0, 5.0, 0.0, 3.0, 0.0], &METER, StorageType::Sparse).unwrap();
    let mut snapshots = vec![original.clone()];
    let mut current = original.mutable();

    for generation in 1..=10 {
        current.set_si(generation % 5, f64::from(generation as u32)).unwrap();
        snapshots.push(current.immutable());
        current = current.immutable().mutable();
    }

    assert_eq!(snapshots[0].values_si(), vec![0.0, 5.0, 0.0, 3.0, 0.0]);
    for (generation, snapshot) in snapshots.iter().enumerate().skip(1) {
        let index = generation % 5;
        assert_eq!(snapshot.get_si(index), Ok(generation as f64), "generation {generation}");
    }
    assert_eq!(original.values_si(), vec![0.0, 5.0, 0.0, 3.0, 0.0]);
}

#[test]
fn e2e_dense_and_sparse_summary() {
    let raw = [0.0, 5.0, 0.0, 3.0, 0.0];
    for storage in [StorageType::Dense, StorageType::Sparse] {
        let v = QuantityVector::new(&raw, &METER, storage).unwrap();
        assert_eq!(v.size(), 5);
        assert_eq!(v.cardinality(), 2);
        assert_eq!(v.z_sum(), 8.0);
    }
}

#[test]
fn e2e_sparse_plus_sparse_stays_sparse() {
    let a = QuantityVector::new(&[0.0, 5.0, 0.0, 3.0, 0.0], &METER, StorageType::Sparse).unwrap();
    let b = QuantityVector::new(&[1.0, 0.0, 1.0, 0.0, 1.0], &METER, StorageType::Sparse).unwrap();
    let sum = a.plus(&b).unwrap();
    assert_eq!(sum.storage_type(), StorageType::Sparse);
    assert_eq!(sum.values_si(), vec![1.0, 5.0, 1.0, 3.0, 1.0]);
    assert_eq!(sum.cardinality(), 5);
}

#[test]
fn e2e_scaled_unit_reads_back() {
    let v = QuantityVector::new(&[1.0], &KILOMETER, StorageType::Dense).unwrap();
    assert_eq!(v.get_si(0), Ok(1000.0));
    assert_eq!(v.get_in_unit(0), Ok(1.0));
}

#[test]
fn e2e_length_times_length_is_cached_area() {
    let registry = UnitRegistry::new();
    let a = QuantityVector::new(&[1.0, 2.0], &METER, StorageType::Dense).unwrap();
    let b = QuantityVector::new(&[3.0, 4.0], &FOOT, StorageType::Sparse).unwrap();

    let first = a.times_with(&b, &registry).unwrap();
    assert_eq!(first.unit().dimensions().exponents()[0], 2);
    assert_eq!(first.unit().dimensions(), SiDimensions::LENGTH.plus(SiDimensions::LENGTH).unwrap());

    let c = QuantityVector::new(&[9.0], &MILE, StorageType::Dense).unwrap();
    let again = c.times_with(&c, &registry).unwrap();
    assert!(Arc::ptr_eq(first.unit(), again.unit()));

    // the global registry gives the same guarantee
    let g1 = a.times(&b).unwrap();
    let g2 = c.times(&c).unwrap();
    assert!(Arc::ptr_eq(g1.unit(), g2.unit()));
}

#[test]
fn concurrent_products_share_one_unit() {
    let registry = UnitRegistry::new();
    let v = QuantityVector::new(&[1.0, 2.0, 3.0], &METER, StorageType::Dense).unwrap();
    let units: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| v.times_with(&v, &registry).unwrap().unit().clone()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert!(units.iter().all(|u| Arc::ptr_eq(u, &units[0])));
}

#[test]
fn absolute_relative_rules_are_enforced() {
    let today = QuantityVector::new(&[20.0, 25.0], &ABSOLUTE_CELSIUS, StorageType::Dense).unwrap();
    let yesterday = QuantityVector::new(&[68.0, 68.0], &ABSOLUTE_FAHRENHEIT, StorageType::Dense).unwrap();

    let change = today.minus(&yesterday).unwrap();
    assert_eq!(change.kind(), ValueKind::Relative);
    let change_c = change.values_in_unit();
    assert_relative_eq!(change_c[0], 0.0, epsilon = 1e-9);
    assert_relative_eq!(change_c[1], 5.0, epsilon = 1e-9);

    let warmer = today.plus(&change).unwrap();
    assert_eq!(warmer.kind(), ValueKind::Absolute);

    assert!(matches!(today.plus(&yesterday), Err(ValueError::IllegalCombination { .. })));
    assert!(matches!(today.times(&change), Err(ValueError::IllegalCombination { .. })));

    let step = QuantityVector::new(&[9.0, 9.0], &DEGREE_FAHRENHEIT, StorageType::Dense).unwrap();
    let shifted = today.plus(&step).unwrap();
    assert_relative_eq!(shifted.get_in_unit(0).unwrap(), 25.0, epsilon = 1e-9);
}

#[test]
fn errors_are_reported_not_coerced() {
    let a = QuantityVector::new(&[1.0, 2.0], &METER, StorageType::Dense).unwrap();
    let b = QuantityVector::new(&[1.0, 2.0, 3.0], &METER, StorageType::Dense).unwrap();
    assert_eq!(a.minus(&b).unwrap_err(), ValueError::SizeMismatch { left: 2, right: 3 });
    assert_eq!(a.get_si(2).unwrap_err(), ValueError::IndexOutOfRange { index: 2, size: 2 });
    assert!(matches!(
        QuantityVector::new(&[], &METER, StorageType::Dense),
        Err(ValueError::InvalidInput(_))
    ));
    assert_eq!(
        "diagonal".parse::<StorageType>(),
        Err(ValueError::UnknownStorageKind("diagonal".to_string()))
    );

    let mut m = a.mutable();
    assert_eq!(m.set_si(7, 1.0), Err(ValueError::IndexOutOfRange { index: 7, size: 2 }));
    assert_eq!(m.size(), 2);
}

#[test]
fn sparse_mutation_grows_in_place() {
    let mut rng = StdRng::seed_from_u64(SEED + 5);
    let raw = random_array(&mut rng, 200);
    let mut sparse = QuantityVector::from_si(raw.clone(), &METER, StorageType::Sparse)
        .unwrap()
        .mutable();
    let mut dense = QuantityVector::from_si(raw, &METER, StorageType::Dense)
        .unwrap()
        .mutable();

    let other = QuantityVector::from_si(random_array(&mut rng, 200), &METER, StorageType::Dense).unwrap();
    sparse.increment_by(&other).unwrap();
    dense.increment_by(&other).unwrap();

    assert_eq!(sparse.storage_type(), StorageType::Sparse);
    assert_eq!(dense.storage_type(), StorageType::Dense);
    assert_eq!(sparse, dense);
}
