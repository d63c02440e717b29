//! Element-wise loops
//!
//! Every output cell depends only on the same index of the inputs, so long
//! arrays are split across the rayon pool. Below the configured threshold (or
//! without the `parallel` feature) the loops run on the calling thread. Both
//! paths evaluate the same closure per cell and give identical results.

#[cfg(feature = "parallel")]
use crate::config::EngineConfig;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[cfg(feature = "parallel")]
#[inline]
fn parallel(len: usize) -> bool {
    EngineConfig::current().is_parallel(len)
}

/// `out[i] = op(values[i])`
pub(crate) fn map<F>(values: &[f64], op: F) -> Vec<f64>
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    #[cfg(feature = "parallel")]
    if parallel(values.len()) {
        return values.par_iter().map(|&v| op(v)).collect();
    }
    values.iter().map(|&v| op(v)).collect()
}

/// `values[i] = op(values[i])`
pub(crate) fn map_in_place<F>(values: &mut [f64], op: F)
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    #[cfg(feature = "parallel")]
    if parallel(values.len()) {
        values.par_iter_mut().for_each(|v| *v = op(*v));
        return;
    }
    for v in values.iter_mut() {
        *v = op(*v);
    }
}

/// `out[i] = op(left[i], right[i])`; callers check that the lengths match
pub(crate) fn zip_map<F>(left: &[f64], right: &[f64], op: F) -> Vec<f64>
where
    F: Fn(f64, f64) -> f64 + Send + Sync,
{
    debug_assert_eq!(left.len(), right.len());
    #[cfg(feature = "parallel")]
    if parallel(left.len()) {
        return left
            .par_iter()
            .zip(right.par_iter())
            .map(|(&l, &r)| op(l, r))
            .collect();
    }
    left.iter().zip(right).map(|(&l, &r)| op(l, r)).collect()
}

/// `target[i] = op(target[i], other[i])`; callers check that the lengths match
pub(crate) fn zip_in_place<F>(target: &mut [f64], other: &[f64], op: F)
where
    F: Fn(f64, f64) -> f64 + Send + Sync,
{
    debug_assert_eq!(target.len(), other.len());
    #[cfg(feature = "parallel")]
    if parallel(target.len()) {
        target
            .par_iter_mut()
            .zip(other.par_iter())
            .for_each(|(t, &o)| *t = op(*t, o));
        return;
    }
    for (t, &o) in target.iter_mut().zip(other) {
        *t = op(*t, o);
    }
}
