//! Rayon-parallel nearest-neighbor search (feature-gated).
//!
//! Query rows are distributed across threads; each row runs the scalar
//! search, so winners and tie-breaking match the sequential path exactly.

use crate::kernel::scalar::nearest;
use crate::kernel::{DistanceKernel, Nearest};
use rayon::prelude::*;

/// Parallel counterpart of [`crate::kernel::scalar::nearest_neighbors`].
pub fn nearest_neighbors_par<K: DistanceKernel>(
    queries: &[K::Elem],
    train: &[K::Elem],
    width: usize,
) -> Vec<Option<Nearest>> {
    if width == 0 {
        return Vec::new();
    }
    queries
        .par_chunks_exact(width)
        .map(|query| nearest::<K>(query, train, width))
        .collect()
}
