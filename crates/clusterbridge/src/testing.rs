//! Seeded data generators for tests and benchmarks.

use rand::distributions::uniform::SampleUniform;
use rand::distributions::Uniform;
use rand::prelude::*;

use crate::backend::{BackendError, CompressedSparseMatrix, RowMatrix};
use crate::index::Index;

/// `len` values drawn uniformly from `[low, high)`.
///
/// # Panics
///
/// Panics unless `low < high`.
pub fn random_values<V: SampleUniform>(len: usize, low: V, high: V, seed: u64) -> Vec<V> {
    StdRng::seed_from_u64(seed)
        .sample_iter(Uniform::new(low, high))
        .take(len)
        .collect()
}

/// A `rows x cols` backend of `f32` values in `[0, 1)`.
pub fn random_row_matrix_f32(rows: usize, cols: usize, seed: u64) -> Result<RowMatrix<f32>, BackendError> {
    RowMatrix::<f32>::from_vec(random_values(rows * cols, 0.0f32, 1.0, seed), rows, cols)
}

/// Create a sparse matrix where each entry is stored with probability `density`.
///
/// Stored values are uniform in `[1, 2)`, so none of them is zero.
pub fn random_sparse_f64(
    rows: usize,
    cols: usize,
    density: f64,
    seed: u64,
    row_compressed: bool,
) -> Result<CompressedSparseMatrix<f64, u32>, BackendError> {
    assert!((0.0..=1.0).contains(&density));
    let mut rng = StdRng::seed_from_u64(seed);
    let data: Vec<f64> = (0..rows * cols)
        .map(|_| if rng.r#gen::<f64>() < density { 1.0 + rng.r#gen::<f64>() } else { 0.0 })
        .collect();
    let dense = RowMatrix::<f64>::from_vec(data, rows, cols)?;
    Ok(CompressedSparseMatrix::from_dense(&dense, row_compressed))
}

/// Random indices in `[0, upper)`, repeats allowed, in no particular order.
pub fn random_sequence<I: Index>(len: usize, upper: usize, seed: u64) -> Vec<I> {
    assert!(upper > 0 || len == 0);
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| I::from_usize(rng.gen_range(0..upper))).collect()
}
