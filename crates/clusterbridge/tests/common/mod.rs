//! Shared helpers for integration tests.

#![allow(dead_code)]

pub mod kmeans;

use clusterbridge::Index;
use clusterbridge::backend::{self, ColMajor, CompressedSparseMatrix, DenseMatrix, RowMatrix};
use clusterbridge::testing::random_values;

/// Backend rows.
pub const NR: usize = 20;
/// Backend columns.
pub const NC: usize = 50;

/// Fetch slice `i` straight from the backend, bypassing any adapter.
pub fn direct_fetch<M>(matrix: &M, row: bool, i: usize) -> Vec<M::Value>
where
    M: backend::Matrix + ?Sized,
    M::Value: Default,
{
    let mut ext = matrix.dense(row);
    let mut buffer = vec![M::Value::default(); ext.len()];
    ext.fetch(M::Index::from_usize(i), &mut buffer).to_vec()
}

/// Row-major f64 matrix with roughly a third of its entries zero.
pub fn sparse_friendly_f64(nrow: usize, ncol: usize, seed: u64) -> RowMatrix<f64> {
    let data = random_values(nrow * ncol, -1.0f64, 2.0, seed)
        .into_iter()
        .map(|v| v.max(0.0))
        .collect();
    RowMatrix::from_vec(data, nrow, ncol).unwrap()
}

/// The backends every extraction property is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    RowMajor,
    ColMajor,
    Csc,
    Csr,
    TransposedColMajor,
}

/// Run `check` over `kind` built from the same `NR x NC` values.
///
/// The transposed wrapper is built from an `NC x NR` matrix so that every
/// kind presents the same logical `NR x NC` contents.
pub fn with_backend<F>(kind: BackendKind, seed: u64, check: F)
where
    F: FnOnce(&dyn backend::Matrix<Value = f64, Index = u32>, &RowMatrix<f64>),
{
    let reference = sparse_friendly_f64(NR, NC, seed);
    match kind {
        BackendKind::RowMajor => check(&reference, &reference),
        BackendKind::ColMajor => {
            let m: DenseMatrix<f64, ColMajor> = reference.to_layout();
            check(&m, &reference)
        }
        BackendKind::Csc => check(&CompressedSparseMatrix::from_dense(&reference, false), &reference),
        BackendKind::Csr => check(&CompressedSparseMatrix::from_dense(&reference, true), &reference),
        BackendKind::TransposedColMajor => {
            let mut flipped = Vec::with_capacity(NR * NC);
            for c in 0..NC {
                flipped.extend((0..NR).map(|r| *reference.get(r, c).unwrap()));
            }
            // NC x NR col-major: column r of `inner` is row r of `reference`.
            let inner: DenseMatrix<f64, ColMajor> = RowMatrix::from_vec(flipped, NC, NR).unwrap().to_layout();
            check(&backend::Transposed::new(&inner), &reference)
        }
    }
}
