//! Compressed sparse backend (CSC or CSR) with dense extraction.
//!
//! Values along the compressed ("primary") axis are stored contiguously with
//! their secondary-axis indices. Dense extraction along the primary axis
//! scatters one slice into a zeroed buffer. Extraction along the secondary
//! axis gathers one value per primary slice, either by binary search or, when
//! an oracle promises non-decreasing positions, by advancing one cursor per
//! primary slice.

use std::sync::Arc;

use super::dense::DenseMatrix;
use super::error::BackendError;
use super::extractor::{MyopicDenseExtractor, OracularDenseExtractor, PseudoOracularExtractor};
use super::layout::Layout;
use super::oracle::Oracle;
use super::{BoxedMyopic, BoxedOracular, Matrix};
use crate::index::Index;

/// Compressed sparse matrix.
///
/// # Structure
///
/// - `values`: stored values, primary slice by primary slice
/// - `indices`: secondary index for each value, strictly increasing within a slice
/// - `pointers`: `pointers[p]..pointers[p + 1]` is the range of primary slice `p`
///
/// With `row_compressed == false` this is CSC (columns are primary); with
/// `true` it is CSR.
///
/// # Example
///
/// ```
/// use clusterbridge::backend::{CompressedSparseMatrix, Matrix, RowMatrix};
///
/// let dense: RowMatrix = RowMatrix::from_vec(vec![
///     1.0, 0.0, 2.0,
///     0.0, 3.0, 0.0,
/// ], 2, 3).unwrap();
///
/// let csc = CompressedSparseMatrix::from_dense(&dense, false);
/// assert_eq!(csc.nnz(), 3);
///
/// let mut ext = csc.dense_row();
/// let mut buffer = vec![0.0; 3];
/// assert_eq!(ext.fetch(1, &mut buffer), &[0.0, 3.0, 0.0]);
/// ```
#[derive(Debug, Clone)]
pub struct CompressedSparseMatrix<V = f64, I = u32> {
    values: Box<[V]>,
    indices: Box<[I]>,
    pointers: Box<[usize]>,
    nrow: usize,
    ncol: usize,
    row_compressed: bool,
}

impl<V, I: Index> CompressedSparseMatrix<V, I> {
    /// Create a matrix from its compressed parts.
    ///
    /// `pointers` must have one entry per primary slice plus one, start at
    /// zero, never decrease and end at `values.len()`.
    ///
    /// # Errors
    ///
    /// Returns a [`BackendError`] describing the first inconsistency found.
    pub fn new(
        values: Vec<V>,
        indices: Vec<I>,
        pointers: Vec<usize>,
        nrow: usize,
        ncol: usize,
        row_compressed: bool,
    ) -> Result<Self, BackendError> {
        for extent in [nrow, ncol] {
            if I::checked_from_usize(extent).is_none() {
                return Err(BackendError::ExtentOverflow {
                    extent,
                    index_type: std::any::type_name::<I>(),
                });
            }
        }
        if values.len() != indices.len() {
            return Err(BackendError::LengthMismatch {
                values: values.len(),
                indices: indices.len(),
            });
        }

        let (n_primary, n_secondary) = if row_compressed { (nrow, ncol) } else { (ncol, nrow) };
        if pointers.len() != n_primary + 1 {
            return Err(BackendError::InvalidPointers(format!(
                "expected {} pointers, got {}",
                n_primary + 1,
                pointers.len()
            )));
        }
        if pointers[0] != 0 || pointers[n_primary] != values.len() {
            return Err(BackendError::InvalidPointers(format!(
                "pointers must span 0..{}",
                values.len()
            )));
        }

        // With the endpoints fixed above, monotone pointers stay within `indices`.
        if let Some(primary) = pointers.windows(2).position(|bounds| bounds[0] > bounds[1]) {
            return Err(BackendError::InvalidPointers(format!(
                "pointers decrease at primary slice {primary}"
            )));
        }

        for (primary, bounds) in pointers.windows(2).enumerate() {
            let slice = &indices[bounds[0]..bounds[1]];
            for (k, idx) in slice.iter().enumerate() {
                match idx.to_usize() {
                    Some(pos) if pos < n_secondary => {}
                    _ => {
                        return Err(BackendError::IndexOutOfBounds {
                            primary,
                            index: idx.to_usize().unwrap_or(usize::MAX),
                            extent: n_secondary,
                        });
                    }
                }
                if k > 0 && slice[k - 1] >= *idx {
                    return Err(BackendError::UnsortedIndices { primary });
                }
            }
        }

        Ok(Self {
            values: values.into_boxed_slice(),
            indices: indices.into_boxed_slice(),
            pointers: pointers.into_boxed_slice(),
            nrow,
            ncol,
            row_compressed,
        })
    }

    /// Number of rows.
    #[inline]
    pub fn num_rows(&self) -> usize {
        self.nrow
    }

    /// Number of columns.
    #[inline]
    pub fn num_cols(&self) -> usize {
        self.ncol
    }

    /// Whether rows are the compressed axis (CSR).
    #[inline]
    pub fn is_row_compressed(&self) -> bool {
        self.row_compressed
    }

    /// Number of stored elements.
    #[inline]
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Ratio of stored elements to total elements.
    pub fn density(&self) -> f64 {
        let total = self.nrow * self.ncol;
        if total == 0 {
            return 1.0;
        }
        self.nnz() as f64 / total as f64
    }

    /// Secondary indices and values of primary slice `p`.
    ///
    /// # Panics
    ///
    /// Panics if `p` is not a valid primary position.
    #[inline]
    pub fn primary_slice(&self, p: usize) -> (&[I], &[V]) {
        let range = self.pointers[p]..self.pointers[p + 1];
        (&self.indices[range.clone()], &self.values[range])
    }

    /// Take apart into `(values, indices, pointers, nrow, ncol, row_compressed)`.
    pub fn into_raw_parts(self) -> (Box<[V]>, Box<[I]>, Box<[usize]>, usize, usize, bool) {
        (
            self.values,
            self.indices,
            self.pointers,
            self.nrow,
            self.ncol,
            self.row_compressed,
        )
    }

    #[inline]
    fn num_primary(&self) -> usize {
        if self.row_compressed { self.nrow } else { self.ncol }
    }

    #[inline]
    fn num_secondary(&self) -> usize {
        if self.row_compressed { self.ncol } else { self.nrow }
    }
}

impl<V: Copy + PartialEq + Default, I: Index> CompressedSparseMatrix<V, I> {
    /// Compress a dense matrix, dropping values equal to `V::default()`.
    ///
    /// NaN values are kept (they never compare equal to zero).
    pub fn from_dense<L: Layout, S: AsRef<[V]>>(
        dense: &DenseMatrix<V, L, S, I>,
        row_compressed: bool,
    ) -> Self {
        Self::from_dense_with_predicate(dense, row_compressed, |v| v != V::default())
    }
}

impl<V: Copy, I: Index> CompressedSparseMatrix<V, I> {
    /// Compress a dense matrix, keeping values for which `include` holds.
    pub fn from_dense_with_predicate<L, S, F>(
        dense: &DenseMatrix<V, L, S, I>,
        row_compressed: bool,
        include: F,
    ) -> Self
    where
        L: Layout,
        S: AsRef<[V]>,
        F: Fn(V) -> bool,
    {
        let (nrow, ncol) = (dense.num_rows(), dense.num_cols());
        let (n_primary, n_secondary) = if row_compressed { (nrow, ncol) } else { (ncol, nrow) };
        let data = dense.as_slice();

        let mut values = Vec::new();
        let mut indices = Vec::new();
        let mut pointers = Vec::with_capacity(n_primary + 1);
        pointers.push(0);

        for p in 0..n_primary {
            for s in 0..n_secondary {
                let (row, col) = if row_compressed { (p, s) } else { (s, p) };
                let val = data[L::offset(row, col, nrow, ncol)];
                if include(val) {
                    values.push(val);
                    indices.push(I::from_usize(s));
                }
            }
            pointers.push(values.len());
        }

        Self {
            values: values.into_boxed_slice(),
            indices: indices.into_boxed_slice(),
            pointers: pointers.into_boxed_slice(),
            nrow,
            ncol,
            row_compressed,
        }
    }
}

// =============================================================================
// Extraction
// =============================================================================

/// Primary-axis extractor: zero-fill then scatter.
struct PrimaryExtractor<'a, V, I> {
    matrix: &'a CompressedSparseMatrix<V, I>,
}

impl<V: Copy + Default, I: Index> MyopicDenseExtractor<V, I> for PrimaryExtractor<'_, V, I> {
    #[inline]
    fn len(&self) -> usize {
        self.matrix.num_secondary()
    }

    fn fetch<'b>(&'b mut self, i: I, buffer: &'b mut [V]) -> &'b [V] {
        let out = &mut buffer[..self.matrix.num_secondary()];
        out.fill(V::default());
        let (indices, values) = self.matrix.primary_slice(i.to_position());
        for (idx, &val) in indices.iter().zip(values) {
            out[idx.to_position()] = val;
        }
        out
    }
}

/// Secondary-axis extractor: binary search in every primary slice.
struct SecondarySearchExtractor<'a, V, I> {
    matrix: &'a CompressedSparseMatrix<V, I>,
}

impl<V: Copy + Default, I: Index> MyopicDenseExtractor<V, I> for SecondarySearchExtractor<'_, V, I> {
    #[inline]
    fn len(&self) -> usize {
        self.matrix.num_primary()
    }

    fn fetch<'b>(&'b mut self, i: I, buffer: &'b mut [V]) -> &'b [V] {
        let out = &mut buffer[..self.matrix.num_primary()];
        for (p, slot) in out.iter_mut().enumerate() {
            let (indices, values) = self.matrix.primary_slice(p);
            *slot = match indices.binary_search(&i) {
                Ok(k) => values[k],
                Err(_) => V::default(),
            };
        }
        out
    }
}

/// Secondary-axis extractor for non-decreasing oracles.
///
/// Keeps one cursor per primary slice; cursors only move forward, so a full
/// pass over the secondary axis touches every stored value once.
struct SecondaryCursorExtractor<'a, V, I> {
    matrix: &'a CompressedSparseMatrix<V, I>,
    oracle: Arc<dyn Oracle<I>>,
    cursors: Vec<usize>,
    used: usize,
}

impl<'a, V, I: Index> SecondaryCursorExtractor<'a, V, I> {
    fn new(matrix: &'a CompressedSparseMatrix<V, I>, oracle: Arc<dyn Oracle<I>>) -> Self {
        let cursors = matrix.pointers[..matrix.num_primary()].to_vec();
        Self {
            matrix,
            oracle,
            cursors,
            used: 0,
        }
    }
}

impl<V: Copy + Default, I: Index> OracularDenseExtractor<V> for SecondaryCursorExtractor<'_, V, I> {
    #[inline]
    fn len(&self) -> usize {
        self.matrix.num_primary()
    }

    fn fetch<'b>(&'b mut self, buffer: &'b mut [V]) -> &'b [V] {
        debug_assert!(
            self.used < self.oracle.total(),
            "fetched past the end of the oracle ({} predictions)",
            self.oracle.total()
        );
        let target = self.oracle.get(self.used);
        self.used += 1;

        let matrix = self.matrix;
        let out = &mut buffer[..matrix.num_primary()];
        for (p, (slot, cursor)) in out.iter_mut().zip(self.cursors.iter_mut()).enumerate() {
            let end = matrix.pointers[p + 1];
            while *cursor < end && matrix.indices[*cursor] < target {
                *cursor += 1;
            }
            *slot = if *cursor < end && matrix.indices[*cursor] == target {
                matrix.values[*cursor]
            } else {
                V::default()
            };
        }
        out
    }
}

impl<V, I> Matrix for CompressedSparseMatrix<V, I>
where
    V: Copy + Default + 'static,
    I: Index,
{
    type Value = V;
    type Index = I;

    #[inline]
    fn nrow(&self) -> I {
        I::from_usize(self.nrow)
    }

    #[inline]
    fn ncol(&self) -> I {
        I::from_usize(self.ncol)
    }

    #[inline]
    fn prefer_rows(&self) -> bool {
        self.row_compressed
    }

    #[inline]
    fn is_sparse(&self) -> bool {
        true
    }

    fn dense(&self, row: bool) -> BoxedMyopic<'_, V, I> {
        if row == self.row_compressed {
            Box::new(PrimaryExtractor { matrix: self })
        } else {
            Box::new(SecondarySearchExtractor { matrix: self })
        }
    }

    fn dense_with_oracle(&self, row: bool, oracle: Arc<dyn Oracle<I>>) -> BoxedOracular<'_, V> {
        if row != self.row_compressed && oracle.is_non_decreasing() {
            Box::new(SecondaryCursorExtractor::new(self, oracle))
        } else {
            Box::new(PseudoOracularExtractor::new(self.dense(row), oracle))
        }
    }
}
