//! Backend matrix abstraction.
//!
//! A backend matrix is a lazily-extracted two-dimensional dataset: callers
//! never see its storage, only dense slices pulled through extractors. The
//! matrix may be held in memory, compressed, delayed, or loaded on demand.
//!
//! # Overview
//!
//! - [`Matrix`]: extents plus extractor factories along either axis
//! - [`MyopicDenseExtractor`] / [`OracularDenseExtractor`]: the two fetch
//!   flavours (random access vs. oracle-driven)
//! - [`ConsecutiveOracle`] / [`FixedOracle`]: access-pattern hints
//!
//! # Reference Backends
//!
//! - [`DenseMatrix`]: contiguous storage with [`RowMajor`] or [`ColMajor`] layout
//! - [`CompressedSparseMatrix`]: CSC or CSR storage with dense extraction
//! - [`Transposed`]: delayed transpose of any other backend

mod dense;
mod error;
mod extractor;
mod layout;
mod oracle;
mod sparse;
mod transpose;

use std::sync::Arc;

pub use dense::{ColMatrix, DenseMatrix, RowMatrix};
pub use error::BackendError;
pub use extractor::{MyopicDenseExtractor, OracularDenseExtractor, PseudoOracularExtractor};
pub use layout::{ColMajor, Layout, RowMajor};
pub use oracle::{ConsecutiveOracle, FixedOracle, Oracle};
pub use sparse::CompressedSparseMatrix;
pub use transpose::Transposed;

use crate::index::Index;

/// Boxed random-access extractor borrowing its matrix for `'a`.
pub type BoxedMyopic<'a, V, I> = Box<dyn MyopicDenseExtractor<V, I> + 'a>;

/// Boxed oracle-driven extractor borrowing its matrix for `'a`.
pub type BoxedOracular<'a, V> = Box<dyn OracularDenseExtractor<V> + 'a>;

/// A two-dimensional matrix that supports dense extraction.
///
/// # Extents
///
/// [`nrow()`](Self::nrow) and [`ncol()`](Self::ncol) are non-negative and
/// representable in `usize`; implementations guarantee this at construction.
///
/// # Extraction
///
/// `row == true` extracts rows (each fetch yields `ncol` values),
/// `row == false` extracts columns (each fetch yields `nrow` values).
/// Every extractor borrows the matrix for its own lifetime and is owned
/// exclusively by whoever requested it.
///
/// # Concurrency
///
/// Independent extractors may be driven from different threads when the
/// implementing type is `Sync`. A single extractor is not shared.
pub trait Matrix {
    /// Stored value type.
    type Value: Copy + 'static;

    /// Index type for rows and columns.
    type Index: Index;

    /// Number of rows.
    fn nrow(&self) -> Self::Index;

    /// Number of columns.
    fn ncol(&self) -> Self::Index;

    /// Whether row extraction is the cheaper direction.
    fn prefer_rows(&self) -> bool;

    /// Whether the underlying storage is sparse.
    fn is_sparse(&self) -> bool {
        false
    }

    /// Random-access extractor along rows (`row == true`) or columns.
    fn dense(&self, row: bool) -> BoxedMyopic<'_, Self::Value, Self::Index>;

    /// Extractor along rows or columns driven by `oracle`.
    ///
    /// The default replays the oracle over [`dense()`](Self::dense).
    fn dense_with_oracle(
        &self,
        row: bool,
        oracle: Arc<dyn Oracle<Self::Index>>,
    ) -> BoxedOracular<'_, Self::Value> {
        Box::new(PseudoOracularExtractor::new(self.dense(row), oracle))
    }

    /// Random-access row extractor.
    fn dense_row(&self) -> BoxedMyopic<'_, Self::Value, Self::Index> {
        self.dense(true)
    }

    /// Random-access column extractor.
    fn dense_column(&self) -> BoxedMyopic<'_, Self::Value, Self::Index> {
        self.dense(false)
    }

    /// Row extractor driven by `oracle`.
    fn dense_row_with_oracle(
        &self,
        oracle: Arc<dyn Oracle<Self::Index>>,
    ) -> BoxedOracular<'_, Self::Value> {
        self.dense_with_oracle(true, oracle)
    }

    /// Column extractor driven by `oracle`.
    fn dense_column_with_oracle(
        &self,
        oracle: Arc<dyn Oracle<Self::Index>>,
    ) -> BoxedOracular<'_, Self::Value> {
        self.dense_with_oracle(false, oracle)
    }
}
