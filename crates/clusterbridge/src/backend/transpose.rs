//! Delayed transpose of another backend.

use std::ops::Deref;
use std::sync::Arc;

use super::oracle::Oracle;
use super::{BoxedMyopic, BoxedOracular, Matrix};

/// View of a backend matrix with rows and columns swapped.
///
/// Nothing is copied: row extraction on the view is column extraction on the
/// wrapped matrix and vice versa. The handle may be owned (`Box<M>`), shared
/// (`Arc<M>`) or borrowed (`&M`).
#[derive(Debug, Clone)]
pub struct Transposed<H> {
    inner: H,
}

impl<H> Transposed<H>
where
    H: Deref,
    H::Target: Matrix,
{
    /// Wrap `handle`.
    pub fn new(handle: H) -> Self {
        Self { inner: handle }
    }

    /// The wrapped matrix.
    #[inline]
    pub fn inner(&self) -> &H::Target {
        &self.inner
    }

    /// Give back the handle.
    pub fn into_inner(self) -> H {
        self.inner
    }
}

impl<H> Matrix for Transposed<H>
where
    H: Deref,
    H::Target: Matrix,
{
    type Value = <H::Target as Matrix>::Value;
    type Index = <H::Target as Matrix>::Index;

    #[inline]
    fn nrow(&self) -> Self::Index {
        self.inner.ncol()
    }

    #[inline]
    fn ncol(&self) -> Self::Index {
        self.inner.nrow()
    }

    #[inline]
    fn prefer_rows(&self) -> bool {
        !self.inner.prefer_rows()
    }

    #[inline]
    fn is_sparse(&self) -> bool {
        self.inner.is_sparse()
    }

    fn dense(&self, row: bool) -> BoxedMyopic<'_, Self::Value, Self::Index> {
        self.inner.dense(!row)
    }

    fn dense_with_oracle(
        &self,
        row: bool,
        oracle: Arc<dyn Oracle<Self::Index>>,
    ) -> BoxedOracular<'_, Self::Value> {
        self.inner.dense_with_oracle(!row, oracle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{CompressedSparseMatrix, ConsecutiveOracle, RowMatrix};

    fn sample() -> RowMatrix {
        RowMatrix::from_vec(vec![1.0, 0.0, 2.0, 0.0, 3.0, 4.0], 2, 3).unwrap()
    }

    #[test]
    fn swaps_extents_and_preference() {
        let dense = sample();
        let t = Transposed::new(&dense);
        assert_eq!(t.nrow(), 3);
        assert_eq!(t.ncol(), 2);
        assert!(!t.prefer_rows());
        assert!(!t.is_sparse());
    }

    #[test]
    fn rows_of_view_are_columns_of_inner() {
        let dense = sample();
        let t = Transposed::new(Box::new(dense.clone()));
        let mut buffer = vec![0.0; 2];
        let mut ext = t.dense_row();
        assert_eq!(ext.fetch(2, &mut buffer), &[2.0, 4.0]);

        let mut buffer = vec![0.0; 3];
        let mut ext = t.dense_column();
        assert_eq!(ext.fetch(1, &mut buffer), dense.row_slice(1));
    }

    #[test]
    fn forwards_oracles() {
        let sparse = Arc::new(CompressedSparseMatrix::from_dense(&sample(), false));
        let t = Transposed::new(Arc::clone(&sparse));
        assert!(t.is_sparse());

        let mut buffer = vec![0.0; 2];
        let mut ext = t.dense_row_with_oracle(Arc::new(ConsecutiveOracle::new(1u32, 2)));
        assert_eq!(ext.fetch(&mut buffer), &[0.0, 3.0]);
        assert_eq!(ext.fetch(&mut buffer), &[2.0, 4.0]);
        drop(ext);
        assert_eq!(t.into_inner().nnz(), 4);
    }
}
