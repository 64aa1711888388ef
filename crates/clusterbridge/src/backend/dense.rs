//! Dense in-memory backend with configurable layout.
//!
//! Supports both row-major and column-major storage via the [`Layout`]
//! trait. Extraction along the contiguous axis returns views into storage
//! without copying; the other axis is gathered into the caller's buffer.

use std::marker::PhantomData;

use ndarray::{Array2, ArrayView2};

use super::error::BackendError;
use super::extractor::MyopicDenseExtractor;
use super::layout::{ColMajor, Layout, RowMajor, gather};
use super::{BoxedMyopic, Matrix};
use crate::index::Index;

/// Dense matrix with configurable memory layout.
///
/// # Generic Parameters
///
/// - `V`: Value type (default `f64`)
/// - `L`: Memory layout (default [`RowMajor`])
/// - `S`: Storage implementing `AsRef<[V]>` (default `Box<[V]>`)
/// - `I`: Row/column index type (default `u32`)
///
/// The storage generic allows zero-copy matrices over borrowed slices or
/// memory-mapped files as well as owned allocations.
///
/// # Example
///
/// ```
/// use clusterbridge::backend::{ColMajor, DenseMatrix, Matrix, RowMatrix};
///
/// let rm: RowMatrix = RowMatrix::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3).unwrap();
/// assert_eq!(rm.row_slice(0), &[1.0, 2.0, 3.0]);
///
/// let cm = DenseMatrix::<f32, ColMajor>::from_vec(vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0], 2, 3).unwrap();
/// assert_eq!(cm.col_slice(0), &[1.0, 4.0]);
/// assert_eq!(cm.nrow(), 2u32);
/// ```
#[derive(Debug, Clone)]
pub struct DenseMatrix<V = f64, L: Layout = RowMajor, S: AsRef<[V]> = Box<[V]>, I: Index = u32> {
    data: S,
    nrow: usize,
    ncol: usize,
    _marker: PhantomData<(V, L, I)>,
}

/// Owned row-major dense matrix.
pub type RowMatrix<V = f64, I = u32> = DenseMatrix<V, RowMajor, Box<[V]>, I>;

/// Owned column-major dense matrix.
pub type ColMatrix<V = f64, I = u32> = DenseMatrix<V, ColMajor, Box<[V]>, I>;

fn check_shape<I: Index>(len: usize, nrow: usize, ncol: usize) -> Result<(), BackendError> {
    if nrow.checked_mul(ncol) != Some(len) {
        return Err(BackendError::ShapeMismatch { len, nrow, ncol });
    }
    for extent in [nrow, ncol] {
        if I::checked_from_usize(extent).is_none() {
            return Err(BackendError::ExtentOverflow {
                extent,
                index_type: std::any::type_name::<I>(),
            });
        }
    }
    Ok(())
}

// =============================================================================
// Constructors
// =============================================================================

impl<V, L: Layout, I: Index> DenseMatrix<V, L, Box<[V]>, I> {
    /// Create a dense matrix from a Vec, taking ownership.
    ///
    /// Data must follow the layout `L`:
    /// - `RowMajor`: `[row0_col0, row0_col1, ..., row1_col0, ...]`
    /// - `ColMajor`: `[col0_row0, col0_row1, ..., col1_row0, ...]`
    ///
    /// # Errors
    ///
    /// [`BackendError::ShapeMismatch`] if `data.len() != nrow * ncol`,
    /// [`BackendError::ExtentOverflow`] if an extent does not fit in `I`.
    pub fn from_vec(data: Vec<V>, nrow: usize, ncol: usize) -> Result<Self, BackendError> {
        check_shape::<I>(data.len(), nrow, ncol)?;
        Ok(Self {
            data: data.into_boxed_slice(),
            nrow,
            ncol,
            _marker: PhantomData,
        })
    }
}

impl<V, L: Layout, S: AsRef<[V]>, I: Index> DenseMatrix<V, L, S, I> {
    /// Create a dense matrix over arbitrary storage.
    ///
    /// # Errors
    ///
    /// Same conditions as [`from_vec`](DenseMatrix::from_vec).
    pub fn new(storage: S, nrow: usize, ncol: usize) -> Result<Self, BackendError> {
        check_shape::<I>(storage.as_ref().len(), nrow, ncol)?;
        Ok(Self {
            data: storage,
            nrow,
            ncol,
            _marker: PhantomData,
        })
    }

    /// The underlying data in layout order.
    #[inline]
    pub fn as_slice(&self) -> &[V] {
        self.data.as_ref()
    }

    /// Number of rows as `usize`.
    #[inline]
    pub fn num_rows(&self) -> usize {
        self.nrow
    }

    /// Number of columns as `usize`.
    #[inline]
    pub fn num_cols(&self) -> usize {
        self.ncol
    }

    /// Element at (row, col), or `None` if out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<&V> {
        if row >= self.nrow || col >= self.ncol {
            return None;
        }
        Some(&self.data.as_ref()[L::offset(row, col, self.nrow, self.ncol)])
    }
}

impl<'a, V, L: Layout, I: Index> DenseMatrix<V, L, &'a [V], I> {
    /// Borrow a slice as a dense matrix without copying.
    pub fn from_slice(data: &'a [V], nrow: usize, ncol: usize) -> Result<Self, BackendError> {
        Self::new(data, nrow, ncol)
    }
}

// =============================================================================
// ndarray integration
// =============================================================================

impl<V: Copy, I: Index> DenseMatrix<V, RowMajor, Box<[V]>, I> {
    /// Copy an ndarray into an owned row-major matrix.
    ///
    /// Works for any memory order; elements are read in logical order.
    pub fn from_array(array: &Array2<V>) -> Result<Self, BackendError> {
        let (nrow, ncol) = array.dim();
        Self::from_vec(array.iter().copied().collect(), nrow, ncol)
    }
}

impl<'a, V, I: Index> DenseMatrix<V, RowMajor, &'a [V], I> {
    /// Wrap a standard-layout ndarray view without copying.
    ///
    /// # Errors
    ///
    /// [`BackendError::NonContiguous`] if the view is not in C order.
    pub fn from_array_view(view: ArrayView2<'a, V>) -> Result<Self, BackendError> {
        let (nrow, ncol) = view.dim();
        let data = view.to_slice().ok_or(BackendError::NonContiguous)?;
        Self::new(data, nrow, ncol)
    }
}

// =============================================================================
// Layout conversion
// =============================================================================

impl<V: Copy, L: Layout, S: AsRef<[V]>, I: Index> DenseMatrix<V, L, S, I> {
    /// Copy into a matrix with layout `L2`.
    ///
    /// ```
    /// use clusterbridge::backend::{ColMatrix, RowMatrix};
    ///
    /// let rm: RowMatrix<f32> = RowMatrix::from_vec(vec![1.0, 2.0, 3.0, 4.0], 2, 2).unwrap();
    /// let cm: ColMatrix<f32> = rm.to_layout();
    /// assert_eq!(cm.col_slice(0), &[1.0, 3.0]);
    /// ```
    pub fn to_layout<L2: Layout>(&self) -> DenseMatrix<V, L2, Box<[V]>, I> {
        let (nrow, ncol) = (self.nrow, self.ncol);
        let data = self.data.as_ref();
        let mut out = Vec::with_capacity(nrow * ncol);

        if L2::ROWS_CONTIGUOUS {
            for row in 0..nrow {
                out.extend((0..ncol).map(|col| data[L::offset(row, col, nrow, ncol)]));
            }
        } else {
            for col in 0..ncol {
                out.extend((0..nrow).map(|row| data[L::offset(row, col, nrow, ncol)]));
            }
        }

        DenseMatrix {
            data: out.into_boxed_slice(),
            nrow,
            ncol,
            _marker: PhantomData,
        }
    }
}

// =============================================================================
// Layout-specific slices
// =============================================================================

impl<V, S: AsRef<[V]>, I: Index> DenseMatrix<V, RowMajor, S, I> {
    /// A row as a contiguous slice.
    ///
    /// # Panics
    ///
    /// Panics if `row >= nrow`.
    #[inline]
    pub fn row_slice(&self, row: usize) -> &[V] {
        assert!(row < self.nrow, "Row index {} out of bounds", row);
        let start = row * self.ncol;
        &self.data.as_ref()[start..start + self.ncol]
    }
}

impl<V, S: AsRef<[V]>, I: Index> DenseMatrix<V, ColMajor, S, I> {
    /// A column as a contiguous slice.
    ///
    /// # Panics
    ///
    /// Panics if `col >= ncol`.
    #[inline]
    pub fn col_slice(&self, col: usize) -> &[V] {
        assert!(col < self.ncol, "Column index {} out of bounds", col);
        let start = col * self.nrow;
        &self.data.as_ref()[start..start + self.nrow]
    }
}

// =============================================================================
// Extraction
// =============================================================================

/// Extractor along the contiguous axis: hands out storage views.
struct ContiguousExtractor<'a, V> {
    data: &'a [V],
    len: usize,
}

impl<V, I: Index> MyopicDenseExtractor<V, I> for ContiguousExtractor<'_, V> {
    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn fetch<'b>(&'b mut self, i: I, _buffer: &'b mut [V]) -> &'b [V] {
        let start = i.to_position() * self.len;
        &self.data[start..start + self.len]
    }
}

/// Extractor along the strided axis: gathers into the buffer.
struct StridedExtractor<'a, V> {
    data: &'a [V],
    stride: usize,
    len: usize,
}

impl<V: Copy, I: Index> MyopicDenseExtractor<V, I> for StridedExtractor<'_, V> {
    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    fn fetch<'b>(&'b mut self, i: I, buffer: &'b mut [V]) -> &'b [V] {
        let out = &mut buffer[..self.len];
        gather(self.data, i.to_position(), self.stride, out);
        out
    }
}

impl<V, L, S, I> Matrix for DenseMatrix<V, L, S, I>
where
    V: Copy + 'static,
    L: Layout,
    S: AsRef<[V]>,
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
        L::ROWS_CONTIGUOUS
    }

    fn dense(&self, row: bool) -> BoxedMyopic<'_, V, I> {
        let data = self.data.as_ref();
        let len = if row { self.ncol } else { self.nrow };
        if row == L::ROWS_CONTIGUOUS {
            Box::new(ContiguousExtractor { data, len })
        } else {
            Box::new(StridedExtractor {
                data,
                stride: L::stride(self.nrow, self.ncol),
                len,
            })
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
