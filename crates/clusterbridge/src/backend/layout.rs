//! Storage order of a [`DenseMatrix`](super::DenseMatrix).
//!
//! The layout fixes which extraction axis is free: slices along the
//! contiguous axis are borrowed straight from storage, slices along the other
//! axis are gathered value by value with [`Layout::stride`] between them.

mod sealed {
    pub trait Sealed {}
}

/// Storage order of a dense backend.
///
/// Sealed: only [`RowMajor`] and [`ColMajor`] exist.
pub trait Layout: sealed::Sealed + Copy + Default + std::fmt::Debug + Send + Sync + 'static {
    /// Whether row extraction is the contiguous (zero-copy) direction.
    const ROWS_CONTIGUOUS: bool;

    /// Storage offset of element `(row, col)` in an `nrow x ncol` matrix.
    fn offset(row: usize, col: usize, nrow: usize, ncol: usize) -> usize;

    /// Storage distance between neighbouring values of a gathered slice.
    #[inline]
    fn stride(nrow: usize, ncol: usize) -> usize {
        if Self::ROWS_CONTIGUOUS { ncol } else { nrow }
    }
}

/// Rows stored back to back: row extraction is zero-copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowMajor;

impl sealed::Sealed for RowMajor {}

impl Layout for RowMajor {
    const ROWS_CONTIGUOUS: bool = true;

    #[inline]
    fn offset(row: usize, col: usize, _nrow: usize, ncol: usize) -> usize {
        row * ncol + col
    }
}

/// Columns stored back to back: column extraction is zero-copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColMajor;

impl sealed::Sealed for ColMajor {}

impl Layout for ColMajor {
    const ROWS_CONTIGUOUS: bool = false;

    #[inline]
    fn offset(row: usize, col: usize, nrow: usize, _ncol: usize) -> usize {
        col * nrow + row
    }
}

/// Fill `out` with `data[first]`, `data[first + stride]`, ...
///
/// An empty `out` reads nothing, so `first` may lie past the end of `data`.
#[inline]
pub(crate) fn gather<V: Copy>(data: &[V], first: usize, stride: usize, out: &mut [V]) {
    if out.is_empty() {
        return;
    }
    for (dst, src) in out.iter_mut().zip(data[first..].iter().step_by(stride)) {
        *dst = *src;
    }
}
