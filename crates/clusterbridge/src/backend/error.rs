//! Validation errors for the reference backend matrices.

/// Errors raised while building a backend matrix from caller data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// Storage length does not match the requested shape.
    #[error("storage length {len} does not match dimensions {nrow}x{ncol}")]
    ShapeMismatch {
        len: usize,
        nrow: usize,
        ncol: usize,
    },

    /// An extent is not representable in the matrix index type.
    #[error("extent {extent} does not fit in index type `{index_type}`")]
    ExtentOverflow {
        extent: usize,
        index_type: &'static str,
    },

    /// An ndarray view is not in standard (C-order) layout.
    #[error("array view is not contiguous in standard layout")]
    NonContiguous,

    /// Compressed pointers are malformed.
    #[error("invalid pointers: {0}")]
    InvalidPointers(String),

    /// A secondary index is outside the matrix.
    #[error("index {index} out of bounds for extent {extent} in primary slice {primary}")]
    IndexOutOfBounds {
        primary: usize,
        index: usize,
        extent: usize,
    },

    /// Secondary indices within a primary slice are not strictly increasing.
    #[error("indices are not strictly increasing in primary slice {primary}")]
    UnsortedIndices { primary: usize },

    /// Values and indices have different lengths.
    #[error("{values} values but {indices} indices")]
    LengthMismatch { values: usize, indices: usize },
}
