//! Error types for adapter construction.

/// Result alias for adapter operations.
pub type Result<T, E = AdapterError> = std::result::Result<T, E>;

/// Errors raised while building a clustering-side matrix.
///
/// Construction is the only fallible step. Once a matrix exists, extraction
/// cannot fail: out-of-range requests are caller contract violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdapterError {
    /// The backend's observation-axis extent is not representable in the
    /// consumer's index type.
    #[error("observation count {count} ({axis}) does not fit in consumer index type `{index_type}`")]
    ObservationCountOverflow {
        /// Extent of the backend axis mapped to observations.
        count: usize,
        /// Which backend axis holds the observations.
        axis: ObservationAxis,
        /// Name of the consumer index type.
        index_type: &'static str,
    },

    /// Observation data length does not match the requested shape.
    #[error("data length {len} does not match {num_dimensions} dimensions x {num_observations} observations")]
    ShapeMismatch {
        len: usize,
        num_dimensions: usize,
        num_observations: usize,
    },

    /// An ndarray view is not in standard (C-order) layout.
    #[error("array view is not contiguous in standard layout")]
    NonContiguous,
}

/// Backend axis that holds observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObservationAxis {
    /// Observations are backend columns (the untransposed case).
    Columns,
    /// Observations are backend rows.
    Rows,
}

impl ObservationAxis {
    /// Axis selected by the transposition flag.
    #[inline]
    pub fn from_transposed(transposed: bool) -> Self {
        if transposed { Self::Rows } else { Self::Columns }
    }

    /// Whether extraction along this axis uses backend rows.
    #[inline]
    pub fn is_rows(self) -> bool {
        matches!(self, Self::Rows)
    }
}

impl std::fmt::Display for ObservationAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Columns => write!(f, "columns"),
            Self::Rows => write!(f, "rows"),
        }
    }
}
