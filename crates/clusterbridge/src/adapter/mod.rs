//! Clustering view over a backend matrix.
//!
//! [`MatrixAdapter`] wraps a handle to any [`backend::Matrix`] and implements
//! [`consumer::Matrix`] on top of it. Observations are backend columns by
//! default, or backend rows when [`AdapterParams::transposed`] is set.
//!
//! Each consumer extractor owns one backend extractor along the observation
//! axis plus a [`CoercionBuffer`] that converts backend values to the
//! consumer's data type when the two differ.
//!
//! [`backend::Matrix`]: crate::backend::Matrix
//! [`consumer::Matrix`]: crate::consumer::Matrix

mod coerce;
mod extractors;

use std::any::type_name;
use std::marker::PhantomData;
use std::ops::Deref;
use std::sync::Arc;

pub use coerce::{Coerce, CoercionBuffer, CoercionOutput, Converted, Passthrough};
pub use extractors::{ConsecutiveExtractor, IndexedExtractor, RandomExtractor};

use crate::backend::{self, ConsecutiveOracle, FixedOracle, Matrix as _};
use crate::consumer;
use crate::error::{AdapterError, ObservationAxis, Result};
use crate::index::{Index, convert};

/// Adapter configuration.
///
/// # Example
///
/// ```
/// use clusterbridge::AdapterParams;
///
/// let params = AdapterParams {
///     transposed: true,
///     ..Default::default()
/// };
/// assert!(params.transposed);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AdapterParams {
    /// Map observations to backend rows instead of columns.
    pub transposed: bool,
}

impl AdapterParams {
    /// Parameters with observations on backend rows.
    pub fn transposed() -> Self {
        Self { transposed: true }
    }
}

/// Backend value type of handle `H`.
type ValueOf<H> = <<H as Deref>::Target as backend::Matrix>::Value;

/// Backend index type of handle `H`.
type IndexOf<H> = <<H as Deref>::Target as backend::Matrix>::Index;

/// Presents a backend matrix as a clustering matrix.
///
/// # Generic Parameters
///
/// - `H`: handle to the backend matrix: `&M`, `Box<M>`, `Arc<M>`, `Rc<M>`
/// - `I`: consumer observation index type (default `i32`)
/// - `D`: consumer data type (default `f64`)
///
/// # Example
///
/// ```
/// use clusterbridge::backend::RowMatrix;
/// use clusterbridge::consumer::{Matrix, RandomAccessExtractor};
/// use clusterbridge::MatrixAdapter;
///
/// // 2 rows x 3 columns of f32; observations are columns.
/// let backend: RowMatrix<f32> = RowMatrix::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3).unwrap();
/// let adapter = MatrixAdapter::<_, i32, f64>::new(&backend).unwrap();
///
/// assert_eq!(adapter.num_observations(), 3);
/// assert_eq!(adapter.num_dimensions(), 2);
///
/// let mut ext = adapter.new_extractor();
/// assert_eq!(ext.get_observation(1), &[2.0, 5.0]);
/// ```
pub struct MatrixAdapter<H, I = i32, D = f64> {
    matrix: H,
    num_observations: I,
    num_dimensions: usize,
    transposed: bool,
    _data: PhantomData<fn() -> D>,
}

impl<H, I, D> MatrixAdapter<H, I, D>
where
    H: Deref,
    H::Target: backend::Matrix,
    I: Index,
{
    /// Wrap `handle` with observations on backend columns.
    ///
    /// # Errors
    ///
    /// [`AdapterError::ObservationCountOverflow`] if the number of backend
    /// columns does not fit in `I`.
    pub fn new(handle: H) -> Result<Self> {
        Self::with_params(handle, AdapterParams::default())
    }

    /// Wrap `handle` with explicit parameters.
    ///
    /// # Errors
    ///
    /// [`AdapterError::ObservationCountOverflow`] if the observation-axis
    /// extent does not fit in `I`.
    pub fn with_params(handle: H, params: AdapterParams) -> Result<Self> {
        let transposed = params.transposed;
        let axis = ObservationAxis::from_transposed(transposed);
        let (observations, dimensions) = {
            let m = handle.deref();
            let (nrow, ncol) = (m.nrow().to_position(), m.ncol().to_position());
            if transposed { (nrow, ncol) } else { (ncol, nrow) }
        };

        let Some(num_observations) = I::checked_from_usize(observations) else {
            let err = AdapterError::ObservationCountOverflow {
                count: observations,
                axis,
                index_type: type_name::<I>(),
            };
            tracing::warn!(error = %err, "rejecting backend matrix");
            return Err(err);
        };

        tracing::debug!(
            observations,
            dimensions,
            %axis,
            sparse = handle.is_sparse(),
            "created matrix adapter"
        );

        Ok(Self {
            matrix: handle,
            num_observations,
            num_dimensions: dimensions,
            transposed,
            _data: PhantomData,
        })
    }

    /// Whether observations are backend rows.
    #[inline]
    pub fn transposed(&self) -> bool {
        self.transposed
    }

    /// The backend matrix.
    #[inline]
    pub fn matrix(&self) -> &H::Target {
        &self.matrix
    }

    /// Give back the handle.
    pub fn into_inner(self) -> H {
        self.matrix
    }
}

impl<H: Clone, I: Clone, D> Clone for MatrixAdapter<H, I, D> {
    fn clone(&self) -> Self {
        Self {
            matrix: self.matrix.clone(),
            num_observations: self.num_observations.clone(),
            num_dimensions: self.num_dimensions,
            transposed: self.transposed,
            _data: PhantomData,
        }
    }
}

impl<H, I: std::fmt::Debug, D> std::fmt::Debug for MatrixAdapter<H, I, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatrixAdapter")
            .field("num_observations", &self.num_observations)
            .field("num_dimensions", &self.num_dimensions)
            .field("transposed", &self.transposed)
            .finish_non_exhaustive()
    }
}

impl<H, I, D> consumer::Matrix for MatrixAdapter<H, I, D>
where
    H: Deref,
    H::Target: backend::Matrix,
    ValueOf<H>: Coerce<D>,
    I: Index,
    D: Copy,
{
    type Index = I;
    type Data = D;
    type RandomExtractor<'a>
        = RandomExtractor<'a, ValueOf<H>, IndexOf<H>, I, D>
    where
        Self: 'a;
    type ConsecutiveExtractor<'a>
        = ConsecutiveExtractor<'a, ValueOf<H>, D>
    where
        Self: 'a;
    type IndexedExtractor<'a>
        = IndexedExtractor<'a, ValueOf<H>, D>
    where
        Self: 'a;

    #[inline]
    fn num_observations(&self) -> I {
        self.num_observations
    }

    #[inline]
    fn num_dimensions(&self) -> usize {
        self.num_dimensions
    }

    fn new_extractor(&self) -> Self::RandomExtractor<'_> {
        tracing::trace!(transposed = self.transposed, "random-access extractor");
        RandomExtractor::new(self.matrix.dense(self.transposed))
    }

    fn new_consecutive_extractor(&self, start: I, length: I) -> Self::ConsecutiveExtractor<'_> {
        debug_assert!(
            start.to_position() + length.to_position() <= self.num_observations.to_position(),
            "block [{:?}, {:?} + {:?}) past the last observation",
            start,
            start,
            length
        );
        tracing::trace!(?start, ?length, transposed = self.transposed, "consecutive extractor");
        let length = length.to_position();
        let oracle = ConsecutiveOracle::new(convert::<I, IndexOf<H>>(start), length);
        ConsecutiveExtractor::new(self.matrix.dense_with_oracle(self.transposed, Arc::new(oracle)), length)
    }

    fn new_indexed_extractor<'a>(&'a self, sequence: &'a [I]) -> Self::IndexedExtractor<'a> {
        debug_assert!(
            sequence.iter().all(|&i| i >= I::zero() && i < self.num_observations),
            "sequence names an observation out of range"
        );
        tracing::trace!(length = sequence.len(), transposed = self.transposed, "indexed extractor");
        let oracle: FixedOracle<IndexOf<H>> = sequence.iter().map(|&i| convert(i)).collect();
        IndexedExtractor::new(
            self.matrix.dense_with_oracle(self.transposed, Arc::new(oracle)),
            sequence.len(),
        )
    }
}
