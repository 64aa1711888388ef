//! Native in-memory clustering matrix.

use std::marker::PhantomData;

use ndarray::{Array2, ArrayView2};

use super::{ConsecutiveAccessExtractor, IndexedAccessExtractor, Matrix, RandomAccessExtractor};
use crate::error::{AdapterError, ObservationAxis, Result};
use crate::index::Index;

/// Observations stored contiguously, one after another.
///
/// Storage is `num_dimensions x num_observations` in column-major order:
/// observation `i` occupies `data[i * num_dimensions..(i + 1) * num_dimensions]`.
/// Every extractor returns views into storage without copying.
#[derive(Debug, Clone)]
pub struct SimpleMatrix<I, D, S = Vec<D>> {
    data: S,
    num_dimensions: usize,
    num_observations: I,
    _data: PhantomData<fn() -> D>,
}

impl<I: Index, D: Copy, S: AsRef<[D]>> SimpleMatrix<I, D, S> {
    /// Wrap `data` holding `num_observations` observations of
    /// `num_dimensions` values each.
    ///
    /// # Errors
    ///
    /// [`AdapterError::ShapeMismatch`] if the length is wrong,
    /// [`AdapterError::ObservationCountOverflow`] if `num_observations` does
    /// not fit in `I`.
    pub fn new(data: S, num_dimensions: usize, num_observations: usize) -> Result<Self> {
        let len = data.as_ref().len();
        if num_dimensions.checked_mul(num_observations) != Some(len) {
            return Err(AdapterError::ShapeMismatch {
                len,
                num_dimensions,
                num_observations,
            });
        }
        let count = I::checked_from_usize(num_observations).ok_or(AdapterError::ObservationCountOverflow {
            count: num_observations,
            axis: ObservationAxis::Columns,
            index_type: std::any::type_name::<I>(),
        })?;
        Ok(Self {
            data,
            num_dimensions,
            num_observations: count,
            _data: PhantomData,
        })
    }

    /// All values, observation by observation.
    #[inline]
    pub fn as_slice(&self) -> &[D] {
        self.data.as_ref()
    }
}

impl<I: Index, D: Copy> SimpleMatrix<I, D> {
    /// Copy an `(observations, dimensions)` array.
    pub fn from_array(array: &Array2<D>) -> Result<Self> {
        let (num_observations, num_dimensions) = array.dim();
        Self::new(array.iter().copied().collect(), num_dimensions, num_observations)
    }
}

impl<'a, I: Index, D: Copy> SimpleMatrix<I, D, &'a [D]> {
    /// Borrow a standard-layout `(observations, dimensions)` view.
    ///
    /// # Errors
    ///
    /// [`AdapterError::NonContiguous`] if the view is not in C order.
    pub fn from_array_view(view: ArrayView2<'a, D>) -> Result<Self> {
        let (num_observations, num_dimensions) = view.dim();
        let data = view.to_slice().ok_or(AdapterError::NonContiguous)?;
        Self::new(data, num_dimensions, num_observations)
    }
}

#[inline]
fn observation<D>(data: &[D], num_dimensions: usize, i: usize) -> &[D] {
    let start = i * num_dimensions;
    &data[start..start + num_dimensions]
}

/// Random-access extractor over a [`SimpleMatrix`].
#[derive(Debug)]
pub struct SimpleRandomExtractor<'a, I, D> {
    data: &'a [D],
    num_dimensions: usize,
    _index: PhantomData<fn(I)>,
}

impl<I: Index, D: Copy> RandomAccessExtractor for SimpleRandomExtractor<'_, I, D> {
    type Index = I;
    type Data = D;

    #[inline]
    fn get_observation(&mut self, index: I) -> &[D] {
        observation(self.data, self.num_dimensions, index.to_position())
    }
}

/// Block extractor over a [`SimpleMatrix`].
#[derive(Debug)]
pub struct SimpleConsecutiveExtractor<'a, D> {
    data: &'a [D],
    num_dimensions: usize,
    next: usize,
    end: usize,
}

impl<D: Copy> ConsecutiveAccessExtractor for SimpleConsecutiveExtractor<'_, D> {
    type Data = D;

    #[inline]
    fn get_observation(&mut self) -> &[D] {
        debug_assert!(self.next < self.end, "consecutive extractor exhausted");
        let i = self.next;
        self.next += 1;
        observation(self.data, self.num_dimensions, i)
    }
}

/// Sequence extractor over a [`SimpleMatrix`].
#[derive(Debug)]
pub struct SimpleIndexedExtractor<'a, I, D> {
    data: &'a [D],
    num_dimensions: usize,
    sequence: &'a [I],
    position: usize,
}

impl<I: Index, D: Copy> IndexedAccessExtractor for SimpleIndexedExtractor<'_, I, D> {
    type Data = D;

    #[inline]
    fn get_observation(&mut self) -> &[D] {
        let i = self.sequence[self.position];
        self.position += 1;
        observation(self.data, self.num_dimensions, i.to_position())
    }
}

impl<I: Index, D: Copy, S: AsRef<[D]>> Matrix for SimpleMatrix<I, D, S> {
    type Index = I;
    type Data = D;
    type RandomExtractor<'a>
        = SimpleRandomExtractor<'a, I, D>
    where
        Self: 'a;
    type ConsecutiveExtractor<'a>
        = SimpleConsecutiveExtractor<'a, D>
    where
        Self: 'a;
    type IndexedExtractor<'a>
        = SimpleIndexedExtractor<'a, I, D>
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
        SimpleRandomExtractor {
            data: self.data.as_ref(),
            num_dimensions: self.num_dimensions,
            _index: PhantomData,
        }
    }

    fn new_consecutive_extractor(&self, start: I, length: I) -> Self::ConsecutiveExtractor<'_> {
        let next = start.to_position();
        let end = next + length.to_position();
        debug_assert!(end <= self.num_observations.to_position(), "block past the last observation");
        SimpleConsecutiveExtractor {
            data: self.data.as_ref(),
            num_dimensions: self.num_dimensions,
            next,
            end,
        }
    }

    fn new_indexed_extractor<'a>(&'a self, sequence: &'a [I]) -> Self::IndexedExtractor<'a> {
        SimpleIndexedExtractor {
            data: self.data.as_ref(),
            num_dimensions: self.num_dimensions,
            sequence,
            position: 0,
        }
    }
}
