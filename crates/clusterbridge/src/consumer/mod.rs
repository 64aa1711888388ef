//! Matrix interface expected by clustering code.
//!
//! A clustering routine sees a dataset as `num_observations()` points, each
//! a slice of `num_dimensions()` values, and pulls them through one of three
//! extractor kinds:
//!
//! - [`RandomAccessExtractor`]: any observation by index
//! - [`ConsecutiveAccessExtractor`]: a contiguous block, in order
//! - [`IndexedAccessExtractor`]: a precomputed sequence, in the given order
//!
//! Returned slices borrow the extractor mutably, so they stay valid until the
//! next call on the same extractor.

mod simple;

pub use simple::{SimpleConsecutiveExtractor, SimpleIndexedExtractor, SimpleMatrix, SimpleRandomExtractor};

use crate::index::Index;

/// Fetches any observation by index.
pub trait RandomAccessExtractor {
    /// Observation index type.
    type Index: Index;
    /// Value type.
    type Data: Copy;

    /// Values of observation `index`.
    ///
    /// `index` must be in `[0, num_observations)`.
    fn get_observation(&mut self, index: Self::Index) -> &[Self::Data];
}

/// Walks a contiguous block of observations.
pub trait ConsecutiveAccessExtractor {
    /// Value type.
    type Data: Copy;

    /// Values of the next observation in the block.
    ///
    /// Must be called at most `length` times.
    fn get_observation(&mut self) -> &[Self::Data];
}

/// Replays an explicit sequence of observations.
pub trait IndexedAccessExtractor {
    /// Value type.
    type Data: Copy;

    /// Values of the next observation in the sequence.
    ///
    /// Must be called at most `sequence.len()` times.
    fn get_observation(&mut self) -> &[Self::Data];
}

/// An observations-by-dimensions dataset.
///
/// # Example
///
/// ```
/// use clusterbridge::consumer::{Matrix, RandomAccessExtractor, SimpleMatrix};
///
/// // Two observations in three dimensions.
/// let matrix = SimpleMatrix::<i32, f64>::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 3, 2).unwrap();
/// assert_eq!(matrix.num_observations(), 2);
///
/// let mut ext = matrix.new_extractor();
/// assert_eq!(ext.get_observation(1), &[4.0, 5.0, 6.0]);
/// ```
pub trait Matrix {
    /// Observation index type.
    type Index: Index;
    /// Value type.
    type Data: Copy;

    /// Random-access extractor.
    type RandomExtractor<'a>: RandomAccessExtractor<Index = Self::Index, Data = Self::Data>
    where
        Self: 'a;

    /// Block extractor.
    type ConsecutiveExtractor<'a>: ConsecutiveAccessExtractor<Data = Self::Data>
    where
        Self: 'a;

    /// Sequence extractor.
    type IndexedExtractor<'a>: IndexedAccessExtractor<Data = Self::Data>
    where
        Self: 'a;

    /// Number of observations.
    fn num_observations(&self) -> Self::Index;

    /// Number of values per observation.
    fn num_dimensions(&self) -> usize;

    /// Extractor for arbitrary observations.
    fn new_extractor(&self) -> Self::RandomExtractor<'_>;

    /// Extractor over observations `[start, start + length)`.
    ///
    /// `start + length` must not exceed [`num_observations()`](Self::num_observations).
    fn new_consecutive_extractor(&self, start: Self::Index, length: Self::Index) -> Self::ConsecutiveExtractor<'_>;

    /// Extractor replaying `sequence`, repeats and any order allowed.
    ///
    /// Every entry must be in `[0, num_observations)`.
    fn new_indexed_extractor<'a>(&'a self, sequence: &'a [Self::Index]) -> Self::IndexedExtractor<'a>;
}
