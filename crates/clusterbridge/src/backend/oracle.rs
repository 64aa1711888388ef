//! Access-pattern oracles.
//!
//! An oracle tells an extractor, up front, which positions it will be asked
//! for and in what order. Backends may use this to plan I/O or to keep
//! per-slice cursors instead of searching on every fetch.
//!
//! - [`ConsecutiveOracle`]: a contiguous block `[start, start + length)`
//! - [`FixedOracle`]: an explicit sequence, possibly unordered and repeating

use crate::index::Index;

/// Predicts the sequence of positions an extractor will fetch.
///
/// Oracles are shared between the caller and the extractor, so they must be
/// immutable and thread-safe.
pub trait Oracle<I>: Send + Sync {
    /// Total number of predictions.
    fn total(&self) -> usize;

    /// The `i`-th predicted position.
    ///
    /// `i` must be less than [`total()`](Self::total).
    fn get(&self, i: usize) -> I;

    /// Whether predictions never decrease.
    ///
    /// Extractors may switch to forward-only scanning when this holds.
    fn is_non_decreasing(&self) -> bool;
}

/// Predicts the contiguous block `[start, start + length)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsecutiveOracle<I> {
    start: I,
    length: usize,
}

impl<I: Index> ConsecutiveOracle<I> {
    /// Create an oracle over `length` positions starting at `start`.
    pub fn new(start: I, length: usize) -> Self {
        Self { start, length }
    }

    /// First predicted position.
    #[inline]
    pub fn start(&self) -> I {
        self.start
    }
}

impl<I: Index> Oracle<I> for ConsecutiveOracle<I> {
    #[inline]
    fn total(&self) -> usize {
        self.length
    }

    #[inline]
    fn get(&self, i: usize) -> I {
        I::from_usize(self.start.to_position() + i)
    }

    #[inline]
    fn is_non_decreasing(&self) -> bool {
        true
    }
}

/// Predicts an explicit sequence of positions.
///
/// The sequence is owned by the oracle; callers hand over a copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedOracle<I> {
    sequence: Box<[I]>,
}

impl<I: Index> FixedOracle<I> {
    /// Create an oracle that replays `sequence` in order.
    pub fn new(sequence: impl Into<Box<[I]>>) -> Self {
        Self {
            sequence: sequence.into(),
        }
    }

    /// The predicted sequence.
    #[inline]
    pub fn as_slice(&self) -> &[I] {
        &self.sequence
    }
}

impl<I: Index> FromIterator<I> for FixedOracle<I> {
    fn from_iter<T: IntoIterator<Item = I>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<I: Index> Oracle<I> for FixedOracle<I> {
    #[inline]
    fn total(&self) -> usize {
        self.sequence.len()
    }

    #[inline]
    fn get(&self, i: usize) -> I {
        self.sequence[i]
    }

    fn is_non_decreasing(&self) -> bool {
        self.sequence.windows(2).all(|w| w[0] <= w[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consecutive_predictions() {
        let oracle = ConsecutiveOracle::new(5u32, 3);
        assert_eq!(oracle.total(), 3);
        let predicted: Vec<u32> = (0..oracle.total()).map(|i| oracle.get(i)).collect();
        assert_eq!(predicted, vec![5, 6, 7]);
        assert!(oracle.is_non_decreasing());
    }

    #[test]
    fn consecutive_empty() {
        let oracle = ConsecutiveOracle::new(10i32, 0);
        assert_eq!(oracle.total(), 0);
    }

    #[test]
    fn fixed_replays_sequence_with_repeats() {
        let oracle = FixedOracle::new(vec![5i32, 1, 2, 19, 6, 7, 4, 1, 11]);
        assert_eq!(oracle.total(), 9);
        assert_eq!(oracle.get(1), 1);
        assert_eq!(oracle.get(7), 1);
        assert_eq!(oracle.get(8), 11);
        assert!(!oracle.is_non_decreasing());
    }

    #[test]
    fn fixed_sorted_is_non_decreasing() {
        let oracle: FixedOracle<u16> = [1u16, 1, 3, 8].into_iter().collect();
        assert!(oracle.is_non_decreasing());
        assert_eq!(oracle.as_slice(), &[1, 1, 3, 8]);
    }
}
