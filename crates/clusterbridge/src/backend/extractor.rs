//! Dense extractor traits and the generic oracle-driven wrapper.
//!
//! Extractors pull one full slice (row or column) of a backend matrix at a
//! time. Two flavours exist:
//!
//! - [`MyopicDenseExtractor`]: random access, the caller names each position
//! - [`OracularDenseExtractor`]: positions come from an [`Oracle`] supplied
//!   at construction, one per fetch
//!
//! Both fill a caller-provided buffer and return the authoritative slice,
//! which is either a prefix of that buffer or a view straight into the
//! backend's storage.

use std::sync::Arc;

use super::oracle::Oracle;

/// Random-access dense extractor.
pub trait MyopicDenseExtractor<V, I> {
    /// Number of values produced per fetch.
    fn len(&self) -> usize;

    /// Extract the slice at position `i`.
    ///
    /// `buffer` must hold at least [`len()`](Self::len) values. The returned
    /// slice has exactly `len()` values and may or may not alias `buffer`.
    fn fetch<'a>(&'a mut self, i: I, buffer: &'a mut [V]) -> &'a [V];

    /// Whether the extractor produces zero values per fetch.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Oracle-driven dense extractor.
pub trait OracularDenseExtractor<V> {
    /// Number of values produced per fetch.
    fn len(&self) -> usize;

    /// Extract the slice at the next predicted position.
    ///
    /// Calling this more often than the oracle's `total()` is a contract
    /// violation.
    fn fetch<'a>(&'a mut self, buffer: &'a mut [V]) -> &'a [V];

    /// Whether the extractor produces zero values per fetch.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Oracular extractor that replays an oracle over a myopic extractor.
///
/// Backends without any access-pattern planning use this as their oracular
/// implementation.
pub struct PseudoOracularExtractor<'a, V, I> {
    inner: Box<dyn MyopicDenseExtractor<V, I> + 'a>,
    oracle: Arc<dyn Oracle<I>>,
    used: usize,
}

impl<'a, V, I> PseudoOracularExtractor<'a, V, I> {
    /// Wrap `inner`, fetching positions in the order `oracle` predicts.
    pub fn new(inner: Box<dyn MyopicDenseExtractor<V, I> + 'a>, oracle: Arc<dyn Oracle<I>>) -> Self {
        Self {
            inner,
            oracle,
            used: 0,
        }
    }
}

impl<V, I> OracularDenseExtractor<V> for PseudoOracularExtractor<'_, V, I> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    fn fetch<'b>(&'b mut self, buffer: &'b mut [V]) -> &'b [V] {
        debug_assert!(
            self.used < self.oracle.total(),
            "fetched past the end of the oracle ({} predictions)",
            self.oracle.total()
        );
        let i = self.oracle.get(self.used);
        self.used += 1;
        self.inner.fetch(i, buffer)
    }
}
