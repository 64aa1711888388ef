//! Consumer extractors backed by backend extractors.

use std::marker::PhantomData;

use super::coerce::{Coerce, CoercionBuffer, CoercionOutput};
use crate::backend::{BoxedMyopic, BoxedOracular};
use crate::consumer::{ConsecutiveAccessExtractor, IndexedAccessExtractor, RandomAccessExtractor};
use crate::index::{Index, convert};

/// Random-access extractor over a backend matrix.
///
/// `V`/`B` are the backend value and index types, `I`/`D` the consumer's.
pub struct RandomExtractor<'a, V: Coerce<D>, B, I, D> {
    inner: BoxedMyopic<'a, V, B>,
    buffer: CoercionBuffer<V, D>,
    _index: PhantomData<fn(I)>,
}

impl<'a, V: Coerce<D>, B, I, D> RandomExtractor<'a, V, B, I, D> {
    pub(crate) fn new(inner: BoxedMyopic<'a, V, B>) -> Self {
        let buffer = CoercionBuffer::new(inner.len());
        Self {
            inner,
            buffer,
            _index: PhantomData,
        }
    }

    /// Values per observation.
    #[inline]
    pub fn num_dimensions(&self) -> usize {
        self.buffer.len()
    }
}

impl<V, B, I, D> RandomAccessExtractor for RandomExtractor<'_, V, B, I, D>
where
    V: Coerce<D>,
    B: Index,
    I: Index,
    D: Copy,
{
    type Index = I;
    type Data = D;

    #[inline]
    fn get_observation(&mut self, index: I) -> &[D] {
        let (scratch, output) = self.buffer.split();
        let values = self.inner.fetch(convert(index), scratch);
        output.coerce(values)
    }
}

/// Block extractor over a backend matrix.
pub struct ConsecutiveExtractor<'a, V: Coerce<D>, D> {
    inner: BoxedOracular<'a, V>,
    buffer: CoercionBuffer<V, D>,
    remaining: usize,
}

impl<'a, V: Coerce<D>, D> ConsecutiveExtractor<'a, V, D> {
    pub(crate) fn new(inner: BoxedOracular<'a, V>, length: usize) -> Self {
        let buffer = CoercionBuffer::new(inner.len());
        Self {
            inner,
            buffer,
            remaining: length,
        }
    }

    /// Values per observation.
    #[inline]
    pub fn num_dimensions(&self) -> usize {
        self.buffer.len()
    }

    /// Observations left in the block.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.remaining
    }
}

impl<V: Coerce<D>, D: Copy> ConsecutiveAccessExtractor for ConsecutiveExtractor<'_, V, D> {
    type Data = D;

    #[inline]
    fn get_observation(&mut self) -> &[D] {
        debug_assert!(self.remaining > 0, "consecutive extractor exhausted");
        self.remaining = self.remaining.saturating_sub(1);
        let (scratch, output) = self.buffer.split();
        let values = self.inner.fetch(scratch);
        output.coerce(values)
    }
}

/// Sequence extractor over a backend matrix.
pub struct IndexedExtractor<'a, V: Coerce<D>, D> {
    inner: BoxedOracular<'a, V>,
    buffer: CoercionBuffer<V, D>,
    remaining: usize,
}

impl<'a, V: Coerce<D>, D> IndexedExtractor<'a, V, D> {
    pub(crate) fn new(inner: BoxedOracular<'a, V>, length: usize) -> Self {
        let buffer = CoercionBuffer::new(inner.len());
        Self {
            inner,
            buffer,
            remaining: length,
        }
    }

    /// Values per observation.
    #[inline]
    pub fn num_dimensions(&self) -> usize {
        self.buffer.len()
    }

    /// Entries of the sequence not yet replayed.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.remaining
    }
}

impl<V: Coerce<D>, D: Copy> IndexedAccessExtractor for IndexedExtractor<'_, V, D> {
    type Data = D;

    #[inline]
    fn get_observation(&mut self) -> &[D] {
        debug_assert!(self.remaining > 0, "indexed extractor exhausted");
        self.remaining = self.remaining.saturating_sub(1);
        let (scratch, output) = self.buffer.split();
        let values = self.inner.fetch(scratch);
        output.coerce(values)
    }
}
