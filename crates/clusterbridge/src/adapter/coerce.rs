//! Per-extractor value coercion.
//!
//! Each adapter extractor owns a [`CoercionBuffer`]: a scratch buffer for
//! backend-native values plus an output strategy picked by the
//! (backend value, consumer data) type pair:
//!
//! - same type: [`Passthrough`], the backend's slice is returned as-is
//! - different types: [`Converted`], values are cast element-wise into a
//!   second buffer
//!
//! The choice is made by trait resolution, so the per-fetch cost is either
//! nothing or one conversion pass; there is no runtime type check.

use num_traits::AsPrimitive;

/// Output strategy for one fetched slice.
pub trait CoercionOutput<V, D> {
    /// Whether values are copied into a second buffer.
    const CONVERTS: bool;

    /// Allocate for slices of `len` values.
    fn with_len(len: usize) -> Self;

    /// Produce the consumer view of `values`.
    fn coerce<'a>(&'a mut self, values: &'a [V]) -> &'a [D];
}

/// Strategy for identical types: no second buffer, no copy.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl<V> CoercionOutput<V, V> for Passthrough {
    const CONVERTS: bool = false;

    #[inline]
    fn with_len(_len: usize) -> Self {
        Passthrough
    }

    #[inline]
    fn coerce<'a>(&'a mut self, values: &'a [V]) -> &'a [V] {
        values
    }
}

/// Strategy for differing types: cast into an owned buffer.
#[derive(Debug, Clone)]
pub struct Converted<D> {
    buffer: Box<[D]>,
}

impl<V, D> CoercionOutput<V, D> for Converted<D>
where
    V: AsPrimitive<D>,
    D: Copy + Default + 'static,
{
    const CONVERTS: bool = true;

    fn with_len(len: usize) -> Self {
        Self {
            buffer: vec![D::default(); len].into_boxed_slice(),
        }
    }

    #[inline]
    fn coerce<'a>(&'a mut self, values: &'a [V]) -> &'a [D] {
        let out = &mut self.buffer[..values.len()];
        for (dst, src) in out.iter_mut().zip(values) {
            *dst = src.as_();
        }
        out
    }
}

/// Backend value types that can be presented as consumer type `D`.
///
/// Implemented for every pair of primitive numeric types.
pub trait Coerce<D>: Copy + Default + 'static {
    /// Strategy used for this pair.
    type Output: CoercionOutput<Self, D>;
}

macro_rules! impl_coerce {
    () => {};
    ($head:ty $(, $tail:ty)*) => {
        impl Coerce<$head> for $head {
            type Output = Passthrough;
        }
        $(
            impl Coerce<$tail> for $head {
                type Output = Converted<$tail>;
            }
            impl Coerce<$head> for $tail {
                type Output = Converted<$head>;
            }
        )*
        impl_coerce!($($tail),*);
    };
}

impl_coerce!(f32, f64, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// Scratch storage for one extractor.
///
/// Holds one observation of backend values and, when types differ, one
/// observation of converted values. Reused across fetches.
pub struct CoercionBuffer<V: Coerce<D>, D> {
    scratch: Box<[V]>,
    output: V::Output,
}

impl<V: Coerce<D>, D> CoercionBuffer<V, D> {
    /// Allocate for observations of `len` dimensions.
    pub fn new(len: usize) -> Self {
        Self {
            scratch: vec![V::default(); len].into_boxed_slice(),
            output: <V::Output as CoercionOutput<V, D>>::with_len(len),
        }
    }

    /// Values per observation.
    #[inline]
    pub fn len(&self) -> usize {
        self.scratch.len()
    }

    /// Whether observations have zero dimensions.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.scratch.is_empty()
    }

    /// Whether this buffer converts (and so holds a second buffer).
    #[inline]
    pub fn converts(&self) -> bool {
        <V::Output as CoercionOutput<V, D>>::CONVERTS
    }

    /// Borrow the scratch buffer and the output strategy separately, so the
    /// backend can fill one while the other produces the result.
    #[inline]
    pub fn split(&mut self) -> (&mut [V], &mut V::Output) {
        (&mut self.scratch, &mut self.output)
    }
}

impl<V: Coerce<D>, D> std::fmt::Debug for CoercionBuffer<V, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoercionBuffer")
            .field("len", &self.len())
            .field("converts", &self.converts())
            .finish()
    }
}
