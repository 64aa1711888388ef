//! Integer index types shared by both sides of the adapter.
//!
//! Backend matrices report their extents in their own index type and
//! clustering code counts observations in another; the two may differ in
//! width and signedness. [`Index`] captures what the adapter needs from
//! either: lossless widening to `usize` for valid positions, and a checked
//! narrowing from `usize` for extents.

use std::fmt::Debug;

use num_traits::{AsPrimitive, NumCast, PrimInt};

/// Primitive integer usable as a row, column or observation index.
///
/// Implemented for every primitive integer type.
pub trait Index: PrimInt + AsPrimitive<usize> + Debug + Send + Sync + 'static {
    /// Convert a position known to be in range.
    ///
    /// Positions are only ever produced from extents that were already
    /// validated against this type, so the conversion does not check.
    fn from_usize(n: usize) -> Self;

    /// Convert an extent, returning `None` if it is not representable.
    #[inline]
    fn checked_from_usize(n: usize) -> Option<Self> {
        <Self as NumCast>::from(n)
    }

    /// Widen to `usize`.
    ///
    /// Negative values are a caller contract violation.
    #[inline]
    fn to_position(self) -> usize {
        debug_assert!(self >= Self::zero(), "negative index {:?}", self);
        self.as_()
    }
}

impl<T> Index for T
where
    T: PrimInt + AsPrimitive<usize> + Debug + Send + Sync + 'static,
    usize: AsPrimitive<T>,
{
    #[inline]
    fn from_usize(n: usize) -> Self {
        n.as_()
    }
}

/// Re-express an index of one type in another.
///
/// Goes through `usize`, so any in-range non-negative index converts exactly.
#[inline]
pub fn convert<S: Index, T: Index>(index: S) -> T {
    T::from_usize(index.to_position())
}
