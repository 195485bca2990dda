//! Half-open ranges over an ordered [Scalar] space.

use crate::{Error, Scalar};
use core::{
    cmp::{max, min},
    fmt::{self, Display, Formatter},
};

/// A half-open range `[start, end)`.
///
/// A range with `start >= end` is empty. Empty ranges are rejected wherever a range is supplied
/// by a caller but may be produced by [Range::intersection] to signal "no overlap".
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Range<S: Scalar> {
    pub start: S,
    pub end: S,
}

impl<S: Scalar> Range<S> {
    /// Create a new range (without validation).
    pub fn new(start: S, end: S) -> Self {
        Self { start, end }
    }

    /// Returns `true` if the range covers no points.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Returns an error if the range covers no points.
    pub fn validate(&self) -> Result<(), Error<S>> {
        if self.is_empty() {
            return Err(Error::InvalidRange(self.start.clone(), self.end.clone()));
        }
        Ok(())
    }

    /// Returns the (possibly empty) range covered by both `self` and `other`.
    pub fn intersection(&self, other: &Range<S>) -> Range<S> {
        Range {
            start: max(&self.start, &other.start).clone(),
            end: min(&self.end, &other.end).clone(),
        }
    }

    /// Returns `true` if `point` falls within the range.
    pub fn contains(&self, point: &S) -> bool {
        self.start <= *point && *point < self.end
    }

    /// Returns the number of points covered by the range.
    ///
    /// # Panics
    ///
    /// May panic (for unsigned scalars) if the range is empty.
    pub fn len(&self) -> S {
        self.end.distance(&self.start)
    }
}

impl<S: Scalar> Display for Range<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// A [Range] tagged with the `block` (version) that claimed it and an arbitrary `value`.
///
/// When two versioned ranges cover the same point, the one with the greater `block` is
/// authoritative. The `value` (for example, the owner of the claim) is carried along unchanged
/// whenever the range is split or its `block` is bumped.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct VersionedRange<S: Scalar, V = ()> {
    pub start: S,
    pub end: S,
    pub block: S,
    pub value: V,
}

impl<S: Scalar> VersionedRange<S> {
    /// Create a new versioned range without a value (without validation).
    pub fn new(start: S, end: S, block: S) -> Self {
        Self::with_value(start, end, block, ())
    }
}

impl<S: Scalar, V> VersionedRange<S, V> {
    /// Create a new versioned range carrying `value` (without validation).
    pub fn with_value(start: S, end: S, block: S, value: V) -> Self {
        Self {
            start,
            end,
            block,
            value,
        }
    }

    /// Returns the bounds of the range, dropping the `block` and `value`.
    pub fn range(&self) -> Range<S> {
        Range::new(self.start.clone(), self.end.clone())
    }

    /// Returns `true` if the range covers no points.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Replace the `block`, keeping the bounds and `value`.
    pub fn with_block(self, block: S) -> Self {
        Self { block, ..self }
    }
}

impl<S: Scalar, V: Clone> VersionedRange<S, V> {
    /// Returns a copy of the range with new bounds, keeping the `block` and `value`.
    pub fn with_bounds(&self, start: S, end: S) -> Self {
        Self::with_value(start, end, self.block.clone(), self.value.clone())
    }

    /// Clip the range to `window`, keeping the `block` and `value`.
    ///
    /// The result is empty if `self` and `window` do not intersect.
    pub fn clip(&self, window: &Range<S>) -> Self {
        let Range { start, end } = self.range().intersection(window);
        self.with_bounds(start, end)
    }
}

impl<S: Scalar, V> Display for VersionedRange<S, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})@{}", self.start, self.end, self.block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigUint;
    use test_case::test_case;

    #[test_case(0, 10, false; "valid")]
    #[test_case(5, 5, true; "zero length")]
    #[test_case(7, 3, true; "reversed")]
    fn test_empty(start: u64, end: u64, empty: bool) {
        let range = Range::new(start, end);
        assert_eq!(range.is_empty(), empty);
        assert_eq!(range.validate().is_err(), empty);
        assert_eq!(VersionedRange::new(start, end, 0).is_empty(), empty);
    }

    #[test_case((0, 10), (5, 15), (5, 10); "partial right")]
    #[test_case((5, 15), (0, 10), (5, 10); "partial left")]
    #[test_case((0, 10), (3, 7), (3, 7); "contained")]
    #[test_case((3, 7), (0, 10), (3, 7); "containing")]
    #[test_case((0, 5), (5, 10), (5, 5); "adjacent")]
    #[test_case((0, 5), (20, 30), (20, 5); "disjoint")]
    fn test_intersection(a: (u64, u64), b: (u64, u64), expected: (u64, u64)) {
        let a = Range::new(a.0, a.1);
        let b = Range::new(b.0, b.1);
        let overlap = a.intersection(&b);
        assert_eq!(overlap, Range::new(expected.0, expected.1));
        assert_eq!(overlap.is_empty(), expected.0 >= expected.1);
    }

    #[test]
    fn test_contains() {
        let range = Range::new(3u64, 7);
        assert!(!range.contains(&2));
        assert!(range.contains(&3));
        assert!(range.contains(&6));
        assert!(!range.contains(&7));
        assert_eq!(range.len(), 4);
    }

    #[test]
    fn test_clip() {
        let range = VersionedRange::new(0u64, 10, 4);
        assert_eq!(
            range.clip(&Range::new(5, 20)),
            VersionedRange::new(5, 10, 4)
        );
        assert!(range.clip(&Range::new(10, 20)).is_empty());
        assert_eq!(range.range(), Range::new(0, 10));
    }

    #[test]
    fn test_value_follows_range() {
        let range = VersionedRange::with_value(0u64, 10, 4, "alice");
        assert_eq!(
            range.clip(&Range::new(2, 6)),
            VersionedRange::with_value(2, 6, 4, "alice")
        );
        assert_eq!(
            range.with_bounds(7, 9),
            VersionedRange::with_value(7, 9, 4, "alice")
        );
        assert_eq!(
            range.with_block(5),
            VersionedRange::with_value(0, 10, 5, "alice")
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Range::new(1u64, 2).to_string(), "[1, 2)");
        assert_eq!(VersionedRange::new(1u64, 2, 3).to_string(), "[1, 2)@3");

        let big = BigUint::from(u128::MAX) + 1u8;
        let range = Range::new(BigUint::from(0u8), big);
        assert_eq!(
            range.to_string(),
            "[0, 340282366920938463463374607431768211456)"
        );
    }
}
