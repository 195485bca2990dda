use crate::{Error, Range, Scalar, VersionedRange};
use core::mem;
use tracing::{debug, trace};

/// A sorted collection of disjoint, version-tagged ranges.
///
/// After every public mutation, all stored ranges are non-empty, pairwise disjoint and sorted by
/// `start`. Gaps between ranges are permitted (they simply carry no claim).
///
/// Each range may carry a `value` of type `V`. Whenever a stored range is split or has its
/// `block` incremented, every resulting piece keeps a clone of the original `value`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RangeStore<S: Scalar, V = ()> {
    ranges: Vec<VersionedRange<S, V>>,
}

impl<S: Scalar, V> Default for RangeStore<S, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Scalar, V> RangeStore<S, V> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self { ranges: Vec::new() }
    }

    /// Create a store from an untrusted sequence of ranges, returning an error if the sequence
    /// does not satisfy the store's invariants.
    ///
    /// To construct a store from a sequence that is already known to be valid, use
    /// [`From<Vec<VersionedRange<S, V>>>`].
    pub fn try_from_ranges(ranges: Vec<VersionedRange<S, V>>) -> Result<Self, Error<S>> {
        let store = Self { ranges };
        store.check()?;
        Ok(store)
    }

    /// Returns the first violation of the store's invariants, if any.
    pub fn check(&self) -> Result<(), Error<S>> {
        for range in &self.ranges {
            range.range().validate()?;
        }
        for pair in self.ranges.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if next.start < prev.start {
                return Err(Error::Unsorted(prev.start.clone(), next.start.clone()));
            }
            if next.start < prev.end {
                return Err(Error::Overlapping(prev.range(), next.range()));
            }
        }
        Ok(())
    }

    /// Returns the stored ranges, sorted by `start`.
    pub fn ranges(&self) -> &[VersionedRange<S, V>] {
        &self.ranges
    }

    /// Returns an iterator over the stored ranges, sorted by `start`.
    pub fn iter(&self) -> core::slice::Iter<'_, VersionedRange<S, V>> {
        self.ranges.iter()
    }

    /// Returns the number of stored ranges.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Returns `true` if the store holds no ranges.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Consume the store, returning the sorted ranges.
    pub fn into_inner(self) -> Vec<VersionedRange<S, V>> {
        self.ranges
    }

    /// Returns the range covering `point`, if any.
    pub fn get(&self, point: &S) -> Option<&VersionedRange<S, V>> {
        // First range that ends after `point` is the only candidate
        let index = self.ranges.partition_point(|range| range.end <= *point);
        self.ranges.get(index).filter(|range| range.start <= *point)
    }

    /// Returns the `block` of the range covering `point`, if any.
    pub fn block_at(&self, point: &S) -> Option<&S> {
        self.get(point).map(|range| &range.block)
    }

    /// Returns the union of all stored ranges, with touching ranges coalesced.
    pub fn coverage(&self) -> Vec<Range<S>> {
        let mut coverage: Vec<Range<S>> = Vec::new();
        for range in &self.ranges {
            if let Some(last) = coverage.last_mut() {
                if last.end == range.start {
                    last.end = range.end.clone();
                    continue;
                }
            }
            coverage.push(range.range());
        }
        coverage
    }

    fn sort(&mut self) {
        self.ranges.sort_by(|a, b| a.start.cmp(&b.start));
    }
}

impl<S: Scalar, V: Clone> RangeStore<S, V> {
    /// Add every range of `other` to `self`, resolving conflicts as [RangeStore::add] does.
    pub fn merge(&mut self, other: &RangeStore<S, V>) -> Result<(), Error<S>> {
        for range in &other.ranges {
            self.add(range.clone())?;
        }
        Ok(())
    }

    /// Project `range` onto every stored range.
    ///
    /// Returns exactly one entry per stored range (in storage order), bounded by the intersection
    /// of the stored range and `range` and carrying the stored `block` and `value`. Entries for
    /// stored ranges that do not intersect `range` are empty (`start >= end`).
    pub fn overlapping(&self, range: &Range<S>) -> Vec<VersionedRange<S, V>> {
        self.ranges.iter().map(|existing| existing.clip(range)).collect()
    }

    /// Add `range` to the store.
    ///
    /// Over any slice where `range` overlaps a stored range, the greater `block` wins (a stored
    /// range wins ties, keeping its `value`). Both sides keep the portions of their extents that
    /// are not in conflict.
    pub fn add(&mut self, range: VersionedRange<S, V>) -> Result<(), Error<S>> {
        if range.is_empty() {
            debug!(start = %range.start, end = %range.end, "rejecting empty range");
            return Err(Error::InvalidRange(range.start, range.end));
        }

        // Carve out the slices `range` loses from a scratch store and the slices it wins
        // from `self`
        let mut pending = RangeStore::from(vec![range.clone()]);
        for overlap in self.overlapping(&range.range()) {
            if overlap.block >= range.block {
                pending.remove(&overlap.range());
            } else {
                self.remove(&overlap.range());
            }
        }

        self.ranges.append(&mut pending.ranges);
        self.sort();
        trace!(
            start = %range.start,
            end = %range.end,
            block = %range.block,
            ranges = self.ranges.len(),
            "added range"
        );
        Ok(())
    }

    /// Remove `range` from every stored range it overlaps.
    ///
    /// The portions of a stored range before and after `range` are kept with their original
    /// `block` and `value`. An empty `range` is a no-op.
    pub fn remove(&mut self, range: &Range<S>) {
        let overlaps = self.overlapping(range);
        let existing = mem::take(&mut self.ranges);
        for (existing, overlap) in existing.into_iter().zip(overlaps) {
            if overlap.is_empty() {
                self.ranges.push(existing);
                continue;
            }

            // [-----------]   existing
            //     [---]       overlap
            // |xxx|           left remainder
            //         |xxx|   right remainder
            if existing.start < overlap.start {
                self.ranges.push(existing.with_bounds(existing.start.clone(), overlap.start));
            }
            if overlap.end < existing.end {
                self.ranges.push(existing.with_bounds(overlap.end, existing.end.clone()));
            }
        }

        self.sort();
        trace!(start = %range.start, end = %range.end, ranges = self.ranges.len(), "removed range");
    }

    /// Increment the `block` of every stored slice within `range`.
    ///
    /// Stored ranges that straddle a boundary of `range` are split so that only the slice inside
    /// `range` is incremented. Coverage and values are unchanged. If any affected `block` cannot
    /// be incremented, [Error::Overflow] is returned and the store is left untouched.
    pub fn increment(&mut self, range: &Range<S>) -> Result<(), Error<S>> {
        if range.is_empty() {
            debug!(start = %range.start, end = %range.end, "rejecting empty range");
            return Err(Error::InvalidRange(range.start.clone(), range.end.clone()));
        }

        // Compute every bumped slice before mutating anything
        let mut bumped = Vec::new();
        for existing in &self.ranges {
            let overlap = existing.clip(range);
            if overlap.is_empty() {
                continue;
            }
            let Some(block) = existing.block.increment() else {
                debug!(block = %existing.block, "rejecting increment");
                return Err(Error::Overflow(existing.block.clone()));
            };
            bumped.push(overlap.with_block(block));
        }

        for slice in bumped {
            self.add(slice)?;
        }
        Ok(())
    }
}

impl<S: Scalar, V> From<Vec<VersionedRange<S, V>>> for RangeStore<S, V> {
    /// Create a store from ranges that already satisfy the store's invariants (not checked).
    fn from(ranges: Vec<VersionedRange<S, V>>) -> Self {
        Self { ranges }
    }
}

impl<'a, S: Scalar, V> IntoIterator for &'a RangeStore<S, V> {
    type Item = &'a VersionedRange<S, V>;
    type IntoIter = core::slice::Iter<'a, VersionedRange<S, V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.iter()
    }
}

impl<S: Scalar, V> IntoIterator for RangeStore<S, V> {
    type Item = VersionedRange<S, V>;
    type IntoIter = std::vec::IntoIter<VersionedRange<S, V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.into_iter()
    }
}
