//! Track version-tagged claims over disjoint ranges of an ordered space.
//!
//! A [RangeStore] holds a sorted list of non-overlapping, half-open ranges, each tagged with a
//! `block` (a version). Inserting a range that overlaps existing entries resolves the conflict
//! point-by-point: the greater `block` keeps the slice it covers and the loser keeps whatever
//! remains of its original extent. When two claims carry the same `block`, the one already in
//! the store is kept.
//!
//! Range boundaries and blocks are any [Scalar], which includes the primitive integers and
//! arbitrary-precision integers such as `num_bigint::BigUint`.
//!
//! # Example
//!
//! ```
//! use commonware_coverage::{Range, RangeStore, VersionedRange};
//!
//! let mut store = RangeStore::new();
//! store.add(VersionedRange::new(0u64, 10, 0)).unwrap();
//! store.add(VersionedRange::new(5u64, 15, 1)).unwrap();
//! assert_eq!(
//!     store.ranges(),
//!     &[VersionedRange::new(0, 5, 0), VersionedRange::new(5, 15, 1)]
//! );
//!
//! store.increment(&Range::new(0, 2)).unwrap();
//! assert_eq!(store.block_at(&1), Some(&1));
//! assert_eq!(store.block_at(&3), Some(&0));
//! ```
//!
//! Ranges may also carry a value (such as the owner of a claim) that follows every piece of the
//! range as it is split or has its block incremented:
//!
//! ```
//! use commonware_coverage::{Range, RangeStore, VersionedRange};
//!
//! let mut store = RangeStore::new();
//! store.add(VersionedRange::with_value(0u64, 10, 0, "alice")).unwrap();
//! store.add(VersionedRange::with_value(4u64, 6, 1, "bob")).unwrap();
//! store.remove(&Range::new(0, 2));
//! let owners: Vec<_> = store.iter().map(|range| range.value).collect();
//! assert_eq!(owners, vec!["alice", "bob", "alice"]);
//! ```
//!
//! # Status
//!
//! `commonware-coverage` is **ALPHA** software and is not yet recommended for production use. Developers should
//! expect breaking changes and occasional instability.

use core::{
    fmt::{Debug, Display},
    ops::Sub,
};
use num_traits::{CheckedAdd, One};
use thiserror::Error;

mod range;
pub use range::{Range, VersionedRange};
mod store;
pub use store::RangeStore;

/// Errors that can occur when interacting with a [RangeStore].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error<S: Scalar> {
    #[error("invalid range: [{0}, {1})")]
    InvalidRange(S, S),
    #[error("unsorted ranges: {1} starts before {0}")]
    Unsorted(S, S),
    #[error("overlapping ranges: {0} and {1}")]
    Overlapping(Range<S>, Range<S>),
    #[error("block overflow: {0}")]
    Overflow(S),
}

/// An ordered value used for range boundaries and blocks.
///
/// Implemented for every type that supports total ordering, checked addition of one and
/// subtraction, so any fixed-width or arbitrary-precision integer can be used.
pub trait Scalar: Clone + Ord + Debug + Display {
    /// Returns the value that immediately follows `self`, or `None` if it is not representable.
    fn increment(&self) -> Option<Self>;

    /// Returns `self - other`.
    ///
    /// Callers must ensure `other <= self` for unsigned scalars.
    fn distance(&self, other: &Self) -> Self;
}

impl<T> Scalar for T
where
    T: Clone + Ord + Debug + Display + One + CheckedAdd + Sub<Output = T>,
{
    fn increment(&self) -> Option<Self> {
        self.checked_add(&T::one())
    }

    fn distance(&self, other: &Self) -> Self {
        self.clone() - other.clone()
    }
}
