#![no_main]

use arbitrary::Arbitrary;
use commonware_coverage::{Range, RangeStore, VersionedRange};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
enum Operation {
    Add { start: u16, end: u16, block: u8 },
    Remove { start: u16, end: u16 },
    Increment { start: u16, end: u16 },
    Merge { ranges: Vec<(u16, u16, u8)> },
    Overlapping { start: u16, end: u16 },
}

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    operations: Vec<Operation>,
}

fn fuzz(input: FuzzInput) {
    let mut store = RangeStore::<u64>::new();
    for operation in input.operations {
        match operation {
            Operation::Add { start, end, block } => {
                let range = VersionedRange::new(start as u64, end as u64, block as u64);
                let before = store.clone();
                if store.add(range.clone()).is_err() {
                    assert!(start >= end);
                    assert_eq!(store, before);
                    continue;
                }

                // Adding the same range again never changes anything
                let once = store.clone();
                store.add(range).unwrap();
                assert_eq!(store, once);
            }
            Operation::Remove { start, end } => {
                let range = Range::new(start as u64, end as u64);
                store.remove(&range);
                if start < end {
                    for point in start..end {
                        assert!(store.block_at(&(point as u64)).is_none());
                    }
                }
            }
            Operation::Increment { start, end } => {
                let range = Range::new(start as u64, end as u64);
                let before = store.clone();
                if store.increment(&range).is_err() {
                    assert!(start >= end);
                    assert_eq!(store, before);
                    continue;
                }
                assert_eq!(store.coverage(), before.coverage());
            }
            Operation::Merge { ranges } => {
                let mut other = RangeStore::new();
                for (start, end, block) in ranges {
                    let _ = other.add(VersionedRange::new(start as u64, end as u64, block as u64));
                }
                let mut replayed = store.clone();
                for range in &other {
                    replayed.add(range.clone()).unwrap();
                }
                store.merge(&other).unwrap();
                assert_eq!(store, replayed);
            }
            Operation::Overlapping { start, end } => {
                let overlaps = store.overlapping(&Range::new(start as u64, end as u64));
                assert_eq!(overlaps.len(), store.len());
                for (overlap, existing) in overlaps.iter().zip(store.iter()) {
                    assert_eq!(overlap.block, existing.block);
                }
            }
        }
        store.check().unwrap();
    }
}

fuzz_target!(|input: FuzzInput| {
    fuzz(input);
});
