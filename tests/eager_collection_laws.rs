#![cfg(feature = "eager")]
//! Property-based tests for EagerCollection.
//!
//! This module verifies the structural properties of the eager operations
//! using proptest.

use collectables::eager::{EagerCollection, KeySelector};
use collectables::key::Key;
use proptest::prelude::*;

fn keys_of<V>(collection: &EagerCollection<V>) -> Vec<Key> {
    collection.iter().map(|(key, _)| key.clone()).collect()
}

// =============================================================================
// Mapping and filtering
// =============================================================================

proptest! {
    /// map preserves length and the key sequence
    #[test]
    fn prop_map_preserves_keys(elements in prop::collection::vec(any::<i32>(), 0..50)) {
        let collection: EagerCollection<i32> = elements.into_iter().collect();
        let mapped = collection.map(|value, _| i64::from(*value) * 2);

        prop_assert_eq!(mapped.len(), collection.len());
        prop_assert_eq!(keys_of(&mapped), keys_of(&collection));
    }

    /// filter yields a subset whose keys map to the same values
    #[test]
    fn prop_filter_is_keyed_subset(elements in prop::collection::vec(any::<i32>(), 0..50)) {
        let collection: EagerCollection<i32> = elements.into_iter().collect();
        let filtered = collection.filter(|value, _| value % 3 == 0);

        prop_assert!(filtered.len() <= collection.len());
        for (key, value) in &filtered {
            prop_assert_eq!(collection.get(key), Some(value));
        }
    }
}

// =============================================================================
// Combination
// =============================================================================

proptest! {
    /// concat of index-keyed collections: length adds up, order is A then B
    #[test]
    fn prop_concat_length_and_order(
        left in prop::collection::vec(any::<i32>(), 0..30),
        right in prop::collection::vec(any::<i32>(), 0..30)
    ) {
        let first: EagerCollection<i32> = left.iter().copied().collect();
        let second: EagerCollection<i32> = right.iter().copied().collect();
        let joined = first.concat(&second);

        prop_assert_eq!(joined.len(), left.len() + right.len());
        let expected: Vec<i32> = left.into_iter().chain(right).collect();
        prop_assert_eq!(joined.to_vec(), expected);
    }

    /// zip and combine are as long as the shorter input
    #[test]
    fn prop_zip_and_combine_truncate(
        left in prop::collection::vec("[a-z]{1,4}", 0..20),
        right in prop::collection::vec(any::<i32>(), 0..20)
    ) {
        let names: EagerCollection<String> = left.iter().cloned().collect();
        let values: EagerCollection<i32> = right.iter().copied().collect();
        let shorter = left.len().min(right.len());

        prop_assert_eq!(names.zip(&values).len(), shorter);

        let combined = names.combine(&values);
        prop_assert!(combined.len() <= shorter);
        for (key, _) in &combined {
            let label = key.as_label().map(str::to_string);
            prop_assert!(label.is_some_and(|label| left.contains(&label)));
        }
    }
}

// =============================================================================
// Partitioning and chunking
// =============================================================================

proptest! {
    /// partition: union is the original, halves are disjoint and respect P
    #[test]
    fn prop_partition_splits_exactly(elements in prop::collection::vec(any::<i32>(), 0..50)) {
        let collection: EagerCollection<i32> = elements.into_iter().collect();
        let (even, odd) = collection.partition(|value, _| value % 2 == 0);

        prop_assert_eq!(even.len() + odd.len(), collection.len());
        prop_assert!(even.iter().all(|(_, value)| value % 2 == 0));
        prop_assert!(odd.iter().all(|(_, value)| value % 2 != 0));
        prop_assert!(even.iter().all(|(key, _)| !odd.has(key)));
    }

    /// chunk(n): ceil(L / n) chunks, all full except possibly the last
    #[test]
    fn prop_chunk_sizes(
        elements in prop::collection::vec(any::<u8>(), 0..60),
        size in 1usize..10
    ) {
        let collection: EagerCollection<u8> = elements.iter().copied().collect();
        let chunks = collection.chunk(size).unwrap();

        prop_assert_eq!(chunks.len(), elements.len().div_ceil(size));
        let sizes: Vec<usize> = chunks.iter().map(|(_, chunk)| chunk.len()).collect();
        if let Some((last, full)) = sizes.split_last() {
            prop_assert!(full.iter().all(|chunk_size| *chunk_size == size));
            prop_assert!(*last >= 1 && *last <= size);
        }
    }

    /// group_by then collapse reproduces the original multiset
    #[test]
    fn prop_group_by_flatten_is_permutation(elements in prop::collection::vec(0u8..20, 0..50)) {
        let collection: EagerCollection<u8> = elements.iter().copied().collect();
        let groups = collection.group_by(KeySelector::function(|value: &u8, _: &Key| {
            usize::from(value % 4)
        }));

        let mut flattened = groups.collapse().to_vec();
        let mut original = elements;
        flattened.sort_unstable();
        original.sort_unstable();
        prop_assert_eq!(flattened, original);
    }
}

// =============================================================================
// Ordering and mutation
// =============================================================================

proptest! {
    /// sort yields a sorted permutation and keeps each value with its key
    #[test]
    fn prop_sort_keeps_pairs(elements in prop::collection::vec(any::<i16>(), 0..50)) {
        let collection: EagerCollection<i16> = elements.into_iter().collect();
        let sorted = collection.sort();

        let values = sorted.to_vec();
        prop_assert!(values.windows(2).all(|window| window[0] <= window[1]));
        for (key, value) in &sorted {
            prop_assert_eq!(collection.get(key), Some(value));
        }
    }

    /// push then pop returns the pushed value and restores the collection
    #[test]
    fn prop_push_pop(elements in prop::collection::vec(any::<i32>(), 0..30), extra: i32) {
        let original: EagerCollection<i32> = elements.into_iter().collect();
        let mut collection = original.clone();
        collection.push(extra);

        prop_assert_eq!(collection.pop(), Ok(extra));
        prop_assert_eq!(collection.to_vec(), original.to_vec());
    }

    /// reduce with + agrees with sum
    #[test]
    fn prop_reduce_matches_sum(elements in prop::collection::vec(-1000i64..1000, 0..50)) {
        let collection: EagerCollection<i64> = elements.iter().copied().collect();

        prop_assert_eq!(collection.reduce(0, |total, value, _| total + value), collection.sum());
        prop_assert_eq!(collection.sum(), elements.iter().sum::<i64>());
    }
}
