//! Property-based tests for OpenHashSet laws.
//!
//! These tests verify that OpenHashSet satisfies the properties expected of
//! a set, using `std::collections::HashSet` as the model, and that its
//! storage invariants survive arbitrary add/remove sequences.

use std::collections::HashSet;

use flatcoll::hashset::{OpenHashSet, prime};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Operation {
    Add(u8),
    Remove(u8),
}

fn operation_strategy() -> impl Strategy<Value = Operation> {
    prop_oneof![
        (0_u8..64).prop_map(Operation::Add),
        (0_u8..64).prop_map(Operation::Remove),
    ]
}

// =============================================================================
// Add Idempotence Law
// Description: Adding an element twice returns false and keeps the count
// =============================================================================

proptest! {
    #[test]
    fn prop_add_idempotent_law(
        elements in prop::collection::vec(any::<i32>(), 0..50),
        element: i32
    ) {
        let mut set: OpenHashSet<i32> = elements.into_iter().collect();
        set.add(element);
        let count = set.len();

        prop_assert!(!set.add(element));
        prop_assert_eq!(set.len(), count);
    }
}

// =============================================================================
// Remove-Contains Law
// Description: A removed element is never contained afterwards
// =============================================================================

proptest! {
    #[test]
    fn prop_remove_contains_law(
        elements in prop::collection::vec(any::<i32>(), 0..50),
        element: i32
    ) {
        let mut set: OpenHashSet<i32> = elements.into_iter().collect();
        set.remove(&element);

        prop_assert!(!set.contains(&element));
    }
}

// =============================================================================
// Model Law
// Description: Any add/remove sequence agrees with std HashSet
// =============================================================================

proptest! {
    #[test]
    fn prop_matches_std_model_law(
        operations in prop::collection::vec(operation_strategy(), 0..300)
    ) {
        let mut set: OpenHashSet<u8> = OpenHashSet::new();
        let mut model: HashSet<u8> = HashSet::new();

        for operation in operations {
            match operation {
                Operation::Add(value) => {
                    prop_assert_eq!(set.add(value), model.insert(value));
                }
                Operation::Remove(value) => {
                    prop_assert_eq!(set.remove(&value), model.remove(&value));
                }
            }
            prop_assert_eq!(set.len(), model.len());
            prop_assert!(set.len() <= set.capacity());
        }

        for value in 0_u8..64 {
            prop_assert_eq!(set.contains(&value), model.contains(&value));
        }
        prop_assert_eq!(set.iter().count(), model.len());
    }
}

// =============================================================================
// Storage Law
// Description: Live slots plus free slots account for every used slot,
// and the capacity is always a prime
// =============================================================================

proptest! {
    #[test]
    fn prop_slot_accounting_law(
        operations in prop::collection::vec(operation_strategy(), 0..300)
    ) {
        let mut set: OpenHashSet<u8> = OpenHashSet::new();
        for operation in operations {
            match operation {
                Operation::Add(value) => { set.add(value); }
                Operation::Remove(value) => { set.remove(&value); }
            }
            let live = set.slots().iter().filter(|slot| slot.is_live()).count();
            prop_assert_eq!(live, set.len());
            prop_assert_eq!(set.slots().len(), set.len() + set.free_count());
            prop_assert!(set.capacity() == 0 || prime::is_prime(set.capacity()));
        }
    }
}

// =============================================================================
// Trim Law
// Description: trim_excess keeps the elements and drops free-list gaps
// =============================================================================

proptest! {
    #[test]
    fn prop_trim_excess_preserves_elements_law(
        operations in prop::collection::vec(operation_strategy(), 0..200)
    ) {
        let mut set: OpenHashSet<u8> = OpenHashSet::new();
        for operation in operations {
            match operation {
                Operation::Add(value) => { set.add(value); }
                Operation::Remove(value) => { set.remove(&value); }
            }
        }
        let before = set.clone();
        set.trim_excess();

        prop_assert_eq!(set.free_count(), 0);
        prop_assert_eq!(&set, &before);
        if !set.is_empty() {
            prop_assert_eq!(set.capacity(), prime::next_prime(set.len()));
        }
    }
}

// =============================================================================
// Union-Superset Law
// Description: After A.union_with(B), A is a superset of B
// =============================================================================

proptest! {
    #[test]
    fn prop_union_superset_law(
        elements_a in prop::collection::vec(any::<i32>(), 0..40),
        elements_b in prop::collection::vec(any::<i32>(), 0..40)
    ) {
        let mut set_a: OpenHashSet<i32> = elements_a.into_iter().collect();
        let set_b: OpenHashSet<i32> = elements_b.into_iter().collect();

        set_a.union_with(set_b.iter().copied());

        prop_assert!(set_a.is_superset_of_set(&set_b));
        prop_assert!(set_a.is_superset_of(&set_b));
        prop_assert!(set_b.is_subset_of_set(&set_a));
    }
}

// =============================================================================
// Intersection Law
// Description: intersect_with_set agrees with the std intersection
// =============================================================================

proptest! {
    #[test]
    fn prop_intersection_model_law(
        elements_a in prop::collection::vec(0_i32..50, 0..40),
        elements_b in prop::collection::vec(0_i32..50, 0..40)
    ) {
        let model: HashSet<i32> = elements_a
            .iter()
            .copied()
            .collect::<HashSet<_>>()
            .intersection(&elements_b.iter().copied().collect())
            .copied()
            .collect();

        let mut set_a: OpenHashSet<i32> = elements_a.into_iter().collect();
        let set_b: OpenHashSet<i32> = elements_b.into_iter().collect();
        set_a.intersect_with_set(&set_b);

        prop_assert_eq!(set_a.len(), model.len());
        prop_assert!(set_a.set_equals(&model));
    }
}

// =============================================================================
// Symmetric Difference Law
// Description: A xor B xor B = A
// =============================================================================

proptest! {
    #[test]
    fn prop_symmetric_except_involution_law(
        elements_a in prop::collection::vec(0_i32..50, 0..40),
        elements_b in prop::collection::vec(0_i32..50, 0..40)
    ) {
        let original: OpenHashSet<i32> = elements_a.into_iter().collect();
        let other: OpenHashSet<i32> = elements_b.into_iter().collect();

        let mut set = original.clone();
        set.symmetric_except_with_set(&other);
        set.symmetric_except_with_set(&other);

        prop_assert!(set.set_equals_set(&original));
    }
}

// =============================================================================
// Except Law
// Description: After A.except_with(B), A and B do not overlap
// =============================================================================

proptest! {
    #[test]
    fn prop_except_disjoint_law(
        elements_a in prop::collection::vec(0_i32..50, 0..40),
        elements_b in prop::collection::vec(0_i32..50, 0..40)
    ) {
        let mut set_a: OpenHashSet<i32> = elements_a.into_iter().collect();
        set_a.except_with(&elements_b);

        prop_assert!(!set_a.overlaps(&elements_b));
    }
}
