use proptest::prelude::*;
use smol_container::{
    ArrayContainer, DOMAIN_SIZE, Strategy,
    kernel::{Kernel, Scalar, Wide},
    storage::grow_capacity,
};
use std::collections::BTreeSet;

// Strategy for generating sparse sets spread over the whole domain
prop_compose! {
    fn arb_set(max_len: usize)
        (values in prop::collection::btree_set(any::<u16>(), 0..max_len))
        -> BTreeSet<u16>
    {
        values
    }
}

// Strategy for generating sets packed into a narrow window, so that two of
// them overlap a lot
prop_compose! {
    fn clustered_set(max_len: usize)
        (start in 0u16..1000, values in prop::collection::btree_set(0u16..2000, 0..max_len))
        -> BTreeSet<u16>
    {
        values.into_iter().map(|v| v + start).collect()
    }
}

fn to_container(set: &BTreeSet<u16>) -> ArrayContainer {
    set.iter().copied().collect()
}

fn to_vec(set: impl IntoIterator<Item = u16>) -> Vec<u16> {
    set.into_iter().collect()
}

fn strictly_increasing(values: &[u16]) -> bool {
    values.windows(2).all(|w| w[0] < w[1])
}

proptest! {
    #[test]
    fn test_add_remove_matches_btreeset(
        ops in prop::collection::vec((any::<bool>(), 0u16..512), 0..400)
    ) {
        let mut container = ArrayContainer::new();
        let mut reference = BTreeSet::new();

        for (insert, value) in ops {
            if insert {
                prop_assert_eq!(container.add(value), reference.insert(value));
            } else {
                prop_assert_eq!(container.remove(value), reference.remove(&value));
            }
            prop_assert!(container.len() <= container.capacity());
        }

        prop_assert!(strictly_increasing(container.as_slice()));
        prop_assert_eq!(to_vec(container.iter()), to_vec(reference.iter().copied()));
        for value in 0u16..512 {
            prop_assert_eq!(container.contains(value), reference.contains(&value));
        }
    }

    #[test]
    fn test_union_matches_btreeset(a in clustered_set(300), b in clustered_set(300)) {
        let result = to_container(&a).union(&to_container(&b));
        prop_assert!(strictly_increasing(result.as_slice()));
        prop_assert_eq!(to_vec(result.iter()), to_vec(a.union(&b).copied()));
    }

    #[test]
    fn test_intersection_matches_btreeset(a in clustered_set(300), b in clustered_set(300)) {
        let (ca, cb) = (to_container(&a), to_container(&b));
        let expected = to_vec(a.intersection(&b).copied());

        prop_assert_eq!(to_vec(ca.intersection(&cb)), expected.clone());
        prop_assert_eq!(to_vec(cb.intersection(&ca)), expected.clone());
        prop_assert_eq!(ca.intersection_len(&cb), expected.len());
        prop_assert_eq!(ca.is_disjoint(&cb), expected.is_empty());
    }

    #[test]
    fn test_difference_matches_btreeset(a in clustered_set(300), b in clustered_set(300)) {
        let (ca, cb) = (to_container(&a), to_container(&b));
        prop_assert_eq!(
            to_vec(ca.difference(&cb)),
            to_vec(a.difference(&b).copied())
        );
        prop_assert_eq!(
            to_vec(ca.symmetric_difference(&cb)),
            to_vec(a.symmetric_difference(&b).copied())
        );
        prop_assert_eq!(ca.is_subset(&cb), a.is_subset(&b));
    }

    #[test]
    fn test_strategies_agree(small in arb_set(20), large in arb_set(3000)) {
        let (cs, cl) = (to_container(&small), to_container(&large));
        let mut balanced = ArrayContainer::new();
        let mut skewed = ArrayContainer::new();
        let mut auto = ArrayContainer::new();

        cs.intersection_into_using(&cl, &mut balanced, Strategy::Balanced).unwrap();
        cs.intersection_into_using(&cl, &mut skewed, Strategy::Skewed).unwrap();
        cl.intersection_into_using(&cs, &mut auto, Strategy::Auto).unwrap();

        prop_assert_eq!(&balanced, &skewed);
        prop_assert_eq!(&balanced, &auto);
    }

    #[test]
    fn test_kernels_agree(a in clustered_set(500), b in clustered_set(500)) {
        let (a, b) = (to_vec(a), to_vec(b));
        let mut scalar = vec![0u16; a.len() + b.len()];
        let mut wide = vec![0u16; a.len() + b.len()];

        let n = Scalar::union(&a, &b, &mut scalar);
        let m = Wide::union(&a, &b, &mut wide);
        prop_assert_eq!(&scalar[..n], &wide[..m]);

        let n = Scalar::intersect(&a, &b, &mut scalar);
        let m = Wide::intersect(&a, &b, &mut wide);
        prop_assert_eq!(&scalar[..n], &wide[..m]);
        prop_assert_eq!(Scalar::intersect_len(&a, &b), Wide::intersect_len(&a, &b));
    }

    #[test]
    fn test_in_place_intersection(a in clustered_set(300), b in clustered_set(300)) {
        let mut ca = to_container(&a);
        let cb = to_container(&b);
        let before = cb.clone();
        let capacity = ca.capacity();

        ca.intersection_with(&cb);
        prop_assert_eq!(to_vec(ca.iter()), to_vec(a.intersection(&b).copied()));
        prop_assert_eq!(ca.capacity(), capacity);
        prop_assert_eq!(cb, before);
    }

    #[test]
    fn test_clone_is_independent(a in arb_set(200), extra in any::<u16>()) {
        let original = to_container(&a);
        let mut copy = original.clone();
        prop_assert_eq!(&copy, &original);

        copy.add(extra);
        copy.clear();
        prop_assert_eq!(to_vec(original.iter()), to_vec(a.iter().copied()));
    }

    #[test]
    fn test_grow_respects_bounds(
        capacity in 0usize..5000,
        min in 0usize..10_000,
        max in 0usize..=DOMAIN_SIZE,
        preserve in any::<bool>()
    ) {
        prop_assume!(min <= max);
        let mut container = ArrayContainer::with_capacity(capacity);
        container.extend((0..capacity.min(100)).map(|v| v as u16));
        let len = container.len();

        container.grow(min, max, preserve).unwrap();
        prop_assert!(container.capacity() >= min);
        prop_assert!(container.capacity() <= max);
        if preserve {
            prop_assert_eq!(container.len(), len.min(container.capacity()));
        } else {
            prop_assert!(container.is_empty());
        }
    }

    #[test]
    fn test_schedule_never_shrinks(capacity in 0usize..1_000_000) {
        prop_assert!(grow_capacity(capacity) > capacity);
    }
}
