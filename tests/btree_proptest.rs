//! Property tests: the tree must agree with a sorted `Vec` model for every
//! insert sequence and every query.

use bptindex::{BPlusTree, KeyValue, LeafNode};
use proptest::prelude::*;

/// Fan-out pairs that pass validation: `4 <= M`, `1 <= L <= M`.
fn arb_config() -> impl Strategy<Value = (usize, usize)> {
    (4usize..=9).prop_flat_map(|m| (Just(m), 1usize..=m))
}

/// Keys from a small domain so duplicates are common.
fn arb_keys() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(0i32..64, 0..300)
}

fn build(config: (usize, usize), keys: &[i32]) -> BPlusTree<i32, usize> {
    let mut tree = BPlusTree::new(config.0, config.1).unwrap();
    for (i, &k) in keys.iter().enumerate() {
        tree.insert(k, i);
    }
    tree
}

/// Stable sort keeps equal keys in insertion order, like the tree.
fn model(keys: &[i32]) -> Vec<(i32, usize)> {
    let mut pairs: Vec<(i32, usize)> = keys.iter().copied().zip(0..).collect();
    pairs.sort_by_key(|&(k, _)| k);
    pairs
}

/// Leaf reached by following `child_index` (right of equal separators).
fn routed_leaf<'a>(tree: &'a BPlusTree<i32, usize>, key: &i32) -> &'a LeafNode<i32, usize> {
    let mut node = tree.node(tree.root()).unwrap();
    while let Some(internal) = node.as_internal() {
        node = tree.node(internal.children()[internal.child_index(key)]).unwrap();
    }
    node.as_leaf().unwrap()
}

fn pairs(result: Vec<&KeyValue<i32, usize>>) -> Vec<(i32, usize)> {
    result.into_iter().map(|kv| (*kv.key(), *kv.value())).collect()
}

proptest! {
    #[test]
    fn prop_traverse_matches_sorted_input(config in arb_config(), keys in arb_keys()) {
        let tree = build(config, &keys);

        prop_assert_eq!(pairs(tree.traverse()), model(&keys));
        prop_assert_eq!(tree.len(), keys.len());
    }

    #[test]
    fn prop_structure_is_valid(config in arb_config(), keys in arb_keys()) {
        let tree = build(config, &keys);
        let report = tree.verify();
        prop_assert!(report.is_ok(), "{:?}", report.findings);
    }

    #[test]
    fn prop_closed_range_matches_filter(
        config in arb_config(),
        keys in arb_keys(),
        a in -4i32..70,
        width in 1i32..40,
    ) {
        let tree = build(config, &keys);
        let b = a + width;

        let expected: Vec<_> = model(&keys)
            .into_iter()
            .filter(|&(k, _)| a <= k && k <= b)
            .collect();
        prop_assert_eq!(pairs(tree.search(Some(&a), Some(&b)).unwrap()), expected);
    }

    #[test]
    fn prop_half_open_ranges_match_filter(
        config in arb_config(),
        keys in arb_keys(),
        bound in -4i32..70,
    ) {
        let tree = build(config, &keys);
        let all = model(&keys);

        let from: Vec<_> = all.iter().copied().filter(|&(k, _)| k >= bound).collect();
        prop_assert_eq!(pairs(tree.search(Some(&bound), None).unwrap()), from);

        let to: Vec<_> = all.iter().copied().filter(|&(k, _)| k <= bound).collect();
        prop_assert_eq!(pairs(tree.search(None, Some(&bound)).unwrap()), to);
    }

    #[test]
    fn prop_point_search_follows_separator_routing(
        config in arb_config(),
        keys in arb_keys(),
        target in -4i32..70,
    ) {
        let tree = build(config, &keys);
        let found = pairs(tree.search(Some(&target), Some(&target)).unwrap());

        // Found exactly when the key was inserted.
        prop_assert_eq!(found.is_empty(), !keys.contains(&target));

        let leaf = routed_leaf(&tree, &target);
        let expected: Vec<_> = leaf
            .entries()
            .get(leaf.lower_bound(&target))
            .filter(|kv| *kv.key() == target)
            .map(|kv| (*kv.key(), *kv.value()))
            .into_iter()
            .collect();
        prop_assert_eq!(found, expected);
    }

    #[test]
    fn prop_every_distinct_key_is_found(
        config in arb_config(),
        keys in prop::collection::hash_set(any::<i64>(), 0..200),
    ) {
        let mut tree = BPlusTree::new(config.0, config.1).unwrap();
        for &k in &keys {
            tree.insert(k, k.wrapping_mul(3));
        }
        for k in &keys {
            let expected = k.wrapping_mul(3);
            prop_assert_eq!(tree.get(k), Some(&expected));
        }
    }
}
