//! Integration tests for the B+ tree.
//!
//! These tests drive the public API only: build trees through `insert`,
//! inspect them through `search`, `traverse` and the read-only node
//! accessors.

use bptindex::{BPlusTree, ConfigError, Error, KeyValue, Node, NodeId};

const REFERENCE_KEYS: [i32; 20] = [
    10, 17, 9, 33, 33, 50, 36, 41, 31, 30, 13, 6, 37, 45, 20, 4, 35, 11, 2, 40,
];

/// Grows an `M = L = 4` tree to four levels.
const HEIGHT_FOUR_KEYS: [i32; 49] = [
    3, 33, 25, 30, 15, 27, 16, 35, 28, 39, 44, 2, 47, 45, 14, 42, 18, 3, 9, 18, 34, 19, 33, 46,
    24, 45, 48, 20, 10, 8, 35, 3, 49, 48, 50, 9, 46, 1, 31, 6, 37, 34, 33, 37, 6, 48, 39, 24, 17,
];

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn build(keys: &[i32]) -> BPlusTree<i32, usize> {
    let mut tree = BPlusTree::new(4, 4).unwrap();
    for (i, &k) in keys.iter().enumerate() {
        tree.insert(k, i);
    }
    tree
}

fn keys_of(result: &[&KeyValue<i32, usize>]) -> Vec<i32> {
    result.iter().map(|kv| *kv.key()).collect()
}

/// Walk every node reachable from the root.
fn all_nodes(tree: &BPlusTree<i32, usize>) -> Vec<(NodeId, &Node<i32, usize>)> {
    let mut out = vec![];
    let mut stack = vec![tree.root()];
    while let Some(id) = stack.pop() {
        let node = tree.node(id).unwrap();
        if let Some(internal) = node.as_internal() {
            stack.extend(internal.children());
        }
        out.push((id, node));
    }
    out
}

// ============================================================================
// Reference sequence
// ============================================================================

#[test]
fn test_reference_sequence() {
    init_tracing();
    let tree = build(&REFERENCE_KEYS);

    let mut expected = REFERENCE_KEYS.to_vec();
    expected.sort();
    assert_eq!(keys_of(&tree.traverse()), expected);
    assert_eq!(
        tree.traverse().iter().filter(|kv| *kv.key() == 33).count(),
        2
    );
    assert_eq!(tree.height(), 3);

    let report = tree.verify();
    assert!(report.is_ok(), "{:?}", report.findings);
}

#[test]
fn test_height_four_sequence() {
    init_tracing();
    let tree = build(&HEIGHT_FOUR_KEYS);

    let mut expected = HEIGHT_FOUR_KEYS.to_vec();
    expected.sort();
    assert_eq!(keys_of(&tree.traverse()), expected);
    assert_eq!(tree.len(), HEIGHT_FOUR_KEYS.len());
    assert_eq!(tree.height(), 4);

    let report = tree.verify();
    assert!(report.is_ok(), "{:?}", report.findings);

    for &k in &HEIGHT_FOUR_KEYS {
        assert!(tree.contains_key(&k), "key {k} not found");
    }
}

#[test]
fn test_reference_point_search_value() {
    let tree = build(&REFERENCE_KEYS);

    // Two 33s were inserted at positions 3 and 4; the lookup goes right of
    // the equal separator and finds the one at position 4.
    let found = tree.search(Some(&33), Some(&33)).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(*found[0].key(), 33);
    assert_eq!(*found[0].value(), 4);
    assert_eq!(tree.get(&33), Some(&4));
}

#[test]
fn test_reference_sequence_searches() {
    let tree = build(&REFERENCE_KEYS);

    for &k in &REFERENCE_KEYS {
        let found = tree.search(Some(&k), Some(&k)).unwrap();
        assert_eq!(keys_of(&found), vec![k]);
    }
    assert!(tree.search(Some(&5), Some(&5)).unwrap().is_empty());

    assert_eq!(
        keys_of(&tree.search(Some(&30), Some(&40)).unwrap()),
        vec![30, 31, 33, 33, 35, 36, 37, 40]
    );
    assert_eq!(
        keys_of(&tree.search(Some(&41), None).unwrap()),
        vec![41, 45, 50]
    );
    assert_eq!(
        keys_of(&tree.search(None, Some(&9)).unwrap()),
        vec![2, 4, 6, 9]
    );
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_misconfiguration() {
    assert!(matches!(
        BPlusTree::<i32, ()>::new(3, 3),
        Err(Error::Config(_))
    ));
    assert!(matches!(
        BPlusTree::<i32, ()>::new(4, 5),
        Err(Error::Config(ConfigError::LeafCapacityExceedsFanout {
            leaf_capacity: 5,
            fanout: 4
        }))
    ));
    assert!(matches!(
        BPlusTree::<i32, ()>::new(0, 0),
        Err(Error::Config(_))
    ));
    assert!(BPlusTree::<i32, ()>::new(4, 1).is_ok());
}

// ============================================================================
// Errors leave the tree untouched
// ============================================================================

#[test]
fn test_search_errors_have_no_side_effects() {
    let tree = build(&REFERENCE_KEYS);
    let before = keys_of(&tree.traverse());

    assert_eq!(tree.search(Some(&40), Some(&30)), Err(Error::Range));
    assert_eq!(tree.search(None, None), Err(Error::Param));

    assert_eq!(keys_of(&tree.traverse()), before);
    assert_eq!(tree.len(), REFERENCE_KEYS.len());
}

// ============================================================================
// Structure
// ============================================================================

#[test]
fn test_capacity_after_every_insert() {
    let mut tree = BPlusTree::new(4, 3).unwrap();
    for k in 0..300 {
        tree.insert((k * 7919) % 1000, k as usize);

        for (id, node) in all_nodes(&tree) {
            match node {
                Node::Leaf(leaf) => assert!(leaf.len() <= 3, "{id} overflows"),
                Node::Internal(internal) => {
                    assert!(internal.separators().len() <= 3, "{id} overflows");
                    assert_eq!(
                        internal.children().len(),
                        internal.separators().len() + 1
                    );
                }
            }
        }
    }
}

#[test]
fn test_root_is_only_parentless_node() {
    let tree = build(&(0..200).collect::<Vec<_>>());
    for (id, node) in all_nodes(&tree) {
        if id == tree.root() {
            assert_eq!(node.parent(), None);
        } else {
            let parent = node.parent().expect("non-root has a parent");
            let children = tree
                .node(parent)
                .and_then(Node::as_internal)
                .unwrap()
                .children();
            assert!(children.contains(&id));
        }
    }
}

#[test]
fn test_sibling_chain_visits_every_leaf_once() {
    let tree = build(&(0..150).map(|k| (k * 31) % 150).collect::<Vec<_>>());

    let leaf_count = all_nodes(&tree).iter().filter(|(_, n)| n.is_leaf()).count();
    let mut visited = vec![];
    let mut current = Some(tree.leftmost_leaf());
    while let Some(id) = current {
        assert!(!visited.contains(&id), "{id} visited twice");
        visited.push(id);
        current = tree.node(id).and_then(Node::as_leaf).unwrap().next();
    }
    assert_eq!(visited.len(), leaf_count);

    let rebuilt: Vec<i32> = visited
        .iter()
        .flat_map(|&id| {
            tree.node(id)
                .and_then(Node::as_leaf)
                .unwrap()
                .entries()
                .iter()
                .map(|kv| *kv.key())
        })
        .collect();
    assert_eq!(rebuilt, keys_of(&tree.traverse()));
}

#[test]
fn test_height_grows_by_at_most_one_per_insert() {
    let mut tree = BPlusTree::new(4, 4).unwrap();
    let mut height = tree.height();
    for k in 0..500 {
        tree.insert(k, ());
        let now = tree.height();
        assert!(now == height || now == height + 1);
        height = now;
    }
    assert_eq!(tree.stats().root_splits as usize, height - 1);
}

#[test]
fn test_string_keys() {
    let mut tree = BPlusTree::new(5, 4).unwrap();
    for word in ["pear", "apple", "fig", "kiwi", "banana", "cherry", "date", "grape"] {
        tree.insert(word.to_string(), word.len());
    }

    let found = tree
        .search(Some(&"banana".to_string()), Some(&"fig".to_string()))
        .unwrap();
    let words: Vec<&str> = found.iter().map(|kv| kv.key().as_str()).collect();
    assert_eq!(words, vec!["banana", "cherry", "date", "fig"]);
    assert_eq!(tree.get(&"kiwi".to_string()), Some(&4));
}
