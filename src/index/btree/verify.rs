//! Structural consistency check.
//!
//! [`BPlusTree::verify`] walks the whole tree and reports every broken
//! invariant it finds instead of stopping at the first one.

use std::collections::HashSet;
use std::fmt;

use crate::common::NodeId;
use crate::index::btree::node::Node;
use crate::index::btree::BPlusTree;

const MAX_FINDINGS: usize = 32;

/// A single broken invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyFinding {
    /// Node the problem was seen on, if it is tied to one.
    pub node: Option<NodeId>,
    /// Human-readable description of the issue.
    pub message: String,
}

impl fmt::Display for VerifyFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.node {
            Some(node) => write!(f, "{node}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// What the walk saw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerifyCounts {
    pub leaves: usize,
    pub internal_nodes: usize,
    pub entries: usize,
    /// Levels from the root down to the leaves.
    pub height: usize,
}

/// Result of [`BPlusTree::verify`].
#[derive(Debug, Clone, Default)]
pub struct VerifyReport {
    /// Issues found, capped at a fixed number.
    pub findings: Vec<VerifyFinding>,
    pub counts: VerifyCounts,
}

impl VerifyReport {
    /// True when no invariant is broken.
    pub fn is_ok(&self) -> bool {
        self.findings.is_empty()
    }

    fn record(&mut self, node: Option<NodeId>, message: impl Into<String>) {
        if self.findings.len() < MAX_FINDINGS {
            self.findings.push(VerifyFinding {
                node,
                message: message.into(),
            });
        }
    }
}

impl<K: Ord + Clone + fmt::Debug, V> BPlusTree<K, V> {
    /// Check every structural invariant:
    /// - leaf entries sorted, at most `L` per leaf, no empty non-root leaf
    /// - internal nodes hold `separators + 1` children and at most `M - 1`
    ///   separators, in order
    /// - every key lies within the range its ancestors' separators allow
    /// - parent links point at the owning node, the root has none
    /// - all leaves sit at the same depth
    /// - the sibling chain starts at the cached leftmost leaf and visits
    ///   every leaf once, left to right
    /// - the number of entries equals [`len`](Self::len)
    pub fn verify(&self) -> VerifyReport {
        let mut walk = Walk {
            tree: self,
            report: VerifyReport::default(),
            seen: HashSet::new(),
            leaf_order: Vec::new(),
            leaf_depth: None,
        };

        if self.nodes.get(self.root.0).and_then(Node::parent).is_some() {
            walk.report.record(Some(self.root), "root has a parent");
        }
        walk.visit(self.root, None, None, None, 1);
        walk.check_chain();

        let mut report = walk.report;
        if report.counts.entries != self.len {
            report.record(
                None,
                format!(
                    "tree reports {} entries but leaves hold {}",
                    self.len, report.counts.entries
                ),
            );
        }
        report
    }
}

struct Walk<'a, K, V> {
    tree: &'a BPlusTree<K, V>,
    report: VerifyReport,
    seen: HashSet<NodeId>,
    leaf_order: Vec<NodeId>,
    leaf_depth: Option<usize>,
}

impl<'a, K: Ord + Clone + fmt::Debug, V> Walk<'a, K, V> {
    /// Visit `id` expecting keys in `[low, high]` and `parent` as its parent.
    fn visit(
        &mut self,
        id: NodeId,
        parent: Option<NodeId>,
        low: Option<&'a K>,
        high: Option<&'a K>,
        depth: usize,
    ) {
        let tree = self.tree;
        let Some(node) = tree.nodes.get(id.0) else {
            self.report.record(Some(id), "dangling node id");
            return;
        };
        if !self.seen.insert(id) {
            self.report.record(Some(id), "node reachable twice");
            return;
        }
        if node.parent() != parent {
            self.report.record(
                Some(id),
                format!("parent link is {:?}, expected {:?}", node.parent(), parent),
            );
        }

        match node {
            Node::Leaf(leaf) => {
                self.report.counts.leaves += 1;
                self.report.counts.entries += leaf.entries.len();
                self.leaf_order.push(id);

                match self.leaf_depth {
                    None => {
                        self.leaf_depth = Some(depth);
                        self.report.counts.height = depth;
                    }
                    Some(expected) if expected != depth => self.report.record(
                        Some(id),
                        format!("leaf at depth {depth}, others at {expected}"),
                    ),
                    Some(_) => {}
                }

                if leaf.entries.len() > tree.config.leaf_capacity {
                    self.report.record(
                        Some(id),
                        format!(
                            "leaf holds {} entries, capacity is {}",
                            leaf.entries.len(),
                            tree.config.leaf_capacity
                        ),
                    );
                }
                if leaf.entries.is_empty() && parent.is_some() {
                    self.report.record(Some(id), "empty non-root leaf");
                }
                if leaf.entries.windows(2).any(|w| w[0].key() > w[1].key()) {
                    self.report.record(Some(id), "leaf entries out of order");
                }
                for kv in &leaf.entries {
                    self.check_bounds(id, kv.key(), low, high);
                }
            }
            Node::Internal(internal) => {
                self.report.counts.internal_nodes += 1;

                if internal.children.len() != internal.separators.len() + 1 {
                    self.report.record(
                        Some(id),
                        format!(
                            "{} children for {} separators",
                            internal.children.len(),
                            internal.separators.len()
                        ),
                    );
                }
                if internal.separators.len() > tree.config.max_separators() {
                    self.report.record(
                        Some(id),
                        format!(
                            "{} separators, maximum is {}",
                            internal.separators.len(),
                            tree.config.max_separators()
                        ),
                    );
                }
                if internal.separators.windows(2).any(|w| w[0] > w[1]) {
                    self.report.record(Some(id), "separators out of order");
                }
                for separator in &internal.separators {
                    self.check_bounds(id, separator, low, high);
                }

                for (i, &child) in internal.children.iter().enumerate() {
                    let child_low = if i == 0 {
                        low
                    } else {
                        internal.separators.get(i - 1)
                    };
                    let child_high = internal.separators.get(i).or(high);
                    self.visit(child, Some(id), child_low, child_high, depth + 1);
                }
            }
        }
    }

    fn check_bounds(&mut self, id: NodeId, key: &K, low: Option<&K>, high: Option<&K>) {
        let below = low.is_some_and(|low| key < low);
        let above = high.is_some_and(|high| key > high);
        if below || above {
            self.report.record(
                Some(id),
                format!("key {key:?} outside [{low:?}, {high:?}]"),
            );
        }
    }

    /// Follow `next` from the cached leftmost leaf and compare with the
    /// left-to-right order found by the walk.
    fn check_chain(&mut self) {
        if self.leaf_order.first() != Some(&self.tree.leftmost_leaf) {
            self.report.record(
                Some(self.tree.leftmost_leaf),
                "cached leftmost leaf is not the first leaf",
            );
        }

        let mut chain = Vec::new();
        let mut current = Some(self.tree.leftmost_leaf);
        while let Some(id) = current {
            if chain.len() > self.tree.nodes.len() {
                self.report.record(Some(id), "sibling chain loops");
                return;
            }
            chain.push(id);
            current = match self.tree.nodes.get(id.0) {
                Some(Node::Leaf(leaf)) => leaf.next,
                _ => {
                    self.report.record(Some(id), "sibling chain reaches a non-leaf");
                    return;
                }
            };
        }

        if chain != self.leaf_order {
            self.report.record(
                None,
                format!(
                    "sibling chain visits {} leaves, tree has {} in a different order",
                    chain.len(),
                    self.leaf_order.len()
                ),
            );
        }
    }
}
