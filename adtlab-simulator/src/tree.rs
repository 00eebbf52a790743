//! ## adtlab-simulator::tree
//! **Unbalanced binary search tree keyed by record id**
//!
//! Inserts never rebalance: feeding sorted ids produces a chain, which is
//! exactly what the simulator is meant to show.
//!
//! Layout halves the horizontal gap at every depth, so siblings at the same
//! depth cannot overlap while `depth <= log2(width / node_spacing)`. Deeper
//! trees may collide on screen. Edges are emitted from the tree's own
//! parent/child links during the layout walk.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::debug;

use adtlab_config::TreeLayoutConfig;
use adtlab_core::error::AdtError;
use adtlab_core::record::{Record, RecordId};
use adtlab_core::render::{Edge, EdgeSide, RenderModel, RenderNode};

use crate::Simulator;

#[derive(Debug, PartialEq)]
struct TreeNode {
    record: Record,
    left: Option<Box<TreeNode>>,
    right: Option<Box<TreeNode>>,
}

impl TreeNode {
    fn leaf(record: Record) -> Self {
        Self {
            record,
            left: None,
            right: None,
        }
    }
}

/// Positioned nodes plus parent→child edges.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TreeLayout {
    pub nodes: Vec<RenderNode>,
    pub edges: Vec<Edge>,
}

#[derive(Debug)]
pub struct TreeSimulator {
    root: Option<Box<TreeNode>>,
    len: usize,
    layout: TreeLayoutConfig,
}

impl TreeSimulator {
    pub fn new(layout: TreeLayoutConfig) -> Self {
        Self {
            root: None,
            len: 0,
            layout,
        }
    }

    /// Inserts `record` at the first empty slot along its search path.
    ///
    /// Returns `false`, leaving the tree untouched, when the id is already
    /// present.
    pub fn insert(&mut self, record: Record) -> bool {
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            slot = match record.id.cmp(&node.record.id) {
                Ordering::Less => &mut node.left,
                Ordering::Greater => &mut node.right,
                Ordering::Equal => {
                    debug!(id = record.id, "tree insert ignored, id already present");
                    return false;
                }
            };
        }
        debug!(id = record.id, "tree insert");
        *slot = Some(Box::new(TreeNode::leaf(record)));
        self.len += 1;
        true
    }

    /// Inserts every record in iteration order. Returns how many were new.
    pub fn load<I>(&mut self, records: I) -> usize
    where
        I: IntoIterator<Item = Record>,
    {
        records
            .into_iter()
            .map(|record| self.insert(record))
            .filter(|inserted| *inserted)
            .count()
    }

    pub fn search(&self, id: RecordId) -> Result<&Record, AdtError> {
        let mut cursor = self.root.as_deref();
        while let Some(node) = cursor {
            cursor = match id.cmp(&node.record.id) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Ok(&node.record),
            };
        }
        Err(AdtError::NotFound(format!("record with id {}", id)))
    }

    /// Ids visited while searching for `id`, root first. Ends with `id` when
    /// it is present, otherwise with the last node compared.
    pub fn search_path(&self, id: RecordId) -> Vec<RecordId> {
        let mut path = Vec::new();
        let mut cursor = self.root.as_deref();
        while let Some(node) = cursor {
            path.push(node.record.id);
            cursor = match id.cmp(&node.record.id) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => None,
            };
        }
        path
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.search(id).is_ok()
    }

    /// Ids in ascending order.
    pub fn in_order(&self) -> Vec<RecordId> {
        let mut ids = Vec::with_capacity(self.len);
        let mut stack: Vec<&TreeNode> = Vec::new();
        let mut cursor = self.root.as_deref();
        while cursor.is_some() || !stack.is_empty() {
            while let Some(node) = cursor {
                stack.push(node);
                cursor = node.left.as_deref();
            }
            if let Some(node) = stack.pop() {
                ids.push(node.record.id);
                cursor = node.right.as_deref();
            }
        }
        ids
    }

    /// Number of levels; 0 for an empty tree.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(&TreeNode, usize)> =
            self.root.as_deref().map(|n| (n, 1)).into_iter().collect();
        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            if let Some(left) = node.left.as_deref() {
                stack.push((left, depth + 1));
            }
            if let Some(right) = node.right.as_deref() {
                stack.push((right, depth + 1));
            }
        }
        height
    }

    /// Frees every node without recursing, so a degenerate chain of any
    /// length can be dropped.
    fn dismantle(&mut self) {
        let mut pending: Vec<Box<TreeNode>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
        self.len = 0;
    }

    /// Pre-order layout on a canvas `width` wide.
    ///
    /// The root sits at `(width / 2, origin_y)`. A node at depth `level` puts
    /// its children `width / 2^(level + 2)` to either side, one row lower.
    pub fn compute_layout(&self, width: f64) -> TreeLayout {
        let mut layout = TreeLayout {
            nodes: Vec::with_capacity(self.len),
            edges: Vec::with_capacity(self.len.saturating_sub(1)),
        };
        let Some(root) = self.root.as_deref() else {
            return layout;
        };

        // Right pushed before left so nodes come out in pre-order.
        let mut stack = vec![(root, width / 2.0, self.layout.origin_y, 0u32)];
        while let Some((node, x, y, level)) = stack.pop() {
            layout.nodes.push(RenderNode {
                id: node.record.id,
                label: node.record.label().to_string(),
                x,
                y,
                level: Some(level),
                markers: Vec::new(),
            });

            let gap = width / 2f64.powi(level as i32 + 2);
            let child_y = y + self.layout.row_height;
            if let Some(right) = node.right.as_deref() {
                layout
                    .edges
                    .push(Edge::child(node.record.id, right.record.id, EdgeSide::Right));
                stack.push((right, x + gap, child_y, level + 1));
            }
            if let Some(left) = node.left.as_deref() {
                layout
                    .edges
                    .push(Edge::child(node.record.id, left.record.id, EdgeSide::Left));
                stack.push((left, x - gap, child_y, level + 1));
            }
        }
        layout
    }
}

impl Simulator for TreeSimulator {
    fn name(&self) -> &'static str {
        "tree"
    }

    fn len(&self) -> usize {
        self.len
    }

    fn reset(&mut self) {
        self.dismantle();
    }

    fn render_model(&self) -> RenderModel {
        let TreeLayout { nodes, edges } = self.compute_layout(self.layout.width);
        RenderModel::Nodes { nodes, edges }
    }
}

impl Drop for TreeSimulator {
    fn drop(&mut self) {
        self.dismantle();
    }
}

impl Clone for TreeSimulator {
    /// Copies bottom-up in post-order; depth never touches the call stack.
    fn clone(&self) -> Self {
        let mut order = Vec::with_capacity(self.len);
        let mut stack: Vec<&TreeNode> = self.root.as_deref().into_iter().collect();
        while let Some(node) = stack.pop() {
            order.push(node);
            stack.extend(node.left.as_deref());
            stack.extend(node.right.as_deref());
        }

        // `order` is root, right, left; reversed it is left, right, root.
        let mut built: Vec<Box<TreeNode>> = Vec::with_capacity(self.len);
        for node in order.into_iter().rev() {
            let right = node.right.as_ref().and_then(|_| built.pop());
            let left = node.left.as_ref().and_then(|_| built.pop());
            built.push(Box::new(TreeNode {
                record: node.record.clone(),
                left,
                right,
            }));
        }

        Self {
            root: built.pop(),
            len: self.len,
            layout: self.layout.clone(),
        }
    }
}

impl Default for TreeSimulator {
    fn default() -> Self {
        Self::new(TreeLayoutConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::post;
    use proptest::prelude::*;

    fn tree_of(ids: &[RecordId]) -> TreeSimulator {
        let mut tree = TreeSimulator::default();
        for id in ids {
            tree.insert(post(*id));
        }
        tree
    }

    /// Every node lies strictly inside the (low, high) window its ancestors allow.
    fn holds_bst_invariant(
        node: Option<&TreeNode>,
        low: Option<RecordId>,
        high: Option<RecordId>,
    ) -> bool {
        match node {
            None => true,
            Some(node) => {
                let id = node.record.id;
                low.map_or(true, |l| id > l)
                    && high.map_or(true, |h| id < h)
                    && holds_bst_invariant(node.left.as_deref(), low, Some(id))
                    && holds_bst_invariant(node.right.as_deref(), Some(id), high)
            }
        }
    }

    #[test]
    fn insert_root_then_children() {
        let tree = tree_of(&[10, 5, 15]);
        let root = tree.root.as_deref().unwrap();
        assert_eq!(root.record.id, 10);
        assert_eq!(root.left.as_ref().unwrap().record.id, 5);
        assert_eq!(root.right.as_ref().unwrap().record.id, 15);
    }

    #[test]
    fn insert_multiple_levels() {
        let tree = tree_of(&[10, 5, 15, 2, 7, 12, 20]);
        let root = tree.root.as_deref().unwrap();
        let left = root.left.as_deref().unwrap();
        let right = root.right.as_deref().unwrap();
        assert_eq!(left.left.as_ref().unwrap().record.id, 2);
        assert_eq!(left.right.as_ref().unwrap().record.id, 7);
        assert_eq!(right.left.as_ref().unwrap().record.id, 12);
        assert_eq!(right.right.as_ref().unwrap().record.id, 20);
        assert_eq!(tree.height(), 3);
    }

    #[test]
    fn duplicate_insert_is_a_no_op() {
        let mut tree = tree_of(&[10, 5]);
        let before = tree.clone();
        assert!(!tree.insert(post(10)));
        assert_eq!(tree.root, before.root);
        assert_eq!(tree.len(), 2);
        assert!(tree.root.as_ref().unwrap().right.is_none());
    }

    #[test]
    fn search_finds_present_ids_only() {
        let tree = tree_of(&[50, 30, 70, 20, 40]);
        assert_eq!(tree.search(40).unwrap().id, 40);
        assert_eq!(
            tree.search(99),
            Err(AdtError::NotFound("record with id 99".into()))
        );
    }

    #[test]
    fn search_path_follows_descent() {
        let tree = tree_of(&[50, 30, 70, 20, 40]);
        assert_eq!(tree.search_path(40), vec![50, 30, 40]);
        assert_eq!(tree.search_path(45), vec![50, 30, 40]);
        assert!(TreeSimulator::default().search_path(1).is_empty());
    }

    #[test]
    fn sorted_input_degenerates_to_a_chain() {
        let tree = tree_of(&[1, 2, 3, 4, 5, 6]);
        assert_eq!(tree.height(), 6);
        assert_eq!(tree.in_order(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn layout_halves_the_gap_per_level() {
        let tree = tree_of(&[50, 30, 70, 20, 40]);
        let layout = tree.compute_layout(800.0);

        let ids: Vec<_> = layout.nodes.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![50, 30, 20, 40, 70], "pre-order");

        let at = |id| layout.nodes.iter().find(|n| n.id == id).unwrap();
        assert_eq!((at(50).x, at(50).y, at(50).level), (400.0, 50.0, Some(0)));
        assert_eq!((at(30).x, at(30).y), (200.0, 130.0));
        assert_eq!((at(70).x, at(70).y), (600.0, 130.0));
        assert_eq!((at(20).x, at(20).y, at(20).level), (100.0, 210.0, Some(2)));
        assert_eq!(at(40).x, 300.0);
    }

    #[test]
    fn edges_follow_structure() {
        let tree = tree_of(&[50, 30, 70, 20, 40]);
        let layout = tree.compute_layout(800.0);
        assert_eq!(layout.edges.len(), 4);
        assert!(layout.edges.contains(&Edge::child(50, 30, EdgeSide::Left)));
        assert!(layout.edges.contains(&Edge::child(50, 70, EdgeSide::Right)));
        assert!(layout.edges.contains(&Edge::child(30, 20, EdgeSide::Left)));
        assert!(layout.edges.contains(&Edge::child(30, 40, EdgeSide::Right)));
    }

    #[test]
    fn deep_chain_still_links_every_child() {
        // Coordinates converge at depth, but edges come from the links.
        let ids: Vec<RecordId> = (1..=40).collect();
        let tree = tree_of(&ids);
        let layout = tree.compute_layout(800.0);
        assert_eq!(layout.edges.len(), 39);
        for pair in ids.windows(2) {
            let edge = Edge::child(pair[0], pair[1], EdgeSide::Right);
            assert!(layout.edges.contains(&edge));
        }
    }

    /// Ascending chain `1..=len` built directly, skipping the O(n^2) inserts.
    fn ascending_chain(len: RecordId) -> TreeSimulator {
        let mut tree = TreeSimulator::default();
        for id in (1..=len).rev() {
            tree.root = Some(Box::new(TreeNode {
                record: post(id),
                left: None,
                right: tree.root.take(),
            }));
        }
        tree.len = len as usize;
        tree
    }

    #[test]
    fn long_chain_drops_and_resets() {
        let tree = ascending_chain(100_000);
        assert_eq!(tree.height(), 100_000);
        drop(tree);

        let mut tree = ascending_chain(100_000);
        tree.reset();
        assert!(tree.is_empty());
        assert!(tree.root.is_none());
    }

    #[test]
    fn long_chain_clones() {
        let tree = ascending_chain(100_000);
        let copy = tree.clone();
        assert_eq!(copy.len(), 100_000);
        assert_eq!(copy.height(), 100_000);
        assert_eq!(copy.search_path(3), vec![1, 2, 3]);
    }

    #[test]
    fn clone_keeps_shape() {
        let tree = tree_of(&[50, 30, 70, 20, 40, 60]);
        let copy = tree.clone();
        assert_eq!(copy.root, tree.root);
        assert_eq!(copy.compute_layout(800.0), tree.compute_layout(800.0));
    }

    #[test]
    fn empty_tree_renders_nothing() {
        let tree = TreeSimulator::default();
        assert_eq!(
            tree.render_model(),
            RenderModel::Nodes {
                nodes: vec![],
                edges: vec![]
            }
        );
        assert_eq!(tree.height(), 0);
    }

    #[test]
    fn reset_clears_state() {
        let mut tree = tree_of(&[3, 1, 2]);
        tree.reset();
        assert!(tree.is_empty());
        assert!(tree.search(3).is_err());
    }

    proptest! {
        #[test]
        fn bst_invariant_after_every_insert(ids in prop::collection::vec(0u64..500, 0..120)) {
            let mut tree = TreeSimulator::default();
            for id in ids {
                tree.insert(post(id));
                prop_assert!(holds_bst_invariant(tree.root.as_deref(), None, None));
            }
        }

        #[test]
        fn reinserting_present_ids_changes_nothing(ids in prop::collection::vec(0u64..200, 1..80)) {
            let mut tree = TreeSimulator::default();
            tree.load(ids.iter().copied().map(post));
            let before = tree.clone();
            let len = tree.len();
            for id in &ids {
                prop_assert!(!tree.insert(post(*id)));
            }
            prop_assert_eq!(&tree.root, &before.root);
            prop_assert_eq!(tree.len(), len);
        }

        #[test]
        fn in_order_is_sorted_and_unique(ids in prop::collection::vec(0u64..300, 0..100)) {
            let mut tree = TreeSimulator::default();
            tree.load(ids.iter().copied().map(post));
            let mut expected = ids.clone();
            expected.sort_unstable();
            expected.dedup();
            prop_assert_eq!(tree.in_order(), expected);
        }
    }
}
