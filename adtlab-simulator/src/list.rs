//! ## adtlab-simulator::list
//! **Singly linked list over an index arena**
//!
//! Nodes live in a [`NodeArena`] and point at their successor by handle.
//! Head and tail are handles too, so both insertions are O(1); the render
//! projection walks the chain and numbers nodes as it goes.

use tracing::debug;

use adtlab_config::RowLayoutConfig;
use adtlab_core::arena::{Handle, NodeArena};
use adtlab_core::error::AdtError;
use adtlab_core::record::{Record, RecordId, SortOrder};
use adtlab_core::render::{Edge, Marker, RenderModel, RenderNode};

use crate::Simulator;

#[derive(Debug, Clone)]
struct ListNode {
    record: Record,
    next: Option<Handle>,
}

#[derive(Debug, Clone)]
pub struct ListSimulator {
    arena: NodeArena<ListNode>,
    head: Option<Handle>,
    tail: Option<Handle>,
    len: usize,
    layout: RowLayoutConfig,
}

impl ListSimulator {
    pub fn new(layout: RowLayoutConfig) -> Self {
        Self {
            arena: NodeArena::new(),
            head: None,
            tail: None,
            len: 0,
            layout,
        }
    }

    /// Replaces the list with `records` sorted by id in `order`.
    pub fn load_ordered(&mut self, mut records: Vec<Record>, order: SortOrder) {
        order.sort(&mut records);
        self.reset();
        for record in records {
            self.insert_tail(record);
        }
        debug!(len = self.len, ?order, "list loaded");
    }

    pub fn insert_head(&mut self, record: Record) {
        debug!(id = record.id, "list insert at head");
        let handle = self.arena.allocate(ListNode {
            record,
            next: self.head,
        });
        self.head = Some(handle);
        if self.tail.is_none() {
            self.tail = Some(handle);
        }
        self.len += 1;
    }

    pub fn insert_tail(&mut self, record: Record) {
        debug!(id = record.id, "list insert at tail");
        let handle = self.arena.allocate(ListNode { record, next: None });
        match self.tail.and_then(|tail| self.arena.get_mut(tail)) {
            Some(tail) => tail.next = Some(handle),
            None => self.head = Some(handle),
        }
        self.tail = Some(handle);
        self.len += 1;
    }

    pub fn head(&self) -> Option<&Record> {
        self.head
            .and_then(|h| self.arena.get(h))
            .map(|node| &node.record)
    }

    pub fn tail(&self) -> Option<&Record> {
        self.tail
            .and_then(|h| self.arena.get(h))
            .map(|node| &node.record)
    }

    /// Records from head to tail.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            arena: &self.arena,
            cursor: self.head,
        }
    }

    pub fn ids(&self) -> Vec<RecordId> {
        self.iter().map(|r| r.id).collect()
    }

    /// First record with `id`, walking from the head.
    pub fn find(&self, id: RecordId) -> Result<&Record, AdtError> {
        self.iter()
            .find(|r| r.id == id)
            .ok_or_else(|| AdtError::NotFound(format!("record with id {}", id)))
    }
}

/// Iterator following `next` links from the head.
pub struct Iter<'a> {
    arena: &'a NodeArena<ListNode>,
    cursor: Option<Handle>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Record;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.arena.get(self.cursor?)?;
        self.cursor = node.next;
        Some(&node.record)
    }
}

impl Simulator for ListSimulator {
    fn name(&self) -> &'static str {
        "list"
    }

    fn len(&self) -> usize {
        self.len
    }

    fn reset(&mut self) {
        self.arena.reset();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    fn render_model(&self) -> RenderModel {
        let last = self.len.saturating_sub(1);
        let nodes: Vec<RenderNode> = self
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let mut markers = Vec::new();
                if index == 0 {
                    markers.push(Marker::Head);
                }
                if index == last {
                    markers.push(Marker::Tail);
                }
                RenderNode {
                    id: record.id,
                    label: record.label().to_string(),
                    x: self.layout.origin_x + index as f64 * self.layout.spacing,
                    y: self.layout.y,
                    level: None,
                    markers,
                }
            })
            .collect();
        let edges = nodes
            .windows(2)
            .map(|pair| Edge::link(pair[0].id, pair[1].id))
            .collect();
        RenderModel::Nodes { nodes, edges }
    }
}

impl Default for ListSimulator {
    fn default() -> Self {
        Self::new(RowLayoutConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::post;

    #[test]
    fn head_and_tail_insertion() {
        let mut list = ListSimulator::default();
        list.insert_tail(post(2));
        list.insert_head(post(1));
        list.insert_tail(post(3));
        assert_eq!(list.ids(), vec![1, 2, 3]);
        assert_eq!(list.head().map(|r| r.id), Some(1));
        assert_eq!(list.tail().map(|r| r.id), Some(3));
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn first_head_insert_is_also_tail() {
        let mut list = ListSimulator::default();
        list.insert_head(post(7));
        assert_eq!(list.tail().map(|r| r.id), Some(7));
        list.insert_tail(post(8));
        assert_eq!(list.ids(), vec![7, 8]);
    }

    #[test]
    fn load_ordered_replaces_state() {
        let mut list = ListSimulator::default();
        list.insert_head(post(99));
        list.load_ordered(vec![post(3), post(1), post(2)], SortOrder::Descending);
        assert_eq!(list.ids(), vec![3, 2, 1]);
        list.load_ordered(vec![post(3), post(1), post(2)], SortOrder::Ascending);
        assert_eq!(list.ids(), vec![1, 2, 3]);
        assert!(list.find(99).is_err());
    }

    #[test]
    fn render_relabels_after_head_insert() {
        let mut list = ListSimulator::default();
        list.load_ordered(vec![post(1), post(2)], SortOrder::Ascending);
        list.insert_head(post(3));

        let model = list.render_model();
        let xs: Vec<f64> = model.nodes().iter().map(|n| n.x).collect();
        assert_eq!(xs, vec![100.0, 250.0, 400.0]);
        assert!(model.nodes()[0].has_marker(Marker::Head));
        assert_eq!(model.nodes()[0].id, 3);
        assert!(model.nodes()[2].has_marker(Marker::Tail));
        assert!(model.nodes()[1].markers.is_empty());
        assert_eq!(model.edges(), &[Edge::link(3, 1), Edge::link(1, 2)]);
    }

    #[test]
    fn single_node_is_head_and_tail() {
        let mut list = ListSimulator::default();
        list.insert_tail(post(5));
        let model = list.render_model();
        assert_eq!(model.nodes()[0].markers, vec![Marker::Head, Marker::Tail]);
        assert!(model.edges().is_empty());
    }

    #[test]
    fn find_reports_missing_ids() {
        let mut list = ListSimulator::default();
        list.insert_tail(post(1));
        assert_eq!(list.find(1).map(|r| r.id), Ok(1));
        assert!(matches!(list.find(2), Err(AdtError::NotFound(_))));
    }
}
