//! ## adtlab-core::render
//! **Render model handed to drawing layers**
//!
//! Everything here is derived from simulator state and recomputed on every
//! projection. The engine emits coordinates only; styling belongs to the
//! consumer.

use serde::{Deserialize, Serialize};

use crate::record::RecordId;

/// Role tags a drawing layer may want to label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Marker {
    Head,
    Tail,
    Top,
    Front,
    Rear,
}

/// A positioned record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderNode {
    pub id: RecordId,
    pub label: String,
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub markers: Vec<Marker>,
}

impl RenderNode {
    pub fn has_marker(&self, marker: Marker) -> bool {
        self.markers.contains(&marker)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeSide {
    Left,
    Right,
}

/// A structural link between two rendered records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub from: RecordId,
    pub to: RecordId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side: Option<EdgeSide>,
}

impl Edge {
    pub fn link(from: RecordId, to: RecordId) -> Self {
        Self {
            from,
            to,
            side: None,
        }
    }

    pub fn child(from: RecordId, to: RecordId, side: EdgeSide) -> Self {
        Self {
            from,
            to,
            side: Some(side),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedEntry {
    pub key: String,
    pub value: String,
    pub x: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketView {
    pub index: usize,
    pub y: f64,
    pub entries: Vec<PlacedEntry>,
}

/// Either a node/edge graph or a bucket table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum RenderModel {
    Nodes {
        nodes: Vec<RenderNode>,
        edges: Vec<Edge>,
    },
    Buckets {
        buckets: Vec<BucketView>,
    },
}

impl RenderModel {
    pub fn nodes(&self) -> &[RenderNode] {
        match self {
            RenderModel::Nodes { nodes, .. } => nodes,
            RenderModel::Buckets { .. } => &[],
        }
    }

    pub fn edges(&self) -> &[Edge] {
        match self {
            RenderModel::Nodes { edges, .. } => edges,
            RenderModel::Buckets { .. } => &[],
        }
    }

    pub fn buckets(&self) -> &[BucketView] {
        match self {
            RenderModel::Buckets { buckets } => buckets,
            RenderModel::Nodes { .. } => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_shape_tag() {
        let model = RenderModel::Nodes {
            nodes: vec![RenderNode {
                id: 1,
                label: "a".into(),
                x: 10.0,
                y: 20.0,
                level: None,
                markers: vec![Marker::Top],
            }],
            edges: vec![],
        };
        let json = serde_json::to_value(&model).unwrap();
        assert_eq!(json["shape"], "nodes");
        assert_eq!(json["nodes"][0]["markers"][0], "top");
        assert!(json["nodes"][0].get("level").is_none());
    }

    #[test]
    fn accessors_are_shape_aware() {
        let model = RenderModel::Buckets { buckets: vec![] };
        assert!(model.nodes().is_empty());
        assert!(model.edges().is_empty());
    }
}
