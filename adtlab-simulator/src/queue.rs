//! ## adtlab-simulator::queue
//! **Bounded FIFO of records**

use std::collections::VecDeque;

use tracing::debug;

use adtlab_config::RowLayoutConfig;
use adtlab_core::error::AdtError;
use adtlab_core::record::Record;
use adtlab_core::render::{Marker, RenderModel, RenderNode};

use crate::Simulator;

/// Records a queue holds before `enqueue` is rejected.
pub const QUEUE_CAPACITY: usize = 6;

#[derive(Debug, Clone)]
pub struct QueueSimulator {
    items: VecDeque<Record>,
    layout: RowLayoutConfig,
}

impl QueueSimulator {
    pub fn new(layout: RowLayoutConfig) -> Self {
        Self {
            items: VecDeque::with_capacity(QUEUE_CAPACITY),
            layout,
        }
    }

    pub fn enqueue(&mut self, record: Record) -> Result<(), AdtError> {
        if self.items.len() >= QUEUE_CAPACITY {
            return Err(AdtError::Overflow {
                structure: "queue",
                capacity: QUEUE_CAPACITY,
            });
        }
        debug!(id = record.id, len = self.items.len() + 1, "queue enqueue");
        self.items.push_back(record);
        Ok(())
    }

    pub fn dequeue(&mut self) -> Result<Record, AdtError> {
        let record = self
            .items
            .pop_front()
            .ok_or(AdtError::Underflow("queue"))?;
        debug!(id = record.id, len = self.items.len(), "queue dequeue");
        Ok(record)
    }

    pub fn front(&self) -> Option<&Record> {
        self.items.front()
    }

    pub fn rear(&self) -> Option<&Record> {
        self.items.back()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= QUEUE_CAPACITY
    }

    /// Records front first.
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.items.iter()
    }
}

impl Simulator for QueueSimulator {
    fn name(&self) -> &'static str {
        "queue"
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn reset(&mut self) {
        self.items.clear();
    }

    fn render_model(&self) -> RenderModel {
        let rear = self.items.len().saturating_sub(1);
        let nodes = self
            .items
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let mut markers = Vec::new();
                if index == 0 {
                    markers.push(Marker::Front);
                }
                if index == rear {
                    markers.push(Marker::Rear);
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
        RenderModel::Nodes {
            nodes,
            edges: Vec::new(),
        }
    }
}

impl Default for QueueSimulator {
    fn default() -> Self {
        Self::new(RowLayoutConfig::queue())
    }
}
