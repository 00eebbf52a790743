//! ## adtlab-simulator::stack
//! **Bounded LIFO of records**

use tracing::debug;

use adtlab_config::StackLayoutConfig;
use adtlab_core::error::AdtError;
use adtlab_core::record::Record;
use adtlab_core::render::{Marker, RenderModel, RenderNode};

use crate::Simulator;

/// Records a stack holds before `push` is rejected.
pub const STACK_CAPACITY: usize = 8;

#[derive(Debug, Clone)]
pub struct StackSimulator {
    items: Vec<Record>,
    layout: StackLayoutConfig,
}

impl StackSimulator {
    pub fn new(layout: StackLayoutConfig) -> Self {
        Self {
            items: Vec::with_capacity(STACK_CAPACITY),
            layout,
        }
    }

    pub fn push(&mut self, record: Record) -> Result<(), AdtError> {
        if self.items.len() >= STACK_CAPACITY {
            return Err(AdtError::Overflow {
                structure: "stack",
                capacity: STACK_CAPACITY,
            });
        }
        debug!(id = record.id, depth = self.items.len() + 1, "stack push");
        self.items.push(record);
        Ok(())
    }

    pub fn pop(&mut self) -> Result<Record, AdtError> {
        let record = self.items.pop().ok_or(AdtError::Underflow("stack"))?;
        debug!(id = record.id, depth = self.items.len(), "stack pop");
        Ok(record)
    }

    pub fn peek(&self) -> Option<&Record> {
        self.items.last()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= STACK_CAPACITY
    }

    /// Records bottom first.
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.items.iter()
    }
}

impl Simulator for StackSimulator {
    fn name(&self) -> &'static str {
        "stack"
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn reset(&mut self) {
        self.items.clear();
    }

    fn render_model(&self) -> RenderModel {
        let top = self.items.len().saturating_sub(1);
        let x = self.layout.width / 2.0;
        let nodes = self
            .items
            .iter()
            .enumerate()
            .map(|(slot, record)| RenderNode {
                id: record.id,
                label: record.label().to_string(),
                x,
                y: self.layout.height - self.layout.slot_height * (slot + 1) as f64,
                level: None,
                markers: if slot == top {
                    vec![Marker::Top]
                } else {
                    Vec::new()
                },
            })
            .collect();
        RenderModel::Nodes {
            nodes,
            edges: Vec::new(),
        }
    }
}

impl Default for StackSimulator {
    fn default() -> Self {
        Self::new(StackLayoutConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::post;
    use proptest::prelude::*;

    #[test]
    fn last_in_first_out() {
        let mut stack = StackSimulator::default();
        stack.push(post(1)).unwrap();
        stack.push(post(2)).unwrap();
        assert_eq!(stack.peek().map(|r| r.id), Some(2));
        assert_eq!(stack.pop().unwrap().id, 2);
        assert_eq!(stack.pop().unwrap().id, 1);
        assert_eq!(stack.pop(), Err(AdtError::Underflow("stack")));
    }

    #[test]
    fn ninth_push_overflows() {
        let mut stack = StackSimulator::default();
        for id in 1..=8 {
            stack.push(post(id)).unwrap();
        }
        assert!(stack.is_full());
        let err = stack.push(post(9)).unwrap_err();
        assert_eq!(
            err,
            AdtError::Overflow {
                structure: "stack",
                capacity: 8
            }
        );
        assert_eq!(stack.len(), 8);
        assert_eq!(stack.peek().map(|r| r.id), Some(8));
    }

    #[test]
    fn renders_bottom_up_column() {
        let mut stack = StackSimulator::default();
        for id in 1..=3 {
            stack.push(post(id)).unwrap();
        }
        let model = stack.render_model();
        let ys: Vec<f64> = model.nodes().iter().map(|n| n.y).collect();
        assert_eq!(ys, vec![440.0, 380.0, 320.0]);
        assert!(model.nodes().iter().all(|n| n.x == 150.0));
        assert!(model.nodes()[2].has_marker(Marker::Top));
        assert!(!model.nodes()[0].has_marker(Marker::Top));
        assert!(model.edges().is_empty());
    }

    proptest! {
        #[test]
        fn size_never_exceeds_capacity(ops in proptest::collection::vec(any::<bool>(), 0..64)) {
            let mut stack = StackSimulator::default();
            let mut model: Vec<u64> = Vec::new();
            for (step, push) in ops.into_iter().enumerate() {
                let before = stack.len();
                if push {
                    let result = stack.push(post(step as u64));
                    if before == STACK_CAPACITY {
                        prop_assert!(result.is_err());
                        prop_assert_eq!(stack.len(), before);
                    } else {
                        model.push(step as u64);
                    }
                } else {
                    match stack.pop() {
                        Ok(record) => prop_assert_eq!(Some(record.id), model.pop()),
                        Err(_) => prop_assert_eq!(before, 0),
                    }
                }
                prop_assert!(stack.len() <= STACK_CAPACITY);
                prop_assert_eq!(stack.iter().map(|r| r.id).collect::<Vec<_>>(), model.clone());
            }
        }
    }
}
