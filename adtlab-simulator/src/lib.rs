// adtlab-simulator/src/lib.rs

/*!
# adtlab Simulator

Five independent data structure simulators fed with user and blog post
records. Each owns its state, exposes the classic operations of its abstract
data type, and projects that state into a [`RenderModel`] a drawing layer can
consume.

## Key Components:
- **TreeSimulator:** unbalanced binary search tree keyed by record id.
- **ListSimulator:** singly linked list in an index arena, head/tail insertion.
- **StackSimulator:** LIFO bounded at 8 records.
- **QueueSimulator:** FIFO bounded at 6 records.
- **HashTableSimulator:** string keys, separate chaining, 5 to 15 buckets.
*/

use adtlab_core::render::RenderModel;

pub mod hash_table;
pub mod list;
pub mod queue;
pub mod stack;
pub mod tree;

pub use hash_table::{hash_key, CollisionPolicy, Entry, HashStats, HashTableSimulator, PutOutcome};
pub use list::ListSimulator;
pub use queue::{QueueSimulator, QUEUE_CAPACITY};
pub use stack::{StackSimulator, STACK_CAPACITY};
pub use tree::{TreeLayout, TreeSimulator};

/// Behaviour shared by every simulator.
///
/// Mutations are specific to each structure; what they have in common is a
/// size, a way back to the empty state, and a render projection that is
/// recomputed from scratch on every call.
pub trait Simulator {
    /// Name used in logs, metrics and error messages.
    fn name(&self) -> &'static str;

    /// Number of records (or entries) currently held.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops all content, keeping configuration.
    fn reset(&mut self);

    /// Derives the render model from the current state.
    fn render_model(&self) -> RenderModel;
}

#[cfg(test)]
pub(crate) mod test_support {
    use adtlab_core::record::{BlogPost, PostBody, Record, RecordId};

    pub fn post(id: RecordId) -> Record {
        Record::post(
            id,
            BlogPost {
                title: format!("Post {}", id),
                body: PostBody::AsciiSum(id * 10),
                user_id: Some(1),
            },
        )
    }
}
