//! Operations a session accepts, and what they report back.
//!
//! Both sides are serde-tagged so scenario files can list commands directly:
//!
//! ```yaml
//! - op: hash_put
//!   key: ab
//!   value: "1"
//! - op: stack_pop
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use adtlab_core::record::{BlogPost, PostBody, Record, RecordId, SortOrder, UserProfile};
use adtlab_simulator::{Entry, HashStats, PutOutcome};

/// The five structures a session holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Structure {
    Tree,
    List,
    Stack,
    Queue,
    HashTable,
}

impl Structure {
    pub const ALL: [Structure; 5] = [
        Structure::Tree,
        Structure::List,
        Structure::Stack,
        Structure::Queue,
        Structure::HashTable,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Structure::Tree => "tree",
            Structure::List => "list",
            Structure::Stack => "stack",
            Structure::Queue => "queue",
            Structure::HashTable => "hash_table",
        }
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A post typed in by the user rather than picked from the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDraft {
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub user_id: Option<RecordId>,
}

impl PostDraft {
    /// Builds the record with `id`, storing the body as its character-code sum.
    pub fn into_record(self, id: RecordId) -> Record {
        Record::post(
            id,
            BlogPost {
                title: self.title,
                body: PostBody::Text(self.body),
                user_id: self.user_id,
            },
        )
        .with_numeric_body()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    TreeInsert {
        record: Record,
    },
    TreeSearch {
        id: RecordId,
    },
    /// Reloads the list from the session's users.
    ListLoad {
        #[serde(default)]
        order: SortOrder,
    },
    ListInsertHead {
        user: UserProfile,
    },
    ListInsertTail {
        user: UserProfile,
    },
    /// Pushes a copy of catalogue post `post_id`.
    StackPush {
        post_id: RecordId,
    },
    StackPushNew {
        post: PostDraft,
    },
    StackPop,
    QueueEnqueue {
        post_id: RecordId,
    },
    QueueEnqueueNew {
        post: PostDraft,
    },
    QueueDequeue,
    HashPut {
        key: String,
        value: String,
    },
    HashGet {
        key: String,
    },
    HashResize {
        bucket_count: usize,
    },
    HashStats,
}

impl Command {
    /// The serde tag, reused as a log field and metrics label.
    pub fn name(&self) -> &'static str {
        match self {
            Command::TreeInsert { .. } => "tree_insert",
            Command::TreeSearch { .. } => "tree_search",
            Command::ListLoad { .. } => "list_load",
            Command::ListInsertHead { .. } => "list_insert_head",
            Command::ListInsertTail { .. } => "list_insert_tail",
            Command::StackPush { .. } => "stack_push",
            Command::StackPushNew { .. } => "stack_push_new",
            Command::StackPop => "stack_pop",
            Command::QueueEnqueue { .. } => "queue_enqueue",
            Command::QueueEnqueueNew { .. } => "queue_enqueue_new",
            Command::QueueDequeue => "queue_dequeue",
            Command::HashPut { .. } => "hash_put",
            Command::HashGet { .. } => "hash_get",
            Command::HashResize { .. } => "hash_resize",
            Command::HashStats => "hash_stats",
        }
    }

    pub fn structure(&self) -> Structure {
        match self {
            Command::TreeInsert { .. } | Command::TreeSearch { .. } => Structure::Tree,
            Command::ListLoad { .. }
            | Command::ListInsertHead { .. }
            | Command::ListInsertTail { .. } => Structure::List,
            Command::StackPush { .. } | Command::StackPushNew { .. } | Command::StackPop => {
                Structure::Stack
            }
            Command::QueueEnqueue { .. }
            | Command::QueueEnqueueNew { .. }
            | Command::QueueDequeue => Structure::Queue,
            Command::HashPut { .. }
            | Command::HashGet { .. }
            | Command::HashResize { .. }
            | Command::HashStats => Structure::HashTable,
        }
    }
}

/// Result of an applied command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Inserted { id: RecordId },
    /// The id was already present; nothing changed.
    Unchanged { id: RecordId },
    Found { record: Record, path: Vec<RecordId> },
    Loaded { count: usize },
    Pushed { id: RecordId },
    Popped { record: Record },
    Enqueued { id: RecordId },
    Dequeued { record: Record },
    Put { key: String, result: PutOutcome },
    Value { entry: Entry },
    Resized { bucket_count: usize },
    Stats { stats: HashStats },
}
