//! Owned session holding one instance of every simulator.
//!
//! A session is created empty with [`Session::new`] or populated from a
//! record source with [`Session::initialize`]. All mutation goes through
//! [`Session::apply`], which also keeps the metrics in step. Dropping the
//! session discards everything.

use blake3::Hasher;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use adtlab_config::AdtlabConfig;
use adtlab_core::record::{next_record_id, Record, RecordId, SortOrder};
use adtlab_core::render::RenderModel;
use adtlab_core::AdtError;
use adtlab_records::{BodyView, RecordQuery, RecordSource};
use adtlab_simulator::{
    HashTableSimulator, ListSimulator, QueueSimulator, Simulator, StackSimulator, TreeSimulator,
};
use adtlab_telemetry::{EventLogger, MetricsRecorder};

use crate::command::{Command, Outcome, Structure};
use crate::error::EngineError;

/// Render models of all five structures at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub tree: RenderModel,
    pub list: RenderModel,
    pub stack: RenderModel,
    pub queue: RenderModel,
    pub hash_table: RenderModel,
}

pub struct Session {
    tree: TreeSimulator,
    list: ListSimulator,
    stack: StackSimulator,
    queue: QueueSimulator,
    hash_table: HashTableSimulator,
    /// Users the list is (re)loaded from.
    users: Vec<Record>,
    /// Posts stack and queue pushes pick from by id.
    posts: Vec<Record>,
    metrics: MetricsRecorder,
}

impl Session {
    /// Empty simulators laid out as configured.
    pub fn new(config: &AdtlabConfig) -> Result<Self, EngineError> {
        let layout = &config.layout;
        let hash_table = HashTableSimulator::new(
            config.hash_table.initial_bucket_count,
            layout.hash_table.clone(),
        )?;
        Ok(Self {
            tree: TreeSimulator::new(layout.tree.clone()),
            list: ListSimulator::new(layout.list.clone()),
            stack: StackSimulator::new(layout.stack.clone()),
            queue: QueueSimulator::new(layout.queue.clone()),
            hash_table,
            users: Vec::new(),
            posts: Vec::new(),
            metrics: MetricsRecorder::new(),
        })
    }

    /// Loads records from `source` and builds the tree and the list.
    ///
    /// Posts are fetched with numeric bodies and shuffled with
    /// `records.shuffle_seed` before they are inserted into the tree. Users are
    /// loaded into the list in ascending id order.
    #[instrument(skip_all, fields(seed = config.records.shuffle_seed))]
    pub async fn initialize(
        config: &AdtlabConfig,
        source: &dyn RecordSource,
    ) -> Result<Self, EngineError> {
        let mut session = Self::new(config)?;

        let mut posts = source
            .load_records(RecordQuery::posts(BodyView::AsciiSum))
            .await?;
        let users = source
            .load_records(RecordQuery::users(SortOrder::Ascending))
            .await?;

        let mut rng = StdRng::seed_from_u64(config.records.shuffle_seed);
        posts.shuffle(&mut rng);
        let inserted = session.tree.load(posts.iter().cloned());
        session.list.load_ordered(users.clone(), SortOrder::Ascending);

        session.users = users;
        session.posts = posts;
        for structure in Structure::ALL {
            session.refresh_size(structure);
        }

        info!(
            tree = inserted,
            list = session.list.len(),
            "session initialized"
        );
        EventLogger::log_event(
            "session_initialized",
            &[
                ("posts", session.posts.len().to_string()),
                ("users", session.users.len().to_string()),
            ],
        );
        Ok(session)
    }

    /// Applies `command` to its structure.
    ///
    /// A rejected command leaves the structure untouched and is counted as
    /// such; the session stays usable.
    #[instrument(level = "debug", skip_all, fields(op = command.name()))]
    pub fn apply(&mut self, command: Command) -> Result<Outcome, AdtError> {
        let op = command.name();
        let structure = command.structure();
        let result = self.dispatch(command);

        match &result {
            Ok(outcome) => debug!(?outcome, "operation applied"),
            Err(err) => warn!(%structure, op, kind = err.kind(), "operation rejected: {}", err),
        }
        self.metrics
            .record_operation(structure.as_str(), op, result.is_ok());
        self.refresh_size(structure);
        result
    }

    fn dispatch(&mut self, command: Command) -> Result<Outcome, AdtError> {
        match command {
            Command::TreeInsert { record } => {
                let id = record.id;
                Ok(if self.tree.insert(record) {
                    Outcome::Inserted { id }
                } else {
                    Outcome::Unchanged { id }
                })
            }
            Command::TreeSearch { id } => {
                let path = self.tree.search_path(id);
                let record = self.tree.search(id)?.clone();
                Ok(Outcome::Found { record, path })
            }
            Command::ListLoad { order } => {
                self.list.load_ordered(self.users.clone(), order);
                Ok(Outcome::Loaded {
                    count: self.list.len(),
                })
            }
            Command::ListInsertHead { user } => {
                let id = next_record_id(self.list.iter().map(|r| r.id));
                self.list.insert_head(Record::user(id, user));
                Ok(Outcome::Inserted { id })
            }
            Command::ListInsertTail { user } => {
                let id = next_record_id(self.list.iter().map(|r| r.id));
                self.list.insert_tail(Record::user(id, user));
                Ok(Outcome::Inserted { id })
            }
            Command::StackPush { post_id } => {
                let record = self.catalogue_post(post_id)?;
                self.stack.push(record)?;
                Ok(Outcome::Pushed { id: post_id })
            }
            Command::StackPushNew { post } => {
                let id = next_record_id(self.stack.iter().map(|r| r.id));
                self.stack.push(post.into_record(id))?;
                Ok(Outcome::Pushed { id })
            }
            Command::StackPop => Ok(Outcome::Popped {
                record: self.stack.pop()?,
            }),
            Command::QueueEnqueue { post_id } => {
                let record = self.catalogue_post(post_id)?;
                self.queue.enqueue(record)?;
                Ok(Outcome::Enqueued { id: post_id })
            }
            Command::QueueEnqueueNew { post } => {
                let id = next_record_id(self.queue.iter().map(|r| r.id));
                self.queue.enqueue(post.into_record(id))?;
                Ok(Outcome::Enqueued { id })
            }
            Command::QueueDequeue => Ok(Outcome::Dequeued {
                record: self.queue.dequeue()?,
            }),
            Command::HashPut { key, value } => {
                let result = self.hash_table.put(key.clone(), value);
                Ok(Outcome::Put { key, result })
            }
            Command::HashGet { key } => Ok(Outcome::Value {
                entry: self.hash_table.get(&key)?.clone(),
            }),
            Command::HashResize { bucket_count } => {
                self.hash_table.resize(bucket_count)?;
                Ok(Outcome::Resized { bucket_count })
            }
            Command::HashStats => Ok(Outcome::Stats {
                stats: self.hash_table.stats(),
            }),
        }
    }

    fn catalogue_post(&self, id: RecordId) -> Result<Record, AdtError> {
        self.posts
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| AdtError::NotFound(format!("post with id {}", id)))
    }

    fn simulator(&self, structure: Structure) -> &dyn Simulator {
        match structure {
            Structure::Tree => &self.tree,
            Structure::List => &self.list,
            Structure::Stack => &self.stack,
            Structure::Queue => &self.queue,
            Structure::HashTable => &self.hash_table,
        }
    }

    fn refresh_size(&self, structure: Structure) {
        self.metrics
            .set_size(structure.as_str(), self.simulator(structure).len());
    }

    pub fn render(&self, structure: Structure) -> RenderModel {
        self.simulator(structure).render_model()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            tree: self.render(Structure::Tree),
            list: self.render(Structure::List),
            stack: self.render(Structure::Stack),
            queue: self.render(Structure::Queue),
            hash_table: self.render(Structure::HashTable),
        }
    }

    /// BLAKE3 of the JSON snapshot, hex encoded. Equal states hash equally.
    pub fn state_hash(&self) -> Result<String, EngineError> {
        let mut hasher = Hasher::new();
        hasher.update(&serde_json::to_vec(&self.snapshot())?);
        Ok(hex::encode(hasher.finalize().as_bytes()))
    }

    pub fn len(&self, structure: Structure) -> usize {
        self.simulator(structure).len()
    }

    /// Posts available to `stack_push` and `queue_enqueue`, in tree insertion order.
    pub fn posts(&self) -> &[Record] {
        &self.posts
    }

    pub fn users(&self) -> &[Record] {
        &self.users
    }

    pub fn tree(&self) -> &TreeSimulator {
        &self.tree
    }

    pub fn hash_table(&self) -> &HashTableSimulator {
        &self.hash_table
    }

    pub fn metrics(&self) -> &MetricsRecorder {
        &self.metrics
    }
}
