use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};
use validator::Validate;

use adtlab_config::RecordsConfig;
use adtlab_core::record::{next_record_id, Record, UserProfile};

use crate::dataset::{Dataset, PostRow, UserRow};
use crate::error::RecordError;
use crate::source::{BodyView, NewRecord, RecordKind, RecordQuery, RecordSink, RecordSource};

/// [`RecordSource`] and [`RecordSink`] over a [`Dataset`] held in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    dataset: RwLock<Dataset>,
}

impl MemoryStore {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset: RwLock::new(dataset),
        }
    }

    /// Reads the configured dataset file, or generates a sample when none is set.
    pub async fn from_config(config: &RecordsConfig) -> Result<Self, RecordError> {
        let dataset = match &config.dataset {
            Some(path) => Dataset::from_path(path).await?,
            None => Dataset::sample(config.shuffle_seed, config.sample_users, config.sample_posts),
        };
        info!(
            users = dataset.users.len(),
            posts = dataset.posts.len(),
            "record store ready"
        );
        Ok(Self::new(dataset))
    }

    /// Copy of the current rows.
    pub async fn dataset(&self) -> Dataset {
        self.dataset.read().await.clone()
    }
}

#[async_trait]
impl RecordSource for MemoryStore {
    async fn load_records(&self, query: RecordQuery) -> Result<Vec<Record>, RecordError> {
        let dataset = self.dataset.read().await;
        let mut records = match query.kind {
            RecordKind::Users => dataset.user_records(),
            RecordKind::Posts => dataset.post_records(),
        };
        drop(dataset);

        if let Some(order) = query.order {
            order.sort(&mut records);
        }
        if query.body_view == BodyView::AsciiSum {
            records = records.into_iter().map(Record::with_numeric_body).collect();
        }
        debug!(?query, count = records.len(), "records loaded");
        Ok(records)
    }
}

#[async_trait]
impl RecordSink for MemoryStore {
    async fn create_record(&self, record: NewRecord) -> Result<Record, RecordError> {
        let mut dataset = self.dataset.write().await;
        match record {
            NewRecord::User(user) => {
                user.validate()?;
                if dataset
                    .users
                    .iter()
                    .any(|u| u.profile.username == user.username || u.profile.email == user.email)
                {
                    return Err(RecordError::Conflict(
                        "user with that username or email already exists".into(),
                    ));
                }
                let row = UserRow {
                    id: next_record_id(dataset.users.iter().map(|u| u.id)),
                    profile: UserProfile {
                        username: user.username,
                        email: user.email,
                        address: user.address,
                        phone: user.phone,
                    },
                };
                debug!(id = row.id, "user created");
                let created = Record::from(&row);
                dataset.users.push(row);
                Ok(created)
            }
            NewRecord::Post(post) => {
                post.validate()?;
                if !dataset.users.iter().any(|u| u.id == post.user_id) {
                    return Err(RecordError::NotFound(format!("user {}", post.user_id)));
                }
                let row = PostRow {
                    id: next_record_id(dataset.posts.iter().map(|p| p.id)),
                    user_id: post.user_id,
                    title: post.title,
                    body: post.body,
                };
                debug!(id = row.id, user_id = row.user_id, "post created");
                let created = Record::from(&row);
                dataset.posts.push(row);
                Ok(created)
            }
        }
    }

    async fn delete_batch(&self, count: usize) -> Result<usize, RecordError> {
        let mut dataset = self.dataset.write().await;
        dataset.posts.sort_by_key(|p| p.id);
        let keep = dataset.posts.len().saturating_sub(count);
        let removed = dataset.posts.len() - keep;
        dataset.posts.truncate(keep);
        info!(removed, remaining = keep, "post batch deleted");
        Ok(removed)
    }
}
