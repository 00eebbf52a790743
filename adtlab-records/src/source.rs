//! Async seams between the simulators and whatever holds the records.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use validator::Validate;

use adtlab_core::record::{Record, RecordId, SortOrder};

use crate::error::RecordError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Users,
    Posts,
}

/// How post bodies are handed out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyView {
    #[default]
    Text,
    /// Body replaced by the sum of its character codes.
    AsciiSum,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordQuery {
    pub kind: RecordKind,
    /// Sort by id; `None` keeps storage order.
    #[serde(default)]
    pub order: Option<SortOrder>,
    #[serde(default)]
    pub body_view: BodyView,
}

impl RecordQuery {
    pub fn users(order: SortOrder) -> Self {
        Self {
            kind: RecordKind::Users,
            order: Some(order),
            body_view: BodyView::Text,
        }
    }

    pub fn posts(body_view: BodyView) -> Self {
        Self {
            kind: RecordKind::Posts,
            order: None,
            body_view,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct NewUser {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(email(message = "email is not a valid address"))]
    pub email: String,
    #[validate(length(min = 1, message = "address is required"))]
    pub address: String,
    #[validate(length(min = 1, message = "phone is required"))]
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct NewPost {
    pub user_id: RecordId,
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "body is required"))]
    pub body: String,
}

/// A record without an id yet; the sink assigns one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NewRecord {
    User(NewUser),
    Post(NewPost),
}

#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetches every record of `query.kind`, ordered and converted as asked.
    async fn load_records(&self, query: RecordQuery) -> Result<Vec<Record>, RecordError>;
}

#[async_trait]
pub trait RecordSink: Send + Sync {
    /// Validates and stores a new record, returning it with its assigned id.
    async fn create_record(&self, record: NewRecord) -> Result<Record, RecordError>;

    /// Removes the `count` most recent posts. Returns how many were removed.
    async fn delete_batch(&self, count: usize) -> Result<usize, RecordError>;
}
