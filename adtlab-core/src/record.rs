//! ## adtlab-core::record
//! **Records borrowed from the CRUD dataset**
//!
//! A record is an id plus an opaque payload. Simulators only ever look at the
//! id (ordering, identity) and the label (display); the rest travels along
//! untouched.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Caller-assigned unique identifier.
pub type RecordId = u64;

/// A record held by a simulator. Cloned by value between structures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    #[serde(flatten)]
    pub payload: Payload,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Payload {
    User(UserProfile),
    Post(BlogPost),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    pub email: String,
    pub address: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    pub title: String,
    pub body: PostBody,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<RecordId>,
}

/// Post body as text, or as the precomputed sum of its character codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PostBody {
    AsciiSum(u64),
    Text(String),
}

impl Record {
    pub fn user(id: RecordId, profile: UserProfile) -> Self {
        Self {
            id,
            payload: Payload::User(profile),
        }
    }

    pub fn post(id: RecordId, post: BlogPost) -> Self {
        Self {
            id,
            payload: Payload::Post(post),
        }
    }

    /// Display label: the username of a user, the title of a post.
    pub fn label(&self) -> &str {
        match &self.payload {
            Payload::User(user) => &user.username,
            Payload::Post(post) => &post.title,
        }
    }

    pub fn is_user(&self) -> bool {
        matches!(self.payload, Payload::User(_))
    }

    pub fn is_post(&self) -> bool {
        matches!(self.payload, Payload::Post(_))
    }

    /// Returns a copy whose post body is replaced by its character-code sum.
    /// Users and already numeric bodies are returned unchanged.
    pub fn with_numeric_body(mut self) -> Self {
        if let Payload::Post(post) = &mut self.payload {
            if let PostBody::Text(text) = &post.body {
                post.body = PostBody::AsciiSum(ascii_sum(text));
            }
        }
        self
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.id, self.label())
    }
}

impl fmt::Display for PostBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostBody::AsciiSum(sum) => write!(f, "ASCII Sum: {}", sum),
            PostBody::Text(text) => f.write_str(text),
        }
    }
}

/// Id ordering requested by a caller before a batch load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// Sorts records by id in this order.
    pub fn sort(self, records: &mut [Record]) {
        match self {
            SortOrder::Ascending => records.sort_by_key(|r| r.id),
            SortOrder::Descending => records.sort_by(|a, b| b.id.cmp(&a.id)),
        }
    }
}

/// Sum of the character codes of `text`.
pub fn ascii_sum(text: &str) -> u64 {
    text.chars().map(|c| c as u64).sum()
}

/// Id for a record created inside a structure: one past the largest id
/// already present, or 1 when there is none.
pub fn next_record_id<I>(ids: I) -> RecordId
where
    I: IntoIterator<Item = RecordId>,
{
    ids.into_iter().max().map_or(1, |max| max + 1)
}
