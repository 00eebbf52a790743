//! In-memory users and posts.
//!
//! A dataset is either read from a YAML/JSON file or generated from a seed.
//! Generation is deterministic: the same seed and sizes always produce the
//! same rows.

use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use adtlab_core::record::{BlogPost, PostBody, Record, RecordId, UserProfile};

use crate::error::RecordError;

const FIRST_NAMES: &[&str] = &[
    "Ada", "Alan", "Barbara", "Dennis", "Edsger", "Frances", "Grace", "Ken", "Linus", "Margaret",
    "Niklaus", "Radia",
];
const LAST_NAMES: &[&str] = &[
    "Lovelace", "Turing", "Liskov", "Ritchie", "Dijkstra", "Allen", "Hopper", "Thompson",
    "Torvalds", "Hamilton", "Wirth", "Perlman",
];
const STREETS: &[&str] = &["Elm St", "Oak Ave", "Pine Rd", "Maple Ln", "Cedar Ct"];
const WORDS: &[&str] = &[
    "tree", "node", "queue", "stack", "bucket", "hash", "pointer", "balance", "order", "search",
    "insert", "link", "chain", "depth", "key", "value",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRow {
    pub id: RecordId,
    #[serde(flatten)]
    pub profile: UserProfile,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRow {
    pub id: RecordId,
    pub user_id: RecordId,
    pub title: String,
    pub body: String,
}

impl From<&UserRow> for Record {
    fn from(row: &UserRow) -> Self {
        Record::user(row.id, row.profile.clone())
    }
}

impl From<&PostRow> for Record {
    fn from(row: &PostRow) -> Self {
        Record::post(
            row.id,
            BlogPost {
                title: row.title.clone(),
                body: PostBody::Text(row.body.clone()),
                user_id: Some(row.user_id),
            },
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub users: Vec<UserRow>,
    #[serde(default)]
    pub posts: Vec<PostRow>,
}

impl Dataset {
    /// Reads a dataset file; the format follows the extension (`yaml`, `yml`, `json`).
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, RecordError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        let dataset: Dataset = match extension.as_deref() {
            Some("yaml") | Some("yml") => {
                serde_yaml::from_str(&tokio::fs::read_to_string(path).await?)?
            }
            Some("json") => serde_json::from_str(&tokio::fs::read_to_string(path).await?)?,
            _ => return Err(RecordError::UnsupportedFormat(path.to_path_buf())),
        };
        debug!(
            path = %path.display(),
            users = dataset.users.len(),
            posts = dataset.posts.len(),
            "dataset loaded"
        );
        Ok(dataset)
    }

    /// Generates `users` users and `posts` posts with ids starting at 1.
    ///
    /// Every post is written by one of the generated users. With no users the
    /// posts are dropped, since they would have no author.
    pub fn sample(seed: u64, users: usize, posts: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let pick = |rng: &mut StdRng, words: &[&'static str]| words[rng.random_range(0..words.len())];

        let users: Vec<UserRow> = (1..=users as RecordId)
            .map(|id| {
                let username = format!(
                    "{} {} {}",
                    pick(&mut rng, FIRST_NAMES),
                    pick(&mut rng, LAST_NAMES),
                    id
                );
                UserRow {
                    id,
                    profile: UserProfile {
                        email: format!("{}@email.com", username.replace(' ', "_")),
                        address: format!("{} {}", rng.random_range(1..999), pick(&mut rng, STREETS)),
                        phone: format!("555{:07}", rng.random_range(0..10_000_000u32)),
                        username,
                    },
                }
            })
            .collect();

        let posts = if users.is_empty() {
            Vec::new()
        } else {
            (1..=posts as RecordId)
                .map(|id| {
                    let title = (0..5)
                        .map(|_| pick(&mut rng, WORDS))
                        .collect::<Vec<_>>()
                        .join(" ");
                    let body = (0..rng.random_range(20..60))
                        .map(|_| pick(&mut rng, WORDS))
                        .collect::<Vec<_>>()
                        .join(" ");
                    PostRow {
                        id,
                        user_id: rng.random_range(1..=users.len() as RecordId),
                        title,
                        body,
                    }
                })
                .collect()
        };

        Self { users, posts }
    }

    pub fn user_records(&self) -> Vec<Record> {
        self.users.iter().map(Record::from).collect()
    }

    pub fn post_records(&self) -> Vec<Record> {
        self.posts.iter().map(Record::from).collect()
    }
}
