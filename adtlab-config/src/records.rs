//! Record source configuration.
//!
//! Where the session gets its users and posts from: a dataset file, or a
//! deterministic sample generated from a seed.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation;

#[derive(Debug, Serialize, Deserialize, Validate, Clone, PartialEq)]
pub struct RecordsConfig {
    /// Dataset file (YAML or JSON). When absent a sample dataset is generated.
    #[validate(custom(function = validation::validate_dataset_path))]
    #[serde(default)]
    pub dataset: Option<PathBuf>,

    /// Users in a generated sample dataset.
    #[validate(range(min = 1, max = 1000))]
    #[serde(default = "default_sample_users")]
    pub sample_users: usize,

    /// Posts in a generated sample dataset.
    #[validate(range(min = 1, max = 1000))]
    #[serde(default = "default_sample_posts")]
    pub sample_posts: usize,

    /// Seed for sample generation and for shuffling posts before they are
    /// inserted into the tree.
    #[serde(default = "default_seed")]
    pub shuffle_seed: u64,
}

fn default_sample_users() -> usize {
    10
}

fn default_sample_posts() -> usize {
    15
}

fn default_seed() -> u64 {
    42
}

impl Default for RecordsConfig {
    fn default() -> Self {
        Self {
            dataset: None,
            sample_users: default_sample_users(),
            sample_posts: default_sample_posts(),
            shuffle_seed: default_seed(),
        }
    }
}
