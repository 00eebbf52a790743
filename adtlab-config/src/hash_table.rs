//! Hash table configuration.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Smallest bucket count a hash table may be created or resized to.
pub const MIN_BUCKETS: usize = 5;
/// Largest bucket count a hash table may be created or resized to.
pub const MAX_BUCKETS: usize = 15;

#[derive(Debug, Serialize, Deserialize, Validate, Clone, PartialEq)]
pub struct HashTableConfig {
    /// Bucket count of a freshly created table.
    #[validate(range(min = 5, max = 15))]
    #[serde(default = "default_bucket_count")]
    pub initial_bucket_count: usize,
}

fn default_bucket_count() -> usize {
    10
}

impl Default for HashTableConfig {
    fn default() -> Self {
        Self {
            initial_bucket_count: default_bucket_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_enforced() {
        let mut config = HashTableConfig::default();
        config.validate().expect("Default config should be valid");

        config.initial_bucket_count = MIN_BUCKETS - 1;
        assert!(config.validate().is_err());

        config.initial_bucket_count = MAX_BUCKETS + 1;
        assert!(config.validate().is_err());

        config.initial_bucket_count = MAX_BUCKETS;
        assert!(config.validate().is_ok());
    }
}
