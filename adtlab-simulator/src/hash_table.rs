//! ## adtlab-simulator::hash_table
//! **String-keyed table with separate chaining**
//!
//! The hash is deliberately naive: the sum of the key's character codes
//! modulo the bucket count. Collisions are the point of the exercise, so
//! chains are kept in insertion order and shown as-is.
//!
//! Resizing walks the old buckets from index 0 and every chain head to tail,
//! appending each entry to its new bucket. Relative order of keys that end up
//! sharing a bucket is therefore the order they were met during that walk.

use serde::{Deserialize, Serialize};
use tracing::debug;

use adtlab_config::{BucketLayoutConfig, MAX_BUCKETS, MIN_BUCKETS};
use adtlab_core::error::AdtError;
use adtlab_core::render::{BucketView, PlacedEntry, RenderModel};

use crate::Simulator;

/// Horizontal offset of the first entry from the bucket label.
const ENTRY_INSET: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub key: String,
    pub value: String,
}

/// Whether `put` created a new entry or overwrote an existing value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PutOutcome {
    Inserted,
    Updated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    Chaining,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashStats {
    pub count: usize,
    pub bucket_count: usize,
    pub collision_policy: CollisionPolicy,
    pub longest_chain: usize,
}

/// Bucket index of `key` in a table of `bucket_count` buckets.
///
/// Sums Unicode scalar values, so "ab" and "ba" always collide.
pub fn hash_key(key: &str, bucket_count: usize) -> usize {
    let sum: u64 = key.chars().map(|c| c as u64).sum();
    (sum % bucket_count as u64) as usize
}

fn check_bucket_count(bucket_count: usize) -> Result<(), AdtError> {
    if (MIN_BUCKETS..=MAX_BUCKETS).contains(&bucket_count) {
        Ok(())
    } else {
        Err(AdtError::InvalidConfiguration(format!(
            "bucket count {} outside {}..={}",
            bucket_count, MIN_BUCKETS, MAX_BUCKETS
        )))
    }
}

#[derive(Debug, Clone)]
pub struct HashTableSimulator {
    buckets: Vec<Vec<Entry>>,
    count: usize,
    layout: BucketLayoutConfig,
}

impl HashTableSimulator {
    pub fn new(bucket_count: usize, layout: BucketLayoutConfig) -> Result<Self, AdtError> {
        check_bucket_count(bucket_count)?;
        Ok(Self {
            buckets: vec![Vec::new(); bucket_count],
            count: 0,
            layout,
        })
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Bucket `key` maps to under the current bucket count.
    pub fn bucket_of(&self, key: &str) -> usize {
        hash_key(key, self.buckets.len())
    }

    pub fn put(&mut self, key: impl Into<String>, value: impl Into<String>) -> PutOutcome {
        let key = key.into();
        let value = value.into();
        let index = self.bucket_of(&key);
        let bucket = &mut self.buckets[index];

        if let Some(entry) = bucket.iter_mut().find(|e| e.key == key) {
            debug!(%key, bucket = index, "hash put updated");
            entry.value = value;
            return PutOutcome::Updated;
        }

        debug!(%key, bucket = index, chain = bucket.len() + 1, "hash put inserted");
        bucket.push(Entry { key, value });
        self.count += 1;
        PutOutcome::Inserted
    }

    pub fn get(&self, key: &str) -> Result<&Entry, AdtError> {
        self.buckets[self.bucket_of(key)]
            .iter()
            .find(|e| e.key == key)
            .ok_or_else(|| AdtError::NotFound(format!("key {:?}", key)))
    }

    /// Rehashes every entry into `bucket_count` buckets.
    ///
    /// Counts outside the allowed range are rejected before anything moves.
    pub fn resize(&mut self, bucket_count: usize) -> Result<(), AdtError> {
        check_bucket_count(bucket_count)?;
        let old = std::mem::replace(&mut self.buckets, vec![Vec::new(); bucket_count]);
        for entry in old.into_iter().flatten() {
            let index = hash_key(&entry.key, bucket_count);
            self.buckets[index].push(entry);
        }
        debug!(bucket_count, count = self.count, "hash table resized");
        Ok(())
    }

    pub fn stats(&self) -> HashStats {
        HashStats {
            count: self.count,
            bucket_count: self.buckets.len(),
            collision_policy: CollisionPolicy::Chaining,
            longest_chain: self.buckets.iter().map(Vec::len).max().unwrap_or(0),
        }
    }

    /// Entries of bucket `index`, head first. Empty for an out-of-range index.
    pub fn bucket(&self, index: usize) -> &[Entry] {
        self.buckets.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All entries, bucket 0 first.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.buckets.iter().flatten()
    }
}

impl Simulator for HashTableSimulator {
    fn name(&self) -> &'static str {
        "hash_table"
    }

    fn len(&self) -> usize {
        self.count
    }

    fn reset(&mut self) {
        self.buckets.iter_mut().for_each(Vec::clear);
        self.count = 0;
    }

    fn render_model(&self) -> RenderModel {
        let buckets = self
            .buckets
            .iter()
            .enumerate()
            .map(|(index, chain)| BucketView {
                index,
                y: self.layout.origin_y + index as f64 * self.layout.row_height,
                entries: chain
                    .iter()
                    .enumerate()
                    .map(|(position, entry)| PlacedEntry {
                        key: entry.key.clone(),
                        value: entry.value.clone(),
                        x: self.layout.origin_x
                            + ENTRY_INSET
                            + position as f64 * self.layout.entry_spacing,
                    })
                    .collect(),
            })
            .collect();
        RenderModel::Buckets { buckets }
    }
}
