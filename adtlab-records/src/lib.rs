//! # adtlab-records
//!
//! Where simulator payloads come from: users and blog posts, loaded through
//! an async [`RecordSource`] and mutated through a [`RecordSink`].
//! [`MemoryStore`] implements both over a [`Dataset`] read from disk or
//! generated from a seed.

pub mod dataset;
pub mod error;
pub mod source;
pub mod store;

pub use dataset::{Dataset, PostRow, UserRow};
pub use error::RecordError;
pub use source::{
    BodyView, NewPost, NewRecord, NewUser, RecordKind, RecordQuery, RecordSink, RecordSource,
};
pub use store::MemoryStore;
