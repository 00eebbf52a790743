//! # adtlab-core
//!
//! Shared value types for the data structure simulators.
//!
//! ### Key Submodules:
//! - `record`: user and blog post records carried as payload
//! - `error`: the small error taxonomy every simulator returns
//! - `render`: render model handed to drawing layers
//! - `arena`: index arena with stable handles for linked structures

pub mod arena;
pub mod error;
pub mod record;
pub mod render;

pub mod prelude {
    pub use crate::arena::*;
    pub use crate::error::*;
    pub use crate::record::*;
    pub use crate::render::*;
}

pub use error::AdtError;
pub use record::{Record, RecordId, SortOrder};
