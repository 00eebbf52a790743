//! # adtlab-engine
//!
//! Owns the five simulators for the lifetime of a session and drives them
//! with serde-tagged commands, one at a time or from a scenario file.
//!
//! ### Key Submodules:
//! - `session`: creation, command dispatch, snapshots and state hashing
//! - `command`: the command and outcome vocabulary
//! - `scenario`: scripted runs with per-step reports
//! - `error`: `EngineError`, wrapping every lower layer

pub mod command;
pub mod error;
pub mod scenario;
pub mod session;

pub use command::{Command, Outcome, PostDraft, Structure};
pub use error::EngineError;
pub use scenario::{Scenario, ScenarioReport, StepReport, StepResult};
pub use session::{Session, SessionSnapshot};
