use thiserror::Error;

use adtlab_core::AdtError;
use adtlab_records::RecordError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Record error: {0}")]
    Records(#[from] RecordError),

    #[error("Simulator error: {0}")]
    Simulator(#[from] AdtError),

    #[error("Scenario parsing error: {0}")]
    Scenario(#[from] serde_yaml::Error),

    #[error("Snapshot serialization error: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
