use thiserror::Error;

/// Errors returned by simulator operations.
///
/// A rejected operation never leaves partial state behind: the structure is
/// exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdtError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("{structure} is full (capacity {capacity})")]
    Overflow {
        structure: &'static str,
        capacity: usize,
    },

    #[error("{0} is empty")]
    Underflow(&'static str),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl AdtError {
    /// Short machine-readable name, used as a metrics label.
    pub fn kind(&self) -> &'static str {
        match self {
            AdtError::NotFound(_) => "not_found",
            AdtError::Overflow { .. } => "overflow",
            AdtError::Underflow(_) => "underflow",
            AdtError::InvalidConfiguration(_) => "invalid_configuration",
        }
    }
}
