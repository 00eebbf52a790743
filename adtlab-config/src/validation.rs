//! Custom validation functions for configuration.
//!
//! Shared validation logic used across multiple configuration modules.

use std::path::Path;

use validator::ValidationError;

/// Validate a tracing level name.
pub fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    let re = regex::Regex::new("^(?i)(trace|debug|info|warn|error|off)$")
        .map_err(|_| ValidationError::new("invalid_regex"))?;
    if re.is_match(level) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_log_level"))
    }
}

/// Validate that a dataset path names a YAML or JSON file.
pub fn validate_dataset_path(path: &Path) -> Result<(), ValidationError> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml" | "yml" | "json") => Ok(()),
        _ => Err(ValidationError::new("unsupported_dataset_format")),
    }
}
