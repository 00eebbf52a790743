//! # adtlab Configuration System
//!
//! Hierarchical configuration for the data structure simulators.
//!
//! ## Features
//! - **Unified Configuration**: one struct shared by engine, simulators and CLI
//! - **Validation**: bucket-count bounds, layout geometry and log levels are checked at load time
//! - **Layering**: defaults, YAML files and `ADTLAB_*` environment variables

#![warn(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use validator::Validate;

mod error;
mod hash_table;
mod layout;
mod records;
mod telemetry;
mod validation;

pub use error::ConfigError;
pub use hash_table::{HashTableConfig, MAX_BUCKETS, MIN_BUCKETS};
pub use layout::{
    BucketLayoutConfig, LayoutConfig, RowLayoutConfig, StackLayoutConfig, TreeLayoutConfig,
};
pub use records::RecordsConfig;
pub use telemetry::TelemetryConfig;

const BASE_FILE: &str = "config/adtlab.yaml";
const ENV_PREFIX: &str = "ADTLAB_";

/// Top‑level configuration container.
#[derive(Debug, Serialize, Deserialize, Validate, Default, Clone, PartialEq)]
pub struct AdtlabConfig {
    /// Render geometry for every structure.
    #[validate(nested)]
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Hash table sizing.
    #[validate(nested)]
    #[serde(default)]
    pub hash_table: HashTableConfig,

    /// Where records come from.
    #[validate(nested)]
    #[serde(default)]
    pub records: RecordsConfig,

    /// Logging and metrics.
    #[validate(nested)]
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AdtlabConfig {
    /// Load configuration from default files and environment.
    ///
    /// Hierarchy:
    /// 1. Default Values
    /// 2. `config/adtlab.yaml`. If missing, defaults are used.
    /// 3. `config/<ADTLAB_ENV>.yaml` (environment defaults to `development`).
    /// 4. `ADTLAB_*` environment variables, `__` separating nested keys.
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(AdtlabConfig::default()));

        if Path::new(BASE_FILE).exists() {
            figment = figment.merge(Yaml::file(BASE_FILE));
        } else {
            debug!("{} not found, using default configuration", BASE_FILE);
        }

        let env = std::env::var("ADTLAB_ENV").unwrap_or_else(|_| "development".into());
        let env_file = format!("config/{}.yaml", env);
        if Path::new(&env_file).exists() {
            figment = figment.merge(Yaml::file(env_file));
        }

        Self::extract(figment)
    }

    /// Load configuration from a specific path, layered over the defaults.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(PathBuf::from(path)));
        }

        let figment =
            Figment::from(Serialized::defaults(AdtlabConfig::default())).merge(Yaml::file(path));
        Self::extract(figment)
    }

    fn extract(figment: Figment) -> Result<Self, ConfigError> {
        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.validate()?;
                Ok(config)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn full_config_validation() {
        let config = AdtlabConfig::default();
        config.validate().expect("Default config should validate");
    }

    #[test]
    fn environment_override() {
        std::env::set_var("ADTLAB_RECORDS__SHUFFLE_SEED", "7");
        let config = AdtlabConfig::load().unwrap();
        std::env::remove_var("ADTLAB_RECORDS__SHUFFLE_SEED");
        assert_eq!(config.records.shuffle_seed, 7);
    }

    #[test]
    fn missing_file_is_reported() {
        let err = AdtlabConfig::load_from_path("does/not/exist.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn file_values_are_validated() {
        let path = std::env::temp_dir().join(format!("adtlab-config-{}.yaml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "hash_table:\n  initial_bucket_count: 20").unwrap();

        let err = AdtlabConfig::load_from_path(&path).unwrap_err();
        std::fs::remove_file(&path).ok();

        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("hash_table.initial_bucket_count"));
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let path =
            std::env::temp_dir().join(format!("adtlab-partial-{}.yaml", std::process::id()));
        std::fs::write(&path, "layout:\n  tree:\n    width: 1024\n").unwrap();

        let config = AdtlabConfig::load_from_path(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.layout.tree.width, 1024.0);
        assert_eq!(config.layout.tree.row_height, 80.0);
        assert_eq!(config.hash_table.initial_bucket_count, 10);
    }
}
