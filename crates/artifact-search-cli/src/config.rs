//! Command-line configuration
//!
//! Sources are layered, later ones overriding earlier ones:
//! - `{config_dir}/default.toml`
//! - `{config_dir}/{environment}.toml`
//! - `ARTIFACT_SEARCH__*` environment variables
//! - command-line flags

use artifact_search_service::IndexerConfig;
use artifact_search_store::PoolConfig;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Index record settings
    #[serde(default)]
    pub indexer: IndexerConfig,

    /// Repository being indexed
    #[serde(default)]
    pub repository: RepositoryConfig,

    /// Artifact store; checksum lookups and persisted indexing need it
    #[serde(default)]
    pub database: Option<PoolConfig>,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Repository to index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryConfig {
    /// Identifier recorded with every indexed artifact
    #[serde(default = "default_repository_id")]
    pub id: String,

    /// Root directory in the default Maven 2 layout
    #[serde(default)]
    pub root: Option<PathBuf>,
}

fn default_repository_id() -> String {
    "internal".to_string()
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            id: default_repository_id(),
            root: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Use JSON formatting
    #[serde(default)]
    pub json_format: bool,

    /// Include thread IDs
    #[serde(default)]
    pub include_thread_ids: bool,

    /// Include target module
    #[serde(default = "default_true")]
    pub include_target: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json_format: false,
            include_thread_ids: false,
            include_target: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// # Errors
    ///
    /// Returns an error if a present source cannot be parsed
    pub fn load(config_dir: impl Into<PathBuf>, environment: &str) -> Result<Self, ConfigError> {
        let config_dir = config_dir.into();

        Config::builder()
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            .add_source(File::from(config_dir.join(format!("{}.toml", environment))).required(false))
            // e.g. ARTIFACT_SEARCH__REPOSITORY__ID=snapshots
            .add_source(
                Environment::with_prefix("ARTIFACT_SEARCH")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("indexer.indexable_types")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Database settings, or an error naming the missing section
    pub fn require_database(&self) -> Result<&PoolConfig, ConfigError> {
        self.database
            .as_ref()
            .ok_or_else(|| ConfigError::NotFound("database".to_string()))
    }
}
