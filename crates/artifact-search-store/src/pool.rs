//! Connection pool for the Postgres artifact store
//!
//! `create_pool` validates a [`PoolConfig`], opens the pool, applies the
//! workspace migrations when asked to and checks connectivity before
//! handing the pool to [`crate::PostgresArtifactStore`].

use serde::{Deserialize, Serialize};
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use sqlx::ConnectOptions;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use crate::error::{StoreError, StoreResult};

pub const DEFAULT_MIN_CONNECTIONS: u32 = 1;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Ten minutes
pub const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600;

const POSTGRES_SCHEMES: [&str; 2] = ["postgres", "postgresql"];

/// Settings for the artifact store's connection pool
///
/// Read from the `[database]` table of the CLI configuration; missing keys
/// take the `DEFAULT_*` values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// `postgres://` or `postgresql://` URL of the artifact database
    pub database_url: String,
    pub min_connections: u32,
    pub max_connections: u32,
    /// Upper bound on waiting for a pooled connection
    pub connect_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    /// Log every statement at the sqlx default level
    pub enable_logging: bool,
    /// Apply `migrations/` before the store is used
    pub run_migrations: bool,
}

impl PoolConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            min_connections: DEFAULT_MIN_CONNECTIONS,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            idle_timeout_secs: DEFAULT_IDLE_TIMEOUT_SECS,
            enable_logging: false,
            run_migrations: true,
        }
    }

    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout_secs = timeout.as_secs();
        self
    }

    pub fn enable_logging(mut self, enabled: bool) -> Self {
        self.enable_logging = enabled;
        self
    }

    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// Reject connection bounds the pool cannot honor, then a URL that is
    /// not a Postgres URL
    pub fn validate(&self) -> StoreResult<()> {
        match (self.min_connections, self.max_connections) {
            (_, 0) => {
                return Err(StoreError::Configuration(
                    "database.max_connections must be at least 1".to_string(),
                ))
            }
            (min, max) if min > max => {
                return Err(StoreError::Configuration(format!(
                    "database.min_connections ({min}) exceeds database.max_connections ({max})"
                )))
            }
            _ => {}
        }

        if self.database_url.trim().is_empty() {
            return Err(StoreError::Configuration(
                "database.database_url is not set".to_string(),
            ));
        }

        let url = Url::parse(&self.database_url).map_err(|e| {
            StoreError::Configuration(format!(
                "database.database_url {} is not a URL: {e}",
                mask_password(&self.database_url)
            ))
        })?;
        if !POSTGRES_SCHEMES.contains(&url.scheme()) {
            return Err(StoreError::Configuration(format!(
                "database.database_url has scheme '{}', expected postgres",
                url.scheme()
            )));
        }

        Ok(())
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self::new("postgres://localhost/artifact_search")
    }
}

/// Open the artifact store pool described by `config`
pub async fn create_pool(config: &PoolConfig) -> StoreResult<PgPool> {
    config.validate()?;

    info!(
        database = %mask_password(&config.database_url),
        min = config.min_connections,
        max = config.max_connections,
        "Opening artifact store pool"
    );

    let mut connect_opts = PgConnectOptions::from_str(&config.database_url)
        .map_err(|e| StoreError::Configuration(format!("Invalid database URL: {}", e)))?;
    if !config.enable_logging {
        connect_opts = connect_opts.disable_statement_logging();
    }

    let pool = PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .connect_with(connect_opts)
        .await
        .map_err(|e| StoreError::Connection(format!("Failed to open artifact store pool: {}", e)))?;

    if config.run_migrations {
        run_migrations(&pool).await?;
    }
    verify_pool_health(&pool).await?;

    Ok(pool)
}

/// Apply the `artifacts` schema from the workspace `migrations/` directory
pub async fn run_migrations(pool: &PgPool) -> StoreResult<()> {
    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| StoreError::Migration(format!("Artifact schema migration failed: {}", e)))?;

    info!("Artifact schema is current");
    Ok(())
}

pub async fn verify_pool_health(pool: &PgPool) -> StoreResult<()> {
    debug!("Checking artifact store connectivity");

    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map_err(|e| StoreError::Connection(format!("Artifact store unreachable: {}", e)))?;

    Ok(())
}

/// Replace the password of a database URL with `***` so it can be logged
///
/// Strings that do not parse as URLs keep only the part after the last `@`.
pub fn mask_password(database_url: &str) -> String {
    match Url::parse(database_url) {
        Ok(mut url) => {
            if url.password().is_some() {
                let _ = url.set_password(Some("***"));
            }
            url.to_string()
        }
        Err(_) => match database_url.rsplit_once('@') {
            Some((_, host)) => format!("***@{host}"),
            None => database_url.to_string(),
        },
    }
}
