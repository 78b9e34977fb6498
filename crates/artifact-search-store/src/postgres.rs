//! PostgreSQL implementation of ArtifactStore
//!
//! Rows live in the `artifacts` table created by the workspace migrations.
//! An absent classifier is stored as the empty string so it can take part in
//! the primary key.

use async_trait::async_trait;
use artifact_search_core::StoredArtifact;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::{debug, instrument};

use crate::error::{StoreError, StoreResult};
use crate::repository::ArtifactStore;

/// PostgreSQL-backed artifact store
#[derive(Debug, Clone)]
pub struct PostgresArtifactStore {
    pool: PgPool,
}

impl PostgresArtifactStore {
    /// Create a new store over an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Insert an artifact row, or refresh checksum, size and gather time of an existing one
    #[instrument(skip(self, artifact), fields(
        repository_id = %artifact.repository_id,
        group_id = %artifact.group_id,
        artifact_id = %artifact.artifact_id,
        version = %artifact.version,
    ))]
    pub async fn record_artifact(&self, artifact: &StoredArtifact) -> StoreResult<()> {
        debug!("Recording artifact");

        let size_bytes = i64::try_from(artifact.size_bytes).map_err(|_| {
            StoreError::InvalidData(format!("size {} exceeds column range", artifact.size_bytes))
        })?;

        sqlx::query(
            r#"
            INSERT INTO artifacts (
                repository_id, group_id, artifact_id, version, classifier,
                artifact_type, checksum, size_bytes, when_gathered
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (repository_id, group_id, artifact_id, version, classifier, artifact_type)
            DO UPDATE SET
                checksum = EXCLUDED.checksum,
                size_bytes = EXCLUDED.size_bytes,
                when_gathered = EXCLUDED.when_gathered
            "#,
        )
        .bind(&artifact.repository_id)
        .bind(&artifact.group_id)
        .bind(&artifact.artifact_id)
        .bind(&artifact.version)
        .bind(artifact.classifier.as_deref().unwrap_or(""))
        .bind(&artifact.artifact_type)
        .bind(artifact.checksum.to_lowercase())
        .bind(size_bytes)
        .bind(artifact.when_gathered)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl ArtifactStore for PostgresArtifactStore {
    #[instrument(skip(self))]
    async fn query_by_checksum(&self, checksum: &str) -> StoreResult<Vec<StoredArtifact>> {
        debug!("Querying artifacts by checksum");

        let rows = sqlx::query(
            r#"
            SELECT
                repository_id, group_id, artifact_id, version, classifier,
                artifact_type, checksum, size_bytes, when_gathered
            FROM artifacts
            WHERE checksum = $1
            ORDER BY repository_id, group_id, artifact_id, version
            "#,
        )
        .bind(checksum.to_lowercase())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(row_to_artifact).collect()
    }
}

/// Convert a database row to a StoredArtifact
fn row_to_artifact(row: PgRow) -> StoreResult<StoredArtifact> {
    let classifier: String = row.try_get("classifier")?;
    let size_bytes: i64 = row.try_get("size_bytes")?;
    let when_gathered: DateTime<Utc> = row.try_get("when_gathered")?;

    Ok(StoredArtifact {
        repository_id: row.try_get("repository_id")?,
        group_id: row.try_get("group_id")?,
        artifact_id: row.try_get("artifact_id")?,
        version: row.try_get("version")?,
        classifier: (!classifier.is_empty()).then_some(classifier),
        artifact_type: row.try_get("artifact_type")?,
        checksum: row.try_get("checksum")?,
        size_bytes: u64::try_from(size_bytes)
            .map_err(|_| StoreError::InvalidData(format!("negative size: {}", size_bytes)))?,
        when_gathered,
    })
}
