//! Store-specific error types and conversions
//!
//! Errors raised by the collaborators the search engine consults: the search
//! index, the metadata resolver, and the artifact store backends.

use thiserror::Error;

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by store backends and collaborators
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database connection error
    #[error("Database connection error: {0}")]
    Connection(String),

    /// Connection pool error
    #[error("Connection pool error: {0}")]
    Pool(String),

    /// SQL query error
    #[error("Query error: {0}")]
    Query(String),

    /// Database migration error
    #[error("Migration error: {0}")]
    Migration(String),

    /// Unique constraint violation
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// Constraint violation other than uniqueness
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// Stored data could not be mapped to domain types
    #[error("Invalid data format: {0}")]
    InvalidData(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A repository could not be read
    #[error("Repository '{repository_id}' unavailable: {reason}")]
    RepositoryUnavailable { repository_id: String, reason: String },

    /// Domain error from core crate
    #[error("Domain error: {0}")]
    Domain(#[from] artifact_search_core::SearchError),

    /// Internal store error
    #[error("Internal store error: {0}")]
    Internal(String),
}

impl StoreError {
    /// Check if this error is a constraint violation
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            StoreError::ConstraintViolation(_) | StoreError::UniqueViolation(_)
        )
    }

    /// Check if this is a transient error that could be retried
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            StoreError::Connection(_) | StoreError::Pool(_) | StoreError::RepositoryUnavailable { .. }
        )
    }
}

/// Convert SQLx database errors to our error type
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                let message = db_err.message().to_string();

                // PostgreSQL error codes: https://www.postgresql.org/docs/current/errcodes-appendix.html
                match db_err.code().as_deref() {
                    Some("23505") => StoreError::UniqueViolation(message),
                    Some("23000") | Some("23502") | Some("23503") | Some("23514") => {
                        StoreError::ConstraintViolation(message)
                    }
                    _ => StoreError::Query(message),
                }
            }

            sqlx::Error::PoolTimedOut => StoreError::Pool("Connection pool timeout".to_string()),

            sqlx::Error::PoolClosed => StoreError::Pool("Connection pool closed".to_string()),

            sqlx::Error::Io(io_err) => StoreError::Connection(format!("I/O error: {}", io_err)),

            sqlx::Error::Tls(tls_err) => StoreError::Connection(format!("TLS error: {}", tls_err)),

            sqlx::Error::Protocol(msg) => StoreError::Connection(format!("Protocol error: {}", msg)),

            sqlx::Error::ColumnNotFound(col) => {
                StoreError::InvalidData(format!("Column not found: {}", col))
            }

            sqlx::Error::Decode(msg) => StoreError::Serialization(format!("Decode error: {}", msg)),

            sqlx::Error::Migrate(migrate_err) => StoreError::Migration(format!("{}", migrate_err)),

            _ => StoreError::Internal(format!("{}", err)),
        }
    }
}

/// Convert SQLx migration errors
impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        StoreError::Migration(format!("{}", err))
    }
}

/// Convert serde_json errors
impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(format!("{}", err))
    }
}

/// Convert URL parse errors
impl From<url::ParseError> for StoreError {
    fn from(err: url::ParseError) -> Self {
        StoreError::Configuration(format!("Invalid URL: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let unique = StoreError::UniqueViolation("test".to_string());
        assert!(unique.is_constraint_violation());
        assert!(!unique.is_transient());

        let connection = StoreError::Connection("test".to_string());
        assert!(connection.is_transient());

        let unavailable = StoreError::RepositoryUnavailable {
            repository_id: "internal".to_string(),
            reason: "timeout".to_string(),
        };
        assert!(unavailable.is_transient());
    }

    #[test]
    fn test_error_display() {
        let err = StoreError::RepositoryUnavailable {
            repository_id: "repo1.mirror".to_string(),
            reason: "disk offline".to_string(),
        };
        assert_eq!(err.to_string(), "Repository 'repo1.mirror' unavailable: disk offline");

        let err = StoreError::UniqueViolation("duplicate key".to_string());
        assert_eq!(err.to_string(), "Unique constraint violation: duplicate key");
    }

    #[test]
    fn test_from_row_not_found_is_internal() {
        let err: StoreError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, StoreError::Internal(_)));
    }
}
