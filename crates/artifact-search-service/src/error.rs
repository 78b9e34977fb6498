//! Service-layer error types
//!
//! Maps domain and store errors to the errors surfaced by search operations,
//! and defines the archive inspection error used while indexing.

use artifact_search_core::SearchError;
use artifact_search_store::StoreError;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for service operations
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

/// Service-layer error types
#[derive(Error, Debug)]
pub enum ServiceError {
    /// No observable repository holds the requested project version
    #[error("Artifact does not exist.")]
    ArtifactNotFound { coordinate: String },

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Storage or collaborator error
    #[error("Store error: {0}")]
    Store(String),

    /// Internal service error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn artifact_not_found(group_id: &str, artifact_id: &str, version: &str) -> Self {
        ServiceError::ArtifactNotFound {
            coordinate: format!("{}:{}:{}", group_id, artifact_id, version),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::ArtifactNotFound { .. })
    }
}

impl From<SearchError> for ServiceError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::InvalidCoordinate(msg) => ServiceError::InvalidInput(msg),
            SearchError::InvalidChecksum(msg) => ServiceError::InvalidInput(msg),
            SearchError::UnsupportedAlgorithm(msg) => ServiceError::InvalidInput(msg),
            SearchError::ValidationError(msg) => ServiceError::ValidationFailed(msg),
            SearchError::SerializationError(msg) => ServiceError::Internal(msg),
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Domain(err) => ServiceError::from(err),
            StoreError::ConstraintViolation(msg)
            | StoreError::UniqueViolation(msg)
            | StoreError::InvalidData(msg) => ServiceError::ValidationFailed(msg),
            other => ServiceError::Store(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::Internal(format!("Serialization error: {}", err))
    }
}

/// Failure while reading an artifact archive
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// The file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a readable zip archive
    #[error("corrupt archive {}: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },
}

impl ArchiveError {
    pub fn path(&self) -> &Path {
        match self {
            ArchiveError::Io { path, .. } | ArchiveError::Corrupt { path, .. } => path.as_path(),
        }
    }
}
