//! Error types for Artifact Search domain operations

use thiserror::Error;

/// Result type alias for domain operations
pub type Result<T> = std::result::Result<T, SearchError>;

/// Main error type for domain operations
#[derive(Error, Debug)]
pub enum SearchError {
    /// Coordinate could not be parsed or failed validation
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// Checksum value is malformed for its algorithm
    #[error("Invalid checksum: {0}")]
    InvalidChecksum(String),

    /// Unknown or unsupported hash algorithm
    #[error("Unsupported hash algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Serialization/Deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        SearchError::SerializationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SearchError::InvalidCoordinate("missing version".to_string());
        assert_eq!(err.to_string(), "Invalid coordinate: missing version");
    }

    #[test]
    fn test_from_serde_error() {
        let err = serde_json::from_str::<u32>("nope").unwrap_err();
        let converted: SearchError = err.into();
        assert!(matches!(converted, SearchError::SerializationError(_)));
    }
}
