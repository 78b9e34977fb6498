//! Checksums and supported digest algorithms
//!
//! Index records carry a checksum of the raw archive bytes so that artifacts can
//! later be located by content. The algorithm is configurable; MD5 is the
//! default because existing repository indexes are keyed on it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SearchError};

/// Supported digest algorithms for archive checksums
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HashAlgorithm {
    /// MD5, the historical repository index checksum
    MD5,
    /// SHA-1, published alongside most repository artifacts
    SHA1,
    /// SHA-256
    SHA256,
    /// SHA3-256
    #[serde(rename = "SHA3-256", alias = "SHA3_256")]
    SHA3_256,
    /// BLAKE3
    BLAKE3,
}

impl HashAlgorithm {
    /// Get the length of the digest in bytes
    pub fn hash_length(&self) -> usize {
        match self {
            HashAlgorithm::MD5 => 16,
            HashAlgorithm::SHA1 => 20,
            HashAlgorithm::SHA256 | HashAlgorithm::SHA3_256 | HashAlgorithm::BLAKE3 => 32,
        }
    }

    /// Get the length of the digest in hexadecimal characters
    pub fn hex_length(&self) -> usize {
        self.hash_length() * 2
    }

    /// Validate that a hash string has the correct shape for this algorithm
    pub fn validate_hash_format(&self, hash: &str) -> Result<()> {
        let expected_len = self.hex_length();
        if hash.len() != expected_len {
            return Err(SearchError::InvalidChecksum(format!(
                "invalid length for {}: expected {} characters, got {}",
                self,
                expected_len,
                hash.len()
            )));
        }

        if !hash.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(SearchError::InvalidChecksum(
                "checksum must be a hexadecimal string".to_string(),
            ));
        }

        Ok(())
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashAlgorithm::MD5 => write!(f, "MD5"),
            HashAlgorithm::SHA1 => write!(f, "SHA1"),
            HashAlgorithm::SHA256 => write!(f, "SHA256"),
            HashAlgorithm::SHA3_256 => write!(f, "SHA3-256"),
            HashAlgorithm::BLAKE3 => write!(f, "BLAKE3"),
        }
    }
}

impl Default for HashAlgorithm {
    fn default() -> Self {
        HashAlgorithm::MD5
    }
}

impl FromStr for HashAlgorithm {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "MD5" => Ok(HashAlgorithm::MD5),
            "SHA1" | "SHA-1" => Ok(HashAlgorithm::SHA1),
            "SHA256" | "SHA-256" => Ok(HashAlgorithm::SHA256),
            "SHA3-256" | "SHA3_256" => Ok(HashAlgorithm::SHA3_256),
            "BLAKE3" => Ok(HashAlgorithm::BLAKE3),
            _ => Err(SearchError::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

/// Checksum of an archive's raw bytes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Checksum {
    /// The digest algorithm used
    pub algorithm: HashAlgorithm,
    /// The digest as a lowercase hexadecimal string
    pub value: String,
}

impl Checksum {
    /// Create a new checksum, validating the value against the algorithm
    ///
    /// # Errors
    /// Returns an error if the value has the wrong length or is not hexadecimal
    pub fn new(algorithm: HashAlgorithm, value: impl Into<String>) -> Result<Self> {
        let normalized = value.into().to_lowercase();
        algorithm.validate_hash_format(&normalized)?;

        Ok(Self {
            algorithm,
            value: normalized,
        })
    }

    /// Check whether a raw digest string matches this checksum (case-insensitive)
    pub fn matches(&self, hash_value: &str) -> bool {
        self.value.eq_ignore_ascii_case(hash_value)
    }

    /// Get the digest value
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Get the algorithm used
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.algorithm, self.value)
    }
}
