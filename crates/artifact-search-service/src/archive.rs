//! Archive inspection
//!
//! Reads an artifact archive once, digests the raw bytes, and lists the file
//! entries it contains.

use artifact_search_core::{Checksum, HashAlgorithm};
use std::io::Cursor;
use std::path::Path;
use tracing::debug;
use zip::ZipArchive;

use crate::error::ArchiveError;

/// Checksum and entry listing of one archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveContents {
    /// Digest of the raw archive bytes
    pub checksum: Checksum,
    /// File entries in archive order, `/`-separated
    pub entry_names: Vec<String>,
    /// Number of bytes read
    pub size_bytes: u64,
}

/// Computes checksums and entry listings of zip-format archives
#[derive(Debug, Clone, Copy, Default)]
pub struct ArchiveInspector {
    algorithm: HashAlgorithm,
}

impl ArchiveInspector {
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self { algorithm }
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Inspect the archive at `path`
    ///
    /// # Errors
    /// * [`ArchiveError::Io`] if the file cannot be read
    /// * [`ArchiveError::Corrupt`] if it is not a readable zip archive
    pub fn inspect(&self, path: &Path) -> Result<ArchiveContents, ArchiveError> {
        let bytes = std::fs::read(path).map_err(|source| ArchiveError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let checksum = Checksum {
            algorithm: self.algorithm,
            value: hash_data(&bytes, self.algorithm),
        };
        let size_bytes = bytes.len() as u64;

        let corrupt = |source| ArchiveError::Corrupt {
            path: path.to_path_buf(),
            source,
        };
        let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(corrupt)?;

        let mut entry_names = Vec::with_capacity(archive.len());
        for idx in 0..archive.len() {
            let entry = archive.by_index_raw(idx).map_err(corrupt)?;
            if entry.is_dir() {
                continue;
            }
            entry_names.push(entry.name().replace('\\', "/"));
        }

        debug!(
            path = %path.display(),
            entries = entry_names.len(),
            "Inspected archive"
        );

        Ok(ArchiveContents {
            checksum,
            entry_names,
            size_bytes,
        })
    }
}

/// Hash data using the specified algorithm, as lowercase hex
pub fn hash_data(data: &[u8], algorithm: HashAlgorithm) -> String {
    match algorithm {
        HashAlgorithm::MD5 => format!("{:x}", md5::compute(data)),
        HashAlgorithm::SHA1 => {
            use sha1::{Digest, Sha1};
            let mut hasher = Sha1::new();
            hasher.update(data);
            format!("{:x}", hasher.finalize())
        }
        HashAlgorithm::SHA256 => {
            use sha2::{Digest, Sha256};
            let mut hasher = Sha256::new();
            hasher.update(data);
            format!("{:x}", hasher.finalize())
        }
        HashAlgorithm::SHA3_256 => {
            use sha3::{Digest, Sha3_256};
            let mut hasher = Sha3_256::new();
            hasher.update(data);
            format!("{:x}", hasher.finalize())
        }
        HashAlgorithm::BLAKE3 => blake3::hash(data).to_hex().to_string(),
    }
}
