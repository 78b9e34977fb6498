//! Index record construction
//!
//! Turns a published artifact into the searchable fingerprint kept by the
//! index: the archive checksum plus the classes it contains. Anything that
//! is not an indexable, readable archive yields no record.

use artifact_search_core::{ArtifactCoordinate, ArtifactIndexRecord, HashAlgorithm};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, error, instrument};

use crate::archive::ArchiveInspector;

const CLASS_SUFFIX: &str = ".class";

/// Indexer settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexerConfig {
    /// Digest computed over archive bytes
    pub checksum_algorithm: HashAlgorithm,

    /// Packaging types whose archives are inspected
    pub indexable_types: Vec<String>,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            checksum_algorithm: HashAlgorithm::MD5,
            indexable_types: vec!["jar".to_string(), "maven-plugin".to_string()],
        }
    }
}

impl IndexerConfig {
    pub fn is_indexable(&self, artifact_type: &str) -> bool {
        self.indexable_types.iter().any(|t| t == artifact_type)
    }
}

/// An artifact presented for indexing
#[derive(Debug, Clone)]
pub struct ArtifactDescriptor {
    pub coordinate: ArtifactCoordinate,
    /// Backing file, absent when the artifact has not been stored yet
    pub file: Option<PathBuf>,
    /// Path relative to the repository root, recorded in the index
    pub repository_path: String,
}

impl ArtifactDescriptor {
    /// Descriptor using the coordinate's default layout path
    pub fn new(coordinate: ArtifactCoordinate, file: Option<PathBuf>) -> Self {
        let repository_path = coordinate.repository_path();
        Self {
            coordinate,
            file,
            repository_path,
        }
    }

    /// Descriptor for an artifact stored under `root` in the default layout
    pub fn in_repository(root: &Path, coordinate: ArtifactCoordinate) -> Self {
        let repository_path = coordinate.repository_path();
        Self {
            file: Some(root.join(&repository_path)),
            coordinate,
            repository_path,
        }
    }

    pub fn with_repository_path(mut self, repository_path: impl Into<String>) -> Self {
        self.repository_path = repository_path.into();
        self
    }
}

/// Builds index records from artifact archives
///
/// Holds no mutable state, so one factory can index independent files from
/// many threads.
#[derive(Debug, Clone, Default)]
pub struct IndexRecordFactory {
    config: IndexerConfig,
    inspector: ArchiveInspector,
}

impl IndexRecordFactory {
    pub fn new(config: IndexerConfig) -> Self {
        let inspector = ArchiveInspector::new(config.checksum_algorithm);
        Self { config, inspector }
    }

    pub fn config(&self) -> &IndexerConfig {
        &self.config
    }

    /// Build the index record for one artifact
    ///
    /// Returns `None` for non-indexable types, missing files, and archives
    /// that cannot be read. Read failures are logged and never propagated.
    #[instrument(skip(self, descriptor), fields(artifact = %descriptor.coordinate))]
    pub fn create_record(&self, descriptor: &ArtifactDescriptor) -> Option<ArtifactIndexRecord> {
        if !self.config.is_indexable(&descriptor.coordinate.artifact_type) {
            debug!(
                artifact_type = %descriptor.coordinate.artifact_type,
                "Skipping non-indexable artifact type"
            );
            return None;
        }

        let path = descriptor.file.as_deref()?;
        if !path.exists() {
            debug!(path = %path.display(), "Artifact file does not exist");
            return None;
        }

        let contents = match self.inspector.inspect(path) {
            Ok(contents) => contents,
            Err(e) => {
                error!(error = %e, "Could not read artifact archive");
                return None;
            }
        };

        let last_modified = match std::fs::metadata(path).and_then(|m| m.modified()) {
            Ok(modified) => DateTime::<Utc>::from(modified),
            Err(e) => {
                error!(path = %path.display(), error = %e, "Could not read artifact timestamp");
                return None;
            }
        };

        Some(ArtifactIndexRecord {
            checksum: contents.checksum,
            archive_path: descriptor.repository_path.clone(),
            last_modified,
            size_bytes: contents.size_bytes,
            class_names: class_names(&contents.entry_names),
        })
    }

    /// Build records for many artifacts, skipping those that yield none
    pub fn create_records<'a, I>(&self, descriptors: I) -> Vec<(ArtifactCoordinate, ArtifactIndexRecord)>
    where
        I: IntoIterator<Item = &'a ArtifactDescriptor>,
    {
        descriptors
            .into_iter()
            .filter_map(|descriptor| {
                self.create_record(descriptor)
                    .map(|record| (descriptor.coordinate.clone(), record))
            })
            .collect()
    }
}

/// Fully qualified class names of `.class` entries, in entry order
pub fn class_names(entry_names: &[String]) -> Vec<String> {
    entry_names
        .iter()
        .filter_map(|name| name.strip_suffix(CLASS_SUFFIX))
        .map(|stem| stem.replace('/', "."))
        .collect()
}
