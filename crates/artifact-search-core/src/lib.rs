//! Core domain models and types for Artifact Search
//!
//! This crate contains the data structures shared by the indexing and query
//! layers: artifact coordinates, index records, search hits, resolved
//! artifacts, dependency and reference edges, version metadata, checksums and
//! the version ordering used when merging results across repositories.

pub mod checksum;
pub mod coordinate;
pub mod dependency;
pub mod error;
pub mod metadata;
pub mod record;
pub mod search;
pub mod version;

// Re-exports for convenience
pub use checksum::{Checksum, HashAlgorithm};
pub use coordinate::{ArtifactCoordinate, ProjectVersionKey, DEFAULT_ARTIFACT_TYPE};
pub use dependency::{DependencyEdge, DependencyNode, DependencyTree, ReferenceEdge};
pub use error::{Result, SearchError};
pub use metadata::{MavenProjectFacet, MetadataFacet, ProjectVersionMetadata, StoredArtifact};
pub use record::ArtifactIndexRecord;
pub use search::{ResolvedArtifact, SearchHit, SearchResultLimits};
pub use version::{MavenVersionComparator, VersionComparator};
