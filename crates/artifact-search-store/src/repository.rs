//! Collaborator trait abstractions
//!
//! The search engine reconciles three independent data sources: a search
//! index, a persistent artifact store, and a per-repository metadata
//! resolver. A fourth collaborator reduces authorization to the ordered list
//! of repositories a caller may observe. Implementations must be thread-safe
//! (Send + Sync) for use in async contexts.

use async_trait::async_trait;
use artifact_search_core::{
    ProjectVersionMetadata, ReferenceEdge, SearchHit, SearchResultLimits, StoredArtifact,
};

use crate::error::StoreResult;

/// Authorization filter: which repositories the caller may query
#[async_trait]
pub trait ObservableRepositories: Send + Sync {
    /// Repository identifiers in priority order; earlier entries win ties
    async fn observable_repository_ids(&self) -> StoreResult<Vec<String>>;
}

/// Full-text search index over group, artifact and class names
#[async_trait]
pub trait RepositorySearch: Send + Sync {
    /// Search the given repositories
    ///
    /// # Arguments
    /// * `query` - Free text matched against group id, artifact id and class names
    /// * `repository_ids` - Repositories to search
    /// * `limits` - Result window
    ///
    /// # Returns
    /// * Hits grouped by group+artifact, in index order
    async fn search(
        &self,
        query: &str,
        repository_ids: &[String],
        limits: &SearchResultLimits,
    ) -> StoreResult<Vec<SearchHit>>;
}

/// Per-repository metadata lookups
#[async_trait]
pub trait MetadataResolver: Send + Sync {
    /// Metadata of one project version in one repository
    ///
    /// # Returns
    /// * `Ok(Some(metadata))` - The repository holds this version
    /// * `Ok(None)` - The repository does not hold this version
    /// * `Err(StoreError)` - The repository could not be read
    async fn get_project_version(
        &self,
        repository_id: &str,
        group_id: &str,
        artifact_id: &str,
        version: &str,
    ) -> StoreResult<Option<ProjectVersionMetadata>>;

    /// All versions of a project present in one repository, unordered
    async fn get_project_versions(
        &self,
        repository_id: &str,
        group_id: &str,
        artifact_id: &str,
    ) -> StoreResult<Vec<String>>;

    /// Projects in one repository that declare a dependency on the given version
    async fn get_project_references(
        &self,
        repository_id: &str,
        group_id: &str,
        artifact_id: &str,
        version: &str,
    ) -> StoreResult<Vec<ReferenceEdge>>;
}

/// Persistent store of gathered artifacts
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Every stored artifact whose checksum equals `checksum`, in any algorithm
    async fn query_by_checksum(&self, checksum: &str) -> StoreResult<Vec<StoredArtifact>>;
}
