//! In-memory collaborator implementations
//!
//! Used by tests, the CLI's offline mode, and any embedding that keeps its
//! index and metadata in process. State is guarded by `parking_lot` locks
//! that are never held across an await point.

use async_trait::async_trait;
use artifact_search_core::{
    ArtifactCoordinate, ArtifactIndexRecord, ProjectVersionKey, ProjectVersionMetadata,
    ReferenceEdge, SearchHit, SearchResultLimits, StoredArtifact,
};
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::repository::{ArtifactStore, MetadataResolver, ObservableRepositories, RepositorySearch};

/// Fixed, ordered set of observable repositories
#[derive(Debug, Clone, Default)]
pub struct StaticRepositories {
    repository_ids: Vec<String>,
}

impl StaticRepositories {
    pub fn new<I, S>(repository_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            repository_ids: repository_ids.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl ObservableRepositories for StaticRepositories {
    async fn observable_repository_ids(&self) -> StoreResult<Vec<String>> {
        Ok(self.repository_ids.clone())
    }
}

#[derive(Debug, Clone)]
struct IndexedArtifact {
    repository_id: String,
    key: ProjectVersionKey,
    class_names: Vec<String>,
}

impl IndexedArtifact {
    fn matches(&self, needle: &str) -> bool {
        self.key.group_id.to_lowercase().contains(needle)
            || self.key.artifact_id.to_lowercase().contains(needle)
            || self
                .class_names
                .iter()
                .any(|class| class.to_lowercase().contains(needle))
    }
}

/// Substring search over indexed artifacts
///
/// A query matches an artifact when it occurs, ignoring case, in the group
/// id, the artifact id, or any class name. Matches are grouped by
/// group+artifact in the order they were indexed, and the hint is the first
/// repository that contributed a match.
#[derive(Debug, Default)]
pub struct InMemoryRepositorySearch {
    entries: RwLock<Vec<IndexedArtifact>>,
}

impl InMemoryRepositorySearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index one artifact version with the classes it contains
    pub fn index(
        &self,
        repository_id: impl Into<String>,
        coordinate: &ArtifactCoordinate,
        class_names: Vec<String>,
    ) {
        self.entries.write().push(IndexedArtifact {
            repository_id: repository_id.into(),
            key: coordinate.key(),
            class_names,
        });
    }

    /// Index one artifact version from its index record
    pub fn index_record(
        &self,
        repository_id: impl Into<String>,
        coordinate: &ArtifactCoordinate,
        record: &ArtifactIndexRecord,
    ) {
        self.index(repository_id, coordinate, record.class_names.clone());
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[async_trait]
impl RepositorySearch for InMemoryRepositorySearch {
    async fn search(
        &self,
        query: &str,
        repository_ids: &[String],
        limits: &SearchResultLimits,
    ) -> StoreResult<Vec<SearchHit>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }

        let mut hits: Vec<SearchHit> = Vec::new();
        let mut positions: HashMap<(String, String), usize> = HashMap::new();

        for entry in self.entries.read().iter() {
            if !repository_ids.contains(&entry.repository_id) || !entry.matches(&needle) {
                continue;
            }

            let id = (entry.key.group_id.clone(), entry.key.artifact_id.clone());
            let position = *positions.entry(id).or_insert_with(|| {
                hits.push(
                    SearchHit::new(&entry.key.group_id, &entry.key.artifact_id)
                        .with_repository_hint(&entry.repository_id),
                );
                hits.len() - 1
            });
            hits[position].add_version(&entry.key.version);
        }

        let total = hits.len();
        let (start, end) = limits.bounds(total);
        debug!(query, total, start, end, "In-memory search complete");

        Ok(hits.drain(start..end).collect())
    }
}

type VersionKey = (String, String, String, String);
type ProjectKey = (String, String, String);

fn version_key(repository_id: &str, group_id: &str, artifact_id: &str, version: &str) -> VersionKey {
    (
        repository_id.to_string(),
        group_id.to_string(),
        artifact_id.to_string(),
        version.to_string(),
    )
}

#[derive(Debug, Default)]
struct ResolverState {
    metadata: HashMap<VersionKey, ProjectVersionMetadata>,
    versions: HashMap<ProjectKey, Vec<String>>,
    references: HashMap<VersionKey, Vec<ReferenceEdge>>,
    failing: HashSet<String>,
}

/// Metadata resolver backed by maps, with per-repository failure injection
#[derive(Debug, Default)]
pub struct InMemoryMetadataResolver {
    state: RwLock<ResolverState>,
}

impl InMemoryMetadataResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store metadata for a version; its id is the version string
    pub fn add_version(
        &self,
        repository_id: &str,
        group_id: &str,
        artifact_id: &str,
        metadata: ProjectVersionMetadata,
    ) {
        let mut state = self.state.write();
        let versions = state
            .versions
            .entry((repository_id.to_string(), group_id.to_string(), artifact_id.to_string()))
            .or_default();
        if !versions.contains(&metadata.id) {
            versions.push(metadata.id.clone());
        }
        let key = version_key(repository_id, group_id, artifact_id, &metadata.id);
        state.metadata.insert(key, metadata);
    }

    /// Record that `reference` depends on the given version
    pub fn add_reference(
        &self,
        repository_id: &str,
        group_id: &str,
        artifact_id: &str,
        version: &str,
        reference: ReferenceEdge,
    ) {
        self.state
            .write()
            .references
            .entry(version_key(repository_id, group_id, artifact_id, version))
            .or_default()
            .push(reference);
    }

    /// Make every lookup against `repository_id` fail
    pub fn fail_repository(&self, repository_id: impl Into<String>) {
        self.state.write().failing.insert(repository_id.into());
    }

    fn check_available(&self, state: &ResolverState, repository_id: &str) -> StoreResult<()> {
        if state.failing.contains(repository_id) {
            return Err(StoreError::RepositoryUnavailable {
                repository_id: repository_id.to_string(),
                reason: "repository marked as failing".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl MetadataResolver for InMemoryMetadataResolver {
    async fn get_project_version(
        &self,
        repository_id: &str,
        group_id: &str,
        artifact_id: &str,
        version: &str,
    ) -> StoreResult<Option<ProjectVersionMetadata>> {
        let state = self.state.read();
        self.check_available(&state, repository_id)?;
        Ok(state
            .metadata
            .get(&version_key(repository_id, group_id, artifact_id, version))
            .cloned())
    }

    async fn get_project_versions(
        &self,
        repository_id: &str,
        group_id: &str,
        artifact_id: &str,
    ) -> StoreResult<Vec<String>> {
        let state = self.state.read();
        self.check_available(&state, repository_id)?;
        Ok(state
            .versions
            .get(&(repository_id.to_string(), group_id.to_string(), artifact_id.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    async fn get_project_references(
        &self,
        repository_id: &str,
        group_id: &str,
        artifact_id: &str,
        version: &str,
    ) -> StoreResult<Vec<ReferenceEdge>> {
        let state = self.state.read();
        self.check_available(&state, repository_id)?;
        Ok(state
            .references
            .get(&version_key(repository_id, group_id, artifact_id, version))
            .cloned()
            .unwrap_or_default())
    }
}

/// Artifact store held in a vector, in insertion order
#[derive(Debug, Default)]
pub struct InMemoryArtifactStore {
    rows: RwLock<Vec<StoredArtifact>>,
}

impl InMemoryArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a row, replacing any row for the same repository and coordinate
    pub fn record_artifact(&self, artifact: StoredArtifact) {
        let mut rows = self.rows.write();
        rows.retain(|row| {
            !(row.repository_id == artifact.repository_id
                && row.group_id == artifact.group_id
                && row.artifact_id == artifact.artifact_id
                && row.version == artifact.version
                && row.classifier == artifact.classifier
                && row.artifact_type == artifact.artifact_type)
        });
        rows.push(artifact);
    }

    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }
}

#[async_trait]
impl ArtifactStore for InMemoryArtifactStore {
    async fn query_by_checksum(&self, checksum: &str) -> StoreResult<Vec<StoredArtifact>> {
        Ok(self
            .rows
            .read()
            .iter()
            .filter(|row| row.checksum.eq_ignore_ascii_case(checksum))
            .cloned()
            .collect())
    }
}
