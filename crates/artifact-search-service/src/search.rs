//! Search service
//!
//! Merges full-text search hits with per-repository metadata lookups into a
//! single artifact view, restricted to the repositories the caller may
//! observe. Repository order decides ties: the first observable repository
//! holding metadata for a version supplies its packaging and repository id.
//!
//! A failing repository never aborts a query. Resolver errors are logged and
//! the repository is treated as holding nothing for that lookup.

use artifact_search_core::{
    DependencyEdge, DependencyNode, DependencyTree, MavenVersionComparator, ProjectVersionKey,
    ProjectVersionMetadata, ReferenceEdge, ResolvedArtifact, SearchResultLimits, VersionComparator,
    DEFAULT_ARTIFACT_TYPE,
};
use artifact_search_store::{ArtifactStore, MetadataResolver, ObservableRepositories, RepositorySearch};
use async_trait::async_trait;
use futures::future::join_all;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::error::{ServiceError, ServiceResult};

/// Type reported for entries of a version listing
pub const VERSION_LISTING_TYPE: &str = "pom";

/// Trait for search and query operations
#[async_trait]
pub trait SearchService: Send + Sync {
    /// Free-text search resolved to one artifact per hit and candidate version
    async fn quick_search(
        &self,
        caller: &dyn ObservableRepositories,
        query: &str,
    ) -> ServiceResult<Vec<ResolvedArtifact>>;

    /// Artifacts whose stored checksum equals `checksum`
    async fn find_by_checksum(&self, checksum: &str) -> ServiceResult<Vec<ResolvedArtifact>>;

    /// Every version of a project across observable repositories, ascending
    async fn list_versions(
        &self,
        caller: &dyn ObservableRepositories,
        group_id: &str,
        artifact_id: &str,
    ) -> ServiceResult<Vec<ResolvedArtifact>>;

    /// Direct dependencies declared by a project version
    async fn get_dependencies(
        &self,
        caller: &dyn ObservableRepositories,
        group_id: &str,
        artifact_id: &str,
        version: &str,
    ) -> ServiceResult<Vec<DependencyEdge>>;

    /// Transitive dependencies of a project version, at most `max_depth` levels deep
    async fn get_dependency_tree(
        &self,
        caller: &dyn ObservableRepositories,
        group_id: &str,
        artifact_id: &str,
        version: &str,
        max_depth: usize,
    ) -> ServiceResult<DependencyTree>;

    /// Projects declaring a dependency on a project version
    async fn get_dependees(
        &self,
        caller: &dyn ObservableRepositories,
        group_id: &str,
        artifact_id: &str,
        version: &str,
    ) -> ServiceResult<Vec<ReferenceEdge>>;

    /// Dependees tagged with the repository that reported them
    async fn get_dependee_artifacts(
        &self,
        caller: &dyn ObservableRepositories,
        group_id: &str,
        artifact_id: &str,
        version: &str,
    ) -> ServiceResult<Vec<ResolvedArtifact>>;
}

/// Default implementation of SearchService
pub struct DefaultSearchService {
    search: Arc<dyn RepositorySearch>,
    resolver: Arc<dyn MetadataResolver>,
    store: Arc<dyn ArtifactStore>,
    comparator: Arc<dyn VersionComparator>,
}

impl DefaultSearchService {
    /// Create a new search service ordering versions with [`MavenVersionComparator`]
    pub fn new(
        search: Arc<dyn RepositorySearch>,
        resolver: Arc<dyn MetadataResolver>,
        store: Arc<dyn ArtifactStore>,
    ) -> Self {
        Self {
            search,
            resolver,
            store,
            comparator: Arc::new(MavenVersionComparator::new()),
        }
    }

    /// Replace the version comparator
    pub fn with_comparator(mut self, comparator: Arc<dyn VersionComparator>) -> Self {
        self.comparator = comparator;
        self
    }

    /// Metadata from the first repository that holds the version
    async fn first_metadata(
        &self,
        repository_ids: &[String],
        group_id: &str,
        artifact_id: &str,
        version: &str,
    ) -> Option<(String, ProjectVersionMetadata)> {
        for repository_id in repository_ids {
            match self
                .resolver
                .get_project_version(repository_id, group_id, artifact_id, version)
                .await
            {
                Ok(Some(metadata)) => return Some((repository_id.clone(), metadata)),
                Ok(None) => {}
                Err(e) => warn!(
                    repository_id = %repository_id,
                    group_id,
                    artifact_id,
                    version,
                    error = %e,
                    "Metadata lookup failed, treating repository as absent"
                ),
            }
        }
        None
    }

    /// Resolve one hit version; falls back to the first repository and the default type
    async fn resolve_version(
        &self,
        repository_ids: &[String],
        group_id: &str,
        artifact_id: &str,
        version: &str,
    ) -> ResolvedArtifact {
        match self
            .first_metadata(repository_ids, group_id, artifact_id, version)
            .await
        {
            Some((repository_id, metadata)) => {
                let artifact_type = metadata.packaging().unwrap_or(DEFAULT_ARTIFACT_TYPE);
                ResolvedArtifact::new(repository_id, group_id, artifact_id, version, artifact_type)
            }
            None => {
                debug!(group_id, artifact_id, version, "No repository holds metadata for hit");
                let fallback = repository_ids.first().map(String::as_str).unwrap_or_default();
                ResolvedArtifact::new(fallback, group_id, artifact_id, version, DEFAULT_ARTIFACT_TYPE)
            }
        }
    }

    /// References from every repository, in repository order, tagged with their source
    async fn collect_references(
        &self,
        repository_ids: &[String],
        group_id: &str,
        artifact_id: &str,
        version: &str,
    ) -> Vec<(String, ReferenceEdge)> {
        let lookups = repository_ids.iter().map(|repository_id| async move {
            let result = self
                .resolver
                .get_project_references(repository_id, group_id, artifact_id, version)
                .await;
            (repository_id, result)
        });

        let mut references = Vec::new();
        for (repository_id, result) in join_all(lookups).await {
            match result {
                Ok(edges) => references.extend(edges.into_iter().map(|edge| (repository_id.clone(), edge))),
                Err(e) => warn!(
                    repository_id = %repository_id,
                    error = %e,
                    "Reference lookup failed, skipping repository"
                ),
            }
        }
        references
    }
}

fn normalize_dependencies(metadata: &ProjectVersionMetadata) -> Vec<DependencyEdge> {
    metadata.dependencies.iter().map(DependencyEdge::normalized).collect()
}

#[async_trait]
impl SearchService for DefaultSearchService {
    #[instrument(skip(self, caller), fields(query = %query))]
    async fn quick_search(
        &self,
        caller: &dyn ObservableRepositories,
        query: &str,
    ) -> ServiceResult<Vec<ResolvedArtifact>> {
        let repository_ids = caller.observable_repository_ids().await?;
        if repository_ids.is_empty() {
            debug!("Caller observes no repositories");
            return Ok(Vec::new());
        }

        let hits = self
            .search
            .search(query, &repository_ids, &SearchResultLimits::all_pages())
            .await?;
        debug!("Search returned {} hits", hits.len());

        let lookups = hits.iter().flat_map(|hit| {
            let repository_ids = &repository_ids;
            hit.versions.iter().map(move |version| {
                self.resolve_version(repository_ids, &hit.group_id, &hit.artifact_id, version)
            })
        });

        Ok(join_all(lookups).await)
    }

    #[instrument(skip(self))]
    async fn find_by_checksum(&self, checksum: &str) -> ServiceResult<Vec<ResolvedArtifact>> {
        let rows = self.store.query_by_checksum(checksum).await?;
        debug!("Checksum matched {} stored artifacts", rows.len());

        Ok(rows.into_iter().map(ResolvedArtifact::from).collect())
    }

    #[instrument(skip(self, caller))]
    async fn list_versions(
        &self,
        caller: &dyn ObservableRepositories,
        group_id: &str,
        artifact_id: &str,
    ) -> ServiceResult<Vec<ResolvedArtifact>> {
        let repository_ids = caller.observable_repository_ids().await?;

        let lookups = repository_ids.iter().map(|repository_id| async move {
            let result = self
                .resolver
                .get_project_versions(repository_id, group_id, artifact_id)
                .await;
            (repository_id, result)
        });

        let mut artifacts = Vec::new();
        for (repository_id, result) in join_all(lookups).await {
            match result {
                Ok(versions) => artifacts.extend(versions.into_iter().map(|version| {
                    ResolvedArtifact::new(
                        repository_id.as_str(),
                        group_id,
                        artifact_id,
                        version,
                        VERSION_LISTING_TYPE,
                    )
                })),
                Err(e) => warn!(
                    repository_id = %repository_id,
                    error = %e,
                    "Version lookup failed, skipping repository"
                ),
            }
        }

        // Stable: equal versions keep repository order
        artifacts.sort_by(|a, b| self.comparator.compare(&a.version, &b.version));

        Ok(artifacts)
    }

    #[instrument(skip(self, caller))]
    async fn get_dependencies(
        &self,
        caller: &dyn ObservableRepositories,
        group_id: &str,
        artifact_id: &str,
        version: &str,
    ) -> ServiceResult<Vec<DependencyEdge>> {
        let repository_ids = caller.observable_repository_ids().await?;

        match self
            .first_metadata(&repository_ids, group_id, artifact_id, version)
            .await
        {
            Some((repository_id, metadata)) => {
                debug!(repository_id = %repository_id, "Dependencies resolved");
                Ok(normalize_dependencies(&metadata))
            }
            None => Err(ServiceError::artifact_not_found(group_id, artifact_id, version)),
        }
    }

    #[instrument(skip(self, caller))]
    async fn get_dependency_tree(
        &self,
        caller: &dyn ObservableRepositories,
        group_id: &str,
        artifact_id: &str,
        version: &str,
        max_depth: usize,
    ) -> ServiceResult<DependencyTree> {
        let repository_ids = caller.observable_repository_ids().await?;
        let root = ProjectVersionKey::new(group_id, artifact_id, version);

        let (_, root_metadata) = self
            .first_metadata(&repository_ids, group_id, artifact_id, version)
            .await
            .ok_or_else(|| ServiceError::artifact_not_found(group_id, artifact_id, version))?;

        let mut tree = DependencyTree::new(root.clone());
        let mut visited: HashSet<ProjectVersionKey> = HashSet::from([root.clone()]);
        let mut queue: VecDeque<(ProjectVersionKey, usize, Vec<DependencyEdge>, bool)> =
            VecDeque::from([(root, 0, normalize_dependencies(&root_metadata), true)]);

        while let Some((key, depth, dependencies, resolved)) = queue.pop_front() {
            for dependency in &dependencies {
                let child = dependency.key();
                if visited.contains(&child) {
                    continue;
                }
                if depth >= max_depth {
                    tree.truncated = true;
                    continue;
                }
                visited.insert(child.clone());

                let child_metadata = self
                    .first_metadata(&repository_ids, &child.group_id, &child.artifact_id, &child.version)
                    .await;
                let (child_dependencies, child_resolved) = match child_metadata {
                    Some((_, metadata)) => (normalize_dependencies(&metadata), true),
                    None => {
                        debug!(dependency = %child, "Dependency not resolvable, keeping as leaf");
                        (Vec::new(), false)
                    }
                };
                queue.push_back((child, depth + 1, child_dependencies, child_resolved));
            }

            tree.add_node(DependencyNode {
                key,
                depth,
                dependencies,
                resolved,
            });
        }

        debug!(nodes = tree.len(), truncated = tree.truncated, "Dependency tree built");
        Ok(tree)
    }

    #[instrument(skip(self, caller))]
    async fn get_dependees(
        &self,
        caller: &dyn ObservableRepositories,
        group_id: &str,
        artifact_id: &str,
        version: &str,
    ) -> ServiceResult<Vec<ReferenceEdge>> {
        let repository_ids = caller.observable_repository_ids().await?;

        Ok(self
            .collect_references(&repository_ids, group_id, artifact_id, version)
            .await
            .into_iter()
            .map(|(_, edge)| edge)
            .collect())
    }

    #[instrument(skip(self, caller))]
    async fn get_dependee_artifacts(
        &self,
        caller: &dyn ObservableRepositories,
        group_id: &str,
        artifact_id: &str,
        version: &str,
    ) -> ServiceResult<Vec<ResolvedArtifact>> {
        let repository_ids = caller.observable_repository_ids().await?;

        Ok(self
            .collect_references(&repository_ids, group_id, artifact_id, version)
            .await
            .into_iter()
            .map(|(repository_id, edge)| {
                ResolvedArtifact::new(
                    repository_id,
                    edge.namespace,
                    edge.project_id,
                    edge.project_version,
                    "",
                )
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use artifact_search_core::{MavenProjectFacet, MetadataFacet, SearchHit, StoredArtifact};
    use artifact_search_store::{
        InMemoryArtifactStore, InMemoryMetadataResolver, InMemoryRepositorySearch, StaticRepositories,
        StoreError, StoreResult,
    };
    use chrono::Utc;
    use mockall::mock;
    use mockall::predicate::eq;

    mock! {
        Resolver {}

        #[async_trait]
        impl MetadataResolver for Resolver {
            async fn get_project_version(
                &self,
                repository_id: &str,
                group_id: &str,
                artifact_id: &str,
                version: &str,
            ) -> StoreResult<Option<ProjectVersionMetadata>>;

            async fn get_project_versions(
                &self,
                repository_id: &str,
                group_id: &str,
                artifact_id: &str,
            ) -> StoreResult<Vec<String>>;

            async fn get_project_references(
                &self,
                repository_id: &str,
                group_id: &str,
                artifact_id: &str,
                version: &str,
            ) -> StoreResult<Vec<ReferenceEdge>>;
        }
    }

    mock! {
        Search {}

        #[async_trait]
        impl RepositorySearch for Search {
            async fn search(
                &self,
                query: &str,
                repository_ids: &[String],
                limits: &SearchResultLimits,
            ) -> StoreResult<Vec<SearchHit>>;
        }
    }

    const GROUP: &str = "org.apache.archiva";
    const ARTIFACT: &str = "archiva-webapp";

    fn caller() -> StaticRepositories {
        StaticRepositories::new(["repo1.mirror", "internal"])
    }

    fn war_metadata(version: &str) -> ProjectVersionMetadata {
        ProjectVersionMetadata::new(version)
            .with_facet(MetadataFacet::Maven(MavenProjectFacet::with_packaging("war")))
    }

    fn hit(versions: &[&str]) -> SearchHit {
        versions
            .iter()
            .fold(SearchHit::new(GROUP, ARTIFACT), |acc, v| acc.with_version(*v))
    }

    fn service_with(
        search: Arc<dyn RepositorySearch>,
        resolver: Arc<dyn MetadataResolver>,
    ) -> DefaultSearchService {
        DefaultSearchService::new(search, resolver, Arc::new(InMemoryArtifactStore::new()))
    }

    fn in_memory_service(resolver: Arc<InMemoryMetadataResolver>) -> DefaultSearchService {
        service_with(Arc::new(InMemoryRepositorySearch::new()), resolver)
    }

    fn search_returning(hits: Vec<SearchHit>) -> MockSearch {
        let mut search = MockSearch::new();
        search
            .expect_search()
            .withf(|_, _, limits| limits.is_all_pages())
            .times(1)
            .return_once(move |_, _, _| Ok(hits));
        search
    }

    #[tokio::test]
    async fn test_quick_search_uses_packaging_of_first_repository() {
        let mut resolver = MockResolver::new();
        resolver
            .expect_get_project_version()
            .with(eq("repo1.mirror"), eq(GROUP), eq(ARTIFACT), eq("1.0"))
            .times(1)
            .returning(|_, _, _, v| Ok(Some(war_metadata(v))));
        resolver
            .expect_get_project_version()
            .with(eq("internal"), eq(GROUP), eq(ARTIFACT), eq("1.0"))
            .times(0);

        let service = service_with(Arc::new(search_returning(vec![hit(&["1.0"])])), Arc::new(resolver));
        let results = service.quick_search(&caller(), "archiva").await.unwrap();

        assert_eq!(
            results,
            vec![ResolvedArtifact::new("repo1.mirror", GROUP, ARTIFACT, "1.0", "war")]
        );
    }

    #[tokio::test]
    async fn test_quick_search_falls_through_to_second_repository() {
        let resolver = Arc::new(InMemoryMetadataResolver::new());
        resolver.add_version("internal", GROUP, ARTIFACT, ProjectVersionMetadata::new("1.0"));

        let service = service_with(Arc::new(search_returning(vec![hit(&["1.0"])])), resolver);
        let results = service.quick_search(&caller(), "archiva").await.unwrap();

        assert_eq!(
            results,
            vec![ResolvedArtifact::new("internal", GROUP, ARTIFACT, "1.0", "jar")]
        );
    }

    #[tokio::test]
    async fn test_quick_search_resolver_error_counts_as_absent() {
        let resolver = Arc::new(InMemoryMetadataResolver::new());
        resolver.fail_repository("repo1.mirror");
        resolver.add_version("internal", GROUP, ARTIFACT, war_metadata("1.0"));

        let service = service_with(Arc::new(search_returning(vec![hit(&["1.0"])])), resolver);
        let results = service.quick_search(&caller(), "archiva").await.unwrap();

        assert_eq!(results[0].repository_id, "internal");
        assert_eq!(results[0].artifact_type, "war");
    }

    #[tokio::test]
    async fn test_quick_search_resolver_error_consults_next_repository_once() {
        let mut resolver = MockResolver::new();
        resolver
            .expect_get_project_version()
            .with(eq("repo1.mirror"), eq(GROUP), eq(ARTIFACT), eq("1.0"))
            .times(1)
            .returning(|repository_id, _, _, _| {
                Err(StoreError::RepositoryUnavailable {
                    repository_id: repository_id.to_string(),
                    reason: "offline".to_string(),
                })
            });
        resolver
            .expect_get_project_version()
            .with(eq("internal"), eq(GROUP), eq(ARTIFACT), eq("1.0"))
            .times(1)
            .returning(|_, _, _, v| Ok(Some(war_metadata(v))));

        let service = service_with(Arc::new(search_returning(vec![hit(&["1.0"])])), Arc::new(resolver));
        let results = service.quick_search(&caller(), "archiva").await.unwrap();

        assert_eq!(
            results,
            vec![ResolvedArtifact::new("internal", GROUP, ARTIFACT, "1.0", "war")]
        );
    }

    #[tokio::test]
    async fn test_quick_search_unresolved_hit_uses_first_repository() {
        let resolver = Arc::new(InMemoryMetadataResolver::new());

        let service = service_with(Arc::new(search_returning(vec![hit(&["2.0"])])), resolver);
        let results = service.quick_search(&caller(), "archiva").await.unwrap();

        assert_eq!(
            results,
            vec![ResolvedArtifact::new("repo1.mirror", GROUP, ARTIFACT, "2.0", "jar")]
        );
    }

    #[tokio::test]
    async fn test_quick_search_preserves_hit_then_version_order() {
        let resolver = Arc::new(InMemoryMetadataResolver::new());
        resolver.add_version("internal", GROUP, ARTIFACT, ProjectVersionMetadata::new("1.1"));
        resolver.add_version("repo1.mirror", "org.example", "lib", war_metadata("3.0"));

        let hits = vec![hit(&["1.0", "1.1"]), SearchHit::new("org.example", "lib").with_version("3.0")];
        let service = service_with(Arc::new(search_returning(hits)), resolver);
        let results = service.quick_search(&caller(), "a").await.unwrap();

        let summary: Vec<(&str, &str, &str)> = results
            .iter()
            .map(|r| (r.artifact_id.as_str(), r.version.as_str(), r.repository_id.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (ARTIFACT, "1.0", "repo1.mirror"),
                (ARTIFACT, "1.1", "internal"),
                ("lib", "3.0", "repo1.mirror"),
            ]
        );
    }

    #[tokio::test]
    async fn test_quick_search_without_hits_makes_no_resolver_calls() {
        let mut resolver = MockResolver::new();
        resolver.expect_get_project_version().times(0);

        let service = service_with(Arc::new(search_returning(Vec::new())), Arc::new(resolver));
        let results = service.quick_search(&caller(), "nothing").await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_quick_search_without_repositories_skips_search() {
        let mut search = MockSearch::new();
        search.expect_search().times(0);

        let service = service_with(Arc::new(search), Arc::new(InMemoryMetadataResolver::new()));
        let results = service
            .quick_search(&StaticRepositories::default(), "archiva")
            .await
            .unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_quick_search_is_idempotent() {
        let resolver = Arc::new(InMemoryMetadataResolver::new());
        resolver.add_version("internal", GROUP, ARTIFACT, war_metadata("1.0"));
        let search = Arc::new(InMemoryRepositorySearch::new());
        let coordinate = artifact_search_core::ArtifactCoordinate::new(GROUP, ARTIFACT, "1.0");
        search.index("internal", &coordinate, vec![]);
        search.index("repo1.mirror", &coordinate, vec![]);

        let service = service_with(search, resolver);
        let first = service.quick_search(&caller(), "archiva").await.unwrap();
        let second = service.quick_search(&caller(), "archiva").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 1);
    }

    #[tokio::test]
    async fn test_find_by_checksum_maps_rows() {
        let store = Arc::new(InMemoryArtifactStore::new());
        store.record_artifact(StoredArtifact {
            repository_id: "internal".to_string(),
            group_id: GROUP.to_string(),
            artifact_id: ARTIFACT.to_string(),
            version: "1.0".to_string(),
            classifier: None,
            artifact_type: "war".to_string(),
            checksum: "3a0adc365f849366cd8b633cad155cb7".to_string(),
            size_bytes: 1024,
            when_gathered: Utc::now(),
        });
        let service = DefaultSearchService::new(
            Arc::new(InMemoryRepositorySearch::new()),
            Arc::new(InMemoryMetadataResolver::new()),
            store,
        );

        let results = service
            .find_by_checksum("3a0adc365f849366cd8b633cad155cb7")
            .await
            .unwrap();
        assert_eq!(
            results,
            vec![ResolvedArtifact::new("internal", GROUP, ARTIFACT, "1.0", "war")]
        );

        assert!(service.find_by_checksum("not-a-checksum").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_versions_merges_and_orders() {
        let resolver = Arc::new(InMemoryMetadataResolver::new());
        for v in ["1.0", "1.1-beta-2", "1.2"] {
            resolver.add_version("repo1.mirror", GROUP, ARTIFACT, ProjectVersionMetadata::new(v));
        }
        for v in ["1.1-beta-1", "1.1", "1.2.1-SNAPSHOT"] {
            resolver.add_version("internal", GROUP, ARTIFACT, ProjectVersionMetadata::new(v));
        }

        let service = in_memory_service(resolver);
        let results = service.list_versions(&caller(), GROUP, ARTIFACT).await.unwrap();

        let versions: Vec<&str> = results.iter().map(|r| r.version.as_str()).collect();
        assert_eq!(
            versions,
            vec!["1.0", "1.1-beta-1", "1.1-beta-2", "1.1", "1.2", "1.2.1-SNAPSHOT"]
        );
        assert!(results.iter().all(|r| r.artifact_type == VERSION_LISTING_TYPE));
        assert_eq!(results[1].repository_id, "internal");
        assert_eq!(results[2].repository_id, "repo1.mirror");
    }

    #[tokio::test]
    async fn test_list_versions_ties_keep_repository_order() {
        let resolver = Arc::new(InMemoryMetadataResolver::new());
        resolver.add_version("internal", GROUP, ARTIFACT, ProjectVersionMetadata::new("1.0"));
        resolver.add_version("repo1.mirror", GROUP, ARTIFACT, ProjectVersionMetadata::new("1.0"));

        let service = in_memory_service(resolver);
        let results = service.list_versions(&caller(), GROUP, ARTIFACT).await.unwrap();

        let repositories: Vec<&str> = results.iter().map(|r| r.repository_id.as_str()).collect();
        assert_eq!(repositories, vec!["repo1.mirror", "internal"]);
    }

    #[tokio::test]
    async fn test_list_versions_skips_failing_repository() {
        let resolver = Arc::new(InMemoryMetadataResolver::new());
        resolver.fail_repository("repo1.mirror");
        resolver.add_version("internal", GROUP, ARTIFACT, ProjectVersionMetadata::new("1.0"));

        let service = in_memory_service(resolver);
        let results = service.list_versions(&caller(), GROUP, ARTIFACT).await.unwrap();
        assert_eq!(
            results,
            vec![ResolvedArtifact::new("internal", GROUP, ARTIFACT, "1.0", "pom")]
        );
    }

    #[tokio::test]
    async fn test_get_dependencies_from_first_repository() {
        let resolver = Arc::new(InMemoryMetadataResolver::new());
        let mut with_empty_scope = DependencyEdge::new("commons-io", "commons-io", "2.4");
        with_empty_scope.scope = Some(String::new());
        resolver.add_version(
            "repo1.mirror",
            GROUP,
            ARTIFACT,
            ProjectVersionMetadata::new("1.0")
                .with_dependency(with_empty_scope)
                .with_dependency(DependencyEdge::new("junit", "junit", "3.8.1").with_scope("test")),
        );
        resolver.add_version(
            "internal",
            GROUP,
            ARTIFACT,
            ProjectVersionMetadata::new("1.0").with_dependency(DependencyEdge::new("other", "other", "1")),
        );

        let service = in_memory_service(resolver);
        let dependencies = service
            .get_dependencies(&caller(), GROUP, ARTIFACT, "1.0")
            .await
            .unwrap();

        assert_eq!(dependencies.len(), 2);
        assert_eq!(dependencies[0].artifact_id, "commons-io");
        assert!(dependencies[0].scope.is_none());
        assert_eq!(dependencies[1].scope.as_deref(), Some("test"));
    }

    #[tokio::test]
    async fn test_get_dependencies_missing_artifact() {
        let service = in_memory_service(Arc::new(InMemoryMetadataResolver::new()));
        let err = service
            .get_dependencies(&caller(), GROUP, ARTIFACT, "9.9")
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Artifact does not exist.");
    }

    #[tokio::test]
    async fn test_get_dependees_concatenates_repositories() {
        let resolver = Arc::new(InMemoryMetadataResolver::new());
        let dependee = ReferenceEdge::new(GROUP, "archiva-dependee-one", "1.0");
        resolver.add_reference("repo1.mirror", GROUP, ARTIFACT, "1.0", dependee.clone());
        resolver.add_reference("internal", GROUP, ARTIFACT, "1.0", dependee.clone());
        resolver.add_reference(
            "internal",
            GROUP,
            ARTIFACT,
            "1.0",
            ReferenceEdge::new(GROUP, "archiva-dependee-two", "1.0"),
        );

        let service = in_memory_service(resolver);
        let dependees = service
            .get_dependees(&caller(), GROUP, ARTIFACT, "1.0")
            .await
            .unwrap();

        assert_eq!(dependees.len(), 3);
        assert_eq!(dependees[0], dependee);
        assert_eq!(dependees[1], dependee);
        assert_eq!(dependees[2].project_id, "archiva-dependee-two");
    }

    #[tokio::test]
    async fn test_get_dependees_empty_is_not_an_error() {
        let service = in_memory_service(Arc::new(InMemoryMetadataResolver::new()));
        let dependees = service
            .get_dependees(&caller(), GROUP, ARTIFACT, "1.0")
            .await
            .unwrap();
        assert!(dependees.is_empty());
    }

    #[tokio::test]
    async fn test_get_dependees_skips_failing_repository() {
        let resolver = Arc::new(InMemoryMetadataResolver::new());
        resolver.fail_repository("repo1.mirror");
        resolver.add_reference(
            "internal",
            GROUP,
            ARTIFACT,
            "1.0",
            ReferenceEdge::new(GROUP, "archiva-dependee-one", "1.0"),
        );

        let service = in_memory_service(resolver);
        let dependees = service
            .get_dependees(&caller(), GROUP, ARTIFACT, "1.0")
            .await
            .unwrap();
        assert_eq!(dependees.len(), 1);
    }

    #[tokio::test]
    async fn test_get_dependee_artifacts_tags_repository() {
        let resolver = Arc::new(InMemoryMetadataResolver::new());
        resolver.add_reference(
            "internal",
            GROUP,
            ARTIFACT,
            "1.0",
            ReferenceEdge::new(GROUP, "archiva-dependee-one", "1.0"),
        );

        let service = in_memory_service(resolver);
        let artifacts = service
            .get_dependee_artifacts(&caller(), GROUP, ARTIFACT, "1.0")
            .await
            .unwrap();
        assert_eq!(
            artifacts,
            vec![ResolvedArtifact::new("internal", GROUP, "archiva-dependee-one", "1.0", "")]
        );
    }

    fn chain_resolver() -> Arc<InMemoryMetadataResolver> {
        // root -> a -> b -> root, root -> missing
        let resolver = Arc::new(InMemoryMetadataResolver::new());
        resolver.add_version(
            "internal",
            "g",
            "root",
            ProjectVersionMetadata::new("1.0")
                .with_dependency(DependencyEdge::new("g", "a", "1.0"))
                .with_dependency(DependencyEdge::new("g", "missing", "1.0")),
        );
        resolver.add_version(
            "internal",
            "g",
            "a",
            ProjectVersionMetadata::new("1.0").with_dependency(DependencyEdge::new("g", "b", "1.0")),
        );
        resolver.add_version(
            "repo1.mirror",
            "g",
            "b",
            ProjectVersionMetadata::new("1.0").with_dependency(DependencyEdge::new("g", "root", "1.0")),
        );
        resolver
    }

    #[tokio::test]
    async fn test_dependency_tree_breadth_first_with_cycle() {
        let service = in_memory_service(chain_resolver());
        let tree = service
            .get_dependency_tree(&caller(), "g", "root", "1.0", 10)
            .await
            .unwrap();

        let order: Vec<(&str, usize)> = tree
            .nodes
            .iter()
            .map(|n| (n.key.artifact_id.as_str(), n.depth))
            .collect();
        assert_eq!(order, vec![("root", 0), ("a", 1), ("missing", 1), ("b", 2)]);
        assert!(!tree.truncated);

        let missing = tree.node(&ProjectVersionKey::new("g", "missing", "1.0")).unwrap();
        assert!(!missing.resolved);
        assert!(missing.dependencies.is_empty());
    }

    #[tokio::test]
    async fn test_dependency_tree_depth_limit() {
        let service = in_memory_service(chain_resolver());
        let tree = service
            .get_dependency_tree(&caller(), "g", "root", "1.0", 1)
            .await
            .unwrap();

        assert_eq!(tree.len(), 3);
        assert!(tree.truncated);
        assert!(!tree.contains(&ProjectVersionKey::new("g", "b", "1.0")));
    }

    #[tokio::test]
    async fn test_dependency_tree_missing_root() {
        let service = in_memory_service(chain_resolver());
        let err = service
            .get_dependency_tree(&caller(), "g", "nothing", "1.0", 5)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_custom_comparator() {
        struct Lexical;
        impl VersionComparator for Lexical {
            fn compare(&self, a: &str, b: &str) -> std::cmp::Ordering {
                a.cmp(b)
            }
        }

        let resolver = Arc::new(InMemoryMetadataResolver::new());
        for v in ["1.10", "1.9"] {
            resolver.add_version("internal", GROUP, ARTIFACT, ProjectVersionMetadata::new(v));
        }
        let service = in_memory_service(resolver).with_comparator(Arc::new(Lexical));
        let results = service.list_versions(&caller(), GROUP, ARTIFACT).await.unwrap();

        let versions: Vec<&str> = results.iter().map(|r| r.version.as_str()).collect();
        assert_eq!(versions, vec!["1.10", "1.9"]);
    }
}
