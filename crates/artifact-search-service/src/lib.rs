//! Service layer for Artifact Search
//!
//! This crate sits between the collaborators defined in
//! `artifact-search-store` and the command-line front end.
//!
//! # Architecture
//!
//! - **ArchiveInspector**: Checksum and entry listing of an artifact archive
//! - **IndexRecordFactory**: Builds index records for indexable artifact types
//! - **SearchService**: Quick search, checksum lookup, version listing and
//!   dependency queries merged across observable repositories
//!
//! # Example
//!
//! ```rust,no_run
//! use artifact_search_service::{DefaultSearchService, SearchService};
//! use artifact_search_store::{
//!     InMemoryArtifactStore, InMemoryMetadataResolver, InMemoryRepositorySearch,
//!     StaticRepositories,
//! };
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = DefaultSearchService::new(
//!     Arc::new(InMemoryRepositorySearch::new()),
//!     Arc::new(InMemoryMetadataResolver::new()),
//!     Arc::new(InMemoryArtifactStore::new()),
//! );
//!
//! let caller = StaticRepositories::new(["internal", "snapshots"]);
//! let artifacts = service.quick_search(&caller, "commons-io").await?;
//! # let _ = artifacts;
//! # Ok(())
//! # }
//! ```

pub mod archive;
pub mod error;
pub mod indexing;
pub mod search;

pub use archive::{hash_data, ArchiveContents, ArchiveInspector};
pub use error::{ArchiveError, ServiceError, ServiceResult};
pub use indexing::{class_names, ArtifactDescriptor, IndexRecordFactory, IndexerConfig};
pub use search::{DefaultSearchService, SearchService, VERSION_LISTING_TYPE};

use artifact_search_store::{ArtifactStore, MetadataResolver, RepositorySearch};
use std::sync::Arc;

/// Holds the indexing and search services built from one set of collaborators
#[derive(Clone)]
pub struct ServiceRegistry {
    /// Search service
    pub search: Arc<dyn SearchService>,
    /// Index record factory
    pub indexer: Arc<IndexRecordFactory>,
}

impl ServiceRegistry {
    /// Create a registry with default implementations
    pub fn new(
        search: Arc<dyn RepositorySearch>,
        resolver: Arc<dyn MetadataResolver>,
        store: Arc<dyn ArtifactStore>,
        indexer_config: IndexerConfig,
    ) -> Self {
        Self {
            search: Arc::new(DefaultSearchService::new(search, resolver, store)),
            indexer: Arc::new(IndexRecordFactory::new(indexer_config)),
        }
    }

    pub fn search(&self) -> &Arc<dyn SearchService> {
        &self.search
    }

    pub fn indexer(&self) -> &Arc<IndexRecordFactory> {
        &self.indexer
    }
}
