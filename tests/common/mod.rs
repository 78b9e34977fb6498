//! Common test utilities and helpers
//!
//! Builds throwaway repositories in the default Maven 2 layout and wires the
//! search service over in-memory collaborators.

#![allow(dead_code)]

use artifact_search_core::ArtifactCoordinate;
use artifact_search_service::DefaultSearchService;
use artifact_search_store::{
    InMemoryArtifactStore, InMemoryMetadataResolver, InMemoryRepositorySearch,
};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

pub mod fixtures;

/// A repository directory that is removed when dropped
pub struct TestRepository {
    dir: TempDir,
}

impl TestRepository {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write a zip archive for `coordinate` holding `entries`
    pub fn publish(&self, coordinate: &ArtifactCoordinate, entries: &[&str]) -> PathBuf {
        let path = self.root().join(coordinate.repository_path());
        std::fs::create_dir_all(path.parent().expect("artifact path has a parent"))
            .expect("Failed to create artifact directory");

        let file = std::fs::File::create(&path).expect("Failed to create archive");
        let mut writer = zip::ZipWriter::new(file);
        for entry in entries {
            writer
                .start_file(*entry, SimpleFileOptions::default())
                .expect("Failed to start entry");
            writer.write_all(entry.as_bytes()).expect("Failed to write entry");
        }
        writer.finish().expect("Failed to finish archive");
        path
    }
}

/// Search service plus handles on its in-memory collaborators
pub struct TestServices {
    pub search: Arc<InMemoryRepositorySearch>,
    pub resolver: Arc<InMemoryMetadataResolver>,
    pub store: Arc<InMemoryArtifactStore>,
    pub service: DefaultSearchService,
}

impl TestServices {
    pub fn new() -> Self {
        let search = Arc::new(InMemoryRepositorySearch::new());
        let resolver = Arc::new(InMemoryMetadataResolver::new());
        let store = Arc::new(InMemoryArtifactStore::new());
        let service = DefaultSearchService::new(search.clone(), resolver.clone(), store.clone());

        Self {
            search,
            resolver,
            store,
            service,
        }
    }
}
