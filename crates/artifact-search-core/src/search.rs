//! Search hits, result windows and the resolved artifact view

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::coordinate::{ArtifactCoordinate, ProjectVersionKey};
use crate::metadata::StoredArtifact;

/// One group+artifact match from the search index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub group_id: String,
    pub artifact_id: String,
    /// Candidate versions in index order, without duplicates
    pub versions: Vec<String>,
    /// Repository the index associated with the hit, if it recorded one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository_hint: Option<String>,
}

impl SearchHit {
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            versions: Vec::new(),
            repository_hint: None,
        }
    }

    /// Add a candidate version, ignoring duplicates
    pub fn add_version(&mut self, version: impl Into<String>) {
        let version = version.into();
        if !self.versions.contains(&version) {
            self.versions.push(version);
        }
    }

    /// Builder form of [`SearchHit::add_version`]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.add_version(version);
        self
    }

    pub fn with_repository_hint(mut self, repository_id: impl Into<String>) -> Self {
        self.repository_hint = Some(repository_id.into());
        self
    }

    /// Identifier grouping hits for the same project, `groupId:artifactId`
    pub fn hit_id(&self) -> String {
        format!("{}:{}", self.group_id, self.artifact_id)
    }
}

/// Result window passed to the search index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultLimits {
    /// Hits per page; `None` requests every page at once
    pub page_size: Option<usize>,
    /// Zero-based page index, ignored when all pages are requested
    pub selected_page: usize,
}

impl SearchResultLimits {
    /// Default page size for paged queries
    pub const DEFAULT_PAGE_SIZE: usize = 30;

    /// Window covering all pages
    pub fn all_pages() -> Self {
        Self {
            page_size: None,
            selected_page: 0,
        }
    }

    /// Window over a single page
    pub fn page(selected_page: usize, page_size: usize) -> Self {
        Self {
            page_size: Some(page_size),
            selected_page,
        }
    }

    pub fn is_all_pages(&self) -> bool {
        self.page_size.is_none()
    }

    /// Slice bounds `(start, end)` this window selects from `total` hits
    pub fn bounds(&self, total: usize) -> (usize, usize) {
        match self.page_size {
            None => (0, total),
            Some(size) => {
                let start = self.selected_page.saturating_mul(size).min(total);
                let end = start.saturating_add(size).min(total);
                (start, end)
            }
        }
    }
}

impl Default for SearchResultLimits {
    fn default() -> Self {
        Self::page(0, Self::DEFAULT_PAGE_SIZE)
    }
}

/// Artifact view returned to callers
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedArtifact {
    /// Repository that supplied the metadata, or the first one consulted
    pub repository_id: String,
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    /// Resolved packaging
    #[serde(rename = "type")]
    pub artifact_type: String,
}

impl ResolvedArtifact {
    pub fn new(
        repository_id: impl Into<String>,
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
        artifact_type: impl Into<String>,
    ) -> Self {
        Self {
            repository_id: repository_id.into(),
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            artifact_type: artifact_type.into(),
        }
    }

    pub fn key(&self) -> ProjectVersionKey {
        ProjectVersionKey::new(&self.group_id, &self.artifact_id, &self.version)
    }

    pub fn coordinate(&self) -> ArtifactCoordinate {
        ArtifactCoordinate::new(&self.group_id, &self.artifact_id, &self.version)
            .with_type(&self.artifact_type)
    }
}

impl From<StoredArtifact> for ResolvedArtifact {
    fn from(row: StoredArtifact) -> Self {
        Self {
            repository_id: row.repository_id,
            group_id: row.group_id,
            artifact_id: row.artifact_id,
            version: row.version,
            artifact_type: row.artifact_type,
        }
    }
}

impl fmt::Display for ResolvedArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{} ({})",
            self.group_id, self.artifact_id, self.version, self.artifact_type, self.repository_id
        )
    }
}
