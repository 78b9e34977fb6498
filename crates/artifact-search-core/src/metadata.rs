//! Version metadata returned by metadata resolvers and rows held by the artifact store

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::dependency::DependencyEdge;

/// Maven build facet attached to a project version
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MavenProjectFacet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact_id: Option<String>,
    /// Declared packaging, e.g. `jar`, `war`, `maven-plugin`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packaging: Option<String>,
}

impl MavenProjectFacet {
    /// Facet identifier under which resolvers publish this facet
    pub const FACET_ID: &'static str = "org.apache.archiva.metadata.repository.storage.maven2.project";

    pub fn with_packaging(packaging: impl Into<String>) -> Self {
        Self {
            packaging: Some(packaging.into()),
            ..Default::default()
        }
    }
}

/// Typed extension block on version metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MetadataFacet {
    /// Maven project facet describing packaging
    Maven(MavenProjectFacet),
    /// Any other facet, kept as opaque properties
    Generic {
        facet_id: String,
        #[serde(default)]
        properties: BTreeMap<String, String>,
    },
}

impl MetadataFacet {
    pub fn facet_id(&self) -> &str {
        match self {
            MetadataFacet::Maven(_) => MavenProjectFacet::FACET_ID,
            MetadataFacet::Generic { facet_id, .. } => facet_id,
        }
    }
}

/// Metadata for one project version in one repository
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProjectVersionMetadata {
    /// Version identifier
    pub id: String,

    /// Outgoing dependencies in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<DependencyEdge>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub facets: Vec<MetadataFacet>,
}

impl ProjectVersionMetadata {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn add_dependency(&mut self, dependency: DependencyEdge) {
        self.dependencies.push(dependency);
    }

    pub fn with_dependency(mut self, dependency: DependencyEdge) -> Self {
        self.add_dependency(dependency);
        self
    }

    /// Add a facet, replacing any facet with the same identifier
    pub fn add_facet(&mut self, facet: MetadataFacet) {
        self.facets.retain(|existing| existing.facet_id() != facet.facet_id());
        self.facets.push(facet);
    }

    pub fn with_facet(mut self, facet: MetadataFacet) -> Self {
        self.add_facet(facet);
        self
    }

    pub fn facet(&self, facet_id: &str) -> Option<&MetadataFacet> {
        self.facets.iter().find(|facet| facet.facet_id() == facet_id)
    }

    pub fn maven_facet(&self) -> Option<&MavenProjectFacet> {
        self.facets.iter().find_map(|facet| match facet {
            MetadataFacet::Maven(maven) => Some(maven),
            _ => None,
        })
    }

    /// Packaging declared by the Maven facet, if any
    pub fn packaging(&self) -> Option<&str> {
        self.maven_facet()
            .and_then(|facet| facet.packaging.as_deref())
            .filter(|packaging| !packaging.is_empty())
    }
}

/// Artifact row held by the persistent artifact store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredArtifact {
    pub repository_id: String,
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier: Option<String>,
    #[serde(rename = "type")]
    pub artifact_type: String,
    /// Checksum value of the archive, lowercase hex
    pub checksum: String,
    #[serde(default)]
    pub size_bytes: u64,
    pub when_gathered: DateTime<Utc>,
}
