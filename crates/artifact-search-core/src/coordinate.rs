//! Artifact coordinates and the default repository layout
//!
//! A coordinate names one artifact inside a repository. Two coordinates are the
//! same artifact when group, artifact and version agree; classifier and type
//! are attributes carried along for path computation and display.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

use crate::error::{Result, SearchError};

/// Packaging assumed when no metadata facet overrides it
pub const DEFAULT_ARTIFACT_TYPE: &str = "jar";

fn identifier_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9_.\-]+$").expect("identifier pattern is valid"))
}

/// Identity of a project version: `(groupId, artifactId, version)`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectVersionKey {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}

impl ProjectVersionKey {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for ProjectVersionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}

/// Full artifact coordinate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactCoordinate {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier: Option<String>,
    #[serde(rename = "type", default = "default_type")]
    pub artifact_type: String,
}

fn default_type() -> String {
    DEFAULT_ARTIFACT_TYPE.to_string()
}

impl ArtifactCoordinate {
    /// Create a coordinate with the default `jar` type and no classifier
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            classifier: None,
            artifact_type: default_type(),
        }
    }

    /// Set the packaging type
    pub fn with_type(mut self, artifact_type: impl Into<String>) -> Self {
        self.artifact_type = artifact_type.into();
        self
    }

    /// Set the classifier; an empty classifier clears it
    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        let classifier = classifier.into();
        self.classifier = if classifier.is_empty() {
            None
        } else {
            Some(classifier)
        };
        self
    }

    /// Identity key of this coordinate
    pub fn key(&self) -> ProjectVersionKey {
        ProjectVersionKey::new(&self.group_id, &self.artifact_id, &self.version)
    }

    /// Validate identifiers and version
    pub fn validate(&self) -> Result<()> {
        for (label, value) in [("groupId", &self.group_id), ("artifactId", &self.artifact_id)] {
            if value.is_empty() {
                return Err(SearchError::InvalidCoordinate(format!("{} cannot be empty", label)));
            }
            if !identifier_pattern().is_match(value) {
                return Err(SearchError::InvalidCoordinate(format!(
                    "{} '{}' contains invalid characters",
                    label, value
                )));
            }
        }

        if self.version.trim().is_empty() {
            return Err(SearchError::InvalidCoordinate("version cannot be empty".to_string()));
        }

        Ok(())
    }

    /// File extension used for this coordinate's type in the repository layout
    pub fn extension(&self) -> &str {
        match self.artifact_type.as_str() {
            "maven-plugin" | "ejb" | "ejb-client" | "test-jar" | "java-source" | "javadoc" => "jar",
            other => other,
        }
    }

    /// Path of this artifact relative to a repository root in the default layout
    ///
    /// `org.example:lib:1.0:sources:jar` maps to
    /// `org/example/lib/1.0/lib-1.0-sources.jar`.
    pub fn repository_path(&self) -> String {
        let mut path = format!(
            "{}/{}/{}/{}-{}",
            self.group_id.replace('.', "/"),
            self.artifact_id,
            self.version,
            self.artifact_id,
            self.version
        );
        if let Some(classifier) = &self.classifier {
            path.push('-');
            path.push_str(classifier);
        }
        path.push('.');
        path.push_str(self.extension());
        path
    }

    /// Parse a repository-relative path in the default layout
    ///
    /// Returns `None` for paths that do not follow the layout, such as
    /// metadata files or checksums stored next to artifacts.
    pub fn from_repository_path(path: &str) -> Option<Self> {
        let normalized = path.replace('\\', "/");
        let parts: Vec<&str> = normalized.trim_matches('/').split('/').collect();
        if parts.len() < 4 {
            return None;
        }

        let filename = parts[parts.len() - 1];
        let version = parts[parts.len() - 2];
        let artifact_id = parts[parts.len() - 3];
        let group_id = parts[..parts.len() - 3].join(".");

        let prefix = format!("{}-{}", artifact_id, version);
        let remainder = filename.strip_prefix(&prefix)?;

        let (classifier, extension) = if let Some(ext) = remainder.strip_prefix('.') {
            (None, ext)
        } else {
            let rest = remainder.strip_prefix('-')?;
            let (classifier, ext) = rest.split_once('.')?;
            (Some(classifier.to_string()), ext)
        };

        if extension.is_empty() || extension.contains('.') {
            return None;
        }

        let coordinate = Self {
            group_id,
            artifact_id: artifact_id.to_string(),
            version: version.to_string(),
            classifier,
            artifact_type: extension.to_string(),
        };

        coordinate.validate().ok()?;
        Some(coordinate)
    }
}

impl PartialEq for ArtifactCoordinate {
    fn eq(&self, other: &Self) -> bool {
        self.group_id == other.group_id
            && self.artifact_id == other.artifact_id
            && self.version == other.version
    }
}

impl Eq for ArtifactCoordinate {}

impl Hash for ArtifactCoordinate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.group_id.hash(state);
        self.artifact_id.hash(state);
        self.version.hash(state);
    }
}

impl fmt::Display for ArtifactCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)?;
        if let Some(classifier) = &self.classifier {
            write!(f, ":{}", classifier)?;
        }
        write!(f, ":{}", self.artifact_type)
    }
}
