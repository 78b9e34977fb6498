//! Index records derived from artifact archives

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::checksum::Checksum;

/// Searchable fingerprint of one archive
///
/// Built once when an artifact is published and never mutated afterwards.
/// Equality compares every field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactIndexRecord {
    /// Checksum of the raw archive bytes
    pub checksum: Checksum,

    /// Path of the archive relative to its repository root
    pub archive_path: String,

    /// Last modification time of the archive file
    pub last_modified: DateTime<Utc>,

    /// Archive size in bytes
    pub size_bytes: u64,

    /// Fully qualified class names in archive entry order
    pub class_names: Vec<String>,
}

impl ArtifactIndexRecord {
    /// Newline-joined class list as stored in the index, each name followed by `\n`
    pub fn classes(&self) -> String {
        let mut joined = String::with_capacity(self.class_names.iter().map(|c| c.len() + 1).sum());
        for class in &self.class_names {
            joined.push_str(class);
            joined.push('\n');
        }
        joined
    }

    /// Whether the archive declares the given fully qualified class
    pub fn contains_class(&self, class_name: &str) -> bool {
        self.class_names.iter().any(|c| c == class_name)
    }
}
