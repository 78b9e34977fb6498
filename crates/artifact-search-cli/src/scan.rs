//! Repository traversal for the `index` command

use anyhow::{ensure, Context, Result};
use artifact_search_core::{ArtifactCoordinate, ArtifactIndexRecord, StoredArtifact};
use artifact_search_service::{ArtifactDescriptor, IndexRecordFactory};
use chrono::Utc;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// One indexed artifact, printed as a JSON line
#[derive(Debug, Clone, Serialize)]
pub struct IndexedArtifact {
    pub repository_id: String,
    pub coordinate: ArtifactCoordinate,
    pub record: ArtifactIndexRecord,
}

impl IndexedArtifact {
    /// Row for the artifact store
    pub fn to_stored(&self) -> StoredArtifact {
        StoredArtifact {
            repository_id: self.repository_id.clone(),
            group_id: self.coordinate.group_id.clone(),
            artifact_id: self.coordinate.artifact_id.clone(),
            version: self.coordinate.version.clone(),
            classifier: self.coordinate.classifier.clone(),
            artifact_type: self.coordinate.artifact_type.clone(),
            checksum: self.record.checksum.value.clone(),
            size_bytes: self.record.size_bytes,
            when_gathered: Utc::now(),
        }
    }
}

/// Walk `root` and build records for every indexable artifact in the default layout
///
/// Files outside the layout (metadata, checksum sidecars) are skipped, as are
/// artifacts the factory declines. Entries that cannot be read are logged and
/// skipped; only a missing or unreadable root fails the scan.
pub fn scan_repository(
    root: &Path,
    repository_id: &str,
    factory: &IndexRecordFactory,
) -> Result<Vec<IndexedArtifact>> {
    ensure!(root.is_dir(), "Repository root {} is not a directory", root.display());

    let mut indexed = Vec::new();
    let mut seen = 0usize;
    let mut skipped = 0usize;

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                return Err(e).with_context(|| format!("Failed to walk {}", root.display()));
            }
            Err(e) => {
                warn!(error = %e, "Skipping unreadable repository entry");
                skipped += 1;
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        seen += 1;

        let relative = entry
            .path()
            .strip_prefix(root)
            .with_context(|| format!("{} is outside {}", entry.path().display(), root.display()))?
            .to_string_lossy()
            .replace('\\', "/");

        let Some(coordinate) = ArtifactCoordinate::from_repository_path(&relative) else {
            debug!(path = %relative, "Not an artifact path");
            continue;
        };

        let descriptor = ArtifactDescriptor::new(coordinate, Some(entry.path().to_path_buf()))
            .with_repository_path(relative);
        if let Some(record) = factory.create_record(&descriptor) {
            indexed.push(IndexedArtifact {
                repository_id: repository_id.to_string(),
                coordinate: descriptor.coordinate,
                record,
            });
        }
    }

    info!(
        root = %root.display(),
        files = seen,
        skipped,
        indexed = indexed.len(),
        "Repository scan complete"
    );
    Ok(indexed)
}
