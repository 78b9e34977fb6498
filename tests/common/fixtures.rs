//! Test fixtures

use artifact_search_core::{
    ArtifactCoordinate, DependencyEdge, MavenProjectFacet, MetadataFacet, ProjectVersionMetadata,
};

pub const GROUP_ID: &str = "org.apache.archiva";

/// Coordinate in the shared test group
pub fn coordinate(artifact_id: &str, version: &str) -> ArtifactCoordinate {
    ArtifactCoordinate::new(GROUP_ID, artifact_id, version)
}

/// Version metadata declaring a packaging
pub fn metadata_with_packaging(version: &str, packaging: &str) -> ProjectVersionMetadata {
    ProjectVersionMetadata::new(version)
        .with_facet(MetadataFacet::Maven(MavenProjectFacet::with_packaging(packaging)))
}

/// Version metadata depending on the given artifacts of the shared group
pub fn metadata_with_dependencies(version: &str, dependencies: &[(&str, &str)]) -> ProjectVersionMetadata {
    dependencies
        .iter()
        .fold(ProjectVersionMetadata::new(version), |metadata, (artifact_id, dep_version)| {
            metadata.with_dependency(DependencyEdge::new(GROUP_ID, *artifact_id, *dep_version))
        })
}
