//! Dependency and reference edges, and the dependency tree built from them
//!
//! A [`DependencyEdge`] is one outgoing dependency declared by a project
//! version. A [`ReferenceEdge`] points the other way: a project that declares
//! a dependency on the queried artifact. [`DependencyTree`] is the transitive
//! closure of dependency edges starting at one project version.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::coordinate::ProjectVersionKey;

fn none_if_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// One outgoing dependency of a project version
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencyEdge {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub dependency_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl DependencyEdge {
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
            dependency_type: None,
            scope: None,
        }
    }

    /// Set the scope; an empty scope is stored as absent
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = none_if_empty(Some(scope.into()));
        self
    }

    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        self.classifier = none_if_empty(Some(classifier.into()));
        self
    }

    pub fn with_type(mut self, dependency_type: impl Into<String>) -> Self {
        self.dependency_type = none_if_empty(Some(dependency_type.into()));
        self
    }

    /// Copy of this edge with empty optional fields mapped to absent
    pub fn normalized(&self) -> Self {
        Self {
            group_id: self.group_id.clone(),
            artifact_id: self.artifact_id.clone(),
            version: self.version.clone(),
            classifier: none_if_empty(self.classifier.clone()),
            dependency_type: none_if_empty(self.dependency_type.clone()),
            scope: none_if_empty(self.scope.clone()),
        }
    }

    pub fn key(&self) -> ProjectVersionKey {
        ProjectVersionKey::new(&self.group_id, &self.artifact_id, &self.version)
    }
}

impl fmt::Display for DependencyEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)?;
        if let Some(scope) = &self.scope {
            write!(f, " ({})", scope)?;
        }
        Ok(())
    }
}

/// A project version that references the queried artifact
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReferenceEdge {
    pub namespace: String,
    pub project_id: String,
    pub project_version: String,
}

impl ReferenceEdge {
    pub fn new(
        namespace: impl Into<String>,
        project_id: impl Into<String>,
        project_version: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            project_id: project_id.into(),
            project_version: project_version.into(),
        }
    }
}

impl fmt::Display for ReferenceEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.namespace, self.project_id, self.project_version)
    }
}

/// One expanded project version inside a dependency tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyNode {
    pub key: ProjectVersionKey,
    /// Distance from the root, the root itself has depth 0
    pub depth: usize,
    /// Direct dependencies; empty for leaves and unresolvable versions
    pub dependencies: Vec<DependencyEdge>,
    /// Whether any observable repository had metadata for this version
    pub resolved: bool,
}

/// Transitive dependency closure of one project version
///
/// Nodes are kept in breadth-first discovery order and each project version
/// appears at most once, so cyclic dependency declarations terminate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyTree {
    pub root: ProjectVersionKey,
    pub nodes: Vec<DependencyNode>,
    /// Set when expansion stopped at the depth limit with unexpanded children
    pub truncated: bool,
}

impl DependencyTree {
    pub fn new(root: ProjectVersionKey) -> Self {
        Self {
            root,
            nodes: Vec::new(),
            truncated: false,
        }
    }

    /// Append a node; returns false if the project version was already present
    pub fn add_node(&mut self, node: DependencyNode) -> bool {
        if self.contains(&node.key) {
            return false;
        }
        self.nodes.push(node);
        true
    }

    pub fn contains(&self, key: &ProjectVersionKey) -> bool {
        self.nodes.iter().any(|node| &node.key == key)
    }

    pub fn node(&self, key: &ProjectVersionKey) -> Option<&DependencyNode> {
        self.nodes.iter().find(|node| &node.key == key)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All project versions reachable from `key`, excluding `key` itself
    pub fn transitive_dependencies(&self, key: &ProjectVersionKey) -> HashSet<ProjectVersionKey> {
        let edges: HashMap<&ProjectVersionKey, &Vec<DependencyEdge>> =
            self.nodes.iter().map(|node| (&node.key, &node.dependencies)).collect();

        let mut all = HashSet::new();
        let mut visited = HashSet::new();
        let mut to_visit = vec![key.clone()];

        while let Some(current) = to_visit.pop() {
            if !visited.insert(current.clone()) {
                continue;
            }

            if let Some(deps) = edges.get(&current) {
                for dep in deps.iter() {
                    let dep_key = dep.key();
                    if &dep_key != key {
                        all.insert(dep_key.clone());
                    }
                    to_visit.push(dep_key);
                }
            }
        }

        all
    }

    /// Project versions in the tree that directly depend on `key`
    pub fn dependents(&self, key: &ProjectVersionKey) -> Vec<&ProjectVersionKey> {
        self.nodes
            .iter()
            .filter(|node| node.dependencies.iter().any(|dep| &dep.key() == key))
            .map(|node| &node.key)
            .collect()
    }
}

impl fmt::Display for DependencyTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DependencyTree({}, {} nodes)", self.root, self.len())
    }
}
