// Vector lookup trait — read-only access to the embedding index.
//
// The resolver only needs two reads: fetch a stored vector by id, and run a
// nearest-neighbor query. Backends (remote HTTP index, in-memory snapshot)
// normalize their own response shapes into VectorMatch before returning.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// What an indexed vector represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VectorKind {
    /// A first-class entity (an artist)
    Entity,
    /// The mean embedding of a group
    Centroid,
    /// Anything else stored in the index
    Auxiliary,
}

/// Normalized metadata attached to every match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorMetadata {
    pub kind: VectorKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Display name, when the index stores one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl VectorMetadata {
    pub fn entity(group: &str) -> Self {
        Self {
            kind: VectorKind::Entity,
            group: Some(group.to_string()),
            name: None,
        }
    }

    pub fn centroid(group: &str) -> Self {
        Self {
            kind: VectorKind::Centroid,
            group: Some(group.to_string()),
            name: None,
        }
    }

    /// Whether this vector belongs to `group`, ignoring case and surrounding whitespace.
    pub fn in_group(&self, group: &str) -> bool {
        self.group
            .as_deref()
            .is_some_and(|g| normalize_group(g) == normalize_group(group))
    }
}

/// Canonical form of a group label for comparisons and id building.
pub fn normalize_group(group: &str) -> String {
    group.trim().to_lowercase()
}

/// A single nearest-neighbor result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorMatch {
    pub id: String,
    pub score: f64,
    pub metadata: VectorMetadata,
}

/// Optional server-side restriction of a query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataFilter {
    pub kind: Option<VectorKind>,
    pub group: Option<String>,
}

impl MetadataFilter {
    pub fn matches(&self, metadata: &VectorMetadata) -> bool {
        if let Some(kind) = self.kind {
            if metadata.kind != kind {
                return false;
            }
        }
        match &self.group {
            Some(group) => metadata.in_group(group),
            None => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryOptions {
    pub top_k: usize,
    pub filter: Option<MetadataFilter>,
}

impl QueryOptions {
    pub fn top(top_k: usize) -> Self {
        Self { top_k, filter: None }
    }
}

/// Read-only vector index access. Implementations must be async because
/// production indexes sit behind HTTP APIs.
#[async_trait]
pub trait VectorLookup: Send + Sync {
    /// Fetch a stored vector. `Ok(None)` means the id is not in the index,
    /// which is distinct from a stored zero vector.
    async fn get_by_id(&self, id: &str) -> Result<Option<Vec<f32>>>;

    /// Nearest neighbors of `vector`, ordered by descending score.
    async fn query(&self, vector: &[f32], options: &QueryOptions) -> Result<Vec<VectorMatch>>;
}
