// In-memory vector index — brute-force cosine search over a JSON snapshot.
//
// Good enough for a few thousand artists and for tests. Snapshots are plain
// JSON so they can be exported from a hosted index and inspected by hand.
// Group centroids can be (re)computed here from member vectors, producing
// the same id scheme the resolver expects.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::centroid_id;
use super::traits::{QueryOptions, VectorKind, VectorLookup, VectorMatch, VectorMetadata};
use crate::analogy::vector::{cosine_similarity, mean_vector};

/// One stored vector with its metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexedVector {
    pub id: String,
    pub values: Vec<f32>,
    pub metadata: VectorMetadata,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryIndex {
    vectors: Vec<IndexedVector>,
}

impl InMemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a snapshot written by `save_snapshot` (or exported elsewhere).
    pub fn load_snapshot(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read index snapshot {}", path.display()))?;
        let index: Self = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse index snapshot {}", path.display()))?;
        debug!(path = %path.display(), vectors = index.len(), "Loaded index snapshot");
        Ok(index)
    }

    pub fn save_snapshot(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string(self).context("Failed to serialize index snapshot")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write index snapshot {}", path.display()))
    }

    /// Insert a vector, replacing any existing vector with the same id.
    pub fn insert(&mut self, id: &str, values: Vec<f32>, metadata: VectorMetadata) {
        self.vectors.retain(|v| v.id != id);
        self.vectors.push(IndexedVector {
            id: id.to_string(),
            values,
            metadata,
        });
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Replace all centroid vectors with fresh means of each group's entities.
    ///
    /// Returns the number of centroids written. Fails if a group's members
    /// disagree on dimensionality.
    pub fn rebuild_centroids(&mut self, prefix: &str) -> Result<usize> {
        let mut members: BTreeMap<String, (String, Vec<&[f32]>)> = BTreeMap::new();
        for v in &self.vectors {
            if v.metadata.kind != VectorKind::Entity {
                continue;
            }
            if let Some(group) = &v.metadata.group {
                members
                    .entry(super::traits::normalize_group(group))
                    .or_insert_with(|| (group.trim().to_string(), Vec::new()))
                    .1
                    .push(&v.values);
            }
        }

        let mut centroids = Vec::with_capacity(members.len());
        for (normalized, (label, vectors)) in &members {
            let mean = mean_vector(vectors).with_context(|| {
                format!("Members of group '{normalized}' have inconsistent dimensions")
            })?;
            centroids.push(IndexedVector {
                id: centroid_id(prefix, label),
                values: mean,
                metadata: VectorMetadata::centroid(label),
            });
        }

        drop(members);

        let written = centroids.len();
        self.vectors.retain(|v| v.metadata.kind != VectorKind::Centroid);
        self.vectors.extend(centroids);
        debug!(centroids = written, "Rebuilt group centroids");
        Ok(written)
    }
}

#[async_trait]
impl VectorLookup for InMemoryIndex {
    async fn get_by_id(&self, id: &str) -> Result<Option<Vec<f32>>> {
        Ok(self
            .vectors
            .iter()
            .find(|v| v.id == id)
            .map(|v| v.values.clone()))
    }

    async fn query(&self, vector: &[f32], options: &QueryOptions) -> Result<Vec<VectorMatch>> {
        let mut matches: Vec<VectorMatch> = self
            .vectors
            .iter()
            .filter(|v| {
                options
                    .filter
                    .as_ref()
                    .map_or(true, |f| f.matches(&v.metadata))
            })
            .map(|v| VectorMatch {
                id: v.id.clone(),
                score: cosine_similarity(vector, &v.values),
                metadata: v.metadata.clone(),
            })
            .collect();

        matches.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        matches.truncate(options.top_k);
        Ok(matches)
    }
}
