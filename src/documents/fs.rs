// Filesystem document store.
//
// Layout: `<root>/<group>/<entity_id>.md`, falling back to `.txt`. The group
// directory name is the normalized group label, so "Hip Hop" and "hip hop"
// resolve to the same folder.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::debug;

use super::traits::DocumentSource;
use crate::index::traits::normalize_group;

const EXTENSIONS: [&str; 2] = ["md", "txt"];

pub struct FsDocumentStore {
    root: PathBuf,
}

impl FsDocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn candidates(&self, entity_id: &str, group: &str) -> Vec<PathBuf> {
        let dir = self.root.join(normalize_group(group));
        EXTENSIONS
            .iter()
            .map(|ext| dir.join(format!("{entity_id}.{ext}")))
            .collect()
    }
}

#[async_trait]
impl DocumentSource for FsDocumentStore {
    async fn fetch(&self, entity_id: &str, group: &str) -> Result<String> {
        // Ids and group labels come from the index; keep them from escaping the root
        if !is_plain_segment(entity_id) {
            anyhow::bail!("Invalid entity id for document lookup: {entity_id}");
        }
        if !is_plain_segment(&normalize_group(group)) {
            anyhow::bail!("Invalid group for document lookup: {group}");
        }

        for path in self.candidates(entity_id, group) {
            if tokio::fs::try_exists(&path).await.unwrap_or(false) {
                let text = tokio::fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("Failed to read document {}", path.display()))?;
                debug!(entity = entity_id, path = %path.display(), "Loaded document");
                return Ok(text);
            }
        }

        anyhow::bail!(
            "No document for {entity_id} in {} (looked for .md and .txt)",
            self.root.join(normalize_group(group)).display()
        )
    }
}

/// A single non-empty path component that cannot climb out of its parent.
fn is_plain_segment(segment: &str) -> bool {
    !segment.is_empty() && !segment.contains(['/', '\\']) && !segment.starts_with('.')
}
