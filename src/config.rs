use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::index::client::DEFAULT_ENTITY_KIND;
use crate::index::DEFAULT_CENTROID_PREFIX;
use crate::llm::client::{DEFAULT_LLM_API_URL, DEFAULT_LLM_MODEL};

/// Where vectors are read from.
#[derive(Debug, Clone, PartialEq)]
pub enum IndexBackend {
    /// Hosted index over HTTP (VECTOR_INDEX_URL)
    Remote { url: String, api_key: String },
    /// JSON snapshot loaded into memory (CROSSOVER_INDEX_SNAPSHOT)
    Snapshot(PathBuf),
}

/// Central configuration loaded from environment variables.
///
/// Secrets come from env vars only. A .env file is loaded at startup via
/// dotenvy.
pub struct Config {
    /// Selected index backend, if any is configured
    pub index_backend: Option<IndexBackend>,
    /// Metadata `type` label marking entity vectors (default "entity")
    pub entity_kind: String,
    /// Id prefix of group centroids (default "centroid_")
    pub centroid_prefix: String,
    pub llm_api_url: String,
    /// Empty means no model: explanations and extraction use fallbacks
    pub llm_api_key: String,
    pub llm_model: String,
    /// Root of the `<group>/<entity>.md` document tree
    pub document_dir: PathBuf,
    /// Deadline for each external call
    pub call_timeout: Duration,
    /// Candidates compared in parallel
    pub concurrency: usize,
    /// Fixed perturbation seed for reproducible runs
    pub seed: Option<u64>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A remote index URL wins over a snapshot path when both are set.
    pub fn load() -> Result<Self> {
        let index_backend = match (
            non_empty("VECTOR_INDEX_URL"),
            non_empty("CROSSOVER_INDEX_SNAPSHOT"),
        ) {
            (Some(url), _) => Some(IndexBackend::Remote {
                url,
                api_key: env::var("VECTOR_INDEX_API_KEY").unwrap_or_default(),
            }),
            (None, Some(path)) => Some(IndexBackend::Snapshot(PathBuf::from(path))),
            (None, None) => None,
        };

        let call_timeout_secs: u64 = parse_var("CROSSOVER_QUERY_TIMEOUT_SECS")?.unwrap_or(10);
        let concurrency: usize = parse_var("CROSSOVER_CONCURRENCY")?.unwrap_or(4);

        Ok(Self {
            index_backend,
            entity_kind: non_empty("CROSSOVER_ENTITY_KIND")
                .unwrap_or_else(|| DEFAULT_ENTITY_KIND.to_string()),
            centroid_prefix: non_empty("CROSSOVER_CENTROID_PREFIX")
                .unwrap_or_else(|| DEFAULT_CENTROID_PREFIX.to_string()),
            llm_api_url: non_empty("LLM_API_URL").unwrap_or_else(|| DEFAULT_LLM_API_URL.to_string()),
            llm_api_key: env::var("LLM_API_KEY").unwrap_or_default(),
            llm_model: non_empty("LLM_MODEL").unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string()),
            document_dir: non_empty("CROSSOVER_DOCUMENT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./documents")),
            call_timeout: Duration::from_secs(call_timeout_secs.max(1)),
            concurrency: concurrency.max(1),
            seed: parse_var("CROSSOVER_SEED")?,
        })
    }

    /// Check that some vector index is configured.
    /// Call this before any operation that reads vectors.
    pub fn require_index(&self) -> Result<&IndexBackend> {
        self.index_backend.as_ref().ok_or_else(|| {
            anyhow::anyhow!(
                "No vector index configured. Set VECTOR_INDEX_URL (hosted index) or\n\
                 CROSSOVER_INDEX_SNAPSHOT (local JSON snapshot) in your .env file."
            )
        })
    }

    /// Whether a language model is configured.
    pub fn has_llm(&self) -> bool {
        !self.llm_api_key.is_empty()
    }
}

fn non_empty(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_var<T>(name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    non_empty(name)
        .map(|v| {
            v.parse::<T>()
                .with_context(|| format!("{name} must be a number, got '{v}'"))
        })
        .transpose()
}
