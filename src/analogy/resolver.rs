// AnalogyResolver — source entity + two groups -> ranked equivalents.
//
// 1. Fetch the entity vector and both group centroids (all required)
// 2. Build the analogy vector: entity - source centroid + target centroid
// 3. Query the index with the exact analogy vector, then with a few
//    slightly perturbed copies of it
// 4. Merge the results, keeping the first occurrence of each id
// 5. Sort by retrieval score, keep only entities in the target group,
//    take the top K

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::error::{MissingVector, ResolveError};
use super::vector::{analogy_vector, component_scale, perturb};
use crate::deadline;
use crate::index::centroid_id;
use crate::index::traits::{QueryOptions, VectorKind, VectorLookup, VectorMatch};
use crate::index::DEFAULT_CENTROID_PREFIX;

/// A ranked equivalent found in the target group. Created per query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalogyCandidate {
    pub entity_id: String,
    pub group: String,
    /// Nearest-neighbor similarity, 0.0 to 1.0
    pub retrieval_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Tunables for a resolver.
#[derive(Debug, Clone)]
pub struct ResolverSettings {
    /// Total nearest-neighbor queries per resolution: one exact, the rest perturbed (default 3)
    pub query_count: usize,
    /// Matches requested per query (default 50)
    pub pool_size: usize,
    /// Perturbation amplitude as a fraction of the analogy vector's mean
    /// absolute component (default 0.001)
    pub perturbation: f32,
    /// Prefix of centroid ids in the index (default "centroid_")
    pub centroid_prefix: String,
    /// Deadline applied to each index call
    pub call_timeout: Option<Duration>,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            query_count: 3,
            pool_size: 50,
            perturbation: 0.001,
            centroid_prefix: DEFAULT_CENTROID_PREFIX.to_string(),
            call_timeout: Some(Duration::from_secs(10)),
        }
    }
}

pub struct AnalogyResolver {
    index: Arc<dyn VectorLookup>,
    settings: ResolverSettings,
    rng: Mutex<StdRng>,
}

impl AnalogyResolver {
    /// Resolver whose perturbation noise is seeded from the OS.
    pub fn new(index: Arc<dyn VectorLookup>, settings: ResolverSettings) -> Self {
        Self::with_rng(index, settings, StdRng::from_os_rng())
    }

    /// Resolver with reproducible perturbation noise.
    pub fn with_seed(index: Arc<dyn VectorLookup>, settings: ResolverSettings, seed: u64) -> Self {
        Self::with_rng(index, settings, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(index: Arc<dyn VectorLookup>, settings: ResolverSettings, rng: StdRng) -> Self {
        Self {
            index,
            settings,
            rng: Mutex::new(rng),
        }
    }

    pub fn settings(&self) -> &ResolverSettings {
        &self.settings
    }

    /// Find up to `top_k` entities in `target_group` that play the role
    /// `source_entity_id` plays in `source_group`.
    ///
    /// An empty list means nothing in the target group survived filtering;
    /// it is not an error.
    pub async fn resolve(
        &self,
        source_entity_id: &str,
        source_group: &str,
        target_group: &str,
        top_k: usize,
    ) -> Result<Vec<AnalogyCandidate>, ResolveError> {
        let source_centroid_id = centroid_id(&self.settings.centroid_prefix, source_group);
        let target_centroid_id = centroid_id(&self.settings.centroid_prefix, target_group);

        let v_e = self.fetch(source_entity_id, MissingVector::SourceEntity).await?;
        let c_src = self.fetch(&source_centroid_id, MissingVector::SourceCentroid).await?;
        let c_tgt = self.fetch(&target_centroid_id, MissingVector::TargetCentroid).await?;

        let v_eq = analogy_vector(
            (source_entity_id, v_e.as_slice()),
            (source_centroid_id.as_str(), c_src.as_slice()),
            (target_centroid_id.as_str(), c_tgt.as_slice()),
        )?;

        let anchors = self.anchors(&v_eq);
        let options = QueryOptions::top(self.settings.pool_size);
        let mut batches = Vec::with_capacity(anchors.len());

        for (i, anchor) in anchors.iter().enumerate() {
            let result = deadline::within(
                self.settings.call_timeout,
                "vector query",
                self.index.query(anchor, &options),
            )
            .await;

            match result {
                Ok(matches) => {
                    debug!(query = i, matches = matches.len(), "Analogy query returned");
                    batches.push(matches);
                }
                // The exact query is the one that matters; perturbed ones only widen coverage
                Err(e) if i == 0 => return Err(ResolveError::Lookup(e)),
                Err(e) => {
                    warn!(query = i, error = %e, "Perturbed analogy query failed, skipping");
                }
            }
        }

        let pool = merge_first_seen(batches);
        let candidates = rank_candidates(pool, target_group, top_k);

        info!(
            source = source_entity_id,
            source_group = source_group,
            target_group = target_group,
            candidates = candidates.len(),
            "Resolved analogy"
        );

        Ok(candidates)
    }

    async fn fetch(&self, id: &str, kind: MissingVector) -> Result<Vec<f32>, ResolveError> {
        deadline::within(self.settings.call_timeout, "vector fetch", self.index.get_by_id(id))
            .await
            .map_err(ResolveError::Lookup)?
            .ok_or_else(|| ResolveError::NotFound {
                kind,
                id: id.to_string(),
            })
    }

    /// The exact analogy vector followed by `query_count - 1` perturbed copies.
    fn anchors(&self, v_eq: &[f32]) -> Vec<Vec<f32>> {
        let count = self.settings.query_count.max(1);
        let scale = match component_scale(v_eq) {
            s if s > 0.0 && s.is_finite() => s,
            _ => 1.0,
        };
        let amplitude = self.settings.perturbation * scale;

        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut anchors = Vec::with_capacity(count);
        anchors.push(v_eq.to_vec());
        for _ in 1..count {
            anchors.push(perturb(v_eq, amplitude, &mut *rng));
        }
        anchors
    }
}

/// Concatenate query results in order, keeping only the first match seen
/// for each id. A later, higher-scoring duplicate does not replace it.
pub fn merge_first_seen(batches: Vec<Vec<VectorMatch>>) -> Vec<VectorMatch> {
    let mut seen = HashSet::new();
    batches
        .into_iter()
        .flatten()
        .filter(|m| seen.insert(m.id.clone()))
        .collect()
}

/// Sort by descending retrieval score, keep first-class entities of the
/// target group, and take the first `top_k`.
pub fn rank_candidates(
    mut pool: Vec<VectorMatch>,
    target_group: &str,
    top_k: usize,
) -> Vec<AnalogyCandidate> {
    pool.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    pool.into_iter()
        .filter(|m| m.metadata.kind == VectorKind::Entity && m.metadata.in_group(target_group))
        .take(top_k)
        .map(|m| AnalogyCandidate {
            group: m
                .metadata
                .group
                .map(|g| g.trim().to_string())
                .unwrap_or_else(|| target_group.trim().to_string()),
            retrieval_score: m.score.clamp(0.0, 1.0),
            name: m.metadata.name,
            entity_id: m.id,
        })
        .collect()
}
