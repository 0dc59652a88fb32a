// EquivalenceEngine — wires the resolver, documents, extractor and scorer
// into the two user-facing operations.
//
// find_equivalents:
// 1. Resolve ranked candidates (fatal on missing vectors)
// 2. Load and extract the source entity's features once
// 3. For each candidate, concurrently: load its document, extract its
//    features, score and explain against the source
// 4. A candidate whose step fails keeps its place in the ranking with no
//    comparison attached
//
// compare_pair: the same comparison for two explicitly named entities,
// using the cosine similarity of their stored vectors as the embedding score.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use futures::stream::{self, StreamExt};
use tracing::{info, warn};

use super::report::{Equivalent, EquivalenceReport};
use crate::analogy::vector::cosine_similarity;
use crate::analogy::{AnalogyCandidate, AnalogyResolver, ResolveError};
use crate::deadline;
use crate::documents::traits::DocumentSource;
use crate::features::{EntityProfile, FeatureExtractor};
use crate::index::traits::VectorLookup;
use crate::similarity::{ComparisonResult, SimilarityScorer};

pub struct EquivalenceEngine {
    resolver: AnalogyResolver,
    index: Arc<dyn VectorLookup>,
    documents: Arc<dyn DocumentSource>,
    extractor: Arc<dyn FeatureExtractor>,
    scorer: SimilarityScorer,
    /// Candidates compared in parallel
    concurrency: usize,
    /// Deadline for document and vector fetches made here
    call_timeout: Option<Duration>,
}

impl EquivalenceEngine {
    pub fn new(
        resolver: AnalogyResolver,
        index: Arc<dyn VectorLookup>,
        documents: Arc<dyn DocumentSource>,
        extractor: Arc<dyn FeatureExtractor>,
        scorer: SimilarityScorer,
    ) -> Self {
        let call_timeout = resolver.settings().call_timeout;
        Self {
            resolver,
            index,
            documents,
            extractor,
            scorer,
            concurrency: 4,
            call_timeout,
        }
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn resolver(&self) -> &AnalogyResolver {
        &self.resolver
    }

    /// Find the equivalents of `source_entity` in `target_group`.
    ///
    /// With `compare` unset only the ranked candidates are returned. Only
    /// resolution failures are errors; comparison failures are isolated per
    /// candidate.
    pub async fn find_equivalents(
        &self,
        source_entity: &str,
        source_group: &str,
        target_group: &str,
        top_k: usize,
        compare: bool,
    ) -> Result<EquivalenceReport, ResolveError> {
        let candidates = self
            .resolver
            .resolve(source_entity, source_group, target_group, top_k)
            .await?;

        let mut report = EquivalenceReport {
            source_entity: source_entity.to_string(),
            source_group: source_group.to_string(),
            target_group: target_group.to_string(),
            generated_at: Utc::now(),
            source_features: None,
            equivalents: Vec::with_capacity(candidates.len()),
        };

        if !compare || candidates.is_empty() {
            report.equivalents = candidates.into_iter().map(Equivalent::bare).collect();
            return Ok(report);
        }

        let source = match self.load_profile(source_entity, source_group, None).await {
            Ok(profile) => profile,
            Err(e) => {
                warn!(
                    entity = source_entity,
                    error = %e,
                    "Source document unavailable, returning candidates without comparisons"
                );
                report.equivalents = candidates.into_iter().map(Equivalent::bare).collect();
                return Ok(report);
            }
        };

        let source_ref = &source;
        report.equivalents = stream::iter(candidates.into_iter().map(|candidate| async move {
            match self.compare_candidate(source_ref, &candidate).await {
                Ok(comparison) => Equivalent {
                    candidate,
                    comparison: Some(comparison),
                },
                Err(e) => {
                    warn!(
                        candidate = %candidate.entity_id,
                        error = %e,
                        "Comparison failed, keeping candidate without explanation"
                    );
                    Equivalent::bare(candidate)
                }
            }
        }))
        .buffered(self.concurrency)
        .collect()
        .await;

        report.source_features = Some(source.features);

        info!(
            source = source_entity,
            equivalents = report.equivalents.len(),
            explained = report.explained_count(),
            "Equivalence report complete"
        );

        Ok(report)
    }

    /// Compare two named entities directly.
    pub async fn compare_pair(
        &self,
        source_entity: &str,
        source_group: &str,
        target_entity: &str,
        target_group: &str,
    ) -> Result<ComparisonResult> {
        let source_vector = self.vector(source_entity).await?;
        let target_vector = self.vector(target_entity).await?;
        let embedding_similarity = cosine_similarity(&source_vector, &target_vector);

        let source = self.load_profile(source_entity, source_group, None).await?;
        let target = self.load_profile(target_entity, target_group, None).await?;

        Ok(self.scorer.score(&source, &target, embedding_similarity).await)
    }

    async fn compare_candidate(
        &self,
        source: &EntityProfile,
        candidate: &AnalogyCandidate,
    ) -> Result<ComparisonResult> {
        let target = self
            .load_profile(&candidate.entity_id, &candidate.group, candidate.name.clone())
            .await?;
        Ok(self
            .scorer
            .score(source, &target, candidate.retrieval_score)
            .await)
    }

    async fn load_profile(
        &self,
        entity_id: &str,
        group: &str,
        name: Option<String>,
    ) -> Result<EntityProfile> {
        let document = deadline::within(
            self.call_timeout,
            "document fetch",
            self.documents.fetch(entity_id, group),
        )
        .await
        .with_context(|| format!("Failed to load document for {entity_id}"))?;

        let features = self.extractor.extract(&document, entity_id, group).await;
        Ok(EntityProfile::new(entity_id, group, features).with_name(name))
    }

    async fn vector(&self, entity_id: &str) -> Result<Vec<f32>> {
        deadline::within(self.call_timeout, "vector fetch", self.index.get_by_id(entity_id))
            .await?
            .with_context(|| format!("No vector stored for {entity_id}"))
    }
}
