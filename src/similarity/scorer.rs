// SimilarityScorer — two feature records plus an embedding score in,
// a complete ComparisonResult out.
//
// Scoring and characteristic extraction are pure; only the explanation
// step touches the outside world, and it cannot fail.

use serde::{Deserialize, Serialize};

use super::characteristics::{extract_characteristics, Characteristics};
use super::scores::{compute_scores, ScoreWeights, Scores};
use crate::explain::ExplanationComposer;
use crate::features::EntityProfile;

/// The full, immutable result of comparing a source entity with one equivalent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub explanation: String,
    pub scores: Scores,
    pub shared: Characteristics,
    pub differences: Characteristics,
}

pub struct SimilarityScorer {
    weights: ScoreWeights,
    composer: ExplanationComposer,
}

impl SimilarityScorer {
    pub fn new(composer: ExplanationComposer) -> Self {
        Self::with_weights(composer, ScoreWeights::default())
    }

    pub fn with_weights(composer: ExplanationComposer, weights: ScoreWeights) -> Self {
        Self { weights, composer }
    }

    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    /// Score `target` against `source` and explain the result.
    ///
    /// `embedding_similarity` is clamped to 0.0..=1.0.
    pub async fn score(
        &self,
        source: &EntityProfile,
        target: &EntityProfile,
        embedding_similarity: f64,
    ) -> ComparisonResult {
        let scores = compute_scores(
            &source.features,
            &target.features,
            embedding_similarity,
            &self.weights,
        );
        let (shared, differences) = extract_characteristics(&source.features, &target.features);
        let explanation = self.composer.compose(source, target, &shared).await;

        ComparisonResult {
            explanation,
            scores,
            shared,
            differences,
        }
    }
}
