// Sub-scores and the combined similarity formula.
//
// Every sub-score lands in 0.0..=1.0. Only fields present on BOTH records
// take part in a comparison; when nothing is comparable the score is the
// neutral 0.5 rather than 0.0 or 1.0.
//
//   overall = 0.5 * embedding + 0.2 * theme + 0.15 * attribute + 0.15 * style
//
// The embedding signal already carries broad similarity; the structured
// scores are there to make it explainable.

use serde::{Deserialize, Serialize};

use super::sets::{same_term, set_similarity, word_overlap};
use crate::features::{Attributes, FeatureRecord, Style};

/// Score used when two records share no comparable fields.
pub const NEUTRAL_SCORE: f64 = 0.5;

/// Weights of the overall score. The defaults sum to exactly 1.0.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreWeights {
    pub embedding: f64,
    pub theme: f64,
    pub attribute: f64,
    pub style: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            embedding: 0.5,
            theme: 0.2,
            attribute: 0.15,
            style: 0.15,
        }
    }
}

/// All four scores of one comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    pub theme: f64,
    pub attribute: f64,
    pub style: f64,
    pub overall: f64,
}

/// Compute every sub-score plus the weighted overall score.
pub fn compute_scores(
    source: &FeatureRecord,
    target: &FeatureRecord,
    embedding_similarity: f64,
    weights: &ScoreWeights,
) -> Scores {
    let theme = theme_score(&source.themes, &target.themes);
    let attribute = attribute_score(&source.attributes, &target.attributes);
    let style = style_score(&source.style, &target.style);

    Scores {
        theme,
        attribute,
        style,
        overall: overall_score(embedding_similarity, theme, attribute, style, weights),
    }
}

/// Jaccard similarity of the normalized theme sets.
pub fn theme_score<S: AsRef<str>, T: AsRef<str>>(a: &[S], b: &[T]) -> f64 {
    set_similarity(a, b)
}

/// Fraction of comparable attributes that match.
///
/// Each scalar attribute present on both sides is one unit, matched
/// case-insensitively. Instrumentation present on both sides adds one more
/// unit worth the Jaccard similarity of the two sets.
pub fn attribute_score(a: &Attributes, b: &Attributes) -> f64 {
    let mut matches = 0.0;
    let mut total = 0.0;

    for ((_, value_a), (_, value_b)) in a.scalars().into_iter().zip(b.scalars()) {
        if let (Some(x), Some(y)) = (value_a, value_b) {
            total += 1.0;
            if same_term(x, y) {
                matches += 1.0;
            }
        }
    }

    if let (Some(x), Some(y)) = (&a.instrumentation, &b.instrumentation) {
        total += 1.0;
        matches += set_similarity(x, y);
    }

    if total > 0.0 {
        matches / total
    } else {
        NEUTRAL_SCORE
    }
}

/// Mean of up to three style comparisons: complexity equality, emotional
/// tone word overlap, and common-topic Jaccard.
pub fn style_score(a: &Style, b: &Style) -> f64 {
    let mut units = Vec::with_capacity(3);

    if let (Some(x), Some(y)) = (a.complexity, b.complexity) {
        units.push(if x == y { 1.0 } else { 0.0 });
    }

    if let (Some(x), Some(y)) = (&a.emotional_tone, &b.emotional_tone) {
        if let Some(overlap) = word_overlap(x, y) {
            units.push(overlap);
        }
    }

    if let (Some(x), Some(y)) = (&a.common_topics, &b.common_topics) {
        units.push(set_similarity(x, y));
    }

    if units.is_empty() {
        NEUTRAL_SCORE
    } else {
        units.iter().sum::<f64>() / units.len() as f64
    }
}

/// Weighted combination. The embedding similarity is clamped to 0.0..=1.0.
pub fn overall_score(
    embedding_similarity: f64,
    theme: f64,
    attribute: f64,
    style: f64,
    weights: &ScoreWeights,
) -> f64 {
    weights.embedding * embedding_similarity.clamp(0.0, 1.0)
        + weights.theme * theme
        + weights.attribute * attribute
        + weights.style * style
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::Complexity;

    #[test]
    fn test_attribute_score_neutral_when_nothing_comparable() {
        let a = Attributes {
            tempo: Some("fast".to_string()),
            ..Default::default()
        };
        let b = Attributes {
            mood: Some("dark".to_string()),
            ..Default::default()
        };
        assert_eq!(attribute_score(&a, &b), NEUTRAL_SCORE);
    }

    #[test]
    fn test_attribute_score_fractional_instrumentation() {
        let a = Attributes {
            energy: Some("High".to_string()),
            instrumentation: Some(vec!["guitar".to_string(), "drums".to_string()]),
            ..Default::default()
        };
        let b = Attributes {
            energy: Some("high".to_string()),
            instrumentation: Some(vec!["Drums".to_string(), "synth".to_string()]),
            ..Default::default()
        };
        // (1 + 1/3) / 2
        assert!((attribute_score(&a, &b) - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_attribute_score_mismatch() {
        let a = Attributes {
            key: Some("C minor".to_string()),
            tempo: Some("slow".to_string()),
            ..Default::default()
        };
        let b = Attributes {
            key: Some("c minor".to_string()),
            tempo: Some("fast".to_string()),
            ..Default::default()
        };
        assert!((attribute_score(&a, &b) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_style_score_neutral_when_nothing_comparable() {
        let a = Style {
            complexity: Some(Complexity::Simple),
            ..Default::default()
        };
        assert_eq!(style_score(&a, &Style::default()), NEUTRAL_SCORE);
    }

    #[test]
    fn test_style_score_counts_only_present_units() {
        let a = Style {
            complexity: Some(Complexity::Simple),
            narrative_style: Some("first person".to_string()),
            ..Default::default()
        };
        let b = Style {
            complexity: Some(Complexity::Simple),
            common_topics: Some(vec!["cars".to_string()]),
            ..Default::default()
        };
        assert_eq!(style_score(&a, &b), 1.0);
    }

    #[test]
    fn test_style_topics_one_side_empty() {
        let a = Style {
            common_topics: Some(vec![]),
            ..Default::default()
        };
        let b = Style {
            common_topics: Some(vec!["cars".to_string()]),
            ..Default::default()
        };
        assert_eq!(style_score(&a, &b), 0.0);
    }

    #[test]
    fn test_default_weights_sum_to_one() {
        let w = ScoreWeights::default();
        assert_eq!(w.embedding + w.theme + w.attribute + w.style, 1.0);
    }

    #[test]
    fn test_overall_clamps_embedding() {
        let w = ScoreWeights::default();
        assert_eq!(overall_score(1.7, 1.0, 1.0, 1.0, &w), 1.0);
        assert_eq!(overall_score(-0.3, 0.0, 0.0, 0.0, &w), 0.0);
    }
}
