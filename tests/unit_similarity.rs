// Unit tests for similarity scoring.
//
// Tests isolated pure functions: theme Jaccard boundaries, attribute and
// style neutrality, the weighted overall score, and the worked
// breakup-song example end to end through compute_scores.

use crossover::features::{Attributes, Complexity, FeatureRecord, Style};
use crossover::similarity::characteristics::extract_characteristics;
use crossover::similarity::scores::{
    attribute_score, compute_scores, overall_score, style_score, theme_score, NEUTRAL_SCORE,
};
use crossover::similarity::ScoreWeights;

const EMPTY: [&str; 0] = [];

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn breakup_source() -> FeatureRecord {
    FeatureRecord {
        themes: strings(&["love", "loss"]),
        attributes: Attributes {
            energy: Some("high".to_string()),
            ..Default::default()
        },
        style: Style {
            complexity: Some(Complexity::Complex),
            emotional_tone: Some("bittersweet longing".to_string()),
            common_topics: Some(strings(&["breakup"])),
            ..Default::default()
        },
    }
}

fn breakup_target() -> FeatureRecord {
    FeatureRecord {
        themes: strings(&["loss", "hope"]),
        attributes: Attributes {
            energy: Some("high".to_string()),
            ..Default::default()
        },
        style: Style {
            complexity: Some(Complexity::Moderate),
            emotional_tone: Some("hopeful longing".to_string()),
            common_topics: Some(strings(&["breakup"])),
            ..Default::default()
        },
    }
}

// ============================================================
// theme_score — Jaccard boundaries
// ============================================================

#[test]
fn themes_both_empty_is_full_similarity() {
    assert!(approx(theme_score(&EMPTY, &EMPTY), 1.0));
}

#[test]
fn themes_one_side_empty_is_zero() {
    assert!(approx(theme_score(&EMPTY, &["x"]), 0.0));
    assert!(approx(theme_score(&["x"], &EMPTY), 0.0));
}

#[test]
fn themes_partial_overlap() {
    assert!(approx(theme_score(&["a", "b"], &["b", "c"]), 1.0 / 3.0));
}

#[test]
fn themes_symmetric() {
    let a = ["Love", "war", "home"];
    let b = ["love", "road"];
    assert!(approx(theme_score(&a, &b), theme_score(&b, &a)));
}

#[test]
fn themes_case_insensitive() {
    assert!(approx(theme_score(&["HEARTBREAK"], &[" heartbreak"]), 1.0));
}

// ============================================================
// attribute_score and style_score — neutral defaults
// ============================================================

#[test]
fn attributes_with_nothing_in_common_are_neutral() {
    let a = Attributes {
        tempo: Some("fast".to_string()),
        ..Default::default()
    };
    let b = Attributes {
        key: Some("C minor".to_string()),
        ..Default::default()
    };
    assert!(approx(attribute_score(&a, &b), NEUTRAL_SCORE));
}

#[test]
fn attributes_mismatch_counts_against() {
    let a = Attributes {
        tempo: Some("fast".to_string()),
        mood: Some("dark".to_string()),
        ..Default::default()
    };
    let b = Attributes {
        tempo: Some("Fast".to_string()),
        mood: Some("bright".to_string()),
        ..Default::default()
    };
    assert!(approx(attribute_score(&a, &b), 0.5));
}

#[test]
fn attributes_match_non_ascii_case_insensitively() {
    let a = Attributes {
        mood: Some("Ärgerlich".to_string()),
        ..Default::default()
    };
    let b = Attributes {
        mood: Some(" ärgerlich".to_string()),
        ..Default::default()
    };
    assert!(approx(attribute_score(&a, &b), 1.0));
    assert!(approx(
        attribute_score(&a, &b),
        theme_score(&["Ärgerlich"], &["ärgerlich"])
    ));
}

#[test]
fn non_ascii_attribute_match_is_shared() {
    let source = FeatureRecord {
        attributes: Attributes {
            mood: Some("Ärgerlich".to_string()),
            energy: Some("ÉLEVÉE".to_string()),
            ..Default::default()
        },
        ..Default::default()
    };
    let target = FeatureRecord {
        attributes: Attributes {
            mood: Some("ärgerlich".to_string()),
            energy: Some("élevée".to_string()),
            ..Default::default()
        },
        ..Default::default()
    };

    let (shared, differences) = extract_characteristics(&source, &target);
    assert_eq!(shared.attributes, vec!["Energy: ÉLEVÉE", "Mood: Ärgerlich"]);
    assert!(differences.attributes.is_empty());
}

#[test]
fn empty_styles_are_neutral() {
    assert!(approx(
        style_score(&Style::default(), &Style::default()),
        NEUTRAL_SCORE
    ));
}

#[test]
fn style_uses_only_comparable_units() {
    let a = Style {
        complexity: Some(Complexity::Simple),
        ..Default::default()
    };
    let b = Style {
        complexity: Some(Complexity::Simple),
        common_topics: Some(strings(&["summer"])),
        ..Default::default()
    };
    assert!(approx(style_score(&a, &b), 1.0));
}

// ============================================================
// overall_score — weighting and clamping
// ============================================================

#[test]
fn default_weights_sum_to_one() {
    let w = ScoreWeights::default();
    assert!(approx(w.embedding + w.theme + w.attribute + w.style, 1.0));
}

#[test]
fn all_perfect_inputs_give_one() {
    let overall = overall_score(1.0, 1.0, 1.0, 1.0, &ScoreWeights::default());
    assert!(approx(overall, 1.0));
}

#[test]
fn embedding_similarity_is_clamped() {
    let w = ScoreWeights::default();
    assert!(approx(
        overall_score(1.7, 0.0, 0.0, 0.0, &w),
        overall_score(1.0, 0.0, 0.0, 0.0, &w)
    ));
    assert!(approx(overall_score(-0.4, 0.0, 0.0, 0.0, &w), 0.0));
}

#[test]
fn custom_weights_are_respected() {
    let w = ScoreWeights {
        embedding: 0.0,
        theme: 1.0,
        attribute: 0.0,
        style: 0.0,
    };
    assert!(approx(overall_score(0.9, 0.25, 1.0, 1.0, &w), 0.25));
}

// ============================================================
// End to end: breakup songs
// ============================================================

#[test]
fn breakup_example_scores() {
    let scores = compute_scores(
        &breakup_source(),
        &breakup_target(),
        0.8,
        &ScoreWeights::default(),
    );

    assert!(approx(scores.theme, 1.0 / 3.0));
    assert!(approx(scores.attribute, 1.0));
    assert!(approx(scores.style, 0.5));
    assert!((scores.overall - 0.6917).abs() < 1e-4);
}

#[test]
fn breakup_example_characteristics() {
    let (shared, differences) = extract_characteristics(&breakup_source(), &breakup_target());

    assert_eq!(shared.themes, vec!["loss"]);
    assert_eq!(shared.attributes, vec!["Energy: high"]);
    assert_eq!(shared.style, vec!["Common topics: breakup"]);

    assert_eq!(differences.themes, vec!["love"]);
    assert!(differences.attributes.is_empty());
    assert_eq!(differences.style, vec!["Complexity: complex vs moderate"]);
}

#[test]
fn scores_stay_in_unit_range() {
    let scores = compute_scores(
        &FeatureRecord::degraded(),
        &breakup_target(),
        0.3,
        &ScoreWeights::default(),
    );
    for s in [scores.theme, scores.attribute, scores.style, scores.overall] {
        assert!((0.0..=1.0).contains(&s), "score out of range: {s}");
    }
}
