// Shared and differing characteristics — the human-auditable side output.
//
// Independent of the scores: these lists are what a reader checks to see
// why two entities were called equivalent.

use serde::{Deserialize, Serialize};

use super::sets::{missing_terms, same_term, shared_terms};
use crate::features::FeatureRecord;

/// Characteristic strings grouped by kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Characteristics {
    pub themes: Vec<String>,
    pub attributes: Vec<String>,
    pub style: Vec<String>,
}

impl Characteristics {
    pub fn is_empty(&self) -> bool {
        self.themes.is_empty() && self.attributes.is_empty() && self.style.is_empty()
    }
}

/// Compare two records and return `(shared, differences)`.
///
/// Theme differences are source-to-target only. Attribute differences are
/// reported for tempo and energy; a mood mismatch is not listed.
pub fn extract_characteristics(
    source: &FeatureRecord,
    target: &FeatureRecord,
) -> (Characteristics, Characteristics) {
    let mut shared = Characteristics {
        themes: shared_terms(&source.themes, &target.themes),
        ..Default::default()
    };
    let mut differences = Characteristics {
        themes: missing_terms(&source.themes, &target.themes),
        ..Default::default()
    };

    let src = &source.attributes;
    let tgt = &target.attributes;
    let compared = [
        ("Tempo", &src.tempo, &tgt.tempo, true),
        ("Energy", &src.energy, &tgt.energy, true),
        ("Mood", &src.mood, &tgt.mood, false),
    ];
    for (label, a, b, report_mismatch) in compared {
        if let (Some(a), Some(b)) = (a, b) {
            if same_term(a, b) {
                shared.attributes.push(format!("{label}: {}", a.trim()));
            } else if report_mismatch {
                differences.attributes.push(format!("{} vs {}", a.trim(), b.trim()));
            }
        }
    }

    if let (Some(a), Some(b)) = (&src.instrumentation, &tgt.instrumentation) {
        let instruments = shared_terms(a, b);
        if !instruments.is_empty() {
            shared
                .attributes
                .push(format!("Instrumentation: {}", instruments.join(", ")));
        }
    }

    if let (Some(a), Some(b)) = (source.style.complexity, target.style.complexity) {
        if a == b {
            shared.style.push(format!("Complexity: {a}"));
        } else {
            differences.style.push(format!("Complexity: {a} vs {b}"));
        }
    }

    if let (Some(a), Some(b)) = (&source.style.common_topics, &target.style.common_topics) {
        let topics = shared_terms(a, b);
        if !topics.is_empty() {
            shared.style.push(format!("Common topics: {}", topics.join(", ")));
        }
    }

    (shared, differences)
}
