// Case-insensitive set comparisons over free-text labels.
//
// Themes, topics and instruments are all compared the same way: lowercase,
// trim, treat as a set. Display output keeps the source record's spelling.

use std::collections::HashSet;

/// Canonical comparison form of a label.
pub fn normalize_term(term: &str) -> String {
    term.trim().to_lowercase()
}

/// Whether two single labels are equal once normalized.
pub fn same_term(a: &str, b: &str) -> bool {
    normalize_term(a) == normalize_term(b)
}

/// Normalized set of non-blank labels.
pub fn term_set<S: AsRef<str>>(terms: &[S]) -> HashSet<String> {
    terms
        .iter()
        .map(|t| normalize_term(t.as_ref()))
        .filter(|t| !t.is_empty())
        .collect()
}

/// Jaccard similarity of two label sets.
///
/// Both empty is 1.0 (nothing recorded on either side is identical).
/// Exactly one empty is 0.0: "no labels" is a real difference from
/// "some labels", not a vacuous match.
pub fn set_similarity<S: AsRef<str>, T: AsRef<str>>(a: &[S], b: &[T]) -> f64 {
    let set_a = term_set(a);
    let set_b = term_set(b);

    match (set_a.is_empty(), set_b.is_empty()) {
        (true, true) => return 1.0,
        (true, false) | (false, true) => return 0.0,
        (false, false) => {}
    }

    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.union(&set_b).count();
    intersection as f64 / union as f64
}

/// Labels from `source` that also appear in `target`, in source order and
/// spelling, without duplicates.
pub fn shared_terms<S: AsRef<str>, T: AsRef<str>>(source: &[S], target: &[T]) -> Vec<String> {
    let target_set = term_set(target);
    select_terms(source, |t| target_set.contains(t))
}

/// Labels from `source` missing from `target`. Only this direction is
/// reported.
pub fn missing_terms<S: AsRef<str>, T: AsRef<str>>(source: &[S], target: &[T]) -> Vec<String> {
    let target_set = term_set(target);
    select_terms(source, |t| !target_set.contains(t))
}

fn select_terms<S: AsRef<str>>(source: &[S], keep: impl Fn(&str) -> bool) -> Vec<String> {
    let mut seen = HashSet::new();
    source
        .iter()
        .map(|t| t.as_ref().trim())
        .filter(|t| !t.is_empty())
        .filter(|t| {
            let normalized = normalize_term(t);
            keep(&normalized) && seen.insert(normalized)
        })
        .map(str::to_string)
        .collect()
}

/// Ratio of shared meaningful words between two short descriptions.
///
/// Both strings are split on whitespace into lowercase word sets. Shared
/// words longer than three characters count; the total is divided by the
/// larger set. Returns `None` when either side has no words.
pub fn word_overlap(a: &str, b: &str) -> Option<f64> {
    let words_a: HashSet<String> = a.split_whitespace().map(str::to_lowercase).collect();
    let words_b: HashSet<String> = b.split_whitespace().map(str::to_lowercase).collect();

    if words_a.is_empty() || words_b.is_empty() {
        return None;
    }

    let shared = words_a
        .intersection(&words_b)
        .filter(|w| w.chars().count() > 3)
        .count();
    Some(shared as f64 / words_a.len().max(words_b.len()) as f64)
}
