// Colored terminal output for equivalence reports and comparisons.
//
// main.rs delegates all display work here.

use colored::Colorize;

use crate::pipeline::EquivalenceReport;
use crate::similarity::{Characteristics, ComparisonResult};

/// Display a ranked equivalence report.
pub fn display_report(report: &EquivalenceReport) {
    println!(
        "\n{}",
        format!(
            "=== Equivalents of {} ({}) in {} ===",
            report.source_entity, report.source_group, report.target_group
        )
        .bold()
    );

    if report.equivalents.is_empty() {
        println!("\n  No equivalent found in {}.", report.target_group);
        return;
    }

    println!();
    println!(
        "  {:>4}  {:<36} {:>9}  {:>7}",
        "Rank".dimmed(),
        "Entity".dimmed(),
        "Retrieval".dimmed(),
        "Overall".dimmed(),
    );
    println!("  {}", "-".repeat(62).dimmed());

    for (i, equivalent) in report.equivalents.iter().enumerate() {
        let candidate = &equivalent.candidate;
        let label = candidate.name.as_deref().unwrap_or(&candidate.entity_id);
        let overall = equivalent
            .comparison
            .as_ref()
            .map(|c| colorize_score(c.scores.overall).to_string())
            .unwrap_or_else(|| "-".dimmed().to_string());

        println!(
            "  {:>4}. {:<36} {:>9.3}  {:>7}",
            i + 1,
            super::truncate_chars(label, 36),
            candidate.retrieval_score,
            overall,
        );
    }

    for equivalent in &report.equivalents {
        if let Some(comparison) = &equivalent.comparison {
            let candidate = &equivalent.candidate;
            let label = candidate.name.as_deref().unwrap_or(&candidate.entity_id);
            println!("\n{}", format!("--- {label} ---").bold());
            display_comparison(comparison);
        }
    }
    println!();
}

/// Display one comparison's scores, characteristics and explanation.
pub fn display_comparison(comparison: &ComparisonResult) {
    let s = &comparison.scores;
    println!(
        "  Overall: {}  (theme {:.2}, attribute {:.2}, style {:.2})",
        colorize_score(s.overall),
        s.theme,
        s.attribute,
        s.style
    );

    display_characteristics("Shared", &comparison.shared);
    display_characteristics("Different", &comparison.differences);

    println!("\n  {}", comparison.explanation.italic());
}

fn display_characteristics(heading: &str, characteristics: &Characteristics) {
    if characteristics.is_empty() {
        return;
    }
    println!("  {heading}:");
    for (kind, items) in [
        ("themes", &characteristics.themes),
        ("attributes", &characteristics.attributes),
        ("style", &characteristics.style),
    ] {
        if !items.is_empty() {
            println!("    {:<11} {}", kind.dimmed(), items.join("; "));
        }
    }
}

fn colorize_score(score: f64) -> colored::ColoredString {
    let text = format!("{score:.3}");
    if score >= 0.75 {
        text.green().bold()
    } else if score >= 0.5 {
        text.yellow()
    } else {
        text.red()
    }
}
