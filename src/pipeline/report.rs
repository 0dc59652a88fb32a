// Report types returned to callers of the equivalence pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analogy::AnalogyCandidate;
use crate::features::FeatureRecord;
use crate::similarity::ComparisonResult;

/// Ranked equivalents of one source entity in a target group.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquivalenceReport {
    pub source_entity: String,
    pub source_group: String,
    pub target_group: String,
    pub generated_at: DateTime<Utc>,
    /// Features of the source entity; absent when comparisons were not run
    /// or its document could not be loaded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_features: Option<FeatureRecord>,
    pub equivalents: Vec<Equivalent>,
}

/// One candidate plus its comparison, when one could be produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Equivalent {
    #[serde(flatten)]
    pub candidate: AnalogyCandidate,
    #[serde(default)]
    pub comparison: Option<ComparisonResult>,
}

impl Equivalent {
    pub fn bare(candidate: AnalogyCandidate) -> Self {
        Self {
            candidate,
            comparison: None,
        }
    }

    pub fn explanation(&self) -> Option<&str> {
        self.comparison.as_ref().map(|c| c.explanation.as_str())
    }
}

impl EquivalenceReport {
    /// Number of equivalents that carry a comparison.
    pub fn explained_count(&self) -> usize {
        self.equivalents
            .iter()
            .filter(|e| e.comparison.is_some())
            .count()
    }
}
