// Error taxonomy for analogy resolution.

use std::fmt;

/// Which required vector was missing from the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingVector {
    SourceEntity,
    SourceCentroid,
    TargetCentroid,
}

impl fmt::Display for MissingVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MissingVector::SourceEntity => "source entity vector",
            MissingVector::SourceCentroid => "source group centroid",
            MissingVector::TargetCentroid => "target group centroid",
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// A vector the analogy needs is absent from the index. Fatal: no
    /// partial result is meaningful without all three.
    #[error("{kind} not found in index: {id}")]
    NotFound { kind: MissingVector, id: String },

    /// Stored vectors disagree on dimensionality (index corruption or
    /// misconfiguration).
    #[error("dimension mismatch for {id}: expected {expected}, got {actual}")]
    DimensionMismatch {
        id: String,
        expected: usize,
        actual: usize,
    },

    /// The analogy vector left the f32 range (stored vectors too large).
    #[error("analogy vector for {id} is not finite at component {index}")]
    NonFinite { id: String, index: usize },

    /// The index itself failed or timed out.
    #[error("vector index lookup failed: {0:#}")]
    Lookup(anyhow::Error),
}
