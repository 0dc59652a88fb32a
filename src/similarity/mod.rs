// Similarity scoring — calibrated scores and auditable characteristic lists.

pub mod characteristics;
pub mod scorer;
pub mod scores;
pub mod sets;

pub use characteristics::Characteristics;
pub use scorer::{ComparisonResult, SimilarityScorer};
pub use scores::{ScoreWeights, Scores};
