// Structured feature records — what an entity's document says about it.
//
// A FeatureRecord is the strict contract every extractor output is
// normalized into before it reaches scoring. Absent fields mean "unknown"
// and are skipped by every comparison.

pub mod normalize;
pub mod profile;
pub mod record;
pub mod traits;

pub use profile::EntityProfile;
pub use record::{Attributes, Complexity, FeatureRecord, Style};
pub use traits::FeatureExtractor;
