// Feature extractor trait — document text in, FeatureRecord out.
//
// The signature is infallible. An implementation that hits an internal
// error logs it and returns FeatureRecord::degraded(), so scoring always
// has a well-formed record to work with.

use async_trait::async_trait;

use super::record::FeatureRecord;

#[async_trait]
pub trait FeatureExtractor: Send + Sync {
    /// Extract structured features for `entity_id` (a member of `group`)
    /// from its document text.
    async fn extract(&self, document: &str, entity_id: &str, group: &str) -> FeatureRecord;
}
