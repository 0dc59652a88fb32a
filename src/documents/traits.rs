// Document source trait — fetch the text describing one entity.

use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Load the document for `entity_id` within `group`. Fails when no
    /// document exists.
    async fn fetch(&self, entity_id: &str, group: &str) -> Result<String>;
}
