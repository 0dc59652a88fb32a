// Language-model feature extractor.
//
// Asks the model for a JSON object describing the entity, pulls the first
// JSON object out of the reply, and folds it into a FeatureRecord through
// the loose normalizer. Any failure along the way (model error, timeout,
// unparseable reply) yields the degraded record instead of an error.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, warn};

use super::traits::TextGenerator;
use crate::deadline;
use crate::features::normalize::from_loose_json;
use crate::features::{FeatureExtractor, FeatureRecord};
use crate::output::truncate_chars;

/// Documents longer than this are cut before prompting.
const MAX_DOCUMENT_CHARS: usize = 12_000;

pub struct LlmFeatureExtractor {
    generator: Arc<dyn TextGenerator>,
    call_timeout: Option<Duration>,
}

impl LlmFeatureExtractor {
    pub fn new(generator: Arc<dyn TextGenerator>, call_timeout: Option<Duration>) -> Self {
        Self {
            generator,
            call_timeout,
        }
    }

    async fn try_extract(&self, document: &str, entity_id: &str, group: &str) -> Result<FeatureRecord> {
        let prompt = extraction_prompt(document, entity_id, group);
        let reply = deadline::within(
            self.call_timeout,
            "feature extraction",
            self.generator.generate(&prompt),
        )
        .await?;

        let json = first_json_object(&reply).context("Model reply contained no JSON object")?;
        let value: serde_json::Value =
            serde_json::from_str(json).context("Model reply JSON did not parse")?;
        Ok(from_loose_json(&value))
    }
}

#[async_trait]
impl FeatureExtractor for LlmFeatureExtractor {
    async fn extract(&self, document: &str, entity_id: &str, group: &str) -> FeatureRecord {
        match self.try_extract(document, entity_id, group).await {
            Ok(record) => {
                debug!(
                    entity = entity_id,
                    themes = record.themes.len(),
                    "Extracted features"
                );
                record
            }
            Err(e) => {
                warn!(entity = entity_id, error = %e, "Feature extraction degraded");
                FeatureRecord::degraded()
            }
        }
    }
}

fn extraction_prompt(document: &str, entity_id: &str, group: &str) -> String {
    format!(
        "Analyze the following document about \"{entity_id}\" (genre: {group}).\n\
         Respond with a single JSON object and nothing else, using this shape:\n\
         {{\n  \"themes\": [string],\n  \
         \"attributes\": {{\"tempo\": string, \"key\": string, \"mood\": string, \
         \"energy\": string, \"instrumentation\": [string]}},\n  \
         \"style\": {{\"complexity\": \"simple\" | \"moderate\" | \"complex\", \
         \"emotionalTone\": string, \"narrativeStyle\": string, \"commonTopics\": [string]}}\n}}\n\
         Omit any field the document gives no evidence for.\n\n\
         Document:\n{}",
        truncate_chars(document, MAX_DOCUMENT_CHARS)
    )
}

/// The outermost `{ ... }` span of a reply, tolerating code fences and
/// surrounding prose.
fn first_json_object(reply: &str) -> Option<&str> {
    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    (end > start).then(|| &reply[start..=end])
}
