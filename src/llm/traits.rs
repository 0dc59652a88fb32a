// Text generator trait — the single narrow seam to a language model.
//
// Everything that needs prose (explanations) or structured extraction
// goes through `generate(prompt)`. Callers own the fallback behavior.

use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Complete `prompt` and return the raw response text.
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Generator used when no model is configured. Always fails, which sends
/// every caller down its deterministic fallback path.
pub struct OfflineGenerator;

#[async_trait]
impl TextGenerator for OfflineGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        anyhow::bail!("No language model configured (set LLM_API_KEY to enable one)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_offline_generator_always_fails() {
        assert!(OfflineGenerator.generate("anything").await.is_err());
    }
}
