// ExplanationComposer — prose rationale for an equivalence.
//
// Builds a prompt from both entities' feature summaries and the computed
// shared characteristics, then asks the text generator for a short
// explanation. A failed call, a timeout, and a blank reply all take the
// same templated fallback, which never fails and never returns empty text.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::deadline;
use crate::features::EntityProfile;
use crate::llm::traits::TextGenerator;
use crate::similarity::characteristics::Characteristics;

/// Shared themes named by the fallback sentence.
const FALLBACK_THEME_LIMIT: usize = 3;

pub struct ExplanationComposer {
    generator: Arc<dyn TextGenerator>,
    call_timeout: Option<Duration>,
}

impl ExplanationComposer {
    pub fn new(generator: Arc<dyn TextGenerator>, call_timeout: Option<Duration>) -> Self {
        Self {
            generator,
            call_timeout,
        }
    }

    /// Explain why `target` is the equivalent of `source`.
    pub async fn compose(
        &self,
        source: &EntityProfile,
        target: &EntityProfile,
        shared: &Characteristics,
    ) -> String {
        let prompt = explanation_prompt(source, target, shared);
        let result = deadline::within(
            self.call_timeout,
            "explanation generation",
            self.generator.generate(&prompt),
        )
        .await;

        match result {
            Ok(text) if !text.trim().is_empty() => {
                debug!(
                    source = %source.entity_id,
                    target = %target.entity_id,
                    "Generated explanation"
                );
                text.trim().to_string()
            }
            Ok(_) => {
                warn!(
                    source = %source.entity_id,
                    target = %target.entity_id,
                    "Empty explanation from model, using fallback"
                );
                fallback_explanation(source, target, shared)
            }
            Err(e) => {
                warn!(
                    source = %source.entity_id,
                    target = %target.entity_id,
                    error = %e,
                    "Explanation generation failed, using fallback"
                );
                fallback_explanation(source, target, shared)
            }
        }
    }
}

fn explanation_prompt(
    source: &EntityProfile,
    target: &EntityProfile,
    shared: &Characteristics,
) -> String {
    format!(
        "{source_name} is a {source_group} artist. {target_name} was identified as their \
         equivalent in {target_group}.\n\n\
         {source_name}: {source_summary}\n\
         {target_name}: {target_summary}\n\n\
         Shared themes: {themes}\n\
         Shared attributes: {attributes}\n\
         Shared style: {style}\n\n\
         In two or three sentences, explain why {target_name} plays the same role in \
         {target_group} that {source_name} plays in {source_group}. Refer to the shared \
         characteristics where they support the comparison.",
        source_name = source.display_name(),
        source_group = source.group,
        target_name = target.display_name(),
        target_group = target.group,
        source_summary = source.features.summary(),
        target_summary = target.features.summary(),
        themes = list_or_none(&shared.themes),
        attributes = list_or_none(&shared.attributes),
        style = list_or_none(&shared.style),
    )
}

fn list_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

/// Templated explanation built only from the shared characteristics.
pub fn fallback_explanation(
    source: &EntityProfile,
    target: &EntityProfile,
    shared: &Characteristics,
) -> String {
    let source_name = source.display_name();
    let target_name = target.display_name();

    let themes: Vec<&str> = shared
        .themes
        .iter()
        .take(FALLBACK_THEME_LIMIT)
        .map(String::as_str)
        .collect();
    let attribute = shared.attributes.first();

    match (themes.is_empty(), attribute) {
        (false, Some(attribute)) => format!(
            "{source_name} and {target_name} share themes of {} and have similar \
             characteristics ({attribute}).",
            themes.join(", ")
        ),
        (false, None) => format!(
            "{source_name} and {target_name} share themes of {}.",
            themes.join(", ")
        ),
        (true, Some(attribute)) => format!(
            "{source_name} and {target_name} have similar characteristics ({attribute})."
        ),
        (true, None) => format!(
            "{target_name} occupies a position in {} comparable to {source_name}'s in {}.",
            target.group, source.group
        ),
    }
}
