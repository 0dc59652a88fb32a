// EntityProfile — an entity's identity paired with its extracted features.

use serde::{Deserialize, Serialize};

use super::record::FeatureRecord;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityProfile {
    pub entity_id: String,
    pub group: String,
    /// Display name; falls back to the id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub features: FeatureRecord,
}

impl EntityProfile {
    pub fn new(entity_id: &str, group: &str, features: FeatureRecord) -> Self {
        Self {
            entity_id: entity_id.to_string(),
            group: group.to_string(),
            name: None,
            features,
        }
    }

    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.entity_id)
    }
}
