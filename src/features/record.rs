// FeatureRecord and its parts.
//
// Optional fields serialize as missing keys rather than nulls or empty
// collections, so a record survives a JSON round trip with its
// "unknown vs. empty" distinction intact.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Structured features extracted from one entity's document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureRecord {
    /// Themes as written by the extractor. Compared as a case-insensitive set;
    /// original spelling is kept for display.
    #[serde(default)]
    pub themes: Vec<String>,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub style: Style,
}

/// Categorical attributes. Each one is `None` when the document didn't say.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tempo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instrumentation: Option<Vec<String>>,
}

impl Attributes {
    /// The four scalar attributes with their display labels, in comparison order.
    pub fn scalars(&self) -> [(&'static str, Option<&str>); 4] {
        [
            ("Tempo", self.tempo.as_deref()),
            ("Key", self.key.as_deref()),
            ("Mood", self.mood.as_deref()),
            ("Energy", self.energy.as_deref()),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.scalars().iter().all(|(_, v)| v.is_none()) && self.instrumentation.is_none()
    }
}

/// Stylistic profile of an entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity: Option<Complexity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotional_tone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub narrative_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub common_topics: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Simple,
    Moderate,
    Complex,
}

impl Complexity {
    /// Parse a complexity label, ignoring case and surrounding whitespace.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "simple" => Some(Complexity::Simple),
            "moderate" => Some(Complexity::Moderate),
            "complex" => Some(Complexity::Complex),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Complexity::Simple => "simple",
            Complexity::Moderate => "moderate",
            Complexity::Complex => "complex",
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FeatureRecord {
    /// The record an extractor returns when extraction failed.
    ///
    /// Collections are present but empty and the style carries neutral
    /// placeholder values, so scoring always receives a well-formed record.
    pub fn degraded() -> Self {
        Self {
            themes: Vec::new(),
            attributes: Attributes::default(),
            style: Style {
                complexity: Some(Complexity::Moderate),
                emotional_tone: Some("neutral".to_string()),
                narrative_style: Some("descriptive".to_string()),
                common_topics: Some(Vec::new()),
            },
        }
    }

    /// One-line human summary used inside explanation prompts.
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();

        if !self.themes.is_empty() {
            parts.push(format!("themes: {}", self.themes.join(", ")));
        }
        for (label, value) in self.attributes.scalars() {
            if let Some(value) = value {
                parts.push(format!("{}: {}", label.to_lowercase(), value));
            }
        }
        if let Some(instruments) = &self.attributes.instrumentation {
            if !instruments.is_empty() {
                parts.push(format!("instrumentation: {}", instruments.join(", ")));
            }
        }
        if let Some(complexity) = self.style.complexity {
            parts.push(format!("complexity: {complexity}"));
        }
        if let Some(tone) = &self.style.emotional_tone {
            parts.push(format!("emotional tone: {tone}"));
        }
        if let Some(narrative) = &self.style.narrative_style {
            parts.push(format!("narrative style: {narrative}"));
        }
        if let Some(topics) = &self.style.common_topics {
            if !topics.is_empty() {
                parts.push(format!("common topics: {}", topics.join(", ")));
            }
        }

        if parts.is_empty() {
            "no recorded features".to_string()
        } else {
            parts.join("; ")
        }
    }
}
