// Edge normalization — loosely-shaped extractor JSON into a FeatureRecord.
//
// Language models answer with whatever shape they like: arrays or
// comma-separated strings, camelCase or snake_case keys, "tempo" or
// "tempoClass". Everything is folded into the strict record here so the
// scorer never sees raw JSON. Blank strings and unusable values become
// absent fields.

use serde_json::{Map, Value};

use super::record::{Attributes, Complexity, FeatureRecord, Style};

/// Normalize an arbitrary JSON value into a FeatureRecord.
///
/// Non-object input produces an all-absent record.
pub fn from_loose_json(value: &Value) -> FeatureRecord {
    let Some(root) = value.as_object() else {
        return FeatureRecord::default();
    };

    let empty = Map::new();
    let attributes = object_field(root, &["attributes", "musicalAttributes", "musical_attributes"])
        .unwrap_or(&empty);
    let style = object_field(root, &["style"]).unwrap_or(&empty);

    FeatureRecord {
        themes: string_list(root, &["themes"]).unwrap_or_default(),
        attributes: Attributes {
            tempo: text(attributes, &["tempo", "tempoClass", "tempo_class"]),
            key: text(attributes, &["key", "musicalKey", "musical_key"]),
            mood: text(attributes, &["mood"]),
            energy: text(attributes, &["energy", "energyClass", "energy_class"]),
            instrumentation: string_list(attributes, &["instrumentation", "instruments"]),
        },
        style: Style {
            complexity: text(style, &["complexity"]).and_then(|c| Complexity::parse(&c)),
            emotional_tone: text(style, &["emotionalTone", "emotional_tone", "tone"]),
            narrative_style: text(style, &["narrativeStyle", "narrative_style"]),
            common_topics: string_list(style, &["commonTopics", "common_topics", "topics"]),
        },
    }
}

fn lookup<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|k| map.get(*k)).filter(|v| !v.is_null())
}

fn object_field<'a>(
    map: &'a Map<String, Value>,
    keys: &[&str],
) -> Option<&'a Map<String, Value>> {
    lookup(map, keys).and_then(Value::as_object)
}

/// A trimmed, non-empty scalar. Numbers are accepted and stringified.
fn text(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    let raw = match lookup(map, keys)? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!raw.is_empty()).then_some(raw)
}

/// A list of trimmed, non-empty strings. A single string is split on commas.
fn string_list(map: &Map<String, Value>, keys: &[&str]) -> Option<Vec<String>> {
    let items: Vec<String> = match lookup(map, keys)? {
        Value::Array(values) => values
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        Value::String(s) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        _ => return None,
    };
    Some(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_well_formed_input() {
        let record = from_loose_json(&json!({
            "themes": ["love", "loss"],
            "attributes": {"energy": "high", "instrumentation": ["guitar"]},
            "style": {
                "complexity": "complex",
                "emotionalTone": "bittersweet longing",
                "commonTopics": ["breakup"]
            }
        }));

        assert_eq!(record.themes, vec!["love", "loss"]);
        assert_eq!(record.attributes.energy.as_deref(), Some("high"));
        assert_eq!(record.attributes.tempo, None);
        assert_eq!(record.attributes.instrumentation, Some(vec!["guitar".to_string()]));
        assert_eq!(record.style.complexity, Some(Complexity::Complex));
        assert_eq!(record.style.narrative_style, None);
    }

    #[test]
    fn test_alternate_keys_and_shapes() {
        let record = from_loose_json(&json!({
            "themes": "rebellion, youth ,",
            "musical_attributes": {"tempo_class": "fast", "energyClass": "  ", "key": 5},
            "style": {"emotional_tone": "defiant", "topics": "school, cars"}
        }));

        assert_eq!(record.themes, vec!["rebellion", "youth"]);
        assert_eq!(record.attributes.tempo.as_deref(), Some("fast"));
        // Blank strings are unknown, not empty values
        assert_eq!(record.attributes.energy, None);
        assert_eq!(record.attributes.key.as_deref(), Some("5"));
        assert_eq!(record.style.emotional_tone.as_deref(), Some("defiant"));
        assert_eq!(
            record.style.common_topics,
            Some(vec!["school".to_string(), "cars".to_string()])
        );
    }

    #[test]
    fn test_nulls_and_bad_types_are_absent() {
        let record = from_loose_json(&json!({
            "themes": null,
            "attributes": {"mood": null, "instrumentation": 3},
            "style": {"complexity": "unknowable"}
        }));
        assert!(record.themes.is_empty());
        assert!(record.attributes.is_empty());
        assert_eq!(record.style.complexity, None);
    }

    #[test]
    fn test_non_object_input() {
        assert_eq!(from_loose_json(&json!("nope")), FeatureRecord::default());
        assert_eq!(from_loose_json(&json!([1, 2])), FeatureRecord::default());
    }
}
