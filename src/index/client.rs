// HTTP client for a hosted vector index (Pinecone-style REST API).
//
// Uses two endpoints: `GET /vectors/fetch?ids=...` and `POST /query`.
// Metadata on the wire is free-form JSON; it is normalized into
// VectorMetadata here so nothing downstream ever sees the raw shape.

use std::collections::HashMap;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use super::traits::{MetadataFilter, QueryOptions, VectorKind, VectorLookup, VectorMatch, VectorMetadata};

/// Default metadata `type` label for first-class entity vectors.
pub const DEFAULT_ENTITY_KIND: &str = "entity";

/// Client for a hosted vector index.
pub struct VectorIndexClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    /// Metadata `type` value that marks a first-class entity
    entity_kind: String,
}

impl VectorIndexClient {
    /// Create a client for the index at `base_url`.
    pub fn new(base_url: &str, api_key: &str, entity_kind: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("crossover/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            entity_kind: entity_kind.to_string(),
        })
    }

    fn filter_json(&self, filter: &MetadataFilter) -> Value {
        let mut clauses = Map::new();
        if let Some(kind) = filter.kind {
            let label = match kind {
                VectorKind::Entity => self.entity_kind.as_str(),
                VectorKind::Centroid => "centroid",
                VectorKind::Auxiliary => "auxiliary",
            };
            clauses.insert("type".to_string(), serde_json::json!({ "$eq": label }));
        }
        if let Some(group) = &filter.group {
            // Server-side equality is exact; callers needing case-insensitive
            // matching filter the results themselves.
            clauses.insert("group".to_string(), serde_json::json!({ "$eq": group.trim() }));
        }
        Value::Object(clauses)
    }
}

#[async_trait]
impl VectorLookup for VectorIndexClient {
    async fn get_by_id(&self, id: &str) -> Result<Option<Vec<f32>>> {
        let url = format!("{}/vectors/fetch", self.base_url);

        let response = self
            .client
            .get(&url)
            .header("Api-Key", &self.api_key)
            .query(&[("ids", id)])
            .send()
            .await
            .context("Vector index fetch request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Vector index fetch returned {}: {}", status, body);
        }

        let mut body: FetchResponse = response
            .json()
            .await
            .context("Failed to parse vector index fetch response")?;

        debug!(id = id, found = body.vectors.contains_key(id), "Fetched vector");

        Ok(body.vectors.remove(id).map(|record| record.values))
    }

    async fn query(&self, vector: &[f32], options: &QueryOptions) -> Result<Vec<VectorMatch>> {
        let url = format!("{}/query", self.base_url);

        let request = QueryRequest {
            vector,
            top_k: options.top_k,
            include_metadata: true,
            include_values: false,
            filter: options.filter.as_ref().map(|f| self.filter_json(f)),
        };

        let response = self
            .client
            .post(&url)
            .header("Api-Key", &self.api_key)
            .json(&request)
            .send()
            .await
            .context("Vector index query request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Vector index query returned {}: {}", status, body);
        }

        let body: QueryResponse = response
            .json()
            .await
            .context("Failed to parse vector index query response")?;

        debug!(matches = body.matches.len(), top_k = options.top_k, "Vector query complete");

        Ok(body
            .matches
            .into_iter()
            .map(|m| VectorMatch {
                metadata: normalize_metadata(m.metadata.as_ref(), &self.entity_kind),
                id: m.id,
                score: m.score.unwrap_or(0.0),
            })
            .collect())
    }
}

/// Fold free-form match metadata into VectorMetadata.
///
/// `type` decides the kind: the configured entity label (case-insensitive)
/// is an entity, `centroid` is a centroid, anything else (or nothing) is
/// auxiliary. `group` falls back to `genre`.
pub fn normalize_metadata(raw: Option<&Map<String, Value>>, entity_kind: &str) -> VectorMetadata {
    let field = |keys: &[&str]| -> Option<String> {
        let map = raw?;
        keys.iter()
            .find_map(|k| map.get(*k).and_then(Value::as_str))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    let kind = match field(&["type", "kind"]) {
        Some(t) if t.eq_ignore_ascii_case(entity_kind) => VectorKind::Entity,
        Some(t) if t.eq_ignore_ascii_case("centroid") => VectorKind::Centroid,
        _ => VectorKind::Auxiliary,
    };

    VectorMetadata {
        kind,
        group: field(&["group", "genre"]),
        name: field(&["name", "title"]),
    }
}

// --- Wire types ---

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    vector: &'a [f32],
    top_k: usize,
    include_metadata: bool,
    include_values: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<Value>,
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<WireMatch>,
}

#[derive(Deserialize)]
struct WireMatch {
    id: String,
    score: Option<f64>,
    metadata: Option<Map<String, Value>>,
}

#[derive(Deserialize)]
struct FetchResponse {
    #[serde(default)]
    vectors: HashMap<String, WireVector>,
}

#[derive(Deserialize)]
struct WireVector {
    values: Vec<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn meta(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_entity_metadata() {
        let m = meta(json!({"type": "Artist", "genre": " Jazz ", "name": "Miles Davis"}));
        let normalized = normalize_metadata(Some(&m), "artist");
        assert_eq!(normalized.kind, VectorKind::Entity);
        assert_eq!(normalized.group.as_deref(), Some("Jazz"));
        assert_eq!(normalized.name.as_deref(), Some("Miles Davis"));
    }

    #[test]
    fn test_centroid_metadata() {
        let m = meta(json!({"type": "centroid", "group": "rock"}));
        assert_eq!(normalize_metadata(Some(&m), "artist").kind, VectorKind::Centroid);
    }

    #[test]
    fn test_missing_metadata_is_auxiliary() {
        let normalized = normalize_metadata(None, "artist");
        assert_eq!(normalized.kind, VectorKind::Auxiliary);
        assert_eq!(normalized.group, None);
    }

    #[test]
    fn test_unknown_type_is_auxiliary() {
        let m = meta(json!({"type": "album", "group": "rock"}));
        assert_eq!(normalize_metadata(Some(&m), "artist").kind, VectorKind::Auxiliary);
    }

    #[test]
    fn test_filter_json() {
        let client = VectorIndexClient::new("http://localhost:1/", "key", "artist").unwrap();
        let filter = MetadataFilter {
            kind: Some(VectorKind::Entity),
            group: Some(" jazz ".to_string()),
        };
        assert_eq!(
            client.filter_json(&filter),
            json!({"type": {"$eq": "artist"}, "group": {"$eq": "jazz"}})
        );
        assert_eq!(client.base_url, "http://localhost:1");
    }

    #[test]
    fn test_query_request_shape() {
        let request = QueryRequest {
            vector: &[0.5, 1.0],
            top_k: 50,
            include_metadata: true,
            include_values: false,
            filter: None,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"vector": [0.5, 1.0], "topK": 50, "includeMetadata": true, "includeValues": false})
        );
    }
}
