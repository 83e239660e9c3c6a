//! Shared Gemini payload types used across the text and image modules.

use crate::ai::ResponseSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Gemini content container used in both requests and responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// A content part. Only text parts are sent or read; other part kinds
/// deserialize with `text` unset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }
}

/// Top-level `generateContent` response envelope.
#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// Candidate completion item returned by Gemini.
#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Content,
}

/// OpenAPI-subset schema in the shape `responseSchema` expects.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SchemaObject {
    #[serde(rename = "type")]
    pub schema_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, SchemaObject>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

impl From<&ResponseSchema> for SchemaObject {
    fn from(schema: &ResponseSchema) -> Self {
        let properties = schema
            .fields
            .iter()
            .map(|field| {
                (
                    field.name.clone(),
                    SchemaObject {
                        schema_type: "STRING".to_string(),
                        description: Some(field.description.clone()),
                        properties: BTreeMap::new(),
                        required: Vec::new(),
                    },
                )
            })
            .collect();

        Self {
            schema_type: "OBJECT".to_string(),
            description: None,
            properties,
            required: schema.fields.iter().map(|f| f.name.clone()).collect(),
        }
    }
}

/// Imagen `predict` request envelope.
#[derive(Debug, Serialize)]
pub struct PredictRequest {
    pub instances: Vec<PredictInstance>,
    pub parameters: PredictParameters,
}

#[derive(Debug, Serialize)]
pub struct PredictInstance {
    pub prompt: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictParameters {
    pub sample_count: u32,
    pub aspect_ratio: String,
    pub output_options: OutputOptions,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputOptions {
    pub mime_type: String,
}

/// Imagen `predict` response. `predictions` is omitted entirely when every
/// sample was filtered.
#[derive(Debug, Deserialize)]
pub struct PredictResponse {
    #[serde(default)]
    pub predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    #[serde(default)]
    pub bytes_base64_encoded: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_schema_object_from_response_schema() {
        let schema = ResponseSchema::new()
            .with_string_field("title", "Title")
            .with_string_field("description", "Body");

        let json = serde_json::to_value(SchemaObject::from(&schema)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "OBJECT",
                "properties": {
                    "description": { "type": "STRING", "description": "Body" },
                    "title": { "type": "STRING", "description": "Title" }
                },
                "required": ["title", "description"]
            })
        );
    }

    #[test]
    fn test_non_text_parts_deserialize_without_text() {
        let content: Content = serde_json::from_value(serde_json::json!({
            "parts": [
                { "inlineData": { "mimeType": "image/png", "data": "AA==" } },
                { "text": "hello" }
            ]
        }))
        .unwrap();
        assert!(content.parts[0].text.is_none());
        assert_eq!(content.parts[1].text.as_deref(), Some("hello"));
    }

    #[test]
    fn test_predict_response_without_predictions() {
        let parsed: PredictResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.predictions.is_empty());
    }
}
