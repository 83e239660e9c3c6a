use super::client::GeminiHttpClient;
use super::types::{Content, GenerateContentResponse, Part, SchemaObject};
use crate::ai::{ResponseSchema, TextGenerationService};
use crate::{Error, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct TextRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: TextGenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TextGenerationConfig {
    response_mime_type: String,
    response_schema: SchemaObject,
    temperature: f32,
}

/// Structured JSON text generation through Gemini `generateContent`.
pub struct GeminiTextClient {
    http: GeminiHttpClient,
}

impl GeminiTextClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, reqwest::Client::new())
    }

    pub fn new_with_client(api_key: String, model: String, client: reqwest::Client) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(
                api_key,
                model,
                Duration::from_secs(30),
                client,
            ),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }

    fn extract_text(response: &GenerateContentResponse) -> Option<String> {
        response.candidates.first().and_then(|c| {
            c.content.parts.iter().find_map(|p| p.text.clone())
        })
    }
}

#[async_trait]
impl TextGenerationService for GeminiTextClient {
    async fn generate_structured_text(
        &self,
        prompt: &str,
        schema: &ResponseSchema,
        temperature: f32,
    ) -> Result<String> {
        let request = TextRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part::text(prompt)],
            }],
            generation_config: TextGenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: SchemaObject::from(schema),
                temperature,
            },
        };

        let response: GenerateContentResponse = self.http.generate_content(&request).await?;

        Self::extract_text(&response)
            .ok_or_else(|| Error::AiProvider("No text in Gemini response".to_string()))
    }
}
