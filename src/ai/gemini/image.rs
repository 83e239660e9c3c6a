use super::client::GeminiHttpClient;
use super::types::{OutputOptions, PredictInstance, PredictParameters, PredictRequest, PredictResponse};
use crate::ai::{mime, ImageGenerationService, ImageOptions};
use crate::{Error, Result};
use async_trait::async_trait;
use base64::Engine as _;
use std::time::Duration;

/// Image generation through the Imagen `predict` endpoint.
pub struct ImagenClient {
    http: GeminiHttpClient,
}

impl ImagenClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, reqwest::Client::new())
    }

    pub fn new_with_client(api_key: String, model: String, client: reqwest::Client) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(
                api_key,
                model,
                Duration::from_secs(120),
                client,
            ),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }
}

#[async_trait]
impl ImageGenerationService for ImagenClient {
    async fn generate_images(&self, prompt: &str, options: &ImageOptions) -> Result<Vec<Vec<u8>>> {
        let request = PredictRequest {
            instances: vec![PredictInstance {
                prompt: prompt.to_string(),
            }],
            parameters: PredictParameters {
                sample_count: options.count,
                aspect_ratio: options.aspect_ratio.clone(),
                output_options: OutputOptions {
                    mime_type: options.mime_type.clone(),
                },
            },
        };

        let response: PredictResponse = self.http.predict(&request).await?;

        // Filtered samples come back without bytes; skip them.
        let images = response
            .predictions
            .iter()
            .filter_map(|p| {
                let data = p.bytes_base64_encoded.as_deref()?;
                mime::declared_matches(&options.mime_type, p.mime_type.as_deref());
                Some(data)
            })
            .map(|data| {
                base64::engine::general_purpose::STANDARD
                    .decode(data)
                    .map_err(|e| {
                        Error::AiProvider(format!("Failed to decode Imagen base64 image: {}", e))
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            "Imagen returned {} image(s) for model {}",
            images.len(),
            self.http.model()
        );

        Ok(images)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::gemini::test_support;
    use wiremock::matchers::body_partial_json;
    use wiremock::{MockServer, ResponseTemplate};

    const DEFAULT_MODEL: &str = "imagen-4.0-generate-001";

    fn make_client(server: &MockServer) -> ImagenClient {
        ImagenClient::new("key".to_string(), DEFAULT_MODEL.to_string()).with_base_url(server.uri())
    }

    #[tokio::test]
    async fn test_generate_images_decodes_predictions() {
        let server = MockServer::start().await;

        let fake_image = vec![0xFF, 0xD8, 0xFF, 0xE0];
        let b64 = base64::engine::general_purpose::STANDARD.encode(&fake_image);

        test_support::post_path_regex(test_support::PREDICT_PATH_REGEX)
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "predictions": [{ "bytesBase64Encoded": b64, "mimeType": "image/jpeg" }]
            })))
            .mount(&server)
            .await;

        let images = make_client(&server)
            .generate_images("a coffee", &ImageOptions::default())
            .await
            .unwrap();
        assert_eq!(images, vec![fake_image]);
    }

    #[tokio::test]
    async fn test_request_uses_options() {
        let server = MockServer::start().await;

        test_support::post_path_regex(test_support::PREDICT_PATH_REGEX)
            .and(body_partial_json(serde_json::json!({
                "instances": [{ "prompt": "a coffee" }],
                "parameters": {
                    "sampleCount": 1,
                    "aspectRatio": "1:1",
                    "outputOptions": { "mimeType": "image/jpeg" }
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;

        make_client(&server)
            .generate_images("a coffee", &ImageOptions::default())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_missing_predictions_yield_no_images() {
        let server = MockServer::start().await;

        test_support::post_path_regex(test_support::PREDICT_PATH_REGEX)
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "predictions": [{ "raiFilteredReason": "filtered" }]
            })))
            .mount(&server)
            .await;

        let images = make_client(&server)
            .generate_images("a coffee", &ImageOptions::default())
            .await
            .unwrap();
        assert!(images.is_empty());
    }

    #[tokio::test]
    async fn test_declared_mime_mismatch_still_returns_image() {
        let server = MockServer::start().await;

        let png = vec![0x89, 0x50, 0x4E, 0x47];
        let b64 = base64::engine::general_purpose::STANDARD.encode(&png);

        test_support::post_path_regex(test_support::PREDICT_PATH_REGEX)
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "predictions": [{ "bytesBase64Encoded": b64, "mimeType": "image/png" }]
            })))
            .mount(&server)
            .await;

        let images = make_client(&server)
            .generate_images("a coffee", &ImageOptions::default())
            .await
            .unwrap();
        assert_eq!(images, vec![png]);
    }

    #[tokio::test]
    async fn test_api_error_returns_ai_provider_error() {
        let server = MockServer::start().await;

        test_support::post_path_regex(test_support::PREDICT_PATH_REGEX)
            .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
            .mount(&server)
            .await;

        let err = make_client(&server)
            .generate_images("a coffee", &ImageOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::AiProvider(_)));
    }

    #[tokio::test]
    async fn test_invalid_base64_returns_ai_provider_error() {
        let server = MockServer::start().await;

        test_support::post_path_regex(test_support::PREDICT_PATH_REGEX)
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "predictions": [{ "bytesBase64Encoded": "!!!invalid-base64!!!" }]
            })))
            .mount(&server)
            .await;

        let err = make_client(&server)
            .generate_images("a coffee", &ImageOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::AiProvider(_)));
    }
}
