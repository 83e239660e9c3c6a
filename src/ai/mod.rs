//! AI service integration for post text and image generation
//!
//! Capability traits for the two remote generation steps, with Gemini/Imagen
//! REST implementations and in-memory mocks.

pub mod gemini;
pub mod mime;
pub mod mock;

pub use gemini::{GeminiTextClient, ImagenClient};
pub use mock::{MockImageClient, MockTextClient};

use crate::Result;
use async_trait::async_trait;

/// A required string field in a structured text response.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaField {
    pub name: String,
    pub description: String,
}

/// Object schema whose fields are all required strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseSchema {
    pub fields: Vec<SchemaField>,
}

impl ResponseSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_string_field(mut self, name: &str, description: &str) -> Self {
        self.fields.push(SchemaField {
            name: name.to_string(),
            description: description.trim().to_string(),
        });
        self
    }
}

/// Output constraints for an image generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageOptions {
    pub count: u32,
    pub mime_type: String,
    pub aspect_ratio: String,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            count: 1,
            mime_type: mime::JPEG.to_string(),
            aspect_ratio: "1:1".to_string(),
        }
    }
}

#[async_trait]
pub trait TextGenerationService: Send + Sync {
    /// Returns the raw structured (JSON) text matching `schema`.
    async fn generate_structured_text(
        &self,
        prompt: &str,
        schema: &ResponseSchema,
        temperature: f32,
    ) -> Result<String>;
}

#[async_trait]
pub trait ImageGenerationService: Send + Sync {
    /// Returns the decoded image payloads; may be empty when the provider
    /// produced nothing.
    async fn generate_images(&self, prompt: &str, options: &ImageOptions) -> Result<Vec<Vec<u8>>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_builder_trims_descriptions() {
        let schema = ResponseSchema::new()
            .with_string_field("title", "The title.\n")
            .with_string_field("description", "The body.");
        assert_eq!(schema.fields.len(), 2);
        assert_eq!(schema.fields[0].name, "title");
        assert_eq!(schema.fields[0].description, "The title.");
    }

    #[test]
    fn test_image_options_default_to_one_square_jpeg() {
        let options = ImageOptions::default();
        assert_eq!(options.count, 1);
        assert_eq!(options.mime_type, "image/jpeg");
        assert_eq!(options.aspect_ratio, "1:1");
    }
}
