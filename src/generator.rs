//! Post generation: a structured text step followed by an image step whose
//! prompt embeds the generated title.

use crate::ai::{mime, ImageGenerationService, ImageOptions, ResponseSchema, TextGenerationService};
use crate::models::{GeneratedPost, PostDraft};
use crate::{prompts, Error, Result};
use tracing::{error, info};

pub const TEXT_TEMPERATURE: f32 = 0.8;
pub const UNKNOWN_FAILURE: &str = "unknown error during post generation";

pub struct PostGenerator {
    text: Box<dyn TextGenerationService>,
    image: Box<dyn ImageGenerationService>,
}

impl PostGenerator {
    pub fn new(
        text: Box<dyn TextGenerationService>,
        image: Box<dyn ImageGenerationService>,
    ) -> Self {
        Self { text, image }
    }

    /// Generate a title, description and image for the given business and topic.
    ///
    /// Both inputs are expected to be non-empty. Any failure in either step is
    /// reported as [`Error::Generation`] (or [`Error::Unknown`] when the cause
    /// carries no description); no partial post is ever returned.
    pub async fn generate_post(
        &self,
        business_type: &str,
        post_summary: &str,
    ) -> Result<GeneratedPost> {
        self.run_steps(business_type, post_summary)
            .await
            .map_err(|e| {
                error!("Error generating post: {}", e);
                normalize(e)
            })
    }

    async fn run_steps(&self, business_type: &str, post_summary: &str) -> Result<GeneratedPost> {
        let draft = self.generate_text(business_type, post_summary).await?;
        info!("Generated title: {}", draft.title);

        let image = self
            .generate_image(business_type, post_summary, &draft.title)
            .await?;
        info!("Generated image ({} bytes)", image.len());

        GeneratedPost::new(draft, &image)
    }

    async fn generate_text(&self, business_type: &str, post_summary: &str) -> Result<PostDraft> {
        let prompt = prompts::post_text(business_type, post_summary);
        let schema = post_schema();

        let raw = self
            .text
            .generate_structured_text(&prompt, &schema, TEXT_TEMPERATURE)
            .await?;

        let draft = serde_json::from_str::<PostDraft>(&raw)
            .ok()
            .filter(PostDraft::is_complete)
            .ok_or_else(|| {
                Error::Generation("failed to produce valid title or description".to_string())
            })?;

        Ok(draft)
    }

    async fn generate_image(
        &self,
        business_type: &str,
        post_summary: &str,
        title: &str,
    ) -> Result<Vec<u8>> {
        let prompt = prompts::post_image(business_type, post_summary, title);
        let options = ImageOptions::default();

        let image = self
            .image
            .generate_images(&prompt, &options)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::Generation("image generation failed".to_string()))?;

        mime::warn_on_mismatch(&options.mime_type, &image);
        Ok(image)
    }
}

fn post_schema() -> ResponseSchema {
    ResponseSchema::new()
        .with_string_field("title", prompts::TITLE_FIELD)
        .with_string_field("description", prompts::DESCRIPTION_FIELD)
}

fn normalize(err: Error) -> Error {
    match err.message() {
        Some(message) => Error::Generation(format!("Failed to generate content: {}", message)),
        None => Error::Unknown(UNKNOWN_FAILURE.to_string()),
    }
}
