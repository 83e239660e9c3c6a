//! Data models and structures
//!
//! Defines the generated post, the form request that produces it, the
//! caller-side request state and the environment configuration.

use crate::ai::mime;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// A finished social-media post.
///
/// Only built once both generation steps succeeded and both text fields are
/// non-empty. Fields are read-only after construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPost {
    title: String,
    description: String,
    image_url: String,
}

impl GeneratedPost {
    pub(crate) fn new(draft: PostDraft, image_bytes: &[u8]) -> Result<Self> {
        if !draft.is_complete() {
            return Err(Error::Invariant(
                "post draft is missing a title or description".to_string(),
            ));
        }

        Ok(Self {
            title: draft.title,
            description: draft.description,
            image_url: mime::to_data_uri(mime::JPEG, image_bytes),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// `data:image/jpeg;base64,...` reference to the generated image.
    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    /// Decoded image bytes behind [`GeneratedPost::image_url`].
    pub fn image_bytes(&self) -> Result<Vec<u8>> {
        let (_, bytes) = mime::decode_data_uri(&self.image_url)?;
        Ok(bytes)
    }
}

/// Structured payload returned by the text step.
///
/// Parsing is permissive: unknown fields are ignored and missing fields
/// default to empty, leaving the completeness check to the caller.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PostDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl PostDraft {
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty() && !self.description.trim().is_empty()
    }
}

/// The two form fields, validated as non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct PostRequest {
    business_type: String,
    post_summary: String,
}

impl PostRequest {
    pub fn new(business_type: impl Into<String>, post_summary: impl Into<String>) -> Result<Self> {
        let business_type = business_type.into();
        let post_summary = post_summary.into();

        if business_type.trim().is_empty() || post_summary.trim().is_empty() {
            return Err(Error::Validation(
                "please fill in both the business type and the post summary".to_string(),
            ));
        }

        Ok(Self {
            business_type,
            post_summary,
        })
    }

    pub fn business_type(&self) -> &str {
        &self.business_type
    }

    pub fn post_summary(&self) -> &str {
        &self.post_summary
    }
}

/// Lifecycle of a single submission, owned by the caller of the generator.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestState {
    #[default]
    Idle,
    Pending,
    Succeeded(GeneratedPost),
    Failed(String),
}

impl RequestState {
    pub fn is_pending(&self) -> bool {
        matches!(self, RequestState::Pending)
    }

    pub fn post(&self) -> Option<&GeneratedPost> {
        match self {
            RequestState::Succeeded(post) => Some(post),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RequestState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_IMAGE_MODEL: &str = "imagen-4.0-generate-001";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub text_model: String,
    pub image_model: String,
    pub base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let api_key = non_empty("GEMINI_API_KEY")
            .or_else(|| non_empty("API_KEY"))
            .ok_or_else(|| {
                Error::Configuration("GEMINI_API_KEY (or API_KEY) not set".to_string())
            })?;

        Ok(Self {
            api_key,
            text_model: non_empty("TEXT_MODEL").unwrap_or_else(|| DEFAULT_TEXT_MODEL.to_string()),
            image_model: non_empty("IMAGE_MODEL")
                .unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string()),
            base_url: non_empty("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        })
    }
}
