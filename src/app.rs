//! Caller side of post generation: form validation, request state and image
//! download.

use crate::ai::{GeminiTextClient, ImagenClient};
use crate::generator::PostGenerator;
use crate::models::{Config, GeneratedPost, PostRequest, RequestState};
use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const FALLBACK_IMAGE_NAME: &str = "generated-image";

pub struct App {
    generator: PostGenerator,
    state: RequestState,
}

impl App {
    /// Build an app around an existing generator, typically one wired to mocks.
    pub fn with_generator(generator: PostGenerator) -> Self {
        Self {
            generator,
            state: RequestState::Idle,
        }
    }

    /// Construct an app from environment configuration (`Config::from_env`).
    pub fn from_env() -> Result<Self> {
        let config = Config::from_env()?;
        Ok(Self::new(&config))
    }

    pub fn new(config: &Config) -> Self {
        // Reuse one HTTP connection pool across provider clients.
        let http_client = reqwest::Client::new();

        info!("Text model: {}", config.text_model);
        let text = GeminiTextClient::new_with_client(
            config.api_key.clone(),
            config.text_model.clone(),
            http_client.clone(),
        )
        .with_base_url(config.base_url.clone());

        info!("Image model: {}", config.image_model);
        let image = ImagenClient::new_with_client(
            config.api_key.clone(),
            config.image_model.clone(),
            http_client,
        )
        .with_base_url(config.base_url.clone());

        Self::with_generator(PostGenerator::new(Box::new(text), Box::new(image)))
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    /// Validate the form and, if complete, generate a post.
    ///
    /// Runs [`App::begin`] then [`App::complete`].
    pub async fn submit(&mut self, business_type: &str, post_summary: &str) -> &RequestState {
        match self.begin(business_type, post_summary) {
            Some(request) => self.complete(&request).await,
            None => &self.state,
        }
    }

    /// Start a submission: discards the previous result and moves to
    /// `Pending`, or to `Failed` when a form field is empty. Only a `Pending`
    /// start yields a request to pass to [`App::complete`].
    pub fn begin(&mut self, business_type: &str, post_summary: &str) -> Option<PostRequest> {
        match PostRequest::new(business_type, post_summary) {
            Ok(request) => {
                self.state = RequestState::Pending;
                Some(request)
            }
            Err(e) => {
                warn!("Rejected incomplete form: {}", e);
                self.state = RequestState::Failed(failure_message(&e));
                None
            }
        }
    }

    /// Run generation for a started submission and record the outcome.
    pub async fn complete(&mut self, request: &PostRequest) -> &RequestState {
        info!(
            "Generating post for business type '{}'",
            request.business_type()
        );

        self.state = match self
            .generator
            .generate_post(request.business_type(), request.post_summary())
            .await
        {
            Ok(post) => {
                info!("Post generated: {}", post.title());
                RequestState::Succeeded(post)
            }
            Err(e) => RequestState::Failed(failure_message(&e)),
        };

        &self.state
    }

    /// Write the post's image into `dir` as `<title-slug>.jpeg`.
    pub fn save_image(post: &GeneratedPost, dir: &Path) -> Result<PathBuf> {
        let bytes = post.image_bytes()?;

        fs::create_dir_all(dir)?;
        let path = dir.join(format!("{}.jpeg", image_file_stem(post.title())));
        fs::write(&path, bytes)?;

        info!("Saved image at: {}", path.display());
        Ok(path)
    }
}

fn failure_message(err: &Error) -> String {
    err.message().unwrap_or_else(|| err.to_string())
}

/// Lower-cased title with whitespace runs turned into `-` and anything outside
/// `[a-z0-9-]` dropped.
pub fn image_file_stem(title: &str) -> String {
    let lowered = title.to_lowercase();
    let dashed = lowered.split_whitespace().collect::<Vec<_>>().join("-");
    let stem: String = dashed
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .collect();

    if stem.is_empty() {
        FALLBACK_IMAGE_NAME.to_string()
    } else {
        stem
    }
}
