use super::{ImageGenerationService, ImageOptions, ResponseSchema, TextGenerationService};
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Minimal JPEG start-of-image marker used as the default mock payload.
pub const MOCK_JPEG: [u8; 4] = [0xFF, 0xD8, 0xFF, 0xE0];

#[derive(Clone)]
pub struct MockTextClient {
    responses: Arc<Mutex<Vec<String>>>,
    failure: Arc<Mutex<Option<String>>>,
    prompts: Arc<Mutex<Vec<String>>>,
    temperatures: Arc<Mutex<Vec<f32>>>,
}

impl MockTextClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            failure: Arc::new(Mutex::new(None)),
            prompts: Arc::new(Mutex::new(Vec::new())),
            temperatures: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a raw structured-text response. Responses cycle once exhausted.
    pub fn with_raw_response(self, response: String) -> Self {
        self.responses.lock().unwrap().push(response);
        self
    }

    pub fn with_draft(self, title: &str, description: &str) -> Self {
        let json = serde_json::json!({ "title": title, "description": description });
        self.with_raw_response(json.to_string())
    }

    /// Every call fails with `Error::AiProvider(message)`.
    pub fn with_failure(self, message: &str) -> Self {
        *self.failure.lock().unwrap() = Some(message.to_string());
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn temperatures(&self) -> Vec<f32> {
        self.temperatures.lock().unwrap().clone()
    }
}

impl Default for MockTextClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextGenerationService for MockTextClient {
    async fn generate_structured_text(
        &self,
        prompt: &str,
        _schema: &ResponseSchema,
        temperature: f32,
    ) -> Result<String> {
        let call = {
            let mut prompts = self.prompts.lock().unwrap();
            prompts.push(prompt.to_string());
            prompts.len()
        };
        self.temperatures.lock().unwrap().push(temperature);

        if let Some(message) = self.failure.lock().unwrap().clone() {
            return Err(Error::AiProvider(message));
        }

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(serde_json::json!({
                "title": "Mock title",
                "description": "Mock description\n#mock #post #generated"
            })
            .to_string())
        } else {
            Ok(responses[(call - 1) % responses.len()].clone())
        }
    }
}

#[derive(Clone)]
pub struct MockImageClient {
    responses: Arc<Mutex<Vec<Vec<Vec<u8>>>>>,
    failure: Arc<Mutex<Option<String>>>,
    prompts: Arc<Mutex<Vec<String>>>,
    options: Arc<Mutex<Vec<ImageOptions>>>,
}

impl MockImageClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            failure: Arc::new(Mutex::new(None)),
            prompts: Arc::new(Mutex::new(Vec::new())),
            options: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_image_response(self, image: Vec<u8>) -> Self {
        self.with_images_response(vec![image])
    }

    /// Queue the full image list returned by one call. Cycles once exhausted.
    pub fn with_images_response(self, images: Vec<Vec<u8>>) -> Self {
        self.responses.lock().unwrap().push(images);
        self
    }

    pub fn with_no_images(self) -> Self {
        self.with_images_response(Vec::new())
    }

    pub fn with_failure(self, message: &str) -> Self {
        *self.failure.lock().unwrap() = Some(message.to_string());
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn options(&self) -> Vec<ImageOptions> {
        self.options.lock().unwrap().clone()
    }
}

impl Default for MockImageClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageGenerationService for MockImageClient {
    async fn generate_images(&self, prompt: &str, options: &ImageOptions) -> Result<Vec<Vec<u8>>> {
        let call = {
            let mut prompts = self.prompts.lock().unwrap();
            prompts.push(prompt.to_string());
            prompts.len()
        };
        self.options.lock().unwrap().push(options.clone());

        if let Some(message) = self.failure.lock().unwrap().clone() {
            return Err(Error::AiProvider(message));
        }

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(vec![MOCK_JPEG.to_vec()])
        } else {
            Ok(responses[(call - 1) % responses.len()].clone())
        }
    }
}
