//! Hugging Face Inference API text-to-image client.

use std::fmt;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::ACCEPT;
use serde::Serialize;
use storyteller_core::generation::{GenerationError, ImageGenerator, ImageRequest};
use tracing::{debug, instrument};

use crate::http::{ensure_success, transport_error};

/// Default Inference API base URL.
pub const DEFAULT_HF_API_BASE: &str = "https://api-inference.huggingface.co/models";

/// Default text-to-image model.
pub const DEFAULT_HF_IMAGE_MODEL: &str = "stabilityai/stable-diffusion-xl-base-1.0";

/// `ImageGenerator` backed by a Hugging Face hosted diffusion model.
#[derive(Clone)]
pub struct HuggingFaceImageGenerator {
    client: Client,
    api_token: String,
    api_base: String,
    model: String,
}

impl fmt::Debug for HuggingFaceImageGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HuggingFaceImageGenerator")
            .field("api_token", &"<redacted>")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl HuggingFaceImageGenerator {
    /// Creates a client for `model` at `api_base`.
    #[must_use]
    pub fn new(client: Client, api_token: String, api_base: String, model: String) -> Self {
        Self {
            client,
            api_token,
            api_base,
            model,
        }
    }

    /// The inference URL for the configured model.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!(
            "{}/{}",
            self.api_base.trim_end_matches('/'),
            self.model.trim_matches('/')
        )
    }
}

#[derive(Debug, Serialize)]
struct TextToImageRequest<'a> {
    inputs: &'a str,
    parameters: TextToImageParameters,
}

#[derive(Debug, Serialize)]
struct TextToImageParameters {
    width: u32,
    height: u32,
}

fn build_request(request: &ImageRequest) -> TextToImageRequest<'_> {
    TextToImageRequest {
        inputs: &request.prompt,
        parameters: TextToImageParameters {
            width: request.width,
            height: request.height,
        },
    }
}

#[async_trait]
impl ImageGenerator for HuggingFaceImageGenerator {
    #[instrument(skip(self, request), fields(model = %self.model))]
    async fn generate_image(&self, request: &ImageRequest) -> Result<Vec<u8>, GenerationError> {
        let url = self.endpoint();
        debug!(url = %url, width = request.width, height = request.height, "sending text-to-image request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_token)
            .header(ACCEPT, "image/png")
            .json(&build_request(request))
            .send()
            .await
            .map_err(|e| transport_error(&e))?;
        let response = ensure_success(response).await?;

        let bytes = response.bytes().await.map_err(|e| transport_error(&e))?;
        if bytes.is_empty() {
            return Err(GenerationError::EmptyReply);
        }
        Ok(bytes.to_vec())
    }
}
