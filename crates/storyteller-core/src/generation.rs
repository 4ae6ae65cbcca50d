//! Model provider abstractions.
//!
//! The narrative and illustration contexts talk to generative models only
//! through these traits, so handlers can be exercised with in-memory doubles.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Default square edge, in pixels, for rendered illustrations.
pub const DEFAULT_IMAGE_DIMENSION: u32 = 1024;

/// Errors raised by model provider clients.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The request could not be sent or the response could not be read.
    #[error("request failed: {0}")]
    Http(String),

    /// The provider answered with a non-success status.
    #[error("provider returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, as text.
        body: String,
    },

    /// The provider's response did not have the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),

    /// The provider answered successfully but produced no content.
    #[error("provider returned an empty reply")]
    EmptyReply,
}

/// Author of a prompt turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptRole {
    /// The end user.
    User,
}

/// Sampling options for a text generation call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationOptions {
    /// Sampling temperature.
    pub temperature: f64,
    /// Upper bound on generated tokens.
    pub max_output_tokens: u32,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            temperature: 0.8,
            max_output_tokens: 2000,
        }
    }
}

/// A single role-tagged prompt plus its sampling options.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrompt {
    /// Who is speaking.
    pub role: PromptRole,
    /// Prompt text.
    pub text: String,
    /// Sampling options.
    pub options: GenerationOptions,
}

impl TextPrompt {
    /// A user-role prompt with default options.
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: PromptRole::User,
            text: text.into(),
            options: GenerationOptions::default(),
        }
    }
}

/// A text-to-image request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    /// Full prompt sent to the image model.
    pub prompt: String,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
}

impl ImageRequest {
    /// A request for a square image of the default size.
    #[must_use]
    pub fn square(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            width: DEFAULT_IMAGE_DIMENSION,
            height: DEFAULT_IMAGE_DIMENSION,
        }
    }
}

/// A text model that turns one prompt into one reply.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generates a single text reply for `prompt`.
    async fn generate_text(&self, prompt: &TextPrompt) -> Result<String, GenerationError>;
}

/// An image model that renders a prompt into encoded image bytes.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Renders `request` and returns the raw image bytes.
    async fn generate_image(&self, request: &ImageRequest) -> Result<Vec<u8>, GenerationError>;
}
