//! Shared application state.

use std::sync::Arc;

use storyteller_core::generation::{ImageGenerator, TextGenerator};
use storyteller_providers::default_client;
use storyteller_providers::gemini::GeminiTextGenerator;
use storyteller_providers::huggingface::HuggingFaceImageGenerator;

use crate::config::AppConfig;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Text model used to write stories.
    pub text_generator: Arc<dyn TextGenerator>,
    /// Image model used to illustrate scenes.
    pub image_generator: Arc<dyn ImageGenerator>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        text_generator: Arc<dyn TextGenerator>,
        image_generator: Arc<dyn ImageGenerator>,
    ) -> Self {
        Self {
            text_generator,
            image_generator,
        }
    }

    /// Create application state backed by the configured model providers.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        let client = default_client();
        let text_generator = GeminiTextGenerator::new(
            client.clone(),
            config.gemini_api_key.clone(),
            config.gemini_api_base.clone(),
            config.gemini_model.clone(),
        );
        let image_generator = HuggingFaceImageGenerator::new(
            client,
            config.hf_api_token.clone(),
            config.hf_api_base.clone(),
            config.hf_image_model.clone(),
        );
        Self::new(Arc::new(text_generator), Arc::new(image_generator))
    }
}
