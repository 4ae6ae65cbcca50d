//! Server configuration, read once at startup.

use std::fmt;
use std::net::SocketAddr;

use storyteller_providers::gemini::{DEFAULT_GEMINI_API_BASE, DEFAULT_GEMINI_MODEL};
use storyteller_providers::huggingface::{DEFAULT_HF_API_BASE, DEFAULT_HF_IMAGE_MODEL};

use crate::error::AppError;

/// Port used when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 5000;

/// Everything the server needs to start. Built once and handed to the
/// application state; nothing else reads the environment.
#[derive(Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Google Gemini API key.
    pub gemini_api_key: String,
    /// Hugging Face API token.
    pub hf_api_token: String,
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Gemini model name.
    pub gemini_model: String,
    /// Gemini REST base URL.
    pub gemini_api_base: String,
    /// Hugging Face text-to-image model id.
    pub hf_image_model: String,
    /// Hugging Face Inference API base URL.
    pub hf_api_base: String,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("gemini_api_key", &"<redacted>")
            .field("hf_api_token", &"<redacted>")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("gemini_model", &self.gemini_model)
            .field("gemini_api_base", &self.gemini_api_base)
            .field("hf_image_model", &self.hf_image_model)
            .field("hf_api_base", &self.hf_api_base)
            .finish()
    }
}

impl AppConfig {
    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if an API key is missing or `PORT` is not a
    /// valid port number.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`. Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if an API key is missing or `PORT` is not a
    /// valid port number.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let required = |key: &str| {
            get(key).ok_or_else(|| {
                AppError::Config(format!("{key} environment variable must be set"))
            })
        };

        let gemini_api_key = required("GEMINI_API_KEY")?;
        let hf_api_token = required("HF_API_TOKEN")?;
        let port = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            gemini_api_key,
            hf_api_token,
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_owned()),
            port,
            gemini_model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_owned()),
            gemini_api_base: get("GEMINI_API_BASE")
                .unwrap_or_else(|| DEFAULT_GEMINI_API_BASE.to_owned()),
            hf_image_model: get("HF_IMAGE_MODEL")
                .unwrap_or_else(|| DEFAULT_HF_IMAGE_MODEL.to_owned()),
            hf_api_base: get("HF_API_BASE").unwrap_or_else(|| DEFAULT_HF_API_BASE.to_owned()),
        })
    }

    /// The address to bind. `host` may be an IP address or a hostname; a
    /// hostname binds to the first address it resolves to.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `host` does not resolve to any address.
    pub async fn socket_addr(&self) -> Result<SocketAddr, AppError> {
        tokio::net::lookup_host((self.host.as_str(), self.port))
            .await
            .map_err(|e| AppError::Config(format!("cannot resolve HOST {}: {e}", self.host)))?
            .next()
            .ok_or_else(|| {
                AppError::Config(format!("HOST {} resolved to no addresses", self.host))
            })
    }
}
