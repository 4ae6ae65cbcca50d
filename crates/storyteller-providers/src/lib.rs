//! HTTP implementations of the `TextGenerator` and `ImageGenerator` traits.
//!
//! - [`gemini::GeminiTextGenerator`] calls the Google Gemini
//!   `generateContent` REST endpoint.
//! - [`huggingface::HuggingFaceImageGenerator`] calls the Hugging Face
//!   Inference API text-to-image endpoint.

pub mod gemini;
pub mod huggingface;

mod http;

pub use http::default_client;
