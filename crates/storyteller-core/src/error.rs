//! Domain error types.

use thiserror::Error;

/// Top-level error type for story requests.
///
/// Extraction failures and per-scene illustration failures never appear
/// here: they are recovered inside their own contexts.
#[derive(Debug, Error)]
pub enum StoryError {
    /// Required input was missing or blank.
    #[error("{0}")]
    Validation(String),

    /// An upstream model provider failed the request.
    #[error("Failed to {operation}: {message}")]
    Upstream {
        /// What the request was trying to do, e.g. "generate story".
        operation: &'static str,
        /// The provider's error message.
        message: String,
    },

    /// Any other failure. The message is logged, never returned to callers.
    #[error("internal error: {0}")]
    Internal(String),
}

impl StoryError {
    /// Wraps a provider error raised while performing `operation`.
    pub fn upstream(operation: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Upstream {
            operation,
            message: err.to_string(),
        }
    }
}
