//! Test text generators — mock `TextGenerator` implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use storyteller_core::generation::{GenerationError, TextGenerator, TextPrompt};

/// A text generator that answers every prompt with the same reply and records
/// the prompts it received.
#[derive(Debug)]
pub struct ScriptedTextGenerator {
    reply: String,
    prompts: Mutex<Vec<TextPrompt>>,
}

impl ScriptedTextGenerator {
    /// Create a generator that always replies with `reply`.
    #[must_use]
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Returns a snapshot of every prompt received so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn prompts(&self) -> Vec<TextPrompt> {
        self.prompts.lock().unwrap().clone()
    }

    /// Number of calls made to `generate_text`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl TextGenerator for ScriptedTextGenerator {
    async fn generate_text(&self, prompt: &TextPrompt) -> Result<String, GenerationError> {
        self.prompts.lock().unwrap().push(prompt.clone());
        Ok(self.reply.clone())
    }
}

/// A text generator that always fails as if the provider were unavailable.
#[derive(Debug)]
pub struct FailingTextGenerator;

#[async_trait]
impl TextGenerator for FailingTextGenerator {
    async fn generate_text(&self, _prompt: &TextPrompt) -> Result<String, GenerationError> {
        Err(GenerationError::Status {
            status: 503,
            body: "service unavailable".into(),
        })
    }
}
