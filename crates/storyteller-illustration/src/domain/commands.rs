//! Commands for the illustration context.

use storyteller_core::error::StoryError;
use storyteller_narrative::domain::commands::StoryBrief;
use uuid::Uuid;

/// Art style used when the caller does not pick one.
pub const DEFAULT_ART_STYLE: &str = "realistic";

/// Command to render a single image from a free-form description.
#[derive(Debug, Clone)]
pub struct GenerateImage {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// What to draw.
    pub image_prompt: String,
    /// Style modifier appended to the prompt.
    pub art_style: String,
}

impl GenerateImage {
    /// Rejects a command whose image prompt is empty after trimming.
    ///
    /// # Errors
    ///
    /// Returns `StoryError::Validation` if the image prompt is blank.
    pub fn validate(&self) -> Result<(), StoryError> {
        if self.image_prompt.trim().is_empty() {
            return Err(StoryError::Validation("Image prompt is required".into()));
        }
        Ok(())
    }
}

/// Command to write a story and illustrate every scene.
#[derive(Debug, Clone)]
pub struct GenerateCompleteStory {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// What to write.
    pub brief: StoryBrief,
    /// Style modifier applied to every scene illustration.
    pub art_style: String,
}

/// Resolves an optional art style to the style actually used.
#[must_use]
pub fn art_style_or_default(art_style: Option<String>) -> String {
    art_style.unwrap_or_else(|| DEFAULT_ART_STYLE.to_owned())
}
