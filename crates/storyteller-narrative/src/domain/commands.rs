//! Commands for the narrative context.

use storyteller_core::error::StoryError;
use uuid::Uuid;

/// Genre used when the caller does not pick one.
pub const DEFAULT_GENRE: &str = "fantasy";
/// Tone used when the caller does not pick one.
pub const DEFAULT_TONE: &str = "lighthearted";
/// Audience used when the caller does not pick one.
pub const DEFAULT_TARGET_AUDIENCE: &str = "general";

/// What the user asked for: the story idea plus its framing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryBrief {
    /// Free-form premise, required.
    pub story_idea: String,
    /// Story genre.
    pub genre: String,
    /// Narrative tone.
    pub tone: String,
    /// Intended readers.
    pub target_audience: String,
}

impl StoryBrief {
    /// Builds a brief, filling any omitted option with its default.
    #[must_use]
    pub fn with_defaults(
        story_idea: impl Into<String>,
        genre: Option<String>,
        tone: Option<String>,
        target_audience: Option<String>,
    ) -> Self {
        Self {
            story_idea: story_idea.into(),
            genre: genre.unwrap_or_else(|| DEFAULT_GENRE.to_owned()),
            tone: tone.unwrap_or_else(|| DEFAULT_TONE.to_owned()),
            target_audience: target_audience
                .unwrap_or_else(|| DEFAULT_TARGET_AUDIENCE.to_owned()),
        }
    }

    /// The story idea without surrounding whitespace.
    #[must_use]
    pub fn trimmed_idea(&self) -> &str {
        self.story_idea.trim()
    }

    /// Rejects a brief whose story idea is empty after trimming.
    ///
    /// # Errors
    ///
    /// Returns `StoryError::Validation` if the story idea is blank.
    pub fn validate(&self) -> Result<(), StoryError> {
        if self.trimmed_idea().is_empty() {
            return Err(StoryError::Validation("Story idea is required".into()));
        }
        Ok(())
    }
}

/// Command to write a story (text only) from a brief.
#[derive(Debug, Clone)]
pub struct GenerateStory {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// What to write.
    pub brief: StoryBrief,
}
