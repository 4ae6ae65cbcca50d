//! Command handlers for the narrative context.
//!
//! A handler validates the brief, calls the text model once and runs the
//! extractor over its reply.

use storyteller_core::error::StoryError;
use storyteller_core::generation::{TextGenerator, TextPrompt};
use tracing::{debug, error, info, instrument};

use crate::domain::commands::GenerateStory;
use crate::domain::extraction::{self, ExtractionOutcome};
use crate::domain::prompt::build_story_prompt;

/// Handles the `GenerateStory` command.
///
/// A blank story idea is rejected before the text model is called. A reply
/// that cannot be parsed is not an error: it yields
/// `ExtractionOutcome::Degraded`.
///
/// # Errors
///
/// Returns `StoryError::Validation` for a blank story idea and
/// `StoryError::Upstream` if the text model call fails.
#[instrument(skip_all, fields(correlation_id = %command.correlation_id))]
pub async fn handle_generate_story(
    command: &GenerateStory,
    text_generator: &dyn TextGenerator,
) -> Result<ExtractionOutcome, StoryError> {
    command.brief.validate()?;

    let prompt = TextPrompt::user(build_story_prompt(&command.brief));

    info!(stage = "awaiting_narrative", "requesting story from text model");
    let reply = text_generator.generate_text(&prompt).await.map_err(|e| {
        error!(stage = "failed", error = %e, "text model call failed");
        StoryError::upstream("generate story", e)
    })?;
    debug!(reply = %reply, "raw story reply received");

    info!(stage = "extracting_document", "extracting story document");
    let outcome = extraction::extract_or_degrade(&reply, command.brief.trimmed_idea());
    if outcome.is_degraded() {
        info!(stage = "degraded_complete", "story reply could not be parsed");
    } else {
        info!(
            stage = "complete",
            scene_count = outcome.document().scenes.len(),
            "story document extracted"
        );
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use storyteller_core::error::StoryError;
    use storyteller_core::generation::PromptRole;
    use storyteller_test_support::{FailingTextGenerator, ScriptedTextGenerator};
    use uuid::Uuid;

    use crate::application::command_handlers::handle_generate_story;
    use crate::domain::commands::{GenerateStory, StoryBrief};

    fn command(idea: &str) -> GenerateStory {
        GenerateStory {
            correlation_id: Uuid::new_v4(),
            brief: StoryBrief::with_defaults(idea, None, None, None),
        }
    }

    #[tokio::test]
    async fn test_handle_generate_story_returns_parsed_document() {
        // Arrange
        let generator = ScriptedTextGenerator::new(
            "```json\n{\"title\":\"T\",\"scenes\":[{\"scene_number\":1,\"scene_title\":\"A\",\"content\":\"x\",\"image_prompt\":\"p\"}]}\n```",
        );

        // Act
        let outcome = handle_generate_story(&command("a cat"), &generator)
            .await
            .unwrap();

        // Assert
        assert!(!outcome.is_degraded());
        assert_eq!(outcome.document().title, "T");

        let prompts = generator.prompts();
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0].role, PromptRole::User);
        assert!((prompts[0].options.temperature - 0.8).abs() < f64::EPSILON);
        assert_eq!(prompts[0].options.max_output_tokens, 2000);
        assert!(prompts[0].text.contains("\"a cat\""));
    }

    #[tokio::test]
    async fn test_handle_generate_story_degrades_on_prose_reply() {
        // Arrange
        let generator = ScriptedTextGenerator::new("Just a story, no JSON.");

        // Act
        let outcome = handle_generate_story(&command("  a cat  "), &generator)
            .await
            .unwrap();

        // Assert
        assert!(outcome.is_degraded());
        let document = outcome.into_document();
        assert_eq!(document.scenes[0].content, "Just a story, no JSON.");
        assert_eq!(
            document.scenes[0].image_prompt.as_deref(),
            Some("Illustration of a cat")
        );
    }

    #[tokio::test]
    async fn test_handle_generate_story_rejects_blank_idea_without_calling_model() {
        // Arrange
        let generator = ScriptedTextGenerator::new("unused");

        // Act
        let result = handle_generate_story(&command("   "), &generator).await;

        // Assert
        assert!(matches!(result, Err(StoryError::Validation(_))));
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_handle_generate_story_maps_model_failure_to_upstream() {
        // Act
        let result = handle_generate_story(&command("a cat"), &FailingTextGenerator).await;

        // Assert
        match result {
            Err(StoryError::Upstream { operation, message }) => {
                assert_eq!(operation, "generate story");
                assert!(message.contains("503"));
            }
            other => panic!("expected upstream error, got {other:?}"),
        }
    }
}
