//! Command handlers for the illustration context.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use storyteller_core::error::StoryError;
use storyteller_core::generation::{GenerationError, ImageGenerator, ImageRequest, TextGenerator};
use storyteller_core::story::IllustratedStory;
use storyteller_narrative::application::command_handlers::handle_generate_story;
use storyteller_narrative::domain::commands::GenerateStory;
use tracing::{error, info, instrument};

use crate::application::fanout::illustrate_story;
use crate::domain::commands::{GenerateCompleteStory, GenerateImage};
use crate::domain::prompt::build_enhanced_prompt;

/// A single rendered image and the prompt that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    /// Base64-encoded image bytes.
    pub image_data: String,
    /// The prompt sent to the image model.
    pub prompt_used: String,
}

/// Handles the `GenerateImage` command.
///
/// # Errors
///
/// Returns `StoryError::Validation` for a blank image prompt and
/// `StoryError::Upstream` if the image model call fails or returns no bytes.
#[instrument(skip_all, fields(correlation_id = %command.correlation_id))]
pub async fn handle_generate_image(
    command: &GenerateImage,
    image_generator: &dyn ImageGenerator,
) -> Result<GeneratedImage, StoryError> {
    command.validate()?;

    let prompt_used = build_enhanced_prompt(command.image_prompt.trim(), &command.art_style);
    info!(prompt = %prompt_used, "requesting image");

    let bytes = image_generator
        .generate_image(&ImageRequest::square(prompt_used.clone()))
        .await
        .and_then(|bytes| {
            if bytes.is_empty() {
                Err(GenerationError::EmptyReply)
            } else {
                Ok(bytes)
            }
        })
        .map_err(|e| {
            error!(error = %e, "image model call failed");
            StoryError::upstream("generate image", e)
        })?;

    Ok(GeneratedImage {
        image_data: BASE64.encode(bytes),
        prompt_used,
    })
}

/// Handles the `GenerateCompleteStory` command: writes the story, then
/// illustrates every scene.
///
/// Once the text model has answered, the request always succeeds; scenes
/// whose illustration fails are returned without an image.
///
/// # Errors
///
/// Returns `StoryError::Validation` for a blank story idea and
/// `StoryError::Upstream` if the text model call fails. No image request is
/// made in either case.
#[instrument(skip_all, fields(correlation_id = %command.correlation_id))]
pub async fn handle_generate_complete_story(
    command: &GenerateCompleteStory,
    text_generator: &dyn TextGenerator,
    image_generator: &dyn ImageGenerator,
) -> Result<IllustratedStory, StoryError> {
    let story_command = GenerateStory {
        correlation_id: command.correlation_id,
        brief: command.brief.clone(),
    };
    let outcome = handle_generate_story(&story_command, text_generator).await?;

    info!(
        stage = "illustrating_scenes",
        degraded = outcome.is_degraded(),
        art_style = %command.art_style,
        "illustrating story scenes"
    );
    let story = illustrate_story(outcome.into_document(), &command.art_style, image_generator).await;

    info!(stage = "complete", title = %story.title, "complete story ready");
    Ok(story)
}

#[cfg(test)]
mod tests {
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD as BASE64;
    use storyteller_core::error::StoryError;
    use storyteller_narrative::domain::commands::StoryBrief;
    use storyteller_test_support::{
        FailingImageGenerator, FailingTextGenerator, RecordingImageGenerator,
        ScriptedTextGenerator,
    };
    use uuid::Uuid;

    use super::{handle_generate_complete_story, handle_generate_image};
    use crate::domain::commands::{GenerateCompleteStory, GenerateImage};

    const FOUR_SCENES: &str = r#"```json
{"title":"The Lighthouse","scenes":[
 {"scene_number":1,"scene_title":"Introduction","content":"Fog.","image_prompt":"a lighthouse in fog"},
 {"scene_number":2,"scene_title":"Rising Action","content":"A ship.","image_prompt":"a ship on rocks"},
 {"scene_number":3,"scene_title":"Climax","content":"The storm.","image_prompt":"a storm at sea"},
 {"scene_number":4,"scene_title":"Resolution","content":"Dawn.","image_prompt":"a calm dawn"}
]}
```"#;

    fn complete_story(idea: &str) -> GenerateCompleteStory {
        GenerateCompleteStory {
            correlation_id: Uuid::new_v4(),
            brief: StoryBrief::with_defaults(idea, None, None, None),
            art_style: "oil painting".into(),
        }
    }

    #[tokio::test]
    async fn test_handle_generate_image_encodes_bytes_and_echoes_prompt() {
        // Arrange
        let generator = RecordingImageGenerator::new(b"img".to_vec());
        let command = GenerateImage {
            correlation_id: Uuid::new_v4(),
            image_prompt: " a cat ".into(),
            art_style: "anime".into(),
        };

        // Act
        let image = handle_generate_image(&command, &generator).await.unwrap();

        // Assert
        assert_eq!(image.image_data, BASE64.encode(b"img"));
        assert_eq!(
            image.prompt_used,
            "a cat, anime style, high quality, detailed, storybook illustration"
        );
        assert_eq!(generator.requests()[0].prompt, image.prompt_used);
    }

    #[tokio::test]
    async fn test_handle_generate_image_rejects_blank_prompt() {
        let generator = RecordingImageGenerator::new(b"img".to_vec());
        let command = GenerateImage {
            correlation_id: Uuid::new_v4(),
            image_prompt: "  ".into(),
            art_style: "anime".into(),
        };

        let result = handle_generate_image(&command, &generator).await;

        assert!(matches!(result, Err(StoryError::Validation(_))));
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_handle_generate_image_surfaces_model_failure() {
        let command = GenerateImage {
            correlation_id: Uuid::new_v4(),
            image_prompt: "a cat".into(),
            art_style: "anime".into(),
        };

        let result = handle_generate_image(&command, &FailingImageGenerator).await;

        assert!(matches!(
            result,
            Err(StoryError::Upstream { operation: "generate image", .. })
        ));
    }

    #[tokio::test]
    async fn test_complete_story_illustrates_all_four_scenes() {
        // Arrange
        let text = ScriptedTextGenerator::new(FOUR_SCENES);
        let images = RecordingImageGenerator::new(b"png".to_vec());

        // Act
        let story = handle_generate_complete_story(&complete_story("a lighthouse"), &text, &images)
            .await
            .unwrap();

        // Assert
        assert_eq!(story.title, "The Lighthouse");
        assert_eq!(story.scenes.len(), 4);
        assert!(story.scenes.iter().all(|s| s.image_data.is_some()));
        assert_eq!(
            story.scenes[3].enhanced_prompt.as_deref(),
            Some("a calm dawn, oil painting style, high quality, detailed, storybook illustration")
        );
        assert_eq!(text.call_count(), 1);
        assert_eq!(images.call_count(), 4);
    }

    #[tokio::test]
    async fn test_complete_story_isolates_failed_scene() {
        // Arrange
        let text = ScriptedTextGenerator::new(FOUR_SCENES);
        let images = RecordingImageGenerator::new(b"png".to_vec()).failing_on("a storm at sea");

        // Act
        let story = handle_generate_complete_story(&complete_story("a lighthouse"), &text, &images)
            .await
            .unwrap();

        // Assert
        let missing: Vec<u32> = story
            .scenes
            .iter()
            .filter(|s| s.image_data.is_none())
            .map(|s| s.scene.scene_number)
            .collect();
        assert_eq!(missing, vec![3]);
    }

    #[tokio::test]
    async fn test_complete_story_illustrates_degraded_document() {
        // Arrange
        let text = ScriptedTextGenerator::new("The model forgot about JSON.");
        let images = RecordingImageGenerator::new(b"png".to_vec());

        // Act
        let story = handle_generate_complete_story(&complete_story("a lighthouse"), &text, &images)
            .await
            .unwrap();

        // Assert
        assert_eq!(story.scenes.len(), 1);
        assert_eq!(story.scenes[0].scene.content, "The model forgot about JSON.");
        assert_eq!(
            images.requests()[0].prompt,
            "Illustration of a lighthouse, oil painting style, high quality, detailed, storybook illustration"
        );
    }

    #[tokio::test]
    async fn test_complete_story_blank_idea_makes_no_calls() {
        let text = ScriptedTextGenerator::new(FOUR_SCENES);
        let images = RecordingImageGenerator::new(b"png".to_vec());

        let result = handle_generate_complete_story(&complete_story(" \n"), &text, &images).await;

        assert!(matches!(result, Err(StoryError::Validation(_))));
        assert_eq!(text.call_count(), 0);
        assert_eq!(images.call_count(), 0);
    }

    #[tokio::test]
    async fn test_complete_story_text_failure_aborts_before_images() {
        let images = RecordingImageGenerator::new(b"png".to_vec());

        let result =
            handle_generate_complete_story(&complete_story("a lighthouse"), &FailingTextGenerator, &images)
                .await;

        assert!(matches!(result, Err(StoryError::Upstream { .. })));
        assert_eq!(images.call_count(), 0);
    }
}
