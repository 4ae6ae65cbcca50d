//! Story data model.
//!
//! A `StoryDocument` is built fresh for each request and discarded once the
//! response is sent. `IllustratedStory` is the same document after the
//! illustration fan-out has filled in one image slot per scene.

use serde::{Deserialize, Serialize};

/// Title shown on the single-scene fallback document.
pub const DEGRADED_STORY_TITLE: &str = "Generated Story";

/// Scene title used on the single-scene fallback document.
pub const DEGRADED_SCENE_TITLE: &str = "Complete Story";

/// A titled story split into ordered scenes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryDocument {
    /// Story title.
    pub title: String,
    /// Scenes in narrative order.
    pub scenes: Vec<Scene>,
}

/// One narrative beat of a story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    /// 1-based position of the scene within the story.
    pub scene_number: u32,
    /// Short heading, e.g. "Rising Action".
    pub scene_title: String,
    /// Scene prose, usually several paragraphs.
    pub content: String,
    /// Description handed to the image model, if the text model supplied one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_prompt: Option<String>,
}

impl StoryDocument {
    /// Builds the single-scene document used when the model reply could not be
    /// parsed. The raw reply becomes the scene content verbatim.
    #[must_use]
    pub fn degraded(raw_reply: &str, story_idea: &str) -> Self {
        Self {
            title: DEGRADED_STORY_TITLE.to_owned(),
            scenes: vec![Scene {
                scene_number: 1,
                scene_title: DEGRADED_SCENE_TITLE.to_owned(),
                content: raw_reply.to_owned(),
                image_prompt: Some(format!("Illustration of {story_idea}")),
            }],
        }
    }
}

impl Scene {
    /// Returns the image prompt if it is present and not blank.
    #[must_use]
    pub fn usable_image_prompt(&self) -> Option<&str> {
        self.image_prompt
            .as_deref()
            .filter(|prompt| !prompt.trim().is_empty())
    }
}

/// A story whose scenes have been through the illustration step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IllustratedStory {
    /// Story title.
    pub title: String,
    /// Scenes in narrative order, each with its illustration slot.
    pub scenes: Vec<IllustratedScene>,
}

/// A scene plus the outcome of its illustration request.
///
/// `image_data` and `enhanced_prompt` are either both set or both `None`;
/// `None` means illustration was skipped or failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IllustratedScene {
    /// The narrative scene.
    #[serde(flatten)]
    pub scene: Scene,
    /// Base64-encoded image bytes.
    pub image_data: Option<String>,
    /// The prompt actually sent to the image model.
    pub enhanced_prompt: Option<String>,
}

impl IllustratedScene {
    /// A scene with no illustration.
    #[must_use]
    pub fn without_image(scene: Scene) -> Self {
        Self {
            scene,
            image_data: None,
            enhanced_prompt: None,
        }
    }

    /// A scene with a successfully rendered illustration.
    #[must_use]
    pub fn with_image(scene: Scene, image_data: String, enhanced_prompt: String) -> Self {
        Self {
            scene,
            image_data: Some(image_data),
            enhanced_prompt: Some(enhanced_prompt),
        }
    }
}
