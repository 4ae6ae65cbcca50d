//! Concurrent per-scene illustration.
//!
//! Every scene with a usable image prompt gets its own image request. All
//! requests run concurrently on the calling task and are joined before the
//! story is returned. A failed request empties only its own scene's slot.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use futures::future::join_all;
use storyteller_core::generation::{ImageGenerator, ImageRequest};
use storyteller_core::story::{IllustratedScene, IllustratedStory, Scene, StoryDocument};
use tracing::{debug, info, instrument, warn};

use crate::domain::prompt::build_enhanced_prompt;

/// Illustrates every scene of `document` in `art_style`.
///
/// Never fails: scenes whose request fails, or which have no image prompt,
/// come back with `image_data` and `enhanced_prompt` set to `None`. Scene
/// order is preserved.
pub async fn illustrate_story(
    document: StoryDocument,
    art_style: &str,
    image_generator: &dyn ImageGenerator,
) -> IllustratedStory {
    let StoryDocument { title, scenes } = document;
    let scene_count = scenes.len();

    let scenes = join_all(
        scenes
            .into_iter()
            .map(|scene| illustrate_scene(scene, art_style, image_generator)),
    )
    .await;

    let illustrated = scenes.iter().filter(|s| s.image_data.is_some()).count();
    info!(scene_count, illustrated, "illustration fan-out settled");

    IllustratedStory { title, scenes }
}

#[instrument(skip_all, fields(scene_number = scene.scene_number))]
async fn illustrate_scene(
    scene: Scene,
    art_style: &str,
    image_generator: &dyn ImageGenerator,
) -> IllustratedScene {
    let Some(image_prompt) = scene.usable_image_prompt() else {
        debug!("scene has no image prompt, skipping");
        return IllustratedScene::without_image(scene);
    };
    let enhanced_prompt = build_enhanced_prompt(image_prompt, art_style);
    debug!(prompt = %enhanced_prompt, "requesting scene illustration");

    match image_generator
        .generate_image(&ImageRequest::square(enhanced_prompt.clone()))
        .await
    {
        Ok(bytes) if !bytes.is_empty() => {
            IllustratedScene::with_image(scene, BASE64.encode(bytes), enhanced_prompt)
        }
        Ok(_) => {
            warn!("image model returned no bytes");
            IllustratedScene::without_image(scene)
        }
        Err(e) => {
            warn!(error = %e, "scene illustration failed");
            IllustratedScene::without_image(scene)
        }
    }
}
