//! Routes for story generation.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::{Json, Router, routing::post};
use serde::Deserialize;
use storyteller_core::story::{IllustratedStory, StoryDocument};
use storyteller_illustration::application::command_handlers::handle_generate_complete_story;
use storyteller_illustration::domain::commands::{GenerateCompleteStory, art_style_or_default};
use storyteller_narrative::application::command_handlers::handle_generate_story;
use storyteller_narrative::domain::commands::{GenerateStory, StoryBrief};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /generate-story.
#[derive(Debug, Deserialize)]
pub struct GenerateStoryRequest {
    /// Story premise. Missing and blank are both rejected with 400.
    pub story_idea: Option<String>,
    /// Defaults to "fantasy".
    pub genre: Option<String>,
    /// Defaults to "lighthearted".
    pub tone: Option<String>,
    /// Defaults to "general".
    pub target_audience: Option<String>,
}

impl GenerateStoryRequest {
    fn into_brief(self) -> StoryBrief {
        StoryBrief::with_defaults(
            self.story_idea.unwrap_or_default(),
            self.genre,
            self.tone,
            self.target_audience,
        )
    }
}

/// Request body for POST /generate-complete-story.
#[derive(Debug, Deserialize)]
pub struct GenerateCompleteStoryRequest {
    /// Story fields, shared with /generate-story.
    #[serde(flatten)]
    pub story: GenerateStoryRequest,
    /// Defaults to "realistic".
    pub art_style: Option<String>,
}

/// POST /generate-story
#[instrument(skip(state, payload))]
async fn generate_story(
    State(state): State<AppState>,
    payload: Result<Json<GenerateStoryRequest>, JsonRejection>,
) -> Result<Json<StoryDocument>, ApiError> {
    let Json(request) = payload?;
    let command = GenerateStory {
        correlation_id: Uuid::new_v4(),
        brief: request.into_brief(),
    };

    info!(correlation_id = %command.correlation_id, "handling generate_story command");

    let outcome = handle_generate_story(&command, state.text_generator.as_ref()).await?;

    Ok(Json(outcome.into_document()))
}

/// POST /generate-complete-story
#[instrument(skip(state, payload))]
async fn generate_complete_story(
    State(state): State<AppState>,
    payload: Result<Json<GenerateCompleteStoryRequest>, JsonRejection>,
) -> Result<Json<IllustratedStory>, ApiError> {
    let Json(request) = payload?;
    let command = GenerateCompleteStory {
        correlation_id: Uuid::new_v4(),
        brief: request.story.into_brief(),
        art_style: art_style_or_default(request.art_style),
    };

    info!(correlation_id = %command.correlation_id, "handling generate_complete_story command");

    let story = handle_generate_complete_story(
        &command,
        state.text_generator.as_ref(),
        state.image_generator.as_ref(),
    )
    .await?;

    Ok(Json(story))
}

/// Returns the router for story generation.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generate-story", post(generate_story))
        .route("/generate-complete-story", post(generate_complete_story))
}
