//! Routes for single-image generation.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::{Json, Router, routing::post};
use serde::{Deserialize, Serialize};
use storyteller_illustration::application::command_handlers::handle_generate_image;
use storyteller_illustration::domain::commands::{GenerateImage, art_style_or_default};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /generate-image.
#[derive(Debug, Deserialize)]
pub struct GenerateImageRequest {
    /// What to draw. Missing and blank are both rejected with 400.
    pub image_prompt: Option<String>,
    /// Defaults to "realistic".
    pub art_style: Option<String>,
}

/// Response body for POST /generate-image.
#[derive(Debug, Serialize)]
pub struct GenerateImageResponse {
    /// Base64-encoded image bytes.
    pub image_data: String,
    /// The prompt sent to the image model.
    pub prompt_used: String,
}

/// POST /generate-image
#[instrument(skip(state, payload))]
async fn generate_image(
    State(state): State<AppState>,
    payload: Result<Json<GenerateImageRequest>, JsonRejection>,
) -> Result<Json<GenerateImageResponse>, ApiError> {
    let Json(request) = payload?;
    let command = GenerateImage {
        correlation_id: Uuid::new_v4(),
        image_prompt: request.image_prompt.unwrap_or_default(),
        art_style: art_style_or_default(request.art_style),
    };

    info!(correlation_id = %command.correlation_id, "handling generate_image command");

    let image = handle_generate_image(&command, state.image_generator.as_ref()).await?;

    Ok(Json(GenerateImageResponse {
        image_data: image.image_data,
        prompt_used: image.prompt_used,
    }))
}

/// Returns the router for single-image generation.
pub fn router() -> Router<AppState> {
    Router::new().route("/generate-image", post(generate_image))
}
