//! Route modules, one per endpoint group.

use axum::http::StatusCode;
use axum::response::Response;

use crate::error::ErrorBody;

pub mod health;
pub mod image;
pub mod story;

/// Fallback for unknown routes.
pub async fn not_found() -> Response {
    ErrorBody {
        error: "not_found",
        message: "Route not found".to_owned(),
    }
    .into_response_with(StatusCode::NOT_FOUND)
}
