//! Storyteller API server entry point.

use std::error::Error;

use storyteller_api::config::AppConfig;
use storyteller_api::state::AppState;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    match dotenvy::dotenv() {
        Err(e) if !e.not_found() => tracing::warn!(error = %e, "failed to load .env file"),
        _ => {}
    }

    tracing::info!("Starting Storyteller API server");

    // Read and validate configuration before accepting any request.
    let config = AppConfig::from_env().inspect_err(|e| {
        tracing::error!(error = %e, "refusing to start without valid configuration");
    })?;
    let addr = config.socket_addr().await?;

    let app = storyteller_api::app(AppState::from_config(&config));

    tracing::info!(
        text_model = %config.gemini_model,
        image_model = %config.hf_image_model,
        "Listening on {}",
        addr
    );
    tracing::info!(
        endpoints = "GET /api/health, POST /api/generate-story, POST /api/generate-image, POST /api/generate-complete-story",
        "routes mounted"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
