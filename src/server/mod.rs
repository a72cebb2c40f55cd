//! HTTP service exposing scoring and resume parsing

pub mod errors;
pub mod handlers;
pub mod state;

use crate::config::Config;
use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

pub use errors::AppError;
pub use state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.server.max_upload_bytes;

    Router::new()
        .route("/", get(handlers::root_handler))
        .route("/health", get(handlers::health_handler))
        .route("/score", post(handlers::score_handler))
        .route("/upload-resume", post(handlers::upload_resume_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let addr = config.bind_address();
    let state = AppState::new(config).context("Failed to build application state")?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    log::info!("Listening on http://{}", addr);

    axum::serve(listener, app).await.context("Server terminated")?;
    Ok(())
}
