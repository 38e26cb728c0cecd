//! HTTP router construction.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api;
use crate::state::AppState;

/// Build the application router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    // Leave headroom above the file limit for multipart framing.
    let body_limit = state.max_file_size + 64 * 1024;

    Router::new()
        .route("/health", get(api::health))
        .route("/upload", post(api::upload))
        .route("/chat", post(api::chat))
        .route("/clear/{session_id}", delete(api::clear_session))
        .route("/sessions", get(api::list_sessions))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
