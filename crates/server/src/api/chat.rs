//! Chat, clear, and session-listing endpoints.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::state::AppState;

use super::ApiError;

#[derive(Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub session_id: String,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub session_id: String,
}

/// POST /chat — answer a question against an uploaded document.
///
/// A blank message is rejected before the store, retriever, or generator is
/// touched.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let message = req.message.trim();
    if message.is_empty() {
        return Err(ApiError::InvalidInput("message must not be empty".to_string()));
    }

    let session = state.sessions.get(&req.session_id).ok_or_else(|| {
        ApiError::NotFound("session not found; upload a document first".to_string())
    })?;

    let selected = docqa_retrieval::retrieve(&session.chunks, message, state.top_k)?;
    let sections: Vec<&str> = selected.iter().map(|c| c.text.as_str()).collect();

    let response = state.generator.answer(message, &sections).await?;

    Ok(Json(ChatResponse {
        response,
        session_id: req.session_id,
    }))
}

#[derive(Serialize)]
pub struct ClearResponse {
    pub message: &'static str,
}

/// DELETE /clear/{session_id} — strict not-found semantics: clearing an
/// unknown id is a 404.
pub async fn clear_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<ClearResponse>, ApiError> {
    if state.sessions.remove(&session_id) {
        info!("Cleared session {session_id}");
        Ok(Json(ClearResponse {
            message: "session cleared",
        }))
    } else {
        Err(ApiError::NotFound("session not found".to_string()))
    }
}

#[derive(Serialize)]
pub struct SessionListResponse {
    pub sessions: Vec<String>,
    pub count: usize,
}

/// GET /sessions — ids of all active sessions.
pub async fn list_sessions(State(state): State<Arc<AppState>>) -> Json<SessionListResponse> {
    let sessions = state.sessions.ids();
    let count = sessions.len();
    Json(SessionListResponse { sessions, count })
}
