//! HTTP endpoint modules and the error boundary.
//!
//! Every component failure is converted here into a structured
//! `{"error": …}` JSON body; no error escapes a handler as a panic.

mod chat;
mod health;
mod upload;

#[cfg(test)]
mod tests;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

// ── Error boundary ───────────────────────────────────────────────

#[derive(Debug)]
pub enum ApiError {
    /// Malformed request body, blank message, missing upload field.
    InvalidInput(String),
    /// Non-PDF upload, unparseable PDF, or no extractable text.
    UnsupportedFormat(String),
    /// Unknown session id.
    NotFound(String),
    /// Upload over the configured size limit.
    PayloadTooLarge(String),
    /// External model API failure. The detail is logged, not returned.
    GenerationFailed(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InvalidInput(m) => (StatusCode::BAD_REQUEST, m),
            ApiError::UnsupportedFormat(m) => (StatusCode::BAD_REQUEST, m),
            ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m),
            ApiError::PayloadTooLarge(m) => (StatusCode::PAYLOAD_TOO_LARGE, m),
            ApiError::GenerationFailed(detail) => {
                tracing::error!("answer generation failed: {detail}");
                (
                    StatusCode::BAD_GATEWAY,
                    "answer generation failed, please try again".to_string(),
                )
            }
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<docqa_ingest::ExtractionError> for ApiError {
    fn from(e: docqa_ingest::ExtractionError) -> Self {
        ApiError::UnsupportedFormat(e.to_string())
    }
}

impl From<docqa_retrieval::RetrievalError> for ApiError {
    fn from(e: docqa_retrieval::RetrievalError) -> Self {
        ApiError::InvalidInput(e.to_string())
    }
}

impl From<docqa_llm::LlmError> for ApiError {
    fn from(e: docqa_llm::LlmError) -> Self {
        ApiError::GenerationFailed(e.to_string())
    }
}

// ── Re-exports for route registration ────────────────────────────

pub use chat::{chat, clear_session, list_sessions};
pub use health::health;
pub use upload::upload;
