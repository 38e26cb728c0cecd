//! Document upload endpoint: extract, chunk, store.

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use tracing::info;

use docqa_ingest::{chunk_text, extract_document};

use crate::state::AppState;

use super::ApiError;

#[derive(Serialize)]
pub struct UploadResponse {
    pub session_id: String,
    pub filename: String,
    pub chunk_count: usize,
    pub content_length: usize,
}

/// POST /upload — multipart form with a `file` field carrying PDF bytes.
///
/// A failed upload creates no session.
pub async fn upload(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    // Find the `file` field; other fields are ignored.
    let mut file: Option<(String, axum::body::Bytes)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidInput(format!("multipart error: {e}")))?
    {
        if field.name() == Some("file") {
            let filename = field
                .file_name()
                .map(str::to_string)
                .filter(|n| !n.is_empty())
                .ok_or_else(|| ApiError::InvalidInput("no file selected".to_string()))?;
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::InvalidInput(format!("failed to read file: {e}")))?;
            file = Some((filename, bytes));
            break;
        }
    }
    let (filename, bytes) =
        file.ok_or_else(|| ApiError::InvalidInput("missing 'file' form field".to_string()))?;

    if bytes.len() > state.max_file_size {
        return Err(ApiError::PayloadTooLarge(format!(
            "file exceeds the {} byte limit",
            state.max_file_size
        )));
    }

    let doc = extract_document(&bytes, &filename)?;
    let content_length = doc.total_chars();
    let chunks = chunk_text(&doc.text, &state.chunking);

    let session = state.sessions.create(doc.filename, chunks);
    info!(
        "Uploaded '{}': {} chars, {} chunks, session {}",
        session.filename,
        content_length,
        session.chunks.len(),
        session.id
    );

    Ok(Json(UploadResponse {
        session_id: session.id.clone(),
        filename: session.filename.clone(),
        chunk_count: session.chunks.len(),
        content_length,
    }))
}
