//! HTTP-level tests driving the real router with a fake LLM provider.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use docqa_ingest::{chunk_text, ChunkConfig};
use docqa_llm::{AnswerGenerator, LlmError, LlmProvider, Message};

use crate::router::build_router;
use crate::sessions::SessionStore;
use crate::state::AppState;

// ── Fixtures ─────────────────────────────────────────────────────

/// Provider returning a canned answer and counting invocations.
struct CannedProvider {
    calls: Arc<AtomicUsize>,
    fail: bool,
}

#[async_trait]
impl LlmProvider for CannedProvider {
    async fn complete(
        &self,
        _messages: Vec<Message>,
        _temperature: f32,
        _max_tokens: u32,
    ) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(LlmError::ApiError {
                status: 500,
                body: "upstream broke".into(),
            })
        } else {
            Ok("The budget is $250,000.".into())
        }
    }
}

struct TestApp {
    state: Arc<AppState>,
    router: Router,
    llm_calls: Arc<AtomicUsize>,
}

fn test_app_with(fail: bool) -> TestApp {
    let calls = Arc::new(AtomicUsize::new(0));
    let provider = CannedProvider {
        calls: calls.clone(),
        fail,
    };
    let state = Arc::new(AppState {
        sessions: SessionStore::new(),
        generator: AnswerGenerator::new(Box::new(provider), 0.2, 256),
        chunking: ChunkConfig {
            chunk_size: 1000,
            chunk_overlap: 200,
        },
        top_k: 3,
        max_file_size: 1024 * 1024,
    });
    TestApp {
        router: build_router(state.clone()),
        state,
        llm_calls: calls,
    }
}

fn test_app() -> TestApp {
    test_app_with(false)
}

/// Seed a stored session the way /upload would, returning its id.
fn seed_session(app: &TestApp, text: &str) -> String {
    let chunks = chunk_text(text, &app.state.chunking);
    app.state
        .sessions
        .create("report.pdf".to_string(), chunks)
        .id
        .clone()
}

async fn send(router: Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = router.oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn json_post(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn chat_request(session_id: &str, message: &str) -> Request<Body> {
    json_post(
        "/chat",
        serde_json::json!({ "message": message, "session_id": session_id }),
    )
}

/// Build a minimal single-page PDF containing `text`, computing the xref
/// table from actual byte offsets so the file is well-formed.
fn minimal_pdf(text: &str) -> Vec<u8> {
    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
         /Resources << /Font << /F1 5 0 R >> >> /Contents 4 0 R >>"
            .to_string(),
        {
            let stream = format!("BT /F1 12 Tf 72 720 Td ({text}) Tj ET");
            format!(
                "<< /Length {} >>\nstream\n{}\nendstream",
                stream.len(),
                stream
            )
        },
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica \
         /Encoding /WinAnsiEncoding >>"
            .to_string(),
    ];

    let mut out = String::from("%PDF-1.4\n");
    let mut offsets = Vec::new();
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.push_str(&format!("{} 0 obj\n{}\nendobj\n", i + 1, body));
    }
    let xref_offset = out.len();
    out.push_str(&format!("xref\n0 {}\n", objects.len() + 1));
    out.push_str("0000000000 65535 f \n");
    for off in &offsets {
        out.push_str(&format!("{off:010} 00000 n \n"));
    }
    out.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        objects.len() + 1,
        xref_offset
    ));
    out.into_bytes()
}

const BOUNDARY: &str = "docqa-test-boundary";

fn multipart_upload(field_name: &str, filename: &str, payload: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{field_name}\"; filename=\"{filename}\"\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(payload);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

// ── Health ───────────────────────────────────────────────────────

#[tokio::test]
async fn health_reports_ok() {
    let app = test_app();
    let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, json) = send(app.router, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

// ── Chat ─────────────────────────────────────────────────────────

#[tokio::test]
async fn chat_with_unknown_session_is_404() {
    let app = test_app();
    let (status, json) = send(app.router, chat_request("no-such-id", "hello?")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("session"));
}

#[tokio::test]
async fn blank_message_is_rejected_before_the_llm_runs() {
    let app = test_app();
    let id = seed_session(&app, "The total budget is $250,000 for the year.");

    let (status, json) = send(app.router, chat_request(&id, "   \t ")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("empty"));
    assert_eq!(app.llm_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn chat_answers_from_a_stored_session() {
    let app = test_app();
    let id = seed_session(&app, "The total budget is $250,000 for the year.");

    let (status, json) = send(app.router, chat_request(&id, "What is the budget?")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["response"], "The budget is $250,000.");
    assert_eq!(json["session_id"], id);
    assert_eq!(app.llm_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn generation_failure_maps_to_502_with_generic_body() {
    let app = test_app_with(true);
    let id = seed_session(&app, "Some document content that is long enough.");

    let (status, json) = send(app.router, chat_request(&id, "anything?")).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let message = json["error"].as_str().unwrap();
    // Internal detail must not leak into the body.
    assert!(!message.contains("upstream broke"));
    assert!(message.contains("generation failed"));
}

// ── Clear ────────────────────────────────────────────────────────

#[tokio::test]
async fn cleared_session_is_gone_for_chat() {
    let app = test_app();
    let id = seed_session(&app, "Chapter one. Chapter two. Chapter three.");

    let clear = Request::builder()
        .method("DELETE")
        .uri(format!("/clear/{id}"))
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(app.router.clone(), clear).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(app.router, chat_request(&id, "still there?")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn clearing_an_unknown_session_is_404() {
    let app = test_app();
    let req = Request::builder()
        .method("DELETE")
        .uri("/clear/never-existed")
        .body(Body::empty())
        .unwrap();
    let (status, json) = send(app.router, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("not found"));
}

// ── Upload ───────────────────────────────────────────────────────

#[tokio::test]
async fn upload_then_chat_round_trip() {
    let app = test_app();
    let pdf = minimal_pdf("The total budget for the project is 250,000 dollars this year.");

    let (status, json) = send(
        app.router.clone(),
        multipart_upload("file", "report.pdf", &pdf),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["filename"], "report.pdf");
    assert!(json["chunk_count"].as_u64().unwrap() >= 1);
    assert!(json["content_length"].as_u64().unwrap() >= 10);

    let session_id = json["session_id"].as_str().unwrap().to_string();
    assert_eq!(app.state.sessions.len(), 1);
    assert!(app.state.sessions.get(&session_id).is_some());

    let (status, json) = send(app.router, chat_request(&session_id, "What is the budget?")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["response"], "The budget is $250,000.");
    assert_eq!(json["session_id"], session_id);
    assert_eq!(app.llm_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn repeated_uploads_issue_distinct_session_ids() {
    let app = test_app();
    let pdf = minimal_pdf("Identical document content uploaded twice in a row.");

    let (status, first) = send(
        app.router.clone(),
        multipart_upload("file", "report.pdf", &pdf),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (status, second) = send(app.router, multipart_upload("file", "report.pdf", &pdf)).await;
    assert_eq!(status, StatusCode::OK);

    assert_ne!(first["session_id"], second["session_id"]);
    assert_eq!(app.state.sessions.len(), 2);
}

#[tokio::test]
async fn uploading_a_text_file_creates_no_session() {
    let app = test_app();
    let req = multipart_upload("file", "notes.txt", b"plain text, not a pdf");
    let (status, json) = send(app.router, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("Unsupported"));
    assert!(app.state.sessions.is_empty());
}

#[tokio::test]
async fn uploading_garbage_pdf_bytes_creates_no_session() {
    let app = test_app();
    let req = multipart_upload("file", "fake.pdf", b"these bytes are not a pdf");
    let (status, _) = send(app.router, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(app.state.sessions.is_empty());
}

#[tokio::test]
async fn upload_without_a_file_field_is_400() {
    let app = test_app();
    let req = multipart_upload("attachment", "doc.pdf", b"%PDF-1.4");
    let (status, json) = send(app.router, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("file"));
}

// ── Sessions listing ─────────────────────────────────────────────

#[tokio::test]
async fn sessions_endpoint_reflects_the_store() {
    let app = test_app();
    let a = seed_session(&app, "First document body text.");
    let b = seed_session(&app, "Second document body text.");

    let req = Request::builder().uri("/sessions").body(Body::empty()).unwrap();
    let (status, json) = send(app.router, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 2);
    let ids: Vec<&str> = json["sessions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert!(ids.contains(&a.as_str()));
    assert!(ids.contains(&b.as_str()));
}
