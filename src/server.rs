//! HTTP API for transcript lookup and citation annotation.

use crate::acquire::TranscriptAcquirer;
use crate::answer::AnswerStrategy;
use crate::citation::{self, Segment, Source};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info_span, Instrument};
use uuid::Uuid;

pub const MISSING_URL: &str = "Missing YouTube URL";
pub const TRANSCRIPT_NOT_AVAILABLE: &str = "Transcript not available";

/// Shared application state.
pub struct AppState {
    acquirer: TranscriptAcquirer,
    answers: Arc<dyn AnswerStrategy>,
}

impl AppState {
    pub fn new(acquirer: TranscriptAcquirer, answers: Arc<dyn AnswerStrategy>) -> Self {
        Self { acquirer, answers }
    }
}

/// Build the API router.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/youtube-transcript", post(transcript))
        .route("/transcript", post(transcript))
        .route("/api/annotate", post(annotate))
        .route("/api/citations/inspect", post(inspect))
        .layer(cors)
        .with_state(state)
}

// === Request/Response Types ===

#[derive(Deserialize)]
struct TranscriptRequest {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    question: Option<String>,
}

#[derive(Serialize)]
struct TranscriptResponse {
    transcript: String,
    title: String,
    thumbnail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    answer: Option<String>,
}

#[derive(Deserialize)]
struct AnnotateRequest {
    text: String,
    #[serde(default)]
    sources: Vec<Source>,
}

#[derive(Serialize)]
struct AnnotateResponse {
    segments: Vec<Segment>,
    speech: String,
}

#[derive(Deserialize)]
struct InspectRequest {
    #[serde(default)]
    sources: Vec<Source>,
    index: usize,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn transcript(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TranscriptRequest>, JsonRejection>,
) -> Response {
    let span = info_span!("transcript", request_id = %Uuid::new_v4());

    async move {
        let req = match payload {
            Ok(Json(req)) => req,
            Err(rejection) => {
                error!("Unreadable request body: {}", rejection.body_text());
                return error_response(StatusCode::INTERNAL_SERVER_ERROR, rejection.body_text());
            }
        };

        let Some(url) = req.url.filter(|u| !u.trim().is_empty()) else {
            return error_response(StatusCode::BAD_REQUEST, MISSING_URL);
        };

        match state.acquirer.acquire_or_absent(&url).await {
            Ok(Some(video)) => {
                let answer = req
                    .question
                    .filter(|q| !q.is_empty())
                    .map(|q| state.answers.find_answer(&video.transcript.text, &q));

                Json(TranscriptResponse {
                    transcript: video.transcript.text,
                    title: video.metadata.title,
                    thumbnail: video.metadata.thumbnail_url,
                    answer,
                })
                .into_response()
            }
            Ok(None) => error_response(StatusCode::NOT_FOUND, TRANSCRIPT_NOT_AVAILABLE),
            Err(e) => {
                error!("Transcript request failed: {}", e);
                error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        }
    }
    .instrument(span)
    .await
}

async fn annotate(payload: Result<Json<AnnotateRequest>, JsonRejection>) -> Response {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection),
    };

    Json(AnnotateResponse {
        segments: citation::annotate(&req.text, &req.sources),
        speech: citation::strip_for_speech(&req.text),
    })
    .into_response()
}

async fn inspect(payload: Result<Json<InspectRequest>, JsonRejection>) -> Response {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection),
    };

    match citation::inspect(&req.sources, req.index) {
        Some(inspection) => Json(inspection).into_response(),
        None => error_response(
            StatusCode::NOT_FOUND,
            format!("No source at index {}", req.index),
        ),
    }
}

/// Client-side body errors keep axum's status but use the JSON error shape.
fn rejection_response(rejection: JsonRejection) -> Response {
    error_response(rejection.status(), rejection.body_text())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answer::SentenceSearch;
    use crate::testing::{Behavior, FakeMetadata, FakeTool};
    use serde_json::{json, Value};

    struct TestServer {
        base: String,
        client: reqwest::Client,
        _scratch: tempfile::TempDir,
    }

    impl TestServer {
        async fn start(tool: Arc<FakeTool>, metadata: Arc<FakeMetadata>) -> Self {
            let scratch = tempfile::tempdir().unwrap();
            Self::start_in(tool, metadata, scratch.path().to_path_buf(), scratch).await
        }

        async fn start_in(
            tool: Arc<FakeTool>,
            metadata: Arc<FakeMetadata>,
            root: std::path::PathBuf,
            scratch: tempfile::TempDir,
        ) -> Self {
            let acquirer = TranscriptAcquirer::with_components(tool, metadata, root);
            let state = Arc::new(AppState::new(acquirer, Arc::new(SentenceSearch)));

            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            tokio::spawn(async move {
                axum::serve(listener, router(state)).await.unwrap();
            });

            Self {
                base: format!("http://{}", addr),
                client: reqwest::Client::new(),
                _scratch: scratch,
            }
        }

        async fn post(&self, path: &str, body: Value) -> (StatusCode, Value) {
            let response = self
                .client
                .post(format!("{}{}", self.base, path))
                .json(&body)
                .send()
                .await
                .unwrap();
            let status = StatusCode::from_u16(response.status().as_u16()).unwrap();
            (status, response.json().await.unwrap())
        }
    }

    #[tokio::test]
    async fn test_transcript_without_question() {
        let server = TestServer::start(FakeTool::with_captions(), FakeMetadata::ok()).await;

        let (status, body) = server
            .post("/api/youtube-transcript", json!({"url": "https://youtu.be/dQw4w9WgXcQ"}))
            .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["transcript"].as_str().unwrap().starts_with("We're no strangers"));
        assert_eq!(body["title"], "Never Gonna Give You Up");
        assert_eq!(body["thumbnail"], "https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg");
        assert!(body.get("answer").is_none());
    }

    #[tokio::test]
    async fn test_transcript_with_question() {
        let server = TestServer::start(FakeTool::with_captions(), FakeMetadata::ok()).await;

        let (status, body) = server
            .post(
                "/api/youtube-transcript",
                json!({"url": "https://youtu.be/dQw4w9WgXcQ", "question": "Chorus"}),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["answer"], "And so do I Now the chorus");

        let (_, body) = server
            .post(
                "/api/youtube-transcript",
                json!({"url": "https://youtu.be/dQw4w9WgXcQ", "question": "unicorn"}),
            )
            .await;
        assert_eq!(body["answer"], "Sorry, I could not find an answer in the transcript.");
    }

    #[tokio::test]
    async fn test_empty_question_is_ignored() {
        let server = TestServer::start(FakeTool::with_captions(), FakeMetadata::ok()).await;

        let (status, body) = server
            .post("/transcript", json!({"url": "dQw4w9WgXcQ", "question": ""}))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.get("answer").is_none());
    }

    #[tokio::test]
    async fn test_missing_url() {
        let tool = FakeTool::with_captions();
        let server = TestServer::start(tool.clone(), FakeMetadata::ok()).await;

        for body in [json!({}), json!({"url": ""}), json!({"question": "chorus"})] {
            let (status, response) = server.post("/api/youtube-transcript", body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(response, json!({"error": "Missing YouTube URL"}));
        }
        assert_eq!(tool.calls(), 0);
    }

    #[tokio::test]
    async fn test_not_a_video_url() {
        let tool = FakeTool::with_captions();
        let metadata = FakeMetadata::ok();
        let server = TestServer::start(tool.clone(), metadata.clone()).await;

        let (status, body) = server
            .post("/api/youtube-transcript", json!({"url": "not a video url"}))
            .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Transcript not available"}));
        assert_eq!(tool.calls(), 0);
        assert_eq!(metadata.calls(), 0);
    }

    #[tokio::test]
    async fn test_acquisition_failures_are_not_found() {
        let cases = [
            (FakeTool::new(Behavior::Exit(1)), FakeMetadata::ok()),
            (FakeTool::new(Behavior::NotFound), FakeMetadata::ok()),
            (FakeTool::new(Behavior::Write("dQw4w9WgXcQ.en.vtt", "bogus")), FakeMetadata::ok()),
            (FakeTool::with_captions(), FakeMetadata::failing()),
        ];

        for (tool, metadata) in cases {
            let server = TestServer::start(tool, metadata).await;
            let (status, body) = server
                .post("/api/youtube-transcript", json!({"url": "https://youtu.be/dQw4w9WgXcQ"}))
                .await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(body["error"], "Transcript not available");
        }
    }

    #[tokio::test]
    async fn test_unexpected_failure_is_internal_error() {
        let scratch = tempfile::tempdir().unwrap();
        let blocker = scratch.path().join("blocker");
        std::fs::write(&blocker, "file").unwrap();
        let server =
            TestServer::start_in(FakeTool::with_captions(), FakeMetadata::ok(), blocker, scratch)
                .await;

        let (status, body) = server
            .post("/api/youtube-transcript", json!({"url": "dQw4w9WgXcQ"}))
            .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().starts_with("IO error"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_internal_error() {
        let server = TestServer::start(FakeTool::with_captions(), FakeMetadata::ok()).await;

        let response = server
            .client
            .post(format!("{}/api/youtube-transcript", server.base))
            .header("content-type", "application/json")
            .body("{not json")
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 500);
        let body: Value = response.json().await.unwrap();
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_annotate_route() {
        let server = TestServer::start(FakeTool::with_captions(), FakeMetadata::ok()).await;

        let (status, body) = server
            .post(
                "/api/annotate",
                json!({
                    "text": "Birds fly [1]. See [7].",
                    "sources": [{"pageContent": "Ornithology facts", "metadata": {}}]
                }),
            )
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["segments"],
            json!([
                {"type": "text", "text": "Birds fly "},
                {"type": "citation", "source_index": 0, "label": "Ornithology facts"},
                {"type": "text", "text": ". See "},
                {"type": "text", "text": "[7]"},
                {"type": "text", "text": "."}
            ])
        );
        assert_eq!(body["speech"], "Birds fly . See .");
    }

    #[tokio::test]
    async fn test_annotate_and_inspect_reject_bad_bodies_as_json() {
        let server = TestServer::start(FakeTool::with_captions(), FakeMetadata::ok()).await;

        for path in ["/api/annotate", "/api/citations/inspect"] {
            let response = server
                .client
                .post(format!("{}{}", server.base, path))
                .header("content-type", "application/json")
                .body("{not json")
                .send()
                .await
                .unwrap();
            assert_eq!(response.status().as_u16(), 400, "{}", path);
            let body: Value = response.json().await.unwrap();
            assert!(body["error"].is_string(), "{}", path);

            let (status, body) = server.post(path, json!({"sources": []})).await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{}", path);
            assert!(body["error"].is_string(), "{}", path);
        }
    }

    #[tokio::test]
    async fn test_inspect_route() {
        let server = TestServer::start(FakeTool::with_captions(), FakeMetadata::ok()).await;
        let sources = json!([{
            "content": "Feathers and wings.",
            "metadata": {"type": "web", "highlightText": "wings"}
        }]);

        let (status, body) = server
            .post("/api/citations/inspect", json!({"sources": sources, "index": 0}))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["heading"], "Citation [1]");
        assert_eq!(body["highlight_ranges"], json!([{"start": 13, "end": 18}]));

        let (status, _) = server
            .post("/api/citations/inspect", json!({"sources": sources, "index": 3}))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_health() {
        let server = TestServer::start(FakeTool::with_captions(), FakeMetadata::ok()).await;
        let body: Value = reqwest::get(format!("{}/health", server.base))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["status"], "ok");
    }
}
