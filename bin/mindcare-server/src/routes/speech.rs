//! Text-to-speech passthrough route (`/api/elevenlabs/speak`).

use std::sync::Arc;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;
use tracing::info;
use utoipa::OpenApi;

use crate::error::{Operation, ServerError};
use crate::schemas::assistant::SpeakRequest;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(paths(speak), components(schemas(SpeakRequest)))]
pub struct SpeechApi;

/// Register speech routes.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/elevenlabs/speak", post(speak))
}

/// Read text aloud (`POST /api/elevenlabs/speak`).
///
/// Returns the synthesized audio bytes as-is with an audio content type.
#[utoipa::path(
    post,
    path = "/api/elevenlabs/speak",
    tag = "assistant",
    request_body = SpeakRequest,
    responses(
        (status = 200, description = "Audio bytes", content_type = "audio/mpeg", body = Vec<u8>),
        (status = 500, description = "Synthesis failed", body = Value),
    )
)]
pub async fn speak(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SpeakRequest>, JsonRejection>,
) -> Result<Response, ServerError> {
    let Json(req) = payload.map_err(ServerError::body(Operation::Speech))?;

    let audio = state
        .speech
        .synthesize(&req.text)
        .await
        .map_err(ServerError::upstream(Operation::Speech))?;

    info!(text_len = req.text.len(), audio_len = audio.len(), "speech synthesized");
    Ok(([(header::CONTENT_TYPE, state.speech.content_type())], audio).into_response())
}

#[cfg(test)]
mod test {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::routes::test_support::{FakeModel, FakeSpeech, TestApp};

    #[tokio::test]
    async fn audio_bytes_are_returned_with_audio_type() {
        let app = TestApp::with_speech(FakeModel::replying("unused"), FakeSpeech::returning(b"ID3\x04audio"));
        let (status, content_type, bytes) = app
            .post_for_bytes("/api/elevenlabs/speak", json!({ "text": "Take a deep breath." }))
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("audio/mpeg"));
        assert_eq!(&bytes[..], b"ID3\x04audio");
        assert_eq!(app.speech.texts(), ["Take a deep breath."]);
    }

    #[tokio::test]
    async fn empty_audio_is_still_200() {
        let app = TestApp::with_speech(FakeModel::replying("unused"), FakeSpeech::returning(b""));
        let (status, content_type, bytes) = app
            .post_for_bytes("/api/elevenlabs/speak", json!({ "text": "hello" }))
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("audio/mpeg"));
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn synthesis_failure_is_generic_500() {
        let app = TestApp::with_speech(FakeModel::replying("unused"), FakeSpeech::failing(401));
        let (status, body) = app
            .post_json("/api/elevenlabs/speak", json!({ "text": "hello" }))
            .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Failed to generate speech" }));
    }
}
