//! Generative-language passthrough routes (`/api/gemini/...`).
//!
//! Each handler builds one request for the generative API, awaits it once and
//! reshapes the reply. Structured replies go through the best-effort JSON
//! extractor; an unparseable reply is answered with a fixed fallback rather
//! than an error.

use std::sync::Arc;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::routing::post;
use axum::{Json, Router};
use mindcare_core::{JsonShape, MappedTurn, extract_or, normalize, prompt};
use serde_json::Value;
use tracing::{debug, info};
use utoipa::OpenApi;

use crate::error::{Operation, ServerError};
use crate::schemas::assistant::{
    ChatRequest, ChatResponse, RecommendationsRequest, RecommendationsResponse, SentimentRequest,
};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(chat, recommendations, sentiment),
    components(schemas(
        ChatRequest,
        ChatResponse,
        RecommendationsRequest,
        RecommendationsResponse,
        SentimentRequest
    ))
)]
pub struct GeminiApi;

/// Register generative-language routes.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/gemini/chat", post(chat))
        .route("/gemini/recommendations", post(recommendations))
        .route("/gemini/sentiment", post(sentiment))
}

/// Send a single prompt to the analysis model.
pub(crate) async fn analyze(state: &AppState, op: Operation, prompt: String) -> Result<String, ServerError> {
    state
        .generative
        .generate(&state.config.gemini.analysis_model, vec![MappedTurn::user(prompt)])
        .await
        .map_err(ServerError::upstream(op))
}

/// Companion chat (`POST /api/gemini/chat`).
///
/// The client's transcript is normalized into chat history and the new
/// message is appended as the final user turn.
#[utoipa::path(
    post,
    path = "/api/gemini/chat",
    tag = "assistant",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Reply generated", body = ChatResponse),
        (status = 500, description = "Generation failed", body = Value),
    )
)]
pub async fn chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ServerError> {
    let Json(req) = payload.map_err(ServerError::body(Operation::Chat))?;

    let mut contents = normalize(&req.conversation_history, state.config.history_policy);
    debug!(
        received = req.conversation_history.len(),
        kept = contents.len(),
        policy = %state.config.history_policy,
        "chat history normalized"
    );
    contents.push(MappedTurn::user(req.message));

    let text = state
        .generative
        .generate(&state.config.gemini.chat_model, contents)
        .await
        .map_err(ServerError::upstream(Operation::Chat))?;

    info!(reply_len = text.len(), "chat reply generated");
    Ok(Json(ChatResponse { text }))
}

/// Personalized self-care suggestions (`POST /api/gemini/recommendations`).
///
/// Returns an empty list when the model's reply holds no parseable array.
#[utoipa::path(
    post,
    path = "/api/gemini/recommendations",
    tag = "assistant",
    request_body = RecommendationsRequest,
    responses(
        (status = 200, description = "Recommendations (possibly empty)", body = RecommendationsResponse),
        (status = 500, description = "Generation failed", body = Value),
    )
)]
pub async fn recommendations(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RecommendationsRequest>, JsonRejection>,
) -> Result<Json<RecommendationsResponse>, ServerError> {
    let Json(req) = payload.map_err(ServerError::body(Operation::Recommendations))?;

    let reply = analyze(
        &state,
        Operation::Recommendations,
        prompt::recommendations(&req.mood, &req.recent_moods),
    )
    .await?;

    let recommendations = extract_or(&reply, JsonShape::Array, mindcare_core::recommendations_fallback());
    debug!(
        mood = %req.mood,
        count = recommendations.as_array().map_or(0, Vec::len),
        "recommendations extracted"
    );
    Ok(Json(RecommendationsResponse { recommendations }))
}

/// Sentiment of a piece of text (`POST /api/gemini/sentiment`).
///
/// The extracted object is passed through unchanged; a reply without one
/// yields `{"sentiment":"neutral","score":0.5,"analysis":"Unable to analyze"}`.
#[utoipa::path(
    post,
    path = "/api/gemini/sentiment",
    tag = "assistant",
    request_body = SentimentRequest,
    responses(
        (status = 200, description = "Sentiment object", body = Value),
        (status = 500, description = "Analysis failed", body = Value),
    )
)]
pub async fn sentiment(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SentimentRequest>, JsonRejection>,
) -> Result<Json<Value>, ServerError> {
    let Json(req) = payload.map_err(ServerError::body(Operation::Sentiment))?;

    let reply = analyze(&state, Operation::Sentiment, prompt::sentiment(&req.text)).await?;
    Ok(Json(extract_or(&reply, JsonShape::Object, mindcare_core::sentiment_fallback())))
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use axum::http::StatusCode;
    use mindcare_core::{HistoryPolicy, Role};
    use serde_json::json;
    use tracing_test::traced_test;

    use crate::routes::test_support::{FakeModel, TestApp};

    #[tokio::test]
    async fn chat_returns_model_text() {
        let app = TestApp::new(FakeModel::replying("I'm here for you."));
        let (status, body) = app
            .post_json("/api/gemini/chat", json!({ "message": "hi", "conversationHistory": [] }))
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "text": "I'm here for you." }));

        let calls = app.model.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].model, "gemini-2.5-flash");
        assert_eq!(calls[0].contents.len(), 1);
        assert_eq!(calls[0].contents[0].role, Role::User);
        assert_eq!(calls[0].contents[0].parts[0].text, "hi");
    }

    #[tokio::test]
    #[traced_test]
    async fn chat_upstream_failure_is_generic_500() {
        let app = TestApp::new(FakeModel::failing(401, "API key not valid"));
        let (status, body) = app
            .post_json("/api/gemini/chat", json!({ "message": "hi", "conversationHistory": [] }))
            .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Failed to generate response" }));
        assert!(logs_contain("API key not valid"));
    }

    #[tokio::test]
    async fn chat_history_is_normalized_before_sending() {
        let app = TestApp::new(FakeModel::replying("ok"));
        let history = json!([
            { "text": "Hello! I'm your AI therapy companion.", "sender": "ai" },
            { "text": "I feel anxious", "sender": "user" },
            { "sender": "ai" },
            null,
            { "text": "Let's try a breathing exercise.", "sender": "ai" }
        ]);
        let (status, _) = app
            .post_json(
                "/api/gemini/chat",
                json!({ "message": "ok, let's do it", "conversationHistory": history }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);

        let calls = app.model.calls();
        let sent = &calls[0].contents;
        let shape: Vec<(Role, String)> = sent.iter().map(|t| (t.role, t.parts[0].text.clone())).collect();
        assert_eq!(
            shape,
            [
                (Role::User, "I feel anxious".to_owned()),
                (Role::Model, "Let's try a breathing exercise.".to_owned()),
                (Role::User, "ok, let's do it".to_owned()),
            ]
        );
    }

    #[tokio::test]
    async fn lenient_policy_keeps_leading_model_turns() {
        let app = TestApp::with_config(FakeModel::replying("ok"), |cfg| {
            cfg.history_policy = HistoryPolicy::Lenient;
        });
        let history = json!([{ "text": "Hello!", "sender": "ai" }]);
        app.post_json("/api/gemini/chat", json!({ "message": "hi", "conversationHistory": history }))
            .await;

        let calls = app.model.calls();
        let sent = &calls[0].contents;
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].role, Role::Model);
    }

    #[tokio::test]
    async fn chat_with_unparseable_body_is_generic_500() {
        let app = TestApp::new(FakeModel::replying("unused"));
        let (status, body) = app.post_raw("/api/gemini/chat", "application/json", "{not json").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Failed to generate response" }));
        assert!(app.model.calls().is_empty());
    }

    #[tokio::test]
    async fn sentiment_object_is_passed_through() {
        let reply = r#"Sure! {"sentiment":"positive","score":0.95,"analysis":"Strong affection."}"#;
        let app = TestApp::new(FakeModel::replying(reply));
        let (status, body) = app
            .post_json("/api/gemini/sentiment", json!({ "text": "I love this" }))
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "sentiment": "positive", "score": 0.95, "analysis": "Strong affection." })
        );
        let prompt = app.model.calls()[0].contents[0].parts[0].text.clone();
        assert!(prompt.ends_with("Text: \"I love this\""));
    }

    #[tokio::test]
    async fn sentiment_without_json_falls_back_to_neutral() {
        let app = TestApp::new(FakeModel::replying("I'd say it's mostly upbeat."));
        let (status, body) = app
            .post_json("/api/gemini/sentiment", json!({ "text": "meh" }))
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "sentiment": "neutral", "score": 0.5, "analysis": "Unable to analyze" })
        );
    }

    #[tokio::test]
    async fn sentiment_upstream_failure_is_generic_500() {
        let app = TestApp::new(FakeModel::failing(503, "overloaded"));
        let (status, body) = app
            .post_json("/api/gemini/sentiment", json!({ "text": "meh" }))
            .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Failed to analyze sentiment" }));
    }

    #[tokio::test]
    async fn recommendations_array_is_extracted() {
        let reply = "```json\n[{\"activity\":\"Box breathing\",\"duration\":\"5 min\",\
                     \"description\":\"Slow 4-4-4-4 breaths\",\"category\":\"Mindfulness\"}]\n```";
        let app = TestApp::new(FakeModel::replying(reply));
        let (status, body) = app
            .post_json(
                "/api/gemini/recommendations",
                json!({ "mood": "anxious", "recentMoods": [{ "date": "Mon", "mood": 6 }] }),
            )
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["recommendations"][0]["activity"], "Box breathing");
        assert_eq!(body["recommendations"].as_array().unwrap().len(), 1);

        let prompt = app.model.calls()[0].contents[0].parts[0].text.clone();
        assert!(prompt.contains(r#"current mood "anxious""#));
        assert!(prompt.contains(r#"[{"date":"Mon","mood":6}]"#));
    }

    #[tokio::test]
    async fn recommendations_fall_back_to_empty_list() {
        let app = TestApp::new(FakeModel::replying("[not, valid json"));
        let (status, body) = app
            .post_json("/api/gemini/recommendations", json!({ "mood": "sad" }))
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "recommendations": [] }));
    }

    #[tokio::test]
    async fn recommendations_failure_message() {
        let app = TestApp::new(FakeModel::failing(500, "boom"));
        let (status, body) = app
            .post_json("/api/gemini/recommendations", json!({ "mood": "sad", "recentMoods": null }))
            .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Failed to generate recommendations" }));
    }
}
