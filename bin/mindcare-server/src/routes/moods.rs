//! Mood catalog and daily mood insight (`/api/moods`).

use std::sync::Arc;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::routing::{get, post};
use axum::{Json, Router};
use mindcare_core::mood::MoodOption;
use mindcare_core::{MappedTurn, Mood, prompt};
use serde_json::Value;
use tracing::info;
use utoipa::OpenApi;

use crate::error::{Operation, ServerError};
use crate::schemas::wellness::{MoodInsightRequest, MoodInsightResponse};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(list_moods, mood_insight),
    components(schemas(Mood, MoodOption, MoodInsightRequest, MoodInsightResponse))
)]
pub struct MoodsApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/moods", get(list_moods))
        .route("/moods/insight", post(mood_insight))
}

/// Moods the dashboard offers, in display order.
#[utoipa::path(
    get,
    path = "/api/moods",
    tag = "wellness",
    responses((status = 200, description = "Mood catalog", body = Vec<MoodOption>))
)]
pub async fn list_moods() -> Json<Vec<MoodOption>> {
    Json(Mood::catalog())
}

/// A short companion insight about the mood the user just logged.
///
/// Sent as a fresh conversation with no history.
#[utoipa::path(
    post,
    path = "/api/moods/insight",
    tag = "wellness",
    request_body = MoodInsightRequest,
    responses(
        (status = 200, description = "Insight generated", body = MoodInsightResponse),
        (status = 400, description = "Unknown mood", body = Value),
        (status = 500, description = "Generation failed", body = Value),
    )
)]
pub async fn mood_insight(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<MoodInsightRequest>, JsonRejection>,
) -> Result<Json<MoodInsightResponse>, ServerError> {
    let Json(req) = payload.map_err(ServerError::body(Operation::MoodInsight))?;
    let mood: Mood = req
        .mood
        .trim()
        .parse()
        .map_err(|_| ServerError::BadRequest(format!("unknown mood '{}'", req.mood)))?;

    let text = state
        .generative
        .generate(
            &state.config.gemini.chat_model,
            vec![MappedTurn::user(prompt::mood_insight(&mood.to_string()))],
        )
        .await
        .map_err(ServerError::upstream(Operation::MoodInsight))?;

    info!(%mood, "mood insight generated");
    Ok(Json(MoodInsightResponse { mood, text }))
}

#[cfg(test)]
mod test {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::routes::test_support::{FakeModel, TestApp};

    #[tokio::test]
    async fn catalog_lists_six_moods() {
        let app = TestApp::new(FakeModel::replying("unused"));
        let (status, body) = app.get_json("/api/moods").await;

        assert_eq!(status, StatusCode::OK);
        let moods = body.as_array().unwrap();
        assert_eq!(moods.len(), 6);
        assert_eq!(moods[0], json!({ "value": "happy", "label": "Happy", "emoji": "😊" }));
    }

    #[tokio::test]
    async fn insight_uses_the_mood_prompt() {
        let app = TestApp::new(FakeModel::replying("Tiredness is a signal to rest."));
        let (status, body) = app
            .post_json("/api/moods/insight", json!({ "mood": "Tired" }))
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "mood": "tired", "text": "Tiredness is a signal to rest." }));
        let prompt = app.model.calls()[0].contents[0].parts[0].text.clone();
        assert!(prompt.starts_with("I'm feeling tired today."));
    }

    #[tokio::test]
    async fn unknown_mood_is_rejected_without_upstream_call() {
        let app = TestApp::new(FakeModel::replying("unused"));
        let (status, body) = app
            .post_json("/api/moods/insight", json!({ "mood": "elated" }))
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "unknown mood 'elated'");
        assert!(app.model.calls().is_empty());
    }

    #[tokio::test]
    async fn insight_failure_is_generic_500() {
        let app = TestApp::new(FakeModel::failing(500, "internal"));
        let (status, body) = app
            .post_json("/api/moods/insight", json!({ "mood": "calm" }))
            .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Failed to generate insight" }));
    }
}
