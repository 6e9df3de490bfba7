//! Mood trend summary for the progress dashboard (`/api/progress`).

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::routing::post;
use axum::{Json, Router};
use mindcare_core::progress::{self, MOOD_SCALE, MoodSample, ProgressSummary};
use serde_json::Value;
use utoipa::OpenApi;
use validator::Validate;

use crate::error::ServerError;
use crate::schemas::wellness::ProgressRequest;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(summarize),
    components(schemas(MoodSample, ProgressSummary, ProgressRequest))
)]
pub struct ProgressApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/progress/summary", post(summarize))
}

/// Average, best day and overall change of a series of mood ratings.
#[utoipa::path(
    post,
    path = "/api/progress/summary",
    tag = "wellness",
    request_body = ProgressRequest,
    responses(
        (status = 200, description = "Summary", body = ProgressSummary),
        (status = 400, description = "Invalid samples", body = Value),
    )
)]
pub async fn summarize(
    payload: Result<Json<ProgressRequest>, JsonRejection>,
) -> Result<Json<ProgressSummary>, ServerError> {
    let Json(req) = payload.map_err(|e| ServerError::BadRequest(e.body_text()))?;
    req.validate()?;

    let (low, high) = MOOD_SCALE;
    if let Some(bad) = req.samples.iter().find(|s| !(low..=high).contains(&s.mood)) {
        return Err(ServerError::BadRequest(format!(
            "mood {} on '{}' is outside {low}..={high}",
            bad.mood, bad.date
        )));
    }

    Ok(Json(progress::summarize(&req.samples)))
}
