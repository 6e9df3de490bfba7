//! Journal entries with sentiment tagging (`/api/journal`).
//!
//! Entries are not stored here; persistence belongs to the hosted database
//! the web client writes to. This route turns raw editor content into a
//! titled entry and tags it with the sentiment of its text.

use std::sync::Arc;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::routing::post;
use axum::{Json, Router};
use mindcare_core::{JournalEntry, JsonShape, extract, prompt};
use serde_json::Value;
use tracing::{info, warn};
use utoipa::OpenApi;
use validator::Validate;

use crate::error::{Operation, ServerError};
use crate::routes::gemini::analyze;
use crate::schemas::wellness::JournalEntryRequest;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(create_entry),
    components(schemas(JournalEntryRequest, JournalEntry, mindcare_core::SentimentLabel))
)]
pub struct JournalApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/journal/entries", post(create_entry))
}

/// Draft a journal entry and tag its sentiment.
///
/// A failed or unparseable analysis leaves the entry tagged `neutral`; the
/// entry itself is always returned.
#[utoipa::path(
    post,
    path = "/api/journal/entries",
    tag = "wellness",
    request_body = JournalEntryRequest,
    responses(
        (status = 200, description = "Tagged entry", body = JournalEntry),
        (status = 400, description = "Empty or oversized entry", body = Value),
    )
)]
pub async fn create_entry(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<JournalEntryRequest>, JsonRejection>,
) -> Result<Json<JournalEntry>, ServerError> {
    let Json(req) = payload.map_err(|e| ServerError::BadRequest(e.body_text()))?;
    req.validate()?;
    let entry = JournalEntry::draft(&req.content)?;

    let entry = match analyze(&state, Operation::Sentiment, prompt::sentiment(&req.content)).await {
        Ok(reply) => match extract(&reply, JsonShape::Object) {
            Some(analysis) => entry.tag(&analysis),
            None => entry,
        },
        Err(e) => {
            warn!(error = %e, entry_id = %entry.id, "sentiment tagging failed; keeping neutral");
            entry
        }
    };

    info!(entry_id = %entry.id, sentiment = %entry.sentiment, "journal entry drafted");
    Ok(Json(entry))
}
