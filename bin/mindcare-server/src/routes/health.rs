//! Liveness plus a credential check for each upstream (`/health`).

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(paths(get_health), components(schemas(HealthResponse, UpstreamStatus)))]
pub struct HealthApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(get_health))
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// `ok` when every upstream has a credential, `degraded` otherwise.
    pub status: String,
    pub version: String,
    pub upstreams: UpstreamStatus,
}

/// Whether an API key is configured for each upstream. The upstreams
/// themselves are not contacted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct UpstreamStatus {
    pub gemini: bool,
    pub elevenlabs: bool,
}

/// Always 200 while the process is serving; check `status` for missing keys.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Server is up", body = HealthResponse))
)]
pub async fn get_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let upstreams = UpstreamStatus {
        gemini: state.config.gemini.is_configured(),
        elevenlabs: state.config.speech.is_configured(),
    };
    let status = if upstreams.gemini && upstreams.elevenlabs { "ok" } else { "degraded" };

    Json(HealthResponse {
        status: status.to_owned(),
        version: env!("CARGO_PKG_VERSION").to_owned(),
        upstreams,
    })
}
