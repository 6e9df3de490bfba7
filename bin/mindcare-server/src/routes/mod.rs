//! Axum router construction.
//!
//! [`build`] assembles the complete application router, including:
//! - Middleware layers (CORS, per-request trace-ID injection, body size cap)
//! - Optional Swagger UI / OpenAPI spec endpoint (disable with `MINDCARE_ENABLE_SWAGGER=false`)
//! - Health / heartbeat route
//! - `/api` routes: generative and speech passthroughs plus the wellness endpoints

pub mod doc;
mod gemini;
mod health;
mod journal;
mod moods;
mod progress;
mod selfcare;
mod speech;
#[cfg(test)]
pub(crate) mod test_support;

use axum::extract::DefaultBodyLimit;
use axum::{Router, middleware};
use std::sync::Arc;
use tower::ServiceBuilder;
use utoipa_swagger_ui::SwaggerUi;

use crate::middleware::{cors, trace};
use crate::state::AppState;

/// Build the complete Axum [`Router`] for the application.
pub fn build(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .merge(gemini::router())
        .merge(speech::router())
        .merge(moods::router())
        .merge(journal::router())
        .merge(selfcare::router())
        .merge(progress::router());

    let mut app = Router::new().merge(health::router()).nest("/api", api);

    if state.config.enable_swagger {
        app = app.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", doc::get_docs()));
    }

    app
        // Outermost layers execute first on the way in.
        .layer(DefaultBodyLimit::max(state.config.max_body_bytes))
        .layer(ServiceBuilder::new().layer(cors::cors_layer(state.clone())))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            trace::trace_middleware,
        ))
        .with_state(state)
}
