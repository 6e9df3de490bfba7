//! Unified server error type.
//!
//! Every handler returns `Result<T, ServerError>`, which implements
//! [`axum::response::IntoResponse`] so errors are automatically converted
//! to a JSON-body HTTP response with an appropriate status code.
//!
//! **Security note:** upstream failures are logged with full detail but the
//! caller only ever sees the fixed message of the [`Operation`] that failed,
//! so provider error bodies and credentials problems never leak to clients.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::upstream::UpstreamError;

/// The user-facing operation a request was performing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Chat,
    Recommendations,
    Sentiment,
    Speech,
    MoodInsight,
}

impl Operation {
    /// The only error text a client sees when this operation fails.
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::Chat => "Failed to generate response",
            Operation::Recommendations => "Failed to generate recommendations",
            Operation::Sentiment => "Failed to analyze sentiment",
            Operation::Speech => "Failed to generate speech",
            Operation::MoodInsight => "Failed to generate insight",
        }
    }
}

/// All errors that can occur in the mindcare-server request lifecycle.
#[derive(Debug, Error)]
pub enum ServerError {
    /// An upstream API call failed.
    #[error("{op:?} upstream call failed: {source}")]
    Upstream {
        op: Operation,
        #[source]
        source: UpstreamError,
    },

    /// The request body of a passthrough handler could not be read.
    #[error("{op:?} request body rejected: {source}")]
    Body {
        op: Operation,
        #[source]
        source: JsonRejection,
    },

    /// The caller sent an invalid request to a validating endpoint.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The request body is larger than `MINDCARE_MAX_BODY_BYTES`.
    #[error("request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },
}

impl ServerError {
    pub fn upstream(op: Operation) -> impl FnOnce(UpstreamError) -> Self {
        move |source| ServerError::Upstream { op, source }
    }

    pub fn body(op: Operation) -> impl FnOnce(JsonRejection) -> Self {
        move |source| ServerError::Body { op, source }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, client_message) = match &self {
            // Client-facing errors: expose the message directly.
            ServerError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
            ServerError::PayloadTooLarge { .. } => (StatusCode::PAYLOAD_TOO_LARGE, self.to_string()),

            // Everything else: log the cause, return the operation's fixed message.
            ServerError::Upstream { op, source } => {
                error!(operation = ?op, error = %source, "upstream call failed");
                (StatusCode::INTERNAL_SERVER_ERROR, op.failure_message().to_owned())
            }
            ServerError::Body { op, source } => {
                error!(operation = ?op, error = %source, "request body rejected");
                (StatusCode::INTERNAL_SERVER_ERROR, op.failure_message().to_owned())
            }
        };
        (status, Json(json!({ "error": client_message }))).into_response()
    }
}

impl From<validator::ValidationErrors> for ServerError {
    fn from(e: validator::ValidationErrors) -> Self {
        ServerError::BadRequest(e.to_string())
    }
}

impl From<mindcare_core::JournalError> for ServerError {
    fn from(e: mindcare_core::JournalError) -> Self {
        ServerError::BadRequest(e.to_string())
    }
}
