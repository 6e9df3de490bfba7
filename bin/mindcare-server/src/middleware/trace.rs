//! Per-request span, trace-ID propagation and body size enforcement.

use std::sync::Arc;
use std::time::Instant;

use axum::body::{Body, Bytes};
use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderValue, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use http_body_util::{BodyExt, LengthLimitError, Limited};
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

use crate::error::ServerError;
use crate::state::AppState;

pub static X_TRACE_ID: &str = "x-trace-id";

/// JSON bodies up to this size are logged at debug level.
const MAX_LOGGED_BODY: usize = 1024;

/// Wrap each request in an `http_request` span keyed by its trace ID.
///
/// The request body is read at most `max_body_bytes` deep; anything longer is
/// answered with 413 before a handler runs.
pub async fn trace_middleware(State(state): State<Arc<AppState>>, req: Request, next: Next) -> Response {
    let started = Instant::now();

    // Reuse the caller's trace ID when it is a valid UUID.
    let trace_id = req
        .headers()
        .get(X_TRACE_ID)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(Uuid::new_v4);

    let span = info_span!(
        "http_request",
        trace_id = %trace_id,
        method = %req.method(),
        path = %req.uri().path(),
    );

    async move {
        info!("request started");
        let trace_header = HeaderValue::from_str(&trace_id.to_string()).ok();

        let mut response = match read_request(req, state.config.max_body_bytes).await {
            Ok(mut req) => {
                if let Some(v) = trace_header.clone() {
                    req.headers_mut().insert(X_TRACE_ID, v);
                }
                let response = next.run(req).await;
                let (parts, body) = response.into_parts();
                let bytes = match body.collect().await {
                    Ok(collected) => collected.to_bytes(),
                    Err(e) => {
                        warn!(error = %e, "failed to buffer response body");
                        Bytes::new()
                    }
                };
                log_body("response", &parts.headers, &bytes);
                Response::from_parts(parts, Body::from(bytes))
            }
            Err(rejection) => rejection.into_response(),
        };
        if let Some(v) = trace_header {
            response.headers_mut().insert(X_TRACE_ID, v);
        }

        info!(
            status = response.status().as_u16(),
            latency_ms = started.elapsed().as_millis(),
            "response finished"
        );
        response
    }
    .instrument(span)
    .await
}

/// Buffer the request body, refusing to read past `limit` bytes.
async fn read_request(req: Request, limit: usize) -> Result<Request, ServerError> {
    let (parts, body) = req.into_parts();
    let bytes = match Limited::new(body, limit).collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
            warn!(limit, "request body too large");
            return Err(ServerError::PayloadTooLarge { limit });
        }
        Err(e) => {
            warn!(error = %e, "failed to buffer request body");
            return Err(ServerError::BadRequest("failed to read request body".into()));
        }
    };
    log_body("request", &parts.headers, &bytes);
    Ok(Request::from_parts(parts, Body::from(bytes)))
}

/// Chat and journal payloads are personal, so bodies only show up at debug
/// level; anything other than small JSON is summarised by type and size.
fn log_body(direction: &str, headers: &HeaderMap, bytes: &Bytes) {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if content_type.contains("application/json") && bytes.len() < MAX_LOGGED_BODY {
        if let Ok(text) = std::str::from_utf8(bytes) {
            debug!(direction, body = text, "body");
        }
    } else if !bytes.is_empty() {
        debug!(direction, content_type, size = bytes.len(), "body skipped");
    }
}
