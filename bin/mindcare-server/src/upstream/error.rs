use thiserror::Error;

/// Errors returned by the upstream API clients.
///
/// These never reach the HTTP client verbatim; handlers wrap them in
/// [`crate::error::ServerError`], which logs the detail and answers with a
/// generic message.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The request could not be sent or the body could not be read.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The upstream answered with a non-success status.
    #[error("upstream returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The upstream answered successfully but without any usable content.
    #[error("upstream reply contained no content")]
    EmptyReply,
}
