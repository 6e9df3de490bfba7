//! Clients for the hosted APIs every substantive feature is delegated to.
//!
//! Handlers talk to the traits, never to a concrete client, so the router can
//! be exercised against in-process fakes. Each handler makes exactly one
//! call per request; there is no retry.

pub mod elevenlabs;
pub mod error;
pub mod gemini;

use async_trait::async_trait;
use bytes::Bytes;
use mindcare_core::MappedTurn;

pub use elevenlabs::ElevenLabsClient;
pub use error::UpstreamError;
pub use gemini::GeminiClient;

/// A hosted generative-language model.
#[async_trait]
pub trait GenerativeModel: Send + Sync + 'static {
    /// Generate a reply for `contents`; the last element is the new user turn
    /// and everything before it is history.
    async fn generate(&self, model: &str, contents: Vec<MappedTurn>) -> Result<String, UpstreamError>;
}

/// A hosted text-to-speech service.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync + 'static {
    /// Audio MIME type of the bytes returned by [`SpeechSynthesizer::synthesize`].
    fn content_type(&self) -> &'static str {
        "audio/mpeg"
    }

    async fn synthesize(&self, text: &str) -> Result<Bytes, UpstreamError>;
}

/// Pull a human-readable message out of an upstream error body.
///
/// Both providers answer with some variant of `{"error": {"message": ..}}`
/// or `{"detail": {"message": ..}}`; anything else is returned as-is.
pub(crate) fn error_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.trim().to_owned();
    };
    for key in ["error", "detail"] {
        let Some(inner) = value.get(key) else { continue };
        if let Some(message) = inner.get("message").and_then(|m| m.as_str()) {
            return match inner.get("status").and_then(|s| s.as_str()) {
                Some(status) if !status.is_empty() => format!("{status}: {message}"),
                _ => message.to_owned(),
            };
        }
        if let Some(message) = inner.as_str() {
            return message.to_owned();
        }
    }
    body.trim().to_owned()
}
