//! Best-effort recovery of a JSON value embedded in free-form model output.
//!
//! The generative API is only *asked* to answer with JSON; replies routinely
//! wrap it in prose or markdown fences. The heuristic here takes the greedy
//! span from the first opening delimiter to the last closing one and tries to
//! parse it. It is only correct when the reply holds exactly one top-level
//! bracketed value; anything else falls back to the caller's default.

use serde_json::{Value, json};
use tracing::debug;

/// Expected top-level JSON shape of a structured reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonShape {
    Object,
    Array,
}

impl JsonShape {
    fn delimiters(self) -> (char, char) {
        match self {
            JsonShape::Object => ('{', '}'),
            JsonShape::Array => ('[', ']'),
        }
    }
}

/// Find the greedy `open..=close` span for `shape` inside `text`.
pub fn locate(text: &str, shape: JsonShape) -> Option<&str> {
    let (open, close) = shape.delimiters();
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    (end > start).then(|| &text[start..=end])
}

/// Parse the located span, or `None` when it is missing or not valid JSON.
pub fn extract(text: &str, shape: JsonShape) -> Option<Value> {
    let candidate = locate(text, shape)?;
    match serde_json::from_str(candidate) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(?shape, error = %e, "structured reply did not parse");
            None
        }
    }
}

/// Like [`extract`] but returns exactly `default` on any failure.
pub fn extract_or(text: &str, shape: JsonShape, default: Value) -> Value {
    extract(text, shape).unwrap_or(default)
}

/// Reply used when a sentiment answer cannot be recovered.
pub fn sentiment_fallback() -> Value {
    json!({
        "sentiment": "neutral",
        "score":     0.5,
        "analysis":  "Unable to analyze",
    })
}

/// Reply used when a recommendations answer cannot be recovered.
pub fn recommendations_fallback() -> Value {
    Value::Array(Vec::new())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
