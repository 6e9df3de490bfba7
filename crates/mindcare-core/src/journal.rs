//! Journal entries tagged with the sentiment of their content.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumString};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

/// Maximum number of characters kept for a derived entry title.
pub const TITLE_MAX_CHARS: usize = 50;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum JournalError {
    #[error("journal entry is empty")]
    Empty,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SentimentLabel {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl SentimentLabel {
    /// Read the `sentiment` field of a sentiment reply; unknown means neutral.
    pub fn from_reply(reply: &Value) -> Self {
        reply
            .get("sentiment")
            .and_then(Value::as_str)
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct JournalEntry {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub title: String,
    pub content: String,
    pub sentiment: SentimentLabel,
    /// Sentiment score in `[0, 1]`, when the analysis produced one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl JournalEntry {
    /// Start a new untagged entry from raw editor content.
    pub fn draft(content: &str) -> Result<Self, JournalError> {
        if content.trim().is_empty() {
            return Err(JournalError::Empty);
        }
        Ok(Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            title: title_from_content(content),
            content: content.to_owned(),
            sentiment: SentimentLabel::Neutral,
            score: None,
        })
    }

    /// Apply a sentiment reply to this entry.
    pub fn tag(mut self, reply: &Value) -> Self {
        self.sentiment = SentimentLabel::from_reply(reply);
        self.score = reply
            .get("score")
            .and_then(Value::as_f64)
            .filter(|s| s.is_finite())
            .map(|s| s.clamp(0.0, 1.0));
        self
    }
}

/// First line of `content`, cut to [`TITLE_MAX_CHARS`] characters.
pub fn title_from_content(content: &str) -> String {
    content
        .lines()
        .next()
        .unwrap_or_default()
        .chars()
        .take(TITLE_MAX_CHARS)
        .collect()
}
