//! Conversation-history shaping for stateless multi-turn chat calls.
//!
//! Clients send back the whole visible transcript on every chat request.
//! [`normalize`] turns that transcript into the `role` / `parts` shape the
//! generative API expects, dropping anything malformed instead of failing.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use strum::{Display, EnumString};
use utoipa::ToSchema;

/// One message of the client-side transcript, tagged with its originator.
///
/// Both fields are optional: a missing, null, empty or non-string value
/// deserializes to `None` so that a malformed turn is filtered later rather
/// than rejecting the whole request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ConversationTurn {
    #[serde(default, deserialize_with = "lenient_string")]
    pub text: Option<String>,
    /// `"user"` or `"ai"`; any value other than `"user"` is treated as the model.
    #[serde(default, deserialize_with = "lenient_string")]
    pub sender: Option<String>,
}

impl ConversationTurn {
    pub fn new(text: impl Into<String>, sender: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            sender: Some(sender.into()),
        }
    }
}

/// Role vocabulary of the generative chat API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

impl Role {
    /// `"user"` maps to [`Role::User`]; every other sender maps to [`Role::Model`].
    pub fn from_sender(sender: &str) -> Self {
        if sender == "user" { Role::User } else { Role::Model }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TextPart {
    pub text: String,
}

/// A conversation turn reshaped for the generative API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MappedTurn {
    pub role: Role,
    pub parts: Vec<TextPart>,
}

impl MappedTurn {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            parts: vec![TextPart { text: text.into() }],
        }
    }

    /// The outgoing user turn appended after the history.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }
}

/// Whether [`normalize`] enforces that the history opens with a user turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum HistoryPolicy {
    /// Filter malformed turns and remap roles only.
    Lenient,
    /// Additionally drop leading model turns; the chat API rejects
    /// histories that open with the model.
    #[default]
    UserFirst,
}

/// Produce the cleaned, role-mapped history for a stateless chat call.
///
/// Turns missing text or sender are discarded. Relative order is kept and
/// nothing is sorted or deduplicated, so the output is never longer than the
/// input. Under [`HistoryPolicy::UserFirst`] leading model turns are dropped
/// until a user turn opens the sequence; if there is none the result is empty.
pub fn normalize(turns: &[ConversationTurn], policy: HistoryPolicy) -> Vec<MappedTurn> {
    let mapped = turns.iter().filter_map(|turn| {
        let text = turn.text.as_deref()?;
        let sender = turn.sender.as_deref()?;
        Some(MappedTurn::new(Role::from_sender(sender), text))
    });

    match policy {
        HistoryPolicy::Lenient => mapped.collect(),
        HistoryPolicy::UserFirst => mapped.skip_while(|t| t.role != Role::User).collect(),
    }
}

/// Deserialize a turn list without ever failing on its elements.
///
/// `null` or a non-array value yields an empty list; an element that is not
/// a valid turn becomes an empty [`ConversationTurn`] that [`normalize`]
/// filters out.
pub fn lenient_turns<'de, D>(deserializer: D) -> Result<Vec<ConversationTurn>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let turns = match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).unwrap_or_default())
            .collect(),
        _ => Vec::new(),
    };
    Ok(turns)
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        _ => None,
    })
}

// ── Tests ──────────────────────────────────────────────────────────────────────
