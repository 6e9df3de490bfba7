//! Bodies of the passthrough endpoints backed by the hosted APIs.

use mindcare_core::ConversationTurn;
use mindcare_core::history::lenient_turns;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Request body for `POST /api/gemini/chat`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// The new user message.
    pub message: String,
    /// Transcript shown to the user so far, oldest first. Malformed turns are
    /// ignored rather than rejected.
    #[serde(default, deserialize_with = "lenient_turns")]
    pub conversation_history: Vec<ConversationTurn>,
}

/// Response body for `POST /api/gemini/chat`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatResponse {
    pub text: String,
}

/// Request body for `POST /api/gemini/recommendations`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationsRequest {
    /// Mood the user just selected, e.g. `"anxious"`.
    pub mood: String,
    /// Any JSON describing recent mood history; embedded in the prompt verbatim.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub recent_moods: Value,
}

/// Response body for `POST /api/gemini/recommendations`.
///
/// Each element is expected to look like
/// `{"activity", "duration", "description", "category"}` but is passed
/// through as the model produced it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecommendationsResponse {
    #[schema(value_type = Vec<Object>)]
    pub recommendations: Value,
}

/// Request body for `POST /api/gemini/sentiment`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SentimentRequest {
    pub text: String,
}

/// Request body for `POST /api/elevenlabs/speak`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SpeakRequest {
    pub text: String,
}
