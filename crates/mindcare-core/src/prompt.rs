//! Prompt text for the generative API.
//!
//! The JSON-producing prompts describe the expected shape in prose only; the
//! reply still goes through [`crate::extract`].

use serde_json::Value;

/// Ask for a single sentiment object describing `text`.
pub fn sentiment(text: &str) -> String {
    format!(
        "Analyze the sentiment of this text and respond with ONLY a JSON object in this format: \
         {{\"sentiment\": \"positive\" | \"negative\" | \"neutral\", \"score\": 0-1, \
         \"analysis\": \"brief explanation\"}}. Text: \"{text}\""
    )
}

/// Ask for three self-care recommendations for `mood` given `recent_moods`.
///
/// `recent_moods` is embedded as compact JSON exactly as the client sent it.
pub fn recommendations(mood: &str, recent_moods: &Value) -> String {
    format!(
        "Based on the user's current mood \"{mood}\" and recent mood history {recent_moods}, \
         provide 3 personalized self-care recommendations. Respond with ONLY a JSON array of \
         objects with this format: [{{\"activity\": \"activity name\", \"duration\": \"time\", \
         \"description\": \"brief description\", \"category\": \"category\"}}]"
    )
}

/// Conversational prompt asking for a short insight about the day's mood.
pub fn mood_insight(mood: &str) -> String {
    format!(
        "I'm feeling {mood} today. Can you provide a brief insight about this mood and how to \
         manage it?"
    )
}
