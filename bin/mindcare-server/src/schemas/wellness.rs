//! Bodies of the mood, journal, self-care and progress endpoints.

use mindcare_core::Mood;
use mindcare_core::progress::MoodSample;
use mindcare_core::selfcare::{Activity, Completion};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Request body for `POST /api/moods/insight`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct MoodInsightRequest {
    /// One of the catalog values, case-insensitive.
    pub mood: String,
}

/// Response body for `POST /api/moods/insight`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MoodInsightResponse {
    pub mood: Mood,
    pub text: String,
}

/// Request body for `POST /api/journal/entries`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct JournalEntryRequest {
    #[validate(length(max = 20000, message = "journal entry is too long"))]
    pub content: String,
}

/// Query parameters for `GET /api/self-care/activities`.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ActivitiesQuery {
    /// Category to keep; `All` or absent keeps everything.
    pub category: Option<String>,
    /// Comma-separated ids of the checked activities, e.g. `1,4`. Absent
    /// keeps the starter state; empty means nothing is checked.
    pub completed: Option<String>,
}

/// Response body for `GET /api/self-care/activities`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ActivitiesResponse {
    pub activities: Vec<Activity>,
    pub completion: Completion,
}

/// Request body for `POST /api/progress/summary`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ProgressRequest {
    /// Mood samples on the 1 to 10 scale, oldest first.
    #[validate(length(max = 366, message = "at most one year of samples"))]
    pub samples: Vec<MoodSample>,
}
