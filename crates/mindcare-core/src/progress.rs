//! Mood trend statistics for the progress dashboard.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lowest and highest value on the mood scale.
pub const MOOD_SCALE: (f64, f64) = (1.0, 10.0);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MoodSample {
    /// Free-form day label, e.g. `"Mon"` or `"2026-10-12"`.
    pub date: String,
    pub mood: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProgressSummary {
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average: Option<f64>,
    /// The highest-rated sample; the earliest one wins ties.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best: Option<MoodSample>,
    /// Relative change from the first sample to the last, in percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_percent: Option<f64>,
}

pub fn summarize(samples: &[MoodSample]) -> ProgressSummary {
    let count = samples.len();
    if count == 0 {
        return ProgressSummary { count, average: None, best: None, change_percent: None };
    }

    let average = samples.iter().map(|s| s.mood).sum::<f64>() / count as f64;
    let best = samples
        .iter()
        .fold(None::<&MoodSample>, |best, s| match best {
            Some(b) if b.mood >= s.mood => Some(b),
            _ => Some(s),
        })
        .cloned();

    let change_percent = match (samples.first(), samples.last()) {
        (Some(first), Some(last)) if count > 1 && first.mood != 0.0 => {
            Some((last.mood - first.mood) / first.mood * 100.0)
        }
        _ => None,
    };

    ProgressSummary { count, average: Some(average), best, change_percent }
}
