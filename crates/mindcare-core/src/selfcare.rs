//! Self-care activity checklist.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Category name that matches every activity.
pub const ALL_CATEGORIES: &str = "All";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Activity {
    pub id: String,
    pub title: String,
    pub description: String,
    pub duration: String,
    pub category: String,
    pub completed: bool,
}

impl Activity {
    fn new(id: &str, title: &str, description: &str, duration: &str, category: &str) -> Self {
        Self {
            id: id.to_owned(),
            title: title.to_owned(),
            description: description.to_owned(),
            duration: duration.to_owned(),
            category: category.to_owned(),
            completed: false,
        }
    }

    fn done(mut self) -> Self {
        self.completed = true;
        self
    }
}

/// Completed / total counts for a checklist.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Completion {
    pub completed: usize,
    pub total: usize,
    /// Share of completed activities as a whole percentage; `0` for an empty list.
    pub percent: u8,
}

/// The starter checklist every new user sees, with meditation and the
/// nature walk already ticked.
pub fn default_activities() -> Vec<Activity> {
    vec![
        Activity::new(
            "1",
            "Morning Meditation",
            "Start your day with a 10-minute guided meditation to set a positive tone.",
            "10 min",
            "Mindfulness",
        )
        .done(),
        Activity::new(
            "2",
            "Gratitude Journaling",
            "Write down 3 things you are grateful for today.",
            "5 min",
            "Reflection",
        ),
        Activity::new(
            "3",
            "Yoga Session",
            "Gentle yoga to improve flexibility and reduce stress.",
            "20 min",
            "Exercise",
        ),
        Activity::new(
            "4",
            "Nature Walk",
            "Take a 30-minute walk in nature to refresh your mind.",
            "30 min",
            "Outdoor",
        )
        .done(),
        Activity::new(
            "5",
            "Creative Hobby",
            "Engage in your favorite creative activity like drawing or music.",
            "30 min",
            "Creativity",
        ),
        Activity::new(
            "6",
            "Social Connection",
            "Call or meet a friend to strengthen your social bonds.",
            "30 min",
            "Social",
        ),
    ]
}

/// Keep activities in `category`; `None` or `"All"` keeps everything.
pub fn filter(activities: Vec<Activity>, category: Option<&str>) -> Vec<Activity> {
    match category.map(str::trim) {
        None | Some("") => activities,
        Some(c) if c.eq_ignore_ascii_case(ALL_CATEGORIES) => activities,
        Some(c) => activities
            .into_iter()
            .filter(|a| a.category.eq_ignore_ascii_case(c))
            .collect(),
    }
}

/// Parse a comma-separated id list such as `"1,4"`. Blank items are skipped.
pub fn parse_ids(raw: &str) -> Vec<&str> {
    raw.split(',').map(str::trim).filter(|id| !id.is_empty()).collect()
}

/// Replace the checked state: exactly the activities named in `ids` are
/// completed. Unknown ids are ignored.
pub fn check_only(activities: Vec<Activity>, ids: &[&str]) -> Vec<Activity> {
    activities
        .into_iter()
        .map(|mut a| {
            a.completed = ids.contains(&a.id.as_str());
            a
        })
        .collect()
}

pub fn completion(activities: &[Activity]) -> Completion {
    let total = activities.len();
    let completed = activities.iter().filter(|a| a.completed).count();
    let percent = if total == 0 {
        0
    } else {
        (completed as f64 * 100.0 / total as f64).round() as u8
    };
    Completion { completed, total, percent }
}
