//! The fixed set of moods a user can log from the dashboard.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Mood {
    Happy,
    Sad,
    Anxious,
    Calm,
    Frustrated,
    Tired,
}

impl Mood {
    pub fn label(self) -> &'static str {
        match self {
            Mood::Happy => "Happy",
            Mood::Sad => "Sad",
            Mood::Anxious => "Anxious",
            Mood::Calm => "Calm",
            Mood::Frustrated => "Frustrated",
            Mood::Tired => "Tired",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Mood::Happy => "😊",
            Mood::Sad => "😔",
            Mood::Anxious => "😰",
            Mood::Calm => "😌",
            Mood::Frustrated => "😤",
            Mood::Tired => "😴",
        }
    }

    /// All moods in dashboard display order.
    pub fn catalog() -> Vec<MoodOption> {
        Mood::iter().map(MoodOption::from).collect()
    }
}

/// A catalog entry as served to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MoodOption {
    pub value: Mood,
    pub label: String,
    pub emoji: String,
}

impl From<Mood> for MoodOption {
    fn from(mood: Mood) -> Self {
        Self {
            value: mood,
            label: mood.label().to_owned(),
            emoji: mood.emoji().to_owned(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Anxious".parse::<Mood>().unwrap(), Mood::Anxious);
        assert_eq!("TIRED".parse::<Mood>().unwrap(), Mood::Tired);
        assert!("elated".parse::<Mood>().is_err());
    }

    #[test]
    fn display_round_trips_through_parse() {
        for mood in Mood::iter() {
            assert_eq!(mood.to_string().parse::<Mood>().unwrap(), mood);
        }
    }

    #[test]
    fn catalog_keeps_display_order() {
        let values: Vec<Mood> = Mood::catalog().into_iter().map(|m| m.value).collect();
        assert_eq!(
            values,
            [Mood::Happy, Mood::Sad, Mood::Anxious, Mood::Calm, Mood::Frustrated, Mood::Tired]
        );
    }
}
