use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Five-point mood scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Great,
    Good,
    Okay,
    Bad,
    Terrible,
}

impl Mood {
    pub const ALL: [Mood; 5] = [Mood::Great, Mood::Good, Mood::Okay, Mood::Bad, Mood::Terrible];

    /// Numeric value used for charts and averages (5 = great, 1 = terrible)
    pub fn value(self) -> u8 {
        match self {
            Self::Great => 5,
            Self::Good => 4,
            Self::Okay => 3,
            Self::Bad => 2,
            Self::Terrible => 1,
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Self::Great => "😊",
            Self::Good => "🙂",
            Self::Okay => "😐",
            Self::Bad => "😔",
            Self::Terrible => "😢",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Great => "great",
            Self::Good => "good",
            Self::Okay => "okay",
            Self::Bad => "bad",
            Self::Terrible => "terrible",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mood::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::UnknownMood(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    pub id: String,
    pub owner_id: String,
    pub mood: Mood,
    #[serde(default)]
    pub emotions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triggers: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,
}

/// Mood form submission
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMoodEntry {
    #[serde(default)]
    pub mood: Option<Mood>,
    #[serde(default)]
    pub emotions: Vec<String>,
    #[serde(default)]
    pub triggers: Option<Vec<String>>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub thread_id: Option<String>,
}

impl NewMoodEntry {
    pub fn new(mood: Mood) -> Self {
        Self {
            mood: Some(mood),
            ..Default::default()
        }
    }

    /// Validate and stamp the submission into a stored entry
    pub fn into_entry(self, owner_id: impl Into<String>) -> Result<MoodEntry, ValidationError> {
        let mood = self.mood.ok_or(ValidationError::MissingField("mood"))?;
        Ok(MoodEntry {
            id: crate::ids::prefixed_id("mood"),
            owner_id: owner_id.into(),
            mood,
            emotions: self.emotions,
            triggers: self.triggers.filter(|t| !t.is_empty()),
            note: self.note.filter(|n| !n.is_empty()),
            timestamp: self.timestamp.unwrap_or_else(Utc::now),
            thread_id: self.thread_id,
        })
    }
}
