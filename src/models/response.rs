use crate::domain::{AnimeId, SurveyId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
            Self::Other => "O",
        }
    }

    /// Blank codes are treated as "no answer".
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "M" => Some(Self::Male),
            "F" => Some(Self::Female),
            "O" => Some(Self::Other),
            _ => None,
        }
    }
}

/// How an anime compared to what the respondent expected. `None` on the
/// answer means expectations were met or the question was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Expectations {
    Surprise,
    Disappointment,
}

impl Expectations {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Surprise => "S",
            Self::Disappointment => "D",
        }
    }

    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "S" => Some(Self::Surprise),
            "D" => Some(Self::Disappointment),
            _ => None,
        }
    }
}

/// One survey submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub id: i32,
    pub survey_id: SurveyId,
    pub age: Option<i32>,
    pub gender: Option<Gender>,
    pub timestamp: DateTime<Utc>,
}

/// A respondent's answer about one anime, joined with the respondent's
/// demographics so the results engine never has to go back to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimeResponse {
    pub response_id: i32,
    pub anime_id: AnimeId,
    pub watching: bool,
    pub underwatched: bool,
    pub score: Option<i32>,
    pub expectations: Option<Expectations>,
    pub gender: Option<Gender>,
    pub age: Option<i32>,
}

/// Anime added to or removed from a survey's live list while it was open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyAdditionRemoval {
    pub survey_id: SurveyId,
    pub anime_id: AnimeId,
    pub is_addition: bool,
    /// Total responses the survey had received when the change happened.
    pub response_count: i64,
    pub timestamp: DateTime<Utc>,
}

/// Response counts over a whole survey, per gender where answered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseTotals {
    pub total: u64,
    pub male: u64,
    pub female: u64,
}
