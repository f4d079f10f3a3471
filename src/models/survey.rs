use crate::domain::{Season, SurveyId, YearSeason};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of a survey relative to the current time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SurveyState {
    Upcoming,
    Ongoing,
    Finished,
}

/// Whether a survey runs at the start of a season (anticipation) or at its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurveyPhase {
    Pre,
    Post,
}

impl SurveyPhase {
    #[must_use]
    pub const fn from_is_preseason(is_preseason: bool) -> Self {
        if is_preseason { Self::Pre } else { Self::Post }
    }

    #[must_use]
    pub const fn is_preseason(self) -> bool {
        matches!(self, Self::Pre)
    }
}

impl std::str::FromStr for SurveyPhase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pre" => Ok(Self::Pre),
            "post" => Ok(Self::Post),
            other => Err(format!("expected 'pre' or 'post', got '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Survey {
    pub id: SurveyId,
    pub year: i32,
    pub season: Season,
    pub is_preseason: bool,
    pub opening_time: DateTime<Utc>,
    pub closing_time: DateTime<Utc>,
}

impl Survey {
    #[must_use]
    pub const fn year_season(&self) -> YearSeason {
        YearSeason::new(self.year, self.season)
    }

    #[must_use]
    pub const fn phase(&self) -> SurveyPhase {
        SurveyPhase::from_is_preseason(self.is_preseason)
    }

    #[must_use]
    pub fn state_at(&self, now: DateTime<Utc>) -> SurveyState {
        if now < self.opening_time {
            SurveyState::Upcoming
        } else if self.closing_time < now {
            SurveyState::Finished
        } else {
            SurveyState::Ongoing
        }
    }

    #[must_use]
    pub fn state(&self) -> SurveyState {
        self.state_at(Utc::now())
    }
}

impl fmt::Display for Survey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "The {} of {} {} Survey",
            if self.is_preseason { "Start" } else { "End" },
            self.season,
            self.year
        )
    }
}
