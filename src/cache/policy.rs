use super::CacheTtl;
use crate::config::ResultsConfig;
use crate::domain::{SurveyId, YearSeason};
use crate::models::survey::{Survey, SurveyState};
use chrono::{DateTime, Utc};
use rand::Rng;
use std::time::Duration;

/// Cache key for a survey's results. The schema version is part of the key
/// so a deploy that changes the payload shape never reads old payloads.
#[must_use]
pub fn results_cache_key(survey_id: SurveyId, schema_version: u32) -> String {
    format!("survey_results_{survey_id}:v{schema_version}")
}

/// Decides whether and for how long a survey's results may be cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    pub base_ttl: Duration,
    pub jitter: Duration,
    /// Surveys at least this many seasons old are cached without expiry.
    pub old_survey_season_delta: i32,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self::from_config(&ResultsConfig::default())
    }
}

impl CachePolicy {
    #[must_use]
    pub const fn from_config(config: &ResultsConfig) -> Self {
        Self {
            base_ttl: Duration::from_secs(config.cache_base_ttl_hours * 3600),
            jitter: Duration::from_secs(config.cache_jitter_hours * 3600),
            old_survey_season_delta: config.old_survey_season_delta,
        }
    }

    #[must_use]
    pub fn is_old(&self, survey: &Survey, now: DateTime<Utc>) -> bool {
        YearSeason::containing(now).seasons_since(survey.year_season()) >= self.old_survey_season_delta
    }

    /// `None` means "do not cache": the survey's data can still change.
    #[must_use]
    pub fn ttl_for(&self, survey: &Survey, now: DateTime<Utc>) -> Option<CacheTtl> {
        self.ttl_with_rng(survey, now, &mut rand::rng())
    }

    pub fn ttl_with_rng<R>(&self, survey: &Survey, now: DateTime<Utc>, rng: &mut R) -> Option<CacheTtl>
    where
        R: Rng,
    {
        if survey.state_at(now) != SurveyState::Finished {
            return None;
        }
        if self.is_old(survey, now) {
            return Some(CacheTtl::Forever);
        }

        // Spread expiries so many surveys cached together don't all expire at once.
        let jitter = i64::try_from(self.jitter.as_secs()).unwrap_or(0);
        let base = i64::try_from(self.base_ttl.as_secs()).unwrap_or(i64::MAX);
        let offset = if jitter > 0 {
            rng.random_range(-jitter..=jitter)
        } else {
            0
        };
        let seconds = u64::try_from(base.saturating_add(offset)).unwrap_or(0);
        Some(CacheTtl::Expires(Duration::from_secs(seconds)))
    }
}
