//! Domain service for survey results.
//!
//! Loads committed survey rows through the store, runs the results engine
//! over them and memoizes finished surveys through the injected cache.

use crate::cache::CacheError;
use crate::domain::{Season, SortOrder};
use crate::models::survey::{Survey, SurveyState};
use crate::results::{RankedAnime, ResultType, SurveyAnime, SurveyResults, SurveySummary};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Result types shown for each finished survey in the index listing.
pub const INDEX_RESULT_TYPES: [ResultType; 2] = [ResultType::Popularity, ResultType::Score];

/// Domain errors for results operations.
#[derive(Debug, Error)]
pub enum ResultsError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<sea_orm::DbErr> for ResultsError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for ResultsError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(format!("{err:#}"))
    }
}

/// One survey in the index listing. `top` is empty unless the survey has
/// finished.
#[derive(Debug, Clone, Serialize)]
pub struct IndexEntry {
    pub survey: Survey,
    pub state: SurveyState,
    pub top: BTreeMap<ResultType, Vec<RankedAnime>>,
}

#[async_trait::async_trait]
pub trait ResultsService: Send + Sync {
    /// Looks up a survey by season and phase token (`"pre"` or `"post"`).
    ///
    /// # Errors
    ///
    /// - Returns [`ResultsError::NotFound`] for an unknown phase token or a
    ///   survey that does not exist
    /// - Returns [`ResultsError::Database`] on connection failures
    async fn find_survey(
        &self,
        year: i32,
        season: Season,
        phase: &str,
    ) -> Result<Survey, ResultsError>;

    /// Anime shown in the survey, split into series and specials.
    ///
    /// # Errors
    ///
    /// Returns [`ResultsError::Database`] on connection failures.
    async fn get_survey_anime(&self, survey: &Survey) -> Result<SurveyAnime, ResultsError>;

    /// Results of every anime in the survey. Finished surveys are served
    /// from the cache when possible; other surveys are always recomputed.
    ///
    /// # Errors
    ///
    /// Returns [`ResultsError::Database`] on connection failures. Cache
    /// failures are logged and never surface here.
    async fn get_anime_results(&self, survey: &Survey) -> Result<SurveyResults, ResultsError>;

    /// The `count` best anime by `result_type`, above the display
    /// popularity threshold.
    ///
    /// # Errors
    ///
    /// Returns [`ResultsError::Database`] on connection failures.
    async fn top_results(
        &self,
        survey: &Survey,
        result_type: ResultType,
        count: usize,
        order: SortOrder,
    ) -> Result<Vec<RankedAnime>, ResultsError>;

    /// Respondent count and demographics.
    ///
    /// # Errors
    ///
    /// Returns [`ResultsError::Database`] on connection failures.
    async fn survey_summary(&self, survey: &Survey) -> Result<SurveySummary, ResultsError>;

    /// Every survey, newest first, with top results for the finished ones.
    ///
    /// # Errors
    ///
    /// Returns [`ResultsError::Database`] on connection failures.
    async fn index(&self, year: Option<i32>) -> Result<Vec<IndexEntry>, ResultsError>;

    /// Drops every cached payload. Returns how many entries were removed.
    ///
    /// # Errors
    ///
    /// Returns [`ResultsError::Cache`] if the backend fails.
    async fn purge_cache(&self) -> Result<u64, ResultsError>;
}
