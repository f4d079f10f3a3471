//! `SeaORM` implementation of the `ResultsService` trait.

use crate::cache::{CacheOutcome, CachePolicy, ResultCache, get_or_set, results_cache_key};
use crate::config::ResultsConfig;
use crate::db::Store;
use crate::domain::{Season, SortOrder};
use crate::models::survey::{Survey, SurveyPhase, SurveyState};
use crate::results::{
    RankedAnime, ResultType, SurveyAnime, SurveyResults, SurveySnapshot, SurveySummary, aggregate,
    resolve_survey_anime, summarize, top_results,
};
use crate::services::results_service::{
    INDEX_RESULT_TYPES, IndexEntry, ResultsError, ResultsService,
};
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// SeaORM-backed [`ResultsService`] with an injected results cache.
pub struct SeaOrmResultsService {
    store: Arc<Store>,
    cache: Arc<dyn ResultCache>,
    policy: CachePolicy,
    config: ResultsConfig,
}

impl SeaOrmResultsService {
    #[must_use]
    pub fn new(store: Arc<Store>, cache: Arc<dyn ResultCache>, config: ResultsConfig) -> Self {
        Self {
            store,
            cache,
            policy: CachePolicy::from_config(&config),
            config,
        }
    }

    /// Reads every row the aggregation needs. The queries are independent,
    /// so they run concurrently.
    async fn load_snapshot(&self, survey: &Survey) -> Result<SurveySnapshot, ResultsError> {
        let (candidates, totals, answers, events) = tokio::join!(
            self.store.list_anime_started_by(survey.year_season()),
            self.store.get_response_totals(survey.id),
            self.store.list_anime_responses(survey.id),
            self.store.list_additions_removals(survey.id),
        );

        Ok(SurveySnapshot {
            anime: resolve_survey_anime(survey, candidates?),
            totals: totals?,
            answers: answers?,
            events: events?,
            survey: survey.clone(),
        })
    }

    async fn compute_results(&self, survey: &Survey) -> Result<SurveyResults, ResultsError> {
        let snapshot = self.load_snapshot(survey).await?;
        Ok(aggregate(&snapshot))
    }
}

fn record_cache_outcome(outcome: &'static str) {
    metrics::counter!("survey_results_cache_total", "outcome" => outcome).increment(1);
}

#[async_trait::async_trait]
impl ResultsService for SeaOrmResultsService {
    async fn find_survey(
        &self,
        year: i32,
        season: Season,
        phase: &str,
    ) -> Result<Survey, ResultsError> {
        let phase: SurveyPhase = phase.parse().map_err(ResultsError::NotFound)?;

        self.store
            .find_survey(year, season, phase.is_preseason())
            .await?
            .ok_or_else(|| {
                ResultsError::NotFound(format!("no {phase:?} survey for {season} {year}"))
            })
    }

    async fn get_survey_anime(&self, survey: &Survey) -> Result<SurveyAnime, ResultsError> {
        let candidates = self
            .store
            .list_anime_started_by(survey.year_season())
            .await?;
        Ok(resolve_survey_anime(survey, candidates))
    }

    async fn get_anime_results(&self, survey: &Survey) -> Result<SurveyResults, ResultsError> {
        let now = Utc::now();

        let Some(ttl) = self.policy.ttl_for(survey, now) else {
            record_cache_outcome("bypass");
            debug!(
                survey_id = %survey.id,
                state = ?survey.state_at(now),
                "Survey not finished, computing results without cache"
            );
            return self.compute_results(survey).await;
        };

        let key = results_cache_key(survey.id, self.config.schema_version);
        let (results, outcome) =
            get_or_set(self.cache.as_ref(), &key, ttl, || self.compute_results(survey)).await?;

        record_cache_outcome(match outcome {
            CacheOutcome::Hit => "hit",
            CacheOutcome::Miss => "miss",
        });

        Ok(results)
    }

    async fn top_results(
        &self,
        survey: &Survey,
        result_type: ResultType,
        count: usize,
        order: SortOrder,
    ) -> Result<Vec<RankedAnime>, ResultsError> {
        let results = self.get_anime_results(survey).await?;
        Ok(top_results(
            &results,
            result_type,
            count,
            self.config.display_popularity_threshold,
            order,
        ))
    }

    async fn survey_summary(&self, survey: &Survey) -> Result<SurveySummary, ResultsError> {
        let responses = self.store.list_responses(survey.id).await?;
        Ok(summarize(&responses))
    }

    async fn index(&self, year: Option<i32>) -> Result<Vec<IndexEntry>, ResultsError> {
        let surveys = self.store.list_surveys(year).await?;
        let now = Utc::now();
        let mut entries = Vec::with_capacity(surveys.len());

        for survey in surveys {
            let state = survey.state_at(now);
            let mut top = BTreeMap::new();

            if state == SurveyState::Finished {
                let results = self.get_anime_results(&survey).await?;
                for result_type in INDEX_RESULT_TYPES {
                    top.insert(
                        result_type,
                        top_results(
                            &results,
                            result_type,
                            self.config.top_results_count,
                            self.config.display_popularity_threshold,
                            SortOrder::Descending,
                        ),
                    );
                }
            }

            entries.push(IndexEntry { survey, state, top });
        }

        Ok(entries)
    }

    async fn purge_cache(&self) -> Result<u64, ResultsError> {
        let purged = self.cache.purge().await?;
        debug!(purged, "Purged results cache");
        Ok(purged)
    }
}
