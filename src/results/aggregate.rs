//! Whole-survey aggregation.

use super::adjusted_count::reconstruct;
use super::eligibility::SurveyAnime;
use super::statistics::{AnimeResults, StatisticsContext, compute_anime_results};
use crate::domain::AnimeId;
use crate::models::anime::Anime;
use crate::models::response::{AnimeResponse, ResponseTotals, SurveyAdditionRemoval};
use crate::models::survey::Survey;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

/// Results keyed by anime, one map per category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurveyResults {
    pub series: BTreeMap<AnimeId, AnimeResults>,
    pub special: BTreeMap<AnimeId, AnimeResults>,
}

impl SurveyResults {
    #[must_use]
    pub fn get(&self, anime_id: AnimeId) -> Option<&AnimeResults> {
        self.series
            .get(&anime_id)
            .or_else(|| self.special.get(&anime_id))
    }

    /// Series followed by specials.
    pub fn iter(&self) -> impl Iterator<Item = (&AnimeId, &AnimeResults)> {
        self.series.iter().chain(self.special.iter())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len() + self.special.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty() && self.special.is_empty()
    }
}

/// Every committed row the aggregation needs for one survey.
#[derive(Debug, Clone)]
pub struct SurveySnapshot {
    pub survey: Survey,
    pub anime: SurveyAnime,
    pub totals: ResponseTotals,
    pub answers: Vec<AnimeResponse>,
    pub events: Vec<SurveyAdditionRemoval>,
}

/// Computes the results of every eligible anime. Pure: the same snapshot
/// always yields the same results.
#[must_use]
pub fn aggregate(snapshot: &SurveySnapshot) -> SurveyResults {
    let mut answers_by_anime: HashMap<AnimeId, Vec<&AnimeResponse>> = HashMap::new();
    for answer in &snapshot.answers {
        answers_by_anime
            .entry(answer.anime_id)
            .or_default()
            .push(answer);
    }

    let mut events_by_anime: HashMap<AnimeId, Vec<SurveyAdditionRemoval>> = HashMap::new();
    for event in &snapshot.events {
        events_by_anime
            .entry(event.anime_id)
            .or_default()
            .push(event.clone());
    }

    let context = StatisticsContext {
        phase: snapshot.survey.phase(),
        totals: snapshot.totals,
    };

    let results_for = |list: &[Anime]| -> BTreeMap<AnimeId, AnimeResults> {
        list.iter()
            .map(|anime| {
                let events = events_by_anime
                    .get(&anime.id)
                    .map_or(&[][..], Vec::as_slice);
                let answers = answers_by_anime
                    .get(&anime.id)
                    .map_or(&[][..], Vec::as_slice);

                let mut adjusted = reconstruct(events, snapshot.totals.total);
                let watchers = answers.iter().filter(|a| a.watching).count() as u64;
                if !adjusted.check_watchers(watchers) {
                    warn!(
                        survey_id = %snapshot.survey.id,
                        anime_id = %anime.id,
                        watchers,
                        scaled = adjusted.scaled(),
                        "More watchers than listed responses; capping popularity at 100%"
                    );
                }
                if !adjusted.is_clean() {
                    metrics::counter!("survey_results_anomalies_total")
                        .increment(adjusted.anomalies.len() as u64);
                }

                (
                    anime.id,
                    compute_anime_results(&context, adjusted.scaled(), answers),
                )
            })
            .collect()
    };

    let results = SurveyResults {
        series: results_for(&snapshot.anime.series),
        special: results_for(&snapshot.anime.special),
    };

    debug!(
        survey_id = %snapshot.survey.id,
        series = results.series.len(),
        special = results.special.len(),
        responses = snapshot.totals.total,
        "Aggregated survey results"
    );

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Season, SurveyId, YearSeason};
    use crate::models::anime::AnimeType;
    use crate::results::eligibility::resolve_survey_anime;
    use crate::results::metric::Metric;
    use crate::results::result_type::ResultType;
    use chrono::{Duration, Utc};

    fn survey() -> Survey {
        Survey {
            id: SurveyId::new(9),
            year: 2023,
            season: Season::Summer,
            is_preseason: false,
            opening_time: Utc::now() - Duration::days(30),
            closing_time: Utc::now() - Duration::days(20),
        }
    }

    fn series(id: i32) -> Anime {
        Anime {
            id: AnimeId::new(id),
            anime_type: AnimeType::TvSeries,
            start: Some(YearSeason::new(2023, Season::Summer)),
            end: None,
            subbed: None,
            names: Vec::new(),
        }
    }

    fn watchers(anime_id: i32, count: i32) -> Vec<AnimeResponse> {
        (0..count)
            .map(|i| AnimeResponse {
                response_id: i,
                anime_id: AnimeId::new(anime_id),
                watching: true,
                underwatched: false,
                score: Some(3),
                expectations: None,
                gender: None,
                age: None,
            })
            .collect()
    }

    fn snapshot() -> SurveySnapshot {
        let survey = survey();
        let anime = resolve_survey_anime(&survey, vec![series(1), series(2)]);
        let mut answers = watchers(1, 20);
        answers.extend(watchers(2, 12));

        SurveySnapshot {
            events: vec![SurveyAdditionRemoval {
                survey_id: survey.id,
                anime_id: AnimeId::new(2),
                is_addition: true,
                response_count: 40,
                timestamp: survey.opening_time + Duration::days(2),
            }],
            survey,
            anime,
            totals: ResponseTotals {
                total: 100,
                male: 0,
                female: 0,
            },
            answers,
        }
    }

    #[test]
    fn anime_without_events_use_the_full_total() {
        let results = aggregate(&snapshot());
        assert_eq!(
            results.series[&AnimeId::new(1)][&ResultType::Popularity],
            Metric::Value(20.0)
        );
    }

    #[test]
    fn late_additions_use_the_adjusted_total() {
        let results = aggregate(&snapshot());
        assert_eq!(
            results.series[&AnimeId::new(2)][&ResultType::Popularity],
            Metric::Value(20.0)
        );
    }

    #[test]
    fn aggregation_is_deterministic() {
        let snapshot = snapshot();
        assert_eq!(aggregate(&snapshot), aggregate(&snapshot));
    }

    #[test]
    fn eligible_anime_without_answers_still_get_results() {
        let mut snapshot = snapshot();
        snapshot.anime = resolve_survey_anime(&snapshot.survey, vec![series(1), series(3)]);

        let results = aggregate(&snapshot);
        assert_eq!(results.len(), 2);
        assert_eq!(
            results.get(AnimeId::new(3)).unwrap()[&ResultType::Popularity],
            Metric::Value(0.0)
        );
    }

    #[test]
    fn popularity_never_exceeds_one_hundred_percent() {
        let mut snapshot = snapshot();
        snapshot.events[0].anime_id = AnimeId::new(1);
        snapshot.events[0].response_count = 90;

        let results = aggregate(&snapshot);
        assert_eq!(
            results.series[&AnimeId::new(1)][&ResultType::Popularity],
            Metric::Value(100.0)
        );
        for (_, anime) in results.iter() {
            let popularity = anime[&ResultType::Popularity].value().unwrap();
            assert!((0.0..=100.0).contains(&popularity));
        }
    }
}
