//! Per-anime statistics.

use super::metric::{Metric, average};
use super::result_type::ResultType;
use crate::models::response::{AnimeResponse, Expectations, Gender, ResponseTotals};
use crate::models::survey::SurveyPhase;
use std::collections::BTreeMap;

/// All result values for one anime.
pub type AnimeResults = BTreeMap<ResultType, Metric>;

/// Inputs shared by every anime of one survey.
#[derive(Debug, Clone, Copy)]
pub struct StatisticsContext {
    pub phase: SurveyPhase,
    pub totals: ResponseTotals,
}

/// Computes every [`ResultType`] for one anime.
///
/// `scaled_total` is the adjusted response count and only feeds the overall
/// popularity, which never exceeds 100%. Gendered popularity uses the
/// survey's unscaled gender totals, and score/rate metrics are normalized by
/// watcher counts.
#[must_use]
pub fn compute_anime_results(
    context: &StatisticsContext,
    scaled_total: u64,
    answers: &[&AnimeResponse],
) -> AnimeResults {
    let watchers: Vec<&AnimeResponse> = answers.iter().copied().filter(|a| a.watching).collect();
    let watcher_count = watchers.len() as u64;
    let watchers_of = |gender: Gender| {
        watchers
            .iter()
            .filter(|a| a.gender == Some(gender))
            .count() as u64
    };

    // A denominator below the watcher count comes from a bad event log.
    let popularity = Metric::percentage(watcher_count, scaled_total.max(watcher_count));
    let male_popularity = Metric::percentage(watchers_of(Gender::Male), context.totals.male);
    let female_popularity = Metric::percentage(watchers_of(Gender::Female), context.totals.female);

    // Pre-season scores rate anticipation, so non-watchers count too.
    let scored: Vec<&AnimeResponse> = if context.phase.is_preseason() {
        answers.iter().copied().filter(|a| a.score.is_some()).collect()
    } else {
        watchers.iter().copied().filter(|a| a.score.is_some()).collect()
    };
    let average_score = |gender: Option<Gender>| {
        Metric::from_option(average(
            scored
                .iter()
                .filter(|a| gender.is_none() || a.gender == gender)
                .filter_map(|a| a.score),
        ))
    };
    let score = average_score(None);
    let male_score = average_score(Some(Gender::Male));
    let female_score = average_score(Some(Gender::Female));

    let rate = |count: usize| Metric::percentage(count as u64, watcher_count);
    let underwatched = watchers.iter().filter(|a| a.underwatched).count();
    let with_expectation = |expectation: Expectations| {
        watchers
            .iter()
            .filter(|a| a.expectations == Some(expectation))
            .count()
    };

    BTreeMap::from([
        (ResultType::Popularity, popularity),
        (ResultType::PopularityMale, male_popularity),
        (ResultType::PopularityFemale, female_popularity),
        (
            ResultType::GenderPopularityRatio,
            Metric::ratio(male_popularity, female_popularity),
        ),
        (
            ResultType::GenderPopularityRatioInv,
            Metric::ratio(female_popularity, male_popularity),
        ),
        (ResultType::Underwatched, rate(underwatched)),
        (ResultType::Score, score),
        (ResultType::ScoreMale, male_score),
        (ResultType::ScoreFemale, female_score),
        (
            ResultType::GenderScoreDifference,
            Metric::difference(male_score, female_score),
        ),
        (
            ResultType::GenderScoreDifferenceInv,
            Metric::difference(female_score, male_score),
        ),
        (
            ResultType::Surprise,
            rate(with_expectation(Expectations::Surprise)),
        ),
        (
            ResultType::Disappointment,
            rate(with_expectation(Expectations::Disappointment)),
        ),
        (
            ResultType::Age,
            Metric::from_option(average(watchers.iter().filter_map(|a| a.age))),
        ),
    ])
}
