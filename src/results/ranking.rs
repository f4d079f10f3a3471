//! Top-N queries over computed results.

use super::aggregate::SurveyResults;
use super::metric::Metric;
use super::result_type::ResultType;
use crate::domain::{AnimeId, SortOrder};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankedAnime {
    pub anime_id: AnimeId,
    pub value: Metric,
}

/// Ranks anime by `result_type`, keeping only those whose popularity is a
/// finite value above `popularity_threshold` percent.
///
/// Undefined and infinite values always sort after finite ones, in either
/// direction. Ties keep ascending anime id order.
#[must_use]
pub fn top_results(
    results: &SurveyResults,
    result_type: ResultType,
    count: usize,
    popularity_threshold: f64,
    order: SortOrder,
) -> Vec<RankedAnime> {
    let mut ranked: Vec<RankedAnime> = results
        .iter()
        .filter(|(_, values)| {
            values
                .get(&ResultType::Popularity)
                .and_then(|p| p.value())
                .is_some_and(|p| p > popularity_threshold)
        })
        .map(|(anime_id, values)| RankedAnime {
            anime_id: *anime_id,
            value: values
                .get(&result_type)
                .copied()
                .unwrap_or(Metric::Undefined),
        })
        .collect();

    let descending = !order.is_ascending();
    ranked.sort_by(|a, b| {
        a.value
            .rank_cmp(b.value, descending)
            .then(a.anime_id.cmp(&b.anime_id))
    });
    ranked.truncate(count);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::statistics::AnimeResults;
    use std::collections::BTreeMap;

    fn entry(popularity: Metric, score: Metric) -> AnimeResults {
        BTreeMap::from([
            (ResultType::Popularity, popularity),
            (ResultType::Score, score),
        ])
    }

    fn results() -> SurveyResults {
        let mut results = SurveyResults::default();
        results
            .series
            .insert(AnimeId::new(1), entry(Metric::Value(40.0), Metric::Value(3.1)));
        results
            .series
            .insert(AnimeId::new(2), entry(Metric::Value(1.0), Metric::Value(4.9)));
        results
            .series
            .insert(AnimeId::new(3), entry(Metric::Value(10.0), Metric::Undefined));
        results
            .special
            .insert(AnimeId::new(4), entry(Metric::Value(5.0), Metric::Value(4.2)));
        results
            .special
            .insert(AnimeId::new(5), entry(Metric::Undefined, Metric::Value(5.0)));
        results
    }

    fn ids(ranked: &[RankedAnime]) -> Vec<i32> {
        ranked.iter().map(|r| r.anime_id.value()).collect()
    }

    #[test]
    fn filters_below_threshold_and_sorts_descending() {
        let ranked = top_results(&results(), ResultType::Score, 10, 2.0, SortOrder::Descending);
        assert_eq!(ids(&ranked), vec![4, 1, 3]);
    }

    #[test]
    fn undefined_values_stay_at_the_bottom_when_ascending() {
        let ranked = top_results(&results(), ResultType::Score, 10, 2.0, SortOrder::Ascending);
        assert_eq!(ids(&ranked), vec![1, 4, 3]);
    }

    #[test]
    fn limits_to_count() {
        let ranked = top_results(&results(), ResultType::Popularity, 2, 2.0, SortOrder::Descending);
        assert_eq!(ids(&ranked), vec![1, 3]);
        assert_eq!(ranked[0].value, Metric::Value(40.0));
    }
}
