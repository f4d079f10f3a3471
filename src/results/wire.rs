//! JSON-safe view of results.
//!
//! Plain JSON has no NaN or Infinity, so every non-finite value becomes
//! `null` here. Nothing downstream of this module sees a [`Metric`].

use super::aggregate::SurveyResults;
use super::metric::Metric;
use super::ranking::RankedAnime;
use super::result_type::ResultType;
use crate::domain::AnimeId;
use serde::Serialize;
use std::collections::BTreeMap;

pub type WireAnimeResults = BTreeMap<ResultType, Option<f64>>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WireSurveyResults {
    pub series: BTreeMap<AnimeId, WireAnimeResults>,
    pub special: BTreeMap<AnimeId, WireAnimeResults>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WireRankedAnime {
    pub anime_id: AnimeId,
    pub result: Option<f64>,
}

/// `Some` only for finite values.
#[must_use]
pub const fn nullable(metric: Metric) -> Option<f64> {
    metric.value()
}

fn convert(results: &BTreeMap<AnimeId, BTreeMap<ResultType, Metric>>) -> BTreeMap<AnimeId, WireAnimeResults> {
    results
        .iter()
        .map(|(anime_id, values)| {
            (
                *anime_id,
                values
                    .iter()
                    .map(|(kind, metric)| (*kind, nullable(*metric)))
                    .collect(),
            )
        })
        .collect()
}

impl From<&SurveyResults> for WireSurveyResults {
    fn from(results: &SurveyResults) -> Self {
        Self {
            series: convert(&results.series),
            special: convert(&results.special),
        }
    }
}

impl From<&RankedAnime> for WireRankedAnime {
    fn from(ranked: &RankedAnime) -> Self {
        Self {
            anime_id: ranked.anime_id,
            result: nullable(ranked.value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinels_become_null() {
        let mut results = SurveyResults::default();
        results.series.insert(
            AnimeId::new(3),
            BTreeMap::from([
                (ResultType::Popularity, Metric::Value(12.5)),
                (ResultType::GenderPopularityRatio, Metric::Infinite),
                (ResultType::Score, Metric::Undefined),
            ]),
        );

        let json = serde_json::to_value(WireSurveyResults::from(&results)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "series": {
                    "3": {
                        "popularity": 12.5,
                        "gender_popularity_ratio": null,
                        "score": null
                    }
                },
                "special": {}
            })
        );
    }

    #[test]
    fn ranked_entries_are_nullable() {
        let ranked = RankedAnime {
            anime_id: AnimeId::new(1),
            value: Metric::Infinite,
        };
        assert_eq!(WireRankedAnime::from(&ranked).result, None);
    }
}
