#![allow(dead_code)]

use chrono::{Duration, Utc};
use seasonsurvey::db::Store;
use seasonsurvey::domain::{AnimeId, Season, SurveyId, YearSeason};
use seasonsurvey::models::anime::{Anime, AnimeName, AnimeNameType, AnimeType};
use seasonsurvey::models::response::{AnimeResponse, Gender, Response, SurveyAdditionRemoval};
use seasonsurvey::models::survey::Survey;
use std::sync::Arc;

pub const FINISHED_SURVEY: SurveyId = SurveyId::new(1);
pub const ONGOING_SURVEY: SurveyId = SurveyId::new(2);

/// Late addition, from snapshot 40.
pub const LATE_SERIES: AnimeId = AnimeId::new(2);
/// Present from the start, no events.
pub const STEADY_SERIES: AnimeId = AnimeId::new(1);
/// Added at snapshot 10, removed at 70.
pub const SHORT_SPECIAL: AnimeId = AnimeId::new(3);
/// Ended the season before the finished survey.
pub const ENDED_SERIES: AnimeId = AnimeId::new(4);

pub async fn temp_store() -> Arc<Store> {
    let db_path = std::env::temp_dir().join(format!(
        "seasonsurvey-test-{}.db",
        uuid::Uuid::new_v4()
    ));
    let store = Store::new(&format!("sqlite:{}", db_path.display()))
        .await
        .expect("failed to create store");
    Arc::new(store)
}

pub fn finished_survey() -> Survey {
    Survey {
        id: FINISHED_SURVEY,
        year: 2023,
        season: Season::Summer,
        is_preseason: false,
        opening_time: Utc::now() - Duration::days(30),
        closing_time: Utc::now() - Duration::days(20),
    }
}

pub fn ongoing_survey() -> Survey {
    Survey {
        id: ONGOING_SURVEY,
        year: 2023,
        season: Season::Fall,
        is_preseason: true,
        opening_time: Utc::now() - Duration::days(1),
        closing_time: Utc::now() + Duration::days(5),
    }
}

pub fn anime(
    id: AnimeId,
    anime_type: AnimeType,
    start: YearSeason,
    end: Option<YearSeason>,
    subbed: Option<YearSeason>,
    name: &str,
) -> Anime {
    Anime {
        id,
        anime_type,
        start: Some(start),
        end,
        subbed,
        names: vec![AnimeName {
            name: name.to_string(),
            kind: AnimeNameType::Japanese,
            official: true,
        }],
    }
}

pub fn answer(response_id: i32, anime_id: AnimeId, watching: bool, score: Option<i32>) -> AnimeResponse {
    AnimeResponse {
        response_id,
        anime_id,
        watching,
        underwatched: false,
        score,
        expectations: None,
        gender: None,
        age: None,
    }
}

/// Gender of response `id` in the finished survey: 1-40 male, 41-80
/// female, the rest unanswered.
pub fn gender_of(id: i32) -> Option<Gender> {
    match id {
        1..=40 => Some(Gender::Male),
        41..=80 => Some(Gender::Female),
        _ => None,
    }
}

/// Seeds a finished survey with 100 responses and an ongoing survey with
/// 10, plus four anime:
///
/// - `STEADY_SERIES`: 20 male watchers scoring 4
/// - `LATE_SERIES`: added at 40, 12 female watchers scoring 5
/// - `SHORT_SPECIAL`: added at 10 and removed at 70, 6 unscored watchers
/// - `ENDED_SERIES`: not eligible
pub async fn seed(store: &Store) {
    let finished = finished_survey();
    let ongoing = ongoing_survey();
    store.add_survey(&finished).await.unwrap();
    store.add_survey(&ongoing).await.unwrap();

    let summer = YearSeason::new(2023, Season::Summer);
    let spring = YearSeason::new(2023, Season::Spring);
    for entry in [
        anime(STEADY_SERIES, AnimeType::TvSeries, summer, None, None, "Steady"),
        anime(LATE_SERIES, AnimeType::TvSeries, summer, None, None, "Late"),
        anime(SHORT_SPECIAL, AnimeType::Movie, spring, None, Some(summer), "Short"),
        anime(ENDED_SERIES, AnimeType::TvSeries, spring, Some(spring), None, "Ended"),
    ] {
        store.add_anime(&entry).await.unwrap();
    }

    for id in 1..=100 {
        store
            .add_response(&Response {
                id,
                survey_id: FINISHED_SURVEY,
                age: Some(20),
                gender: gender_of(id),
                timestamp: finished.opening_time + Duration::minutes(i64::from(id)),
            })
            .await
            .unwrap();
    }

    let mut answers = Vec::new();
    answers.extend((1..=20).map(|id| answer(id, STEADY_SERIES, true, Some(4))));
    answers.extend((21..=30).map(|id| answer(id, STEADY_SERIES, false, None)));
    answers.extend((41..=52).map(|id| answer(id, LATE_SERIES, true, Some(5))));
    answers.extend((81..=86).map(|id| answer(id, SHORT_SPECIAL, true, None)));
    answers.extend((1..=5).map(|id| answer(id, ENDED_SERIES, true, Some(1))));
    store.add_anime_responses(&answers).await.unwrap();

    for (hour, anime_id, is_addition, response_count) in [
        (1, LATE_SERIES, true, 40),
        (2, SHORT_SPECIAL, true, 10),
        (3, SHORT_SPECIAL, false, 70),
    ] {
        store
            .add_addition_removal(&SurveyAdditionRemoval {
                survey_id: FINISHED_SURVEY,
                anime_id,
                is_addition,
                response_count,
                timestamp: finished.opening_time + Duration::hours(hour),
            })
            .await
            .unwrap();
    }

    for id in 101..=110 {
        store
            .add_response(&Response {
                id,
                survey_id: ONGOING_SURVEY,
                age: None,
                gender: None,
                timestamp: ongoing.opening_time + Duration::minutes(i64::from(id)),
            })
            .await
            .unwrap();
    }
}
