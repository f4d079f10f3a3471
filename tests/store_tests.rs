//! Repository behavior against a temporary SQLite file.

mod common;

use common::*;
use seasonsurvey::cache::{CacheTtl, DatabaseCache, ResultCache};
use seasonsurvey::domain::{Season, YearSeason};
use seasonsurvey::models::anime::AnimeNameType;
use seasonsurvey::models::response::Gender;
use std::time::Duration;

#[tokio::test]
async fn test_store_ping_and_migrations() {
    let store = temp_store().await;
    store.ping().await.unwrap();
    assert!(store.list_surveys(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_survey_round_trip() {
    let store = temp_store().await;
    seed(&store).await;

    let expected = finished_survey();
    let survey = store.get_survey(FINISHED_SURVEY).await.unwrap().unwrap();
    assert_eq!(survey.year, expected.year);
    assert_eq!(survey.season, expected.season);
    assert!(!survey.is_preseason);
    assert_eq!(
        survey.closing_time.timestamp(),
        expected.closing_time.timestamp()
    );

    let found = store
        .find_survey(2023, Season::Fall, true)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, ONGOING_SURVEY);
    assert!(store.find_survey(2023, Season::Fall, false).await.unwrap().is_none());

    let listed = store.list_surveys(Some(2023)).await.unwrap();
    let ids: Vec<_> = listed.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![ONGOING_SURVEY, FINISHED_SURVEY]);
}

#[tokio::test]
async fn test_anime_started_by_filters_on_start() {
    let store = temp_store().await;
    seed(&store).await;

    let spring = store
        .list_anime_started_by(YearSeason::new(2023, Season::Spring))
        .await
        .unwrap();
    let ids: Vec<_> = spring.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![SHORT_SPECIAL, ENDED_SERIES]);

    let summer = store
        .list_anime_started_by(YearSeason::new(2023, Season::Summer))
        .await
        .unwrap();
    assert_eq!(summer.len(), 4);

    let next_year = store
        .list_anime_started_by(YearSeason::new(2024, Season::Winter))
        .await
        .unwrap();
    assert_eq!(next_year.len(), 4);
}

#[tokio::test]
async fn test_anime_names_are_loaded() {
    let store = temp_store().await;
    seed(&store).await;

    let anime = store.get_anime(SHORT_SPECIAL).await.unwrap().unwrap();
    assert_eq!(anime.names.len(), 1);
    assert_eq!(anime.names[0].kind, AnimeNameType::Japanese);
    assert_eq!(anime.display_name(), "Short");
    assert_eq!(anime.subbed, Some(YearSeason::new(2023, Season::Summer)));
    assert_eq!(anime.end, None);

    let several = store
        .get_anime_by_ids(&[LATE_SERIES, STEADY_SERIES])
        .await
        .unwrap();
    assert_eq!(several.len(), 2);
}

#[tokio::test]
async fn test_anime_responses_carry_respondent_demographics() {
    let store = temp_store().await;
    seed(&store).await;

    let answers = store.list_anime_responses(FINISHED_SURVEY).await.unwrap();
    assert_eq!(answers.len(), 20 + 10 + 12 + 6 + 5);

    let late = answers
        .iter()
        .find(|a| a.anime_id == LATE_SERIES)
        .unwrap();
    assert_eq!(late.gender, Some(Gender::Female));
    assert_eq!(late.age, Some(20));
    assert_eq!(late.score, Some(5));

    assert!(store.list_anime_responses(ONGOING_SURVEY).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_response_totals_by_gender() {
    let store = temp_store().await;
    seed(&store).await;

    let totals = store.get_response_totals(FINISHED_SURVEY).await.unwrap();
    assert_eq!(totals.total, 100);
    assert_eq!(totals.male, 40);
    assert_eq!(totals.female, 40);

    let ongoing = store.get_response_totals(ONGOING_SURVEY).await.unwrap();
    assert_eq!(ongoing.total, 10);
    assert_eq!(ongoing.male, 0);
}

#[tokio::test]
async fn test_additions_removals_are_listed_in_order() {
    let store = temp_store().await;
    seed(&store).await;

    let events = store.list_additions_removals(FINISHED_SURVEY).await.unwrap();
    let counts: Vec<_> = events.iter().map(|e| e.response_count).collect();
    assert_eq!(counts, vec![40, 10, 70]);
    assert!(events[0].is_addition);
    assert!(!events[2].is_addition);
}

#[tokio::test]
async fn test_database_cache_expiry_and_purge() {
    let store = temp_store().await;
    let cache = DatabaseCache::new(store.clone());

    cache
        .add("forever", "1".to_string(), CacheTtl::Forever)
        .await
        .unwrap();
    cache
        .add(
            "later",
            "2".to_string(),
            CacheTtl::Expires(Duration::from_secs(3600)),
        )
        .await
        .unwrap();
    cache
        .add("expired", "3".to_string(), CacheTtl::Expires(Duration::ZERO))
        .await
        .unwrap();

    assert_eq!(cache.get("forever").await.unwrap().as_deref(), Some("1"));
    assert_eq!(cache.get("later").await.unwrap().as_deref(), Some("2"));
    assert_eq!(cache.get("expired").await.unwrap(), None);
    assert_eq!(cache.get("missing").await.unwrap(), None);

    let replaced = cache
        .add("forever", "4".to_string(), CacheTtl::Forever)
        .await
        .unwrap();
    assert!(!replaced);
    assert_eq!(cache.get("forever").await.unwrap().as_deref(), Some("1"));

    let refreshed = cache
        .add("expired", "5".to_string(), CacheTtl::Forever)
        .await
        .unwrap();
    assert!(refreshed);
    assert_eq!(cache.get("expired").await.unwrap().as_deref(), Some("5"));

    cache.remove("expired").await.unwrap();
    assert_eq!(cache.get("expired").await.unwrap(), None);

    assert_eq!(cache.purge().await.unwrap(), 2);
    assert_eq!(cache.get("forever").await.unwrap(), None);
}
