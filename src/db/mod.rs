use crate::domain::{AnimeId, Season, SurveyId, YearSeason};
use crate::models::anime::Anime;
use crate::models::response::{AnimeResponse, Response, ResponseTotals, SurveyAdditionRemoval};
use crate::models::survey::Survey;
use anyhow::Result;
use chrono::{DateTime, Utc};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url
                .trim_start_matches("sqlite://")
                .trim_start_matches("sqlite:");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn survey_repo(&self) -> repositories::survey::SurveyRepository {
        repositories::survey::SurveyRepository::new(self.conn.clone())
    }

    fn anime_repo(&self) -> repositories::anime::AnimeRepository {
        repositories::anime::AnimeRepository::new(self.conn.clone())
    }

    fn response_repo(&self) -> repositories::response::ResponseRepository {
        repositories::response::ResponseRepository::new(self.conn.clone())
    }

    fn addition_removal_repo(&self) -> repositories::addition_removal::AdditionRemovalRepository {
        repositories::addition_removal::AdditionRemovalRepository::new(self.conn.clone())
    }

    fn cache_repo(&self) -> repositories::cache::CacheRepository {
        repositories::cache::CacheRepository::new(self.conn.clone())
    }

    pub async fn get_survey(&self, id: SurveyId) -> Result<Option<Survey>> {
        self.survey_repo().get(id).await
    }

    pub async fn find_survey(
        &self,
        year: i32,
        season: Season,
        is_preseason: bool,
    ) -> Result<Option<Survey>> {
        self.survey_repo().find(year, season, is_preseason).await
    }

    pub async fn list_surveys(&self, year: Option<i32>) -> Result<Vec<Survey>> {
        self.survey_repo().list(year).await
    }

    pub async fn add_survey(&self, survey: &Survey) -> Result<()> {
        self.survey_repo().add(survey).await
    }

    pub async fn get_anime(&self, id: AnimeId) -> Result<Option<Anime>> {
        self.anime_repo().get(id).await
    }

    pub async fn get_anime_by_ids(&self, ids: &[AnimeId]) -> Result<Vec<Anime>> {
        self.anime_repo().get_by_ids(ids).await
    }

    pub async fn list_anime_started_by(&self, at: YearSeason) -> Result<Vec<Anime>> {
        self.anime_repo().started_by(at).await
    }

    pub async fn add_anime(&self, anime: &Anime) -> Result<()> {
        self.anime_repo().add(anime).await
    }

    pub async fn get_response_totals(&self, survey_id: SurveyId) -> Result<ResponseTotals> {
        self.response_repo().totals(survey_id).await
    }

    pub async fn list_responses(&self, survey_id: SurveyId) -> Result<Vec<Response>> {
        self.response_repo().list(survey_id).await
    }

    pub async fn list_anime_responses(&self, survey_id: SurveyId) -> Result<Vec<AnimeResponse>> {
        self.response_repo().anime_responses(survey_id).await
    }

    pub async fn add_response(&self, response: &Response) -> Result<()> {
        self.response_repo().add(response).await
    }

    pub async fn add_anime_responses(&self, answers: &[AnimeResponse]) -> Result<()> {
        self.response_repo().add_anime_responses(answers).await
    }

    pub async fn list_additions_removals(
        &self,
        survey_id: SurveyId,
    ) -> Result<Vec<SurveyAdditionRemoval>> {
        self.addition_removal_repo().list(survey_id).await
    }

    pub async fn add_addition_removal(&self, event: &SurveyAdditionRemoval) -> Result<()> {
        self.addition_removal_repo().add(event).await
    }

    pub async fn get_cached_results(&self, key: &str) -> Result<Option<String>> {
        self.cache_repo().get(key).await
    }

    /// Stores a payload unless a live entry already exists for `key`.
    pub async fn cache_results(
        &self,
        key: &str,
        payload: String,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<bool> {
        self.cache_repo().add(key, payload, expires_at).await
    }

    pub async fn remove_cached_results(&self, key: &str) -> Result<()> {
        self.cache_repo().remove(key).await
    }

    pub async fn purge_cached_results(&self) -> Result<u64> {
        self.cache_repo().purge().await
    }
}
