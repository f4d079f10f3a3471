use super::{format_timestamp, parse_timestamp};
use crate::domain::{Season, SurveyId};
use crate::entities::{prelude::*, surveys};
use crate::models::survey::Survey;
use anyhow::{Result, anyhow};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

pub struct SurveyRepository {
    conn: DatabaseConnection,
}

impl SurveyRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(model: surveys::Model) -> Result<Survey> {
        let season = Season::from_index(model.season)
            .ok_or_else(|| anyhow!("survey {} has invalid season {}", model.id, model.season))?;

        Ok(Survey {
            id: SurveyId::new(model.id),
            year: model.year,
            season,
            is_preseason: model.is_preseason,
            opening_time: parse_timestamp(&model.opening_time)?,
            closing_time: parse_timestamp(&model.closing_time)?,
        })
    }

    pub async fn get(&self, id: SurveyId) -> Result<Option<Survey>> {
        Surveys::find_by_id(id.value())
            .one(&self.conn)
            .await?
            .map(Self::map_model)
            .transpose()
    }

    pub async fn find(
        &self,
        year: i32,
        season: Season,
        is_preseason: bool,
    ) -> Result<Option<Survey>> {
        Surveys::find()
            .filter(surveys::Column::Year.eq(year))
            .filter(surveys::Column::Season.eq(season.index()))
            .filter(surveys::Column::IsPreseason.eq(is_preseason))
            .one(&self.conn)
            .await?
            .map(Self::map_model)
            .transpose()
    }

    /// Newest first; within a season the post-season survey comes first.
    pub async fn list(&self, year: Option<i32>) -> Result<Vec<Survey>> {
        let mut query = Surveys::find();
        if let Some(year) = year {
            query = query.filter(surveys::Column::Year.eq(year));
        }

        query
            .order_by_desc(surveys::Column::Year)
            .order_by_desc(surveys::Column::Season)
            .order_by_asc(surveys::Column::IsPreseason)
            .all(&self.conn)
            .await?
            .into_iter()
            .map(Self::map_model)
            .collect()
    }

    pub async fn add(&self, survey: &Survey) -> Result<()> {
        let active_model = surveys::ActiveModel {
            id: Set(survey.id.value()),
            year: Set(survey.year),
            season: Set(survey.season.index()),
            is_preseason: Set(survey.is_preseason),
            opening_time: Set(format_timestamp(survey.opening_time)),
            closing_time: Set(format_timestamp(survey.closing_time)),
        };

        Surveys::insert(active_model).exec(&self.conn).await?;
        Ok(())
    }
}
