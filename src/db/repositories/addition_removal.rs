use super::{format_timestamp, parse_timestamp};
use crate::domain::{AnimeId, SurveyId};
use crate::entities::{prelude::*, survey_additions_removals};
use crate::models::response::SurveyAdditionRemoval;
use anyhow::Result;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

pub struct AdditionRemovalRepository {
    conn: DatabaseConnection,
}

impl AdditionRemovalRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self, survey_id: SurveyId) -> Result<Vec<SurveyAdditionRemoval>> {
        SurveyAdditionsRemovals::find()
            .filter(survey_additions_removals::Column::SurveyId.eq(survey_id.value()))
            .order_by_asc(survey_additions_removals::Column::Timestamp)
            .order_by_asc(survey_additions_removals::Column::Id)
            .all(&self.conn)
            .await?
            .into_iter()
            .map(|m| {
                Ok(SurveyAdditionRemoval {
                    survey_id,
                    anime_id: AnimeId::new(m.anime_id),
                    is_addition: m.is_addition,
                    response_count: m.response_count,
                    timestamp: parse_timestamp(&m.timestamp)?,
                })
            })
            .collect()
    }

    pub async fn add(&self, event: &SurveyAdditionRemoval) -> Result<()> {
        let active_model = survey_additions_removals::ActiveModel {
            survey_id: Set(event.survey_id.value()),
            anime_id: Set(event.anime_id.value()),
            is_addition: Set(event.is_addition),
            response_count: Set(event.response_count),
            timestamp: Set(format_timestamp(event.timestamp)),
            ..Default::default()
        };

        SurveyAdditionsRemovals::insert(active_model)
            .exec(&self.conn)
            .await?;
        Ok(())
    }
}
