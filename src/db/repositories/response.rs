use super::{format_timestamp, parse_timestamp};
use crate::domain::{AnimeId, SurveyId};
use crate::entities::{anime_responses, prelude::*, responses};
use crate::models::response::{AnimeResponse, Expectations, Gender, Response, ResponseTotals};
use anyhow::Result;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

pub struct ResponseRepository {
    conn: DatabaseConnection,
}

fn parse_gender(code: Option<&str>) -> Option<Gender> {
    code.map(str::trim).and_then(Gender::from_code)
}

impl ResponseRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn totals(&self, survey_id: SurveyId) -> Result<ResponseTotals> {
        let count_gender = |gender: Option<Gender>| {
            let mut query = Responses::find().filter(responses::Column::SurveyId.eq(survey_id.value()));
            if let Some(gender) = gender {
                query = query.filter(responses::Column::Gender.eq(gender.code()));
            }
            query.count(&self.conn)
        };

        Ok(ResponseTotals {
            total: count_gender(None).await?,
            male: count_gender(Some(Gender::Male)).await?,
            female: count_gender(Some(Gender::Female)).await?,
        })
    }

    pub async fn list(&self, survey_id: SurveyId) -> Result<Vec<Response>> {
        Responses::find()
            .filter(responses::Column::SurveyId.eq(survey_id.value()))
            .order_by_asc(responses::Column::Id)
            .all(&self.conn)
            .await?
            .into_iter()
            .map(|m| {
                Ok(Response {
                    id: m.id,
                    survey_id,
                    age: m.age,
                    gender: parse_gender(m.gender.as_deref()),
                    timestamp: parse_timestamp(&m.timestamp)?,
                })
            })
            .collect()
    }

    /// Every per-anime answer of the survey, joined with its respondent.
    pub async fn anime_responses(&self, survey_id: SurveyId) -> Result<Vec<AnimeResponse>> {
        let rows = AnimeResponses::find()
            .find_also_related(Responses)
            .filter(responses::Column::SurveyId.eq(survey_id.value()))
            .order_by_asc(anime_responses::Column::ResponseId)
            .order_by_asc(anime_responses::Column::AnimeId)
            .all(&self.conn)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(answer, response)| {
                let response = response?;
                Some(AnimeResponse {
                    response_id: answer.response_id,
                    anime_id: AnimeId::new(answer.anime_id),
                    watching: answer.watching,
                    underwatched: answer.underwatched,
                    score: answer.score,
                    expectations: answer
                        .expectations
                        .as_deref()
                        .map(str::trim)
                        .and_then(Expectations::from_code),
                    gender: parse_gender(response.gender.as_deref()),
                    age: response.age,
                })
            })
            .collect())
    }

    pub async fn add(&self, response: &Response) -> Result<()> {
        let active_model = responses::ActiveModel {
            id: Set(response.id),
            survey_id: Set(response.survey_id.value()),
            age: Set(response.age),
            gender: Set(response.gender.map(|g| g.code().to_string())),
            timestamp: Set(format_timestamp(response.timestamp)),
        };

        Responses::insert(active_model).exec(&self.conn).await?;
        Ok(())
    }

    /// Demographics on `answer` are ignored; they come from the response.
    pub async fn add_anime_responses(&self, answers: &[AnimeResponse]) -> Result<()> {
        if answers.is_empty() {
            return Ok(());
        }

        let models = answers.iter().map(|a| anime_responses::ActiveModel {
            response_id: Set(a.response_id),
            anime_id: Set(a.anime_id.value()),
            watching: Set(a.watching),
            underwatched: Set(a.underwatched),
            score: Set(a.score),
            expectations: Set(a.expectations.map(|e| e.code().to_string())),
        });

        AnimeResponses::insert_many(models).exec(&self.conn).await?;
        Ok(())
    }
}
