use crate::domain::{AnimeId, YearSeason};
use crate::entities::{anime, anime_names, prelude::*};
use crate::models::anime::{Anime as AnimeModel, AnimeName, AnimeNameType, AnimeType};
use anyhow::{Result, anyhow};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use std::collections::HashMap;
use tracing::warn;

pub struct AnimeRepository {
    conn: DatabaseConnection,
}

impl AnimeRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model_to_anime(model: anime::Model, names: Vec<anime_names::Model>) -> Result<AnimeModel> {
        let anime_type = AnimeType::from_code(&model.anime_type)
            .ok_or_else(|| anyhow!("anime {} has unknown type {:?}", model.id, model.anime_type))?;

        let names = names
            .into_iter()
            .filter_map(|n| match AnimeNameType::from_code(&n.name_type) {
                Some(kind) => Some(AnimeName {
                    name: n.name,
                    kind,
                    official: n.official,
                }),
                None => {
                    warn!(anime_id = model.id, name_type = %n.name_type, "Skipping name with unknown type");
                    None
                }
            })
            .collect();

        Ok(AnimeModel {
            id: AnimeId::new(model.id),
            anime_type,
            start: YearSeason::from_parts(model.start_year, model.start_season),
            end: YearSeason::from_parts(model.end_year, model.end_season),
            subbed: YearSeason::from_parts(model.subbed_year, model.subbed_season),
            names,
        })
    }

    async fn attach_names(&self, models: Vec<anime::Model>) -> Result<Vec<AnimeModel>> {
        let ids: Vec<i32> = models.iter().map(|m| m.id).collect();
        let mut names_by_anime: HashMap<i32, Vec<anime_names::Model>> = HashMap::new();

        if !ids.is_empty() {
            let names = AnimeNames::find()
                .filter(anime_names::Column::AnimeId.is_in(ids))
                .order_by_asc(anime_names::Column::Id)
                .all(&self.conn)
                .await?;
            for name in names {
                names_by_anime.entry(name.anime_id).or_default().push(name);
            }
        }

        models
            .into_iter()
            .map(|model| {
                let names = names_by_anime.remove(&model.id).unwrap_or_default();
                Self::map_model_to_anime(model, names)
            })
            .collect()
    }

    pub async fn get(&self, id: AnimeId) -> Result<Option<AnimeModel>> {
        let Some(model) = Anime::find_by_id(id.value()).one(&self.conn).await? else {
            return Ok(None);
        };
        Ok(self.attach_names(vec![model]).await?.pop())
    }

    pub async fn get_by_ids(&self, ids: &[AnimeId]) -> Result<Vec<AnimeModel>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = Anime::find()
            .filter(anime::Column::Id.is_in(ids.iter().map(AnimeId::value)))
            .order_by_asc(anime::Column::Id)
            .all(&self.conn)
            .await?;
        self.attach_names(models).await
    }

    /// Anime that had started by `at`. Whether they are still running is
    /// decided by the caller.
    pub async fn started_by(&self, at: YearSeason) -> Result<Vec<AnimeModel>> {
        let started = Condition::any()
            .add(anime::Column::StartYear.lt(at.year()))
            .add(
                Condition::all()
                    .add(anime::Column::StartYear.eq(at.year()))
                    .add(anime::Column::StartSeason.lte(at.season().index())),
            );

        let models = Anime::find()
            .filter(started)
            .order_by_asc(anime::Column::Id)
            .all(&self.conn)
            .await?;
        self.attach_names(models).await
    }

    pub async fn add(&self, record: &AnimeModel) -> Result<()> {
        let split = |ys: Option<YearSeason>| {
            (
                ys.map(|ys| ys.year()),
                ys.map(|ys| ys.season().index()),
            )
        };
        let (start_year, start_season) = split(record.start);
        let (end_year, end_season) = split(record.end);
        let (subbed_year, subbed_season) = split(record.subbed);

        let txn = self.conn.begin().await?;

        Anime::insert(anime::ActiveModel {
            id: Set(record.id.value()),
            anime_type: Set(record.anime_type.code().to_string()),
            start_year: Set(start_year),
            start_season: Set(start_season),
            end_year: Set(end_year),
            end_season: Set(end_season),
            subbed_year: Set(subbed_year),
            subbed_season: Set(subbed_season),
        })
        .exec(&txn)
        .await?;

        if !record.names.is_empty() {
            let names = record.names.iter().map(|n| anime_names::ActiveModel {
                anime_id: Set(record.id.value()),
                name_type: Set(n.kind.code().to_string()),
                name: Set(n.name.clone()),
                official: Set(n.official),
                ..Default::default()
            });
            AnimeNames::insert_many(names).exec(&txn).await?;
        }

        txn.commit().await?;
        Ok(())
    }
}
