use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "anime")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Short type code, e.g. "TV" or "MV".
    pub anime_type: String,
    pub start_year: Option<i32>,
    pub start_season: Option<i32>,
    pub end_year: Option<i32>,
    pub end_season: Option<i32>,
    pub subbed_year: Option<i32>,
    pub subbed_season: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::anime_names::Entity")]
    AnimeNames,
    #[sea_orm(has_many = "super::anime_responses::Entity")]
    AnimeResponses,
}

impl Related<super::anime_names::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AnimeNames.def()
    }
}

impl Related<super::anime_responses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AnimeResponses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
