use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "responses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub survey_id: i32,
    pub age: Option<i32>,
    /// "M", "F", "O" or NULL/blank for no answer.
    pub gender: Option<String>,
    pub timestamp: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::surveys::Entity",
        from = "Column::SurveyId",
        to = "super::surveys::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Surveys,
    #[sea_orm(has_many = "super::anime_responses::Entity")]
    AnimeResponses,
}

impl Related<super::surveys::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Surveys.def()
    }
}

impl Related<super::anime_responses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AnimeResponses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
