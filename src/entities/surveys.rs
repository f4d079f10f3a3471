use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "surveys")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub year: i32,
    pub season: i32,
    pub is_preseason: bool,
    pub opening_time: String,
    pub closing_time: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::responses::Entity")]
    Responses,
    #[sea_orm(has_many = "super::survey_additions_removals::Entity")]
    SurveyAdditionsRemovals,
}

impl Related<super::responses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Responses.def()
    }
}

impl Related<super::survey_additions_removals::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SurveyAdditionsRemovals.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
