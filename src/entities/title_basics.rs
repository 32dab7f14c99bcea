use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "title_basics")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub tconst: String,
    pub title_type: String,
    pub primary_title: String,
    pub original_title: String,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
    pub runtime_minutes: Option<i32>,
    pub is_adult: bool,
    /// Comma-delimited genre tags as shipped in the source dataset.
    pub genres: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::title_ratings::Entity")]
    TitleRatings,
}

impl Related<super::title_ratings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TitleRatings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
