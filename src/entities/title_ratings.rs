use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "title_ratings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub tconst: String,
    pub average_rating: Option<f64>,
    pub num_votes: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::title_basics::Entity",
        from = "Column::Tconst",
        to = "super::title_basics::Column::Tconst",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    TitleBasics,
}

impl Related<super::title_basics::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TitleBasics.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
