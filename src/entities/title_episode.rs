use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "title_episode")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub tconst: String,
    pub parent_tconst: String,
    pub season_number: Option<i32>,
    pub episode_number: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// The episode's own row in `title_basics` (names, runtime).
    #[sea_orm(
        belongs_to = "super::title_basics::Entity",
        from = "Column::Tconst",
        to = "super::title_basics::Column::Tconst",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Basics,
    /// The parent series row in `title_basics`.
    #[sea_orm(
        belongs_to = "super::title_basics::Entity",
        from = "Column::ParentTconst",
        to = "super::title_basics::Column::Tconst",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Parent,
}

impl Related<super::title_basics::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Basics.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
