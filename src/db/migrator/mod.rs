use sea_orm_migration::prelude::*;

mod m20260601_initial;
mod m20260614_add_episode_parent_index;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260601_initial::Migration),
            Box::new(m20260614_add_episode_parent_index::Migration),
        ]
    }
}
