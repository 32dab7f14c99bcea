use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::entities::{title_basics, title_ratings};

pub mod migrator;
pub mod repositories;

pub use repositories::title::EpisodeRow;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.starts_with(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn title_repo(&self) -> repositories::title::TitleRepository {
        repositories::title::TitleRepository::new(self.conn.clone())
    }

    pub async fn page_eligible_title_ids(
        &self,
        after: Option<&str>,
        limit: u64,
    ) -> Result<Vec<String>> {
        self.title_repo().page_eligible_ids(after, limit).await
    }

    pub async fn get_title(&self, imdb_id: &str) -> Result<Option<title_basics::Model>> {
        self.title_repo().get_basics(imdb_id).await
    }

    pub async fn get_rating(&self, imdb_id: &str) -> Result<Option<title_ratings::Model>> {
        self.title_repo().get_rating(imdb_id).await
    }

    pub async fn get_episodes(&self, parent_imdb_id: &str) -> Result<Vec<EpisodeRow>> {
        self.title_repo().get_episodes(parent_imdb_id).await
    }
}
