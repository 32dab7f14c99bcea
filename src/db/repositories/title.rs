use crate::domain::TitleType;
use crate::entities::{prelude::*, title_basics, title_episode, title_ratings};
use anyhow::Result;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait,
};

/// Read-only repository over the source catalog relations.
pub struct TitleRepository {
    conn: DatabaseConnection,
}

impl TitleRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// One keyset page of eligible title ids, ordered by id descending.
    ///
    /// `after` is the last id of the previous page; `None` starts the scan.
    /// An empty result means the scan is complete.
    pub async fn page_eligible_ids(&self, after: Option<&str>, limit: u64) -> Result<Vec<String>> {
        let mut query = TitleBasics::find()
            .select_only()
            .column(title_basics::Column::Tconst)
            .filter(title_basics::Column::TitleType.is_in(TitleType::eligible()));

        if let Some(last_seen) = after {
            query = query.filter(title_basics::Column::Tconst.lt(last_seen));
        }

        let ids: Vec<String> = query
            .order_by_desc(title_basics::Column::Tconst)
            .limit(limit)
            .into_tuple()
            .all(&self.conn)
            .await?;

        Ok(ids)
    }

    pub async fn get_basics(&self, imdb_id: &str) -> Result<Option<title_basics::Model>> {
        let row = TitleBasics::find_by_id(imdb_id).one(&self.conn).await?;

        Ok(row)
    }

    /// The title's rating row, if both fields are populated.
    ///
    /// Capped to a single row; additional upstream rating sources are out of
    /// scope for now.
    pub async fn get_rating(&self, imdb_id: &str) -> Result<Option<title_ratings::Model>> {
        let row = TitleRatings::find()
            .filter(title_ratings::Column::Tconst.eq(imdb_id))
            .filter(title_ratings::Column::AverageRating.is_not_null())
            .filter(title_ratings::Column::NumVotes.is_not_null())
            .one(&self.conn)
            .await?;

        Ok(row)
    }

    /// All episodes of a series joined to their own `title_basics` row,
    /// sorted by season then episode number.
    pub async fn get_episodes(&self, parent_imdb_id: &str) -> Result<Vec<EpisodeRow>> {
        let rows = TitleEpisode::find()
            .select_only()
            .column(title_episode::Column::Tconst)
            .column(title_episode::Column::SeasonNumber)
            .column(title_episode::Column::EpisodeNumber)
            .column_as(title_basics::Column::PrimaryTitle, "primary_title")
            .column_as(title_basics::Column::OriginalTitle, "original_title")
            .column_as(title_basics::Column::RuntimeMinutes, "runtime_minutes")
            .join(JoinType::InnerJoin, title_episode::Relation::Basics.def())
            .filter(title_episode::Column::ParentTconst.eq(parent_imdb_id))
            .order_by_asc(title_episode::Column::SeasonNumber)
            .order_by_asc(title_episode::Column::EpisodeNumber)
            .into_model::<EpisodeRow>()
            .all(&self.conn)
            .await?;

        Ok(rows)
    }
}

/// Episode row joined with its title facts, for query results.
#[derive(Debug, Clone, FromQueryResult)]
pub struct EpisodeRow {
    pub tconst: String,
    pub season_number: Option<i32>,
    pub episode_number: Option<i32>,
    pub primary_title: String,
    pub original_title: String,
    pub runtime_minutes: Option<i32>,
}
