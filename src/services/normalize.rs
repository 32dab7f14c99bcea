//! Title normalization: join a title's relational facts and upsert the
//! resulting document.

use crate::constants::{documents::TITLES_COLLECTION, ratings::SOURCE_IMDB};
use crate::db::{EpisodeRow, Store};
use crate::domain::{ImdbId, TitleType};
use crate::models::{EpisodeSummary, NormalizedRating, NormalizedTitle, Seasons, split_genres};
use crate::services::document_store::{DocumentError, DocumentStore};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Domain errors for one normalization attempt.
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("Title {0} not found")]
    NotFound(ImdbId),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Document store error: {0}")]
    Document(#[from] DocumentError),
}

impl From<anyhow::Error> for NormalizeError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Produces and persists the denormalized document for one title.
///
/// Stateless across invocations; every call performs its reads first and
/// exactly one upsert last, so a failure leaves the prior document version
/// untouched. Retry is the hosting job runner's concern.
pub struct TitleNormalizationService {
    store: Store,
    documents: Arc<dyn DocumentStore>,
}

impl TitleNormalizationService {
    pub fn new(store: Store, documents: Arc<dyn DocumentStore>) -> Self {
        Self { store, documents }
    }

    pub async fn execute(&self, imdb_id: &ImdbId) -> Result<(), NormalizeError> {
        debug!(imdb_id = %imdb_id, "title normalization started");

        let basics = self
            .store
            .get_title(imdb_id.as_str())
            .await?
            .ok_or_else(|| NormalizeError::NotFound(imdb_id.clone()))?;
        debug!(
            imdb_id = %imdb_id,
            title = %basics.primary_title,
            start_year = ?basics.start_year,
            "fetched base title"
        );

        let ratings = self.rating_entries(imdb_id).await?;

        let is_series = TitleType::parse(&basics.title_type).is_some_and(|t| t.is_series());
        let seasons = if is_series {
            let episodes = self.store.get_episodes(imdb_id.as_str()).await?;
            let seasons = group_seasons(episodes);
            debug!(imdb_id = %imdb_id, seasons = seasons.len(), "grouped series episodes");
            Some(seasons)
        } else {
            None
        };

        let document = NormalizedTitle {
            imdb_id: basics.tconst,
            primary_title: basics.primary_title,
            original_title: basics.original_title,
            start_year: basics.start_year,
            end_year: basics.end_year,
            runtime_minutes: basics.runtime_minutes,
            title_type: basics.title_type,
            is_adult: basics.is_adult,
            genres: split_genres(basics.genres.as_deref()),
            ratings,
            seasons,
        };

        let body = serde_json::to_value(&document).map_err(DocumentError::from)?;
        self.documents
            .upsert(TITLES_COLLECTION, &document.imdb_id, &body)
            .await?;

        metrics::counter!("normarr_titles_normalized_total").increment(1);
        info!(imdb_id = %imdb_id, "title normalization completed");

        Ok(())
    }

    /// At most one rating entry, tagged with the canonical source.
    async fn rating_entries(
        &self,
        imdb_id: &ImdbId,
    ) -> Result<Vec<NormalizedRating>, NormalizeError> {
        let row = self.store.get_rating(imdb_id.as_str()).await?;

        Ok(row
            .and_then(|r| match (r.average_rating, r.num_votes) {
                (Some(value), Some(votes)) => Some(NormalizedRating {
                    source: SOURCE_IMDB.to_string(),
                    value,
                    votes,
                }),
                _ => None,
            })
            .into_iter()
            .collect())
    }
}

/// Groups fetched episodes into the seasons mapping.
///
/// Rows arrive sorted by (season, episode); insertion order within a season
/// is preserved. Episodes without a season number cannot be placed in the
/// mapping and are skipped.
fn group_seasons(rows: Vec<EpisodeRow>) -> Seasons {
    let mut seasons = Seasons::new();

    for row in rows {
        let Some(season) = row.season_number else {
            continue;
        };

        seasons.entry(season).or_default().push(EpisodeSummary {
            imdb_id: row.tconst,
            episode_number: row.episode_number,
            primary_title: row.primary_title,
            original_title: row.original_title,
            runtime_minutes: row.runtime_minutes,
        });
    }

    seasons
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, season: Option<i32>, episode: Option<i32>) -> EpisodeRow {
        EpisodeRow {
            tconst: id.to_string(),
            season_number: season,
            episode_number: episode,
            primary_title: format!("{id} primary"),
            original_title: format!("{id} original"),
            runtime_minutes: Some(22),
        }
    }

    #[test]
    fn group_seasons_partitions_by_season() {
        let seasons = group_seasons(vec![
            row("tt0000010", Some(1), Some(1)),
            row("tt0000011", Some(1), Some(2)),
            row("tt0000012", Some(2), Some(1)),
        ]);

        assert_eq!(seasons.len(), 2);
        let first: Vec<_> = seasons[&1].iter().map(|e| e.imdb_id.as_str()).collect();
        assert_eq!(first, vec!["tt0000010", "tt0000011"]);
        assert_eq!(seasons[&2].len(), 1);
        assert_eq!(seasons[&2][0].episode_number, Some(1));
    }

    #[test]
    fn group_seasons_preserves_fetch_order_within_season() {
        let seasons = group_seasons(vec![
            row("tt0000020", Some(1), Some(1)),
            row("tt0000021", Some(1), Some(2)),
            row("tt0000022", Some(1), Some(3)),
        ]);

        let numbers: Vec<_> = seasons[&1].iter().map(|e| e.episode_number).collect();
        assert_eq!(numbers, vec![Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn group_seasons_skips_unplaceable_episodes() {
        let seasons = group_seasons(vec![
            row("tt0000030", None, Some(1)),
            row("tt0000031", Some(1), Some(1)),
        ]);

        assert_eq!(seasons.len(), 1);
        assert_eq!(seasons[&1].len(), 1);
        assert_eq!(seasons[&1][0].imdb_id, "tt0000031");
    }

    #[test]
    fn episode_fields_copied_verbatim() {
        let seasons = group_seasons(vec![row("tt0000040", Some(3), None)]);

        let episode = &seasons[&3][0];
        assert_eq!(episode.primary_title, "tt0000040 primary");
        assert_eq!(episode.original_title, "tt0000040 original");
        assert_eq!(episode.runtime_minutes, Some(22));
        assert_eq!(episode.episode_number, None);
    }
}
