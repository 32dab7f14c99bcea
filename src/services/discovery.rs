//! Title discovery: scan the source catalog and fan out normalization jobs.

use crate::constants::{NORMALIZE_TITLE_JOB, discovery::PAGE_SIZE};
use crate::db::Store;
use crate::services::job_queue::{JobQueue, JobSpec, QueueError};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Domain errors for discovery runs.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Job submission failed: {0}")]
    Submission(#[from] QueueError),
}

impl From<anyhow::Error> for DiscoveryError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Scans the catalog for eligible titles and schedules one normalization job
/// per title. Deduplication across runs is the queue's responsibility; this
/// service only derives stable keys.
pub struct TitleDiscoveryService {
    store: Store,
    queue: Arc<dyn JobQueue>,
}

impl TitleDiscoveryService {
    pub fn new(store: Store, queue: Arc<dyn JobQueue>) -> Self {
        Self { store, queue }
    }

    /// One full scan-and-submit pass over the catalog.
    ///
    /// Pages are read with a keyset cursor (id descending, `id < last_seen`),
    /// so rows inserted or deleted mid-scan cannot cause skips or duplicates.
    /// Each page is submitted as a single batch; a failure aborts the run and
    /// prior pages' submissions stand.
    ///
    /// Returns the total number of titles scheduled in this run.
    pub async fn run(&self) -> Result<u64, DiscoveryError> {
        info!("finding titles to normalize");

        let mut cursor: Option<String> = None;
        let mut count: u64 = 0;

        loop {
            let ids = self
                .store
                .page_eligible_title_ids(cursor.as_deref(), PAGE_SIZE)
                .await?;

            let Some(last_seen) = ids.last().cloned() else {
                break;
            };

            let jobs: Vec<JobSpec> = ids.iter().map(|id| normalize_job(id)).collect();
            let submitted = self.queue.submit_batch(&jobs).await?;
            debug!(
                page_rows = jobs.len(),
                newly_enqueued = submitted,
                "submitted discovery page"
            );

            count += jobs.len() as u64;
            cursor = Some(last_seen);
        }

        metrics::counter!("normarr_titles_scheduled_total").increment(count);
        info!(count, "discovery complete");

        Ok(count)
    }
}

/// The job spec for one title.
///
/// The key is derived from the job name and identifier only, so repeated
/// discovery runs over unchanged data dedup to a single pending job per
/// title.
#[must_use]
pub fn normalize_job(imdb_id: &str) -> JobSpec {
    JobSpec {
        name: NORMALIZE_TITLE_JOB.to_string(),
        payload: serde_json::json!({ "imdbId": imdb_id }),
        dedup_key: format!("{NORMALIZE_TITLE_JOB}:{imdb_id}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_spec_shape() {
        let job = normalize_job("tt0000001");
        assert_eq!(job.name, "normalize-title");
        assert_eq!(job.dedup_key, "normalize-title:tt0000001");
        assert_eq!(job.payload["imdbId"], "tt0000001");
    }

    #[test]
    fn key_derivation_is_deterministic() {
        assert_eq!(normalize_job("tt0000042"), normalize_job("tt0000042"));
        assert_ne!(
            normalize_job("tt0000042").dedup_key,
            normalize_job("tt0000043").dedup_key
        );
    }
}
