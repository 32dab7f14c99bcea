//! Job queue port for scheduling normalization work.
//!
//! This module provides the [`JobQueue`] trait, abstracting batch submission
//! with per-key deduplication. Discovery only submits; the daemon's worker
//! loop claims and removes jobs.

use thiserror::Error;

/// Domain errors for queue operations.
#[derive(Debug, Error)]
pub enum QueueError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Malformed job payload: {0}")]
    Payload(String),
}

impl From<sea_orm::DbErr> for QueueError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<serde_json::Error> for QueueError {
    fn from(err: serde_json::Error) -> Self {
        Self::Payload(err.to_string())
    }
}

/// One job to schedule: a well-known name, a JSON payload, and the key the
/// queue uses to drop duplicate submissions while a prior instance is
/// pending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSpec {
    pub name: String,
    pub payload: serde_json::Value,
    pub dedup_key: String,
}

/// A pending job as handed to the worker.
#[derive(Debug, Clone)]
pub struct QueuedJob {
    pub id: i64,
    pub name: String,
    pub payload: serde_json::Value,
    pub dedup_key: String,
}

/// Queue port consumed by discovery and the daemon worker.
///
/// Retry, backoff, and worker concurrency are the hosting engine's concern;
/// implementations only guarantee the deduplication contract.
#[async_trait::async_trait]
pub trait JobQueue: Send + Sync {
    /// Submits a batch, each entry independently deduplicated by key.
    /// Entries whose key is already pending are ignored.
    ///
    /// Returns the number of newly enqueued jobs.
    async fn submit_batch(&self, jobs: &[JobSpec]) -> Result<u64, QueueError>;

    /// Oldest pending jobs, up to `limit`, in enqueue order.
    async fn next_batch(&self, limit: u64) -> Result<Vec<QueuedJob>, QueueError>;

    /// Removes a job once executed (or deliberately dropped), freeing its
    /// deduplication key for future submissions.
    async fn remove(&self, id: i64) -> Result<(), QueueError>;

    /// Number of jobs currently pending.
    async fn pending_count(&self) -> Result<u64, QueueError>;
}
