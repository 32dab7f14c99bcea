//! `SeaORM` implementation of the [`JobQueue`] trait.
//!
//! Pending jobs live in the `queued_jobs` table; the unique index on the
//! deduplication key plus insert-ignore semantics provide the
//! at-most-one-pending-job-per-key contract.

use crate::entities::{prelude::*, queued_jobs};
use crate::services::job_queue::{JobQueue, JobSpec, QueueError, QueuedJob};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveValue::NotSet, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect,
    Set,
};

#[derive(Clone)]
pub struct SeaOrmJobQueue {
    conn: DatabaseConnection,
}

impl SeaOrmJobQueue {
    #[must_use]
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl JobQueue for SeaOrmJobQueue {
    async fn submit_batch(&self, jobs: &[JobSpec]) -> Result<u64, QueueError> {
        if jobs.is_empty() {
            return Ok(0);
        }

        let now = chrono::Utc::now().to_rfc3339();
        let active_models: Vec<queued_jobs::ActiveModel> = jobs
            .iter()
            .map(|job| queued_jobs::ActiveModel {
                id: NotSet,
                name: Set(job.name.clone()),
                payload: Set(job.payload.to_string()),
                dedup_key: Set(job.dedup_key.clone()),
                enqueued_at: Set(now.clone()),
            })
            .collect();

        // SQLite caps bind variables per statement; 100 rows x 4 bound
        // columns stays well under it
        let mut inserted = 0;
        for chunk in active_models.chunks(100) {
            inserted += QueuedJobs::insert_many(chunk.to_vec())
                .on_conflict(
                    OnConflict::column(queued_jobs::Column::DedupKey)
                        .do_nothing()
                        .to_owned(),
                )
                .exec_without_returning(&self.conn)
                .await?;
        }

        Ok(inserted)
    }

    async fn next_batch(&self, limit: u64) -> Result<Vec<QueuedJob>, QueueError> {
        let rows = QueuedJobs::find()
            .order_by_asc(queued_jobs::Column::Id)
            .limit(limit)
            .all(&self.conn)
            .await?;

        rows.into_iter()
            .map(|row| {
                let payload = serde_json::from_str(&row.payload)?;
                Ok(QueuedJob {
                    id: row.id,
                    name: row.name,
                    payload,
                    dedup_key: row.dedup_key,
                })
            })
            .collect()
    }

    async fn remove(&self, id: i64) -> Result<(), QueueError> {
        QueuedJobs::delete_by_id(id).exec(&self.conn).await?;
        Ok(())
    }

    async fn pending_count(&self) -> Result<u64, QueueError> {
        let count = QueuedJobs::find().count(&self.conn).await?;
        Ok(count)
    }
}
