use anyhow::Result;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::{Duration, interval};
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{debug, error, info, warn};

use crate::config::{Config, SchedulerConfig};
use crate::constants::NORMALIZE_TITLE_JOB;
use crate::db::Store;
use crate::domain::ImdbId;
use crate::services::{
    JobQueue, QueuedJob, SeaOrmDocumentStore, SeaOrmJobQueue, TitleDiscoveryService,
    TitleNormalizationService,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: Store,
    pub queue: Arc<dyn JobQueue>,
    pub discovery: Arc<TitleDiscoveryService>,
    pub normalizer: Arc<TitleNormalizationService>,
}

impl AppState {
    pub async fn new(config: Config) -> Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let queue: Arc<dyn JobQueue> = Arc::new(SeaOrmJobQueue::new(store.conn.clone()));
        let documents = Arc::new(SeaOrmDocumentStore::new(store.conn.clone()));

        let discovery = Arc::new(TitleDiscoveryService::new(
            store.clone(),
            Arc::clone(&queue),
        ));
        let normalizer = Arc::new(TitleNormalizationService::new(store.clone(), documents));

        Ok(Self {
            config,
            store,
            queue,
            discovery,
            normalizer,
        })
    }
}

pub struct Scheduler {
    state: Arc<AppState>,
    config: SchedulerConfig,
    running: Arc<RwLock<bool>>,
}

impl Scheduler {
    pub fn new(state: Arc<AppState>, config: SchedulerConfig) -> Self {
        Self {
            state,
            config,
            running: Arc::new(RwLock::new(false)),
        }
    }

    pub async fn start(&self) -> Result<()> {
        if !self.config.enabled {
            info!("Scheduler is disabled in config");
            return Ok(());
        }

        *self.running.write().await = true;
        info!("Starting background scheduler");

        if let Some(cron_expr) = &self.config.cron_expression {
            self.run_with_cron(cron_expr).await
        } else {
            self.run_with_interval().await
        }
    }

    async fn run_with_cron(&self, cron_expr: &str) -> Result<()> {
        let mut sched = JobScheduler::new().await?;

        let state = Arc::clone(&self.state);
        let running = Arc::clone(&self.running);

        let job = Job::new_async(cron_expr, move |_uuid, _lock| {
            let state = Arc::clone(&state);
            let running = Arc::clone(&running);
            Box::pin(async move {
                if !*running.read().await {
                    return;
                }
                if let Err(e) = state.discovery.run().await {
                    error!("Scheduled discovery run failed: {}", e);
                }
            })
        })?;

        sched.add(job).await?;
        sched.start().await?;

        info!("Scheduler running with cron: {}", cron_expr);

        let poll = Duration::from_secs(u64::from(self.config.worker_poll_seconds));
        loop {
            if !*self.running.read().await {
                break;
            }
            if let Err(e) = drain_queue(&self.state, self.config.worker_batch_size).await {
                error!("Queue worker failed: {}", e);
            }
            tokio::time::sleep(poll).await;
        }

        sched.shutdown().await?;
        Ok(())
    }

    async fn run_with_interval(&self) -> Result<()> {
        let interval_mins = self.config.discovery_interval_minutes;

        info!("Scheduler running discovery every {} minutes", interval_mins);

        let mut discovery_interval = interval(Duration::from_secs(u64::from(interval_mins) * 60));

        let mut worker_interval =
            interval(Duration::from_secs(u64::from(self.config.worker_poll_seconds)));

        loop {
            tokio::select! {
                _ = discovery_interval.tick() => {
                    if !*self.running.read().await {
                        break;
                    }
                    info!("Running scheduled discovery...");
                    if let Err(e) = self.state.discovery.run().await {
                        error!("Scheduled discovery run failed: {}", e);
                    }
                }
                _ = worker_interval.tick() => {
                    if !*self.running.read().await {
                        break;
                    }
                    if let Err(e) = drain_queue(&self.state, self.config.worker_batch_size).await {
                        error!("Queue worker failed: {}", e);
                    }
                }
            }
        }

        Ok(())
    }

    pub async fn stop(&self) {
        info!("Stopping scheduler...");
        *self.running.write().await = false;
    }

    pub async fn is_running(&self) -> bool {
        *self.running.read().await
    }

    pub async fn run_once(&self) -> Result<()> {
        info!("Running manual discovery + drain...");

        self.state.discovery.run().await?;

        drain_queue(&self.state, self.config.worker_batch_size).await?;

        Ok(())
    }
}

/// Claims and executes pending jobs until the queue is empty.
///
/// Jobs are removed after execution whether or not they succeeded; a failed
/// job is logged and dropped, leaving retry policy to whatever engine hosts
/// the queue in a larger deployment.
async fn drain_queue(state: &AppState, batch_size: u64) -> Result<()> {
    loop {
        let jobs = state.queue.next_batch(batch_size).await?;
        if jobs.is_empty() {
            return Ok(());
        }

        debug!(claimed = jobs.len(), "processing queued jobs");

        for job in jobs {
            process_job(state, &job).await;
            state.queue.remove(job.id).await?;
        }
    }
}

async fn process_job(state: &AppState, job: &QueuedJob) {
    if job.name != NORMALIZE_TITLE_JOB {
        warn!(name = %job.name, "skipping job with unknown name");
        return;
    }

    let Some(imdb_id) = job.payload.get("imdbId").and_then(|v| v.as_str()) else {
        warn!(dedup_key = %job.dedup_key, "job payload missing imdbId");
        return;
    };

    if let Err(e) = state.normalizer.execute(&ImdbId::new(imdb_id)).await {
        metrics::counter!("normarr_normalize_failures_total").increment(1);
        error!(imdb_id, error = %e, "normalization failed, dropping job");
    }
}
