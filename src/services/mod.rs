pub mod discovery;
pub use discovery::{DiscoveryError, TitleDiscoveryService};

pub mod document_store;
pub use document_store::{DocumentError, DocumentStore};

pub mod document_store_impl;
pub use document_store_impl::SeaOrmDocumentStore;

pub mod job_queue;
pub use job_queue::{JobQueue, JobSpec, QueueError, QueuedJob};

pub mod job_queue_impl;
pub use job_queue_impl::SeaOrmJobQueue;

pub mod normalize;
pub use normalize::{NormalizeError, TitleNormalizationService};
