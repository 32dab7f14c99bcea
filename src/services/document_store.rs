//! Document store port for the denormalized output.
//!
//! Documents are addressed by collection and key; an upsert replaces the
//! stored document wholesale, so a failed normalization run never leaves a
//! partially written document behind.

use thiserror::Error;

/// Domain errors for document operations.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Malformed document body: {0}")]
    Malformed(String),
}

impl From<sea_orm::DbErr> for DocumentError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<serde_json::Error> for DocumentError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert-or-replace the document at `(collection, key)`. Atomic per key.
    async fn upsert(
        &self,
        collection: &str,
        key: &str,
        document: &serde_json::Value,
    ) -> Result<(), DocumentError>;

    /// The stored document, if any.
    async fn get(
        &self,
        collection: &str,
        key: &str,
    ) -> Result<Option<serde_json::Value>, DocumentError>;
}
