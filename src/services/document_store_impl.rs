//! `SeaORM` implementation of the [`DocumentStore`] trait.

use crate::entities::{documents, prelude::*};
use crate::services::document_store::{DocumentError, DocumentStore};
use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, EntityTrait, Set};

#[derive(Clone)]
pub struct SeaOrmDocumentStore {
    conn: DatabaseConnection,
}

impl SeaOrmDocumentStore {
    #[must_use]
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl DocumentStore for SeaOrmDocumentStore {
    async fn upsert(
        &self,
        collection: &str,
        key: &str,
        document: &serde_json::Value,
    ) -> Result<(), DocumentError> {
        let active_model = documents::ActiveModel {
            collection: Set(collection.to_string()),
            doc_key: Set(key.to_string()),
            body: Set(document.to_string()),
            updated_at: Set(chrono::Utc::now().to_rfc3339()),
        };

        Documents::insert(active_model)
            .on_conflict(
                OnConflict::columns([documents::Column::Collection, documents::Column::DocKey])
                    .update_columns([documents::Column::Body, documents::Column::UpdatedAt])
                    .to_owned(),
            )
            .exec(&self.conn)
            .await?;

        Ok(())
    }

    async fn get(
        &self,
        collection: &str,
        key: &str,
    ) -> Result<Option<serde_json::Value>, DocumentError> {
        let row = Documents::find_by_id((collection.to_string(), key.to_string()))
            .one(&self.conn)
            .await?;

        row.map(|r| serde_json::from_str(&r.body).map_err(DocumentError::from))
            .transpose()
    }
}
