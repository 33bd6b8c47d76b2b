//! Rosterboard document store adapter
//!
//! Hierarchical collections of schemaless JSON documents, as used by the
//! teams and rosters domains:
//! - `users/{userId}`
//! - `organizations/{teamId}`
//! - `organizations/{teamId}/players/{playerId}`
//!
//! Two backends implement [`DocumentStore`]: [`MemoryStore`] for tests and local
//! development, [`PostgresStore`] for deployments.

mod document;
mod error;
pub mod layout;
mod memory;
mod path;
mod postgres;
mod query;

use std::sync::Arc;

use rosterboard_common::{Config, StoreBackend};

pub use document::{
    apply_updates, generate_id, get_field, merge_fields, to_fields, Document, FieldUpdate, Fields,
    WriteOp, GENERATED_ID_LEN,
};
pub use error::StoreError;
pub use memory::MemoryStore;
pub use path::{CollectionPath, DocumentPath};
pub use postgres::PostgresStore;
pub use query::{compare_values, Direction, Query};

/// Document store operations.
///
/// Only `get`, `query` and `commit` are required; single writes are batches of one.
#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read a document by path
    async fn get(&self, path: &DocumentPath) -> Result<Option<Document>, StoreError>;

    /// Run an ordered/limited query over one collection
    async fn query(
        &self,
        collection: &CollectionPath,
        query: &Query,
    ) -> Result<Vec<Document>, StoreError>;

    /// Apply a batch of writes atomically: either all of them or none
    async fn commit(&self, ops: Vec<WriteOp>) -> Result<(), StoreError>;

    /// Backend name for logs
    fn backend_name(&self) -> &'static str;

    /// Create a document with a store-generated id
    async fn add(&self, collection: &CollectionPath, data: Fields) -> Result<DocumentPath, StoreError> {
        let path = collection.doc(&generate_id())?;
        self.commit(vec![WriteOp::Create {
            path: path.clone(),
            data,
        }])
        .await?;
        Ok(path)
    }

    /// Overwrite a document, or merge into it when `merge` is set
    async fn set(&self, path: &DocumentPath, data: Fields, merge: bool) -> Result<(), StoreError> {
        self.commit(vec![WriteOp::Set {
            path: path.clone(),
            data,
            merge,
        }])
        .await
    }

    /// Partially update an existing document
    async fn update(
        &self,
        path: &DocumentPath,
        updates: Vec<FieldUpdate>,
    ) -> Result<(), StoreError> {
        self.commit(vec![WriteOp::Update {
            path: path.clone(),
            updates,
        }])
        .await
    }

    /// Delete a document
    async fn delete(&self, path: &DocumentPath) -> Result<(), StoreError> {
        self.commit(vec![WriteOp::Delete { path: path.clone() }])
            .await
    }
}

/// Shared handle to a document store
pub type SharedStore = Arc<dyn DocumentStore>;

/// Factory for creating document stores
pub struct StoreFactory;

impl StoreFactory {
    /// Create the document store selected by configuration
    pub async fn create(config: &Config) -> Result<SharedStore, StoreError> {
        match config.store_backend {
            StoreBackend::Memory => {
                tracing::info!("Creating in-memory document store");
                Ok(Arc::new(MemoryStore::new()))
            }
            StoreBackend::Postgres => {
                tracing::info!("Creating PostgreSQL document store");
                let url = config.database_url.as_deref().ok_or_else(|| {
                    StoreError::Unavailable("DATABASE_URL is not configured".to_string())
                })?;
                Ok(Arc::new(PostgresStore::connect(url).await?))
            }
        }
    }
}
