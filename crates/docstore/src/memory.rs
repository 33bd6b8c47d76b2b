//! In-memory document store
//!
//! Keeps collections in insertion order behind a mutex. Batches are applied to
//! a copy of the state and swapped in only when every write succeeded, so a
//! failed batch leaves nothing behind. Used for tests and local development.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::document::{apply_updates, merge_fields, Document, Fields, WriteOp};
use crate::error::StoreError;
use crate::path::{CollectionPath, DocumentPath};
use crate::query::Query;
use crate::DocumentStore;

type Collections = HashMap<String, Vec<Document>>;

#[derive(Debug, Default)]
struct Inner {
    collections: Collections,
    unavailable: bool,
}

/// In-memory document store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate an outage: while set, every operation fails with `Unavailable`
    pub fn set_unavailable(&self, unavailable: bool) {
        self.lock_raw().unavailable = unavailable;
    }

    /// Number of documents in a collection
    pub fn count(&self, collection: &CollectionPath) -> usize {
        self.lock_raw()
            .collections
            .get(&collection.key())
            .map(Vec::len)
            .unwrap_or(0)
    }

    fn lock_raw(&self) -> MutexGuard<'_, Inner> {
        // a panic while holding the lock cannot leave a half-applied batch
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, StoreError> {
        let guard = self.lock_raw();
        if guard.unavailable {
            return Err(StoreError::Unavailable(
                "in-memory store marked unavailable".to_string(),
            ));
        }
        Ok(guard)
    }
}

fn find<'a>(collections: &'a Collections, path: &DocumentPath) -> Option<&'a Document> {
    collections
        .get(&path.parent().key())?
        .iter()
        .find(|doc| doc.id == path.id())
}

fn find_mut<'a>(collections: &'a mut Collections, path: &DocumentPath) -> Option<&'a mut Document> {
    collections
        .get_mut(&path.parent().key())?
        .iter_mut()
        .find(|doc| doc.id == path.id())
}

fn insert(collections: &mut Collections, path: &DocumentPath, data: Fields) {
    collections
        .entry(path.parent().key())
        .or_default()
        .push(Document::new(path.id(), data));
}

fn apply(collections: &mut Collections, op: &WriteOp) -> Result<(), StoreError> {
    match op {
        WriteOp::Create { path, data } => {
            if find(collections, path).is_some() {
                return Err(StoreError::AlreadyExists(path.to_string()));
            }
            insert(collections, path, data.clone());
        }
        WriteOp::Set { path, data, merge } => match find_mut(collections, path) {
            Some(existing) if *merge => merge_fields(&mut existing.data, data),
            Some(existing) => existing.data = data.clone(),
            None => insert(collections, path, data.clone()),
        },
        WriteOp::Update { path, updates } => {
            let existing = find_mut(collections, path)
                .ok_or_else(|| StoreError::NotFound(path.to_string()))?;
            apply_updates(&mut existing.data, updates)?;
        }
        WriteOp::Delete { path } => {
            if let Some(docs) = collections.get_mut(&path.parent().key()) {
                docs.retain(|doc| doc.id != path.id());
            }
        }
    }
    Ok(())
}

#[async_trait::async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, path: &DocumentPath) -> Result<Option<Document>, StoreError> {
        let inner = self.lock()?;
        Ok(find(&inner.collections, path).cloned())
    }

    async fn query(
        &self,
        collection: &CollectionPath,
        query: &Query,
    ) -> Result<Vec<Document>, StoreError> {
        let inner = self.lock()?;
        let documents = inner
            .collections
            .get(&collection.key())
            .cloned()
            .unwrap_or_default();
        Ok(query.apply(documents))
    }

    async fn commit(&self, ops: Vec<WriteOp>) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        let mut staged = inner.collections.clone();
        for op in &ops {
            apply(&mut staged, op)?;
        }
        inner.collections = staged;
        tracing::trace!(writes = ops.len(), "Committed in-memory batch");
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
