//! Thread-safe handle around a `PostStore`

use contentflow_domain::{
    Post, PostDraft, PostId, PostPatch, PostStore, Saved, StoreError,
    usecases::calendar::{CalendarProjector, DropTarget},
};
use std::sync::{Arc, RwLock};
use thiserror::Error;
use time::PrimitiveDateTime;

/// Error type for shared store operations
#[derive(Debug, Error)]
pub enum SharedStoreError {
    #[error("Store lock poisoned: {0}")]
    Lock(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Cloneable store handle; one writer at a time, readers get snapshots
#[derive(Clone)]
pub struct SharedPostStore {
    inner: Arc<RwLock<PostStore>>,
}

impl SharedPostStore {
    pub fn new(store: PostStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    pub fn add(&self, draft: PostDraft) -> Result<Saved, SharedStoreError> {
        let mut store = self
            .inner
            .write()
            .map_err(|e| SharedStoreError::Lock(e.to_string()))?;
        Ok(store.add(draft)?)
    }

    pub fn update(&self, id: PostId, patch: PostPatch) -> Result<Saved, SharedStoreError> {
        let mut store = self
            .inner
            .write()
            .map_err(|e| SharedStoreError::Lock(e.to_string()))?;
        Ok(store.update(id, patch)?)
    }

    pub fn remove(&self, id: PostId) -> Result<Option<Post>, SharedStoreError> {
        let mut store = self
            .inner
            .write()
            .map_err(|e| SharedStoreError::Lock(e.to_string()))?;
        Ok(store.remove(id))
    }

    pub fn apply_drop(&self, id: PostId, target: DropTarget) -> Result<Saved, SharedStoreError> {
        let mut store = self
            .inner
            .write()
            .map_err(|e| SharedStoreError::Lock(e.to_string()))?;
        Ok(CalendarProjector::apply_drop(&mut store, id, target)?)
    }

    pub fn get(&self, id: PostId) -> Result<Option<Post>, SharedStoreError> {
        let store = self
            .inner
            .read()
            .map_err(|e| SharedStoreError::Lock(e.to_string()))?;
        Ok(store.get(id).cloned())
    }

    pub fn snapshot(&self) -> Result<Vec<Post>, SharedStoreError> {
        let store = self
            .inner
            .read()
            .map_err(|e| SharedStoreError::Lock(e.to_string()))?;
        Ok(store.snapshot())
    }

    pub fn query_by_date_range(
        &self,
        start: PrimitiveDateTime,
        end: PrimitiveDateTime,
    ) -> Result<Vec<Post>, SharedStoreError> {
        let store = self
            .inner
            .read()
            .map_err(|e| SharedStoreError::Lock(e.to_string()))?;
        Ok(store.query_by_date_range(start, end))
    }

    pub fn query_upcoming(&self) -> Result<Vec<Post>, SharedStoreError> {
        let store = self
            .inner
            .read()
            .map_err(|e| SharedStoreError::Lock(e.to_string()))?;
        Ok(store.query_upcoming(store.now()))
    }

    pub fn query_recent(&self, limit: usize) -> Result<Vec<Post>, SharedStoreError> {
        let store = self
            .inner
            .read()
            .map_err(|e| SharedStoreError::Lock(e.to_string()))?;
        Ok(store.query_recent(store.now(), limit))
    }

    /// Run a read-only closure against the store
    pub fn with_store<T>(&self, f: impl FnOnce(&PostStore) -> T) -> Result<T, SharedStoreError> {
        let store = self
            .inner
            .read()
            .map_err(|e| SharedStoreError::Lock(e.to_string()))?;
        Ok(f(&store))
    }
}
